/*!
 * The dao module holds every query the application makes against the database
 */
use chrono::{DateTime, Utc};
use log::*;
use sqlx::sqlite::SqlitePool;

use crate::models::{Choice, InsertableChoice, InsertableQuestion, Question};

/**
 * The most recently published questions, newest first.
 *
 * Questions scheduled after `now` are left out.
 */
pub async fn latest_published(
    db: &SqlitePool,
    now: DateTime<Utc>,
    limit: i64,
) -> Result<Vec<Question>, sqlx::Error> {
    sqlx::query_as::<_, Question>(
        "SELECT * FROM questions WHERE pub_date <= ? ORDER BY pub_date DESC, id DESC LIMIT ?",
    )
    .bind(now)
    .bind(limit)
    .fetch_all(db)
    .await
}

pub async fn find_question(db: &SqlitePool, id: i64) -> Result<Option<Question>, sqlx::Error> {
    sqlx::query_as::<_, Question>("SELECT * FROM questions WHERE id = ?")
        .bind(id)
        .fetch_optional(db)
        .await
}

/**
 * Look up a question, hiding it until it has been published
 */
pub async fn find_published(
    db: &SqlitePool,
    id: i64,
    now: DateTime<Utc>,
) -> Result<Option<Question>, sqlx::Error> {
    Ok(find_question(db, id)
        .await?
        .filter(|question| question.is_published_at(now)))
}

pub async fn choices_for(db: &SqlitePool, question_id: i64) -> Result<Vec<Choice>, sqlx::Error> {
    sqlx::query_as::<_, Choice>("SELECT * FROM choices WHERE question_id = ? ORDER BY id ASC")
        .bind(question_id)
        .fetch_all(db)
        .await
}

/**
 * Insert the question and all of its choices, or nothing at all
 */
pub async fn create_question(
    db: &SqlitePool,
    question: &InsertableQuestion,
    choices: &[InsertableChoice],
) -> Result<(Question, Vec<Choice>), sqlx::Error> {
    let mut tx = db.begin().await?;

    let id = sqlx::query("INSERT INTO questions (question_text, pub_date) VALUES (?, ?)")
        .bind(&question.question_text)
        .bind(question.pub_date)
        .execute(&mut tx)
        .await?
        .last_insert_rowid();

    let mut created = Vec::with_capacity(choices.len());
    for choice in choices.iter() {
        let choice_id =
            sqlx::query("INSERT INTO choices (question_id, choice_text, votes) VALUES (?, ?, ?)")
                .bind(id)
                .bind(&choice.choice_text)
                .bind(choice.votes)
                .execute(&mut tx)
                .await?
                .last_insert_rowid();

        created.push(Choice {
            id: choice_id,
            question_id: id,
            choice_text: choice.choice_text.clone(),
            votes: choice.votes,
        });
    }

    tx.commit().await?;
    debug!("inserted question {} with {} choices", id, created.len());

    let question = Question {
        id,
        question_text: question.question_text.clone(),
        pub_date: question.pub_date,
    };
    Ok((question, created))
}

pub async fn create_choice(
    db: &SqlitePool,
    question_id: i64,
    choice: &InsertableChoice,
) -> Result<Choice, sqlx::Error> {
    let id = sqlx::query("INSERT INTO choices (question_id, choice_text, votes) VALUES (?, ?, ?)")
        .bind(question_id)
        .bind(&choice.choice_text)
        .bind(choice.votes)
        .execute(db)
        .await?
        .last_insert_rowid();

    Ok(Choice {
        id,
        question_id,
        choice_text: choice.choice_text.clone(),
        votes: choice.votes,
    })
}

/**
 * Count one vote for the choice, returning false when the choice does not
 * belong to the question
 */
pub async fn record_vote(
    db: &SqlitePool,
    question_id: i64,
    choice_id: i64,
) -> Result<bool, sqlx::Error> {
    let result =
        sqlx::query("UPDATE choices SET votes = votes + 1 WHERE id = ? AND question_id = ?")
            .bind(choice_id)
            .bind(question_id)
            .execute(db)
            .await?;

    Ok(result.rows_affected() == 1)
}
