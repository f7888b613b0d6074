/*!
 * The routes module contains all the tide routes and the logic to fulfill the responses for each
 * route.
 *
 * Modules are nested for cleaner organization here
 */
use tide::{Redirect, Request, StatusCode};

use crate::urls::{reverse, Route, QUESTION_ID};
use crate::AppState;

/**
 * Pull the question id out of the path, anything that is not a number
 * cannot name a question
 */
fn question_id(req: &Request<AppState>) -> Result<i64, tide::Error> {
    req.param(QUESTION_ID)?
        .parse::<i64>()
        .map_err(|_| not_found())
}

fn not_found() -> tide::Error {
    tide::Error::from_str(StatusCode::NotFound, "No such question")
}

/**
 *  GET /
 */
pub async fn root(_req: Request<AppState>) -> tide::Result {
    Ok(Redirect::new(reverse(Route::Index)).into())
}

pub mod polls {
    use chrono::Utc;
    use log::*;
    use tide::{Redirect, Request};

    use super::{not_found, question_id};
    use crate::api_models::{Ballot, Index, QuestionPage};
    use crate::dao;
    use crate::models::Question;
    use crate::templates::render;
    use crate::urls::{reverse, Route};
    use crate::AppState;

    /**
     * Number of questions listed on the index page
     */
    const LATEST_LIMIT: i64 = 5;

    const NO_CHOICE: &str = "You didn't select a choice.";

    /**
     * Fetch the question named in the path, provided it has been published
     */
    async fn published_question(req: &Request<AppState>) -> Result<Question, tide::Error> {
        let id = question_id(req)?;
        match dao::find_published(&req.state().db, id, Utc::now()).await? {
            Some(question) => Ok(question),
            None => {
                debug!("Question {} is missing or unpublished", id);
                Err(not_found())
            }
        }
    }

    async fn question_page(req: &Request<AppState>) -> Result<QuestionPage, tide::Error> {
        let question = published_question(req).await?;
        let choices = dao::choices_for(&req.state().db, question.id).await?;
        Ok(QuestionPage::new(question, choices))
    }

    /**
     *  GET /polls
     */
    pub async fn index(req: Request<AppState>) -> tide::Result {
        let state = req.state();
        let questions = dao::latest_published(&state.db, Utc::now(), LATEST_LIMIT).await?;
        debug!("Listing {} questions", questions.len());

        let page = Index {
            title: "Polls",
            latest_question_list: questions,
        };
        render(&state.templates, "polls/index", &page)
    }

    /**
     *  GET /polls/:question_id
     */
    pub async fn detail(req: Request<AppState>) -> tide::Result {
        let page = question_page(&req).await?;
        render(&req.state().templates, "polls/detail", &page)
    }

    /**
     *  GET /polls/:question_id/results
     */
    pub async fn results(req: Request<AppState>) -> tide::Result {
        let page = question_page(&req).await?;
        render(&req.state().templates, "polls/results", &page)
    }

    /**
     *  POST /polls/:question_id/vote
     *
     * A ballot naming one of the question's choices is counted and the voter
     * is sent to the results, anything else redisplays the form.
     */
    pub async fn vote(mut req: Request<AppState>) -> tide::Result {
        let body = req.body_string().await?;
        let question = published_question(&req).await?;
        let state = req.state();

        let ballot = match serde_qs::from_str::<Ballot>(&body) {
            Ok(ballot) => ballot,
            Err(err) => {
                debug!("Unreadable ballot {:?}: {}", body, err);
                Ballot::default()
            }
        };

        if let Some(choice) = ballot.choice {
            if dao::record_vote(&state.db, question.id, choice).await? {
                info!("Vote recorded for choice {} of question {}", choice, question.id);
                let results = Route::Results(question.id);
                debug!("Redirecting to {}", results.name());
                return Ok(Redirect::new(reverse(results)).into());
            }
            warn!("Choice {} does not belong to question {}", choice, question.id);
        }

        let choices = dao::choices_for(&state.db, question.id).await?;
        let page = QuestionPage::new(question, choices).with_error(NO_CHOICE);
        render(&state.templates, "polls/detail", &page)
    }
}

/**
 * The api module is a small JSON interface for managing questions
 */
pub mod api {
    use log::*;
    use tide::{Body, Request, Response, StatusCode};

    use super::{not_found, question_id};
    use crate::api_models::{InsertablePoll, NewChoice, Poll};
    use crate::dao;
    use crate::AppState;

    /**
     *  PUT /api/v1/questions
     */
    pub async fn create(mut req: Request<AppState>) -> tide::Result {
        let poll: InsertablePoll = req.body_json().await?;
        debug!("Poll received: {:?}", poll);

        if let Err(reason) = poll.validate() {
            return Err(tide::Error::from_str(StatusCode::BadRequest, reason));
        }

        let (question, choices) = dao::create_question(
            &req.state().db,
            &poll.insertable_question(),
            &poll.insertable_choices(),
        )
        .await?;
        info!("Created question {}: {}", question.id, question);

        Ok(Response::builder(StatusCode::Created)
            .body(Body::from_json(&Poll::new(question, choices))?)
            .build())
    }

    /**
     *  POST /api/v1/questions/:question_id/choices
     */
    pub async fn add_choice(mut req: Request<AppState>) -> tide::Result {
        let choice: NewChoice = req.body_json().await?;
        let id = question_id(&req)?;

        if let Err(reason) = choice.validate() {
            return Err(tide::Error::from_str(StatusCode::BadRequest, reason));
        }

        let db = &req.state().db;
        if dao::find_question(db, id).await?.is_none() {
            return Err(not_found());
        }

        let created = dao::create_choice(db, id, &choice.insertable()).await?;
        info!("Added choice {} to question {}", created.id, id);

        Ok(Response::builder(StatusCode::Created)
            .body(Body::from_json(&created)?)
            .build())
    }

    /**
     *  GET /api/v1/questions/:question_id
     */
    pub async fn get(req: Request<AppState>) -> tide::Result {
        let id = question_id(&req)?;
        let db = &req.state().db;

        match dao::find_question(db, id).await? {
            Some(question) => {
                let choices = dao::choices_for(db, question.id).await?;
                Ok(Body::from_json(&Poll::new(question, choices))?.into())
            }
            None => Err(not_found()),
        }
    }
}
