use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use std::fmt;

/**
 * Longest question or choice text the database will accept
 */
pub const MAX_TEXT_LENGTH: usize = 200;

/**
 * A poll question as it is stored in the database
 */
#[derive(Clone, Debug, Deserialize, Serialize, sqlx::FromRow)]
pub struct Question {
    pub id: i64,
    pub question_text: String,
    pub pub_date: DateTime<Utc>,
}

impl Question {
    pub fn was_published_recently(&self) -> bool {
        self.was_published_recently_at(Utc::now())
    }

    /**
     * True when the question went out within the day leading up to `now`.
     *
     * Questions scheduled for the future are never recent.
     */
    pub fn was_published_recently_at(&self, now: DateTime<Utc>) -> bool {
        self.pub_date <= now && now - self.pub_date < Duration::days(1)
    }

    pub fn is_published_at(&self, now: DateTime<Utc>) -> bool {
        self.pub_date <= now
    }
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.question_text)
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct InsertableQuestion {
    pub question_text: String,
    #[serde(default = "Utc::now")]
    pub pub_date: DateTime<Utc>,
}

impl InsertableQuestion {
    pub fn new(question_text: impl Into<String>, pub_date: DateTime<Utc>) -> Self {
        Self {
            question_text: question_text.into(),
            pub_date,
        }
    }
}

/**
 * One of the answers offered for a question, along with its tally
 */
#[derive(Clone, Debug, Deserialize, Serialize, sqlx::FromRow)]
pub struct Choice {
    pub id: i64,
    pub question_id: i64,
    pub choice_text: String,
    pub votes: i64,
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.choice_text)
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct InsertableChoice {
    pub choice_text: String,
    #[serde(default)]
    pub votes: i64,
}

impl InsertableChoice {
    pub fn new(choice_text: impl Into<String>) -> Self {
        Self {
            choice_text: choice_text.into(),
            votes: 0,
        }
    }
}

impl fmt::Display for InsertableChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.choice_text)
    }
}
