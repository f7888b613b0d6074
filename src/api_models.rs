use serde::{Deserialize, Serialize};

use crate::models::{Choice, InsertableChoice, InsertableQuestion, Question, MAX_TEXT_LENGTH};

#[derive(Debug, Serialize)]
pub struct Index {
    pub title: &'static str,
    pub latest_question_list: Vec<Question>,
}

/**
 * Everything the detail and results pages need to render a question
 */
#[derive(Debug, Serialize)]
pub struct QuestionPage {
    pub title: String,
    pub question: Question,
    pub choices: Vec<Choice>,
    pub error_message: Option<&'static str>,
}

impl QuestionPage {
    pub fn new(question: Question, choices: Vec<Choice>) -> Self {
        QuestionPage {
            title: question.to_string(),
            question,
            choices,
            error_message: None,
        }
    }

    pub fn with_error(mut self, message: &'static str) -> Self {
        self.error_message = Some(message);
        self
    }
}

/**
 * The form posted by the detail page
 */
#[derive(Debug, Default, Deserialize)]
pub struct Ballot {
    /**
     * Id of the selected choice, absent when the voter picked nothing
     */
    pub choice: Option<i64>,
}

/**
 * A choice added to an existing question through the API
 */
#[derive(Debug, Deserialize)]
pub struct NewChoice {
    pub choice_text: String,
}

impl NewChoice {
    pub fn validate(&self) -> Result<(), String> {
        check_text("choice_text", &self.choice_text)
    }

    pub fn insertable(&self) -> InsertableChoice {
        InsertableChoice::new(self.choice_text.trim())
    }
}

/**
 * User-provided details to create a Question along with its choices
 */
#[derive(Debug, Deserialize)]
pub struct InsertablePoll {
    #[serde(flatten)]
    pub question: InsertableQuestion,
    /**
     * Just the text of each choice
     */
    #[serde(default)]
    pub choices: Vec<String>,
}

impl InsertablePoll {
    /**
     * Check the texts against what the database will store, returning the
     * first complaint
     */
    pub fn validate(&self) -> Result<(), String> {
        check_text("question_text", &self.question.question_text)?;
        for choice in self.choices.iter() {
            check_text("choice", choice)?;
        }
        Ok(())
    }

    pub fn insertable_question(&self) -> InsertableQuestion {
        InsertableQuestion::new(self.question.question_text.trim(), self.question.pub_date)
    }

    pub fn insertable_choices(&self) -> Vec<InsertableChoice> {
        self.choices
            .iter()
            .map(|text| InsertableChoice::new(text.trim()))
            .collect()
    }
}

fn check_text(field: &str, text: &str) -> Result<(), String> {
    if text.trim().is_empty() {
        return Err(format!("{} must not be empty", field));
    }
    if text.trim().chars().count() > MAX_TEXT_LENGTH {
        return Err(format!(
            "{} must be at most {} characters",
            field, MAX_TEXT_LENGTH
        ));
    }
    Ok(())
}

/**
 * Information about a question for API clients
 */
#[derive(Debug, Serialize)]
pub struct Poll {
    pub question: Question,
    pub choices: Vec<Choice>,
    pub was_published_recently: bool,
}

impl Poll {
    pub fn new(question: Question, choices: Vec<Choice>) -> Self {
        Poll {
            was_published_recently: question.was_published_recently(),
            question,
            choices,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn poll(json: &str) -> InsertablePoll {
        serde_json::from_str(json).expect("Failed to deserialize")
    }

    #[test]
    fn pub_date_defaults_to_now() {
        let before = Utc::now();
        let poll = poll(r#"{"question_text": "Color?", "choices": ["Red"]}"#);
        assert!(poll.question.pub_date >= before);
        assert_eq!(poll.choices, vec!["Red".to_string()]);
        assert!(poll.validate().is_ok());
    }

    #[test]
    fn texts_are_trimmed_before_insertion() {
        let poll = poll(r#"{"question_text": " Color? ", "choices": [" Red "]}"#);
        assert_eq!(poll.insertable_question().question_text, "Color?");
        assert_eq!(poll.insertable_choices()[0].choice_text, "Red");
        assert_eq!(poll.insertable_choices()[0].votes, 0);
    }

    #[test]
    fn empty_texts_are_rejected() {
        assert!(poll(r#"{"question_text": "  "}"#).validate().is_err());
        assert!(poll(r#"{"question_text": "Q", "choices": [""]}"#)
            .validate()
            .is_err());
    }

    #[test]
    fn overlong_texts_are_rejected() {
        let long = "x".repeat(MAX_TEXT_LENGTH + 1);
        let poll = InsertablePoll {
            question: InsertableQuestion::new(long, Utc::now()),
            choices: vec![],
        };
        assert!(poll.validate().is_err());
    }

    #[test]
    fn ballot_parses_from_a_form() {
        let ballot: Ballot = serde_qs::from_str("choice=4").expect("Failed to parse");
        assert_eq!(ballot.choice, Some(4));

        let ballot: Ballot = serde_qs::from_str("").expect("Failed to parse");
        assert_eq!(ballot.choice, None);

        assert!(serde_qs::from_str::<Ballot>("choice=blue").is_err());
    }

    #[test]
    fn question_page_carries_the_error() {
        let question = Question {
            id: 9,
            question_text: "Q".to_string(),
            pub_date: Utc::now(),
        };
        let page = QuestionPage::new(question, vec![]);
        assert_eq!(page.title, "Q");
        assert_eq!(page.error_message, None);
        assert_eq!(page.with_error("oops").error_message, Some("oops"));
    }

    #[test]
    fn new_choices_start_without_votes() {
        let choice: NewChoice =
            serde_json::from_str(r#"{"choice_text": " Green ", "votes": 12}"#).expect("parse");
        assert!(choice.validate().is_ok());
        assert_eq!(choice.insertable().choice_text, "Green");
        assert_eq!(choice.insertable().votes, 0);
    }
}
