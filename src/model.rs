//! Survey data types.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Answer returned for any question without a recorded answer.
pub const NO_ANSWER: &str = "No answer";

const INDECISIVE_COLOR: &str = "Red. No, Green. Wait.. Blue... AAARGGGGGHHH!";

/// Kind of a survey question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    YesNo,
    Number,
    Text,
}

/// Survey question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    kind: QuestionKind,
    text: String,
}

impl Question {
    pub fn new(kind: QuestionKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    pub fn kind(&self) -> QuestionKind {
        self.kind
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Split the question into its kind and text.
    pub fn into_parts(self) -> (QuestionKind, String) {
        (self.kind, self.text)
    }
}

/// Session of a single respondent.
///
/// The answer map is absent until the respondent consents and goes through
/// an answer pass. Only questions that produced an answer have an entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    id: i32,
    answers: Option<BTreeMap<usize, String>>,
}

impl Response {
    pub fn new(id: i32) -> Self {
        Self { id, answers: None }
    }

    /// Create a response with an id drawn from `rng`.
    ///
    /// Ids are non-negative and not guaranteed to be unique.
    pub fn with_random_id<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::new(rng.random_range(0..i32::MAX))
    }

    pub fn id(&self) -> i32 {
        self.id
    }

    /// Whether the respondent consented and went through the answer pass.
    pub fn has_answered(&self) -> bool {
        self.answers.is_some()
    }

    /// Get the answer recorded for question `index`, or [`NO_ANSWER`].
    pub fn answer(&self, index: usize) -> &str {
        self.answers
            .as_ref()
            .and_then(|answers| answers.get(&index))
            .map_or(NO_ANSWER, String::as_str)
    }

    /// Ask for consent and, if given, answer every question in order.
    ///
    /// Returns `true` if the respondent consented, however many questions
    /// were left unanswered.
    pub fn run_survey<R: Rng + ?Sized>(&mut self, questions: &[Question], rng: &mut R) -> bool {
        if !consent_to_survey(rng) {
            return false;
        }

        let answers = self.answers.insert(BTreeMap::new());
        for (index, question) in questions.iter().enumerate() {
            if let Some(answer) = generate_answer(question.kind(), rng) {
                answers.insert(index, answer);
            }
        }

        true
    }
}

fn consent_to_survey<R: Rng + ?Sized>(rng: &mut R) -> bool {
    rng.random_range(0..=1) == 1
}

fn generate_answer<R: Rng + ?Sized>(kind: QuestionKind, rng: &mut R) -> Option<String> {
    match kind {
        QuestionKind::YesNo => match rng.random_range(-1..=1) {
            -1 => None,
            0 => Some("No".to_string()),
            _ => Some("Yes".to_string()),
        },
        QuestionKind::Number => {
            let n: i32 = rng.random_range(-30..=100);
            (n >= 0).then(|| n.to_string())
        }
        QuestionKind::Text => match rng.random_range(0..=4) {
            0 => None,
            1 => Some("Red".to_string()),
            2 => Some("Green".to_string()),
            3 => Some("Blue".to_string()),
            _ => Some(INDECISIVE_COLOR.to_string()),
        },
    }
}
