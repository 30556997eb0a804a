use crate::model::{Question, QuestionKind, Response};
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum SurveyError {
    #[error("question index {index} is out of range for {len} questions")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Ordered question set together with every respondent asked so far.
///
/// Respondents are absent until the first simulation pass; later passes
/// append to the same list.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurveyRun {
    questions: Vec<Question>,
    respondents: Option<Vec<Response>>,
}

impl SurveyRun {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_question(&mut self, kind: QuestionKind, text: impl Into<String>) {
        self.push_question(Question::new(kind, text));
    }

    pub fn push_question(&mut self, question: Question) {
        self.questions.push(question);
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn question(&self, index: usize) -> Result<&Question, SurveyError> {
        self.questions
            .get(index)
            .ok_or(SurveyError::IndexOutOfRange {
                index,
                len: self.questions.len(),
            })
    }

    /// Ask fresh respondents until `n_consenting` of them complete the survey.
    ///
    /// Every respondent is kept, consenting or not, in creation order.
    /// Returns the number of respondents created by this pass.
    pub fn run_simulation<R: Rng + ?Sized>(&mut self, n_consenting: usize, rng: &mut R) -> usize {
        let respondents = self.respondents.get_or_insert_with(Vec::new);
        let n_before = respondents.len();

        let mut n_completed = 0;
        while n_completed < n_consenting {
            let mut respondent = Response::with_random_id(rng);
            if respondent.run_survey(&self.questions, rng) {
                n_completed += 1;
            }
            log::debug!(
                "respondent {} consented: {}",
                respondent.id(),
                respondent.has_answered()
            );
            respondents.push(respondent);
        }

        respondents.len() - n_before
    }

    pub fn all_participants(&self) -> &[Response] {
        self.respondents.as_deref().unwrap_or_default()
    }

    /// Number of participants who completed the survey.
    pub fn n_answered(&self) -> usize {
        self.all_participants()
            .iter()
            .filter(|respondent| respondent.has_answered())
            .count()
    }
}
