use thiserror::Error;

use crate::model::ids::{QuestionId, TopicId};

/// Minimum number of answer options a question must carry.
pub const MIN_OPTIONS: usize = 2;

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question needs at least {MIN_OPTIONS} options, got {len}")]
    TooFewOptions { len: usize },
}

//
// ─── QUESTION ─────────────────────────────────────────────────────────────────
//

/// A single quiz round served by the backend.
///
/// Options are addressed by their position; the index is the answer key sent
/// back on submit. The option list never changes after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    id: QuestionId,
    topic: TopicId,
    prompt: String,
    options: Vec<String>,
}

impl Question {
    /// Builds a question, rejecting structurally unusable payloads.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::TooFewOptions` when fewer than two options are
    /// supplied. The prompt is taken as-is, blank or not.
    pub fn new(
        id: QuestionId,
        topic: TopicId,
        prompt: impl Into<String>,
        options: Vec<String>,
    ) -> Result<Self, QuestionError> {
        if options.len() < MIN_OPTIONS {
            return Err(QuestionError::TooFewOptions { len: options.len() });
        }
        Ok(Self {
            id,
            topic,
            prompt: prompt.into(),
            options,
        })
    }

    #[must_use]
    pub fn id(&self) -> QuestionId {
        self.id
    }

    #[must_use]
    pub fn topic(&self) -> TopicId {
        self.topic
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn option_count(&self) -> usize {
        self.options.len()
    }

    /// Text of the option at `index`, if it exists.
    #[must_use]
    pub fn option(&self, index: usize) -> Option<&str> {
        self.options.get(index).map(String::as_str)
    }

    #[must_use]
    pub fn is_valid_answer(&self, index: usize) -> bool {
        index < self.options.len()
    }

    /// One-based number shown to the learner ("Question #1" for id 0).
    #[must_use]
    pub fn display_number(&self) -> u64 {
        self.id.value().saturating_add(1)
    }
}

//
// ─── FEEDBACK ─────────────────────────────────────────────────────────────────
//

/// Backend verdict for a submitted answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub correct: bool,
    pub message: String,
}

impl Feedback {
    #[must_use]
    pub fn new(correct: bool, message: impl Into<String>) -> Self {
        Self {
            correct,
            message: message.into(),
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    fn options(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn builds_question_with_two_or_more_options() {
        let q = Question::new(
            QuestionId::new(0),
            TopicId::new(2),
            "Q1",
            options(&["A", "B", "C"]),
        )
        .unwrap();
        assert_eq!(q.option_count(), 3);
        assert_eq!(q.option(1), Some("B"));
        assert_eq!(q.option(3), None);
        assert_eq!(q.display_number(), 1);
        assert!(q.is_valid_answer(2));
        assert!(!q.is_valid_answer(3));
    }

    #[test]
    fn rejects_single_option() {
        let err = Question::new(QuestionId::new(1), TopicId::new(0), "Q", options(&["A"]))
            .unwrap_err();
        assert_eq!(err, QuestionError::TooFewOptions { len: 1 });
    }

    #[test]
    fn accepts_blank_prompt() {
        let q = Question::new(QuestionId::new(1), TopicId::new(0), "", options(&["A", "B"]))
            .unwrap();
        assert_eq!(q.prompt(), "");
        assert_eq!(q.option_count(), 2);
    }
}
