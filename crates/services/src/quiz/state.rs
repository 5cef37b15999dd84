use std::fmt;

use quiz_core::model::{Feedback, KnowledgeVector, Question};

use crate::error::SessionFault;

/// Lifecycle of the question currently held by a `QuizSession`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuizStatus {
    /// No question is available (not started, closed, or the last load failed).
    Idle,
    Loading,
    AwaitingAnswer,
    Submitting,
    FeedbackShown,
}

impl QuizStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Loading => "loading",
            Self::AwaitingAnswer => "awaiting an answer",
            Self::Submitting => "submitting",
            Self::FeedbackShown => "showing feedback",
        }
    }

    /// A request to the backend is in flight.
    #[must_use]
    pub fn is_busy(self) -> bool {
        matches!(self, Self::Loading | Self::Submitting)
    }
}

impl fmt::Display for QuizStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Operation names used in transition errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuizAction {
    Load,
    Select,
    Submit,
}

impl fmt::Display for QuizAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Load => "load a question",
            Self::Select => "select an answer",
            Self::Submit => "submit",
        })
    }
}

/// Point-in-time copy of a session, for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizSnapshot {
    pub status: QuizStatus,
    pub question: Option<Question>,
    pub selection: Option<usize>,
    pub feedback: Option<Feedback>,
    pub knowledge: KnowledgeVector,
    pub last_error: Option<SessionFault>,
}

impl QuizSnapshot {
    #[must_use]
    pub fn can_select(&self) -> bool {
        self.status == QuizStatus::AwaitingAnswer
    }

    #[must_use]
    pub fn can_submit(&self) -> bool {
        self.status == QuizStatus::AwaitingAnswer && self.selection.is_some()
    }

    #[must_use]
    pub fn can_load(&self) -> bool {
        !self.status.is_busy()
    }
}

/// Mutable state behind the session handle.
#[derive(Debug)]
pub(crate) struct SessionState {
    pub(crate) status: QuizStatus,
    /// Bumped by `close`; responses tagged with an older value are dropped.
    pub(crate) generation: u64,
    pub(crate) question: Option<Question>,
    pub(crate) selection: Option<usize>,
    pub(crate) feedback: Option<Feedback>,
    pub(crate) knowledge: KnowledgeVector,
    pub(crate) last_error: Option<SessionFault>,
}

impl SessionState {
    pub(crate) fn new() -> Self {
        Self {
            status: QuizStatus::Idle,
            generation: 0,
            question: None,
            selection: None,
            feedback: None,
            knowledge: KnowledgeVector::empty(),
            last_error: None,
        }
    }

    pub(crate) fn snapshot(&self) -> QuizSnapshot {
        QuizSnapshot {
            status: self.status,
            question: self.question.clone(),
            selection: self.selection,
            feedback: self.feedback.clone(),
            knowledge: self.knowledge.clone(),
            last_error: self.last_error.clone(),
        }
    }

    pub(crate) fn clear_round(&mut self) {
        self.question = None;
        self.selection = None;
        self.feedback = None;
    }
}
