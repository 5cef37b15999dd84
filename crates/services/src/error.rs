//! Shared error types for the services crate.

use std::fmt;

use thiserror::Error;

use quiz_core::model::QuestionError;
use storage::repository::StorageError;

use crate::quiz::{QuizAction, QuizStatus};

/// Errors emitted by the backend client.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BackendError {
    #[error("backend request failed: {0}")]
    Network(#[from] reqwest::Error),
    #[error("backend request failed with status {0}")]
    Status(reqwest::StatusCode),
    #[error("backend response could not be decoded: {0}")]
    Decode(String),
    #[error("backend response is invalid: {0}")]
    InvalidPayload(#[from] QuestionError),
}

/// Errors emitted by `QuizSession`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizError {
    #[error("cannot {action} while {from}")]
    InvalidTransition { from: QuizStatus, action: QuizAction },
    #[error("no answer selected")]
    NoSelection,
    #[error("answer {index} is out of range for {len} options")]
    AnswerOutOfRange { index: usize, len: usize },
    #[error("response arrived after the session was closed")]
    Stale,
    #[error(transparent)]
    Backend(#[from] BackendError),
}

impl QuizError {
    /// True for errors caused by calling an operation in the wrong state.
    #[must_use]
    pub fn is_invalid_state(&self) -> bool {
        matches!(
            self,
            Self::InvalidTransition { .. } | Self::NoSelection | Self::AnswerOutOfRange { .. }
        )
    }
}

/// Errors emitted by `DashboardService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DashboardError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Coarse classification of a failure kept on the session for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultKind {
    Network,
    Server,
    InvalidResponse,
    Storage,
}

/// Last recoverable failure seen by a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionFault {
    pub kind: FaultKind,
    pub message: String,
}

impl From<&BackendError> for SessionFault {
    fn from(err: &BackendError) -> Self {
        let kind = match err {
            BackendError::Network(_) => FaultKind::Network,
            BackendError::Status(_) => FaultKind::Server,
            BackendError::Decode(_) | BackendError::InvalidPayload(_) => FaultKind::InvalidResponse,
        };
        Self {
            kind,
            message: err.to_string(),
        }
    }
}

impl From<&StorageError> for SessionFault {
    fn from(err: &StorageError) -> Self {
        Self {
            kind: FaultKind::Storage,
            message: err.to_string(),
        }
    }
}

impl fmt::Display for SessionFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}
