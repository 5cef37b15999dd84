#![forbid(unsafe_code)]

pub mod backend;
pub mod dashboard;
pub mod error;
pub mod quiz;

pub use quiz_core::Clock;

pub use backend::{
    AnswerVerdict, BackendConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS, HttpBackend,
    QuestionRound, QuizBackend, StatsSnapshot,
};
pub use dashboard::{DashboardService, DashboardSummary, RECENT_ACTIVITY_WINDOW};
pub use error::{BackendError, DashboardError, FaultKind, QuizError, SessionFault};
pub use quiz::{QuizAction, QuizSession, QuizSnapshot, QuizStatus, SubmitOutcome};
