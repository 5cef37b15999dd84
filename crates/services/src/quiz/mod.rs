mod session;
mod state;

// Public API of the quiz subsystem.
pub use crate::error::QuizError;
pub use session::{QuizSession, SubmitOutcome};
pub use state::{QuizAction, QuizSnapshot, QuizStatus};
