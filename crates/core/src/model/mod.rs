mod activity;
mod ids;
mod knowledge;
mod question;

pub use ids::{QuestionId, TopicId};

pub use activity::{ACTIVITY_LOG_CAPACITY, ActivityLog, ActivityRecord, recent_first};
pub use knowledge::KnowledgeVector;
pub use question::{Feedback, MIN_OPTIONS, Question, QuestionError};
