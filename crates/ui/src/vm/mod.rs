mod dashboard_vm;
mod quiz_vm;

pub use dashboard_vm::{ActivityRowVm, DashboardVm, map_dashboard};
pub use quiz_vm::{FeedbackBannerVm, KnowledgeBarVm, QuizIntent, QuizOptionVm, QuizVm, map_quiz};
