use quiz_core::model::ActivityRecord;
use quiz_core::stats::format_percent;
use services::DashboardSummary;

use super::quiz_vm::KnowledgeBarVm;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActivityRowVm {
    pub question: String,
    pub answer: String,
    pub verdict: &'static str,
    pub verdict_class: &'static str,
    pub time: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DashboardVm {
    pub mastery_label: String,
    pub mastery_caption: &'static str,
    pub topic_rows: Vec<KnowledgeBarVm>,
    pub activity_rows: Vec<ActivityRowVm>,
    pub total_answered: usize,
    pub accuracy_label: String,
}

impl DashboardVm {
    #[must_use]
    pub fn has_activity(&self) -> bool {
        !self.activity_rows.is_empty()
    }
}

#[must_use]
pub fn map_dashboard(summary: &DashboardSummary) -> DashboardVm {
    let mastery_caption = if summary.overall_mastery.is_some() {
        "Updated after every answer"
    } else {
        "(No data yet)"
    };

    DashboardVm {
        mastery_label: format_percent(summary.overall_mastery),
        mastery_caption,
        topic_rows: summary
            .topics
            .iter()
            .map(|topic| KnowledgeBarVm {
                label: topic.name.clone(),
                percent: topic.mastery,
            })
            .collect(),
        activity_rows: summary.recent.iter().map(map_activity_row).collect(),
        total_answered: summary.tally.total,
        accuracy_label: format_percent(summary.accuracy),
    }
}

fn map_activity_row(record: &ActivityRecord) -> ActivityRowVm {
    let (verdict, verdict_class) = if record.correct {
        ("Correct", "feedback--correct")
    } else {
        ("Incorrect", "feedback--incorrect")
    };
    ActivityRowVm {
        question: format!("Q: {}", record.question_text),
        answer: format!("Your answer: {}", record.answer_text),
        verdict,
        verdict_class,
        time: record.timestamp.clone(),
    }
}
