use quiz_core::model::KnowledgeVector;
use quiz_core::stats::{Percent, default_topic_name};
use services::{FaultKind, QuizSnapshot, QuizStatus, SessionFault};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuizIntent {
    Load,
    Select(usize),
    Submit,
    Next,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizOptionVm {
    pub index: usize,
    pub label: String,
    pub selected: bool,
    pub disabled: bool,
}

impl QuizOptionVm {
    #[must_use]
    pub fn class(&self) -> &'static str {
        if self.selected {
            "option option--selected"
        } else {
            "option"
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeedbackBannerVm {
    pub correct: bool,
    pub message: String,
}

impl FeedbackBannerVm {
    #[must_use]
    pub fn class(&self) -> &'static str {
        if self.correct {
            "feedback feedback--correct"
        } else {
            "feedback feedback--incorrect"
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KnowledgeBarVm {
    pub label: String,
    pub percent: Percent,
}

impl KnowledgeBarVm {
    #[must_use]
    pub fn width_style(&self) -> String {
        format!("width: {}%;", self.percent.value())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizVm {
    pub loading: bool,
    pub header: Option<String>,
    pub topic_badge: Option<String>,
    pub prompt: Option<String>,
    pub options: Vec<QuizOptionVm>,
    /// Hidden once feedback is showing; "Next Question" takes its place.
    pub show_submit: bool,
    pub submit_label: &'static str,
    pub submit_disabled: bool,
    pub feedback: Option<FeedbackBannerVm>,
    pub knowledge_bars: Vec<KnowledgeBarVm>,
    pub error: Option<String>,
    /// What the retry button re-issues, if anything.
    pub retry: Option<QuizIntent>,
}

#[must_use]
pub fn map_quiz(snapshot: &QuizSnapshot) -> QuizVm {
    let can_select = snapshot.can_select();
    let options = snapshot
        .question
        .as_ref()
        .map(|question| {
            question
                .options()
                .iter()
                .enumerate()
                .map(|(index, label)| QuizOptionVm {
                    index,
                    label: label.clone(),
                    selected: snapshot.selection == Some(index),
                    disabled: !can_select,
                })
                .collect()
        })
        .unwrap_or_default();

    let submit_label = if snapshot.status == QuizStatus::Submitting {
        "Submitting..."
    } else {
        "Submit"
    };

    // A fresh session is idle until its first load is claimed.
    let loading = match snapshot.status {
        QuizStatus::Loading => true,
        QuizStatus::Idle => snapshot.question.is_none() && snapshot.last_error.is_none(),
        _ => false,
    };

    QuizVm {
        loading,
        header: snapshot
            .question
            .as_ref()
            .map(|question| format!("Question #{}", question.display_number())),
        topic_badge: snapshot
            .question
            .as_ref()
            .map(|question| format!("Topic {}", question.topic())),
        prompt: snapshot
            .question
            .as_ref()
            .map(|question| question.prompt().to_string()),
        options,
        show_submit: snapshot.feedback.is_none(),
        submit_label,
        submit_disabled: !snapshot.can_submit(),
        feedback: snapshot.feedback.as_ref().map(|feedback| FeedbackBannerVm {
            correct: feedback.correct,
            message: feedback.message.clone(),
        }),
        knowledge_bars: map_knowledge_bars(&snapshot.knowledge),
        error: snapshot.last_error.as_ref().map(fault_message),
        retry: retry_action(snapshot),
    }
}

#[must_use]
pub fn map_knowledge_bars(knowledge: &KnowledgeVector) -> Vec<KnowledgeBarVm> {
    knowledge
        .iter()
        .map(|(topic, score)| KnowledgeBarVm {
            label: default_topic_name(topic),
            percent: Percent::from_ratio(score),
        })
        .collect()
}

fn retry_action(snapshot: &QuizSnapshot) -> Option<QuizIntent> {
    let fault = snapshot.last_error.as_ref()?;
    if fault.kind == FaultKind::Storage {
        return None;
    }
    match snapshot.status {
        QuizStatus::Idle => Some(QuizIntent::Load),
        QuizStatus::AwaitingAnswer if snapshot.selection.is_some() => Some(QuizIntent::Submit),
        _ => None,
    }
}

fn fault_message(fault: &SessionFault) -> String {
    match fault.kind {
        FaultKind::Network => "Could not reach the quiz server.".to_string(),
        FaultKind::Server => "The quiz server returned an error.".to_string(),
        FaultKind::InvalidResponse => "The quiz server sent an unexpected response.".to_string(),
        FaultKind::Storage => "Your answer was graded but could not be saved to history.".to_string(),
    }
}
