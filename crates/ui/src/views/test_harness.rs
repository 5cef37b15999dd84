use std::sync::Arc;

use async_trait::async_trait;
use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use quiz_core::model::{Feedback, KnowledgeVector, Question, QuestionId, TopicId};
use quiz_core::time::fixed_clock;
use services::{
    AnswerVerdict, BackendError, Clock, QuestionRound, QuizBackend, StatsSnapshot,
};
use storage::repository::{ActivityLogStore, Storage};

use crate::context::{UiApp, build_app_context};
use crate::views::{DashboardView, LandingView, QuizView};

/// Backend that answers every call with the same canned payload.
pub struct CannedBackend {
    pub stats_available: bool,
}

#[async_trait]
impl QuizBackend for CannedBackend {
    async fn fetch_question(&self) -> Result<QuestionRound, BackendError> {
        let question = Question::new(
            QuestionId::new(0),
            TopicId::new(2),
            "Q1",
            vec!["A".into(), "B".into(), "C".into()],
        )?;
        Ok(QuestionRound {
            question,
            knowledge: KnowledgeVector::new(vec![0.1, 0.2, 0.3]),
        })
    }

    async fn submit_answer(&self, _answer: usize) -> Result<AnswerVerdict, BackendError> {
        Ok(AnswerVerdict {
            feedback: Feedback::new(false, "Incorrect"),
            knowledge: KnowledgeVector::new(vec![0.1, 0.25, 0.3]),
        })
    }

    async fn fetch_stats(&self) -> Result<StatsSnapshot, BackendError> {
        if !self.stats_available {
            return Err(BackendError::Decode("stats unavailable".into()));
        }
        Ok(StatsSnapshot {
            knowledge: KnowledgeVector::new(vec![0.25, 0.83]),
            topics: Vec::new(),
        })
    }
}

struct TestApp {
    backend: Arc<dyn QuizBackend>,
    activity: Arc<dyn ActivityLogStore>,
}

impl UiApp for TestApp {
    fn clock(&self) -> Clock {
        fixed_clock()
    }

    fn backend(&self) -> Arc<dyn QuizBackend> {
        Arc::clone(&self.backend)
    }

    fn activity_log(&self) -> Arc<dyn ActivityLogStore> {
        Arc::clone(&self.activity)
    }

    fn backend_label(&self) -> String {
        "test backend".to_string()
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Landing,
    Dashboard,
    Quiz,
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.view);
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    match use_context::<ViewKind>() {
        ViewKind::Landing => rsx! { LandingView {} },
        ViewKind::Dashboard => rsx! { DashboardView {} },
        ViewKind::Quiz => rsx! { QuizView {} },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub storage: Storage,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        self.dom.process_events();
        self.dom.render_immediate(&mut NoOpMutations);
    }

    /// Polls pending tasks a few times so resources and spawned loads settle.
    pub async fn settle(&mut self) {
        for _ in 0..5 {
            let _ = tokio::time::timeout(
                std::time::Duration::from_millis(50),
                self.dom.wait_for_work(),
            )
            .await;
            self.dom.render_immediate(&mut NoOpMutations);
            self.dom.process_events();
        }
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn setup_view_harness(view: ViewKind, backend: CannedBackend) -> ViewHarness {
    let storage = Storage::in_memory();
    let app = Arc::new(TestApp {
        backend: Arc::new(backend),
        activity: Arc::clone(&storage.activity),
    });
    let dom = VirtualDom::new_with_props(ViewRouterHarness, ViewHarnessProps { app, view });
    ViewHarness { dom, storage }
}
