use std::sync::Arc;

use services::{Clock, DashboardService, QuizBackend, QuizSession};
use storage::repository::ActivityLogStore;

pub trait UiApp: Send + Sync {
    fn clock(&self) -> Clock;
    fn backend(&self) -> Arc<dyn QuizBackend>;
    fn activity_log(&self) -> Arc<dyn ActivityLogStore>;

    /// Human-readable backend location, shown on the landing page.
    fn backend_label(&self) -> String;
}

#[derive(Clone)]
pub struct AppContext {
    clock: Clock,
    backend: Arc<dyn QuizBackend>,
    activity: Arc<dyn ActivityLogStore>,
    dashboard: Arc<DashboardService>,
    backend_label: String,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        let backend = app.backend();
        let activity = app.activity_log();
        let dashboard = Arc::new(DashboardService::new(
            Arc::clone(&backend),
            Arc::clone(&activity),
        ));

        Self {
            clock: app.clock(),
            backend,
            activity,
            dashboard,
            backend_label: app.backend_label(),
        }
    }

    /// A fresh, idle session sharing this context's backend and history.
    #[must_use]
    pub fn new_quiz_session(&self) -> QuizSession {
        QuizSession::new(
            self.clock,
            Arc::clone(&self.backend),
            Arc::clone(&self.activity),
        )
    }

    #[must_use]
    pub fn dashboard(&self) -> Arc<DashboardService> {
        Arc::clone(&self.dashboard)
    }

    #[must_use]
    pub fn backend_label(&self) -> &str {
        &self.backend_label
    }
}

// This context is provided by the application composition root (`crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
