use std::sync::Arc;

use quiz_core::model::{ActivityRecord, KnowledgeVector, recent_first};
use quiz_core::stats::{
    ActivityTally, Percent, TopicMastery, accuracy, overall_mastery, per_topic_breakdown, tally,
};
use storage::repository::ActivityLogStore;

use crate::backend::{QuizBackend, StatsSnapshot};
use crate::error::DashboardError;

/// Number of activity entries shown in the dashboard feed.
pub const RECENT_ACTIVITY_WINDOW: usize = 7;

/// Everything the dashboard renders, derived from one stats fetch and one
/// read of the activity history.
///
/// Timestamps stay as stored strings; the view decides how to lay them out.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSummary {
    pub knowledge: KnowledgeVector,
    pub overall_mastery: Option<Percent>,
    pub topics: Vec<TopicMastery>,
    pub accuracy: Option<Percent>,
    pub tally: ActivityTally,
    /// Newest first, at most `RECENT_ACTIVITY_WINDOW` entries.
    pub recent: Vec<ActivityRecord>,
    /// False when the stats endpoint could not be reached.
    pub stats_available: bool,
}

impl DashboardSummary {
    #[must_use]
    pub fn build(stats: Option<&StatsSnapshot>, records: &[ActivityRecord], window: usize) -> Self {
        let (knowledge, topic_names) = stats.map_or_else(
            || (KnowledgeVector::empty(), Vec::new()),
            |s| (s.knowledge.clone(), s.topics.clone()),
        );
        Self {
            overall_mastery: overall_mastery(&knowledge),
            topics: per_topic_breakdown(&knowledge, &topic_names),
            accuracy: accuracy(records),
            tally: tally(records),
            recent: recent_first(records, window),
            stats_available: stats.is_some(),
            knowledge,
        }
    }
}

/// Read-side service behind the dashboard page.
#[derive(Clone)]
pub struct DashboardService {
    backend: Arc<dyn QuizBackend>,
    activity: Arc<dyn ActivityLogStore>,
}

impl DashboardService {
    #[must_use]
    pub fn new(backend: Arc<dyn QuizBackend>, activity: Arc<dyn ActivityLogStore>) -> Self {
        Self { backend, activity }
    }

    /// Fetch stats and read the activity history.
    ///
    /// A failing stats endpoint is logged and yields "no data" for mastery;
    /// the activity part is still returned.
    ///
    /// # Errors
    ///
    /// Returns `DashboardError::Storage` when the history cannot be read.
    pub async fn load(&self) -> Result<DashboardSummary, DashboardError> {
        let stats = match self.backend.fetch_stats().await {
            Ok(stats) => Some(stats),
            Err(err) => {
                tracing::warn!(error = %err, "failed to fetch stats");
                None
            }
        };
        let records = self.activity.read_all().await?;
        Ok(DashboardSummary::build(
            stats.as_ref(),
            &records,
            RECENT_ACTIVITY_WINDOW,
        ))
    }

    /// Wipe the local answer history.
    ///
    /// # Errors
    ///
    /// Returns `DashboardError::Storage` if the store cannot be cleared.
    pub async fn clear_activity(&self) -> Result<(), DashboardError> {
        self.activity.clear().await?;
        tracing::info!("activity history cleared");
        Ok(())
    }
}
