//! Dashboard aggregates derived from knowledge and activity snapshots.
//!
//! Everything here is a pure function over borrowed data. "No data" is
//! expressed as `None` so callers never see a division by zero.

use std::fmt;

use crate::model::{ActivityRecord, KnowledgeVector, TopicId};

/// Whole-number percentage in `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Percent(u8);

impl Percent {
    /// Converts a ratio in `[0, 1]` to the nearest whole percent.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn from_ratio(ratio: f64) -> Self {
        let clamped = if ratio.is_nan() { 0.0 } else { ratio.clamp(0.0, 1.0) };
        Self((clamped * 100.0).round() as u8)
    }

    #[must_use]
    pub fn value(self) -> u8 {
        self.0
    }
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

/// Renders an optional percentage, using `--%` for "no data".
#[must_use]
pub fn format_percent(value: Option<Percent>) -> String {
    value.map_or_else(|| "--%".to_string(), |p| p.to_string())
}

/// Mastery of a single topic, paired with its display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicMastery {
    pub topic: TopicId,
    pub name: String,
    pub mastery: Percent,
}

/// Answer counts over an activity history.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActivityTally {
    pub total: usize,
    pub correct: usize,
}

/// Mean of all topic scores, or `None` for an empty vector.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn overall_mastery(knowledge: &KnowledgeVector) -> Option<Percent> {
    if knowledge.is_empty() {
        return None;
    }
    let sum: f64 = knowledge.values().iter().sum();
    Some(Percent::from_ratio(sum / knowledge.len() as f64))
}

#[must_use]
pub fn tally(records: &[ActivityRecord]) -> ActivityTally {
    ActivityTally {
        total: records.len(),
        correct: records.iter().filter(|r| r.correct).count(),
    }
}

/// Share of correct answers over the whole history, or `None` when empty.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn accuracy(records: &[ActivityRecord]) -> Option<Percent> {
    let ActivityTally { total, correct } = tally(records);
    if total == 0 {
        return None;
    }
    Some(Percent::from_ratio(correct as f64 / total as f64))
}

/// Pairs each topic score with a display name, falling back to `Topic {index}`.
#[must_use]
pub fn per_topic_breakdown(knowledge: &KnowledgeVector, topic_names: &[String]) -> Vec<TopicMastery> {
    knowledge
        .iter()
        .map(|(topic, score)| TopicMastery {
            topic,
            name: topic_names
                .get(topic.index())
                .filter(|name| !name.trim().is_empty())
                .cloned()
                .unwrap_or_else(|| default_topic_name(topic)),
            mastery: Percent::from_ratio(score),
        })
        .collect()
}

#[must_use]
pub fn default_topic_name(topic: TopicId) -> String {
    format!("Topic {topic}")
}
