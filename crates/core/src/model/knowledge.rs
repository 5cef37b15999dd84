use serde::{Deserialize, Serialize};

use crate::model::ids::TopicId;

/// Per-topic mastery scores as estimated by the backend.
///
/// Index `i` holds the score for topic `i`. Scores are normalised into
/// `[0, 1]` on construction; the client never derives or merges them, every
/// backend response replaces the whole vector.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<f64>", into = "Vec<f64>")]
pub struct KnowledgeVector(Vec<f64>);

impl KnowledgeVector {
    #[must_use]
    pub fn new(values: Vec<f64>) -> Self {
        Self(values.into_iter().map(normalize).collect())
    }

    #[must_use]
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    /// Overwrites the held scores with `other`.
    pub fn replace(&mut self, other: KnowledgeVector) {
        *self = other;
    }

    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.0
    }

    #[must_use]
    pub fn get(&self, topic: TopicId) -> Option<f64> {
        self.0.get(topic.index()).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (TopicId, f64)> + '_ {
        self.0
            .iter()
            .enumerate()
            .map(|(idx, score)| (TopicId::new(u32::try_from(idx).unwrap_or(u32::MAX)), *score))
    }
}

fn normalize(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

impl From<Vec<f64>> for KnowledgeVector {
    fn from(values: Vec<f64>) -> Self {
        Self::new(values)
    }
}

impl From<KnowledgeVector> for Vec<f64> {
    fn from(value: KnowledgeVector) -> Self {
        value.0
    }
}
