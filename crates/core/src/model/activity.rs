use serde::{Deserialize, Serialize};

use crate::model::question::{Feedback, Question};

/// Number of records the activity history keeps.
pub const ACTIVITY_LOG_CAPACITY: usize = 20;

//
// ─── ACTIVITY RECORD ──────────────────────────────────────────────────────────
//

/// One answered question, as remembered by the client.
///
/// Serialized field names follow the browser history format
/// (`question`, `userAnswer`, `userAnswerText`, `correct`, `time`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityRecord {
    #[serde(rename = "question")]
    pub question_text: String,
    #[serde(rename = "userAnswer")]
    pub answer_index: usize,
    #[serde(rename = "userAnswerText")]
    pub answer_text: String,
    pub correct: bool,
    #[serde(rename = "time")]
    pub timestamp: String,
}

impl ActivityRecord {
    #[must_use]
    pub fn new(
        question_text: impl Into<String>,
        answer_index: usize,
        answer_text: impl Into<String>,
        correct: bool,
        timestamp: impl Into<String>,
    ) -> Self {
        Self {
            question_text: question_text.into(),
            answer_index,
            answer_text: answer_text.into(),
            correct,
            timestamp: timestamp.into(),
        }
    }

    /// Builds the record for an answered question.
    ///
    /// Returns `None` when `answer_index` does not address one of the
    /// question's options.
    #[must_use]
    pub fn from_answer(
        question: &Question,
        answer_index: usize,
        feedback: &Feedback,
        timestamp: impl Into<String>,
    ) -> Option<Self> {
        let answer_text = question.option(answer_index)?;
        Some(Self::new(
            question.prompt(),
            answer_index,
            answer_text,
            feedback.correct,
            timestamp,
        ))
    }
}

//
// ─── ACTIVITY LOG ─────────────────────────────────────────────────────────────
//

/// Chronological, capacity-bounded answer history.
///
/// Oldest entries are evicted first once more than
/// [`ACTIVITY_LOG_CAPACITY`] records have been pushed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActivityLog {
    records: Vec<ActivityRecord>,
}

impl ActivityLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rehydrates a log, keeping only the newest records if the input is over capacity.
    #[must_use]
    pub fn from_records(mut records: Vec<ActivityRecord>) -> Self {
        if records.len() > ACTIVITY_LOG_CAPACITY {
            let overflow = records.len() - ACTIVITY_LOG_CAPACITY;
            records.drain(..overflow);
        }
        Self { records }
    }

    /// Appends a record and returns how many old records were evicted.
    pub fn push(&mut self, record: ActivityRecord) -> usize {
        self.records.push(record);
        let overflow = self.records.len().saturating_sub(ACTIVITY_LOG_CAPACITY);
        if overflow > 0 {
            self.records.drain(..overflow);
        }
        overflow
    }

    #[must_use]
    pub fn records(&self) -> &[ActivityRecord] {
        &self.records
    }

    #[must_use]
    pub fn into_records(self) -> Vec<ActivityRecord> {
        self.records
    }

    /// The last `n` records, most recent first.
    #[must_use]
    pub fn recent(&self, n: usize) -> Vec<ActivityRecord> {
        recent_first(&self.records, n)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// The last `n` entries of a chronological slice, newest first.
#[must_use]
pub fn recent_first(records: &[ActivityRecord], n: usize) -> Vec<ActivityRecord> {
    records.iter().rev().take(n).cloned().collect()
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{QuestionId, TopicId};

    fn record(n: usize) -> ActivityRecord {
        ActivityRecord::new(format!("Q{n}"), 0, "A", n % 2 == 0, "1/1/2024, 9:00:00 AM")
    }

    #[test]
    fn push_evicts_oldest_beyond_capacity() {
        let mut log = ActivityLog::new();
        for n in 0..ACTIVITY_LOG_CAPACITY {
            assert_eq!(log.push(record(n)), 0);
        }
        assert_eq!(log.len(), ACTIVITY_LOG_CAPACITY);

        let evicted = log.push(record(99));
        assert_eq!(evicted, 1);
        assert_eq!(log.len(), ACTIVITY_LOG_CAPACITY);
        assert_eq!(log.records()[0].question_text, "Q1");
        assert_eq!(log.records().last().unwrap().question_text, "Q99");
    }

    #[test]
    fn from_records_keeps_newest() {
        let records: Vec<_> = (0..25).map(record).collect();
        let log = ActivityLog::from_records(records);
        assert_eq!(log.len(), ACTIVITY_LOG_CAPACITY);
        assert_eq!(log.records()[0].question_text, "Q5");
    }

    #[test]
    fn recent_is_reverse_chronological_and_non_mutating() {
        let mut log = ActivityLog::new();
        for n in 0..10 {
            log.push(record(n));
        }
        let recent = log.recent(3);
        let names: Vec<_> = recent.iter().map(|r| r.question_text.as_str()).collect();
        assert_eq!(names, vec!["Q9", "Q8", "Q7"]);
        assert_eq!(log.len(), 10);
        assert_eq!(log.recent(50).len(), 10);
    }

    #[test]
    fn record_from_answer_uses_option_text() {
        let question = Question::new(
            QuestionId::new(0),
            TopicId::new(2),
            "Q1",
            vec!["A".into(), "B".into(), "C".into()],
        )
        .unwrap();
        let feedback = Feedback::new(false, "Incorrect");
        let rec = ActivityRecord::from_answer(&question, 1, &feedback, "now").unwrap();
        assert_eq!(rec.question_text, "Q1");
        assert_eq!(rec.answer_index, 1);
        assert_eq!(rec.answer_text, "B");
        assert!(!rec.correct);

        assert!(ActivityRecord::from_answer(&question, 3, &feedback, "now").is_none());
    }

    #[test]
    fn serializes_with_browser_history_keys() {
        let rec = ActivityRecord::new("Q1", 1, "B", false, "t");
        let json = serde_json::to_value(&rec).unwrap();
        assert_eq!(json["question"], "Q1");
        assert_eq!(json["userAnswer"], 1);
        assert_eq!(json["userAnswerText"], "B");
        assert_eq!(json["correct"], false);
        assert_eq!(json["time"], "t");
    }
}
