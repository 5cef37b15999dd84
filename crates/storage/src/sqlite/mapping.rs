use quiz_core::model::{ActivityLog, ActivityRecord};

use crate::repository::StorageError;

/// `client_state` key holding the serialized activity history.
pub(super) const RECENT_ACTIVITY_KEY: &str = "recent_activity";

pub(super) fn decode_activity(raw: Option<&str>) -> Result<ActivityLog, StorageError> {
    let Some(raw) = raw else {
        return Ok(ActivityLog::new());
    };
    if raw.trim().is_empty() {
        return Ok(ActivityLog::new());
    }
    let records: Vec<ActivityRecord> =
        serde_json::from_str(raw).map_err(|e| StorageError::Serialization(e.to_string()))?;
    Ok(ActivityLog::from_records(records))
}

pub(super) fn encode_activity(log: &ActivityLog) -> Result<String, StorageError> {
    serde_json::to_string(log).map_err(|e| StorageError::Serialization(e.to_string()))
}
