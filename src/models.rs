//! Frontend Models
//!
//! Task record as exchanged with the remote store, plus display helpers.

use std::fmt;

use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};

/// Opaque task identifier assigned by the remote store.
///
/// Stores hand out either numbers or strings; both are kept as text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for TaskId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Number(i64),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(s) => TaskId::new(s),
            RawId::Number(n) => TaskId::new(n.to_string()),
        })
    }
}

/// Task data structure (matches remote store)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    #[serde(default)]
    pub id: Option<TaskId>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub done: bool,
    #[serde(default, alias = "createdDate", deserialize_with = "lenient_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub completed_date: Option<DateTime<Utc>>,
    /// Render key, assigned per fetch. Never sent to the store.
    #[serde(skip)]
    pub unique_key: String,
}

impl Task {
    /// Apply the supplied fields of a patch, leaving the rest untouched
    pub fn apply(&mut self, patch: &TaskPatch) {
        if let Some(title) = &patch.title {
            self.title = title.clone();
        }
        if let Some(description) = &patch.description {
            self.description = description.clone();
        }
        if let Some(done) = patch.done {
            self.done = done;
        }
        if let Some(completed_date) = patch.completed_date {
            self.completed_date = completed_date;
        }
    }

    /// Line shown under the description: creation or completion time
    pub fn timestamp_label(&self) -> String {
        if self.done {
            match &self.completed_date {
                Some(at) => format!("Completed: {}", format_timestamp(at)),
                None => "Completed: No completion date".to_string(),
            }
        } else {
            match &self.created_at {
                Some(at) => format!("Created: {}", format_timestamp(at)),
                None => "Created: No date available".to_string(),
            }
        }
    }
}

/// Timestamp that never fails a record: RFC 3339, a zoneless
/// `YYYY-MM-DDTHH:MM:SS` (read as UTC) or epoch millis. Anything else,
/// `null` included, becomes `None`.
fn lenient_timestamp<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawTimestamp {
        Text(String),
        Millis(i64),
        Other(IgnoredAny),
    }

    Ok(match RawTimestamp::deserialize(deserializer)? {
        RawTimestamp::Text(s) => parse_timestamp(&s),
        RawTimestamp::Millis(ms) => Utc.timestamp_millis_opt(ms).single(),
        RawTimestamp::Other(_) => None,
    })
}

fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    DateTime::parse_from_rfc3339(s)
        .map(|at| at.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|naive| naive.and_utc())
        })
}

/// Body of a create request
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub done: bool,
    pub created_at: DateTime<Utc>,
}

impl NewTask {
    pub fn new(title: impl Into<String>, description: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            done: false,
            created_at: now,
        }
    }
}

/// Partial update. Only `Some` fields are serialized.
///
/// `completed_date: Some(None)` goes out as an explicit `null` so the
/// store clears the completion time.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub done: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_date: Option<Option<DateTime<Utc>>>,
}

impl TaskPatch {
    /// Status change; stamps the completion time when moving to done
    pub fn status(done: bool, now: DateTime<Utc>) -> Self {
        Self {
            done: Some(done),
            completed_date: Some(done.then_some(now)),
            ..Default::default()
        }
    }

    /// Title/description replacement from an edit session
    pub fn fields(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            description: Some(description.into()),
            ..Default::default()
        }
    }
}

/// Fallback render key for a task without a remote id
pub fn fallback_key(index: usize, now_millis: i64) -> String {
    format!("todo-{}-{}", index, now_millis)
}

/// Format as `year/month/day hour:minute` in the browser's local zone
pub fn format_timestamp(at: &DateTime<Utc>) -> String {
    format_timestamp_in(at, &Local)
}

pub fn format_timestamp_in<Tz: TimeZone>(at: &DateTime<Utc>, tz: &Tz) -> String
where
    Tz::Offset: fmt::Display,
{
    at.with_timezone(tz).format("%Y/%m/%d %H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn at(s: &str) -> DateTime<Utc> {
        s.parse().unwrap()
    }

    #[test]
    fn test_task_deserializes_numeric_id_and_created_alias() {
        let json = r#"{"id":7,"title":"Buy milk","description":"2%","done":false,"createdDate":"2024-05-01T08:30:00Z"}"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.id, Some(TaskId::new("7")));
        assert_eq!(task.created_at, Some(at("2024-05-01T08:30:00Z")));
        assert_eq!(task.completed_date, None);
        assert!(task.unique_key.is_empty());
    }

    #[test]
    fn test_task_tolerates_missing_optional_fields() {
        let task: Task = serde_json::from_str(r#"{"title":"a","description":"b"}"#).unwrap();
        assert_eq!(task.id, None);
        assert!(!task.done);
    }

    #[test]
    fn test_incomplete_record_still_decodes() {
        let json = r#"[
            {"id":1,"title":"Buy milk","description":"2%","createdAt":"2024-05-01T08:30:00Z"},
            {"id":2,"title":"no desc","done":false,"createdAt":"last tuesday"},
            {"id":3,"description":"no title","done":true,"completedDate":1714552200000},
            {"id":4,"title":"naive","description":"d","createdAt":"2024-05-01T08:30:00.250","completedDate":null}
        ]"#;
        let tasks: Vec<Task> = serde_json::from_str(json).unwrap();
        assert_eq!(tasks.len(), 4);

        assert_eq!(tasks[1].description, "");
        assert_eq!(tasks[1].created_at, None);
        assert_eq!(tasks[1].timestamp_label(), "Created: No date available");

        assert_eq!(tasks[2].title, "");
        assert_eq!(tasks[2].completed_date, Some(at("2024-05-01T08:30:00Z")));

        assert_eq!(tasks[3].created_at, Some(at("2024-05-01T08:30:00.250Z")));
        assert_eq!(tasks[3].completed_date, None);
    }

    #[test]
    fn test_unique_key_is_never_serialized() {
        let mut task: Task = serde_json::from_str(r#"{"id":"x1","title":"a","description":"b"}"#).unwrap();
        task.unique_key = "x1".to_string();
        let value = serde_json::to_value(&task).unwrap();
        assert!(value.get("uniqueKey").is_none());
        assert_eq!(value["id"], "x1");
    }

    #[test]
    fn test_status_patch_serializes_explicit_null() {
        let patch = TaskPatch::status(false, at("2024-05-01T08:30:00Z"));
        let value = serde_json::to_value(&patch).unwrap();
        assert_eq!(value, serde_json::json!({"done": false, "completedDate": null}));

        let patch = TaskPatch::fields("t", "d");
        let value = serde_json::to_value(&patch).unwrap();
        assert_eq!(value, serde_json::json!({"title": "t", "description": "d"}));
    }

    #[test]
    fn test_apply_patch() {
        let mut task: Task = serde_json::from_str(r#"{"id":1,"title":"Buy milk","description":"2%"}"#).unwrap();
        let now = at("2024-05-02T10:00:00Z");

        task.apply(&TaskPatch::status(true, now));
        assert!(task.done);
        assert_eq!(task.completed_date, Some(now));

        task.apply(&TaskPatch { title: Some("Buy milk and bread".into()), ..Default::default() });
        assert_eq!(task.title, "Buy milk and bread");
        assert_eq!(task.description, "2%");
        assert!(task.done);
    }

    #[test]
    fn test_format_timestamp_in_offset() {
        let tz = FixedOffset::east_opt(2 * 3600).unwrap();
        assert_eq!(format_timestamp_in(&at("2024-12-31T23:05:00Z"), &tz), "2025/01/01 01:05");
    }

    #[test]
    fn test_timestamp_label_fallbacks() {
        let mut task: Task = serde_json::from_str(r#"{"title":"a","description":"b"}"#).unwrap();
        assert_eq!(task.timestamp_label(), "Created: No date available");
        task.done = true;
        assert_eq!(task.timestamp_label(), "Completed: No completion date");
    }

    #[test]
    fn test_fallback_key() {
        assert_eq!(fallback_key(3, 1700000000000), "todo-3-1700000000000");
    }
}
