use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::storage::{Filter, Record};

/// Name of the backing table.
pub const TASKS_TABLE: &str = "tasks";

/// Fields the free-text `search` term is applied to.
const SEARCHED_FIELDS: [&str; 5] = [
    "title",
    "description",
    "completed_at",
    "created_at",
    "updated_at",
];

/// A task as stored and served.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Build a fresh task: server-generated id, `completed_at` unset,
    /// `created_at == updated_at`.
    pub fn new(title: String, description: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title,
            description,
            completed_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Convert into a storage record. Timestamps are rendered as RFC 3339
    /// strings so the on-disk document stays plain JSON.
    pub fn into_record(self) -> Record {
        let mut record = Record::new();
        record.insert("id".to_string(), Value::String(self.id.to_string()));
        record.insert("title".to_string(), Value::String(self.title));
        record.insert("description".to_string(), Value::String(self.description));
        record.insert(
            "completed_at".to_string(),
            match self.completed_at {
                Some(at) => Value::String(rfc3339(at)),
                None => Value::Null,
            },
        );
        record.insert("created_at".to_string(), Value::String(rfc3339(self.created_at)));
        record.insert("updated_at".to_string(), Value::String(rfc3339(self.updated_at)));
        record
    }
}

/// Body of `POST /tasks`.
#[derive(Debug, Default, Deserialize)]
pub struct CreateTask {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl CreateTask {
    /// Both fields must be present and non-empty.
    pub fn into_fields(self) -> Option<(String, String)> {
        match (self.title, self.description) {
            (Some(title), Some(description)) if !title.is_empty() && !description.is_empty() => {
                Some((title, description))
            }
            _ => None,
        }
    }
}

/// Body of `PUT /tasks/:id`. Absent fields keep their stored value.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateTask {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl UpdateTask {
    /// Build the storage patch: the provided non-empty fields plus a fresh
    /// `updated_at`. Empty strings are treated as absent so a stored task
    /// never ends up with an empty title or description.
    pub fn into_patch(self) -> Record {
        let mut patch = Record::new();
        if let Some(title) = self.title.filter(|t| !t.is_empty()) {
            patch.insert("title".to_string(), Value::String(title));
        }
        if let Some(description) = self.description.filter(|d| !d.is_empty()) {
            patch.insert("description".to_string(), Value::String(description));
        }
        patch.insert("updated_at".to_string(), Value::String(rfc3339(Utc::now())));
        patch
    }
}

/// Build the select filter for a free-text search term: the same term
/// applied to every searched field, matched as a union.
pub fn search_filter(term: &str) -> Filter {
    SEARCHED_FIELDS
        .iter()
        .map(|field| (field.to_string(), term.to_string()))
        .collect()
}

fn rfc3339(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_task_invariants() {
        let task = Task::new("title".to_string(), "description".to_string());
        assert!(task.completed_at.is_none());
        assert_eq!(task.created_at, task.updated_at);
    }

    #[test]
    fn test_task_record_shape() {
        let task = Task::new("a".to_string(), "b".to_string());
        let id = task.id.to_string();
        let record = task.into_record();

        assert_eq!(record["id"], Value::String(id));
        assert_eq!(record["title"], Value::String("a".to_string()));
        assert_eq!(record["completed_at"], Value::Null);
        assert_eq!(record["created_at"], record["updated_at"]);
    }

    #[test]
    fn test_create_requires_both_fields_non_empty() {
        let full = CreateTask {
            title: Some("a".to_string()),
            description: Some("b".to_string()),
        };
        assert!(full.into_fields().is_some());

        let missing = CreateTask {
            title: Some("a".to_string()),
            description: None,
        };
        assert!(missing.into_fields().is_none());

        let empty = CreateTask {
            title: Some(String::new()),
            description: Some("b".to_string()),
        };
        assert!(empty.into_fields().is_none());
    }

    #[test]
    fn test_update_patch_always_refreshes_updated_at() {
        let patch = UpdateTask::default().into_patch();
        assert_eq!(patch.len(), 1);
        assert!(patch.contains_key("updated_at"));

        let patch = UpdateTask {
            title: Some("new".to_string()),
            description: None,
        }
        .into_patch();
        assert!(patch.contains_key("title"));
        assert!(!patch.contains_key("description"));
    }

    #[test]
    fn test_search_filter_covers_all_fields() {
        let filter = search_filter("foo");
        assert_eq!(filter.len(), SEARCHED_FIELDS.len());
        assert!(SEARCHED_FIELDS
            .iter()
            .all(|field| filter.get(*field).map(String::as_str) == Some("foo")));
    }
}
