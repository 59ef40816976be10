use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Identifier assigned to a task by the store.
pub type TaskId = u64;

/// A partial task as sent by a client: any JSON object.
///
/// Used as the body of create and update requests. Fields it carries
/// replace the same fields on the stored task; everything else is kept.
pub type TaskPatch = Map<String, Value>;

/// Represents a single to-do item.
///
/// Only the id is typed. Every other field, `description` and `category`
/// included, is kept as the JSON value it arrived with and written back
/// unchanged: absent stays absent, `null` stays `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier, assigned by the store on create
    pub id: TaskId,
    /// All other fields, verbatim
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Task {
    /// Creates a task with the given id, description and category.
    pub fn new(id: TaskId, description: impl Into<String>, category: impl Into<String>) -> Self {
        let mut fields = Map::new();
        fields.insert("description".to_string(), Value::String(description.into()));
        fields.insert("category".to_string(), Value::String(category.into()));
        Self { id, fields }
    }

    /// Builds a task from a client patch, forcing the given id.
    ///
    /// Any `id` in the patch is dropped.
    pub fn from_patch(id: TaskId, mut patch: TaskPatch) -> Self {
        patch.remove("id");
        Self { id, fields: patch }
    }

    /// Shallow-merges `patch` over this task.
    ///
    /// Fields present in the patch replace the current ones; the rest are
    /// kept. The id never changes, whatever the patch says.
    pub fn merged(&self, patch: TaskPatch) -> Self {
        let mut fields = self.fields.clone();
        fields.extend(patch.into_iter().filter(|(key, _)| key != "id"));
        Self {
            id: self.id,
            fields,
        }
    }

    /// Raw value of a field, if present.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Description as text (empty when absent or null).
    pub fn description(&self) -> Cow<'_, str> {
        self.text("description").unwrap_or_default()
    }

    /// The category, with empty strings treated as absent.
    pub fn category(&self) -> Option<Cow<'_, str>> {
        self.text("category").filter(|c| !c.is_empty())
    }

    /// Category as shown in listings (empty when unset).
    pub fn category_label(&self) -> Cow<'_, str> {
        self.text("category").unwrap_or_default()
    }

    /// Strings as-is, other non-null values as their JSON text.
    fn text(&self, key: &str) -> Option<Cow<'_, str>> {
        match self.fields.get(key)? {
            Value::Null => None,
            Value::String(s) => Some(Cow::Borrowed(s.as_str())),
            other => Some(Cow::Owned(other.to_string())),
        }
    }
}

/// Computes the id for a newly created task.
///
/// One more than the largest id in the collection, or 1 when it is empty.
pub fn next_id(tasks: &[Task]) -> TaskId {
    tasks.iter().map(|t| t.id).max().map_or(1, |max| max + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn patch(value: Value) -> TaskPatch {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_next_id_empty() {
        assert_eq!(next_id(&[]), 1);
    }

    #[test]
    fn test_next_id_uses_max_not_len() {
        let tasks = vec![Task::new(7, "a", ""), Task::new(3, "b", "")];
        assert_eq!(next_id(&tasks), 8);
    }

    #[test]
    fn test_from_patch_overrides_id() {
        let task = Task::from_patch(4, patch(json!({"id": 99, "description": "Test"})));
        assert_eq!(task.id, 4);
        assert_eq!(task.description(), "Test");
        assert_eq!(task.get("category"), None);
        assert_eq!(serde_json::to_value(&task).unwrap(), json!({"id": 4, "description": "Test"}));
    }

    #[test]
    fn test_unknown_fields_round_trip() {
        let raw = json!({"id": 1, "description": "x", "category": "c", "priority": 2});
        let task: Task = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(task.get("priority"), Some(&json!(2)));
        assert_eq!(serde_json::to_value(&task).unwrap(), raw);
    }

    #[test]
    fn test_missing_and_null_fields_round_trip() {
        let raw = json!({"id": 1, "category": null, "note": "x"});
        let task: Task = serde_json::from_value(raw.clone()).unwrap();

        assert_eq!(task.description(), "");
        assert_eq!(task.category(), None);
        assert_eq!(serde_json::to_value(&task).unwrap(), raw);
    }

    #[test]
    fn test_any_value_type_is_accepted() {
        let raw = json!({"id": 3, "description": null, "category": 5});
        let task: Task = serde_json::from_value(raw.clone()).unwrap();

        assert_eq!(task.description(), "");
        assert_eq!(task.category().as_deref(), Some("5"));
        assert_eq!(serde_json::to_value(&task).unwrap(), raw);
    }

    #[test]
    fn test_merge_keeps_absent_fields() {
        let task = Task::new(2, "Write report", "work");
        let merged = task.merged(patch(json!({"category": "home", "id": 50})));
        assert_eq!(merged.id, 2);
        assert_eq!(merged.description(), "Write report");
        assert_eq!(merged.category().as_deref(), Some("home"));
    }

    #[test]
    fn test_merge_stores_explicit_null() {
        let task = Task::new(1, "a", "b");
        let merged = task.merged(patch(json!({"category": null})));
        assert_eq!(merged.get("category"), Some(&Value::Null));
        assert_eq!(merged.category(), None);
    }

    #[test]
    fn test_empty_category_is_absent() {
        let empty = Task::new(2, "y", "");
        assert_eq!(empty.category(), None);
        assert_eq!(empty.category_label(), "");
    }
}
