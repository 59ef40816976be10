use std::fs;

use serde_json::{json, Value};
use tasklist_core::{FileStorage, ManagerError, Storage, TaskManager, TaskPatch};
use tempfile::TempDir;

fn create_test_manager() -> (TaskManager<FileStorage>, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let storage = FileStorage::new(temp_dir.path().join("tasks.json"));
    storage.init().unwrap();
    (TaskManager::new(storage), temp_dir)
}

fn patch(value: Value) -> TaskPatch {
    value.as_object().cloned().unwrap()
}

#[test]
fn test_ids_are_not_reused_after_deleting_lower_id() {
    let (mut manager, _temp) = create_test_manager();

    let first = manager
        .create_task(patch(json!({"description": "Test", "category": "x"})))
        .unwrap();
    assert_eq!(first.id, 1);

    let second = manager.create_task(patch(json!({"description": "Second"}))).unwrap();
    assert_eq!(second.id, 2);

    manager.delete_task(1).unwrap();

    let third = manager.create_task(patch(json!({"description": "Third"}))).unwrap();
    assert_eq!(third.id, 3);
}

#[test]
fn test_create_ignores_client_id() {
    let (mut manager, _temp) = create_test_manager();

    let task = manager
        .create_task(patch(json!({"id": 77, "description": "mine"})))
        .unwrap();

    assert_eq!(task.id, 1);
    assert_eq!(manager.list_tasks().unwrap()[0].id, 1);
}

#[test]
fn test_create_accepts_empty_description() {
    let (mut manager, _temp) = create_test_manager();

    let task = manager.create_task(TaskPatch::new()).unwrap();

    assert_eq!(task.description(), "");
    assert_eq!(task.get("description"), None);
    assert_eq!(manager.list_tasks().unwrap().len(), 1);
}

#[test]
fn test_ids_unique_across_interleaved_deletes() {
    let (mut manager, _temp) = create_test_manager();

    for round in 0..5 {
        manager
            .create_task(patch(json!({"description": format!("a{}", round)})))
            .unwrap();
        let b = manager
            .create_task(patch(json!({"description": format!("b{}", round)})))
            .unwrap();
        if round % 2 == 0 {
            manager.delete_task(b.id - 1).unwrap();
        }
    }

    let tasks = manager.list_tasks().unwrap();
    let mut ids: Vec<_> = tasks.iter().map(|t| t.id).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), tasks.len());
}

#[test]
fn test_update_preserves_identity() {
    let (mut manager, _temp) = create_test_manager();
    let task = manager
        .create_task(patch(json!({"description": "Write report", "category": "work"})))
        .unwrap();

    let updated = manager
        .update_task(task.id, patch(json!({"id": 500, "description": "Write summary"})))
        .unwrap();

    assert_eq!(updated.id, task.id);
    let tasks = manager.list_tasks().unwrap();
    assert!(tasks.iter().all(|t| t.id != 500));
    assert_eq!(tasks[0].description(), "Write summary");
}

#[test]
fn test_update_is_a_merge() {
    let (mut manager, _temp) = create_test_manager();
    let task = manager
        .create_task(patch(json!({"description": "Buy milk", "category": "errands", "priority": "high"})))
        .unwrap();

    let updated = manager
        .update_task(task.id, patch(json!({"category": "home"})))
        .unwrap();

    assert_eq!(updated.description(), "Buy milk");
    assert_eq!(updated.category().as_deref(), Some("home"));
    assert_eq!(updated.get("priority"), Some(&json!("high")));
}

#[test]
fn test_update_missing_task() {
    let (mut manager, _temp) = create_test_manager();

    let err = manager
        .update_task(3, patch(json!({"description": "x"})))
        .unwrap_err();

    assert!(matches!(err, ManagerError::TaskNotFound(3)));
}

#[test]
fn test_delete_removes_exactly_one() {
    let (mut manager, _temp) = create_test_manager();
    for name in ["a", "b", "c"] {
        manager.create_task(patch(json!({"description": name}))).unwrap();
    }

    let removed = manager.delete_task(2).unwrap();

    assert_eq!(removed.description(), "b");
    let tasks = manager.list_tasks().unwrap();
    assert_eq!(tasks.len(), 2);
    assert!(tasks.iter().all(|t| t.id != 2));
}

#[test]
fn test_delete_missing_task_leaves_file_untouched() {
    let (mut manager, _temp) = create_test_manager();
    manager.create_task(patch(json!({"description": "a"}))).unwrap();
    let before = fs::read_to_string(manager.storage().path()).unwrap();

    let err = manager.delete_task(999).unwrap_err();

    assert!(matches!(err, ManagerError::TaskNotFound(999)));
    assert_eq!(fs::read_to_string(manager.storage().path()).unwrap(), before);
}

#[test]
fn test_missing_file_is_fatal() {
    let temp_dir = TempDir::new().unwrap();
    let mut manager = TaskManager::new(FileStorage::new(temp_dir.path().join("gone.json")));

    assert!(matches!(manager.list_tasks(), Err(ManagerError::Storage(_))));
    assert!(matches!(
        manager.create_task(patch(json!({"description": "x"}))),
        Err(ManagerError::Storage(_))
    ));
    assert!(!temp_dir.path().join("gone.json").exists());
}

#[test]
fn test_list_reflects_each_mutation() {
    let (mut manager, _temp) = create_test_manager();

    let task = manager.create_task(patch(json!({"description": "a"}))).unwrap();
    assert_eq!(manager.list_tasks().unwrap(), vec![task.clone()]);

    let updated = manager
        .update_task(task.id, patch(json!({"description": "b"})))
        .unwrap();
    assert_eq!(manager.list_tasks().unwrap(), vec![updated]);

    manager.delete_task(task.id).unwrap();
    assert!(manager.list_tasks().unwrap().is_empty());

    // Sanity check that the storage really is the source of truth.
    assert!(manager.storage().load().unwrap().is_empty());
}

#[test]
fn test_deleting_highest_id_frees_it() {
    let (mut manager, _temp) = create_test_manager();

    manager.create_task(patch(json!({"description": "a"}))).unwrap();
    let b = manager.create_task(patch(json!({"description": "b"}))).unwrap();
    manager.delete_task(b.id).unwrap();

    let c = manager.create_task(patch(json!({"description": "c"}))).unwrap();
    assert_eq!(c.id, b.id);
}

#[test]
fn test_untouched_records_keep_their_shape() {
    let (mut manager, _temp) = create_test_manager();
    let path = manager.storage().path().to_path_buf();
    fs::write(
        &path,
        r#"[{"id": 1, "category": null, "note": "x"}, {"id": 2, "description": "a", "category": 3}]"#,
    )
    .unwrap();

    manager.create_task(patch(json!({"description": "new"}))).unwrap();

    let stored: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(stored[0], json!({"id": 1, "category": null, "note": "x"}));
    assert_eq!(stored[1], json!({"id": 2, "description": "a", "category": 3}));
    assert_eq!(stored[2], json!({"id": 3, "description": "new"}));
}

#[test]
fn test_update_stores_explicit_null() {
    let (mut manager, _temp) = create_test_manager();
    let task = manager
        .create_task(patch(json!({"description": "a", "category": "work"})))
        .unwrap();

    let updated = manager
        .update_task(task.id, patch(json!({"category": null})))
        .unwrap();

    assert_eq!(updated.get("category"), Some(&Value::Null));
    assert_eq!(manager.list_tasks().unwrap()[0].get("category"), Some(&Value::Null));
}
