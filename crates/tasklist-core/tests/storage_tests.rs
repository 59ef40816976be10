use std::fs;

use tasklist_core::{FileStorage, Storage, StorageConfig, StorageError, Task, WriteMode};
use tempfile::TempDir;

fn create_test_storage() -> (FileStorage, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let storage = FileStorage::new(temp_dir.path().join("tasks.json"));
    storage.init().unwrap();
    (storage, temp_dir)
}

#[test]
fn test_save_and_load_tasks() {
    let (storage, _temp) = create_test_storage();

    let tasks = vec![
        Task::new(1, "Buy groceries", "Personal"),
        Task::new(2, "Finish project report", "Work"),
    ];
    storage.save(&tasks).unwrap();

    assert_eq!(storage.load().unwrap(), tasks);
}

#[test]
fn test_load_preserves_file_order() {
    let (storage, _temp) = create_test_storage();

    let tasks = vec![Task::new(9, "last id first", ""), Task::new(2, "second", "")];
    storage.save(&tasks).unwrap();

    let ids: Vec<_> = storage.load().unwrap().iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![9, 2]);
}

#[test]
fn test_unicode_and_symbols_survive() {
    let (storage, _temp) = create_test_storage();

    storage
        .save(&[
            Task::new(1, "Task with café and résumé", "Unicode"),
            Task::new(2, "Task with @#$% symbols!", "Special"),
        ])
        .unwrap();

    let loaded = storage.load().unwrap();
    assert_eq!(loaded[0].description(), "Task with café and résumé");
    assert!(loaded[1].description().contains("@#$%"));
}

#[test]
fn test_truncated_file_is_parse_error() {
    let (storage, _temp) = create_test_storage();
    fs::write(storage.path(), "[{\"id\": 1, \"descr").unwrap();

    assert!(matches!(storage.load(), Err(StorageError::Parse { .. })));
}

#[test]
fn test_task_without_id_is_parse_error() {
    let (storage, _temp) = create_test_storage();
    fs::write(storage.path(), r#"[{"description": "orphan"}]"#).unwrap();

    assert!(matches!(storage.load(), Err(StorageError::Parse { .. })));
}

#[test]
fn test_write_into_missing_directory_is_write_error() {
    let temp = TempDir::new().unwrap();
    let storage = FileStorage::new(temp.path().join("absent").join("tasks.json"));

    let err = storage.save(&[]).unwrap_err();
    assert!(matches!(err, StorageError::Write { .. }));
}

#[test]
fn test_custom_config() {
    let temp_dir = TempDir::new().unwrap();
    let config = StorageConfig {
        data_file: temp_dir.path().join("my-tasks.json"),
        write_mode: WriteMode::Atomic,
        ..StorageConfig::default()
    };

    let storage = FileStorage::with_config(&config);
    storage.init().unwrap();

    assert_eq!(storage.path(), config.data_file.as_path());
    assert!(config.data_file.exists());
}
