use super::*;
use tempfile::TempDir;

#[test]
fn memory_store_set_get_remove() {
    let kv = MemoryKv::new();
    assert_eq!(kv.get("a").unwrap(), None);
    kv.set("a", "1").unwrap();
    assert_eq!(kv.get("a").unwrap().as_deref(), Some("1"));
    kv.remove("a").unwrap();
    kv.remove("a").unwrap();
    assert_eq!(kv.get("a").unwrap(), None);
}

#[test]
fn memory_store_clones_share_state() {
    let kv = MemoryKv::new();
    let handle = kv.clone();
    kv.set("k", "v").unwrap();
    assert_eq!(handle.entries().get("k").map(String::as_str), Some("v"));
}

#[test]
fn memory_store_fault_switches() {
    let kv = MemoryKv::new();
    kv.set("k", "v").unwrap();

    kv.set_fail_writes(true);
    assert!(matches!(kv.set("k", "w"), Err(LoomError::Storage(_))));
    assert!(kv.remove("k").is_err());
    assert_eq!(kv.get("k").unwrap().as_deref(), Some("v"));

    kv.set_fail_reads(true);
    assert!(kv.get("k").is_err());
}

#[test]
fn file_store_round_trip() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("nested").join("store.json");
    let kv = FileKv::new(&path);

    kv.set("loom:lastText", "hello").unwrap();
    kv.set("loom:day:2024-01-01", "{\"text\":\"x\"}").unwrap();
    assert!(path.exists());
    assert!(!kv.temp_path().exists());

    let reopened = FileKv::new(&path);
    assert_eq!(
        reopened.get("loom:lastText").unwrap().as_deref(),
        Some("hello")
    );
    reopened.remove("loom:lastText").unwrap();
    assert_eq!(kv.get("loom:lastText").unwrap(), None);
    assert!(kv.get("loom:day:2024-01-01").unwrap().is_some());
}

#[test]
fn file_store_missing_file_is_empty() {
    let tmp = TempDir::new().unwrap();
    let kv = FileKv::new(tmp.path().join("does_not_exist.json"));
    assert_eq!(kv.get("anything").unwrap(), None);
    kv.remove("anything").unwrap();
    assert!(!kv.path().exists());
}

#[test]
fn file_store_corrupt_document_is_a_storage_error() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("store.json");
    std::fs::write(&path, "{ not json").unwrap();
    let kv = FileKv::new(&path);
    assert!(matches!(kv.get("k"), Err(LoomError::Storage(_))));
    assert!(kv.set("k", "v").is_err());
}
