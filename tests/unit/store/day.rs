use super::*;
use crate::store::kv::MemoryKv;
use crate::weave::generator::build_weave;

fn day() -> DayKey {
    DayKey::from_ymd(2024, 1, 1).unwrap()
}

fn store() -> (DayStore, MemoryKv) {
    let kv = MemoryKv::new();
    (DayStore::new(Box::new(kv.clone())), kv)
}

#[test]
fn records_are_namespaced_by_day() {
    assert_eq!(DayStore::record_key(day()), "loom:day:2024-01-01");
}

#[test]
fn save_then_load_returns_the_record() {
    let (store, _kv) = store();
    let record = DayRecord {
        text: "hello".into(),
        times: vec![100.0, 150.0, 120.0],
        pattern: Some(build_weave(day(), "hello", &[100.0, 150.0, 120.0])),
    };
    store.save(day(), &record).unwrap();
    assert_eq!(store.load(day()).unwrap(), Some(record));
}

#[test]
fn save_caps_persisted_times() {
    let (store, kv) = store();
    let record = DayRecord {
        text: "x".into(),
        times: (0..150).map(f64::from).collect(),
        pattern: None,
    };
    store.save(day(), &record).unwrap();

    let loaded = store.load(day()).unwrap().unwrap();
    assert_eq!(loaded.times.len(), PERSISTED_TIMES);
    assert_eq!(loaded.times[0], 102.0);

    let raw = kv.entries()["loom:day:2024-01-01"].clone();
    let v: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert!(v["pattern"].is_null());
}

#[test]
fn missing_record_is_none() {
    let (store, _kv) = store();
    assert_eq!(store.load(day()).unwrap(), None);
}

#[test]
fn remove_deletes_the_record() {
    let (store, kv) = store();
    store.save(day(), &DayRecord::default()).unwrap();
    store.remove(day()).unwrap();
    assert!(kv.entries().is_empty());
}

#[test]
fn corrupt_values_are_errors() {
    let (store, kv) = store();
    kv.set("loom:day:2024-01-01", "{\"text\": 5").unwrap();
    assert!(matches!(store.load(day()), Err(LoomError::Storage(_))));

    kv.set(
        "loom:day:2024-01-01",
        r#"{"text":"x","times":[],"pattern":{"seed":1,"grid":[],"W":28,"H":18,"stripeRow":0}}"#,
    )
    .unwrap();
    assert!(store.load(day()).is_err());
}

#[test]
fn records_written_by_older_builds_still_load() {
    let (store, kv) = store();
    let p = build_weave(day(), "hello", &[100.0, 150.0, 120.0]);
    let pattern = serde_json::to_string(&p).unwrap();
    kv.set(
        "loom:day:2024-01-01",
        &format!(r#"{{"text":"hello","times":[100,150,120],"pattern":{pattern}}}"#),
    )
    .unwrap();
    let r = store.load(day()).unwrap().unwrap();
    assert_eq!(r.times, vec![100.0, 150.0, 120.0]);
    assert_eq!(r.pattern.unwrap().seed(), 1_065_419_235);

    kv.set("loom:day:2024-01-01", "{}").unwrap();
    assert_eq!(store.load(day()).unwrap(), Some(DayRecord::default()));
}

#[test]
fn last_text_round_trip() {
    let (store, _kv) = store();
    assert_eq!(store.load_last_text().unwrap(), None);
    store.save_last_text("draft").unwrap();
    assert_eq!(store.load_last_text().unwrap().as_deref(), Some("draft"));
}

#[test]
fn write_failures_surface_as_errors() {
    let (store, kv) = store();
    kv.set_fail_writes(true);
    assert!(store.save(day(), &DayRecord::default()).is_err());
    assert!(store.save_last_text("x").is_err());
}
