use super::*;

#[test]
fn file_is_named_after_the_day() {
    let day = DayKey::from_ymd(2024, 3, 5).unwrap();
    assert_eq!(Downloads::file_name(day), "loom-2024-03-05.png");
}

#[test]
fn save_creates_the_directory_and_overwrites() {
    let tmp = tempfile::TempDir::new().unwrap();
    let downloads = Downloads::new(tmp.path().join("dl"));
    let day = DayKey::from_ymd(2024, 1, 1).unwrap();

    let path = downloads.save(day, b"first").unwrap();
    assert_eq!(path, tmp.path().join("dl").join("loom-2024-01-01.png"));
    downloads.save(day, b"second").unwrap();
    assert_eq!(std::fs::read(&path).unwrap(), b"second");
}

#[test]
fn unwritable_target_is_an_export_error() {
    let tmp = tempfile::TempDir::new().unwrap();
    let blocker = tmp.path().join("file");
    std::fs::write(&blocker, b"not a dir").unwrap();
    let downloads = Downloads::new(&blocker);
    let day = DayKey::from_ymd(2024, 1, 1).unwrap();
    assert!(matches!(downloads.save(day, b"x"), Err(LoomError::Export(_))));
}
