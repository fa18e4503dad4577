use super::*;

fn scratch(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("lapreplay-store-{}-{name}", std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    dir
}

#[test]
fn key_concatenates_year_and_event() {
    assert_eq!(rotation_key("2023", "Monaco"), "rotation_2023_Monaco");
}

#[test]
fn memory_store_round_trips_values() {
    let mut s = MemoryRotationStore::new();
    assert_eq!(s.get("k"), None);
    s.set("k", "0.5".to_owned()).unwrap();
    assert_eq!(s.get("k").as_deref(), Some("0.5"));
}

#[test]
fn file_store_persists_across_reopen() {
    let dir = scratch("reopen");
    let path = dir.join("nested").join("rotation.json");
    let mut s = JsonFileRotationStore::open(&path).unwrap();
    assert_eq!(s.get("rotation_2024_Monza"), None);
    s.set("rotation_2024_Monza", "-0.2617993877991494".to_owned())
        .unwrap();
    s.set("rotation_2024_Spa", "1".to_owned()).unwrap();

    let reopened = JsonFileRotationStore::open(&path).unwrap();
    assert_eq!(
        reopened.get("rotation_2024_Monza").as_deref(),
        Some("-0.2617993877991494")
    );
    assert_eq!(reopened.get("rotation_2024_Spa").as_deref(), Some("1"));
    assert_eq!(reopened.path(), path.as_path());
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn corrupt_file_opens_empty() {
    let dir = scratch("corrupt");
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join("rotation.json");
    fs::write(&path, "not json").unwrap();
    let s = JsonFileRotationStore::open(&path).unwrap();
    assert_eq!(s.get("anything"), None);
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn unreadable_file_is_an_error_not_an_empty_store() {
    let dir = scratch("unreadable");
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join("rotation.json");
    fs::write(&path, [0xff, 0xfe, b'{', b'}']).unwrap();
    assert!(matches!(
        JsonFileRotationStore::open(&path),
        Err(ReplayError::Store(_))
    ));
    // The file is left alone.
    assert_eq!(fs::read(&path).unwrap(), [0xff, 0xfe, b'{', b'}']);

    assert!(JsonFileRotationStore::open(&dir).is_err());
    let _ = fs::remove_dir_all(&dir);
}
