use super::*;

fn scratch(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("lapreplay-config-{}-{name}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn defaults_are_valid() {
    let cfg = ReplayConfig::default();
    cfg.validate().unwrap();
    assert_eq!((cfg.width, cfg.height), (1280, 720));
    assert_eq!(cfg.fps, 60.0);
    assert!(cfg.show_progress_bar);
    assert_eq!(cfg.canvas().unwrap(), Canvas::new(1280, 720).unwrap());
}

#[test]
fn partial_file_keeps_other_defaults() {
    let dir = scratch("partial");
    let path = dir.join("cfg.json");
    std::fs::write(&path, r#"{ "width": 640, "speed": 2.0, "font_path": "f.ttf" }"#).unwrap();
    let cfg = ReplayConfig::from_path(&path).unwrap();
    assert_eq!(cfg.width, 640);
    assert_eq!(cfg.height, 720);
    assert_eq!(cfg.speed, 2.0);
    assert_eq!(cfg.font_path.as_deref(), Some(Path::new("f.ttf")));
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn bad_files_are_rejected() {
    let dir = scratch("bad");
    let unknown = dir.join("unknown.json");
    std::fs::write(&unknown, r#"{ "colour": 1 }"#).unwrap();
    assert!(matches!(
        ReplayConfig::from_path(&unknown),
        Err(ReplayError::Serde(_))
    ));

    let zero = dir.join("zero.json");
    std::fs::write(&zero, r#"{ "fps": 0 }"#).unwrap();
    assert!(matches!(
        ReplayConfig::from_path(&zero),
        Err(ReplayError::Validation(_))
    ));

    assert!(ReplayConfig::from_path(dir.join("missing.json")).is_err());
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn env_overrides_apply() {
    let mut cfg = ReplayConfig::default();
    cfg.apply_env_with(|k| match k {
        ENV_FONT => Some("/fonts/a.ttf".to_owned()),
        ENV_ROTATION_STORE => Some("/tmp/rot.json".to_owned()),
        ENV_FPS => Some(" 30 ".to_owned()),
        _ => None,
    })
    .unwrap();
    assert_eq!(cfg.font_path.as_deref(), Some(Path::new("/fonts/a.ttf")));
    assert_eq!(
        cfg.rotation_store_path().as_deref(),
        Some(Path::new("/tmp/rot.json"))
    );
    assert_eq!(cfg.fps, 30.0);

    let mut cfg = ReplayConfig::default();
    assert!(
        cfg.apply_env_with(|k| (k == ENV_FPS).then(|| "fast".to_owned()))
            .is_err()
    );
}

#[test]
fn validate_rejects_bad_values() {
    for cfg in [
        ReplayConfig {
            width: 0,
            ..ReplayConfig::default()
        },
        ReplayConfig {
            speed: -1.0,
            ..ReplayConfig::default()
        },
        ReplayConfig {
            fps: f64::NAN,
            ..ReplayConfig::default()
        },
        ReplayConfig {
            max_frames: 0,
            ..ReplayConfig::default()
        },
    ] {
        assert!(cfg.validate().is_err(), "{cfg:?}");
    }
}
