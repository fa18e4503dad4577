use super::*;
use crate::model::wire::{DriverDoc, TrackDoc};
use std::collections::HashMap;

struct FixedService {
    by_driver: HashMap<String, PositionBundle>,
}

impl DataService for FixedService {
    fn position(&self, _key: &SessionKey, pick: &LapSelection) -> ReplayResult<PositionBundle> {
        self.by_driver
            .get(&pick.driver)
            .cloned()
            .ok_or_else(|| ReplayError::data_unavailable(pick.driver.clone()))
    }
}

fn bundle(code: &str, track_x0: f64, end: f64) -> PositionBundle {
    PositionBundle {
        track: TrackDoc {
            x: vec![track_x0, 1.0],
            y: vec![0.0, 1.0],
        },
        corners: vec![],
        driver: Some(DriverDoc {
            code: code.to_owned(),
            color: "FFFFFF".to_owned(),
            x: vec![0.0, 1.0],
            y: vec![0.0, 1.0],
            t: vec![0.0, end],
        }),
        drivers: vec![],
    }
}

fn key() -> SessionKey {
    SessionKey {
        year: "2023".to_owned(),
        event: "Monaco".to_owned(),
        session: "R".to_owned(),
    }
}

#[test]
fn lap_selection_parses_code_colon_lap() {
    let p: LapSelection = "VER:40".parse().unwrap();
    assert_eq!(p.driver, "VER");
    assert_eq!(p.lap, 40);
    assert!("VER".parse::<LapSelection>().is_err());
    assert!(":3".parse::<LapSelection>().is_err());
    assert!("VER:x".parse::<LapSelection>().is_err());
}

#[test]
fn load_session_takes_track_from_first_response() {
    let mut by_driver = HashMap::new();
    by_driver.insert("AAA".to_owned(), bundle("AAA", -5.0, 80.0));
    by_driver.insert("BBB".to_owned(), bundle("BBB", 7.0, 90.0));
    let svc = FixedService { by_driver };

    let picks: [LapSelection; 2] = ["BBB:3".parse().unwrap(), "AAA:9".parse().unwrap()];
    let s = load_session(&svc, &key(), &picks).unwrap();
    assert_eq!(s.track().points()[0].x, 7.0);
    let codes: Vec<_> = s.traces().iter().map(|t| t.code()).collect();
    assert_eq!(codes, ["BBB", "AAA"]);
    assert_eq!(s.max_duration(), 90.0);
}

#[test]
fn any_failed_fetch_fails_the_load() {
    let mut by_driver = HashMap::new();
    by_driver.insert("AAA".to_owned(), bundle("AAA", 0.0, 1.0));
    let svc = FixedService { by_driver };
    let picks: [LapSelection; 2] = ["AAA:1".parse().unwrap(), "ZZZ:1".parse().unwrap()];
    assert!(load_session(&svc, &key(), &picks).unwrap_err().is_data_unavailable());
    assert!(load_session(&svc, &key(), &[]).unwrap_err().is_data_unavailable());
}

#[test]
fn json_dir_layout() {
    let svc = JsonDirService::new("/data");
    let p = svc.bundle_path(&key(), &"LEC:12".parse::<LapSelection>().unwrap());
    assert_eq!(p, std::path::Path::new("/data/2023/Monaco/R/LEC/12.json"));
    let err = svc.position(&key(), &"LEC:12".parse::<LapSelection>().unwrap()).unwrap_err();
    assert!(err.is_data_unavailable());
}
