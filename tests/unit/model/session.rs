use super::*;
use crate::model::wire::{DriverDoc, TrackDoc};

fn driver(code: &str, t: Vec<f64>) -> DriverDoc {
    let n = t.len();
    DriverDoc {
        code: code.to_owned(),
        color: "#FF8000".to_owned(),
        x: (0..n).map(|i| i as f64).collect(),
        y: vec![0.0; n],
        t,
    }
}

fn bundle(driver_doc: DriverDoc) -> PositionBundle {
    PositionBundle {
        track: TrackDoc {
            x: vec![0.0, 1.0, 1.0, 0.0],
            y: vec![0.0, 0.0, 1.0, 1.0],
        },
        corners: vec![CornerDoc {
            number: "1".to_owned(),
            track_x: 1.0,
            track_y: 0.0,
            text_x: 3.0,
            text_y: -2.0,
        }],
        driver: Some(driver_doc),
        drivers: vec![],
    }
}

#[test]
fn max_duration_is_latest_end_time() {
    let s = VisualizationSession::from_bundles(&[
        bundle(driver("AAA", vec![0.0, 1.0, 2.0])),
        bundle(driver("BBB", vec![0.5, 4.5])),
    ])
    .unwrap();
    assert_eq!(s.traces().len(), 2);
    assert_eq!(s.max_duration(), 4.5);
    assert_eq!(s.traces()[0].color(), Rgba8::rgb(0xFF, 0x80, 0x00));
}

#[test]
fn unusable_drivers_are_skipped() {
    let s = VisualizationSession::from_bundles(&[
        bundle(driver("AAA", vec![0.0, 1.0])),
        bundle(driver("BAD", vec![])),
    ])
    .unwrap();
    assert_eq!(s.traces().len(), 1);
    assert_eq!(s.traces()[0].code(), "AAA");
}

#[test]
fn no_usable_driver_is_data_unavailable() {
    let err = VisualizationSession::from_bundles(&[bundle(driver("BAD", vec![]))]).unwrap_err();
    assert!(err.is_data_unavailable());
    let err = VisualizationSession::from_bundles(&[]).unwrap_err();
    assert!(err.is_data_unavailable());
}

#[test]
fn fit_points_cover_track_traces_and_corner_labels() {
    let s = VisualizationSession::from_bundles(&[bundle(driver("AAA", vec![0.0, 1.0]))]).unwrap();
    let pts: Vec<Point> = s.fit_points().collect();
    assert_eq!(pts.len(), 4 + 2 + 1);
    assert!(pts.contains(&Point::new(3.0, -2.0)));
    // The corner's on-track point is not part of the fit set.
    assert_eq!(pts.iter().filter(|p| **p == Point::new(1.0, 0.0)).count(), 2);
}

#[test]
fn negative_times_do_not_make_duration_negative() {
    let s = VisualizationSession::from_bundles(&[bundle(driver("AAA", vec![-3.0, -1.0]))]).unwrap();
    assert_eq!(s.max_duration(), 0.0);
}
