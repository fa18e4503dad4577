use super::*;
use std::f64::consts::PI;

const EPS: f64 = 1e-6;

fn canvas(w: u32, h: u32) -> Canvas {
    Canvas::new(w, h).unwrap()
}

fn lissajous(n: usize) -> Vec<Point> {
    (0..n)
        .map(|i| {
            let a = i as f64 / n as f64 * 2.0 * PI;
            Point::new(4_000.0 * (3.0 * a).sin() + 250.0, -1_500.0 * (2.0 * a).cos() - 900.0)
        })
        .collect()
}

fn screen_bounds(pts: &[Point], t: &ScreenTransform) -> Rect {
    let mut it = pts.iter().map(|p| t.apply(*p));
    let first = it.next().unwrap();
    it.fold(Rect::from_points(first, first), |r, p| r.union_pt(p))
}

#[test]
fn fitted_points_stay_inside_padding() {
    let pts = lissajous(500);
    for &(w, h) in &[(800, 600), (300, 900), (1920, 1080), (64, 64)] {
        for k in 0..24 {
            let theta = k as f64 * PI / 12.0 - 0.3;
            let t = fit_transform(pts.iter().copied(), canvas(w, h), theta);
            let b = screen_bounds(&pts, &t);
            let (w, h) = (f64::from(w), f64::from(h));
            assert!(b.x0 >= FIT_PADDING - EPS && b.x1 <= w - FIT_PADDING + EPS, "{b:?}");
            assert!(b.y0 >= FIT_PADDING - EPS && b.y1 <= h - FIT_PADDING + EPS, "{b:?}");
            // One axis is tight against the padding.
            let tight_x =
                (b.x0 - FIT_PADDING).abs() < EPS && (b.x1 - (w - FIT_PADDING)).abs() < EPS;
            let tight_y =
                (b.y0 - FIT_PADDING).abs() < EPS && (b.y1 - (h - FIT_PADDING)).abs() < EPS;
            assert!(tight_x || tight_y, "{b:?} in {w}x{h}");
            // And the set is centered on both axes.
            assert!(((b.x0 + b.x1) / 2.0 - w / 2.0).abs() < EPS);
            assert!(((b.y0 + b.y1) / 2.0 - h / 2.0).abs() < EPS);
        }
    }
}

#[test]
fn aspect_ratio_is_preserved() {
    // A 2:1 rectangle stays 2:1 on a square surface.
    let pts = [
        Point::new(0.0, 0.0),
        Point::new(200.0, 0.0),
        Point::new(200.0, 100.0),
        Point::new(0.0, 100.0),
    ];
    let t = fit_transform(pts, canvas(430, 430), 0.0);
    let b = screen_bounds(&pts, &t);
    assert!((b.width() / b.height() - 2.0).abs() < EPS);
    assert!((t.scale() - 2.0).abs() < EPS);
}

#[test]
fn track_y_up_maps_to_screen_y_down() {
    let pts = [Point::new(0.0, 0.0), Point::new(0.0, 10.0)];
    let t = fit_transform(pts, canvas(100, 100), 0.0);
    let bottom = t.apply(pts[0]);
    let top = t.apply(pts[1]);
    assert!(top.y < bottom.y);
    assert!((top.y - FIT_PADDING).abs() < EPS);
    assert!((bottom.y - (100.0 - FIT_PADDING)).abs() < EPS);
}

#[test]
fn quarter_turn_swaps_axes() {
    let pts = [Point::new(0.0, 0.0), Point::new(10.0, 0.0)];
    let t = fit_transform(pts, canvas(100, 100), PI / 2.0);
    let a = t.apply(pts[0]);
    let b = t.apply(pts[1]);
    assert!((a.x - b.x).abs() < EPS);
    // +x rotated to +y, which is up on screen.
    assert!(b.y < a.y);
    assert!((rotate_point(Point::new(1.0, 0.0), PI / 2.0) - Point::new(0.0, 1.0)).hypot() < EPS);
}

#[test]
fn rotate_then_unrotate_restores_output() {
    let pts = lissajous(97);
    let probe = Point::new(123.0, -456.0);
    let base = 0.4;
    let d = PI / 24.0;
    let before = fit_transform(pts.iter().copied(), canvas(640, 480), base).apply(probe);
    let after =
        fit_transform(pts.iter().copied(), canvas(640, 480), (base + d) - d).apply(probe);
    assert!((before - after).hypot() < EPS);
}

#[test]
fn degenerate_extents_do_not_divide_by_zero() {
    // Horizontal line: y extent is zero, so the x axis decides.
    let line = [Point::new(0.0, 5.0), Point::new(10.0, 5.0)];
    let t = fit_transform(line, canvas(130, 50), 0.0);
    assert!((t.scale() - 10.0).abs() < EPS);
    let p = t.apply(line[1]);
    assert!(p.x.is_finite() && p.y.is_finite());
    assert!((p.y - 25.0).abs() < EPS);

    // Single point: scale falls back to 1 and the point is centered.
    let one = [Point::new(7.0, -3.0)];
    let t = fit_transform(one, canvas(200, 100), 1.0);
    assert_eq!(t.scale(), 1.0);
    let p = t.apply(one[0]);
    assert!((p.x - 100.0).abs() < EPS && (p.y - 50.0).abs() < EPS);

    // Nothing to fit at all.
    let t = fit_transform(std::iter::empty(), canvas(200, 100), 0.0);
    assert_eq!(t.apply(Point::ORIGIN), Point::new(100.0, 50.0));
}

#[test]
fn tiny_surfaces_do_not_flip_the_scene() {
    let pts = lissajous(20);
    let t = fit_transform(pts.iter().copied(), canvas(20, 20), 0.0);
    assert!(t.scale() >= 0.0);
    let t = fit_transform(pts.iter().copied(), canvas(100, 100), f64::NAN);
    assert_eq!(t.rotation(), 0.0);
}
