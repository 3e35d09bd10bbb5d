use super::*;

fn square(cx: f64, cy: f64, half: f64, ccw: bool) -> Vec<Point> {
    let mut r = vec![
        Point::new(cx - half, cy - half),
        Point::new(cx + half, cy - half),
        Point::new(cx + half, cy + half),
        Point::new(cx - half, cy + half),
    ];
    if !ccw {
        r.reverse();
    }
    r
}

#[test]
fn shoelace_sign_tracks_winding() {
    assert!(signed_area(&square(0.0, 0.0, 1.0, true)) > 0.0);
    assert!(signed_area(&square(0.0, 0.0, 1.0, false)) < 0.0);
    assert!((signed_area(&square(0.0, 0.0, 1.0, true)) - 4.0).abs() < 1e-12);
}

#[test]
fn point_in_ring_basics() {
    let ring = square(0.0, 0.0, 1.0, true);
    assert!(point_in_ring(Point::new(0.0, 0.0), &ring));
    assert!(!point_in_ring(Point::new(2.0, 0.0), &ring));
    assert!(!point_in_ring(Point::new(0.0, -3.0), &ring));
}

#[test]
fn lone_ring_is_outer_and_normalized_ccw() {
    let polys = classify_rings(vec![square(0.0, 0.0, 1.0, false)]);
    assert_eq!(polys.len(), 1);
    assert!(polys[0].holes.is_empty());
    assert!(is_ccw(&polys[0].outer));
}

#[test]
fn nested_ring_becomes_a_cw_hole() {
    // Both authored CCW; parity decides, not winding.
    let polys = classify_rings(vec![square(0.0, 0.0, 2.0, true), square(0.0, 0.0, 1.0, true)]);
    assert_eq!(polys.len(), 1);
    assert_eq!(polys[0].holes.len(), 1);
    assert!(is_ccw(&polys[0].outer));
    assert!(!is_ccw(&polys[0].holes[0]));
}

#[test]
fn island_inside_a_hole_is_its_own_outer() {
    let polys = classify_rings(vec![
        square(0.0, 0.0, 3.0, true),
        square(0.0, 0.0, 2.0, true),
        square(0.0, 0.0, 1.0, true),
    ]);
    assert_eq!(polys.len(), 2);
    assert_eq!(polys[0].holes.len(), 1);
    assert!(polys[1].holes.is_empty());
}

#[test]
fn disjoint_siblings_stay_separate() {
    let polys = classify_rings(vec![
        square(-5.0, 0.0, 1.0, true),
        square(5.0, 0.0, 1.0, false),
    ]);
    assert_eq!(polys.len(), 2);
    assert!(polys.iter().all(|p| p.holes.is_empty()));
    assert!(polys.iter().all(|p| is_ccw(&p.outer)));
}

#[test]
fn hole_attaches_to_the_innermost_outer() {
    // outer(4) > hole(3) > island(2) > inner hole(1): the inner hole must
    // belong to the island, not the big outer.
    let polys = classify_rings(vec![
        square(0.0, 0.0, 4.0, true),
        square(0.0, 0.0, 3.0, true),
        square(0.0, 0.0, 2.0, true),
        square(0.0, 0.0, 1.0, true),
    ]);
    assert_eq!(polys.len(), 2);
    assert_eq!(polys[0].holes.len(), 1);
    assert_eq!(polys[1].holes.len(), 1);
    // The island's hole is the half=1 square.
    assert!((signed_area(&polys[1].holes[0]).abs() - 4.0).abs() < 1e-12);
}

#[test]
fn degenerate_rings_are_dropped() {
    let collinear = vec![
        Point::new(0.0, 0.0),
        Point::new(1.0, 0.0),
        Point::new(2.0, 0.0),
    ];
    let polys = classify_rings(vec![collinear, square(0.0, 5.0, 1.0, true)]);
    assert_eq!(polys.len(), 1);
}
