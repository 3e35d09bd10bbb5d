use super::*;

#[test]
fn viewport_rejects_zero_sides() {
    assert!(Viewport::new(0, 10).is_err());
    assert!(Viewport::new(10, 0).is_err());
    let v = Viewport::new(1920, 1080).unwrap();
    assert!((v.aspect() - 16.0 / 9.0).abs() < 1e-6);
    assert_eq!(v.pixel_count(), 1920 * 1080);
}

#[test]
fn empty_aabb_is_union_identity() {
    let a = Aabb::from_positions(&[[1.0, 2.0, 3.0], [-1.0, 0.0, 5.0]]);
    let merged = Aabb::EMPTY.union(&a);
    assert_eq!(merged, a);
    assert!(Aabb::EMPTY.is_empty());
    assert_eq!(Aabb::EMPTY.center(), Vec3::ZERO);
    assert_eq!(Aabb::EMPTY.size(), Vec3::ZERO);
}

#[test]
fn aabb_center_size_max_dim() {
    let a = Aabb::from_positions(&[[0.0, 0.0, 0.0], [10.0, 4.0, 2.0]]);
    assert_eq!(a.center(), Vec3::new(5.0, 2.0, 1.0));
    assert_eq!(a.size(), Vec3::new(10.0, 4.0, 2.0));
    assert_eq!(a.max_dim(), 10.0);
}
