use super::*;

#[test]
fn default_camera_sits_on_the_z_axis() {
    let c = Camera::default();
    assert_eq!(c.position, Vec3::new(0.0, 0.0, 50.0));
    assert_eq!(c.target, Vec3::ZERO);
    assert_eq!(c.fov_y_deg, 75.0);
    assert_eq!(c.near, 0.1);
    assert_eq!(c.far, 1000.0);
}

#[test]
fn empty_bounds_fall_back_to_the_default() {
    let c = Camera::framing(&Aabb::EMPTY, 2.0);
    assert_eq!(c.position, Vec3::new(0.0, 0.0, 50.0));
    assert_eq!(c.aspect, 2.0);
}

#[test]
fn framing_backs_off_by_the_fit_distance() {
    let mut b = Aabb::EMPTY;
    b.insert(Vec3::new(-5.0, -5.0, 0.0));
    b.insert(Vec3::new(5.0, 5.0, 2.0));

    let c = Camera::framing(&b, 1.0);

    // max_dim 10, fov 75: |10 / 2 / tan(37.5 deg)| * 1.5
    let expect = (10.0f32 / 2.0 / (37.5f32).to_radians().tan()).abs() * 1.5;
    assert!((c.position.z - (1.0 + expect)).abs() < 1e-3, "z = {}", c.position.z);

    // Quarter-size offset from the center, aimed at the center.
    assert!((c.position.x - 2.5).abs() < 1e-5);
    assert!((c.position.y - 2.5).abs() < 1e-5);
    assert_eq!(c.target, Vec3::new(0.0, 0.0, 1.0));
}

#[test]
fn framing_never_parks_on_the_target() {
    let mut b = Aabb::EMPTY;
    b.insert(Vec3::ZERO);
    let c = Camera::framing(&b, 1.0);
    assert!((c.position - c.target).length() >= 1.0);
}

#[test]
fn view_matrix_looks_down_the_negative_z() {
    let c = Camera::default();
    let v = c.view_matrix();
    let t = v.transform_point3(c.target);
    assert!(t.x.abs() < 1e-5 && t.y.abs() < 1e-5);
    assert!((t.z + 50.0).abs() < 1e-4, "target sits 50 units ahead");
}

#[test]
fn projection_respects_aspect() {
    let c = Camera {
        aspect: 2.0,
        ..Camera::default()
    };
    let p = c.projection_matrix();
    let f = 1.0 / (c.fov_y_deg.to_radians() * 0.5).tan();
    assert!((p.x_axis.x - f / 2.0).abs() < 1e-5);
    assert!((p.y_axis.y - f).abs() < 1e-5);
}
