use super::*;

#[test]
fn defaults_match_the_neutral_gray() {
    let m = MaterialParams::default();
    assert!((m.color.r - 0.8).abs() < 1e-6);
    assert_eq!(m.roughness, 0.5);
    assert_eq!(m.metalness, 0.1);
    assert_eq!(m.transmission, 0.0);
    assert!(!m.transparent());
}

#[test]
fn glass_is_transparent_and_thick() {
    let g = MaterialParams::glass();
    assert!(g.transparent());
    assert_eq!(g.transmission, 1.0);
    assert_eq!(g.thickness, 1.5);
}

#[test]
fn metal_preset_is_fully_metallic() {
    let m = MaterialParams::metal();
    assert_eq!(m.metalness, 1.0);
    assert!(!m.transparent());
}

#[test]
fn clamped_pins_ranges_and_repairs_nan() {
    let m = MaterialParams {
        roughness: 2.0,
        metalness: -1.0,
        transmission: 1.5,
        ior: 0.5,
        thickness: f32::NAN,
        ..MaterialParams::default()
    }
    .clamped();

    assert_eq!(m.roughness, 1.0);
    assert_eq!(m.metalness, 0.0);
    assert_eq!(m.transmission, 1.0);
    assert_eq!(m.ior, 1.0);
    assert_eq!(m.thickness, MaterialParams::default().thickness);
}

#[test]
fn serde_defaults_fill_missing_fields() {
    let m: MaterialParams = serde_json::from_str(r#"{"roughness": 0.25}"#).unwrap();
    assert_eq!(m.roughness, 0.25);
    assert_eq!(m.metalness, MaterialParams::default().metalness);
    assert_eq!(m.ior, 1.5);
}

#[test]
fn color_accepts_hex_in_scene_files() {
    let m: MaterialParams = serde_json::from_str(r##"{"color": "#ffd700"}"##).unwrap();
    assert!((m.color.r - 1.0).abs() < 1e-6);
    assert!(m.color.b.abs() < 1e-6);
}
