use super::*;
use serde_json::json;

#[test]
fn parses_hex_rgb_and_rgba() {
    let c: Color = serde_json::from_value(json!("#ff0000")).unwrap();
    assert_eq!(c, Color::rgba(1.0, 0.0, 0.0, 1.0));

    let c: Color = serde_json::from_value(json!("#0000ff80")).unwrap();
    assert!((c.b - 1.0).abs() < 1e-6);
    assert!((c.a - (128.0 / 255.0)).abs() < 1e-6);

    assert!(serde_json::from_value::<Color>(json!("#12345")).is_err());
    assert!(serde_json::from_value::<Color>(json!("#zzzzzz")).is_err());
}

#[test]
fn parses_rgba_object_and_array() {
    let c: Color = serde_json::from_value(json!({"r": 0.25, "g": 0.5, "b": 0.75})).unwrap();
    assert_eq!(c, Color::rgba(0.25, 0.5, 0.75, 1.0));

    let c: Color = serde_json::from_value(json!([0.25, 0.5, 0.75, 0.9])).unwrap();
    assert_eq!(c, Color::rgba(0.25, 0.5, 0.75, 0.9));

    assert!(serde_json::from_value::<Color>(json!([0.25, 0.5])).is_err());
}

#[test]
fn premul_conversion_scales_channels() {
    let c = Color::rgba(1.0, 0.5, 0.0, 0.5);
    let px = c.to_premul_rgba8();
    assert_eq!(px[3], 128);
    assert_eq!(px[0], 128);
    assert!(px[1] <= px[3]);
    assert_eq!(px[2], 0);
}

#[test]
fn linear_rgb_of_gray_is_uniform() {
    let c = Color::from_srgb8(0xcc, 0xcc, 0xcc, 255);
    let lin = c.to_linear_rgb();
    assert!((lin[0] - lin[1]).abs() < 1e-7);
    assert!((lin[1] - lin[2]).abs() < 1e-7);
    assert!(lin[0] > 0.0 && lin[0] < 1.0);
}
