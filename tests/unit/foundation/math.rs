use super::*;

#[test]
fn mul_div255_bounds() {
    assert_eq!(mul_div255_u16(0, 255), 0);
    assert_eq!(mul_div255_u16(255, 255), 255);
    assert_eq!(mul_div255_u16(255, 0), 0);
    assert_eq!(mul_div255_u8(128, 255), 128);
    // Rounded, not truncated.
    assert_eq!(mul_div255_u16(1, 128), 1);
}

#[test]
fn srgb_roundtrip_is_exact_on_bytes() {
    for v in [0u8, 1, 13, 64, 127, 128, 200, 254, 255] {
        assert_eq!(linear_to_srgb8(srgb_to_linear(f32::from(v) / 255.0)), v);
    }
}

#[test]
fn srgb_endpoints() {
    assert_eq!(srgb_to_linear(0.0), 0.0);
    assert!((srgb_to_linear(1.0) - 1.0).abs() < 1e-6);
    assert_eq!(linear_to_srgb8(0.0), 0);
    assert_eq!(linear_to_srgb8(1.0), 255);
    assert_eq!(linear_to_srgb8(2.0), 255);
    assert_eq!(linear_to_srgb8(-1.0), 0);
}
