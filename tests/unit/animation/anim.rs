use super::*;

fn key(time: f32, value: f32) -> Keyframe<f32> {
    Keyframe {
        time,
        value,
        ease: Ease::Linear,
    }
}

fn track(keys: Vec<Keyframe<f32>>) -> Keyframes<f32> {
    Keyframes {
        keys,
        mode: InterpMode::Linear,
        default: None,
    }
}

#[test]
fn sample_clamps_outside_key_range() {
    let t = track(vec![key(1.0, 10.0), key(2.0, 20.0)]);
    assert_eq!(t.sample(0.0).unwrap(), 10.0);
    assert_eq!(t.sample(5.0).unwrap(), 20.0);
}

#[test]
fn sample_interpolates_between_keys() {
    let t = track(vec![key(0.0, 0.0), key(2.0, 10.0)]);
    assert!((t.sample(1.0).unwrap() - 5.0).abs() < 1e-6);
    assert!((t.sample(0.5).unwrap() - 2.5).abs() < 1e-6);
}

#[test]
fn hold_mode_keeps_previous_value() {
    let mut t = track(vec![key(0.0, 1.0), key(1.0, 9.0)]);
    t.mode = InterpMode::Hold;
    assert_eq!(t.sample(0.999).unwrap(), 1.0);
    assert_eq!(t.sample(1.0).unwrap(), 9.0);
}

#[test]
fn ease_shapes_the_segment() {
    let t = Keyframes {
        keys: vec![
            Keyframe {
                time: 0.0,
                value: 0.0,
                ease: Ease::InQuad,
            },
            key(1.0, 1.0),
        ],
        mode: InterpMode::Linear,
        default: None,
    };
    // InQuad at u = 0.5 is 0.25.
    assert!((t.sample(0.5).unwrap() - 0.25).abs() < 1e-6);
}

#[test]
fn empty_track_uses_default() {
    let t = Keyframes {
        keys: vec![],
        mode: InterpMode::Linear,
        default: Some(0.75),
    };
    t.validate().unwrap();
    assert_eq!(t.sample(123.0).unwrap(), 0.75);
}

#[test]
fn validate_rejects_unsorted_and_empty() {
    let unsorted = track(vec![key(1.0, 0.0), key(0.5, 1.0)]);
    assert!(unsorted.validate().is_err());

    let empty: Keyframes<f32> = track(vec![]);
    assert!(empty.validate().is_err());
    assert!(empty.sample(0.0).is_err());
}

#[test]
fn coincident_keys_are_an_instant_jump() {
    let t = track(vec![key(0.0, 0.0), key(1.0, 3.0), key(1.0, 7.0)]);
    t.validate().unwrap();
    // On the shared time both keys are behind us; the later one wins.
    assert_eq!(t.sample(1.0).unwrap(), 7.0);
    // Approaching it, we interpolate toward the first of the pair.
    assert!((t.sample(0.5).unwrap() - 1.5).abs() < 1e-6);
}

#[test]
fn clip_repeat_wraps_time() {
    let clip = AnimationClip::new(
        "w",
        2.0,
        LoopMode::Repeat,
        track(vec![key(0.0, 0.0), key(2.0, 1.0)]),
    )
    .unwrap();
    let a = clip.sample(0.5).unwrap();
    let b = clip.sample(2.5).unwrap();
    let c = clip.sample(-1.5).unwrap();
    assert!((a - b).abs() < 1e-6);
    assert!((a - c).abs() < 1e-6);
}

#[test]
fn clip_ping_pong_reflects() {
    let clip = AnimationClip::new(
        "w",
        1.0,
        LoopMode::PingPong,
        track(vec![key(0.0, 0.0), key(1.0, 1.0)]),
    )
    .unwrap();
    // Forward leg.
    assert!((clip.sample(0.25).unwrap() - 0.25).abs() < 1e-6);
    // Backward leg mirrors the forward leg.
    assert!((clip.sample(1.25).unwrap() - 0.75).abs() < 1e-6);
    // Full cycle returns to the start.
    assert!(clip.sample(2.0).unwrap().abs() < 1e-6);
}

#[test]
fn clip_rejects_bad_duration_and_stray_keys() {
    let t = track(vec![key(0.0, 0.0), key(1.0, 1.0)]);
    assert!(AnimationClip::new("w", 0.0, LoopMode::Repeat, t.clone()).is_err());
    assert!(AnimationClip::new("w", f32::NAN, LoopMode::Repeat, t.clone()).is_err());
    assert!(AnimationClip::new("w", 0.5, LoopMode::Repeat, t).is_err());
}

#[test]
fn clip_serde_round_trip() {
    let clip = AnimationClip::new(
        "flicker",
        2.0,
        LoopMode::Repeat,
        track(vec![key(0.0, 0.0), key(1.0, 1.0), key(2.0, 0.0)]),
    )
    .unwrap();
    let json = serde_json::to_string(&clip).unwrap();
    let back: AnimationClip = serde_json::from_str(&json).unwrap();
    assert_eq!(back.name, "flicker");
    assert_eq!(back.track.keys.len(), 3);
    assert!((back.sample(1.0).unwrap() - 1.0).abs() < 1e-6);
}

#[test]
fn lerp_vec3_component_wise() {
    let a = [0.0, 10.0, -4.0];
    let b = [1.0, 20.0, 4.0];
    let m = <[f32; 3] as Lerp>::lerp(&a, &b, 0.5);
    assert_eq!(m, [0.5, 15.0, 0.0]);
}
