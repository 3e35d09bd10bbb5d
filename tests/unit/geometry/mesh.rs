use super::*;

fn tri_mesh() -> GeneratedMesh {
    GeneratedMesh {
        id: "t".to_string(),
        positions: vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
        normals: vec![[0.0, 0.0, 1.0]; 3],
        uvs: vec![[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]],
        indices: vec![0, 1, 2],
        morph_positions: None,
    }
}

#[test]
fn validate_accepts_a_consistent_mesh() {
    tri_mesh().validate().unwrap();
}

#[test]
fn validate_rejects_buffer_mismatch() {
    let mut m = tri_mesh();
    m.normals.pop();
    assert!(m.validate().is_err());

    let mut m = tri_mesh();
    m.indices.push(7);
    assert!(m.validate().is_err());

    let mut m = tri_mesh();
    m.indices = vec![0, 1];
    assert!(m.validate().is_err());

    let mut m = tri_mesh();
    m.morph_positions = Some(vec![[0.0; 3]; 2]);
    assert!(m.validate().is_err());
}

#[test]
fn aabb_covers_all_positions() {
    let b = tri_mesh().aabb();
    assert_eq!(b.min.x, 0.0);
    assert_eq!(b.max.x, 1.0);
    assert_eq!(b.max.y, 1.0);
    assert_eq!(b.max.z, 0.0);
}

#[test]
fn fingerprint_is_stable_and_sensitive() {
    let m = tri_mesh();
    assert_eq!(m.fingerprint(), m.fingerprint());

    let mut moved = tri_mesh();
    moved.positions[0][0] += 1e-6;
    assert_ne!(m.fingerprint(), moved.fingerprint());

    let mut renamed = tri_mesh();
    renamed.id = "u".to_string();
    assert_ne!(m.fingerprint(), renamed.fingerprint());
}

#[test]
fn fingerprint_sees_the_morph_buffer() {
    let m = tri_mesh();
    let mut with_morph = tri_mesh();
    with_morph.morph_positions = Some(with_morph.positions.clone());
    assert_ne!(m.fingerprint(), with_morph.fingerprint());
}
