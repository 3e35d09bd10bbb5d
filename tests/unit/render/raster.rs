use super::*;

use crate::distortion::clip::flicker_clip;
use crate::foundation::core::Aabb;
use crate::geometry::mesh::GeneratedMesh;
use crate::scene::model::DistortionState;

const BG: [u8; 4] = [0x2d, 0x37, 0x48, 255];

fn tri_mesh(id: &str, verts: [[f32; 3]; 3]) -> GeneratedMesh {
    GeneratedMesh {
        id: id.to_owned(),
        positions: verts.to_vec(),
        normals: vec![[0.0, 0.0, 1.0]; 3],
        uvs: vec![[0.0, 0.0]; 3],
        indices: vec![0, 1, 2],
        morph_positions: None,
    }
}

fn model_of(meshes: Vec<GeneratedMesh>, colors: Vec<Option<Color>>) -> ModelInstance {
    let mut aabb = Aabb::EMPTY;
    for mesh in &meshes {
        aabb = aabb.union(&mesh.aabb());
    }
    ModelInstance {
        meshes,
        mesh_colors: colors,
        material: MaterialParams::default(),
        aabb,
        distortion: None,
    }
}

fn px(frame: &Framebuffer, x: usize, y: usize) -> [u8; 4] {
    let o = (y * frame.width as usize + x) * 4;
    [
        frame.data[o],
        frame.data[o + 1],
        frame.data[o + 2],
        frame.data[o + 3],
    ]
}

fn vp(w: u32, h: u32) -> Viewport {
    Viewport::new(w, h).unwrap()
}

#[test]
fn empty_model_is_background_only() {
    let model = model_of(vec![], vec![]);
    let frame = render_scene(&model, &Camera::default(), vp(8, 8));
    for p in frame.data.chunks_exact(4) {
        assert_eq!(p, BG);
    }
}

#[test]
fn triangle_covers_the_center_but_not_the_corners() {
    let mesh = tri_mesh(
        "t",
        [[-10.0, -10.0, 0.0], [10.0, -10.0, 0.0], [0.0, 10.0, 0.0]],
    );
    let model = model_of(vec![mesh], vec![None]);
    let frame = render_scene(&model, &Camera::default(), vp(32, 32));

    let center = px(&frame, 16, 16);
    assert_ne!(center, BG);
    // Default albedo is gray and both lights are white, so shading stays gray.
    assert_eq!(center[0], center[1]);
    assert_eq!(center[1], center[2]);

    assert_eq!(px(&frame, 0, 0), BG);
    assert_eq!(px(&frame, 31, 31), BG);
}

#[test]
fn depth_buffer_beats_painter_order() {
    let far_red = tri_mesh(
        "red",
        [[-10.0, -10.0, 0.0], [10.0, -10.0, 0.0], [0.0, 10.0, 0.0]],
    );
    let near_green = tri_mesh(
        "green",
        [[-10.0, -10.0, 5.0], [10.0, -10.0, 5.0], [0.0, 10.0, 5.0]],
    );
    let red = Some(Color::rgb(1.0, 0.0, 0.0));
    let green = Some(Color::rgb(0.0, 1.0, 0.0));

    let a = render_scene(
        &model_of(vec![near_green.clone(), far_red.clone()], vec![green, red]),
        &Camera::default(),
        vp(32, 32),
    );
    let b = render_scene(
        &model_of(vec![far_red, near_green], vec![red, green]),
        &Camera::default(),
        vp(32, 32),
    );

    // The nearer green face wins regardless of submission order.
    let center = px(&a, 16, 16);
    assert!(center[1] > center[0], "expected green over red: {center:?}");
    assert_eq!(a.fingerprint(), b.fingerprint());
}

#[test]
fn translucent_glass_brightens_instead_of_replacing() {
    let mesh = tri_mesh(
        "g",
        [[-10.0, -10.0, 0.0], [10.0, -10.0, 0.0], [0.0, 10.0, 0.0]],
    );
    let mut model = model_of(vec![mesh], vec![None]);
    model.material = MaterialParams::glass();

    let frame = render_scene(&model, &Camera::default(), vp(32, 32));
    let center = px(&frame, 16, 16);

    assert_ne!(center, BG);
    // White glass over the dark page lifts every channel and keeps the
    // frame opaque.
    for c in 0..3 {
        assert!(center[c] > BG[c], "channel {c}: {center:?}");
    }
    assert_eq!(center[3], 255);
}

#[test]
fn morph_weight_slides_the_silhouette() {
    let mut mesh = tri_mesh(
        "m",
        [[-10.0, -10.0, 0.0], [10.0, -10.0, 0.0], [0.0, 10.0, 0.0]],
    );
    mesh.morph_positions = Some(vec![
        [10.0, -10.0, 0.0],
        [30.0, -10.0, 0.0],
        [20.0, 10.0, 0.0],
    ]);
    let mut model = model_of(vec![mesh], vec![None]);
    model.distortion = Some(DistortionState {
        clip: flicker_clip(),
        weight: 0.0,
        seed: 1,
    });

    let rest = render_scene(&model, &Camera::default(), vp(32, 32));
    model.distortion.as_mut().unwrap().weight = 1.0;
    let bent = render_scene(&model, &Camera::default(), vp(32, 32));
    model.distortion.as_mut().unwrap().weight = 0.5;
    let half = render_scene(&model, &Camera::default(), vp(32, 32));

    // At rest the triangle sits left of center; at full weight it has
    // moved fully onto the morph target.
    assert_ne!(px(&rest, 14, 16), BG);
    assert_eq!(px(&rest, 24, 16), BG);
    assert_eq!(px(&bent, 14, 16), BG);
    assert_ne!(px(&bent, 24, 16), BG);

    let (f0, f1, fh) = (rest.fingerprint(), bent.fingerprint(), half.fingerprint());
    assert_ne!(f0, f1);
    assert_ne!(fh, f0);
    assert_ne!(fh, f1);
}

#[test]
fn tall_frames_have_no_band_seams() {
    // 200 rows span four parallel bands; a tall triangle must fill its
    // center column straight through the band boundaries.
    let mesh = tri_mesh(
        "tall",
        [[-2.0, -34.5, 0.0], [2.0, -34.5, 0.0], [0.0, 34.5, 0.0]],
    );
    let model = model_of(vec![mesh], vec![None]);
    let frame = render_scene(&model, &Camera::default(), vp(16, 200));

    for y in 40..=180 {
        assert_ne!(px(&frame, 8, y), BG, "gap at row {y}");
    }
}

#[test]
fn geometry_behind_the_camera_is_culled() {
    let mesh = tri_mesh(
        "behind",
        [[-10.0, -10.0, 100.0], [10.0, -10.0, 100.0], [0.0, 10.0, 100.0]],
    );
    let model = model_of(vec![mesh], vec![None]);
    let frame = render_scene(&model, &Camera::default(), vp(16, 16));

    let empty = render_scene(&model_of(vec![], vec![]), &Camera::default(), vp(16, 16));
    assert_eq!(frame.fingerprint(), empty.fingerprint());
}
