//! Relievo turns 2D vector drawings into physically-shaded, extruded 3D solids
//! and renders them through a layered screen-space effect chain.
//!
//! The pipeline runs entirely on the CPU and is deterministic for a given
//! input and seed:
//!
//! 1. **Extract**: SVG markup -> filled outlines (fill-less paths never become geometry)
//! 2. **Build**: outlines -> extruded, beveled triangle meshes owned by a [`ModelInstance`]
//! 3. **Frame**: bounding-box-driven camera placement
//! 4. **Render**: scene pass -> ordered effect chain -> premultiplied RGBA8 [`Framebuffer`]
//!
//! The public API is session-oriented: create a [`SceneSession`], load SVG
//! markup, replace value-object configuration as it changes, then call
//! [`SceneSession::advance`] and [`SceneSession::render_frame`] once per
//! display refresh. An optional procedural "glitch" distortion blends a
//! seeded morph target in and out on a looping flicker clip.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub(crate) mod animation;
pub(crate) mod distortion;
pub(crate) mod effects;
pub(crate) mod geometry;
pub(crate) mod render;
pub(crate) mod scene;
pub(crate) mod svg;

/// Session-oriented frame loop API.
pub mod session;

pub use crate::animation::anim::{AnimationClip, InterpMode, Keyframe, Keyframes, Lerp, LoopMode};
pub use crate::animation::ease::Ease;
pub use crate::effects::config::{
    BloomParams, EffectConfig, PixelateParams, RgbShiftParams, ScanLineParams,
};
pub use crate::foundation::color::Color;
pub use crate::foundation::core::{Aabb, Viewport};
pub use crate::foundation::error::{RelievoError, RelievoResult};
pub use crate::geometry::extrude::ExtrudeSpec;
pub use crate::geometry::mesh::GeneratedMesh;
pub use crate::render::target::Framebuffer;
pub use crate::scene::framer::Camera;
pub use crate::scene::material::MaterialParams;
pub use crate::scene::model::{BuildParams, DistortionState, ModelInstance};
pub use crate::session::scene_session::{SceneSession, SceneSessionOpts};
