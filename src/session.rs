/// The [`SceneSession`](scene_session::SceneSession) frame loop driver and its
/// construction options.
pub mod scene_session;
