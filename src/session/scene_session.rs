use crate::animation::anim::AnimationClip;
use crate::effects::chain::{resolve_chain, run_chain};
use crate::effects::config::EffectConfig;
use crate::foundation::core::Viewport;
use crate::foundation::error::{RelievoError, RelievoResult};
use crate::render::raster;
use crate::render::target::Framebuffer;
use crate::scene::framer::Camera;
use crate::scene::model::{BuildParams, ModelInstance};
use crate::svg::extract::{ExtractedShape, extract_shapes};

/// Options fixed at session construction.
#[derive(Clone, Debug)]
pub struct SceneSessionOpts {
    /// Output surface size. Changeable later via [`SceneSession::set_viewport`].
    pub viewport: Viewport,
    /// Base seed for glitch distortion; each activation derives a fresh
    /// pattern from it deterministically.
    pub seed: u64,
    /// Override the number of rayon worker threads. `None` uses rayon
    /// defaults. Output pixels are identical at any thread count.
    pub threads: Option<usize>,
}

impl Default for SceneSessionOpts {
    fn default() -> Self {
        Self {
            viewport: Viewport {
                width: 800,
                height: 600,
            },
            seed: 0,
            threads: None,
        }
    }
}

/// Session-oriented scene driver.
///
/// A session owns the extracted outlines, the built model, the camera, the
/// effect configuration, and a monotonic clock. Frontends mutate it through
/// value objects ([`BuildParams`], [`EffectConfig`]) and pull frames with
/// [`SceneSession::render_frame`] after [`SceneSession::advance`].
///
/// Everything is deterministic: the same SVG, mutation sequence, seed, and
/// clock timeline produce byte-identical frames.
pub struct SceneSession {
    viewport: Viewport,
    seed: u64,
    shapes: Vec<ExtractedShape>,
    model: Option<ModelInstance>,
    camera: Camera,
    build: BuildParams,
    effects: EffectConfig,
    clock: f32,
    activations: u64,
    pool: Option<rayon::ThreadPool>,
}

impl SceneSession {
    /// Construct an empty session. Returns an error for a zero-sized
    /// viewport or a zero thread override.
    pub fn new(opts: SceneSessionOpts) -> RelievoResult<Self> {
        let viewport = Viewport::new(opts.viewport.width, opts.viewport.height)?;
        let pool = build_thread_pool(opts.threads)?;
        Ok(Self {
            viewport,
            seed: opts.seed,
            shapes: Vec::new(),
            model: None,
            camera: Camera {
                aspect: viewport.aspect(),
                ..Camera::default()
            },
            build: BuildParams::default(),
            effects: EffectConfig::default(),
            clock: 0.0,
            activations: 0,
            pool,
        })
    }

    /// Parse SVG markup, build the model under the current parameters, and
    /// auto-frame the camera. Replaces any previously loaded drawing.
    ///
    /// On parse failure the session keeps its previous state.
    #[tracing::instrument(skip(self, svg))]
    pub fn load_svg(&mut self, svg: &[u8]) -> RelievoResult<()> {
        let shapes = extract_shapes(svg)?;
        let model = ModelInstance::build(&shapes, &self.build)?;

        self.shapes = shapes;
        self.camera = Camera::framing(&model.aabb, self.viewport.aspect());
        self.model = Some(model);
        if self.effects.glitch {
            self.start_distortion()?;
        }
        Ok(())
    }

    /// Apply new geometry and material parameters.
    ///
    /// A change that leaves the extrusion profile untouched swaps only the
    /// material; otherwise the model is rebuilt from the cached outlines,
    /// the camera reframes, and an active glitch pattern is regenerated
    /// with its current seed.
    pub fn set_build_params(&mut self, params: BuildParams) -> RelievoResult<()> {
        let rebuild = !self.build.same_geometry(&params);
        self.build = params;

        let Some(model) = &mut self.model else {
            return Ok(());
        };
        if !rebuild {
            model.set_material(params.material);
            return Ok(());
        }

        let active_seed = model.distortion.as_ref().map(|d| d.seed);
        let mut model = ModelInstance::build(&self.shapes, &self.build)?;
        if let Some(seed) = active_seed {
            model.activate_distortion(seed);
            if let Some(d) = &mut model.distortion {
                d.weight = d.clip.sample(self.clock)?;
            }
        }
        self.camera = Camera::framing(&model.aabb, self.viewport.aspect());
        self.model = Some(model);
        Ok(())
    }

    /// Replace the effect configuration. Toggling `glitch` starts or stops
    /// mesh distortion alongside the post chain.
    pub fn set_effects(&mut self, effects: EffectConfig) -> RelievoResult<()> {
        self.effects = effects;
        self.sync_distortion()
    }

    /// Convenience toggle for the glitch flag alone.
    pub fn set_distortion_enabled(&mut self, on: bool) -> RelievoResult<()> {
        self.effects.glitch = on;
        self.sync_distortion()
    }

    fn sync_distortion(&mut self) -> RelievoResult<()> {
        let active = self
            .model
            .as_ref()
            .is_some_and(|m| m.distortion.is_some());
        match (self.effects.glitch, active) {
            (true, false) => self.start_distortion()?,
            (false, true) => {
                if let Some(model) = &mut self.model {
                    model.clear_distortion();
                }
            }
            _ => {}
        }
        Ok(())
    }

    /// Activate distortion with the next derived seed and sample the
    /// flicker weight at the current clock.
    fn start_distortion(&mut self) -> RelievoResult<()> {
        let seed = self.seed.wrapping_add(self.activations);
        let clock = self.clock;
        if let Some(model) = &mut self.model {
            model.activate_distortion(seed);
            self.activations = self.activations.wrapping_add(1);
            if let Some(d) = &mut model.distortion {
                d.weight = d.clip.sample(clock)?;
            }
        }
        Ok(())
    }

    /// Resize the output surface. Only the camera aspect follows; the
    /// framing position never drifts on resize.
    pub fn set_viewport(&mut self, viewport: Viewport) -> RelievoResult<()> {
        let viewport = Viewport::new(viewport.width, viewport.height)?;
        self.viewport = viewport;
        self.camera.aspect = viewport.aspect();
        Ok(())
    }

    /// Advance the session clock by `dt` seconds and resample the flicker
    /// weight. `dt` must be finite and non-negative.
    pub fn advance(&mut self, dt: f32) -> RelievoResult<()> {
        if !dt.is_finite() || dt < 0.0 {
            return Err(RelievoError::validation(
                "advance 'dt' must be finite and >= 0",
            ));
        }
        self.clock += dt;
        if let Some(model) = &mut self.model
            && let Some(d) = &mut model.distortion
        {
            d.weight = d.clip.sample(self.clock)?;
        }
        Ok(())
    }

    /// Render the current state: scene pass, then the effect chain.
    ///
    /// Without a loaded model this returns the bare page background.
    #[tracing::instrument(skip(self))]
    pub fn render_frame(&mut self) -> RelievoResult<Framebuffer> {
        let glitch_active = self.effects.glitch
            && self
                .model
                .as_ref()
                .is_some_and(|m| m.distortion.is_some());
        let passes = resolve_chain(&self.effects, glitch_active, self.clock);

        let render = || {
            let mut frame = match &self.model {
                Some(model) => raster::render_scene(model, &self.camera, self.viewport),
                None => raster::empty_frame(self.viewport),
            };
            run_chain(&mut frame, &passes);
            frame
        };
        Ok(match &self.pool {
            Some(pool) => pool.install(render),
            None => render(),
        })
    }

    /// Drop the drawing, the model, and all edits; the clock and effect
    /// toggles reset too. The session is back to its just-constructed state.
    pub fn clear(&mut self) {
        self.shapes.clear();
        self.model = None;
        self.camera = Camera {
            aspect: self.viewport.aspect(),
            ..Camera::default()
        };
        self.build = BuildParams::default();
        self.effects = EffectConfig::default();
        self.clock = 0.0;
        self.activations = 0;
    }

    /// The built model, if a drawing is loaded.
    pub fn model(&self) -> Option<&ModelInstance> {
        self.model.as_ref()
    }

    /// The current camera.
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// The current effect configuration.
    pub fn effects(&self) -> &EffectConfig {
        &self.effects
    }

    /// The current build parameters.
    pub fn build_params(&self) -> &BuildParams {
        &self.build
    }

    /// The current output surface size.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Seconds advanced since construction or the last [`SceneSession::clear`].
    pub fn clock(&self) -> f32 {
        self.clock
    }

    /// Animation clips exported by the current model (the flicker track
    /// while glitch distortion is active).
    pub fn animation_clips(&self) -> Vec<&AnimationClip> {
        self.model
            .as_ref()
            .map(ModelInstance::animation_clips)
            .unwrap_or_default()
    }
}

fn build_thread_pool(threads: Option<usize>) -> RelievoResult<Option<rayon::ThreadPool>> {
    let Some(n) = threads else {
        return Ok(None);
    };
    if n == 0 {
        return Err(RelievoError::validation(
            "SceneSessionOpts 'threads' must be >= 1 when set",
        ));
    }
    rayon::ThreadPoolBuilder::new()
        .num_threads(n)
        .build()
        .map(Some)
        .map_err(|e| RelievoError::render(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/session/scene_session.rs"]
mod tests;
