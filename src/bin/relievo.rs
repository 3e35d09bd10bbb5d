use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use relievo::{BuildParams, EffectConfig, SceneSession, SceneSessionOpts, Viewport};

#[derive(Parser, Debug)]
#[command(name = "relievo", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a single frame as a PNG.
    Frame(FrameArgs),
    /// Render a numbered PNG frame sequence.
    Sequence(SequenceArgs),
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Input SVG drawing.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Scene settings JSON (build params, effects, seed).
    #[arg(long)]
    scene: Option<PathBuf>,

    /// Clock time in seconds to render at.
    #[arg(long, default_value_t = 0.0)]
    time: f32,

    /// Output size as WIDTHxHEIGHT.
    #[arg(long, default_value = "800x600")]
    size: String,

    /// Override rayon worker threads.
    #[arg(long)]
    threads: Option<usize>,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct SequenceArgs {
    /// Input SVG drawing.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Scene settings JSON (build params, effects, seed).
    #[arg(long)]
    scene: Option<PathBuf>,

    /// Number of frames to render.
    #[arg(long, default_value_t = 60)]
    frames: u32,

    /// Playback rate the clock advances at.
    #[arg(long, default_value_t = 30.0)]
    fps: f32,

    /// Output size as WIDTHxHEIGHT.
    #[arg(long, default_value = "800x600")]
    size: String,

    /// Override rayon worker threads.
    #[arg(long)]
    threads: Option<usize>,

    /// Output directory; frames land as frame_0000.png, frame_0001.png, ...
    #[arg(long)]
    out_dir: PathBuf,
}

/// Sidecar settings applied to the session before rendering. Every field
/// is optional and defaults to the engine defaults.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct SceneFile {
    build: BuildParams,
    effects: EffectConfig,
    seed: u64,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Sequence(args) => cmd_sequence(args),
    }
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let scene = load_scene(args.scene.as_deref())?;
    let (width, height) = parse_size(&args.size)?;
    let mut sess = build_session(&args.in_path, &scene, width, height, args.threads)?;

    sess.advance(args.time)?;
    let frame = sess.render_frame()?;

    write_png(&args.out, &frame)?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_sequence(args: SequenceArgs) -> anyhow::Result<()> {
    if !(args.fps.is_finite() && args.fps > 0.0) {
        anyhow::bail!("--fps must be > 0");
    }
    let scene = load_scene(args.scene.as_deref())?;
    let (width, height) = parse_size(&args.size)?;
    let mut sess = build_session(&args.in_path, &scene, width, height, args.threads)?;

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create output dir '{}'", args.out_dir.display()))?;

    let dt = 1.0 / args.fps;
    for i in 0..args.frames {
        if i > 0 {
            sess.advance(dt)?;
        }
        let frame = sess.render_frame()?;
        write_png(&args.out_dir.join(format!("frame_{i:04}.png")), &frame)?;
    }

    eprintln!("wrote {} frames to {}", args.frames, args.out_dir.display());
    Ok(())
}

fn load_scene(path: Option<&std::path::Path>) -> anyhow::Result<SceneFile> {
    let Some(path) = path else {
        return Ok(SceneFile::default());
    };
    let bytes =
        std::fs::read(path).with_context(|| format!("read scene '{}'", path.display()))?;
    serde_json::from_slice(&bytes).with_context(|| format!("parse scene '{}'", path.display()))
}

fn build_session(
    svg_path: &std::path::Path,
    scene: &SceneFile,
    width: u32,
    height: u32,
    threads: Option<usize>,
) -> anyhow::Result<SceneSession> {
    let svg =
        std::fs::read(svg_path).with_context(|| format!("read svg '{}'", svg_path.display()))?;

    let mut sess = SceneSession::new(SceneSessionOpts {
        viewport: Viewport { width, height },
        seed: scene.seed,
        threads,
    })?;
    // Settings go in first so the model builds once, under the right params.
    sess.set_build_params(scene.build)?;
    sess.set_effects(scene.effects)?;
    sess.load_svg(&svg)?;
    Ok(sess)
}

fn parse_size(s: &str) -> anyhow::Result<(u32, u32)> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| anyhow::anyhow!("size must look like 800x600, got '{s}'"))?;
    Ok((
        w.parse().with_context(|| format!("bad width '{w}'"))?,
        h.parse().with_context(|| format!("bad height '{h}'"))?,
    ))
}

fn write_png(path: &std::path::Path, frame: &relievo::Framebuffer) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    image::save_buffer_with_format(
        path,
        &frame.data,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))
}
