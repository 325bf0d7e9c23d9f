use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "glyphfx", version)]
struct Cli {
    /// Log verbosity (repeat for more).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the per-word selection table as JSON.
    Schedule(ScheduleArgs),
    /// Render one frame of the demo as a PNG.
    Frame(FrameArgs),
    /// Render a single effect as a PNG.
    Effect(EffectArgs),
}

#[derive(Parser, Debug)]
struct ScheduleArgs {
    /// Demo config JSON. Defaults are used when omitted.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Milliseconds since the demo started.
    #[arg(long)]
    at_ms: f64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Demo config JSON. Defaults are used when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Font file used for every family. Without it glyphs are drawn as blocks.
    #[arg(long)]
    font: Option<PathBuf>,

    /// Print host events raised while rendering.
    #[arg(long)]
    events: bool,
}

#[derive(Parser, Debug)]
struct EffectArgs {
    /// Effect name or index (`neon`, `3d`, `7`, ...).
    #[arg(long)]
    kind: glyphfx::EffectKind,

    /// Text to draw.
    #[arg(long)]
    text: String,

    /// Milliseconds since the effect was mounted.
    #[arg(long, default_value_t = 0.0)]
    at_ms: f64,

    /// Seed for colour choices and layouts.
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Font size in pixels.
    #[arg(long, default_value_t = 75.0)]
    size: f32,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Font file used for every family. Without it glyphs are drawn as blocks.
    #[arg(long)]
    font: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Schedule(args) => cmd_schedule(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Effect(args) => cmd_effect(args),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> anyhow::Result<glyphfx::DemoConfig> {
    match path {
        Some(p) => glyphfx::DemoConfig::from_path(p)
            .with_context(|| format!("load config '{}'", p.display())),
        None => Ok(glyphfx::DemoConfig::default()),
    }
}

fn make_rasterizer(font: Option<&Path>) -> anyhow::Result<Arc<dyn glyphfx::GlyphRasterizer>> {
    let Some(path) = font else {
        return Ok(Arc::new(glyphfx::BlockRasterizer));
    };
    let fonts = glyphfx::FontSet::default()
        .with_face_file(glyphfx::FontFamilyKind::SansSerif, path)
        .with_context(|| format!("load font '{}'", path.display()))?;
    Ok(Arc::new(glyphfx::ParleyRasterizer::new(fonts)?))
}

fn write_png(out: &Path, pixels: &glyphfx::PixelBuffer) -> anyhow::Result<()> {
    if pixels.is_empty() {
        anyhow::bail!("nothing to write: rendered image is empty");
    }
    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    image::save_buffer_with_format(
        out,
        &pixels.to_straight_rgba8(),
        pixels.width(),
        pixels.height(),
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", out.display()))?;
    eprintln!("wrote {}", out.display());
    Ok(())
}

fn cmd_schedule(args: ScheduleArgs) -> anyhow::Result<()> {
    let cfg = load_config(args.config.as_deref())?;
    let json =
        serde_json::to_string_pretty(&cfg.schedule()).context("serialize schedule as JSON")?;
    println!("{json}");
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let cfg = load_config(args.config.as_deref())?;
    let rasterizer = make_rasterizer(args.font.as_deref())?;
    let mut player = glyphfx::DemoPlayer::new(cfg, rasterizer)?;
    let frame = player.render_at(args.at_ms).clone();
    if args.events {
        for event in player.drain_events() {
            println!("{}", serde_json::to_string(&event).context("serialize event")?);
        }
    }
    write_png(&args.out, &frame)
}

fn cmd_effect(args: EffectArgs) -> anyhow::Result<()> {
    use glyphfx::TextEffect as _;

    let rasterizer = make_rasterizer(args.font.as_deref())?;
    let style = glyphfx::TextStyle {
        font_size: args.size,
        ..glyphfx::demo::schedule::word_style(&args.text, args.kind)
    };
    let mask = rasterizer.rasterize(&args.text, &style)?;
    let spec = glyphfx::EffectSpec::new(args.text.clone(), style, args.kind, args.seed);
    let effect = glyphfx::Effect::from_spec(&spec, &glyphfx::EffectTuning::default())?;
    let mut rng = glyphfx::Rng64::new(args.seed);
    let frame = effect.render(&mask, glyphfx::FrameCtx::at(args.at_ms), &mut rng)?;
    write_png(&args.out, &frame.pixels)
}
