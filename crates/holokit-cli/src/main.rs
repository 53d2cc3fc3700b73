mod args;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rayon::prelude::*;

use holokit_core::{hash_frame, hash_frames, Color, HoloConfig, TiltVector, WindowRect};
use holokit_motion::{MotionSampler, SimulatedSweep};
use holokit_render::image_io::{load_image, save_png};
use holokit_render::{resolve, CardVariant, EffectParams, PassExtras};

#[derive(Parser)]
#[command(
    name = "holokit",
    version,
    about = "HoloKit: tilt-driven holographic card effects",
    long_about = "HoloKit renders trading-card style holographic effects.\nPick a card variant, tilt it, and write the composed frame to PNG."
)]
struct Cli {
    /// Path to a holokit.toml (default: ./holokit.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the card variant catalog
    List {
        /// Print the catalog as JSON
        #[arg(long)]
        json: bool,
    },

    /// Render one frame of a variant to PNG
    Render {
        /// Variant id, e.g. basicGlare or card-six
        #[arg(long)]
        variant: CardVariant,

        /// Tilt as x,y in [-1, 1]
        #[arg(long, value_parser = args::tilt, allow_hyphen_values = true)]
        tilt: Option<TiltVector>,

        /// Seconds since the card appeared
        #[arg(long, default_value_t = 0.0)]
        time: f64,

        /// Effect intensity in [0, 1] (default: config, then variant default)
        #[arg(long)]
        intensity: Option<f32>,

        /// Density override for glitter and star passes
        #[arg(long)]
        density: Option<f32>,

        /// Window override x,y,w,h for windowed passes
        #[arg(long, value_parser = args::window)]
        window: Option<WindowRect>,

        /// Color pair override, e.g. "#88ccff,#ffffff"
        #[arg(long, value_parser = args::color_pair)]
        colors: Option<(Color, Color)>,

        /// Artwork image placed in the variant's artwork slot
        #[arg(long)]
        artwork: Option<PathBuf>,

        /// Raster pixels per card point (default: config render.scale)
        #[arg(long)]
        scale: Option<f32>,

        /// Output PNG (default: <output dir>/<variant>.png)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Render a circular tilt sweep as a PNG sequence
    Animate {
        #[arg(long)]
        variant: CardVariant,

        /// Number of frames in one revolution
        #[arg(long, default_value_t = 60)]
        frames: u32,

        /// Frames per second, sets the time step
        #[arg(long, default_value_t = 30.0)]
        fps: f64,

        /// Tilt radius of the sweep
        #[arg(long, default_value_t = 0.6)]
        radius: f32,

        /// Output directory (default: <output dir>/<variant>)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Run the motion sampler over a simulated sensor and log the tilt
    Sample {
        #[arg(long, default_value_t = 2.0)]
        seconds: f64,
    },

    /// Display version and engine info
    Info,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so `list --json` output stays machine-readable.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::List { json } => cmd_list(json),
        Commands::Render {
            variant,
            tilt,
            time,
            intensity,
            density,
            window,
            colors,
            artwork,
            scale,
            output,
        } => {
            let extras = PassExtras {
                primary: colors.map(|c| c.0),
                secondary: colors.map(|c| c.1),
                density,
                window,
            };
            cmd_render(
                &config,
                RenderRequest {
                    variant,
                    tilt: tilt.unwrap_or(TiltVector::ZERO),
                    time,
                    intensity,
                    extras,
                    artwork,
                    scale,
                    output,
                },
            )
        }
        Commands::Animate {
            variant,
            frames,
            fps,
            radius,
            output,
        } => cmd_animate(&config, variant, frames, fps, radius, output),
        Commands::Sample { seconds } => cmd_sample(&config, seconds),
        Commands::Info => cmd_info(&config),
    }
}

fn load_config(path: Option<&Path>) -> Result<HoloConfig> {
    match path {
        Some(p) => HoloConfig::load_from_file(p)
            .with_context(|| format!("failed to load config: {}", p.display())),
        None => {
            let default = Path::new(HoloConfig::FILE_NAME);
            if default.exists() {
                HoloConfig::load_from_file(default)
                    .with_context(|| format!("failed to load config: {}", default.display()))
            } else {
                Ok(HoloConfig::default())
            }
        }
    }
}

#[derive(serde::Serialize)]
struct CatalogRow {
    id: &'static str,
    name: &'static str,
    family: String,
    description: &'static str,
    passes: Vec<&'static str>,
    defaults: holokit_render::VariantDefaults,
}

fn cmd_list(json: bool) -> Result<()> {
    let rows: Vec<CatalogRow> = CardVariant::ALL
        .iter()
        .map(|v| {
            let (pipeline, defaults) = resolve(*v);
            CatalogRow {
                id: v.id(),
                name: v.display_name(),
                family: v.family().to_string(),
                description: v.description(),
                passes: pipeline.pass_ids(),
                defaults,
            }
        })
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    println!("🃏 HoloKit catalog ({} variants)", rows.len());
    for row in &rows {
        println!(
            "   {:<12} {:<9} {:<16} {}",
            row.id, row.family, row.name, row.description
        );
        println!("   {:<12} passes: {}", "", row.passes.join(" → "));
    }
    Ok(())
}

struct RenderRequest {
    variant: CardVariant,
    tilt: TiltVector,
    time: f64,
    intensity: Option<f32>,
    extras: PassExtras,
    artwork: Option<PathBuf>,
    scale: Option<f32>,
    output: Option<PathBuf>,
}

fn cmd_render(config: &HoloConfig, req: RenderRequest) -> Result<()> {
    let variant = req.variant;
    let (pipeline, defaults) = resolve(variant);
    let output = req
        .output
        .unwrap_or_else(|| config.output.dir.join(format!("{}.png", variant.id())));

    println!("🎴 HoloKit v{}", env!("CARGO_PKG_VERSION"));
    println!("   Variant: {} ({})", variant.display_name(), variant.id());

    let artwork = match &req.artwork {
        Some(path) => {
            let image = load_image(path)
                .with_context(|| format!("failed to load artwork: {}", path.display()))?;
            println!("   ✓ Artwork {}x{} from {}", image.width, image.height, path.display());
            Some(Arc::new(image))
        }
        None => None,
    };

    let scale = req.scale.unwrap_or_else(|| config.render.scale());
    let surface = variant.surface(artwork).with_scale(scale);
    let intensity = req
        .intensity
        .or(config.render.intensity)
        .unwrap_or(defaults.intensity);
    let params = EffectParams::new(surface.size())
        .with_tilt(req.tilt)
        .with_time(req.time)
        .with_intensity(intensity)
        .with_extras(req.extras.or(defaults.extras));

    let start = Instant::now();
    let base = surface.flatten();
    let frame = pipeline.apply(&base, &params);
    let elapsed = start.elapsed();
    println!(
        "   ✓ Rendered {}x{} in {:.1}ms ({} passes)",
        frame.width,
        frame.height,
        elapsed.as_secs_f64() * 1000.0,
        pipeline.len()
    );

    save_png(&frame, &output).with_context(|| format!("failed to write {}", output.display()))?;
    println!("   Output: {}", output.display());
    println!("   Hash:   {}", hash_frame(&frame).to_hex());
    Ok(())
}

fn cmd_animate(
    config: &HoloConfig,
    variant: CardVariant,
    frames: u32,
    fps: f64,
    radius: f32,
    output: Option<PathBuf>,
) -> Result<()> {
    if frames == 0 {
        anyhow::bail!("--frames must be at least 1");
    }
    if !(fps.is_finite() && fps > 0.0) {
        anyhow::bail!("--fps must be positive, got {}", fps);
    }
    let dir = output.unwrap_or_else(|| config.output.dir.join(variant.id()));
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create output directory {}", dir.display()))?;

    let (pipeline, defaults) = resolve(variant);
    let surface = variant.surface(None).with_scale(config.render.scale());
    let base = surface.flatten();
    let intensity = config.render.intensity.unwrap_or(defaults.intensity);

    println!("🎞  Animating {} ({} frames @ {} fps)", variant.id(), frames, fps);
    let start = Instant::now();

    // Each frame is an independent evaluation over the same flattened base.
    let rendered: Vec<_> = (0..frames)
        .into_par_iter()
        .map(|i| {
            let angle = std::f32::consts::TAU * i as f32 / frames as f32;
            let tilt = TiltVector::new(radius * angle.cos(), radius * angle.sin());
            let params = EffectParams::new(surface.size())
                .with_tilt(tilt)
                .with_time(i as f64 / fps)
                .with_intensity(intensity)
                .with_extras(defaults.extras);
            pipeline.apply(&base, &params)
        })
        .collect();

    rendered
        .par_iter()
        .enumerate()
        .try_for_each(|(i, frame)| {
            let path = dir.join(format!("frame_{:04}.png", i));
            save_png(frame, &path).with_context(|| format!("failed to write {}", path.display()))
        })?;

    println!(
        "   ✓ {} frames in {:.1}ms",
        rendered.len(),
        start.elapsed().as_secs_f64() * 1000.0
    );
    println!("   Output: {}", dir.display());
    println!("   Hash:   {}", hash_frames(&rendered).to_hex());
    Ok(())
}

fn cmd_sample(config: &HoloConfig, seconds: f64) -> Result<()> {
    if !(seconds.is_finite() && seconds > 0.0) {
        anyhow::bail!("--seconds must be positive, got {}", seconds);
    }
    let source = SimulatedSweep::new(std::f64::consts::FRAC_PI_4, 120);
    let mut sampler = MotionSampler::new(source, &config.motion);
    let reader = sampler.reader();

    println!("📡 Sampling simulated orientation at {:.0} Hz", config.motion.update_hz());
    sampler.start();
    let deadline = Instant::now() + Duration::from_secs_f64(seconds);
    while Instant::now() < deadline {
        std::thread::sleep(Duration::from_millis(250));
        let tilt = reader.snapshot();
        tracing::info!("tilt ({:+.3}, {:+.3}) |{:.3}|", tilt.x, tilt.y, tilt.magnitude());
    }
    sampler.stop();
    println!("   ✓ Stopped, last tilt {:?}", sampler.tilt());
    Ok(())
}

fn cmd_info(config: &HoloConfig) -> Result<()> {
    println!("🎴 HoloKit v{}", env!("CARGO_PKG_VERSION"));
    println!("   Variants: {}", CardVariant::ALL.len());
    println!("   Motion:   {:.0} Hz", config.motion.update_hz());
    println!("   Scale:    {}x", config.render.scale());
    match config.render.intensity {
        Some(i) => println!("   Intensity override: {}", i),
        None => println!("   Intensity override: (none, variant defaults)"),
    }
    println!("   Output:   {}", config.output.dir.display());
    println!("   OS: {} ({})", std::env::consts::OS, std::env::consts::ARCH);
    Ok(())
}
