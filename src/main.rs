//! sphere-rt: render sphere scenes to PNG or to the terminal
//!
//! Usage:
//!   sphere-rt render --output render.png      - Render the seed scene
//!   sphere-rt render --scene scene.yaml       - Render a scene file
//!   sphere-rt ascii --width 80 --height 40    - Print a text preview
//!   sphere-rt check-scene scene.yaml          - Validate a scene file
//!   sphere-rt seed-scene > scene.yaml         - Dump the seed scene as YAML

use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::time::Instant;

use sphere_rt::{Renderer, Scene, SceneConfig, DEFAULT_HEIGHT, DEFAULT_WIDTH};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Trace => write!(f, "trace"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Error => write!(f, "error"),
        }
    }
}

#[derive(Parser)]
#[command(name = "sphere-rt")]
#[command(version)]
#[command(about = "CPU ray tracer for sphere scenes")]
struct Cli {
    /// Set logging level (trace, debug, info, warn, error)
    #[arg(long, global = true, value_name = "LEVEL")]
    log_level: Option<LogLevel>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct SceneArgs {
    /// Scene file (YAML); the built-in seed scene is used when omitted
    #[arg(short, long)]
    scene: Option<PathBuf>,

    /// Skip shadow rays
    #[arg(long)]
    no_shadows: bool,

    /// Skip specular highlights
    #[arg(long)]
    no_specular: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a frame to a PNG file
    Render {
        #[command(flatten)]
        scene: SceneArgs,
        #[arg(long, default_value_t = DEFAULT_WIDTH)]
        width: u32,
        #[arg(long, default_value_t = DEFAULT_HEIGHT)]
        height: u32,
        /// Output PNG path
        #[arg(short, long, default_value = "render.png")]
        output: PathBuf,
        /// Render on a single thread
        #[arg(long)]
        sequential: bool,
    },

    /// Print a grayscale text preview
    Ascii {
        #[command(flatten)]
        scene: SceneArgs,
        #[arg(long, default_value_t = 80)]
        width: u32,
        #[arg(long, default_value_t = 40)]
        height: u32,
    },

    /// Validate a scene file
    CheckScene {
        path: PathBuf,
    },

    /// Print the built-in seed scene as YAML
    SeedScene,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level_filter = if let Some(level) = cli.log_level {
        level.to_string()
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"))
            .to_string()
    };

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&level_filter))
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Render {
            scene,
            width,
            height,
            output,
            sequential,
        } => {
            let scene = load_scene(&scene)?;
            render_png(&scene, width, height, &output, !sequential)?;
        }
        Commands::Ascii { scene, width, height } => {
            let scene = load_scene(&scene)?;
            let mut renderer = Renderer::new(width, height);
            print!("{}", renderer.render(&scene).to_ascii());
        }
        Commands::CheckScene { path } => {
            check_scene(&path)?;
        }
        Commands::SeedScene => {
            print!("{}", SceneConfig::default().to_yaml()?);
        }
    }

    Ok(())
}

/// Build the scene from a file or the seed scene, then apply CLI overrides
fn load_scene(args: &SceneArgs) -> anyhow::Result<Scene> {
    if let Some(path) = &args.scene {
        tracing::info!("Loading scene from {:?}", path);
    }

    let config = SceneConfig::load_or_default(args.scene.as_deref())
        .context("Failed to load scene")?;
    let mut scene = config.to_scene().context("Failed to build scene")?;

    let mut options = scene.options();
    if args.no_shadows {
        options.shadows = false;
    }
    if args.no_specular {
        options.specular = false;
    }
    scene.set_options(options);

    Ok(scene)
}

fn render_png(
    scene: &Scene,
    width: u32,
    height: u32,
    output: &Path,
    parallel: bool,
) -> anyhow::Result<()> {
    anyhow::ensure!(width > 0 && height > 0, "Frame size must be positive, got {width}x{height}");

    let start = Instant::now();
    let mut renderer = Renderer::new(width, height).with_parallel(parallel);
    let buffer = renderer.render(scene);
    tracing::info!(
        width,
        height,
        parallel,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Frame rendered"
    );

    buffer
        .save_png(output)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    tracing::info!("Wrote {}", output.display());

    Ok(())
}

fn check_scene(path: &Path) -> anyhow::Result<()> {
    let config = SceneConfig::from_file(path)?;
    let scene = config.to_scene()?;
    let viewport = scene.viewport();
    let origin = scene.camera_origin();

    println!("✓ Scene file is valid\n");
    println!("Camera: ({}, {}, {})", origin.x, origin.y, origin.z);
    println!(
        "Viewport: {} x {} at distance {}",
        viewport.width(),
        viewport.height(),
        viewport.distance()
    );
    println!(
        "Shadows: {}  Specular: {}",
        scene.options().shadows,
        scene.options().specular
    );
    println!("\nSpheres: {}", scene.spheres().len());
    for sphere in scene.spheres() {
        let c = sphere.center();
        let color = sphere.color();
        let specular = sphere
            .specular()
            .map_or_else(|| "none".to_string(), |s| s.to_string());
        println!(
            "  center ({}, {}, {})  radius {}  color #{:02x}{:02x}{:02x}  specular {}",
            c.x, c.y, c.z, sphere.radius(), color.r, color.g, color.b, specular
        );
    }
    println!("\nLights: {}", scene.lights().len());
    for light in scene.lights() {
        println!("  {:?}", light);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_render() {
        let cli = Cli::try_parse_from(["sphere-rt", "render", "--width", "64", "--no-shadows"]).unwrap();
        match cli.command {
            Commands::Render { scene, width, height, .. } => {
                assert_eq!(width, 64);
                assert_eq!(height, DEFAULT_HEIGHT);
                assert!(scene.no_shadows);
                assert!(scene.scene.is_none());
            }
            _ => panic!("expected render"),
        }
    }

    #[test]
    fn test_load_scene_applies_overrides() {
        let args = SceneArgs { scene: None, no_shadows: true, no_specular: true };
        let scene = load_scene(&args).unwrap();
        assert!(!scene.options().shadows);
        assert!(!scene.options().specular);
        assert_eq!(scene.spheres().len(), 4);
    }

    #[test]
    fn test_render_png_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.png");
        render_png(&Scene::seed(), 16, 16, &output, true).unwrap();
        assert!(output.exists());
        assert!(render_png(&Scene::seed(), 0, 16, &output, true).is_err());
    }
}
