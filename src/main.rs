//! Render a sphere scene to a PNG
use std::path::PathBuf;

use clap::Parser;
use whitted_tracer::prelude::*;

/// Whitted-style ray tracer
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// YAML render config. Without one the built-in emerald/copper scene is used.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output image, overrides the config
    #[arg(short, long)]
    output: Option<PathBuf>,

    #[arg(long)]
    width: Option<u32>,

    #[arg(long)]
    height: Option<u32>,

    /// Reflection/refraction bounces per primary ray
    #[arg(short, long)]
    depth: Option<u32>,

    /// Worker threads, defaults to one per core
    #[arg(short = 'j', long)]
    threads: Option<usize>,

    #[arg(long)]
    no_progress: bool,

    /// Print the effective config as YAML and exit
    #[arg(long)]
    dump_config: bool,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<(), Error> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => RenderConfig::default(),
    };
    if let Some(output) = args.output {
        config.output = output;
    }
    if let Some(width) = args.width {
        config.width = width;
    }
    if let Some(height) = args.height {
        config.height = height;
    }
    if let Some(depth) = args.depth {
        config.depth = depth;
    }
    config.validate()?;

    if args.dump_config {
        print!("{}", serde_yaml::to_string(&config).map_err(ConfigError::from)?);
        return Ok(());
    }

    if let Some(threads) = args.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()?;
    }

    let camera = Camera::from_config(config.camera.clone());
    let scene = Scene::from_config(config.scene.clone());
    let framebuffer = render(&scene, &camera, &config.settings(!args.no_progress));

    framebuffer.to_image().save(&config.output)?;
    tracing::info!(path = %config.output.display(), "wrote image");
    Ok(())
}
