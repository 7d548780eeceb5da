use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use motes::{render_headless, FieldConfig, HeadlessOptions, SimulationError, Vec2};
use tracing::{error, info};

/// Rising motes particle field.
#[derive(Parser, Debug)]
#[command(name = "motes", version, about)]
struct Cli {
    /// JSON config file; missing fields use defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the particle count.
    #[arg(long)]
    count: Option<u32>,

    /// Fix the random seed.
    #[arg(long)]
    seed: Option<u64>,

    #[arg(long, default_value_t = 1280)]
    width: u32,

    #[arg(long, default_value_t = 720)]
    height: u32,

    /// Render this many frames offscreen instead of opening a window.
    #[arg(long, value_name = "FRAMES", requires = "out")]
    headless: Option<u32>,

    /// PNG output path for headless mode.
    #[arg(long, requires = "headless")]
    out: Option<PathBuf>,

    /// Hold the pointer at `x,y` during a headless render.
    #[arg(long, value_parser = parse_point)]
    pointer: Option<Vec2>,
}

fn parse_point(s: &str) -> Result<Vec2, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected `x,y`, got `{s}`"))?;
    let x = x.trim().parse::<f32>().map_err(|e| e.to_string())?;
    let y = y.trim().parse::<f32>().map_err(|e| e.to_string())?;
    Ok(Vec2::new(x, y))
}

fn run(cli: Cli) -> Result<(), SimulationError> {
    let mut config = match &cli.config {
        Some(path) => FieldConfig::load(path)?,
        None => FieldConfig::default(),
    };
    if let Some(count) = cli.count {
        config.particle_count = count;
    }
    if let Some(seed) = cli.seed {
        config.seed = Some(seed);
    }

    match (cli.headless, cli.out) {
        (Some(frames), Some(out)) => {
            let options = HeadlessOptions {
                width: cli.width,
                height: cli.height,
                frames,
                pointer: cli.pointer,
                ..Default::default()
            };
            if let Some(surface) = render_headless(config, &options) {
                surface.save_png(&out)?;
                info!(path = %out.display(), "wrote frame");
            }
            Ok(())
        }
        _ => motes::window::run(config, cli.width, cli.height),
    }
}

fn main() -> ExitCode {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
