//! sleepline: render a night of per-minute sleep stages as a ribbon chart.
//!
//! Reads a sample string (one digit per minute: `4` awake, `2` REM,
//! `1` core, `0` deep, `3` insomnia), composes the chart and writes an
//! SVG document and, optionally, a PNG preview.
//!
//! # Usage
//!
//! ```text
//! cargo run --bin sleepline -- --input assets/samples/2021-04-03.txt \
//!     --start "2021-04-03 15:55:00" --output night.svg --png night.png
//! ```
//!
//! Logging goes to stderr and follows `RUST_LOG`; without it, `-v`
//! enables info and `-vv` debug output.

#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{ArgAction, Parser};
use sleepline_chart::{ChartConfig, Scene, parse_samples, parse_timestamp, render_scene};
use tracing_subscriber::EnvFilter;

/// Render a sleep-stage ribbon chart from per-minute samples.
#[derive(Parser)]
#[command(name = "sleepline", version)]
struct Cli {
    /// Sample digits, one per minute. Use `--input` to read them from a file.
    #[arg(conflicts_with = "input")]
    samples: Option<String>,

    /// Read samples from a file, or `-` for stdin. Whitespace is ignored.
    #[arg(long, short)]
    input: Option<PathBuf>,

    /// Sleep start, e.g. "2021-04-03 15:55:00".
    #[arg(long)]
    start: String,

    /// Write the SVG here instead of stdout.
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Also write a PNG preview (text labels are not rasterized).
    #[arg(long)]
    png: Option<PathBuf>,

    /// Horizontal scroll offset in pixels; clamped to the content.
    #[arg(long, default_value_t = 0.0)]
    scroll: f64,

    /// Chart configuration as a JSON file.
    #[arg(long, conflicts_with = "config_json")]
    config: Option<PathBuf>,

    /// Chart configuration as a JSON string.
    #[arg(long)]
    config_json: Option<String>,

    /// Viewport width in pixels.
    #[arg(long)]
    width: Option<f64>,

    /// Bar width per minute in pixels.
    #[arg(long)]
    bar_width: Option<f64>,

    /// Gap between bars in pixels.
    #[arg(long)]
    gap: Option<f64>,

    /// Minutes between time ticks.
    #[arg(long, value_parser = clap::builder::RangedU64ValueParser::<u32>::new().range(1..))]
    tick_interval: Option<u32>,

    /// Print the render summary as JSON.
    #[arg(long)]
    summary: bool,

    /// Increase log verbosity (-v info, -vv debug).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

/// Build a [`ChartConfig`] from `--config`/`--config-json`, then apply the
/// individual overrides on top.
fn config_from_cli(cli: &Cli) -> Result<ChartConfig, String> {
    let mut config: ChartConfig = if let Some(ref json) = cli.config_json {
        serde_json::from_str(json).map_err(|e| format!("Error parsing --config-json: {e}"))?
    } else if let Some(ref path) = cli.config {
        let text = std::fs::read_to_string(path)
            .map_err(|e| format!("Error reading {}: {e}", path.display()))?;
        serde_json::from_str(&text).map_err(|e| format!("Error parsing {}: {e}", path.display()))?
    } else {
        ChartConfig::default()
    };

    if let Some(width) = cli.width {
        config.width = width;
    }
    if let Some(bar_width) = cli.bar_width {
        config.bar_width = bar_width;
    }
    if let Some(gap) = cli.gap {
        config.gap = gap;
    }
    if let Some(tick_interval) = cli.tick_interval {
        config.tick_interval = tick_interval;
    }
    Ok(config)
}

fn read_samples(cli: &Cli) -> Result<String, String> {
    match (&cli.samples, &cli.input) {
        (Some(samples), _) => Ok(samples.clone()),
        (None, Some(path)) if path == Path::new("-") => {
            io::read_to_string(io::stdin()).map_err(|e| format!("Error reading stdin: {e}"))
        }
        (None, Some(path)) => std::fs::read_to_string(path)
            .map_err(|e| format!("Error reading {}: {e}", path.display())),
        (None, None) => Err("No samples given: pass SAMPLES or --input".to_owned()),
    }
}

fn write_png(scene: &Scene, path: &Path) -> Result<(), String> {
    let png = sleepline_export::to_png(scene).map_err(|e| format!("PNG export error: {e}"))?;
    std::fs::write(path, &png)
        .map_err(|e| format!("Error writing PNG to {}: {e}", path.display()))?;
    tracing::info!(path = %path.display(), bytes = png.len(), "wrote PNG");
    Ok(())
}

fn run(cli: &Cli) -> Result<(), String> {
    let config = config_from_cli(cli)?;
    let raw = read_samples(cli)?;
    let samples = parse_samples(&raw).map_err(|e| format!("Error parsing samples: {e}"))?;
    let start = parse_timestamp(&cli.start).map_err(|e| format!("Error parsing --start: {e}"))?;

    let scene = render_scene(&samples, start, &config, cli.scroll)
        .map_err(|e| format!("Render error: {e}"))?;
    tracing::info!(
        blocks = scene.summary.blocks,
        connectors = scene.summary.connectors,
        "rendered chart"
    );

    let svg = sleepline_export::to_svg(&scene);
    let svg_on_stdout = cli.output.is_none() && cli.png.is_none();
    if let Some(ref path) = cli.output {
        std::fs::write(path, &svg)
            .map_err(|e| format!("Error writing SVG to {}: {e}", path.display()))?;
        tracing::info!(path = %path.display(), bytes = svg.len(), "wrote SVG");
    } else if svg_on_stdout {
        print!("{svg}");
    }

    if let Some(ref path) = cli.png {
        write_png(&scene, path)?;
    }

    if cli.summary {
        let json = serde_json::to_string_pretty(&scene.summary)
            .map_err(|e| format!("Error serializing summary: {e}"))?;
        // Keep stdout a valid SVG document when it carries one.
        if svg_on_stdout {
            eprintln!("{json}");
        } else {
            println!("{json}");
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(msg) => {
            eprintln!("{msg}");
            ExitCode::FAILURE
        }
    }
}
