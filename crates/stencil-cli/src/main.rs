//! stencil: score an image for stencil suitability and export a scaled
//! SVG stencil.
//!
//! # Usage
//!
//! ```text
//! cargo run --release --bin stencil -- [OPTIONS] <IMAGE_PATH>
//! ```

#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use stencil_pipeline::StencilConfig;
use tracing::{debug, error, info, level_filters::LevelFilter};

/// Score an image for stencil suitability and export a stencil SVG.
///
/// Prints a rating, a per-criterion breakdown and recommendations, then
/// writes the bounding-box stencil scaled to the requested width.
#[derive(Parser)]
#[command(name = "stencil", version)]
struct Cli {
    /// Path to the input image (PNG, JPEG, BMP, WebP).
    image_path: PathBuf,

    /// Physical stencil width in inches (1-20).
    #[arg(long, default_value_t = StencilConfig::DEFAULT_WIDTH_INCHES)]
    width: f64,

    /// Full stencil config as a JSON string.
    ///
    /// When provided, `--width` is ignored.
    #[arg(long)]
    config_json: Option<String>,

    /// Where to write the stencil SVG.
    ///
    /// Defaults to `stencil_{width}inch.svg` in the current directory.
    #[arg(long)]
    svg: Option<PathBuf>,

    /// Only analyze; do not create a stencil.
    #[arg(long, conflicts_with = "svg")]
    no_stencil: bool,

    /// Print the analysis as JSON instead of a human-readable report.
    #[arg(long)]
    json: bool,

    /// Log debug detail (individual scores, bounding box).
    #[arg(short, long)]
    verbose: bool,
}

/// Build a [`StencilConfig`] from CLI arguments.
///
/// If `--config-json` is provided, the JSON is parsed directly and
/// `--width` is ignored.
fn config_from_cli(cli: &Cli) -> Result<StencilConfig, String> {
    if let Some(ref json) = cli.config_json {
        return serde_json::from_str(json).map_err(|e| format!("Error parsing --config-json: {e}"));
    }
    Ok(StencilConfig {
        width_inches: cli.width,
    })
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let config = match config_from_cli(&cli) {
        Ok(c) => c,
        Err(msg) => {
            error!("{msg}");
            return ExitCode::FAILURE;
        }
    };

    // Reject a bad width before reading or decoding anything.
    if !cli.no_stencil
        && let Err(e) = config.validate()
    {
        error!("{e}");
        return ExitCode::FAILURE;
    }
    debug!(?config, "configuration");

    let image_bytes = match std::fs::read(&cli.image_path) {
        Ok(bytes) => bytes,
        Err(e) => {
            error!("Error reading {}: {e}", cli.image_path.display());
            return ExitCode::FAILURE;
        }
    };
    info!(
        "Image: {} ({} bytes)",
        cli.image_path.display(),
        image_bytes.len()
    );

    let buffer = match stencil_pipeline::decode(&image_bytes) {
        Ok(buffer) => buffer,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let analysis = stencil_pipeline::analyze(&buffer);
    if cli.json {
        match serde_json::to_string_pretty(&analysis) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                error!("Error serializing analysis: {e}");
                return ExitCode::FAILURE;
            }
        }
    } else {
        print!("{}", analysis.report());
    }

    if cli.no_stencil {
        return ExitCode::SUCCESS;
    }

    let artifact = match stencil_export::create_stencil(&buffer, &config) {
        Ok(artifact) => artifact,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };
    let svg_path = cli
        .svg
        .clone()
        .unwrap_or_else(|| PathBuf::from(&artifact.filename_hint));
    match std::fs::write(&svg_path, &artifact.svg_content) {
        Ok(()) => {
            info!(
                "SVG written to {} ({} bytes, {} in wide)",
                svg_path.display(),
                artifact.svg_content.len(),
                artifact.width_inches,
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Error writing SVG to {}: {e}", svg_path.display());
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("stencil").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn width_defaults_to_config_default() {
        let cli = parse(&["image.png"]);
        assert_eq!(config_from_cli(&cli).unwrap(), StencilConfig::default());
    }

    #[test]
    fn width_flag_sets_config() {
        let cli = parse(&["image.png", "--width", "12.5"]);
        let config = config_from_cli(&cli).unwrap();
        assert!((config.width_inches - 12.5).abs() < f64::EPSILON);
    }

    #[test]
    fn config_json_overrides_width_flag() {
        let cli = parse(&[
            "image.png",
            "--width",
            "3",
            "--config-json",
            r#"{"width_inches": 7}"#,
        ]);
        let config = config_from_cli(&cli).unwrap();
        assert!((config.width_inches - 7.0).abs() < f64::EPSILON);
    }

    #[test]
    fn malformed_config_json_is_reported() {
        let cli = parse(&["image.png", "--config-json", "{"]);
        let err = config_from_cli(&cli).unwrap_err();
        assert!(err.starts_with("Error parsing --config-json"));
    }

    #[test]
    fn no_stencil_conflicts_with_svg() {
        let result = Cli::try_parse_from(["stencil", "a.png", "--no-stencil", "--svg", "out.svg"]);
        assert!(result.is_err());
    }
}
