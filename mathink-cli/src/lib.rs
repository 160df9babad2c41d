//! # Mathink CLI
//!
//! Command-line host for the drawing export and equation services.
//!
//! ## Usage
//!
//! ```bash
//! mathink export --input drawing.json --output equation.png
//! mathink recognize --image photo.jpg --preprocess
//! mathink solve --equation "2x + 3 = 7"
//! mathink draw-solve --input gestures.json
//! ```
//!
//! Network commands read the service root from `--api-url` or
//! `MATHINK_API_URL`.
//!
//! ## Architecture
//!
//! - `CliArgs` - Command-line arguments parsed with clap
//! - `CliConfig` - Resolved configuration used by the commands
//! - `load_drawing` - Reads a drawing or a gesture log from JSON

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use mathink_core::{Drawing, GestureLog, StrokeRecorder};
use mathink_renderer::{ExportConfig, ImageFormat};

/// Default side of the exported square image.
pub const DEFAULT_EXPORT_SIZE: u32 = 400;

/// Command-line arguments for mathink.
#[derive(Debug, Clone, Parser)]
#[command(name = "mathink")]
#[command(about = "Export handwritten equations and solve them")]
#[command(version)]
pub struct CliArgs {
    /// Root URL of the recognition and solver services
    #[arg(long, global = true, env = "MATHINK_API_URL")]
    pub api_url: Option<String>,

    /// Side of the exported square image in pixels
    #[arg(
        long = "size",
        global = true,
        env = "MATHINK_EXPORT_SIZE",
        default_value_t = DEFAULT_EXPORT_SIZE
    )]
    pub export_size: u32,

    /// Command to run
    #[command(subcommand)]
    pub command: Command,
}

/// Output encoding for `export`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// PNG (lossless).
    Png,
    /// JPEG on a white background.
    Jpeg,
}

impl From<OutputFormat> for ImageFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Png => Self::Png,
            OutputFormat::Jpeg => Self::Jpeg,
        }
    }
}

/// Subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Rasterize a drawing to an image file
    Export {
        /// Drawing or gesture log JSON
        #[arg(long)]
        input: PathBuf,
        /// Destination image file
        #[arg(long)]
        output: PathBuf,
        /// Image format; inferred from the output extension when omitted
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,
    },
    /// Send an image to the recognizer
    Recognize {
        /// Image file (PNG or JPEG)
        #[arg(long)]
        image: PathBuf,
        /// Center-crop and resize a camera photo before upload
        #[arg(long)]
        preprocess: bool,
    },
    /// Ask the solver for a step-by-step solution
    Solve {
        /// Equation text
        #[arg(long)]
        equation: String,
        /// Instruction for the solver
        #[arg(long, default_value = mathink_client::DEFAULT_QUERY)]
        query: String,
    },
    /// Export a drawing, recognize it, then solve it
    DrawSolve {
        /// Drawing or gesture log JSON
        #[arg(long)]
        input: PathBuf,
        /// Instruction for the solver
        #[arg(long, default_value = mathink_client::DEFAULT_QUERY)]
        query: String,
    },
}

/// Resolved configuration.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Service root, if configured.
    pub api_url: Option<String>,
    /// Side of the exported square image.
    pub export_size: u32,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            api_url: None,
            export_size: DEFAULT_EXPORT_SIZE,
        }
    }
}

impl From<&CliArgs> for CliConfig {
    fn from(args: &CliArgs) -> Self {
        Self {
            api_url: args.api_url.clone().filter(|url| !url.trim().is_empty()),
            export_size: args.export_size,
        }
    }
}

impl CliConfig {
    /// Export configuration for a square image in `format`.
    #[must_use]
    pub fn export_config(&self, format: ImageFormat) -> ExportConfig {
        ExportConfig {
            width: self.export_size,
            height: self.export_size,
            format,
            ..ExportConfig::default()
        }
    }

    /// The service root, or an error naming how to set it.
    ///
    /// # Errors
    ///
    /// Returns an error when no API URL is configured.
    pub fn require_api_url(&self) -> anyhow::Result<&str> {
        self.api_url.as_deref().ok_or_else(|| {
            anyhow::anyhow!("No API URL configured (use --api-url or MATHINK_API_URL)")
        })
    }
}

/// Pick the export format from an explicit choice or the output extension.
#[must_use]
pub fn resolve_format(explicit: Option<OutputFormat>, output: &Path) -> ImageFormat {
    explicit.map_or_else(
        || {
            output
                .extension()
                .and_then(|ext| ext.to_str())
                .and_then(ImageFormat::from_extension)
                .unwrap_or_default()
        },
        ImageFormat::from,
    )
}

/// Parse a drawing from JSON.
///
/// Accepts either a serialized [`Drawing`] or a [`GestureLog`], which is
/// replayed through a default [`StrokeRecorder`].
///
/// # Errors
///
/// Returns an error if the text is neither format.
pub fn parse_drawing(json: &str) -> anyhow::Result<Drawing> {
    if let Ok(drawing) = Drawing::from_json(json) {
        return Ok(drawing);
    }
    let log = GestureLog::from_json(json)
        .context("input is neither a drawing nor a gesture log")?;

    let mut drawing = Drawing::new();
    let mut recorder = StrokeRecorder::new();
    let commits = recorder.replay(&mut drawing, &log.events);
    tracing::debug!(
        "Replayed {} events into {} strokes",
        log.events.len(),
        commits
    );
    Ok(drawing)
}

/// Read and parse a drawing file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_drawing(path: &Path) -> anyhow::Result<Drawing> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    parse_drawing(&json).with_context(|| format!("failed to parse {}", path.display()))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_parse_drawing_json() {
        let json = r##"[{"points":[{"x":0,"y":0},{"x":5,"y":5}],"color":"#000000","width":3.0}]"##;
        let drawing = parse_drawing(json).expect("drawing");
        assert_eq!(drawing.len(), 1);
    }

    #[test]
    fn test_parse_gesture_log() {
        let json = r#"[
            {"phase":"start","touches":[{"x":0,"y":0}],"timestamp_ms":0},
            {"phase":"move","touches":[{"x":10,"y":0}],"timestamp_ms":16},
            {"phase":"end","touches":[],"timestamp_ms":32},
            {"phase":"start","touches":[{"x":50,"y":50}],"timestamp_ms":48},
            {"phase":"end","touches":[],"timestamp_ms":64}
        ]"#;
        let drawing = parse_drawing(json).expect("gesture log");
        // The second gesture is a tap and never commits.
        assert_eq!(drawing.len(), 1);
        assert_eq!(drawing.strokes()[0].len(), 11);
    }

    #[test]
    fn test_parse_rejects_other_json() {
        assert!(parse_drawing(r#"{"hello":"world"}"#).is_err());
        assert!(parse_drawing("not json").is_err());
    }

    #[test]
    fn test_load_drawing_from_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, "[]").expect("write");
        let drawing = load_drawing(file.path()).expect("load");
        assert!(drawing.is_empty());

        let missing = load_drawing(Path::new("/definitely/not/here.json"));
        assert!(missing.is_err());
    }

    #[test]
    fn test_resolve_format() {
        assert_eq!(resolve_format(None, Path::new("out.jpg")), ImageFormat::Jpeg);
        assert_eq!(resolve_format(None, Path::new("out.png")), ImageFormat::Png);
        assert_eq!(resolve_format(None, Path::new("out")), ImageFormat::Png);
        assert_eq!(
            resolve_format(Some(OutputFormat::Jpeg), Path::new("out.png")),
            ImageFormat::Jpeg
        );
    }

    #[test]
    fn test_config_from_args() {
        let args = CliArgs::parse_from([
            "mathink",
            "--api-url",
            "http://localhost:8000",
            "solve",
            "--equation",
            "x=1",
        ]);
        let config = CliConfig::from(&args);
        assert_eq!(config.require_api_url().expect("url"), "http://localhost:8000");

        let export = config.export_config(ImageFormat::Png);
        assert_eq!((export.width, export.height), (config.export_size, config.export_size));

        match args.command {
            Command::Solve { equation, query } => {
                assert_eq!(equation, "x=1");
                assert_eq!(query, mathink_client::DEFAULT_QUERY);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_missing_api_url() {
        let config = CliConfig::default();
        assert!(config.require_api_url().is_err());
    }

    #[test]
    fn test_size_flag() {
        let args = CliArgs::parse_from([
            "mathink", "export", "--input", "a.json", "--output", "b.png", "--size", "256",
        ]);
        assert_eq!(CliConfig::from(&args).export_size, 256);
    }
}
