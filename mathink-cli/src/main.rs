//! # Mathink
//!
//! Command-line entry point.

use anyhow::Context;
use clap::Parser;
use mathink_cli::{load_drawing, resolve_format, CliArgs, CliConfig, Command};
use mathink_client::{CapturePipeline, MathApiClient, Solution};
use mathink_renderer::{
    load_encoded, preprocess_photo, DrawingExporter, ExportService, ImageFormat, PreprocessConfig,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,mathink=debug"));

    // Logs go to stderr so command output stays pipeable.
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true);

    // Use JSON format when RUST_LOG_FORMAT=json
    if std::env::var("RUST_LOG_FORMAT").as_deref() == Ok("json") {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer.json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let args = CliArgs::parse();
    let config = CliConfig::from(&args);
    tracing::debug!("Config: {:?}", config);

    match args.command {
        Command::Export {
            input,
            output,
            format,
        } => {
            let drawing = load_drawing(&input)?;
            let format = resolve_format(format, &output);
            let exporter = DrawingExporter::new(config.export_config(format));
            let exported = exporter
                .export(&drawing)
                .context("failed to export drawing")?;
            for warning in &exported.warnings {
                tracing::warn!("{warning}");
            }
            std::fs::write(&output, &exported.image.bytes)
                .with_context(|| format!("failed to write {}", output.display()))?;
            tracing::info!(
                "Wrote {}x{} {} to {}",
                exported.image.width,
                exported.image.height,
                exported.image.format,
                output.display()
            );
        }
        Command::Recognize { image, preprocess } => {
            let client = MathApiClient::new(config.require_api_url()?)?;
            let bytes = std::fs::read(&image)
                .with_context(|| format!("failed to read {}", image.display()))?;
            let upload = if preprocess {
                preprocess_photo(&bytes, &PreprocessConfig::default())?
            } else {
                load_encoded(bytes)?
            };
            let recognition = client
                .recognize(&upload)
                .await
                .map_err(|e| anyhow::anyhow!(e.user_message()))?;
            println!("{}", recognition.equation);
        }
        Command::Solve { equation, query } => {
            let client = MathApiClient::new(config.require_api_url()?)?;
            let solution = client
                .solve(&equation, &query)
                .await
                .map_err(|e| anyhow::anyhow!(e.user_message()))?;
            print_solution(&solution);
        }
        Command::DrawSolve { input, query } => {
            let drawing = load_drawing(&input)?;
            let pipeline = CapturePipeline::new(
                ExportService::new(config.export_config(ImageFormat::Png)),
                MathApiClient::new(config.require_api_url()?)?,
            );
            let result = pipeline
                .solve_drawing(&drawing, &query)
                .await
                .map_err(|e| anyhow::anyhow!(e.user_message()))?;
            println!("Equation: {}", result.recognition.equation);
            print_solution(&result.solution);
        }
    }

    Ok(())
}

fn print_solution(solution: &Solution) {
    if solution.is_empty() {
        println!("No solution returned.");
        return;
    }
    for (i, step) in solution.steps.iter().enumerate() {
        println!("{}. {}", i + 1, step);
    }
    if !solution.answer.is_empty() {
        println!("Answer: {}", solution.answer);
    }
}
