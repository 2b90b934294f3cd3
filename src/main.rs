//! Telop - subtitle document generator
//!
//! Command line entry point: renders transcript JSON files into SRT and
//! styled ASS subtitles.

use anyhow::Result;
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use tracing_appender::{non_blocking, rolling};

use telop::cli::{Args, Commands};
use telop::color::hex_to_ass_color;
use telop::config::{Config, FONT_PRESETS};
use telop::error::TelopError;
use telop::timestamp::{format_ass_timestamp, format_srt_timestamp};
use telop::workflow::Workflow;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Setup logging to both console and file
    setup_logging(args.verbose)?;

    // Load configuration
    let mut config = match &args.config {
        Some(config_path) => Config::from_file(config_path)?,
        None => {
            if std::path::Path::new("telop.toml").exists() {
                info!("Found telop.toml in current directory, loading...");
                Config::from_file("telop.toml")?
            } else {
                Config::default()
            }
        }
    };

    match args.command {
        Commands::Render { input, output_dir, style } => {
            info!("Rendering transcript: {}", input.display());

            // Command line flags take precedence over the config file
            style.apply_to(&mut config)?;
            let workflow = Workflow::new(config)?;
            log_style(&workflow);

            let written = workflow.render_file(&input, output_dir.as_ref()).await?;
            for path in written {
                println!("{}", path.display());
            }
        }
        Commands::Batch { input_dir, output_dir, style } => {
            info!("Rendering directory: {}", input_dir.display());

            style.apply_to(&mut config)?;
            let workflow = Workflow::new(config)?;
            log_style(&workflow);

            let written = workflow.render_directory(&input_dir, output_dir.as_ref()).await?;
            println!("Wrote {} subtitle files", written.len());
        }
        Commands::Color { hex } => {
            println!("{}", hex_to_ass_color(&hex));
        }
        Commands::Timestamp { seconds } => {
            println!("SRT: {}", format_srt_timestamp(seconds)?);
            println!("ASS: {}", format_ass_timestamp(seconds)?);
        }
        Commands::Fonts => {
            println!("{:<25} {:<15}", "Label", "Font");
            println!("{}", "-".repeat(40));
            for (label, font) in FONT_PRESETS {
                println!("{:<25} {:<15}", label, font);
            }
        }
        Commands::InitConfig { output, force } => {
            if output.exists() && !force {
                return Err(TelopError::Config(format!(
                    "{} already exists (use --force to overwrite)",
                    output.display()
                ))
                .into());
            }
            config.save_to_file(&output)?;
            println!("{}", output.display());
            info!("Wrote configuration to {}", output.display());
        }
    }

    Ok(())
}

/// Log the resolved ASS style
fn log_style(workflow: &Workflow) {
    let style = workflow.style();
    info!("Style: font {} {}pt, color {}, outline {} x{}, shadow {}, alignment {}, margin {}",
          style.font_name, style.font_size, style.primary_color, style.outline_color,
          style.outline_width, style.shadow_depth, style.alignment, style.margin_v);
}

/// Setup logging to both console and file
fn setup_logging(verbose: bool) -> Result<()> {
    // Create log directory
    let log_dir = std::env::current_dir()?.join(".telop").join("log");
    std::fs::create_dir_all(&log_dir)?;

    // Set up file appender with daily rotation
    let file_appender = rolling::daily(&log_dir, "telop.log");
    let (non_blocking_file, guard) = non_blocking(file_appender);
    // Keep the guard alive for the duration of the program
    std::mem::forget(guard);

    // Determine log level
    let log_level = if verbose { Level::DEBUG } else { Level::INFO };

    // Create console layer; stdout is reserved for command output
    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_file(true)
        .with_line_number(true);

    // Create file layer
    let file_layer = fmt::layer()
        .with_writer(non_blocking_file)
        .with_target(false)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .with_ansi(false);

    // Setup layered subscriber
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    info!("Logging initialized - console: {}, file: {}",
          log_level, log_dir.join("telop.log").display());

    Ok(())
}
