use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::Config;
use crate::error::{Result, TelopError};
use crate::subtitle::SubtitleFormat;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Style overrides applied on top of the configuration file
#[derive(ClapArgs, Debug, Default, Clone)]
pub struct StyleArgs {
    /// Font name used by the ASS style
    #[arg(long)]
    pub font: Option<String>,

    /// Font size (10-100)
    #[arg(long)]
    pub font_size: Option<u32>,

    /// Text color as #RRGGBB
    #[arg(long)]
    pub color: Option<String>,

    /// Outline color as #RRGGBB
    #[arg(long)]
    pub outline_color: Option<String>,

    /// Outline width (0-10)
    #[arg(long)]
    pub outline_width: Option<u32>,

    /// Shadow depth
    #[arg(long)]
    pub shadow: Option<u32>,

    /// Subtitle position: bottom, middle, top
    #[arg(long)]
    pub position: Option<String>,

    /// Vertical margin (0-200)
    #[arg(long)]
    pub margin_v: Option<u32>,

    /// Formats to write (comma-separated: srt,ass)
    #[arg(long)]
    pub format: Option<String>,
}

impl StyleArgs {
    /// Overwrite the configured style and formats with any flags given
    pub fn apply_to(&self, config: &mut Config) -> Result<()> {
        let style = &mut config.style;
        if let Some(font) = &self.font {
            style.font_name = font.clone();
        }
        if let Some(size) = self.font_size {
            style.font_size = size;
        }
        if let Some(color) = &self.color {
            style.primary_color = color.clone();
        }
        if let Some(color) = &self.outline_color {
            style.outline_color = color.clone();
        }
        if let Some(width) = self.outline_width {
            style.outline_width = width;
        }
        if let Some(shadow) = self.shadow {
            style.shadow_depth = shadow;
        }
        if let Some(position) = &self.position {
            style.position = position.parse()?;
        }
        if let Some(margin) = self.margin_v {
            style.margin_v = margin;
        }
        if let Some(formats) = &self.format {
            config.output.formats = parse_formats(formats)?;
        }
        Ok(())
    }
}

fn parse_formats(formats: &str) -> Result<Vec<SubtitleFormat>> {
    let mut parsed = Vec::new();
    for format in formats.split(',').map(str::trim).filter(|f| !f.is_empty()) {
        let format: SubtitleFormat = format.parse()?;
        if !parsed.contains(&format) {
            parsed.push(format);
        }
    }

    if parsed.is_empty() {
        return Err(TelopError::Config("At least one output format is required".to_string()));
    }
    Ok(parsed)
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render a transcript JSON file to SRT and ASS subtitles
    Render {
        /// Input transcript (whisper JSON, whisper.cpp JSON, or a segment array)
        #[arg(short, long)]
        input: PathBuf,

        /// Output directory (defaults to the transcript's directory)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        #[command(flatten)]
        style: StyleArgs,
    },

    /// Render every transcript JSON file in a directory
    Batch {
        /// Directory containing transcript JSON files
        #[arg(short, long)]
        input_dir: PathBuf,

        /// Output directory (defaults to the input directory)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        #[command(flatten)]
        style: StyleArgs,
    },

    /// Convert a web color (#RRGGBB) to an ASS color token
    Color {
        /// Color to convert
        hex: String,
    },

    /// Format a time offset in seconds as SRT and ASS timestamps
    Timestamp {
        /// Offset in seconds
        #[arg(allow_negative_numbers = true)]
        seconds: f64,
    },

    /// List the font presets
    Fonts,

    /// Write a configuration file populated with the defaults
    InitConfig {
        /// Destination path
        #[arg(short, long, default_value = "telop.toml")]
        output: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}
