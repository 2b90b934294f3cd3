use serde::{Deserialize, Serialize};
use std::path::Path;
use crate::color::hex_to_ass_color;
use crate::error::{Result, TelopError};
use crate::style::{Alignment, StyleConfig};
use crate::subtitle::SubtitleFormat;

/// Fonts offered by the style picker: (label, font name)
pub const FONT_PRESETS: &[(&str, &str)] = &[
    ("MS Gothic (standard)", "MS Gothic"),
    ("MS Mincho (serif)", "MS Mincho"),
    ("Meiryo", "Meiryo"),
    ("Yu Gothic", "Yu Gothic"),
    ("Arial (latin text)", "Arial"),
];

fn default_font_name() -> String {
    "MS Gothic".to_string()
}

fn default_font_size() -> u32 {
    40
}

fn default_primary_color() -> String {
    "#FFFFFF".to_string()
}

fn default_outline_color() -> String {
    "#000000".to_string()
}

fn default_outline_width() -> u32 {
    2
}

fn default_margin_v() -> u32 {
    20
}

fn default_formats() -> Vec<SubtitleFormat> {
    vec![SubtitleFormat::Srt, SubtitleFormat::Ass]
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub style: StyleSettings,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Style as a user writes it: web colors and a named position
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StyleSettings {
    #[serde(default = "default_font_name")]
    pub font_name: String,
    #[serde(default = "default_font_size")]
    pub font_size: u32,
    /// Text color, `#RRGGBB`
    #[serde(default = "default_primary_color")]
    pub primary_color: String,
    /// Outline color, `#RRGGBB`
    #[serde(default = "default_outline_color")]
    pub outline_color: String,
    #[serde(default = "default_outline_width")]
    pub outline_width: u32,
    #[serde(default)]
    pub shadow_depth: u32,
    #[serde(default)]
    pub position: Alignment,
    /// Distance from the screen edge; larger values float the text inwards
    #[serde(default = "default_margin_v")]
    pub margin_v: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_srt_file_name")]
    pub srt_file_name: String,
    #[serde(default = "default_ass_file_name")]
    pub ass_file_name: String,
    /// Formats written by `render`
    #[serde(default = "default_formats")]
    pub formats: Vec<SubtitleFormat>,
}

fn default_srt_file_name() -> String {
    SubtitleFormat::Srt.default_file_name().to_string()
}

fn default_ass_file_name() -> String {
    SubtitleFormat::Ass.default_file_name().to_string()
}

impl Default for StyleSettings {
    fn default() -> Self {
        Self {
            font_name: default_font_name(),
            font_size: default_font_size(),
            primary_color: default_primary_color(),
            outline_color: default_outline_color(),
            outline_width: default_outline_width(),
            shadow_depth: 0,
            position: Alignment::BottomCenter,
            margin_v: default_margin_v(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            srt_file_name: default_srt_file_name(),
            ass_file_name: default_ass_file_name(),
            formats: default_formats(),
        }
    }
}

impl StyleSettings {
    /// Convert to the value the ASS builder consumes, checking ranges
    pub fn to_style_config(&self) -> Result<StyleConfig> {
        let style = StyleConfig {
            font_name: self.font_name.clone(),
            font_size: self.font_size,
            primary_color: hex_to_ass_color(&self.primary_color),
            outline_color: hex_to_ass_color(&self.outline_color),
            outline_width: self.outline_width,
            shadow_depth: self.shadow_depth,
            alignment: self.position,
            margin_v: self.margin_v,
        };
        style.validate()?;
        Ok(style)
    }
}

impl OutputConfig {
    pub fn file_name(&self, format: SubtitleFormat) -> &str {
        match format {
            SubtitleFormat::Srt => &self.srt_file_name,
            SubtitleFormat::Ass => &self.ass_file_name,
        }
    }
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| TelopError::Config(format!("Failed to read config file: {}", e)))?;

        toml::from_str(&content)
            .map_err(|e| TelopError::Config(format!("Failed to parse config file: {}", e)))
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| TelopError::Config(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)
            .map_err(|e| TelopError::Config(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_style_settings_convert() {
        let style = StyleSettings::default().to_style_config().unwrap();
        assert_eq!(style.primary_color, "&H00FFFFFF");
        assert_eq!(style.outline_color, "&H00000000");
        assert_eq!(style.margin_v, 20);
        assert_eq!(style.alignment, Alignment::BottomCenter);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: Config = toml::from_str(
            r##"
            [style]
            font_name = "Meiryo"
            primary_color = "#FFFF00"
            position = "top-center"
            "##,
        )
        .unwrap();

        let style = config.style.to_style_config().unwrap();
        assert_eq!(style.font_name, "Meiryo");
        assert_eq!(style.font_size, 40);
        assert_eq!(style.primary_color, "&H0000FFFF");
        assert_eq!(style.alignment, Alignment::TopCenter);
        assert_eq!(config.output.srt_file_name, "subtitles.srt");
        assert_eq!(config.output.formats.len(), 2);
    }

    #[test]
    fn test_out_of_range_style_is_rejected() {
        let settings = StyleSettings {
            font_size: 300,
            ..StyleSettings::default()
        };
        assert!(matches!(settings.to_style_config(), Err(TelopError::Config(_))));
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.style.font_name = "Arial".to_string();
        config.output.formats = vec![SubtitleFormat::Ass];
        config.save_to_file(&path).unwrap();

        let loaded = Config::from_file(&path).unwrap();
        assert_eq!(loaded.style.font_name, "Arial");
        assert_eq!(loaded.output.formats, vec![SubtitleFormat::Ass]);
        assert_eq!(loaded.output.file_name(SubtitleFormat::Ass), "subtitles.ass");
    }

    #[test]
    fn test_missing_config_file() {
        assert!(matches!(
            Config::from_file("/nonexistent/telop.toml"),
            Err(TelopError::Config(_))
        ));
    }
}
