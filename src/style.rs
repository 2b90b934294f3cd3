use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::color::DEFAULT_ASS_COLOR;
use crate::error::{Result, TelopError};

pub const FONT_SIZE_RANGE: (u32, u32) = (10, 100);
pub const OUTLINE_WIDTH_RANGE: (u32, u32) = (0, 10);
pub const MARGIN_V_RANGE: (u32, u32) = (0, 200);

/// Subtitle position, encoded with the ASS numpad alignment codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Alignment {
    #[default]
    BottomCenter,
    MiddleCenter,
    TopCenter,
}

impl Alignment {
    pub fn code(self) -> u8 {
        match self {
            Alignment::BottomCenter => 2,
            Alignment::MiddleCenter => 5,
            Alignment::TopCenter => 8,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            2 => Some(Alignment::BottomCenter),
            5 => Some(Alignment::MiddleCenter),
            8 => Some(Alignment::TopCenter),
            _ => None,
        }
    }
}

impl fmt::Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Alignment {
    type Err = TelopError;

    fn from_str(s: &str) -> Result<Self> {
        let numeric = s.parse::<u8>().ok().and_then(Alignment::from_code);
        if let Some(alignment) = numeric {
            return Ok(alignment);
        }

        match s.to_lowercase().as_str() {
            "bottom" | "bottom-center" => Ok(Alignment::BottomCenter),
            "middle" | "middle-center" => Ok(Alignment::MiddleCenter),
            "top" | "top-center" => Ok(Alignment::TopCenter),
            _ => Err(TelopError::Config(format!(
                "Invalid position '{}'. Valid positions: bottom (2), middle (5), top (8)",
                s
            ))),
        }
    }
}

/// Presentation parameters for the `Default` style of an ASS document.
///
/// Colors are already ASS tokens (`&HAABBGGRR`); use
/// [`crate::color::hex_to_ass_color`] to build them from web colors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleConfig {
    pub font_name: String,
    pub font_size: u32,
    pub primary_color: String,
    pub outline_color: String,
    pub outline_width: u32,
    pub shadow_depth: u32,
    pub alignment: Alignment,
    pub margin_v: u32,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            font_name: "MS Gothic".to_string(),
            font_size: 40,
            primary_color: DEFAULT_ASS_COLOR.to_string(),
            outline_color: "&H00000000".to_string(),
            outline_width: 2,
            shadow_depth: 0,
            alignment: Alignment::BottomCenter,
            margin_v: 10,
        }
    }
}

impl StyleConfig {
    /// Check the numeric ranges a style editor is expected to enforce.
    /// The document builder itself never calls this.
    pub fn validate(&self) -> Result<()> {
        check_range("font_size", self.font_size, FONT_SIZE_RANGE)?;
        check_range("outline_width", self.outline_width, OUTLINE_WIDTH_RANGE)?;
        check_range("margin_v", self.margin_v, MARGIN_V_RANGE)?;

        if self.font_name.trim().is_empty() {
            return Err(TelopError::Config("font_name must not be empty".to_string()));
        }

        Ok(())
    }
}

fn check_range(field: &str, value: u32, (min, max): (u32, u32)) -> Result<()> {
    if value < min || value > max {
        return Err(TelopError::Config(format!(
            "{} must be between {} and {}, got {}",
            field, min, max, value
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alignment_codes() {
        assert_eq!(Alignment::BottomCenter.code(), 2);
        assert_eq!(Alignment::MiddleCenter.code(), 5);
        assert_eq!(Alignment::TopCenter.code(), 8);
        assert_eq!(Alignment::from_code(5), Some(Alignment::MiddleCenter));
        assert_eq!(Alignment::from_code(1), None);
    }

    #[test]
    fn test_alignment_from_str() {
        assert_eq!("top".parse::<Alignment>().unwrap(), Alignment::TopCenter);
        assert_eq!("Bottom-Center".parse::<Alignment>().unwrap(), Alignment::BottomCenter);
        assert_eq!("5".parse::<Alignment>().unwrap(), Alignment::MiddleCenter);
        assert_eq!("8".parse::<Alignment>().unwrap(), Alignment::TopCenter);
        assert!("left".parse::<Alignment>().is_err());
        assert!("3".parse::<Alignment>().is_err());
        assert_eq!(Alignment::MiddleCenter.to_string(), "5");
    }

    #[test]
    fn test_default_style_is_valid() {
        let style = StyleConfig::default();
        assert_eq!(style.font_name, "MS Gothic");
        assert_eq!(style.alignment, Alignment::BottomCenter);
        assert!(style.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_out_of_range_values() {
        let style = StyleConfig { font_size: 9, ..StyleConfig::default() };
        assert!(style.validate().is_err());

        let style = StyleConfig { outline_width: 11, ..StyleConfig::default() };
        assert!(style.validate().is_err());

        let style = StyleConfig { margin_v: 201, ..StyleConfig::default() };
        assert!(style.validate().is_err());

        let style = StyleConfig { font_size: 100, margin_v: 200, ..StyleConfig::default() };
        assert!(style.validate().is_ok());
    }
}
