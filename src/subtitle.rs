use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;
use tokio::fs;
use tracing::{debug, info};

use crate::error::{Result, TelopError};
use crate::style::StyleConfig;
use crate::timestamp::{format_ass_timestamp, format_srt_timestamp};

const ASS_SCRIPT_TITLE: &str = "Telop Auto Subtitles";
const ASS_SECONDARY_COLOR: &str = "&H000000FF";
const ASS_BACK_COLOR: &str = "&H00000000";
const ASS_MARGIN_LR: u32 = 10;

/// One transcribed utterance. Times are seconds from the start of the media.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: f64,
    pub end: f64,
    pub text: String,
}

impl Segment {
    pub fn new(start: f64, end: f64, text: impl Into<String>) -> Self {
        Self {
            start,
            end,
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubtitleFormat {
    Srt,
    Ass,
}

impl SubtitleFormat {
    pub fn extension(self) -> &'static str {
        match self {
            SubtitleFormat::Srt => "srt",
            SubtitleFormat::Ass => "ass",
        }
    }

    pub fn default_file_name(self) -> &'static str {
        match self {
            SubtitleFormat::Srt => "subtitles.srt",
            SubtitleFormat::Ass => "subtitles.ass",
        }
    }
}

impl FromStr for SubtitleFormat {
    type Err = TelopError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "srt" => Ok(SubtitleFormat::Srt),
            "ass" => Ok(SubtitleFormat::Ass),
            _ => Err(TelopError::UnsupportedFormat(format!(
                "'{}'. Valid formats: srt, ass",
                s
            ))),
        }
    }
}

/// Both documents produced from one render of a segment sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDocuments {
    pub srt: String,
    pub ass: String,
}

impl RenderedDocuments {
    pub fn get(&self, format: SubtitleFormat) -> &str {
        match format {
            SubtitleFormat::Srt => &self.srt,
            SubtitleFormat::Ass => &self.ass,
        }
    }
}

fn segment_error(index: usize, err: TelopError) -> TelopError {
    TelopError::InvalidSegment {
        index,
        reason: err.to_string(),
    }
}

/// Build an SRT document. Numbering follows sequence order, not start time.
pub fn build_srt(segments: &[Segment]) -> Result<String> {
    let mut srt_content = String::new();

    for (index, segment) in segments.iter().enumerate() {
        let start_time = format_srt_timestamp(segment.start).map_err(|e| segment_error(index, e))?;
        let end_time = format_srt_timestamp(segment.end).map_err(|e| segment_error(index, e))?;

        srt_content.push_str(&format!(
            "{}\n{} --> {}\n{}\n\n",
            index + 1,
            start_time,
            end_time,
            segment.text
        ));
    }

    debug!("Built SRT document with {} blocks", segments.len());
    Ok(srt_content)
}

fn ass_header(style: &StyleConfig) -> String {
    format!(
        "[Script Info]\n\
         Title: {title}\n\
         ScriptType: v4.00+\n\
         WrapStyle: 0\n\
         ScaledBorderAndShadow: yes\n\
         YCbCr Matrix: None\n\
         \n\
         [V4+ Styles]\n\
         Format: Name, Fontname, Fontsize, PrimaryColour, SecondaryColour, OutlineColour, BackColour, Bold, Italic, Underline, StrikeOut, ScaleX, ScaleY, Spacing, Angle, BorderStyle, Outline, Shadow, Alignment, MarginL, MarginR, MarginV, Encoding\n\
         Style: Default,{font},{size},{primary},{secondary},{outline},{back},0,0,0,0,100,100,0,0,1,{outline_w},{shadow},{align},{ml},{mr},{mv},1\n\
         \n\
         [Events]\n\
         Format: Layer, Start, End, Style, Name, MarginL, MarginR, MarginV, Effect, Text\n",
        title = ASS_SCRIPT_TITLE,
        font = style.font_name,
        size = style.font_size,
        primary = style.primary_color,
        secondary = ASS_SECONDARY_COLOR,
        outline = style.outline_color,
        back = ASS_BACK_COLOR,
        outline_w = style.outline_width,
        shadow = style.shadow_depth,
        align = style.alignment.code(),
        ml = ASS_MARGIN_LR,
        mr = ASS_MARGIN_LR,
        mv = style.margin_v,
    )
}

/// Replace line breaks with the ASS hard break token. Nothing else is escaped.
fn ass_text(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\n', "\\N")
}

/// Build an ASS document with a single `Default` style taken from `style`.
pub fn build_ass(segments: &[Segment], style: &StyleConfig) -> Result<String> {
    let mut ass_content = ass_header(style);

    for (index, segment) in segments.iter().enumerate() {
        let start_time = format_ass_timestamp(segment.start).map_err(|e| segment_error(index, e))?;
        let end_time = format_ass_timestamp(segment.end).map_err(|e| segment_error(index, e))?;

        ass_content.push_str(&format!(
            "Dialogue: 0,{},{},Default,,0,0,0,,{}\n",
            start_time,
            end_time,
            ass_text(&segment.text)
        ));
    }

    debug!("Built ASS document with {} dialogue lines", segments.len());
    Ok(ass_content)
}

/// Build both documents from the same segment sequence
pub fn render_documents(segments: &[Segment], style: &StyleConfig) -> Result<RenderedDocuments> {
    Ok(RenderedDocuments {
        srt: build_srt(segments)?,
        ass: build_ass(segments, style)?,
    })
}

/// Write a rendered document to disk
pub async fn write_document<P: AsRef<Path>>(content: &str, output_path: P) -> Result<()> {
    let output_path = output_path.as_ref();
    info!("Writing subtitle file: {}", output_path.display());

    fs::write(output_path, content).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::Alignment;

    fn sample_segments() -> Vec<Segment> {
        vec![Segment::new(0.0, 1.0, "a"), Segment::new(1.0, 2.0, "b")]
    }

    fn sample_style() -> StyleConfig {
        StyleConfig {
            font_name: "X".to_string(),
            font_size: 40,
            alignment: Alignment::BottomCenter,
            margin_v: 10,
            ..StyleConfig::default()
        }
    }

    #[test]
    fn test_build_srt() {
        let srt = build_srt(&sample_segments()).unwrap();
        assert_eq!(
            srt,
            "1\n00:00:00,000 --> 00:00:01,000\na\n\n2\n00:00:01,000 --> 00:00:02,000\nb\n\n"
        );
    }

    #[test]
    fn test_build_srt_empty() {
        assert_eq!(build_srt(&[]).unwrap(), "");
    }

    #[test]
    fn test_build_srt_keeps_sequence_order() {
        let segments = vec![Segment::new(5.0, 6.0, "later"), Segment::new(1.0, 2.0, "earlier")];
        let srt = build_srt(&segments).unwrap();
        assert!(srt.starts_with("1\n00:00:05,000 --> 00:00:06,000\nlater\n\n"));
        assert!(srt.ends_with("2\n00:00:01,000 --> 00:00:02,000\nearlier\n\n"));
    }

    #[test]
    fn test_build_srt_keeps_text_verbatim() {
        let segments = vec![Segment::new(0.0, 1.0, " two\nlines ")];
        let srt = build_srt(&segments).unwrap();
        assert!(srt.contains("\n two\nlines \n\n"));
    }

    #[test]
    fn test_build_ass_style_line() {
        let ass = build_ass(&sample_segments(), &sample_style()).unwrap();
        assert!(ass.starts_with("[Script Info]\n"));
        assert!(ass.contains(
            "Style: Default,X,40,&H00FFFFFF,&H000000FF,&H00000000,&H00000000,0,0,0,0,100,100,0,0,1,2,0,2,10,10,10,1\n"
        ));
    }

    #[test]
    fn test_build_ass_dialogue_lines() {
        let ass = build_ass(&sample_segments(), &sample_style()).unwrap();
        let events = ass.split("[Events]\n").nth(1).unwrap();
        let dialogues: Vec<&str> = events.lines().filter(|l| l.starts_with("Dialogue:")).collect();

        assert_eq!(
            dialogues,
            vec![
                "Dialogue: 0,0:00:00.00,0:00:01.00,Default,,0,0,0,,a",
                "Dialogue: 0,0:00:01.00,0:00:02.00,Default,,0,0,0,,b",
            ]
        );
    }

    #[test]
    fn test_build_ass_replaces_newlines() {
        let segments = vec![Segment::new(0.0, 1.5, "first\nsecond\r\nthird")];
        let ass = build_ass(&segments, &StyleConfig::default()).unwrap();
        let dialogue = ass.lines().find(|l| l.starts_with("Dialogue:")).unwrap();

        assert!(dialogue.ends_with(",,first\\Nsecond\\Nthird"));
        assert!(!dialogue.contains('\r'));
        assert_eq!(ass.matches("Dialogue:").count(), 1);
    }

    #[test]
    fn test_build_ass_does_not_escape_braces() {
        let segments = vec![Segment::new(0.0, 1.0, "{\\b1}bold")];
        let ass = build_ass(&segments, &StyleConfig::default()).unwrap();
        assert!(ass.contains(",,{\\b1}bold\n"));
    }

    #[test]
    fn test_builders_are_idempotent() {
        let segments = sample_segments();
        let style = sample_style();
        assert_eq!(build_srt(&segments).unwrap(), build_srt(&segments).unwrap());
        assert_eq!(
            build_ass(&segments, &style).unwrap(),
            build_ass(&segments, &style).unwrap()
        );
    }

    #[test]
    fn test_invalid_timestamp_reports_segment_index() {
        let segments = vec![Segment::new(0.0, 1.0, "ok"), Segment::new(-1.0, 2.0, "bad")];
        match build_srt(&segments) {
            Err(TelopError::InvalidSegment { index, .. }) => assert_eq!(index, 1),
            other => panic!("unexpected result: {:?}", other),
        }
        assert!(build_ass(&segments, &StyleConfig::default()).is_err());
    }

    #[test]
    fn test_subtitle_format() {
        assert_eq!("SRT".parse::<SubtitleFormat>().unwrap(), SubtitleFormat::Srt);
        assert_eq!(SubtitleFormat::Ass.default_file_name(), "subtitles.ass");
        assert!("vtt".parse::<SubtitleFormat>().is_err());
    }

    #[tokio::test]
    async fn test_write_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("subtitles.srt");
        let srt = build_srt(&sample_segments()).unwrap();

        write_document(&srt, &path).await.unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), srt);
    }
}
