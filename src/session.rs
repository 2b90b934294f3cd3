use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::{Result, TelopError};
use crate::style::StyleConfig;
use crate::subtitle::{RenderedDocuments, Segment, render_documents};

/// Editing state for one source transcript.
///
/// Loading a new source replaces everything; `reset` discards it. Rows keep
/// the order they were inserted in, which is the order they are rendered in.
#[derive(Debug, Clone, Default)]
pub struct Session {
    source: Option<PathBuf>,
    segments: Vec<Segment>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load<P: AsRef<Path>>(&mut self, source: P, segments: Vec<Segment>) {
        let source = source.as_ref().to_path_buf();
        info!("Loaded {} segments from {}", segments.len(), source.display());
        self.source = Some(source);
        self.segments = segments;
    }

    pub fn reset(&mut self) {
        debug!("Session reset");
        self.source = None;
        self.segments.clear();
    }

    pub fn is_loaded(&self) -> bool {
        self.source.is_some()
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn push_segment(&mut self, segment: Segment) {
        self.segments.push(segment);
    }

    pub fn insert_segment(&mut self, index: usize, segment: Segment) -> Result<()> {
        if index > self.segments.len() {
            return Err(self.out_of_range(index));
        }
        self.segments.insert(index, segment);
        Ok(())
    }

    pub fn update_segment(&mut self, index: usize, segment: Segment) -> Result<()> {
        let slot = self
            .segments
            .get_mut(index)
            .ok_or_else(|| TelopError::InvalidSegment {
                index,
                reason: "no such row".to_string(),
            })?;
        *slot = segment;
        Ok(())
    }

    pub fn remove_segment(&mut self, index: usize) -> Result<Segment> {
        if index >= self.segments.len() {
            return Err(self.out_of_range(index));
        }
        Ok(self.segments.remove(index))
    }

    /// Render the current rows to SRT and ASS
    pub fn render(&self, style: &StyleConfig) -> Result<RenderedDocuments> {
        render_documents(&self.segments, style)
    }

    fn out_of_range(&self, index: usize) -> TelopError {
        TelopError::InvalidSegment {
            index,
            reason: format!("row index out of range (len {})", self.segments.len()),
        }
    }
}
