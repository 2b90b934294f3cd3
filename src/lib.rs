//! Telop - subtitle document generator
//!
//! Converts ordered transcript segments into SRT and styled ASS subtitle
//! documents.

pub mod cli;
pub mod color;
pub mod config;
pub mod error;
pub mod session;
pub mod style;
pub mod subtitle;
pub mod timestamp;
pub mod transcript;
pub mod workflow;
