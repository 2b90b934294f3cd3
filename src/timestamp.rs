use crate::error::{Result, TelopError};

const MICROS_PER_SECOND: u64 = 1_000_000;

/// Split a seconds offset into whole seconds and the sub-second remainder in
/// microseconds. The value is resolved to the nearest microsecond first so
/// that float noise (65.123 -> 65.12299999) does not leak into truncation.
fn split_seconds(seconds: f64) -> Result<(u64, u64)> {
    if !seconds.is_finite() || seconds < 0.0 {
        return Err(TelopError::InvalidTimestamp(seconds));
    }

    // Beyond u64 microseconds the cast would saturate into a wrong timecode
    let scaled = (seconds * MICROS_PER_SECOND as f64).round();
    if scaled >= u64::MAX as f64 {
        return Err(TelopError::InvalidTimestamp(seconds));
    }

    let total_micros = scaled as u64;
    Ok((total_micros / MICROS_PER_SECOND, total_micros % MICROS_PER_SECOND))
}

/// Format time in seconds to SRT time format (HH:MM:SS,mmm)
pub fn format_srt_timestamp(seconds: f64) -> Result<String> {
    let (total_secs, micros) = split_seconds(seconds)?;
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let secs = total_secs % 60;
    let millis = micros / 1_000;

    Ok(format!("{:02}:{:02}:{:02},{:03}", hours, minutes, secs, millis))
}

/// Format time in seconds to ASS time format (H:MM:SS.cc)
pub fn format_ass_timestamp(seconds: f64) -> Result<String> {
    let (total_secs, micros) = split_seconds(seconds)?;
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let secs = total_secs % 60;
    let centis = micros / 10_000;

    Ok(format!("{}:{:02}:{:02}.{:02}", hours, minutes, secs, centis))
}
