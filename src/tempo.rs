//! Tempo-synced LFO rates from strings like `bpm:120,div:1/8`.

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum TempoSyncError {
    #[error("expected bpm:<tempo>,div:<division>, got {0:?}")]
    Malformed(String),
    #[error("invalid tempo {0:?}")]
    InvalidBpm(String),
    #[error("tempo must be positive, got {0}")]
    NonPositiveBpm(f32),
    #[error("unsupported division {0:?} (use 1, 1/2, 1/4, 1/8 or 1/16)")]
    UnsupportedDivision(String),
}

/// Beats spanned by one LFO cycle for a note division.
fn beats_per_cycle(division: &str) -> Option<f32> {
    match division {
        "1" => Some(4.0),
        "1/2" => Some(2.0),
        "1/4" => Some(1.0),
        "1/8" => Some(0.5),
        "1/16" => Some(0.25),
        _ => None,
    }
}

/// Split `bpm:<x>,div:<y>` into its tempo and division.
pub fn parse_sync(spec: &str) -> Result<(f32, String), TempoSyncError> {
    let malformed = || TempoSyncError::Malformed(spec.to_string());

    let rest = spec.trim().strip_prefix("bpm:").ok_or_else(malformed)?;
    let (bpm_str, div) = rest.split_once(",div:").ok_or_else(malformed)?;

    let bpm_str = bpm_str.trim();
    let bpm: f32 = bpm_str
        .parse()
        .map_err(|_| TempoSyncError::InvalidBpm(bpm_str.to_string()))?;
    if !bpm.is_finite() {
        return Err(TempoSyncError::InvalidBpm(bpm_str.to_string()));
    }
    if bpm <= 0.0 {
        return Err(TempoSyncError::NonPositiveBpm(bpm));
    }

    Ok((bpm, div.trim().to_string()))
}

/// LFO rate in Hz: `(bpm / 60) / beats_per_cycle`.
pub fn division_to_hz(bpm: f32, division: &str) -> Result<f32, TempoSyncError> {
    let beats = beats_per_cycle(division)
        .ok_or_else(|| TempoSyncError::UnsupportedDivision(division.to_string()))?;
    Ok((bpm / 60.0) / beats)
}

pub fn rate_from_sync(spec: &str) -> Result<f32, TempoSyncError> {
    let (bpm, division) = parse_sync(spec)?;
    division_to_hz(bpm, &division)
}
