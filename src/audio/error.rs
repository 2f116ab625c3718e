use std::path::PathBuf;
use thiserror::Error;

pub type AudioIoResult<T> = Result<T, AudioIoError>;

/// Fatal problems reading or writing an audio container.
#[derive(Debug, Error)]
pub enum AudioIoError {
    #[error("failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("not a readable WAV container: {0}")]
    Probe(#[source] symphonia::core::errors::Error),

    #[error("decode failed: {0}")]
    Decode(#[source] symphonia::core::errors::Error),

    #[error("no audio track found")]
    NoTrack,

    #[error("container does not declare a sample rate")]
    MissingSampleRate,

    #[error("unsupported sample encoding: {0} (need 16-bit PCM)")]
    UnsupportedEncoding(String),

    #[error("container does not declare a channel layout")]
    MissingChannelLayout,

    #[error("unsupported channel count: {0} (need 1 or 2)")]
    UnsupportedChannels(usize),

    #[error("failed to write WAV: {0}")]
    Write(#[from] hound::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
