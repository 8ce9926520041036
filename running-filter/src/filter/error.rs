use std::io;
use std::path::PathBuf;

use thiserror::Error;

use super::sample::Sample;

/// Why [`RunningFilter::try_update`](super::RunningFilter::try_update)
/// discarded a sample. The filter state is untouched in every case.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum RejectedSample<T: Sample> {
    #[error("Sample {sample} below valid range (low {low})")]
    BelowRange { sample: T, low: T },

    #[error("Sample {sample} above valid range (high {high})")]
    AboveRange { sample: T, high: T },

    #[error("Sample is not a number")]
    NotANumber,
}

/// Errors loading a [`FilterConfig`](super::FilterConfig) from a file.
///
/// Only the file itself can be wrong; the values in it are always
/// sanitized rather than rejected.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read filter config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Malformed filter config: {0}")]
    Parse(#[from] serde_json::Error),
}
