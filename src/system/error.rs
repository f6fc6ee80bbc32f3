use std::path::PathBuf;

use thiserror::Error;

/// Failure to obtain one counter or snapshot sample.
///
/// The driver treats any of these as "no data" for the family that failed and
/// tries again on the next tick.
#[derive(Debug, Error)]
pub enum SampleError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed {}: {detail}", path.display())]
    Parse { path: PathBuf, detail: String },

    #[error("no mounted filesystem contains {}", path.display())]
    NoDisk { path: PathBuf },

    #[error("{0} counters are not available on this platform")]
    Unsupported(&'static str),
}

impl SampleError {
    pub fn parse(path: impl Into<PathBuf>, detail: impl Into<String>) -> Self {
        SampleError::Parse {
            path: path.into(),
            detail: detail.into(),
        }
    }
}
