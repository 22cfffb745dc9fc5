use std::path::PathBuf;
use thiserror::Error;

/// Failures while loading carousel tuning from disk.
///
/// The engine itself never fails; only the configuration layer reports errors.
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read carousel config {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse carousel config {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid carousel config value for '{field}': {reason}")]
    Invalid { field: &'static str, reason: String },
}
