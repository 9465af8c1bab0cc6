use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OcfError {
    #[error("Failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration in '{path}': {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Installation root '{path}' does not exist or is not a directory")]
    RootNotFound { path: PathBuf },

    /// The PHP file was read but holds no `$_old_files` assignment.
    #[error("No $_old_files list found in '{path}'")]
    OldFilesNotFound { path: PathBuf },

    #[error("Source 'file' selected but no list file was given")]
    ListFileMissing,

    #[error("Unknown known-path source '{0}' (expected auto, bundled, update-core or file)")]
    UnknownSource(String),
}

impl OcfError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        OcfError::Io { path: path.into(), source }
    }
}
