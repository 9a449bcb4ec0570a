//! Error types for conductor.
//!
//! The first group of variants is the user-facing taxonomy: each one maps to
//! a distinct process exit status. The remaining variants cover I/O and store
//! codec failures and all share the generic failure status.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the conductor library.
#[derive(Debug, Error)]
pub enum ConductorError {
    // Registration errors
    #[error("Path {0} is not a full path")]
    PathNotAbsolute(PathBuf),

    #[error("Could not find steam user id under {userdata:?}")]
    SteamUserNotFound { userdata: PathBuf },

    #[error("App id {app_id} already exists")]
    AppIdAlreadyExists { app_id: String },

    #[error("Compat tool {name} does not exist at {path:?}")]
    CompatToolDoesNotExist { name: String, path: PathBuf },

    #[error("Artwork not properly set, missing: {}", display_paths(.missing))]
    ArtNotProperlySet { missing: Vec<PathBuf> },

    // File system errors
    #[error("IO error at {path:?}: {message}")]
    Io {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<std::io::Error>,
    },

    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    // Store codec errors
    #[error("Malformed VDF in {path:?} at byte {offset}: {message}")]
    VdfParse {
        path: Option<PathBuf>,
        offset: usize,
        message: String,
    },

    #[error("Cannot encode VDF: {message}")]
    VdfEncode { message: String },

    // Serialization errors
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: Option<serde_json::Error>,
    },

    // Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },
}

/// Result type alias for conductor operations.
pub type Result<T> = std::result::Result<T, ConductorError>;

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

impl From<std::io::Error> for ConductorError {
    fn from(err: std::io::Error) -> Self {
        ConductorError::Io {
            message: err.to_string(),
            path: None,
            source: Some(err),
        }
    }
}

impl From<serde_json::Error> for ConductorError {
    fn from(err: serde_json::Error) -> Self {
        ConductorError::Json {
            message: err.to_string(),
            source: Some(err),
        }
    }
}

impl ConductorError {
    /// Create an IO error with path context.
    pub fn io_with_path(err: std::io::Error, path: impl Into<PathBuf>) -> Self {
        ConductorError::Io {
            message: err.to_string(),
            path: Some(path.into()),
            source: Some(err),
        }
    }

    /// Convert to a process exit status.
    ///
    /// - 1: Internal error (I/O, store codec, configuration)
    /// - 2: Executable path not absolute
    /// - 3: Steam user not found
    /// - 4: App id already exists
    /// - 5: Compat tool does not exist
    /// - 6: Artwork not properly set
    pub fn exit_code(&self) -> i32 {
        match self {
            ConductorError::PathNotAbsolute(_) => 2,
            ConductorError::SteamUserNotFound { .. } => 3,
            ConductorError::AppIdAlreadyExists { .. } => 4,
            ConductorError::CompatToolDoesNotExist { .. } => 5,
            ConductorError::ArtNotProperlySet { .. } => 6,
            _ => 1,
        }
    }
}
