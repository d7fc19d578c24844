//! Error types for songid.

use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SongidError {
    /// Recognizer executable not found on the search path
    #[error("{0} not found in path")]
    DependencyMissing(String),

    /// Audio file absent at recognition or rename time
    #[error("{} not found", .0.display())]
    FileNotFound(PathBuf),

    /// Recognizer could not be started
    #[error("failed to run {program}: {source}")]
    Launch {
        program: String,
        #[source]
        source: io::Error,
    },

    /// Recognizer exited with a non-zero status
    #[error("{program} failed ({status}): {stderr}")]
    Subprocess {
        program: String,
        status: ExitStatus,
        stderr: String,
    },

    #[error("failed to rename {} to {}: {source}", .from.display(), .to.display())]
    Rename {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Defaults file unreadable or invalid
    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, SongidError>;
