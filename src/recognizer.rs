//! Song recognition through an external recognizer.
//!
//! The [`Recognizer`] trait is the seam between orchestration and the
//! recognizer process.  [`SongRec`] runs the `songrec` command line tool:
//!
//! ```text
//! songrec audio-file-to-recognized-song <file>
//! ```
//!
//! and reads the Shazam JSON it prints.  Only `track.title` and
//! `track.subtitle` (the artist) are used.

use std::fmt;
use std::path::Path;
use std::process::Command;

use crate::config::Settings;
use crate::error::{Result, SongidError};

/// Artist and title of a recognized track.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackId {
    pub artist: String,
    pub title: String,
}

impl TrackId {
    pub fn new(artist: impl Into<String>, title: impl Into<String>) -> Self {
        TrackId {
            artist: artist.into(),
            title: title.into(),
        }
    }

    /// Base name used when renaming: `"{artist} - {title}"`
    pub fn base_name(&self) -> String {
        format!("{} - {}", self.artist, self.title)
    }
}

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.artist, self.title)
    }
}

/// Outcome of a recognition attempt.  `NotFound` is not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recognition {
    Found(TrackId),
    NotFound,
}

/// Something that can identify the song in an audio file.
pub trait Recognizer {
    /// Short display name, e.g. "songrec".
    fn name(&self) -> &str;

    /// Identify the song in `path`.
    ///
    /// Returns `Ok(Recognition::NotFound)` when the recognizer ran but had no
    /// usable match.  Errors are reserved for failing to run it at all.
    fn identify(&self, path: &Path) -> Result<Recognition>;
}

/// Recognizer backed by the `songrec` executable.
#[derive(Debug, Clone)]
pub struct SongRec {
    program: String,
    mode: String,
}

impl SongRec {
    pub fn new(program: impl Into<String>, mode: impl Into<String>) -> Self {
        SongRec {
            program: program.into(),
            mode: mode.into(),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(&settings.songrec, &settings.recognition_mode)
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl Recognizer for SongRec {
    fn name(&self) -> &str {
        &self.program
    }

    fn identify(&self, path: &Path) -> Result<Recognition> {
        log::debug!("Running {} {} {}", self.program, self.mode, path.display());

        let output = Command::new(&self.program)
            .arg(&self.mode)
            .arg(path)
            .output()
            .map_err(|source| SongidError::Launch {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(SongidError::Subprocess {
                program: self.program.clone(),
                status: output.status,
                stderr,
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let recognition = parse_songrec_output(&stdout);
        if let Recognition::Found(ref track) = recognition {
            log::info!("{}: {}", path.display(), track);
        } else {
            log::info!("{}: no match in {} bytes of output", path.display(), stdout.len());
        }
        Ok(recognition)
    }
}

/// Parse songrec JSON output.
///
/// Anything other than string `track.title` and `track.subtitle` fields,
/// including output that is not JSON at all, is a non-match.
pub fn parse_songrec_output(json_str: &str) -> Recognition {
    let json: serde_json::Value = match serde_json::from_str(json_str) {
        Ok(v) => v,
        Err(e) => {
            log::debug!("songrec output is not JSON: {}", e);
            return Recognition::NotFound;
        }
    };

    let track = json.get("track");
    let title = track.and_then(|t| t.get("title")).and_then(|v| v.as_str());
    let artist = track.and_then(|t| t.get("subtitle")).and_then(|v| v.as_str());

    match (artist, title) {
        (Some(artist), Some(title)) => Recognition::Found(TrackId::new(artist, title)),
        _ => Recognition::NotFound,
    }
}
