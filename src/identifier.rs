use std::path::Path;

use crate::config::Settings;
use crate::error::{Result, SongidError};
use crate::recognizer::{Recognition, Recognizer, SongRec};
use crate::rename::{sanitize_base_name, FileRenamer, RenameOutcome};

/// Result of processing one audio file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Renamed {
        new_name: String,
        renamed: RenameOutcome,
    },
    NoMatch,
}

/// Identifies an audio file and renames it after the recognized track.
pub struct Songid<R: Recognizer> {
    recognizer: R,
    renamer: FileRenamer,
    rename_companion: bool,
}

impl Songid<SongRec> {
    pub fn from_settings(settings: &Settings) -> Self {
        Songid::new(SongRec::from_settings(settings), settings)
    }
}

impl<R: Recognizer> Songid<R> {
    pub fn new(recognizer: R, settings: &Settings) -> Self {
        Songid {
            recognizer,
            renamer: FileRenamer::from_settings(settings),
            rename_companion: settings.rename_companion,
        }
    }

    pub fn recognizer(&self) -> &R {
        &self.recognizer
    }

    /// Run the recognizer on `directory/filename`.
    ///
    /// The file must exist; the recognizer is not started otherwise.
    pub fn recognize_file(&self, directory: &Path, filename: &Path) -> Result<Recognition> {
        let filepath = directory.join(filename);
        if !filepath.exists() {
            return Err(SongidError::FileNotFound(filepath));
        }
        self.recognizer.identify(&filepath)
    }

    pub fn rename_files(
        &self,
        directory: &Path,
        filename: &Path,
        newname: &str,
        rename_companion: bool,
    ) -> Result<RenameOutcome> {
        self.renamer
            .rename_files(directory, filename, newname, rename_companion)
    }

    /// Identify one file and, on a match, rename it (and its companion)
    /// to `"{artist} - {title}"`.
    pub fn process_file(&self, directory: &Path, filename: &Path) -> Result<Outcome> {
        match self.recognize_file(directory, filename)? {
            Recognition::Found(track) => {
                let new_name = sanitize_base_name(&track.base_name());
                println!("renaming {} to {}", filename.display(), new_name);
                let renamed =
                    self.rename_files(directory, filename, &new_name, self.rename_companion)?;
                log::info!(
                    "Renamed {} using {} match",
                    renamed.audio.display(),
                    self.recognizer.name()
                );
                Ok(Outcome::Renamed { new_name, renamed })
            }
            Recognition::NotFound => {
                println!("failed to id {}, skipping", filename.display());
                Ok(Outcome::NoMatch)
            }
        }
    }
}
