//! Renaming an audio file together with its companion file.
//!
//! A directory holds audio files and companion (CD+G lyrics/graphics) files
//! with the same base names.  The audio file is renamed first; the companion,
//! if one exists, then follows it to the same base name.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::Settings;
use crate::error::{Result, SongidError};

/// Where the files of a pair ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameOutcome {
    pub audio: PathBuf,
    /// `None` when companion renaming was disabled or no companion existed
    pub companion: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct FileRenamer {
    audio_extension: String,
    companion_extension: String,
    companion_rename_extension: String,
}

impl Default for FileRenamer {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

impl FileRenamer {
    pub fn from_settings(settings: &Settings) -> Self {
        FileRenamer {
            audio_extension: settings.audio_extension.clone(),
            companion_extension: settings.companion_extension.clone(),
            companion_rename_extension: settings.companion_rename_extension.clone(),
        }
    }

    /// Rename `directory/filename` to `directory/<newname>.mp3`.
    ///
    /// With `rename_companion`, `<stem of filename>.CDG` is renamed to
    /// `<newname>.cdg` when it exists.  Nothing is rolled back if the
    /// companion rename fails after the audio rename succeeded.
    pub fn rename_files(
        &self,
        directory: &Path,
        filename: &Path,
        newname: &str,
        rename_companion: bool,
    ) -> Result<RenameOutcome> {
        let filepath = directory.join(filename);
        if !filepath.exists() {
            return Err(SongidError::FileNotFound(filepath));
        }

        let newname = sanitize_base_name(newname);
        let audio_target = directory.join(format!("{}.{}", newname, self.audio_extension));
        rename(&filepath, &audio_target)?;

        let mut companion = None;
        if rename_companion {
            let mut companion_name = filepath.file_stem().unwrap_or_default().to_os_string();
            companion_name.push(".");
            companion_name.push(&self.companion_extension);
            let companion_path = directory.join(companion_name);
            if companion_path.exists() {
                let companion_target = directory
                    .join(format!("{}.{}", newname, self.companion_rename_extension));
                rename(&companion_path, &companion_target)?;
                companion = Some(companion_target);
            } else {
                log::debug!("No companion {}", companion_path.display());
            }
        }

        Ok(RenameOutcome {
            audio: audio_target,
            companion,
        })
    }
}

fn rename(from: &Path, to: &Path) -> Result<()> {
    log::debug!("Renaming {} -> {}", from.display(), to.display());
    fs::rename(from, to).map_err(|source| SongidError::Rename {
        from: from.to_path_buf(),
        to: to.to_path_buf(),
        source,
    })
}

/// Replace path separators so the new name stays inside its directory.
pub fn sanitize_base_name(name: &str) -> String {
    name.chars()
        .map(|c| if std::path::is_separator(c) || c == '\0' { '_' } else { c })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(dir: &Path, name: &str) {
        fs::write(dir.join(name), name).unwrap();
    }

    fn names(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_rename_with_companion() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "track01.mp3");
        touch(dir.path(), "track01.CDG");

        let outcome = FileRenamer::default()
            .rename_files(dir.path(), Path::new("track01.mp3"), "Artist - Title", true)
            .unwrap();

        assert_eq!(outcome.audio, dir.path().join("Artist - Title.mp3"));
        assert_eq!(outcome.companion, Some(dir.path().join("Artist - Title.cdg")));
        assert_eq!(names(dir.path()), vec!["Artist - Title.cdg", "Artist - Title.mp3"]);
        // Content moved, not copied
        assert_eq!(
            fs::read_to_string(dir.path().join("Artist - Title.cdg")).unwrap(),
            "track01.CDG"
        );
    }

    #[test]
    fn test_rename_without_companion() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "track01.mp3");

        let outcome = FileRenamer::default()
            .rename_files(dir.path(), Path::new("track01.mp3"), "Artist - Title", true)
            .unwrap();

        assert_eq!(outcome.companion, None);
        assert_eq!(names(dir.path()), vec!["Artist - Title.mp3"]);
    }

    #[test]
    fn test_companion_disabled() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "track01.mp3");
        touch(dir.path(), "track01.CDG");

        let outcome = FileRenamer::default()
            .rename_files(dir.path(), Path::new("track01.mp3"), "Artist - Title", false)
            .unwrap();

        assert_eq!(outcome.companion, None);
        assert_eq!(names(dir.path()), vec!["Artist - Title.mp3", "track01.CDG"]);
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_companion_search_is_case_sensitive() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "track01.mp3");
        touch(dir.path(), "track01.cdg");

        let outcome = FileRenamer::default()
            .rename_files(dir.path(), Path::new("track01.mp3"), "Artist - Title", true)
            .unwrap();

        assert_eq!(outcome.companion, None);
        assert_eq!(names(dir.path()), vec!["Artist - Title.mp3", "track01.cdg"]);
    }

    #[test]
    fn test_missing_audio_file() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "track01.CDG");

        match FileRenamer::default().rename_files(dir.path(), Path::new("track01.mp3"), "A - T", true) {
            Err(SongidError::FileNotFound(path)) => {
                assert_eq!(path, dir.path().join("track01.mp3"))
            }
            other => panic!("expected file not found, got {:?}", other),
        }
        assert_eq!(names(dir.path()), vec!["track01.CDG"]);
    }

    #[test]
    fn test_rename_overwrites_existing_target() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "track01.mp3");
        touch(dir.path(), "Artist - Title.mp3");

        FileRenamer::default()
            .rename_files(dir.path(), Path::new("track01.mp3"), "Artist - Title", true)
            .unwrap();

        assert_eq!(names(dir.path()), vec!["Artist - Title.mp3"]);
        assert_eq!(
            fs::read_to_string(dir.path().join("Artist - Title.mp3")).unwrap(),
            "track01.mp3"
        );
    }

    #[test]
    fn test_separator_in_new_name() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "track01.mp3");

        let outcome = FileRenamer::default()
            .rename_files(dir.path(), Path::new("track01.mp3"), "AC/DC - Back In Black", true)
            .unwrap();

        assert_eq!(outcome.audio, dir.path().join("AC_DC - Back In Black.mp3"));
        assert!(outcome.audio.exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_companion_rename_failure_keeps_audio_renamed() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "t.mp3");
        touch(dir.path(), "t.CDG");
        // A non-empty directory cannot be replaced by a file
        fs::create_dir(dir.path().join("A - T.cdg")).unwrap();
        touch(&dir.path().join("A - T.cdg"), "keep");

        match FileRenamer::default().rename_files(dir.path(), Path::new("t.mp3"), "A - T", true) {
            Err(SongidError::Rename { from, to, .. }) => {
                assert_eq!(from, dir.path().join("t.CDG"));
                assert_eq!(to, dir.path().join("A - T.cdg"));
            }
            other => panic!("expected rename error, got {:?}", other),
        }
        assert!(dir.path().join("A - T.mp3").exists());
        assert!(!dir.path().join("t.mp3").exists());
        assert!(dir.path().join("t.CDG").exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_filename() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let dir = tempfile::tempdir().unwrap();
        let audio = OsStr::from_bytes(b"caf\xe9.mp3");
        let companion = OsStr::from_bytes(b"caf\xe9.CDG");
        fs::write(dir.path().join(audio), b"audio").unwrap();
        fs::write(dir.path().join(companion), b"graphics").unwrap();

        let outcome = FileRenamer::default()
            .rename_files(dir.path(), Path::new(audio), "A - T", true)
            .unwrap();

        assert_eq!(outcome.companion, Some(dir.path().join("A - T.cdg")));
        assert_eq!(names(dir.path()), vec!["A - T.cdg", "A - T.mp3"]);
    }

    #[test]
    fn test_sanitize_base_name() {
        assert_eq!(sanitize_base_name("Artist - Title"), "Artist - Title");
        assert_eq!(sanitize_base_name("../../etc"), ".._.._etc");
    }

    #[test]
    fn test_custom_extensions() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "song.flac");
        touch(dir.path(), "song.lrc");

        let settings = Settings {
            audio_extension: "flac".to_string(),
            companion_extension: "lrc".to_string(),
            companion_rename_extension: "lrc".to_string(),
            ..Settings::default()
        };
        FileRenamer::from_settings(&settings)
            .rename_files(dir.path(), Path::new("song.flac"), "A - T", true)
            .unwrap();

        assert_eq!(names(dir.path()), vec!["A - T.flac", "A - T.lrc"]);
    }
}
