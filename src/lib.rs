pub mod config;
pub mod dependency;
pub mod error;
pub mod identifier;
pub mod recognizer;
pub mod rename;

pub use config::{Config, Settings};
pub use error::{Result, SongidError};
pub use identifier::{Outcome, Songid};
pub use recognizer::{parse_songrec_output, Recognition, Recognizer, SongRec, TrackId};
pub use rename::{FileRenamer, RenameOutcome};
