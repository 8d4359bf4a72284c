use core::fmt;
use std::{io, path::PathBuf};

use thiserror::Error;

use crate::config::ConfigError;

#[doc = r#"
Errors that abort the whole pipeline.

Per-event irregularities (orphan note-offs, unterminated notes, zero-length
notes) are never errors. They are counted in the
[`ExtractionSummary`](crate::notes::ExtractionSummary) instead.
"#]
#[derive(Debug, Error)]
pub enum Error {
    /// The file could not be read or its container could not be parsed.
    #[error("Reading MIDI file, {0}")]
    FileRead(#[from] FileReadError),
    /// The file divides time into frames rather than quarter notes.
    #[error("Unsupported time format: {0}")]
    UnsupportedTimeFormat(Timecode),
    /// The configuration could not be loaded.
    #[error("Loading configuration, {0}")]
    Config(#[from] ConfigError),
}

/// Why a MIDI file could not be turned into a [`Song`](crate::file::Song).
#[derive(Debug, Error)]
pub enum FileReadError {
    /// Opening or reading the file failed.
    #[error("could not open {}: {source}", .path.display())]
    Io {
        /// The path that was requested
        path: PathBuf,
        /// The underlying error
        #[source]
        source: io::Error,
    },
    /// The bytes are not a valid Standard MIDI File.
    #[error("malformed container: {0}")]
    Container(#[from] midly::Error),
}

/// The header division of a file we cannot put on a tempo map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timecode {
    /// SMPTE frames per second and ticks per frame
    Smpte {
        /// Nominal frames per second (24, 25, 29 or 30)
        fps: u8,
        /// Ticks per frame
        subframes: u8,
    },
    /// A metrical division declaring zero ticks per quarter note
    ZeroTicksPerQuarterNote,
}

impl fmt::Display for Timecode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Smpte { fps, subframes } => {
                write!(f, "SMPTE division ({fps} fps, {subframes} ticks per frame)")
            }
            Self::ZeroTicksPerQuarterNote => write!(f, "zero ticks per quarter note"),
        }
    }
}

/// The pipeline result type (see [`Error`])
pub type Result<T, E = Error> = core::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn smpte_message_names_the_rate() {
        let err = Error::UnsupportedTimeFormat(Timecode::Smpte {
            fps: 25,
            subframes: 40,
        });
        assert_eq!(
            err.to_string(),
            "Unsupported time format: SMPTE division (25 fps, 40 ticks per frame)"
        );
    }

    #[test]
    fn io_error_keeps_path() {
        let err: Error = FileReadError::Io {
            path: PathBuf::from("missing.mid"),
            source: io::Error::from(io::ErrorKind::NotFound),
        }
        .into();
        assert!(err.to_string().contains("missing.mid"));
        assert!(matches!(err, Error::FileRead(FileReadError::Io { .. })));
    }
}
