#![doc = r#"
Pairing note-on and note-off events into sounding intervals.

# Pairing

A key that is struck again before it is released is ambiguous in MIDI. Two
[`PairingPolicy`] variants are supported:

```text
 tick:        0        240       480      720
 events:      on       on        off      off
 close-on-retrigger:
              [0, 240) [240, 480)            (second off is an orphan)
 fifo:
              [0, 480)           [240, 720)
```

Percussion (channel 10) never produces notes. Notes still open when their
track ends are dropped, as are notes that would last zero seconds.
"#]

mod extractor;
pub use extractor::*;

mod pending;

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::{Channel, frequency, loudness};

/// A note with absolute start and end times in seconds.
///
/// Produced by [`NoteExtractor`]; `end > start` always holds for notes it emits.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResolvedNote {
    /// MIDI key, 0-127
    pub key: u8,
    /// Strike velocity, 1-127
    pub velocity: u8,
    /// The channel the note was played on
    pub channel: Channel,
    /// Seconds from the start of the song
    pub start: f64,
    /// Seconds from the start of the song
    pub end: f64,
}

impl ResolvedNote {
    /// Create a new note
    pub const fn new(key: u8, velocity: u8, channel: Channel, start: f64, end: f64) -> Self {
        Self {
            key,
            velocity,
            channel,
            start,
            end,
        }
    }

    /// How long the note sounds, in seconds
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// Frequency of the note in hertz
    pub fn frequency(&self) -> f64 {
        frequency(self.key)
    }

    /// Pitch-compensated loudness in `[0, 1]`
    pub fn loudness(&self) -> f64 {
        loudness(self.key, self.velocity)
    }
}

/// How a note-off finds the note-on it closes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PairingPolicy {
    /// One open note per key. Striking an open key closes it at the new
    /// strike and opens a fresh note.
    #[default]
    CloseOnRetrigger,
    /// Repeated strikes queue up; each release closes the oldest one.
    Fifo,
}

/// Counts of what the extractor kept and what it threw away.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ExtractionSummary {
    /// Notes emitted
    pub notes: usize,
    /// Notes closed early by a retrigger of their key
    pub retriggered: usize,
    /// Pairs dropped because they lasted no time at all
    pub degenerate: usize,
    /// Notes still open at the end of their track
    pub unterminated: usize,
    /// Releases with nothing open to close
    pub orphan_note_offs: usize,
    /// Note events on the percussion channel
    pub percussion_events: usize,
}

impl fmt::Display for ExtractionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} notes ({} retriggered), dropped {} zero-length, {} unterminated, \
             ignored {} orphan note-offs and {} percussion events",
            self.notes,
            self.retriggered,
            self.degenerate,
            self.unterminated,
            self.orphan_note_offs,
            self.percussion_events
        )
    }
}
