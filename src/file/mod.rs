#![doc = r#"
The boundary with the MIDI container.

Parsing the chunk structure is delegated to [`midly`]. This module only keeps
what the later stages need: the header's ticks per quarter note, and for each
track the tempo and note events at their absolute tick positions.
"#]

mod timing;

mod track;
pub use track::*;

use std::path::Path;

use midly::{MetaMessage, MidiMessage, Smf, TrackEventKind};
use tracing::debug;

use crate::{Channel, FileReadError, Result};

#[doc = r#"
An owned, metrically timed Standard MIDI File.

# Example
```rust
# use tonegraph::prelude::*;
let song = Song::new(480, vec![RawTrack::from_deltas([
    (0, RawMessage::tempo_bpm(120.0)),
])]);
assert_eq!(song.ticks_per_quarter_note(), 480);
assert_eq!(song.tracks().len(), 1);
```
"#]
#[derive(Clone, Debug, PartialEq)]
pub struct Song {
    ticks_per_quarter_note: u16,
    tracks: Vec<RawTrack>,
}

impl Song {
    /// Create a song from already decoded tracks.
    ///
    /// `ticks_per_quarter_note` must be non-zero; [`Song::parse`] guarantees this.
    pub fn new(ticks_per_quarter_note: u16, tracks: Vec<RawTrack>) -> Self {
        Self {
            ticks_per_quarter_note,
            tracks,
        }
    }

    /// Reads and parses the file at `path`.
    pub fn read(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| FileReadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&bytes)
    }

    /// Parses a set of bytes into a song.
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        let smf = Smf::parse(bytes).map_err(FileReadError::from)?;
        let ticks_per_quarter_note = timing::ticks_per_quarter_note(smf.header.timing)?;

        debug!(
            format = ?smf.header.format,
            tracks = smf.tracks.len(),
            ticks_per_quarter_note,
            "parsed MIDI container"
        );

        let tracks = smf.tracks.iter().map(|track| decode_track(track)).collect();
        Ok(Self::new(ticks_per_quarter_note, tracks))
    }

    /// The fixed tick resolution of the file
    pub fn ticks_per_quarter_note(&self) -> u16 {
        self.ticks_per_quarter_note
    }

    /// Returns the tracks, in file order
    pub fn tracks(&self) -> &[RawTrack] {
        &self.tracks
    }
}

fn decode_track(track: &[midly::TrackEvent<'_>]) -> RawTrack {
    // skipped events still advance the clock
    let mut tick = 0u64;
    let mut events = Vec::new();
    for event in track {
        tick += u64::from(event.delta.as_int());
        if let Some(message) = decode_message(&event.kind) {
            events.push(RawEvent::new(tick, message));
        }
    }
    RawTrack::new(events)
}

fn decode_message(kind: &TrackEventKind<'_>) -> Option<RawMessage> {
    match *kind {
        TrackEventKind::Meta(MetaMessage::Tempo(micros)) => Some(RawMessage::Tempo {
            micros_per_quarter_note: micros.as_int(),
        }),
        TrackEventKind::Midi { channel, message } => {
            let channel = Channel::from_nibble(channel.as_int());
            match message {
                MidiMessage::NoteOn { key, vel } => Some(RawMessage::NoteOn {
                    channel,
                    key: key.as_int(),
                    velocity: vel.as_int(),
                }),
                MidiMessage::NoteOff { key, vel } => Some(RawMessage::NoteOff {
                    channel,
                    key: key.as_int(),
                    velocity: vel.as_int(),
                }),
                _ => None,
            }
        }
        _ => None,
    }
}
