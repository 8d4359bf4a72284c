#![doc = r#"
Tempo changes and the map they form across a whole file.

A tempo change may live on any track (format 1 files usually keep them on
the first one), but it applies to every track. The [`TempoMap`] collects them
all into a single sorted timeline that always starts at tick 0.
"#]

pub mod clock;

use tracing::{debug, trace};

use crate::file::{RawMessage, RawTrack};

/// Tempo assumed until the file says otherwise: 120 beats per minute.
pub const DEFAULT_MICROS_PER_QUARTER_NOTE: u32 = 500_000;

const MICROS_PER_MINUTE: f64 = 60_000_000.0;

/// A tempo taking effect at an absolute tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TempoChange {
    tick: u64,
    micros_per_quarter_note: u32,
}

impl TempoChange {
    /// Create a tempo change from microseconds per quarter note.
    ///
    /// # Panics
    /// if `micros_per_quarter_note` is zero.
    pub const fn new(tick: u64, micros_per_quarter_note: u32) -> Self {
        assert!(micros_per_quarter_note > 0, "tempo must be positive");
        Self {
            tick,
            micros_per_quarter_note,
        }
    }

    /// Create a tempo change from beats per minute.
    pub fn from_bpm(tick: u64, bpm: f64) -> Self {
        Self::new(tick, (MICROS_PER_MINUTE / bpm).round() as u32)
    }

    /// The tick this tempo starts at
    pub const fn tick(&self) -> u64 {
        self.tick
    }

    /// Microseconds per quarter note, as stored in the file
    pub const fn micros_per_quarter_note(&self) -> u32 {
        self.micros_per_quarter_note
    }

    /// Seconds per quarter note
    pub fn seconds_per_quarter_note(&self) -> f64 {
        f64::from(self.micros_per_quarter_note) / 1_000_000.0
    }

    /// Beats (quarter notes) per minute
    pub fn bpm(&self) -> f64 {
        MICROS_PER_MINUTE / f64::from(self.micros_per_quarter_note)
    }
}

#[doc = r#"
Every tempo change of a file, sorted by tick.

Invariants:
- never empty, and the first entry is at tick 0 (120 BPM unless the file sets
  a tempo there)
- ticks are strictly increasing; of several changes at the same tick the one
  found last wins

# Example
```rust
# use tonegraph::prelude::*;
let track = RawTrack::from_deltas([(480, RawMessage::tempo_bpm(60.0))]);
let map = TempoMap::from_tracks(&[track]);

assert_eq!(map.changes().len(), 2);
assert_eq!(map.changes()[0].bpm(), 120.0);
assert_eq!(map.changes()[1].tick(), 480);
```
"#]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TempoMap {
    changes: Vec<TempoChange>,
}

impl Default for TempoMap {
    fn default() -> Self {
        Self {
            changes: vec![TempoChange::new(0, DEFAULT_MICROS_PER_QUARTER_NOTE)],
        }
    }
}

impl TempoMap {
    /// Scans every track for tempo events.
    pub fn from_tracks(tracks: &[RawTrack]) -> Self {
        let mut found = Vec::new();
        for (index, track) in tracks.iter().enumerate() {
            for event in track.events() {
                let RawMessage::Tempo {
                    micros_per_quarter_note,
                } = event.message
                else {
                    continue;
                };
                if micros_per_quarter_note == 0 {
                    trace!(track = index, tick = event.tick, "ignoring zero tempo");
                    continue;
                }
                found.push(TempoChange::new(event.tick, micros_per_quarter_note));
            }
        }
        debug!(tempo_changes = found.len(), "scanned tempo events");
        Self::from_changes(found)
    }

    /// Builds a map from changes in discovery order.
    ///
    /// Changes are stably sorted by tick, later duplicates at the same tick
    /// replace earlier ones, and the default tempo fills tick 0 if nothing
    /// else does.
    pub fn from_changes(mut found: Vec<TempoChange>) -> Self {
        found.sort_by_key(TempoChange::tick);

        let mut changes: Vec<TempoChange> = Vec::with_capacity(found.len() + 1);
        for change in found {
            match changes.last_mut() {
                Some(last) if last.tick == change.tick => *last = change,
                _ => changes.push(change),
            }
        }

        if changes.first().is_none_or(|first| first.tick != 0) {
            changes.insert(0, TempoChange::new(0, DEFAULT_MICROS_PER_QUARTER_NOTE));
        }
        Self { changes }
    }

    /// Sorted tempo changes, starting at tick 0
    pub fn changes(&self) -> &[TempoChange] {
        &self.changes
    }

    /// The tempo in effect at `tick`.
    pub fn tempo_at(&self, tick: u64) -> TempoChange {
        self.changes[self.segment_index(tick)]
    }

    /// Index of the last change at or before `tick`.
    pub(crate) fn segment_index(&self, tick: u64) -> usize {
        // the first change is at tick 0, so this never underflows
        self.changes.partition_point(|change| change.tick <= tick) - 1
    }
}
