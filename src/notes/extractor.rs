use tracing::{debug, trace, warn};

use super::{
    ExtractionSummary, PairingPolicy, ResolvedNote,
    pending::{PendingNote, PendingNotes},
};
use crate::{
    Channel,
    file::{RawMessage, RawTrack},
    tempo::clock::TickClock,
};

/// The notes of a song, sorted by start time, and what it took to get them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Extraction {
    /// Resolved notes, stably sorted by start time
    pub notes: Vec<ResolvedNote>,
    /// Counts of kept and discarded events
    pub summary: ExtractionSummary,
}

#[doc = r#"
Turns the note events of every track into [`ResolvedNote`]s.

Tracks are walked one at a time in tick order. Open notes never carry over
from one track to the next.

# Example
```rust
# use tonegraph::prelude::*;
let on = RawMessage::NoteOn { channel: Channel::One, key: 69, velocity: 64 };
let off = RawMessage::NoteOff { channel: Channel::One, key: 69, velocity: 0 };
let track = RawTrack::from_deltas([(0, on), (960, off)]);

let clock = TickClock::new(&TempoMap::default(), 480);
let extraction = NoteExtractor::new(&clock).extract(&[track]);

assert_eq!(extraction.notes, vec![ResolvedNote::new(69, 64, Channel::One, 0.0, 1.0)]);
```
"#]
#[derive(Debug, Clone, Copy)]
pub struct NoteExtractor<'c> {
    clock: &'c TickClock,
    policy: PairingPolicy,
}

impl<'c> NoteExtractor<'c> {
    /// Create an extractor using the default pairing policy.
    pub fn new(clock: &'c TickClock) -> Self {
        Self {
            clock,
            policy: PairingPolicy::default(),
        }
    }

    /// Sets how releases are paired with strikes.
    pub fn with_policy(mut self, policy: PairingPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Extracts the notes of all `tracks`.
    pub fn extract(&self, tracks: &[RawTrack]) -> Extraction {
        let mut pending = PendingNotes::new();
        let mut extraction = Extraction::default();

        for (index, track) in tracks.iter().enumerate() {
            let before = extraction.notes.len();
            self.extract_track(track, &mut pending, &mut extraction);

            let unterminated = pending.len();
            pending.clear();
            if unterminated > 0 {
                warn!(track = index, unterminated, "dropping notes never released");
            }
            extraction.summary.unterminated += unterminated;
            debug!(
                track = index,
                notes = extraction.notes.len() - before,
                "extracted track"
            );
        }

        extraction
            .notes
            .sort_by(|a, b| a.start.total_cmp(&b.start));
        extraction.summary.notes = extraction.notes.len();
        extraction
    }

    fn extract_track(
        &self,
        track: &RawTrack,
        pending: &mut PendingNotes,
        extraction: &mut Extraction,
    ) {
        for event in track.events() {
            let (channel, key, strike) = match event.message {
                RawMessage::Tempo { .. } => continue,
                RawMessage::NoteOn {
                    channel,
                    key,
                    velocity,
                } if velocity > 0 => (channel, key, Some(velocity)),
                RawMessage::NoteOn { channel, key, .. }
                | RawMessage::NoteOff { channel, key, .. } => (channel, key, None),
            };

            if channel.is_percussion() {
                extraction.summary.percussion_events += 1;
                continue;
            }

            match strike {
                Some(velocity) => {
                    self.strike(channel, key, velocity, event.tick, pending, extraction)
                }
                None => match pending.pop(channel, key) {
                    Some(open) => self.close(open, event.tick, extraction),
                    None => {
                        trace!(?channel, key, tick = event.tick, "orphan note-off");
                        extraction.summary.orphan_note_offs += 1;
                    }
                },
            }
        }
    }

    fn strike(
        &self,
        channel: Channel,
        key: u8,
        velocity: u8,
        tick: u64,
        pending: &mut PendingNotes,
        extraction: &mut Extraction,
    ) {
        if self.policy == PairingPolicy::CloseOnRetrigger {
            if let Some(open) = pending.pop(channel, key) {
                trace!(?channel, key, tick, "retrigger closes open note");
                extraction.summary.retriggered += 1;
                self.close(open, tick, extraction);
            }
        }
        pending.push(PendingNote {
            key,
            velocity,
            channel,
            start_tick: tick,
        });
    }

    fn close(&self, open: PendingNote, end_tick: u64, extraction: &mut Extraction) {
        let start = self.clock.seconds_at(open.start_tick);
        let end = self.clock.seconds_at(end_tick);
        if end > start {
            extraction.notes.push(ResolvedNote::new(
                open.key,
                open.velocity,
                open.channel,
                start,
                end,
            ));
        } else {
            extraction.summary.degenerate += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{file::RawEvent, tempo::TempoMap};
    use pretty_assertions::assert_eq;

    fn on(tick: u64, channel: Channel, key: u8, velocity: u8) -> RawEvent {
        RawEvent::new(
            tick,
            RawMessage::NoteOn {
                channel,
                key,
                velocity,
            },
        )
    }

    fn off(tick: u64, channel: Channel, key: u8) -> RawEvent {
        RawEvent::new(
            tick,
            RawMessage::NoteOff {
                channel,
                key,
                velocity: 64,
            },
        )
    }

    // 120 BPM at 480 tpqn: 960 ticks per second
    fn clock() -> TickClock {
        TickClock::new(&TempoMap::default(), 480)
    }

    fn extract(policy: PairingPolicy, tracks: Vec<Vec<RawEvent>>) -> Extraction {
        let tracks: Vec<_> = tracks.into_iter().map(RawTrack::new).collect();
        NoteExtractor::new(&clock())
            .with_policy(policy)
            .extract(&tracks)
    }

    #[test]
    fn on_off_pair_resolves() {
        let result = extract(
            PairingPolicy::CloseOnRetrigger,
            vec![vec![on(0, Channel::One, 60, 100), off(960, Channel::One, 60)]],
        );
        assert_eq!(
            result.notes,
            vec![ResolvedNote::new(60, 100, Channel::One, 0.0, 1.0)]
        );
        assert_eq!(result.summary.notes, 1);
    }

    #[test]
    fn zero_velocity_note_on_releases() {
        let result = extract(
            PairingPolicy::CloseOnRetrigger,
            vec![vec![on(0, Channel::One, 60, 100), on(480, Channel::One, 60, 0)]],
        );
        assert_eq!(
            result.notes,
            vec![ResolvedNote::new(60, 100, Channel::One, 0.0, 0.5)]
        );
    }

    #[test]
    fn same_tick_pair_is_degenerate() {
        let result = extract(
            PairingPolicy::CloseOnRetrigger,
            vec![vec![on(240, Channel::One, 60, 100), off(240, Channel::One, 60)]],
        );
        assert!(result.notes.is_empty());
        assert_eq!(result.summary.degenerate, 1);
    }

    #[test]
    fn percussion_is_excluded() {
        let result = extract(
            PairingPolicy::CloseOnRetrigger,
            vec![vec![on(0, Channel::Ten, 36, 127), off(480, Channel::Ten, 36)]],
        );
        assert!(result.notes.is_empty());
        assert_eq!(result.summary.percussion_events, 2);
        assert_eq!(result.summary.orphan_note_offs, 0);
    }

    #[test]
    fn orphan_note_off_is_ignored() {
        let result = extract(
            PairingPolicy::CloseOnRetrigger,
            vec![vec![off(0, Channel::One, 60)]],
        );
        assert!(result.notes.is_empty());
        assert_eq!(result.summary.orphan_note_offs, 1);
    }

    #[test]
    fn unterminated_note_is_dropped() {
        let result = extract(
            PairingPolicy::CloseOnRetrigger,
            vec![vec![on(0, Channel::One, 60, 100)]],
        );
        assert!(result.notes.is_empty());
        assert_eq!(result.summary.unterminated, 1);
    }

    #[test]
    fn retrigger_closes_early() {
        let result = extract(
            PairingPolicy::CloseOnRetrigger,
            vec![vec![
                on(0, Channel::One, 60, 100),
                on(240, Channel::One, 60, 80),
                off(480, Channel::One, 60),
                off(720, Channel::One, 60),
            ]],
        );
        assert_eq!(
            result.notes,
            vec![
                ResolvedNote::new(60, 100, Channel::One, 0.0, 0.25),
                ResolvedNote::new(60, 80, Channel::One, 0.25, 0.5),
            ]
        );
        assert_eq!(result.summary.retriggered, 1);
        assert_eq!(result.summary.orphan_note_offs, 1);
    }

    #[test]
    fn fifo_pairs_oldest_first() {
        let result = extract(
            PairingPolicy::Fifo,
            vec![vec![
                on(0, Channel::One, 60, 100),
                on(240, Channel::One, 60, 80),
                off(480, Channel::One, 60),
                off(720, Channel::One, 60),
            ]],
        );
        assert_eq!(
            result.notes,
            vec![
                ResolvedNote::new(60, 100, Channel::One, 0.0, 0.5),
                ResolvedNote::new(60, 80, Channel::One, 0.25, 0.75),
            ]
        );
        assert_eq!(result.summary.retriggered, 0);
    }

    #[test]
    fn channels_do_not_share_slots() {
        let result = extract(
            PairingPolicy::CloseOnRetrigger,
            vec![vec![
                on(0, Channel::One, 60, 100),
                on(240, Channel::Two, 60, 100),
                off(480, Channel::One, 60),
                off(960, Channel::Two, 60),
            ]],
        );
        assert_eq!(
            result.notes,
            vec![
                ResolvedNote::new(60, 100, Channel::One, 0.0, 0.5),
                ResolvedNote::new(60, 100, Channel::Two, 0.25, 1.0),
            ]
        );
    }

    #[test]
    fn open_notes_do_not_cross_tracks() {
        let result = extract(
            PairingPolicy::CloseOnRetrigger,
            vec![
                vec![on(0, Channel::One, 60, 100)],
                vec![off(480, Channel::One, 60)],
            ],
        );
        assert!(result.notes.is_empty());
        assert_eq!(result.summary.unterminated, 1);
        assert_eq!(result.summary.orphan_note_offs, 1);
    }

    #[test]
    fn output_is_sorted_by_start_across_tracks() {
        let result = extract(
            PairingPolicy::CloseOnRetrigger,
            vec![
                vec![on(480, Channel::One, 64, 100), off(960, Channel::One, 64)],
                vec![on(0, Channel::Two, 48, 90), off(960, Channel::Two, 48)],
                vec![on(480, Channel::Three, 67, 70), off(720, Channel::Three, 67)],
            ],
        );
        let keys: Vec<_> = result.notes.iter().map(|n| n.key).collect();
        // ties keep discovery order
        assert_eq!(keys, vec![48, 64, 67]);
    }
}
