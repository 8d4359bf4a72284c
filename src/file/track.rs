use crate::Channel;

/// The subset of MIDI messages the timing and note stages look at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawMessage {
    /// A set-tempo meta event
    Tempo {
        /// Microseconds per quarter note from this event onward
        micros_per_quarter_note: u32,
    },
    /// Note on. A velocity of zero is a release by MIDI convention.
    NoteOn {
        /// The channel the key was struck on
        channel: Channel,
        /// The key, 0-127
        key: u8,
        /// The strike velocity, 0-127
        velocity: u8,
    },
    /// Note off
    NoteOff {
        /// The channel the key was released on
        channel: Channel,
        /// The key, 0-127
        key: u8,
        /// The release velocity, 0-127
        velocity: u8,
    },
}

impl RawMessage {
    /// Builds a tempo event from beats per minute.
    pub fn tempo_bpm(bpm: f64) -> Self {
        Self::Tempo {
            micros_per_quarter_note: (60_000_000.0 / bpm).round() as u32,
        }
    }
}

/// A message placed at an absolute tick position of its track.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawEvent {
    /// Ticks since the start of the track
    pub tick: u64,
    /// The message
    pub message: RawMessage,
}

impl RawEvent {
    /// Create a new event at an absolute tick
    pub const fn new(tick: u64, message: RawMessage) -> Self {
        Self { tick, message }
    }
}

#[doc = r#"
The events of one track chunk, in file order.

Ticks are absolute (already accumulated from the per-event deltas), so they
are non-decreasing through the list.
"#]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTrack {
    events: Vec<RawEvent>,
}

impl RawTrack {
    /// Builds a track from absolute-tick events.
    ///
    /// Events are stably sorted by tick so hand-built tracks behave like parsed ones.
    pub fn new(mut events: Vec<RawEvent>) -> Self {
        events.sort_by_key(|event| event.tick);
        Self { events }
    }

    /// Builds a track from `(delta, message)` pairs, the way they are stored in a file.
    pub fn from_deltas<I>(deltas: I) -> Self
    where
        I: IntoIterator<Item = (u32, RawMessage)>,
    {
        let mut tick = 0u64;
        let events = deltas
            .into_iter()
            .map(|(delta, message)| {
                tick += u64::from(delta);
                RawEvent::new(tick, message)
            })
            .collect();
        Self { events }
    }

    /// The events of the track
    pub fn events(&self) -> &[RawEvent] {
        &self.events
    }

    /// Number of events kept from the track chunk
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// True if no tempo or note event was found in the track
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
