use std::collections::VecDeque;

use crate::Channel;

const KEYS: usize = 128;
const SLOTS: usize = 16 * KEYS;

/// A struck key still waiting for its release.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PendingNote {
    pub key: u8,
    pub velocity: u8,
    pub channel: Channel,
    pub start_tick: u64,
}

#[doc = r#"
Open notes of a single track, one slot per `(channel, key)`.

Slots are a flat arena indexed by `channel * 128 + key`. A slot holds a queue so
that the FIFO pairing policy can stack repeated strikes; under the default
policy it never holds more than one entry.
"#]
#[derive(Debug)]
pub(crate) struct PendingNotes {
    slots: Vec<VecDeque<PendingNote>>,
    open: usize,
}

impl PendingNotes {
    pub fn new() -> Self {
        Self {
            slots: vec![VecDeque::new(); SLOTS],
            open: 0,
        }
    }

    fn slot(channel: Channel, key: u8) -> usize {
        channel.index() * KEYS + usize::from(key & 0x7F)
    }

    /// Opens a note behind any already open on the same key.
    pub fn push(&mut self, note: PendingNote) {
        self.slots[Self::slot(note.channel, note.key)].push_back(note);
        self.open += 1;
    }

    /// Closes the oldest open note on `(channel, key)`, if any.
    pub fn pop(&mut self, channel: Channel, key: u8) -> Option<PendingNote> {
        let note = self.slots[Self::slot(channel, key)].pop_front()?;
        self.open -= 1;
        Some(note)
    }

    /// Number of notes currently open
    pub fn len(&self) -> usize {
        self.open
    }

    /// Discards every open note.
    pub fn clear(&mut self) {
        if self.open > 0 {
            self.slots.iter_mut().for_each(VecDeque::clear);
        }
        self.open = 0;
    }
}
