#![allow(dead_code)]

/// Builds Standard MIDI File bytes one track at a time.
pub struct SmfBuilder {
    division: [u8; 2],
    tracks: Vec<Vec<u8>>,
}

impl SmfBuilder {
    pub fn metrical(ticks_per_quarter_note: u16) -> Self {
        Self {
            division: (ticks_per_quarter_note & 0x7FFF).to_be_bytes(),
            tracks: Vec::new(),
        }
    }

    /// Frame based division. `fps` is 24, 25, 29 or 30.
    pub fn smpte(fps: u8, ticks_per_frame: u8) -> Self {
        Self {
            division: [(-(fps as i8)) as u8, ticks_per_frame],
            tracks: Vec::new(),
        }
    }

    pub fn track(mut self, track: TrackBuilder) -> Self {
        self.tracks.push(track.finish());
        self
    }

    pub fn build(self) -> Vec<u8> {
        let format: u16 = if self.tracks.len() == 1 { 0 } else { 1 };
        let mut bytes = Vec::new();

        bytes.extend_from_slice(b"MThd");
        bytes.extend_from_slice(&6u32.to_be_bytes());
        bytes.extend_from_slice(&format.to_be_bytes());
        bytes.extend_from_slice(&(self.tracks.len() as u16).to_be_bytes());
        bytes.extend_from_slice(&self.division);

        for track in self.tracks {
            bytes.extend_from_slice(b"MTrk");
            bytes.extend_from_slice(&(track.len() as u32).to_be_bytes());
            bytes.extend_from_slice(&track);
        }
        bytes
    }
}

/// Builds the body of one track chunk from delta-timed events.
#[derive(Default)]
pub struct TrackBuilder {
    bytes: Vec<u8>,
}

impl TrackBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tempo_bpm(self, delta: u32, bpm: f64) -> Self {
        let micros = (60_000_000.0 / bpm).round() as u32;
        let [_, a, b, c] = micros.to_be_bytes();
        self.event(delta, &[0xFF, 0x51, 0x03, a, b, c])
    }

    pub fn note_on(self, delta: u32, channel: u8, key: u8, velocity: u8) -> Self {
        self.event(delta, &[0x90 | (channel & 0x0F), key, velocity])
    }

    pub fn note_off(self, delta: u32, channel: u8, key: u8) -> Self {
        self.event(delta, &[0x80 | (channel & 0x0F), key, 0x40])
    }

    pub fn program_change(self, delta: u32, channel: u8, program: u8) -> Self {
        self.event(delta, &[0xC0 | (channel & 0x0F), program])
    }

    fn event(mut self, delta: u32, data: &[u8]) -> Self {
        write_vlq(&mut self.bytes, delta);
        self.bytes.extend_from_slice(data);
        self
    }

    fn finish(mut self) -> Vec<u8> {
        write_vlq(&mut self.bytes, 0);
        self.bytes.extend_from_slice(&[0xFF, 0x2F, 0x00]);
        self.bytes
    }
}

/// Variable length quantity, 7 bits per byte, most significant first.
fn write_vlq(bytes: &mut Vec<u8>, mut value: u32) {
    let mut groups = vec![(value & 0x7F) as u8];
    value >>= 7;
    while value > 0 {
        groups.push((value & 0x7F) as u8 | 0x80);
        value >>= 7;
    }
    bytes.extend(groups.iter().rev());
}

