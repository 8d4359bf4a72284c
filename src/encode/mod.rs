#![doc = r#"
Partitioning resolved notes into bounded batches for the renderer.

A renderer cannot take a whole song in one expression, so notes are cut into
groups of at most [`ChunkSize`] notes. Each batch becomes four parallel lists
(frequency, start, end and volume), a gate that is non-negative exactly while
a note of the batch sounds, and one tone trigger reading all of them:

```text
F_{i} = [f0, f1, ...]       S_{i} = [s0, s1, ...]
E_{i} = [e0, e1, ...]       V_{i} = [v0, v1, ...]
G_{i} = (t - S_{i})(E_{i} - t)
tone(F_{i}, V_{i} where G_{i} >= 0)
```
"#]

pub mod expression;

pub mod latex;

use tracing::debug;

use crate::{config::ChunkSize, notes::ResolvedNote};
use expression::{Expression, Series, Variable};

/// A contiguous group of notes and the lists derived from them.
#[derive(Debug, Clone, PartialEq)]
pub struct Batch {
    index: usize,
    notes: Vec<ResolvedNote>,
    frequencies: Vec<f64>,
    starts: Vec<f64>,
    ends: Vec<f64>,
    volumes: Vec<f64>,
}

impl Batch {
    fn new(index: usize, notes: &[ResolvedNote]) -> Self {
        Self {
            index,
            notes: notes.to_vec(),
            frequencies: notes.iter().map(ResolvedNote::frequency).collect(),
            starts: notes.iter().map(|note| note.start).collect(),
            ends: notes.iter().map(|note| note.end).collect(),
            volumes: notes.iter().map(ResolvedNote::loudness).collect(),
        }
    }

    /// Position of this batch, starting at 0
    pub fn index(&self) -> usize {
        self.index
    }

    /// The notes of the batch, in start order
    pub fn notes(&self) -> &[ResolvedNote] {
        &self.notes
    }

    /// Number of notes in the batch
    pub fn len(&self) -> usize {
        self.notes.len()
    }

    /// Batches are never empty; provided for completeness
    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Frequencies in hertz, one per note
    pub fn frequencies(&self) -> &[f64] {
        &self.frequencies
    }

    /// Start times in seconds, one per note
    pub fn starts(&self) -> &[f64] {
        &self.starts
    }

    /// End times in seconds, one per note
    pub fn ends(&self) -> &[f64] {
        &self.ends
    }

    /// Volumes in `[0, 1]`, one per note
    pub fn volumes(&self) -> &[f64] {
        &self.volumes
    }

    /// True where the gate of note `slot` is non-negative at `time`.
    ///
    /// This evaluates the same product the [`Expression::Gate`] declares.
    pub fn is_audible(&self, slot: usize, time: f64) -> bool {
        (time - self.starts[slot]) * (self.ends[slot] - time) >= 0.0
    }

    /// The expressions declaring and playing this batch, in submission order.
    pub fn expressions(&self) -> Vec<Expression> {
        let list = |series, values: &[f64]| Expression::List {
            variable: Variable::batch(series, self.index),
            values: values.to_vec(),
        };
        vec![
            list(Series::Frequency, &self.frequencies),
            list(Series::Start, &self.starts),
            list(Series::End, &self.ends),
            list(Series::Volume, &self.volumes),
            Expression::Gate { batch: self.index },
            Expression::Tone { batch: self.index },
        ]
    }
}

/// All batches of a song plus the length of its playback.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Encoding {
    batches: Vec<Batch>,
    max_end: f64,
}

impl Encoding {
    /// Batches in increasing index order
    pub fn batches(&self) -> &[Batch] {
        &self.batches
    }

    /// The latest end time of any note; the time variable ranges over `[0, max_end]`.
    pub fn max_end(&self) -> f64 {
        self.max_end
    }

    /// Every expression to submit, in an order where declarations precede use.
    ///
    /// With `visualize`, a scatter follows each batch's tone trigger.
    pub fn expressions(&self, visualize: bool) -> Vec<Expression> {
        let mut expressions = vec![Expression::TimeSlider { max: self.max_end }];
        for batch in &self.batches {
            expressions.extend(batch.expressions());
            if visualize {
                expressions.push(Expression::Scatter { batch: batch.index });
            }
        }
        expressions
    }
}

#[doc = r#"
Cuts a start-sorted note list into [`Batch`]es.

For `N` notes there are `ceil(N / chunk_size)` batches, all full except
possibly the last, and reading them in order gives back the input.
"#]
#[derive(Debug, Clone, Copy, Default)]
pub struct BatchEncoder {
    chunk_size: ChunkSize,
}

impl BatchEncoder {
    /// Create an encoder with a fixed batch capacity.
    pub const fn new(chunk_size: ChunkSize) -> Self {
        Self { chunk_size }
    }

    /// Batches `notes`, which should already be sorted by start time.
    pub fn encode(&self, notes: &[ResolvedNote]) -> Encoding {
        let batches: Vec<_> = notes
            .chunks(self.chunk_size.get())
            .enumerate()
            .map(|(index, chunk)| Batch::new(index, chunk))
            .collect();
        let max_end = notes.iter().map(|note| note.end).fold(0.0, f64::max);

        debug!(
            notes = notes.len(),
            batches = batches.len(),
            chunk_size = self.chunk_size.get(),
            max_end,
            "encoded batches"
        );
        Encoding { batches, max_end }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Channel;
    use pretty_assertions::assert_eq;

    fn notes(count: usize) -> Vec<ResolvedNote> {
        (0..count)
            .map(|i| {
                let start = i as f64 * 0.5;
                ResolvedNote::new(48 + i as u8, 100, Channel::One, start, start + 0.75)
            })
            .collect()
    }

    fn encoder(chunk_size: usize) -> BatchEncoder {
        BatchEncoder::new(ChunkSize::new(chunk_size).unwrap())
    }

    #[test]
    fn five_notes_in_twos() {
        let notes = notes(5);
        let encoding = encoder(2).encode(&notes);
        let sizes: Vec<_> = encoding.batches().iter().map(Batch::len).collect();
        assert_eq!(sizes, vec![2, 2, 1]);

        let indices: Vec<_> = encoding.batches().iter().map(Batch::index).collect();
        assert_eq!(indices, vec![0, 1, 2]);

        let joined: Vec<_> = encoding
            .batches()
            .iter()
            .flat_map(|batch| batch.notes().iter().copied())
            .collect();
        assert_eq!(joined, notes);
    }

    #[test]
    fn batch_count_is_ceiling() {
        for count in 0..20 {
            for size in 1..7 {
                let encoding = encoder(size).encode(&notes(count));
                assert_eq!(encoding.batches().len(), count.div_ceil(size));
            }
        }
    }

    #[test]
    fn parallel_lists_align() {
        let encoding = encoder(3).encode(&notes(3));
        let batch = &encoding.batches()[0];
        assert_eq!(batch.frequencies().len(), 3);
        assert_eq!(batch.starts(), &[0.0, 0.5, 1.0]);
        assert_eq!(batch.ends(), &[0.75, 1.25, 1.75]);
        assert_eq!(batch.volumes()[0], batch.notes()[0].loudness());
        assert_eq!(batch.frequencies()[1], crate::frequency(49));
    }

    #[test]
    fn max_end_is_latest_release() {
        let mut notes = notes(3);
        notes[0].end = 9.0;
        assert_eq!(encoder(2).encode(&notes).max_end(), 9.0);
        assert_eq!(encoder(2).encode(&[]).max_end(), 0.0);
    }

    #[test]
    fn gate_is_non_negative_only_inside_note() {
        let encoding = encoder(4).encode(&notes(1));
        let batch = &encoding.batches()[0];
        assert!(!batch.is_audible(0, -0.01));
        assert!(batch.is_audible(0, 0.0));
        assert!(batch.is_audible(0, 0.4));
        assert!(batch.is_audible(0, 0.75));
        assert!(!batch.is_audible(0, 0.76));
    }

    #[test]
    fn declarations_precede_use() {
        let encoding = encoder(2).encode(&notes(5));
        for visualize in [false, true] {
            let mut declared = Vec::new();
            for expression in encoding.expressions(visualize) {
                for variable in expression.references() {
                    assert!(declared.contains(&variable), "{variable} used before declared");
                }
                declared.extend(expression.declares());
            }
        }
    }

    #[test]
    fn visualize_adds_one_scatter_per_batch() {
        let encoding = encoder(2).encode(&notes(5));
        let plain = encoding.expressions(false);
        let visual = encoding.expressions(true);
        assert_eq!(plain.len(), 1 + 3 * 6);
        assert_eq!(visual.len(), plain.len() + 3);
        assert_eq!(plain[0], Expression::TimeSlider { max: 2.75 });
    }
}
