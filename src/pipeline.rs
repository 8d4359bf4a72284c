#![doc = r#"
Wires the stages together: read, build the tempo map, extract notes, encode
batches and submit expressions.

Every stage takes the previous stage's output by reference and returns a new
value; nothing is shared or mutated across stages.
"#]

use std::path::Path;

use tracing::info;

use crate::{
    Result,
    config::Config,
    encode::{BatchEncoder, Encoding},
    file::Song,
    notes::{Extraction, ExtractionSummary, NoteExtractor, ResolvedNote},
    render::{Renderer, Session},
    tempo::{TempoMap, clock::TickClock},
};

/// What a pipeline run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    /// Notes kept and discarded during extraction
    pub summary: ExtractionSummary,
    /// Number of batches encoded
    pub batches: usize,
    /// Number of expressions submitted to the renderer
    pub expressions: u64,
    /// End of the last note, in seconds
    pub duration: f64,
}

/// The notes of a song together with their batch encoding.
#[derive(Debug, Clone, PartialEq)]
pub struct Processed {
    /// The output of the note extractor
    pub extraction: Extraction,
    /// The batches built from the extracted notes
    pub encoding: Encoding,
}

impl Processed {
    /// The extracted notes, sorted by start time
    pub fn notes(&self) -> &[ResolvedNote] {
        &self.extraction.notes
    }
}

#[doc = r#"
Runs a configured conversion from MIDI file to renderer.

# Example
```rust
# use tonegraph::prelude::*;
let on = RawMessage::NoteOn { channel: Channel::One, key: 60, velocity: 100 };
let off = RawMessage::NoteOff { channel: Channel::One, key: 60, velocity: 0 };
let song = Song::new(480, vec![RawTrack::from_deltas([(0, on), (480, off)])]);

let pipeline = Pipeline::new(Config::default());
let mut session = Session::new(MemoryRenderer::default());
let report = pipeline.render(&song, &mut session);

assert_eq!(report.summary.notes, 1);
assert_eq!(report.duration, 0.5);
```
"#]
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    config: Config,
}

impl Pipeline {
    /// Create a pipeline with the given options
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// The options this pipeline runs with
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Extracts and encodes the notes of a song without submitting anything.
    pub fn process(&self, song: &Song) -> Processed {
        let tempo_map = TempoMap::from_tracks(song.tracks());
        let clock = TickClock::new(&tempo_map, song.ticks_per_quarter_note());
        let extraction = NoteExtractor::new(&clock)
            .with_policy(self.config.pairing)
            .extract(song.tracks());
        let encoding = BatchEncoder::new(self.config.chunk_size).encode(&extraction.notes);
        Processed {
            extraction,
            encoding,
        }
    }

    /// Processes a song and submits every expression to the session.
    pub fn render<R: Renderer>(&self, song: &Song, session: &mut Session<R>) -> Report {
        let Processed {
            extraction,
            encoding,
        } = self.process(song);

        let before = session.submitted();
        for expression in encoding.expressions(self.config.visualize) {
            session.submit(&expression);
        }

        let report = Report {
            summary: extraction.summary,
            batches: encoding.batches().len(),
            expressions: session.submitted() - before,
            duration: encoding.max_end(),
        };
        info!(
            summary = %report.summary,
            batches = report.batches,
            expressions = report.expressions,
            duration = report.duration,
            "rendered song"
        );
        report
    }

    /// Reads the file at `path` and renders it.
    ///
    /// Fails before anything is submitted if the file cannot be read or
    /// uses an unsupported time format.
    pub fn run<R: Renderer>(
        &self,
        path: impl AsRef<Path>,
        session: &mut Session<R>,
    ) -> Result<Report> {
        let song = Song::read(path)?;
        Ok(self.render(&song, session))
    }
}
