#![doc = r#"
Tempo-correct note extraction from Standard MIDI Files, encoded as bounded
batches of tone expressions.

# Overview

A MIDI file stores time as ticks. Turning ticks into seconds requires every
tempo change in the file, wherever it lives. `tonegraph` does that in a
few forward-only stages:

```text
  .mid bytes ──▶ Song ──▶ TempoMap ──▶ TickClock
                  │                       │
                  └────▶ NoteExtractor ◀──┘
                              │
                     Vec<ResolvedNote>
                              │
                         BatchEncoder ──▶ Expression ──▶ Session<Renderer>
```

# Example
```rust
# use tonegraph::prelude::*;
let notes = vec![
    ResolvedNote::new(60, 100, Channel::One, 0.0, 1.0),
    ResolvedNote::new(64, 90, Channel::One, 0.5, 1.5),
];
let encoding = BatchEncoder::new(ChunkSize::new(1).unwrap()).encode(&notes);
assert_eq!(encoding.batches().len(), 2);

let mut session = Session::new(MemoryRenderer::default());
for expression in encoding.expressions(false) {
    session.submit(&expression);
}
assert_eq!(session.renderer().submissions()[0].1.latex, "t=0");
```
"#]
#![warn(missing_docs)]

mod channel;
pub use channel::*;

pub mod config;

pub mod encode;

mod error;
pub use error::*;

pub mod file;

pub mod notes;

pub mod pipeline;

mod pitch;
pub use pitch::*;

pub mod render;

pub mod tempo;

/// Commonly used types
pub mod prelude {
    pub use crate::{
        Channel, Error, FileReadError, Result, Timecode,
        config::{ChunkSize, Config, ConfigError},
        encode::{
            Batch, BatchEncoder, Encoding,
            expression::{Expression, Series, Variable},
            latex::{LatexFormatter, Rendered, SliderBounds},
        },
        file::{RawEvent, RawMessage, RawTrack, Song},
        frequency, loudness,
        notes::{Extraction, ExtractionSummary, NoteExtractor, PairingPolicy, ResolvedNote},
        pipeline::{Pipeline, Processed, Report},
        render::{ExpressionId, MemoryRenderer, Renderer, Session, WriterRenderer},
        tempo::{TempoChange, TempoMap, clock::TickClock},
    };
}
