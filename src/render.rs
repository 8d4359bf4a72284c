#![doc = r#"
The boundary with whatever displays and plays the expressions.

A [`Renderer`] receives formatted expressions one at a time, each tagged with
an [`ExpressionId`]. Ids come from the [`Session`] driving the renderer, not
from global state, so two sessions never interfere.

# Concurrency

[`Renderer::submit`] takes `&mut self`: a renderer is driven by one caller at
a time. Several workers sharing one renderer must serialize their
submissions, for instance by sharing the [`Session`] behind a `Mutex`.
"#]

use core::fmt;
use std::io::Write;

use tracing::warn;

use crate::encode::{
    expression::Expression,
    latex::{LatexFormatter, Rendered},
};

/// Identifier of a submitted expression, unique within a [`Session`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ExpressionId(u64);

impl ExpressionId {
    /// Create an id from its number
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// The number of this id
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ExpressionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Something that displays or plays expressions.
///
/// Submission is fire-and-forget: failures are the renderer's to handle.
pub trait Renderer {
    /// Accepts one expression.
    fn submit(&mut self, id: ExpressionId, expression: &Rendered);
}

impl<R: Renderer + ?Sized> Renderer for &mut R {
    fn submit(&mut self, id: ExpressionId, expression: &Rendered) {
        (**self).submit(id, expression)
    }
}

#[doc = r#"
Drives a [`Renderer`], owning the id counter and the formatter.

Ids are handed out sequentially starting at 1.

# Example
```rust
# use tonegraph::prelude::*;
let mut session = Session::new(MemoryRenderer::default());
let first = session.submit(&Expression::TimeSlider { max: 2.0 });
let second = session.submit(&Expression::Gate { batch: 0 });

assert_eq!(first.get(), 1);
assert_eq!(second.get(), 2);
assert_eq!(session.renderer().submissions().len(), 2);
```
"#]
#[derive(Debug)]
pub struct Session<R> {
    renderer: R,
    formatter: LatexFormatter,
    next_id: u64,
}

impl<R: Renderer> Session<R> {
    /// Create a session with the default formatter.
    pub fn new(renderer: R) -> Self {
        Self::with_formatter(renderer, LatexFormatter::default())
    }

    /// Create a session formatting with `formatter`.
    pub fn with_formatter(renderer: R, formatter: LatexFormatter) -> Self {
        Self {
            renderer,
            formatter,
            next_id: 1,
        }
    }

    /// Formats and submits an expression, returning the id it was given.
    pub fn submit(&mut self, expression: &Expression) -> ExpressionId {
        let id = ExpressionId(self.next_id);
        self.next_id += 1;
        self.renderer.submit(id, &self.formatter.format(expression));
        id
    }

    /// Number of expressions submitted so far
    pub fn submitted(&self) -> u64 {
        self.next_id - 1
    }

    /// The renderer being driven
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Ends the session, returning the renderer.
    pub fn into_renderer(self) -> R {
        self.renderer
    }
}

/// Keeps every submission in memory.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryRenderer {
    submissions: Vec<(ExpressionId, Rendered)>,
}

impl MemoryRenderer {
    /// Submissions in the order they arrived
    pub fn submissions(&self) -> &[(ExpressionId, Rendered)] {
        &self.submissions
    }
}

impl Renderer for MemoryRenderer {
    fn submit(&mut self, id: ExpressionId, expression: &Rendered) {
        self.submissions.push((id, expression.clone()));
    }
}

#[doc = r#"
Writes one tab-separated line per submission: the id, the LaTeX, and for
sliders the bounds.

```text
1	t=0	0	4.250
2	F_{0}=[261.63]
```

A failed write is logged and the submission dropped.
"#]
#[derive(Debug)]
pub struct WriterRenderer<W> {
    writer: W,
}

impl<W: Write> WriterRenderer<W> {
    /// Create a renderer writing to `writer`
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Returns the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Renderer for WriterRenderer<W> {
    fn submit(&mut self, id: ExpressionId, expression: &Rendered) {
        let result = match expression.slider {
            Some(bounds) => writeln!(
                self.writer,
                "{id}\t{}\t{}\t{:.3}",
                expression.latex, bounds.min, bounds.max
            ),
            None => writeln!(self.writer, "{id}\t{}", expression.latex),
        };
        if let Err(err) = result {
            warn!(%id, %err, "failed to write expression");
        }
    }
}
