use itertools::Itertools;

use super::expression::{Expression, Series, Variable};

/// Range a renderer should let the user drive a slider over.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderBounds {
    /// Lower bound
    pub min: f64,
    /// Upper bound
    pub max: f64,
}

/// An expression in the renderer's textual syntax.
#[derive(Debug, Clone, PartialEq)]
pub struct Rendered {
    /// The LaTeX source of the expression
    pub latex: String,
    /// Set when the expression declares a slider
    pub slider: Option<SliderBounds>,
}

impl Rendered {
    fn plain(latex: String) -> Self {
        Self {
            latex,
            slider: None,
        }
    }
}

#[doc = r#"
Formats [`Expression`]s as graphing-calculator LaTeX.

Frequencies are written with two decimals; times and volumes with three, so
times are rounded to the millisecond.

# Example
```rust
# use tonegraph::prelude::*;
let formatter = LatexFormatter::default();
assert_eq!(
    formatter.format(&Expression::Gate { batch: 0 }).latex,
    "G_{0}=(t-S_{0})(E_{0}-t)"
);
assert_eq!(
    formatter.format(&Expression::Tone { batch: 0 }).latex,
    r"\operatorname{tone}(F_{0},V_{0}\{G_{0}\ge0\})"
);
```
"#]
#[derive(Debug, Clone, Copy)]
pub struct LatexFormatter {
    frequency_decimals: usize,
    time_decimals: usize,
    volume_decimals: usize,
}

impl Default for LatexFormatter {
    fn default() -> Self {
        Self {
            frequency_decimals: 2,
            time_decimals: 3,
            volume_decimals: 3,
        }
    }
}

impl LatexFormatter {
    /// Renders one expression.
    pub fn format(&self, expression: &Expression) -> Rendered {
        use Series::*;
        match expression {
            Expression::TimeSlider { max } => Rendered {
                latex: format!("{}=0", Variable::Time),
                slider: Some(SliderBounds {
                    min: 0.0,
                    max: self.round(*max, self.time_decimals),
                }),
            },
            Expression::List { variable, values } => {
                let decimals = self.decimals(variable);
                let list = values
                    .iter()
                    .map(|value| format!("{value:.decimals$}"))
                    .join(",");
                Rendered::plain(format!("{variable}=[{list}]"))
            }
            Expression::Gate { batch } => Rendered::plain(format!(
                "{}=({}-{})({}-{})",
                Variable::batch(Gate, *batch),
                Variable::Time,
                Variable::batch(Start, *batch),
                Variable::batch(End, *batch),
                Variable::Time,
            )),
            Expression::Tone { batch } => Rendered::plain(format!(
                r"\operatorname{{tone}}({},{}\{{{}\ge0\}})",
                Variable::batch(Frequency, *batch),
                Variable::batch(Volume, *batch),
                Variable::batch(Gate, *batch),
            )),
            Expression::Scatter { batch } => Rendered::plain(format!(
                "({},{})",
                Variable::batch(Start, *batch),
                Variable::batch(Frequency, *batch),
            )),
        }
    }

    fn decimals(&self, variable: &Variable) -> usize {
        match variable {
            Variable::Batch {
                series: Series::Frequency,
                ..
            } => self.frequency_decimals,
            Variable::Batch {
                series: Series::Volume,
                ..
            } => self.volume_decimals,
            _ => self.time_decimals,
        }
    }

    // rounds up so the slider always reaches the last release
    fn round(&self, value: f64, decimals: usize) -> f64 {
        let scale = 10f64.powi(decimals as i32);
        (value * scale).ceil() / scale
    }
}
