use core::fmt;

/// The per-batch quantities a renderer is told about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Series {
    /// Frequency in hertz
    Frequency,
    /// Start time in seconds
    Start,
    /// End time in seconds
    End,
    /// Loudness in `[0, 1]`
    Volume,
    /// Non-negative exactly while a note sounds
    Gate,
}

impl Series {
    /// The letter naming this series in renderer variables.
    pub const fn symbol(self) -> char {
        match self {
            Self::Frequency => 'F',
            Self::Start => 'S',
            Self::End => 'E',
            Self::Volume => 'V',
            Self::Gate => 'G',
        }
    }
}

/// A name that later expressions can refer to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variable {
    /// The playback clock, in seconds
    Time,
    /// One series of one batch
    Batch {
        /// Which quantity
        series: Series,
        /// The batch index
        batch: usize,
    },
}

impl Variable {
    /// Shorthand for [`Variable::Batch`]
    pub const fn batch(series: Series, batch: usize) -> Self {
        Self::Batch { series, batch }
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Time => write!(f, "t"),
            Self::Batch { series, batch } => write!(f, "{}_{{{batch}}}", series.symbol()),
        }
    }
}

#[doc = r#"
One independently submittable unit for the renderer.

This is the structured form; [`LatexFormatter`](super::latex::LatexFormatter)
turns it into text. A unit may only refer to variables declared by units
submitted before it.
"#]
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// Declares the time variable at zero, driven over `[0, max]`
    TimeSlider {
        /// Upper bound of the slider, the end of the last note
        max: f64,
    },
    /// Assigns a list of numbers to a batch variable
    List {
        /// The variable assigned
        variable: Variable,
        /// Values, one per note of the batch
        values: Vec<f64>,
    },
    /// Defines `gate = (time - start)(end - time)`
    Gate {
        /// The batch the gate belongs to
        batch: usize,
    },
    /// Plays each frequency at its volume where the gate is non-negative
    Tone {
        /// The batch whose notes are played
        batch: usize,
    },
    /// Plots start time against frequency for a batch
    Scatter {
        /// The batch plotted
        batch: usize,
    },
}

impl Expression {
    /// The variable this expression declares, if any.
    pub fn declares(&self) -> Option<Variable> {
        match self {
            Self::TimeSlider { .. } => Some(Variable::Time),
            Self::List { variable, .. } => Some(*variable),
            Self::Gate { batch } => Some(Variable::batch(Series::Gate, *batch)),
            Self::Tone { .. } | Self::Scatter { .. } => None,
        }
    }

    /// The variables this expression reads.
    pub fn references(&self) -> Vec<Variable> {
        use Series::*;
        match *self {
            Self::TimeSlider { .. } | Self::List { .. } => Vec::new(),
            Self::Gate { batch } => vec![
                Variable::Time,
                Variable::batch(Start, batch),
                Variable::batch(End, batch),
            ],
            Self::Tone { batch } => vec![
                Variable::batch(Frequency, batch),
                Variable::batch(Volume, batch),
                Variable::batch(Gate, batch),
            ],
            Self::Scatter { batch } => vec![
                Variable::batch(Start, batch),
                Variable::batch(Frequency, batch),
            ],
        }
    }
}
