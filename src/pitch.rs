/// MIDI key of concert A.
pub const A4_KEY: u8 = 69;
/// Frequency of concert A in hertz.
pub const A4_FREQUENCY: f64 = 440.0;

const COMPENSATION_PIVOT: f64 = 60.0;
const COMPENSATION_PER_KEY: f64 = 0.01;

/// Equal-tempered frequency in hertz of a MIDI key.
///
/// ```rust
/// # use tonegraph::frequency;
/// assert_eq!(frequency(69), 440.0);
/// assert!((frequency(81) - 880.0).abs() < 1e-9);
/// ```
pub fn frequency(key: u8) -> f64 {
    A4_FREQUENCY * 2f64.powf((f64::from(key) - f64::from(A4_KEY)) / 12.0)
}

/// Playback loudness in `[0, 1]` for a key struck at `velocity`.
///
/// Velocity is scaled linearly, then compensated by pitch: every key below
/// middle C adds one percent, every key above takes one percent away.
pub fn loudness(key: u8, velocity: u8) -> f64 {
    let base = f64::from(velocity) / 127.0;
    let compensation = 1.0 - (f64::from(key) - COMPENSATION_PIVOT) * COMPENSATION_PER_KEY;
    (base * compensation).clamp(0.0, 1.0)
}
