use super::TempoMap;

#[doc = r#"
Converts absolute ticks into elapsed seconds.

Time is integrated piecewise over the tempo map: every segment fully before
the target contributes `span / tpqn * seconds_per_quarter`, and the segment
containing the target contributes the remaining partial span. The seconds at
which each segment starts are summed once up front, so a lookup is a binary
search plus one multiplication.

# Example
```rust
# use tonegraph::prelude::*;
let map = TempoMap::from_changes(vec![TempoChange::from_bpm(480, 60.0)]);
let clock = TickClock::new(&map, 480);

assert_eq!(clock.seconds_at(0), 0.0);
// one quarter note at 120 BPM, then one at 60 BPM
assert_eq!(clock.seconds_at(480), 0.5);
assert_eq!(clock.seconds_at(960), 1.5);
```
"#]
#[derive(Debug, Clone)]
pub struct TickClock {
    ticks_per_quarter_note: f64,
    map: TempoMap,
    segment_starts: Vec<f64>,
}

impl TickClock {
    /// Create a clock for a file with the given resolution.
    ///
    /// # Panics
    /// if `ticks_per_quarter_note` is zero.
    pub fn new(map: &TempoMap, ticks_per_quarter_note: u16) -> Self {
        assert!(ticks_per_quarter_note > 0, "tick resolution must be positive");
        let ticks_per_quarter_note = f64::from(ticks_per_quarter_note);

        let mut elapsed = 0.0;
        let mut segment_starts = Vec::with_capacity(map.changes().len());
        segment_starts.push(elapsed);
        for pair in map.changes().windows(2) {
            let span = (pair[1].tick() - pair[0].tick()) as f64;
            elapsed += span / ticks_per_quarter_note * pair[0].seconds_per_quarter_note();
            segment_starts.push(elapsed);
        }

        Self {
            ticks_per_quarter_note,
            map: map.clone(),
            segment_starts,
        }
    }

    /// Seconds elapsed between tick 0 and `tick`.
    pub fn seconds_at(&self, tick: u64) -> f64 {
        let index = self.map.segment_index(tick);
        let change = self.map.changes()[index];
        let remaining = (tick - change.tick()) as f64;
        self.segment_starts[index]
            + remaining / self.ticks_per_quarter_note * change.seconds_per_quarter_note()
    }

    /// The tempo map this clock integrates
    pub fn tempo_map(&self) -> &TempoMap {
        &self.map
    }
}
