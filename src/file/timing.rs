use crate::{Error, Result, Timecode};

/// Resolves the header division into ticks per quarter note.
///
/// Only metrical divisions can be placed on a tempo map. Frame based (SMPTE)
/// divisions, and the degenerate metrical division of zero, are rejected.
pub(crate) fn ticks_per_quarter_note(timing: midly::Timing) -> Result<u16> {
    match timing {
        midly::Timing::Metrical(tpqn) => match tpqn.as_int() {
            0 => Err(Error::UnsupportedTimeFormat(
                Timecode::ZeroTicksPerQuarterNote,
            )),
            tpqn => Ok(tpqn),
        },
        midly::Timing::Timecode(fps, subframes) => Err(Error::UnsupportedTimeFormat(
            Timecode::Smpte {
                fps: fps.as_int(),
                subframes,
            },
        )),
    }
}
