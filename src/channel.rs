use num_enum::{IntoPrimitive, TryFromPrimitive};
use serde::{Deserialize, Serialize};

#[doc = r#"
One of the 16 MIDI channels.

Channels are named the way musicians count them (`One` through `Sixteen`),
while the wire value is 0-indexed: `Channel::Ten` is the byte `9`, which
General MIDI reserves for percussion.

# Example
```rust
# use tonegraph::Channel;
let channel = Channel::try_from(9u8).unwrap();
assert_eq!(channel, Channel::Ten);
assert!(channel.is_percussion());
assert_eq!(u8::from(Channel::One), 0);
```
"#]
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    IntoPrimitive,
    TryFromPrimitive,
    Serialize,
    Deserialize,
)]
#[repr(u8)]
#[allow(missing_docs)]
pub enum Channel {
    One = 0,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Eleven,
    Twelve,
    Thirteen,
    Fourteen,
    Fifteen,
    Sixteen,
}

impl Channel {
    /// The General MIDI percussion channel.
    pub const PERCUSSION: Self = Self::Ten;

    /// Builds a channel from the low nibble of a status byte.
    ///
    /// The upper bits are ignored, so this never fails.
    pub const fn from_nibble(nibble: u8) -> Self {
        use Channel::*;
        match nibble & 0x0F {
            0 => One,
            1 => Two,
            2 => Three,
            3 => Four,
            4 => Five,
            5 => Six,
            6 => Seven,
            7 => Eight,
            8 => Nine,
            9 => Ten,
            10 => Eleven,
            11 => Twelve,
            12 => Thirteen,
            13 => Fourteen,
            14 => Fifteen,
            _ => Sixteen,
        }
    }

    /// The 0-indexed wire value of this channel.
    pub const fn index(self) -> usize {
        self as usize
    }

    /// True for the channel General MIDI reserves for drums.
    pub const fn is_percussion(self) -> bool {
        matches!(self, Self::Ten)
    }
}
