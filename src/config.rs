#![doc = r#"
Run configuration, usually read from a TOML file.

```toml
chunk_size = 250
visualize = false
pairing = "fifo"
```

Every key is optional; missing keys take their [`Default`] value.
"#]

use std::{fs, io, num::NonZeroUsize, path::Path};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::notes::PairingPolicy;

/// Why a configuration could not be loaded.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read
    #[error("could not read configuration: {0}")]
    Io(#[from] io::Error),
    /// The contents are not a valid configuration
    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Maximum number of notes encoded into one batch. Never zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChunkSize(NonZeroUsize);

impl ChunkSize {
    /// Notes per batch when nothing else is configured.
    pub const DEFAULT: Self = Self(NonZeroUsize::new(500).unwrap());

    /// Returns `None` for zero.
    pub const fn new(size: usize) -> Option<Self> {
        match NonZeroUsize::new(size) {
            Some(size) => Some(Self(size)),
            None => None,
        }
    }

    /// The size as a plain integer
    pub const fn get(self) -> usize {
        self.0.get()
    }
}

impl Default for ChunkSize {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[doc = r#"
Options recognized by the [`Pipeline`](crate::pipeline::Pipeline).
"#]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Maximum notes per batch. Larger batches mean fewer, bigger expressions.
    pub chunk_size: ChunkSize,
    /// Also emit a start-time against frequency scatter for every batch.
    pub visualize: bool,
    /// How note-offs are matched to note-ons.
    pub pairing: PairingPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            chunk_size: ChunkSize::default(),
            visualize: true,
            pairing: PairingPolicy::default(),
        }
    }
}

impl Config {
    /// Loads a configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Parses a configuration from TOML text.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_file_gives_defaults() {
        let config = Config::from_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.chunk_size.get(), 500);
        assert!(config.visualize);
        assert_eq!(config.pairing, PairingPolicy::CloseOnRetrigger);
    }

    #[test]
    fn all_keys() {
        let config = Config::from_str(
            r#"
            chunk_size = 2
            visualize = false
            pairing = "fifo"
            "#,
        )
        .unwrap();
        assert_eq!(
            config,
            Config {
                chunk_size: ChunkSize::new(2).unwrap(),
                visualize: false,
                pairing: PairingPolicy::Fifo,
            }
        );
    }

    #[test]
    fn zero_chunk_size_is_rejected() {
        let err = Config::from_str("chunk_size = 0").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn unknown_policy_is_rejected() {
        assert!(Config::from_str(r#"pairing = "lifo""#).is_err());
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = Config::from_file("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn chunk_size_zero_is_none() {
        assert_eq!(ChunkSize::new(0), None);
        assert_eq!(ChunkSize::default().get(), 500);
    }
}
