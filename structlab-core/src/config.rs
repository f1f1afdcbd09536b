//! Engine configuration loaded from TOML.
//!
//! Every field is optional; an empty document yields the static tables in
//! [`crate::timeframe`] unchanged.
//!
//! Lookback overrides are keyed by timeframe code in the file but stored by
//! parsed [`Timeframe`], so validation and lookup agree on the key. An
//! override on one spelling of a period (`D`) also applies to its aliases
//! (`D1`); giving two aliases different values is rejected.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

use crate::timeframe::{min_depth_for_code, Timeframe, DEFAULT_LOOKBACK};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config file {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("lookback override for unknown timeframe {0:?}")]
    UnknownTimeframe(String),

    #[error("lookback override for {timeframe} must be >= 1")]
    ZeroLookback { timeframe: String },

    #[error("conflicting lookback overrides for {timeframe}: {first} vs {second}")]
    ConflictingLookback {
        timeframe: Timeframe,
        first: usize,
        second: usize,
    },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EngineConfig {
    pub detector: DetectorConfig,
}

/// Swing detector settings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DetectorConfig {
    /// Return no swings when the input is shorter than the recommended depth.
    pub enforce_min_depth: bool,

    /// Per-timeframe replacement for the static lookback.
    pub lookback: BTreeMap<Timeframe, usize>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawEngineConfig {
    detector: RawDetectorConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawDetectorConfig {
    enforce_min_depth: bool,
    lookback: BTreeMap<String, usize>,
}

impl DetectorConfig {
    /// Effective lookback for a code: override (direct, then aliases), else
    /// static table, else default.
    pub fn lookback_for(&self, code: &str) -> usize {
        let Ok(tf) = code.parse::<Timeframe>() else {
            return DEFAULT_LOOKBACK;
        };
        std::iter::once(&tf)
            .chain(tf.aliases())
            .find_map(|key| self.lookback.get(key).copied())
            .unwrap_or_else(|| tf.lookback())
    }

    /// Depth below which a configured detector emits nothing, if enforced.
    pub fn required_depth(&self, code: &str) -> Option<usize> {
        self.enforce_min_depth.then(|| min_depth_for_code(code))
    }

    fn from_raw(raw: RawDetectorConfig) -> Result<Self, ConfigError> {
        let mut lookback = BTreeMap::new();
        for (code, n) in raw.lookback {
            let tf = code
                .parse::<Timeframe>()
                .map_err(|_| ConfigError::UnknownTimeframe(code.clone()))?;
            if n == 0 {
                return Err(ConfigError::ZeroLookback { timeframe: code });
            }
            if let Some(&first) = lookback.get(&tf) {
                if first != n {
                    return Err(ConfigError::ConflictingLookback {
                        timeframe: tf,
                        first,
                        second: n,
                    });
                }
            }
            lookback.insert(tf, n);
        }

        for (&tf, &n) in &lookback {
            for alias in tf.aliases() {
                if let Some(&other) = lookback.get(alias) {
                    if other != n {
                        return Err(ConfigError::ConflictingLookback {
                            timeframe: tf,
                            first: n,
                            second: other,
                        });
                    }
                }
            }
        }

        Ok(Self {
            enforce_min_depth: raw.enforce_min_depth,
            lookback,
        })
    }
}

impl EngineConfig {
    /// Load and validate a config from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parse and validate a config from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let raw: RawEngineConfig = toml::from_str(content)?;
        Ok(Self {
            detector: DetectorConfig::from_raw(raw.detector)?,
        })
    }
}
