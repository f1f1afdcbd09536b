//! Timeframe codes and the static per-timeframe tables.
//!
//! Four tables hang off [`Timeframe`]:
//! - lookback window N used by the swing detector
//! - recommended minimum candle depth
//! - parent (next-higher) timeframe, with `MN` self-mapped as terminal
//! - alias codes tried when a parent's structure is keyed differently
//!
//! The values are part of the public contract; downstream statistics depend
//! on them exactly.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Lookback applied to codes outside the known set.
pub const DEFAULT_LOOKBACK: usize = 5;

/// Recommended depth for codes outside the known set.
pub const DEFAULT_MIN_DEPTH: usize = 100;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TimeframeError {
    #[error("unknown timeframe code: {0:?}")]
    Unknown(String),
}

/// Known timeframe codes. `D`/`D1`, `W`/`W1` and `M`/`MN` are distinct codes
/// for the same period; producers use either spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Timeframe {
    M15,
    M30,
    H1,
    H4,
    D,
    D1,
    W,
    W1,
    M,
    MN,
}

impl Timeframe {
    pub const ALL: [Timeframe; 10] = [
        Timeframe::M15,
        Timeframe::M30,
        Timeframe::H1,
        Timeframe::H4,
        Timeframe::D,
        Timeframe::D1,
        Timeframe::W,
        Timeframe::W1,
        Timeframe::M,
        Timeframe::MN,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Timeframe::M15 => "M15",
            Timeframe::M30 => "M30",
            Timeframe::H1 => "H1",
            Timeframe::H4 => "H4",
            Timeframe::D => "D",
            Timeframe::D1 => "D1",
            Timeframe::W => "W",
            Timeframe::W1 => "W1",
            Timeframe::M => "M",
            Timeframe::MN => "MN",
        }
    }

    /// Candles examined on each side of a swing candidate.
    pub fn lookback(self) -> usize {
        match self {
            Timeframe::M15 => 7,
            Timeframe::M30 => 6,
            Timeframe::H1 => 5,
            Timeframe::H4 => 4,
            Timeframe::D | Timeframe::D1 => 3,
            Timeframe::W | Timeframe::W1 => 2,
            Timeframe::M | Timeframe::MN => 2,
        }
    }

    /// Candle count callers should have before bothering to detect swings.
    pub fn min_depth(self) -> usize {
        match self {
            Timeframe::M15 => 300,
            Timeframe::M30 => 250,
            Timeframe::H1 => 200,
            Timeframe::H4 => 150,
            Timeframe::D | Timeframe::D1 => 100,
            Timeframe::W | Timeframe::W1 => 52,
            Timeframe::M | Timeframe::MN => 24,
        }
    }

    /// Raw parent-table entry. `MN` maps to itself.
    pub fn parent_entry(self) -> Timeframe {
        match self {
            Timeframe::M15 | Timeframe::M30 => Timeframe::H1,
            Timeframe::H1 => Timeframe::H4,
            Timeframe::H4 => Timeframe::D,
            Timeframe::D | Timeframe::D1 => Timeframe::W,
            Timeframe::W | Timeframe::W1 => Timeframe::M,
            Timeframe::M => Timeframe::MN,
            Timeframe::MN => Timeframe::MN,
        }
    }

    /// The next-higher timeframe, or `None` for the terminal entry.
    pub fn parent(self) -> Option<Timeframe> {
        let parent = self.parent_entry();
        (parent != self).then_some(parent)
    }

    /// Alternate codes to try when a structure map has no entry under this one.
    pub fn aliases(self) -> &'static [Timeframe] {
        match self {
            Timeframe::D => &[Timeframe::D1],
            Timeframe::D1 => &[Timeframe::D],
            Timeframe::W => &[Timeframe::W1],
            Timeframe::W1 => &[Timeframe::W],
            Timeframe::M => &[Timeframe::MN],
            Timeframe::MN => &[Timeframe::M],
            Timeframe::M15 | Timeframe::M30 | Timeframe::H1 | Timeframe::H4 => &[],
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Timeframe {
    type Err = TimeframeError;

    /// Exact, case-sensitive match: `"M"` is monthly, never minutes.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Timeframe::ALL
            .into_iter()
            .find(|tf| tf.code() == s.trim())
            .ok_or_else(|| TimeframeError::Unknown(s.to_string()))
    }
}

/// Lookback for a raw code, falling back to [`DEFAULT_LOOKBACK`].
pub fn lookback_for_code(code: &str) -> usize {
    code.parse::<Timeframe>()
        .map(Timeframe::lookback)
        .unwrap_or(DEFAULT_LOOKBACK)
}

/// Recommended depth for a raw code, falling back to [`DEFAULT_MIN_DEPTH`].
pub fn min_depth_for_code(code: &str) -> usize {
    code.parse::<Timeframe>()
        .map(Timeframe::min_depth)
        .unwrap_or(DEFAULT_MIN_DEPTH)
}

/// Parent of a raw code. Unknown and terminal codes have none.
pub fn parent_for_code(code: &str) -> Option<Timeframe> {
    code.parse::<Timeframe>().ok().and_then(Timeframe::parent)
}

/// Whether `len` candles meet the recommended depth for `code`.
pub fn has_sufficient_depth(len: usize, code: &str) -> bool {
    len >= min_depth_for_code(code)
}
