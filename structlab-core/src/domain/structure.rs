//! Higher-timeframe structure summaries and BOS events.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Direction of a structural break.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Bullish,
    Bearish,
}

/// Prevailing bias of a timeframe. `Ranging` carries no direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Bias {
    Bullish,
    Bearish,
    Ranging,
}

impl Bias {
    /// The directional component, or `None` when ranging.
    pub fn direction(self) -> Option<Direction> {
        match self {
            Bias::Bullish => Some(Direction::Bullish),
            Bias::Bearish => Some(Direction::Bearish),
            Bias::Ranging => None,
        }
    }
}

/// Currently-prevailing structure on one timeframe, computed upstream.
///
/// Only `direction` is read here; any other fields the producer attached are
/// kept in `extra` and written back out untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentStructure {
    pub direction: Bias,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CurrentStructure {
    pub fn new(direction: Bias) -> Self {
        Self {
            direction,
            extra: Map::new(),
        }
    }
}

/// A break-of-structure event created by the external labeling stage.
///
/// The classifier only ever sets `is_counter_trend` to `true`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BosEvent {
    pub timestamp: i64,
    pub direction: Direction,
    #[serde(default)]
    pub is_counter_trend: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl BosEvent {
    pub fn new(timestamp: i64, direction: Direction) -> Self {
        Self {
            timestamp,
            direction,
            is_counter_trend: false,
            extra: Map::new(),
        }
    }
}
