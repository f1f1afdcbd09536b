//! Candle — the market data unit the engine scans.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single candle. Only the extremes matter to structure detection; open and
/// close are ignored when present in input.
///
/// Sequences are expected in ascending `timestamp` order. The engine never
/// re-sorts them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    /// Epoch milliseconds.
    pub timestamp: i64,
    pub high: f64,
    pub low: f64,
}

impl Candle {
    pub fn new(timestamp: i64, high: f64, low: f64) -> Self {
        Self {
            timestamp,
            high,
            low,
        }
    }

    /// High minus low of this candle.
    pub fn true_range(&self) -> f64 {
        self.high - self.low
    }

    /// Returns true if either extreme is NaN.
    pub fn is_void(&self) -> bool {
        self.high.is_nan() || self.low.is_nan()
    }

    /// No NaNs and `high >= low`.
    pub fn is_sane(&self) -> bool {
        !self.is_void() && self.high >= self.low
    }
}

/// Problems found by [`validate_sequence`].
#[derive(Debug, Error, PartialEq)]
pub enum CandleError {
    #[error("candle {index} at {timestamp} is malformed (high={high}, low={low})")]
    Malformed {
        index: usize,
        timestamp: i64,
        high: f64,
        low: f64,
    },

    #[error("candle {index} timestamp {timestamp} does not follow previous {previous}")]
    OutOfOrder {
        index: usize,
        timestamp: i64,
        previous: i64,
    },
}

/// Check a candle sequence for sane extremes and strictly increasing timestamps.
///
/// The detector does not call this; it is for callers that accept candles
/// from untrusted sources and want to reject them before scanning.
pub fn validate_sequence(candles: &[Candle]) -> Result<(), CandleError> {
    for (index, candle) in candles.iter().enumerate() {
        if !candle.is_sane() {
            return Err(CandleError::Malformed {
                index,
                timestamp: candle.timestamp,
                high: candle.high,
                low: candle.low,
            });
        }
        if index > 0 {
            let previous = candles[index - 1].timestamp;
            if candle.timestamp <= previous {
                return Err(CandleError::OutOfOrder {
                    index,
                    timestamp: candle.timestamp,
                    previous,
                });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_candle() -> Candle {
        Candle::new(1_704_153_600_000, 105.0, 98.0)
    }

    #[test]
    fn candle_is_sane() {
        assert!(sample_candle().is_sane());
    }

    #[test]
    fn candle_detects_void() {
        let mut candle = sample_candle();
        candle.high = f64::NAN;
        assert!(candle.is_void());
        assert!(!candle.is_sane());
    }

    #[test]
    fn candle_detects_inverted_extremes() {
        let mut candle = sample_candle();
        candle.high = 97.0; // below low
        assert!(!candle.is_sane());
    }

    #[test]
    fn true_range_is_high_minus_low() {
        assert_eq!(sample_candle().true_range(), 7.0);
    }

    #[test]
    fn deserialize_ignores_open_close() {
        let json = r#"{"timestamp": 1, "open": 5.0, "high": 6.0, "low": 4.0, "close": 5.5}"#;
        let candle: Candle = serde_json::from_str(json).unwrap();
        assert_eq!(candle, Candle::new(1, 6.0, 4.0));
    }

    #[test]
    fn validate_accepts_ordered_sequence() {
        let candles = vec![
            Candle::new(1, 2.0, 1.0),
            Candle::new(2, 3.0, 1.5),
            Candle::new(3, 2.5, 2.0),
        ];
        assert_eq!(validate_sequence(&candles), Ok(()));
        assert_eq!(validate_sequence(&[]), Ok(()));
    }

    #[test]
    fn validate_rejects_duplicate_timestamp() {
        let candles = vec![Candle::new(5, 2.0, 1.0), Candle::new(5, 3.0, 1.5)];
        assert_eq!(
            validate_sequence(&candles),
            Err(CandleError::OutOfOrder {
                index: 1,
                timestamp: 5,
                previous: 5
            })
        );
    }

    #[test]
    fn validate_rejects_malformed_candle() {
        let candles = vec![Candle::new(1, 2.0, 1.0), Candle::new(2, 1.0, 3.0)];
        assert!(matches!(
            validate_sequence(&candles),
            Err(CandleError::Malformed { index: 1, .. })
        ));
    }
}
