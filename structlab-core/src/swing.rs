//! Swing detector — confirmed local highs and lows over a symmetric window.
//!
//! Candle `i` is a swing high when its high is strictly greater than the high
//! of each of the N candles before it and each of the N candles after it.
//! Swing lows mirror this on the low with strict less-than. Equal extremes on
//! either side void the swing.
//!
//! The first and last N candles can never be confirmed: they lack a full
//! window on one side. Swings are only known in hindsight.
//!
//! Complexity: O(len × N). N is at most 7 for the known timeframes, so the
//! straightforward double-window scan is kept.

use tracing::debug;

use crate::config::DetectorConfig;
use crate::domain::{Candle, SwingKind, SwingPoint};
use crate::timeframe::{lookback_for_code, Timeframe};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwingDetector {
    lookback: usize,
    min_depth: Option<usize>,
}

impl SwingDetector {
    /// Detector with an explicit window size.
    pub fn with_lookback(lookback: usize) -> Self {
        assert!(lookback >= 1, "swing lookback must be >= 1");
        Self {
            lookback,
            min_depth: None,
        }
    }

    pub fn for_timeframe(timeframe: Timeframe) -> Self {
        Self::with_lookback(timeframe.lookback())
    }

    /// Detector for a raw code; unknown codes get the default lookback.
    pub fn for_code(code: &str) -> Self {
        Self::with_lookback(lookback_for_code(code))
    }

    /// Detector honouring lookback overrides and optional depth enforcement.
    pub fn from_config(config: &DetectorConfig, code: &str) -> Self {
        Self {
            lookback: config.lookback_for(code).max(1),
            min_depth: config.required_depth(code),
        }
    }

    pub fn lookback(&self) -> usize {
        self.lookback
    }

    /// Smallest input that can confirm a swing: one full window per side.
    pub fn required_len(&self) -> usize {
        2 * self.lookback + 1
    }

    /// Scan `candles` and return every confirmed swing, ascending by timestamp.
    ///
    /// A candle that is both a swing high and a swing low yields two points,
    /// high first.
    pub fn detect(&self, candles: &[Candle]) -> Vec<SwingPoint> {
        let n = self.lookback;
        let len = candles.len();

        if len < self.required_len() {
            debug!(len, lookback = n, "not enough candles to confirm a swing");
            return Vec::new();
        }
        if let Some(depth) = self.min_depth {
            if len < depth {
                debug!(len, depth, "below configured minimum depth, skipping");
                return Vec::new();
            }
        }

        let mut swings = Vec::new();

        for i in n..(len - n) {
            let candle = &candles[i];
            let left = &candles[i - n..i];
            let right = &candles[i + 1..=i + n];

            let is_high = left
                .iter()
                .chain(right)
                .all(|other| candle.high > other.high);
            let is_low = left.iter().chain(right).all(|other| candle.low < other.low);

            if is_high {
                swings.push(self.point(candle, i, SwingKind::High));
            }
            if is_low {
                swings.push(self.point(candle, i, SwingKind::Low));
            }
        }

        // Scan order already satisfies this for well-formed input.
        swings.sort_by_key(|s| s.timestamp);

        debug!(len, lookback = n, swings = swings.len(), "swing scan complete");
        swings
    }

    fn point(&self, candle: &Candle, index: usize, kind: SwingKind) -> SwingPoint {
        let price = match kind {
            SwingKind::High => candle.high,
            SwingKind::Low => candle.low,
        };
        SwingPoint {
            timestamp: candle.timestamp,
            price,
            kind,
            label: None,
            candle_index: index,
            lookback_used: self.lookback,
            true_range: candle.true_range(),
        }
    }
}

/// Detect swings using the lookback table entry for `timeframe`.
///
/// Unknown codes silently use [`crate::timeframe::DEFAULT_LOOKBACK`].
pub fn detect_swings(candles: &[Candle], timeframe: &str) -> Vec<SwingPoint> {
    SwingDetector::for_code(timeframe).detect(candles)
}
