//! Domain types for StructLab

pub mod candle;
pub mod structure;
pub mod swing;

pub use candle::{validate_sequence, Candle, CandleError};
pub use structure::{Bias, BosEvent, CurrentStructure, Direction};
pub use swing::{SwingKind, SwingLabel, SwingPoint};

/// Create synthetic candles from mid prices for testing.
///
/// Each candle spans mid ± 0.5, one hour apart.
#[cfg(test)]
pub fn make_candles(mids: &[f64]) -> Vec<Candle> {
    let base_ts: i64 = 1_704_067_200_000;
    mids.iter()
        .enumerate()
        .map(|(i, &mid)| Candle::new(base_ts + i as i64 * 3_600_000, mid + 0.5, mid - 0.5))
        .collect()
}
