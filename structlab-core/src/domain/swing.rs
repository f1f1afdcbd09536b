//! Swing points emitted by the detector.

use serde::{Deserialize, Serialize};

/// Which extreme a swing point marks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SwingKind {
    High,
    Low,
}

/// Semantic label assigned by the downstream labeling stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SwingLabel {
    /// Higher high
    HH,
    /// Higher low
    HL,
    /// Lower high
    LH,
    /// Lower low
    LL,
}

/// A confirmed local extreme.
///
/// `label` is always `None` when produced by the detector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwingPoint {
    pub timestamp: i64,
    pub price: f64,
    #[serde(rename = "type")]
    pub kind: SwingKind,
    #[serde(default)]
    pub label: Option<SwingLabel>,
    /// Index into the candle slice the point was detected in.
    pub candle_index: usize,
    /// Window size N applied on each side.
    pub lookback_used: usize,
    /// High minus low of the originating candle.
    pub true_range: f64,
}

impl SwingPoint {
    pub fn is_high(&self) -> bool {
        self.kind == SwingKind::High
    }

    pub fn is_low(&self) -> bool {
        self.kind == SwingKind::Low
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_wire_field_names() {
        let point = SwingPoint {
            timestamp: 10,
            price: 7.0,
            kind: SwingKind::Low,
            label: None,
            candle_index: 3,
            lookback_used: 2,
            true_range: 1.5,
        };
        let value = serde_json::to_value(&point).unwrap();
        assert_eq!(value["type"], "Low");
        assert_eq!(value["candleIndex"], 3);
        assert_eq!(value["lookbackUsed"], 2);
        assert_eq!(value["trueRange"], 1.5);
        assert!(value["label"].is_null());
    }

    #[test]
    fn label_defaults_to_none_when_absent() {
        let json = r#"{"timestamp":1,"price":2.0,"type":"High","candleIndex":0,"lookbackUsed":5,"trueRange":0.5}"#;
        let point: SwingPoint = serde_json::from_str(json).unwrap();
        assert!(point.is_high());
        assert_eq!(point.label, None);
    }
}
