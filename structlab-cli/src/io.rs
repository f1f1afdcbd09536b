//! File loading and output for the CLI.
//!
//! Candles come from JSON (array of `{timestamp, high, low}`) or CSV with a
//! header row containing at least `timestamp,high,low`. CSV timestamps may be
//! epoch milliseconds or RFC 3339 strings.

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::{Read, Write};
use std::path::Path;
use structlab_core::domain::{BosEvent, Candle, CurrentStructure};
use structlab_core::{HtfStructures, Timeframe};
use tracing::warn;

pub fn load_candles(path: &Path) -> Result<Vec<Candle>> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("open candle file {}", path.display()))?;
    let is_csv = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));

    if is_csv {
        parse_candles_csv(file).with_context(|| format!("parse CSV {}", path.display()))
    } else {
        serde_json::from_reader(std::io::BufReader::new(file))
            .with_context(|| format!("parse JSON {}", path.display()))
    }
}

#[derive(Debug, Deserialize)]
struct CsvRow {
    timestamp: String,
    high: f64,
    low: f64,
}

pub fn parse_candles_csv<R: Read>(reader: R) -> Result<Vec<Candle>> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut candles = Vec::new();
    for (line, row) in rdr.deserialize::<CsvRow>().enumerate() {
        let row = row.with_context(|| format!("row {}", line + 1))?;
        let timestamp = parse_timestamp(&row.timestamp)
            .with_context(|| format!("row {}", line + 1))?;
        candles.push(Candle::new(timestamp, row.high, row.low));
    }
    Ok(candles)
}

/// Epoch milliseconds, or an RFC 3339 datetime converted to them.
pub fn parse_timestamp(raw: &str) -> Result<i64> {
    if let Ok(ms) = raw.parse::<i64>() {
        return Ok(ms);
    }
    chrono::DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.timestamp_millis())
        .map_err(|e| anyhow!("invalid timestamp {raw:?}: {e}"))
}

pub fn load_events(path: &Path) -> Result<Vec<BosEvent>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("read events file {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("parse events {}", path.display()))
}

pub fn load_structures(path: &Path) -> Result<HtfStructures> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("read structures file {}", path.display()))?;
    parse_structures(&content).with_context(|| format!("parse structures {}", path.display()))
}

/// Parse a JSON object keyed by timeframe code. Unknown codes are skipped.
///
/// Keys that differ only by surrounding whitespace name the same timeframe;
/// the exact canonical spelling wins, otherwise the first key in sorted order.
pub fn parse_structures(content: &str) -> Result<HtfStructures> {
    let raw: BTreeMap<String, CurrentStructure> = serde_json::from_str(content)?;
    let mut htf = HtfStructures::new();
    for (code, structure) in raw {
        let tf = match code.parse::<Timeframe>() {
            Ok(tf) => tf,
            Err(e) => {
                warn!("skipping structure: {e}");
                continue;
            }
        };
        if htf.contains_key(&tf) {
            warn!(key = code.as_str(), %tf, "duplicate structure key for timeframe");
            if code != tf.code() {
                continue;
            }
        }
        htf.insert(tf, structure);
    }
    Ok(htf)
}

/// Pretty JSON to `output`, or stdout when `None`.
pub fn write_json<T: Serialize + ?Sized>(value: &T, output: Option<&Path>) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    match output {
        Some(path) => std::fs::write(path, json + "\n")
            .with_context(|| format!("write {}", path.display()))?,
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{json}")?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use structlab_core::domain::Bias;

    #[test]
    fn csv_accepts_epoch_and_rfc3339() {
        let data = "timestamp,open,high,low,close\n\
                    1704067200000,1.0,2.0,0.5,1.5\n\
                    2024-01-01T01:00:00Z,1.5,2.5,1.0,2.0\n";
        let candles = parse_candles_csv(data.as_bytes()).unwrap();
        assert_eq!(candles.len(), 2);
        assert_eq!(candles[0], Candle::new(1_704_067_200_000, 2.0, 0.5));
        assert_eq!(candles[1].timestamp, 1_704_070_800_000);
    }

    #[test]
    fn csv_reports_bad_timestamp() {
        let data = "timestamp,high,low\nyesterday,2.0,1.0\n";
        let err = parse_candles_csv(data.as_bytes()).unwrap_err();
        assert!(format!("{err:#}").contains("yesterday"));
    }

    #[test]
    fn structures_skip_unknown_codes() {
        let json = r#"{"D1": {"direction": "Bullish"}, "H2": {"direction": "Bearish"}}"#;
        let htf = parse_structures(json).unwrap();
        assert_eq!(htf.len(), 1);
        assert_eq!(htf[&Timeframe::D1].direction, Bias::Bullish);
    }

    #[test]
    fn padded_duplicate_key_prefers_canonical_spelling() {
        let json = r#"{" D": {"direction": "Bearish"}, "D": {"direction": "Bullish"}, "W ": {"direction": "Ranging"}}"#;
        let htf = parse_structures(json).unwrap();
        assert_eq!(htf.len(), 2);
        assert_eq!(htf[&Timeframe::D].direction, Bias::Bullish);
        assert_eq!(htf[&Timeframe::W].direction, Bias::Ranging);
    }
}
