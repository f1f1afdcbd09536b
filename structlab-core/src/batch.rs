//! Parallel passes over many independent series.
//!
//! Detector calls on disjoint candle slices share nothing, and each
//! classifier pass borrows its own event collection mutably, so both fan out
//! over rayon without coordination.

use rayon::prelude::*;
use std::collections::BTreeMap;

use crate::config::DetectorConfig;
use crate::counter_trend::mark_counter_trend;
use crate::domain::{BosEvent, Candle, SwingPoint};
use crate::hierarchy::HtfStructures;
use crate::swing::SwingDetector;
use crate::timeframe::Timeframe;

/// One series to scan: caller key (e.g. "EURUSD:H1"), timeframe code, candles.
#[derive(Debug, Clone)]
pub struct SeriesRequest<'a> {
    pub key: String,
    pub timeframe: String,
    pub candles: &'a [Candle],
}

#[derive(Debug, Clone, PartialEq)]
pub struct SeriesSwings {
    pub key: String,
    pub timeframe: String,
    pub swings: Vec<SwingPoint>,
}

/// Detect swings for every request in parallel. Output order matches input.
pub fn detect_swings_batch(
    requests: &[SeriesRequest<'_>],
    config: &DetectorConfig,
) -> Vec<SeriesSwings> {
    requests
        .par_iter()
        .map(|req| SeriesSwings {
            key: req.key.clone(),
            timeframe: req.timeframe.clone(),
            swings: SwingDetector::from_config(config, &req.timeframe).detect(req.candles),
        })
        .collect()
}

/// Run one classifier pass per timeframe collection, in parallel.
pub fn mark_counter_trend_by_timeframe(
    events: &mut BTreeMap<Timeframe, Vec<BosEvent>>,
    htf: &HtfStructures,
) {
    events
        .par_iter_mut()
        .for_each(|(&tf, evs)| mark_counter_trend(evs, htf, tf));
}
