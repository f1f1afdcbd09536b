//! Counter-trend classifier.
//!
//! Flags BOS events whose direction opposes the parent timeframe's bias.
//! The collection is mutated in place and nothing is returned. The flag is
//! monotonic: it only ever moves from `false` to `true`, so repeated passes
//! are idempotent.
//!
//! Three guards leave the events untouched: no parent (terminal or unknown
//! timeframe), no structure for the parent under any alias, and a ranging
//! parent.

use tracing::debug;

use crate::domain::BosEvent;
use crate::hierarchy::{resolve_parent_structure, HtfStructures};
use crate::timeframe::Timeframe;

/// Mark every event opposing the parent timeframe's bias as counter-trend.
pub fn mark_counter_trend(events: &mut [BosEvent], htf: &HtfStructures, timeframe: Timeframe) {
    let Some((parent, structure)) = resolve_parent_structure(htf, timeframe) else {
        debug!(%timeframe, "no higher-timeframe structure, leaving events unchanged");
        return;
    };

    let Some(bias) = structure.direction.direction() else {
        debug!(%timeframe, %parent, "parent is ranging, leaving events unchanged");
        return;
    };

    let mut flagged = 0usize;
    for event in events.iter_mut() {
        if event.direction != bias && !event.is_counter_trend {
            event.is_counter_trend = true;
            flagged += 1;
        }
    }

    debug!(%timeframe, %parent, ?bias, events = events.len(), flagged, "counter-trend pass");
}

/// Same as [`mark_counter_trend`] for a raw code. Unknown codes have no
/// parent, so the events are left unchanged.
pub fn mark_counter_trend_code(events: &mut [BosEvent], htf: &HtfStructures, timeframe: &str) {
    match timeframe.parse::<Timeframe>() {
        Ok(tf) => mark_counter_trend(events, htf, tf),
        Err(_) => debug!(timeframe, "unknown timeframe code, leaving events unchanged"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Bias, CurrentStructure, Direction};

    fn htf(tf: Timeframe, bias: Bias) -> HtfStructures {
        HtfStructures::from([(tf, CurrentStructure::new(bias))])
    }

    fn events() -> Vec<BosEvent> {
        vec![
            BosEvent::new(1, Direction::Bullish),
            BosEvent::new(2, Direction::Bearish),
            BosEvent::new(3, Direction::Bearish),
        ]
    }

    #[test]
    fn flags_events_against_parent_bias() {
        let mut evs = events();
        mark_counter_trend(&mut evs, &htf(Timeframe::H4, Bias::Bullish), Timeframe::H1);
        let flags: Vec<bool> = evs.iter().map(|e| e.is_counter_trend).collect();
        assert_eq!(flags, vec![false, true, true]);
    }

    #[test]
    fn never_resets_existing_flag() {
        let mut evs = events();
        evs[0].is_counter_trend = true;
        mark_counter_trend(&mut evs, &htf(Timeframe::H4, Bias::Bullish), Timeframe::H1);
        assert!(evs[0].is_counter_trend);
    }

    #[test]
    fn ranging_parent_is_noop() {
        let mut evs = events();
        mark_counter_trend(&mut evs, &htf(Timeframe::H4, Bias::Ranging), Timeframe::H1);
        assert_eq!(evs, events());
    }

    #[test]
    fn unknown_code_is_noop() {
        let mut evs = events();
        mark_counter_trend_code(&mut evs, &htf(Timeframe::H4, Bias::Bullish), "H2");
        assert_eq!(evs, events());
    }

    #[test]
    fn code_entry_point_classifies() {
        let mut evs = events();
        mark_counter_trend_code(&mut evs, &htf(Timeframe::H4, Bias::Bearish), "H1");
        assert!(evs[0].is_counter_trend);
        assert!(!evs[1].is_counter_trend);
    }
}
