//! Timeframe-hierarchy resolution against a caller-supplied structure map.
//!
//! Producers key the map under either spelling of a period (`D` or `D1`,
//! `M` or `MN`), so a parent's structure is looked up directly first and
//! then under each of its aliases in table order.

use std::collections::HashMap;

use crate::domain::CurrentStructure;
use crate::timeframe::Timeframe;

/// Higher-timeframe structures computed by the caller, one per timeframe.
pub type HtfStructures = HashMap<Timeframe, CurrentStructure>;

/// Find the structure for `timeframe`, trying its aliases on a miss.
pub fn resolve_structure(htf: &HtfStructures, timeframe: Timeframe) -> Option<&CurrentStructure> {
    htf.get(&timeframe).or_else(|| {
        timeframe
            .aliases()
            .iter()
            .find_map(|alias| htf.get(alias))
    })
}

/// Parent timeframe and its resolved structure.
///
/// `None` when `timeframe` is terminal or no structure exists for its parent
/// under any alias.
pub fn resolve_parent_structure(
    htf: &HtfStructures,
    timeframe: Timeframe,
) -> Option<(Timeframe, &CurrentStructure)> {
    let parent = timeframe.parent()?;
    resolve_structure(htf, parent).map(|structure| (parent, structure))
}
