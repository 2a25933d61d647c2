//! The four-way retry loop (spec §4.4): monotonically relax the area cap
//! until the four-way ILP finds a feasible assignment or a hard ceiling is
//! reached. Distinct from the outer binary search in §4.5 — this is a single
//! monotone sweep, not a bisection.

use tracing::{debug, info};

use crate::error::Result;
use crate::model::{DataflowGraph, PartitionMap, SlotManager, VertexId};

use super::four_way::{four_way_partition, CrossingCaps3};

/// Runs `four_way_partition` with `area := ref_usage_ratio`, relaxing by
/// `delta` on every infeasible probe until `area >= hard_limit`. Returns the
/// mapping (or `None` if the hard limit was hit) alongside the final area
/// cap that was probed.
#[allow(clippy::too_many_arguments)]
pub fn four_way_partition_with_retry(
    graph: &DataflowGraph,
    init_v2s: &PartitionMap,
    grouping_constraints: &[Vec<VertexId>],
    pre_assignments: &PartitionMap,
    slot_manager: &SlotManager,
    ref_usage_ratio: f64,
    crossing_caps: CrossingCaps3,
    max_search_time_secs: u64,
    delta: f64,
    hard_limit: f64,
) -> Result<(Option<PartitionMap>, f64)> {
    let mut area = ref_usage_ratio;
    loop {
        let v2s = four_way_partition(
            graph,
            init_v2s,
            grouping_constraints,
            pre_assignments,
            slot_manager,
            area,
            crossing_caps,
            max_search_time_secs,
        )?;

        if v2s.is_some() {
            info!(area, "four-way retry loop found a feasible assignment");
            return Ok((v2s, area));
        }

        debug!(area, "four-way retry loop probe infeasible, relaxing area cap");
        area = ((area + delta) * 100.0).round() / 100.0;
        if area >= hard_limit {
            info!(area, hard_limit, "four-way retry loop hit the hard limit without a feasible assignment");
            return Ok((None, area));
        }
    }
}
