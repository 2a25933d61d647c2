//! Outer two-phase search (spec §4.5): binary search over the area-usage
//! ratio and the crossing-width budget, invoking whichever bipartition
//! solver `partition_method` names at every probe.

use tracing::{debug, info};

use crate::config::{OptPriority, PartitionMethod};
use crate::error::{FloorplanError, Result};
use crate::model::{DataflowGraph, PartitionMap, SlotManager, VertexId};
use crate::partition::{eight_way_partition, four_way_partition_with_retry, CrossingBudgets3, CrossingCaps3};

const AREA_THRESHOLD: f64 = 0.01;
const CROSSING_THRESHOLD: f64 = 500.0;

/// Dispatches one ILP probe to the configured bipartition solver, replicating
/// `crossing_cap` across every boundary/category the chosen solver exposes
/// (§9 open-question resolution: the outer search never differentiates them).
/// The four-way path goes through the retry loop (§4.4) at every probe, per
/// §2.1's "Outer search" item — `area_cap` is the retry loop's starting
/// `ref_usage_ratio`, not a hard ceiling, so a probe can succeed even when
/// `area_cap` alone would be infeasible.
#[allow(clippy::too_many_arguments)]
fn probe(
    method: PartitionMethod,
    graph: &DataflowGraph,
    init_v2s: &PartitionMap,
    grouping_constraints: &[Vec<VertexId>],
    pre_assignments: &PartitionMap,
    slot_manager: &SlotManager,
    area_cap: f64,
    crossing_cap: f64,
    max_search_time_secs: u64,
    retry_delta: f64,
    retry_hard_limit: f64,
) -> Result<Option<PartitionMap>> {
    match method {
        PartitionMethod::FourWayPartition => {
            let (mapping, _escalated_area) = four_way_partition_with_retry(
                graph,
                init_v2s,
                grouping_constraints,
                pre_assignments,
                slot_manager,
                area_cap,
                CrossingCaps3::uniform(crossing_cap),
                max_search_time_secs,
                retry_delta,
                retry_hard_limit,
            )?;
            Ok(mapping)
        }
        PartitionMethod::EightWayPartition => eight_way_partition(
            graph,
            init_v2s,
            grouping_constraints,
            pre_assignments,
            slot_manager,
            area_cap,
            CrossingBudgets3::uniform(crossing_cap),
            max_search_time_secs,
        ),
    }
}

/// Bisects `[lo, hi]` for the minimum value at which `probe` succeeds.
/// Shrinks `hi` to `mid` on a feasible probe (remembering that mapping) and
/// raises `lo` to `mid` on an infeasible one, per §4.5's state machine.
fn binary_search_min(lo: f64, hi: f64, threshold: f64, mut probe: impl FnMut(f64) -> Result<Option<PartitionMap>>) -> Result<(Option<PartitionMap>, f64)> {
    if lo > hi {
        return Err(FloorplanError::InvalidSearchBounds { lo, hi });
    }

    let mut lo = lo;
    let mut hi = hi;
    let mut best: Option<PartitionMap> = None;
    let mut best_cap = hi;

    while hi - lo >= threshold {
        let mid = lo + (hi - lo) / 2.0;
        match probe(mid)? {
            Some(mapping) => {
                debug!(mid, "probe feasible, shrinking upper bound");
                best = Some(mapping);
                best_cap = mid;
                hi = mid;
            }
            None => {
                debug!(mid, "probe infeasible, raising lower bound");
                lo = mid;
            }
        }
    }

    Ok((best, best_cap))
}

/// `AREA_PRIORITIZED`: minimize the area cap first (at the loosest crossing
/// budget), then minimize the crossing cap at that area.
#[allow(clippy::too_many_arguments)]
fn area_prioritized(
    method: PartitionMethod,
    graph: &DataflowGraph,
    init_v2s: &PartitionMap,
    grouping_constraints: &[Vec<VertexId>],
    pre_assignments: &PartitionMap,
    slot_manager: &SlotManager,
    min_area: f64,
    max_area: f64,
    min_crossing: f64,
    max_crossing: f64,
    max_search_time_secs: u64,
    retry_delta: f64,
    retry_hard_limit: f64,
) -> Result<(Option<PartitionMap>, f64, f64)> {
    let (area_mapping, area_cap) = binary_search_min(min_area, max_area, AREA_THRESHOLD, |mid| {
        probe(
            method,
            graph,
            init_v2s,
            grouping_constraints,
            pre_assignments,
            slot_manager,
            mid,
            max_crossing.round(),
            max_search_time_secs,
            retry_delta,
            retry_hard_limit,
        )
    })?;

    let Some(_) = &area_mapping else {
        info!("area-prioritized search: no feasible area cap found");
        return Ok((None, area_cap, max_crossing));
    };

    let (crossing_mapping, crossing_cap) = binary_search_min(min_crossing, max_crossing, CROSSING_THRESHOLD, |mid| {
        probe(
            method,
            graph,
            init_v2s,
            grouping_constraints,
            pre_assignments,
            slot_manager,
            area_cap,
            mid.round(),
            max_search_time_secs,
            retry_delta,
            retry_hard_limit,
        )
    })?;

    match crossing_mapping {
        Some(_) => Ok((crossing_mapping, area_cap, crossing_cap)),
        None => Ok((area_mapping, area_cap, max_crossing)),
    }
}

/// `SLR_CROSSING_PRIORITIZED`: the same two searches, crossing cap first.
#[allow(clippy::too_many_arguments)]
fn crossing_prioritized(
    method: PartitionMethod,
    graph: &DataflowGraph,
    init_v2s: &PartitionMap,
    grouping_constraints: &[Vec<VertexId>],
    pre_assignments: &PartitionMap,
    slot_manager: &SlotManager,
    min_area: f64,
    max_area: f64,
    min_crossing: f64,
    max_crossing: f64,
    max_search_time_secs: u64,
    retry_delta: f64,
    retry_hard_limit: f64,
) -> Result<(Option<PartitionMap>, f64, f64)> {
    let (crossing_mapping, crossing_cap) = binary_search_min(min_crossing, max_crossing, CROSSING_THRESHOLD, |mid| {
        probe(
            method,
            graph,
            init_v2s,
            grouping_constraints,
            pre_assignments,
            slot_manager,
            max_area,
            mid.round(),
            max_search_time_secs,
            retry_delta,
            retry_hard_limit,
        )
    })?;

    let Some(_) = &crossing_mapping else {
        info!("crossing-prioritized search: no feasible crossing cap found");
        return Ok((None, max_area, crossing_cap));
    };

    let (area_mapping, area_cap) = binary_search_min(min_area, max_area, AREA_THRESHOLD, |mid| {
        probe(
            method,
            graph,
            init_v2s,
            grouping_constraints,
            pre_assignments,
            slot_manager,
            mid,
            crossing_cap.round(),
            max_search_time_secs,
            retry_delta,
            retry_hard_limit,
        )
    })?;

    match area_mapping {
        Some(_) => Ok((area_mapping, area_cap, crossing_cap)),
        None => Ok((crossing_mapping, max_area, crossing_cap)),
    }
}

/// Runs the configured two-phase search end to end, returning the final
/// mapping (empty on total search exhaustion) plus the caps it converged on.
#[allow(clippy::too_many_arguments)]
pub fn search_partition(
    graph: &DataflowGraph,
    init_v2s: &PartitionMap,
    grouping_constraints: &[Vec<VertexId>],
    pre_assignments: &PartitionMap,
    slot_manager: &SlotManager,
    min_area: f64,
    max_area: f64,
    min_crossing: f64,
    max_crossing: f64,
    max_search_time_secs: u64,
    retry_delta: f64,
    retry_hard_limit: f64,
    partition_method: PartitionMethod,
    floorplan_opt_priority: OptPriority,
) -> Result<(PartitionMap, f64, f64)> {
    if min_area > max_area {
        return Err(FloorplanError::InvalidSearchBounds { lo: min_area, hi: max_area });
    }
    if min_crossing > max_crossing {
        return Err(FloorplanError::InvalidSearchBounds { lo: min_crossing, hi: max_crossing });
    }

    info!(?partition_method, ?floorplan_opt_priority, min_area, max_area, min_crossing, max_crossing, "starting outer search");

    let (mapping, area_cap, crossing_cap) = match floorplan_opt_priority {
        OptPriority::AreaPrioritized => area_prioritized(
            partition_method,
            graph,
            init_v2s,
            grouping_constraints,
            pre_assignments,
            slot_manager,
            min_area,
            max_area,
            min_crossing,
            max_crossing,
            max_search_time_secs,
            retry_delta,
            retry_hard_limit,
        )?,
        OptPriority::SlrCrossingPrioritized => crossing_prioritized(
            partition_method,
            graph,
            init_v2s,
            grouping_constraints,
            pre_assignments,
            slot_manager,
            min_area,
            max_area,
            min_crossing,
            max_crossing,
            max_search_time_secs,
            retry_delta,
            retry_hard_limit,
        )?,
    };

    match mapping {
        Some(mapping) => {
            info!(area_cap, crossing_cap, "search converged on a feasible mapping");
            Ok((mapping, area_cap, crossing_cap))
        }
        None => {
            info!(area_cap, crossing_cap, "search exhausted without a feasible mapping");
            Ok((PartitionMap::new(), area_cap, crossing_cap))
        }
    }
}
