//! Hierarchical bipartition floorplanner for multi-die FPGA dataflow graphs.
//!
//! Given a dataflow graph and a device modeled as a grid of Super Logic
//! Regions, [`partition`] assigns every vertex to a rectangular slot such
//! that per-slot resource usage and inter-SLR crossing widths stay under
//! caller-tunable budgets, while minimizing a wirelength proxy. See
//! `DESIGN.md` for the module-by-module grounding.

pub mod config;
pub mod error;
pub mod ilp;
pub mod model;
pub mod partition;
pub mod report;
pub mod search;

pub use config::{FloorplanConfig, OptPriority, PartitionMethod};
pub use error::{FloorplanError, Result};
pub use model::{DataflowGraph, PartitionMap, SlotManager, VertexId};

use tracing::info;

/// The public entry point (spec §6): runs the two-phase outer search
/// configured by `partition_method`/`floorplan_opt_priority`, logs a
/// resource-utilization summary on success, and returns the final mapping
/// (empty on total search exhaustion — optimization outcomes never error).
#[allow(clippy::too_many_arguments)]
pub fn partition(
    graph: &DataflowGraph,
    init_v2s: &PartitionMap,
    slot_manager: &SlotManager,
    grouping_constraints: &[Vec<VertexId>],
    pre_assignments: &PartitionMap,
    min_area: f64,
    max_area: f64,
    min_crossing: f64,
    max_crossing: f64,
    max_search_time_secs: u64,
    retry_delta: f64,
    retry_hard_limit: f64,
    partition_method: PartitionMethod,
    floorplan_opt_priority: OptPriority,
) -> Result<PartitionMap> {
    let (mapping, area_cap, crossing_cap) = search::search_partition(
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
        partition_method,
        floorplan_opt_priority,
    )?;

    if mapping.is_empty() {
        if !init_v2s.is_empty() {
            info!(area_cap, crossing_cap, "partition returned no feasible mapping");
        }
    } else {
        report::log_resource_utilization(&mapping, graph, slot_manager);
    }

    Ok(mapping)
}

/// Convenience wrapper that pulls every tunable from a [`FloorplanConfig`]
/// instead of positional arguments. The core `partition` function itself
/// stays config-struct-agnostic per §6; this just assembles its arguments.
pub fn partition_with_config(
    graph: &DataflowGraph,
    init_v2s: &PartitionMap,
    slot_manager: &SlotManager,
    grouping_constraints: &[Vec<VertexId>],
    pre_assignments: &PartitionMap,
    config: &FloorplanConfig,
) -> Result<PartitionMap> {
    partition(
        graph,
        init_v2s,
        slot_manager,
        grouping_constraints,
        pre_assignments,
        config.min_area,
        config.max_area,
        config.min_crossing,
        config.max_crossing,
        config.max_search_time_secs,
        config.retry_delta,
        config.retry_hard_limit,
        config.partition_method,
        config.floorplan_opt_priority,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AreaVector, DeviceGrid, Resource};

    #[test]
    fn end_to_end_co_location_of_two_light_connected_vertices() {
        let mut graph = DataflowGraph::new();
        let a = graph.add_vertex("a", AreaVector::from_pairs([(Resource::Lut, 50.0)]), AreaVector::zero());
        let b = graph.add_vertex("b", AreaVector::from_pairs([(Resource::Lut, 50.0)]), AreaVector::zero());
        graph.add_edge(a, b, 100);

        let slot_manager = SlotManager::new(DeviceGrid::uniform(8, 1, AreaVector::from_pairs([(Resource::Lut, 1000.0)])));
        let root = slot_manager.root().clone();
        let init_v2s: PartitionMap = [a, b].into_iter().map(|v| (v, root.clone())).collect();

        let result = partition(
            &graph,
            &init_v2s,
            &slot_manager,
            &[],
            &PartitionMap::new(),
            0.5,
            0.9,
            0.0,
            1000.0,
            5,
            0.02,
            2.0,
            PartitionMethod::FourWayPartition,
            OptPriority::AreaPrioritized,
        )
        .unwrap();

        assert_eq!(result.len(), 2);
        assert_eq!(result[&a].id(), result[&b].id());
    }

    #[test]
    fn partition_with_config_uses_documented_defaults() {
        let mut graph = DataflowGraph::new();
        let a = graph.add_vertex("a", AreaVector::from_pairs([(Resource::Lut, 10.0)]), AreaVector::zero());

        let slot_manager = SlotManager::new(DeviceGrid::uniform(8, 1, AreaVector::from_pairs([(Resource::Lut, 1000.0)])));
        let root = slot_manager.root().clone();
        let init_v2s: PartitionMap = [(a, root)].into_iter().collect();

        let config = FloorplanConfig::default();
        let result = partition_with_config(&graph, &init_v2s, &slot_manager, &[], &PartitionMap::new(), &config).unwrap();
        assert_eq!(result.len(), 1);
    }
}
