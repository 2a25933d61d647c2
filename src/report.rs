//! Resource/utilization reporting (spec §4.8): a pure summary of a finished
//! mapping, used both by direct callers and by the outer search's INFO-level
//! summary log line.

use std::collections::HashMap;

use tracing::info;

use crate::model::{AreaVector, DataflowGraph, PartitionMap, Resource, Slot, SlotId, SlotManager, RESOURCE_TYPES};

/// Per-resource usage of one occupied leaf slot: the summed bundled area of
/// every vertex mapped there, and the fraction of that slot's capacity it
/// consumes.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotUtilization {
    pub slot_id: SlotId,
    pub used: HashMap<Resource, f64>,
    pub fraction_of_capacity: HashMap<Resource, f64>,
}

/// Groups `v2s` by destination leaf and computes per-resource usage against
/// `slot_manager`'s capacity for that leaf. Only slots with at least one
/// vertex mapped to them appear in the result.
pub fn utilization(v2s: &PartitionMap, graph: &DataflowGraph, slot_manager: &SlotManager) -> Vec<SlotUtilization> {
    let mut grouped: HashMap<SlotId, (Slot, AreaVector)> = HashMap::new();
    for (&v, slot) in v2s {
        let entry = grouped.entry(slot.id()).or_insert_with(|| (slot.clone(), AreaVector::zero()));
        entry.1 += graph.vertex(v).bundled_area();
    }

    let mut out: Vec<SlotUtilization> = grouped
        .into_values()
        .map(|(slot, used)| {
            let capacity = slot_manager.capacity(&slot);
            let mut used_map = HashMap::new();
            let mut fraction_map = HashMap::new();
            for &r in RESOURCE_TYPES.iter() {
                let cap = capacity.get(r);
                used_map.insert(r, used.get(r));
                fraction_map.insert(r, if cap > 0.0 { used.get(r) / cap } else { 0.0 });
            }
            SlotUtilization { slot_id: slot.id(), used: used_map, fraction_of_capacity: fraction_map }
        })
        .collect();

    out.sort_by_key(|s| s.slot_id.0);
    out
}

/// Emits one INFO event per occupied slot/resource pair, the summary line
/// the outer search logs after a successful `partition` call.
pub fn log_resource_utilization(v2s: &PartitionMap, graph: &DataflowGraph, slot_manager: &SlotManager) {
    for slot_util in utilization(v2s, graph, slot_manager) {
        for &r in RESOURCE_TYPES.iter() {
            info!(
                slot = slot_util.slot_id.0,
                resource = ?r,
                used = slot_util.used[&r],
                fraction_of_capacity = slot_util.fraction_of_capacity[&r],
                "slot utilization"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DeviceGrid, SlotManager};

    #[test]
    fn utilization_sums_bundled_area_per_slot() {
        let mut graph = DataflowGraph::new();
        let a = graph.add_vertex("a", AreaVector::from_pairs([(Resource::Lut, 30.0)]), AreaVector::from_pairs([(Resource::Lut, 10.0)]));
        let b = graph.add_vertex("b", AreaVector::from_pairs([(Resource::Lut, 20.0)]), AreaVector::zero());

        let slot_manager = SlotManager::new(DeviceGrid::uniform(1, 1, AreaVector::from_pairs([(Resource::Lut, 200.0)])));
        let root = slot_manager.root().clone();
        let v2s: PartitionMap = [(a, root.clone()), (b, root)].into_iter().collect();

        let report = utilization(&v2s, &graph, &slot_manager);
        assert_eq!(report.len(), 1);
        assert_eq!(report[0].used[&Resource::Lut], 60.0);
        assert_eq!(report[0].fraction_of_capacity[&Resource::Lut], 0.3);
    }

    #[test]
    fn empty_mapping_reports_nothing() {
        let graph = DataflowGraph::new();
        let slot_manager = SlotManager::new(DeviceGrid::uniform(1, 1, AreaVector::zero()));
        assert!(utilization(&PartitionMap::new(), &graph, &slot_manager).is_empty());
    }
}
