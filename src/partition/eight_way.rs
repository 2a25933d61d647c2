//! Eight-way bipartition (spec §4.3): extends the four-way formulation with a
//! third binary coordinate. Leaves `L[y1][y2][y3]` are addressed in
//! binary-counting order; each of the three coordinate bits has its own
//! independent crossing budget.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::error::Result;
use crate::ilp::{primitives, ConstraintOp, GoodLpModel, LinearExpr, MipModel, ObjectiveSense, VarId};
use crate::model::{DataflowGraph, PartitionMap, Slot, SlotManager, SplitDir, VertexId, RESOURCE_TYPES};

use super::common::{add_grouping, add_pre_assignments, extract_results, validate_grouping, validate_pre_assignment_membership};

/// One crossing-width budget per coordinate bit: `bit1` bounds edges whose
/// `y1` differs between endpoints, and so on for `bit2`/`bit3`.
#[derive(Debug, Clone, Copy)]
pub struct CrossingBudgets3 {
    pub bit1: f64,
    pub bit2: f64,
    pub bit3: f64,
}

impl CrossingBudgets3 {
    pub fn uniform(cap: f64) -> Self {
        Self { bit1: cap, bit2: cap, bit3: cap }
    }
}

type VarMap = HashMap<VertexId, VarId>;

pub fn eight_way_partition(
    graph: &DataflowGraph,
    init_v2s: &PartitionMap,
    grouping_constraints: &[Vec<VertexId>],
    pre_assignments: &PartitionMap,
    slot_manager: &SlotManager,
    max_area_ratio: f64,
    crossing_budgets: CrossingBudgets3,
    max_search_time_secs: u64,
) -> Result<Option<PartitionMap>> {
    let v_list: Vec<_> = init_v2s.keys().copied().collect();
    let v_set: HashSet<_> = v_list.iter().copied().collect();

    validate_grouping(&v_set, grouping_constraints)?;
    validate_pre_assignment_membership(&v_set, pre_assignments)?;

    let leaves = slot_manager.get_leaf_slots_after_partition(&[SplitDir::Horizontal, SplitDir::Horizontal, SplitDir::Horizontal]);

    let mut model = GoodLpModel::new();
    let y1: VarMap = v_list.iter().map(|&v| (v, model.add_binary_var(&format!("{}_y1", graph.vertex(v).name)))).collect();
    let y2: VarMap = v_list.iter().map(|&v| (v, model.add_binary_var(&format!("{}_y2", graph.vertex(v).name)))).collect();
    let y3: VarMap = v_list.iter().map(|&v| (v, model.add_binary_var(&format!("{}_y3", graph.vertex(v).name)))).collect();

    add_area_constraints(&mut model, graph, &v_list, &y1, &y2, &y3, &leaves, slot_manager, max_area_ratio);
    add_crossing_constraints(&mut model, graph, &v_set, &y1, &y2, &y3, crossing_budgets);
    add_pre_assignments(&mut model, &leaves, pre_assignments, &[&y1, &y2, &y3])?;
    add_grouping(&mut model, grouping_constraints, &[&y1, &y2, &y3]);
    add_objective(&mut model, graph, &v_set, &y1, &y2, &y3);

    debug!(
        max_area_ratio,
        bit1 = crossing_budgets.bit1,
        bit2 = crossing_budgets.bit2,
        bit3 = crossing_budgets.bit3,
        "solving eight-way bipartition ILP"
    );
    let status = model.solve(max_search_time_secs);
    debug!(?status, "eight-way bipartition ILP solved");

    Ok(extract_results(&model, status, &v_list, &leaves, &[&y1, &y2, &y3]))
}

fn add_area_constraints(
    model: &mut GoodLpModel,
    graph: &DataflowGraph,
    v_list: &[VertexId],
    y1: &VarMap,
    y2: &VarMap,
    y3: &VarMap,
    leaves: &[Slot],
    slot_manager: &SlotManager,
    max_area_ratio: f64,
) {
    for (idx, leaf) in leaves.iter().enumerate() {
        let y1_star = ((idx >> 2) & 1) as u8;
        let y2_star = ((idx >> 1) & 1) as u8;
        let y3_star = (idx & 1) as u8;
        let capacity = slot_manager.capacity(leaf);

        let picks: HashMap<_, _> = v_list
            .iter()
            .map(|&v| {
                let e1 = primitives::eq_const(LinearExpr::var(y1[&v]), y1_star);
                let e2 = primitives::eq_const(LinearExpr::var(y2[&v]), y2_star);
                let e3 = primitives::eq_const(LinearExpr::var(y3[&v]), y3_star);
                let name = &graph.vertex(v).name;
                let partial = primitives::and(model, e1, e2, &format!("{name}_pick12_{y1_star}{y2_star}"));
                let full = primitives::and(model, LinearExpr::var(partial), e3, &format!("{name}_pick123_{y1_star}{y2_star}{y3_star}"));
                (v, full)
            })
            .collect();

        for &r in RESOURCE_TYPES.iter() {
            let mut expr = LinearExpr::constant(0.0);
            for &v in v_list {
                let coeff = graph.vertex(v).bundled_area().get(r);
                if coeff != 0.0 {
                    expr = expr + LinearExpr::term(picks[&v], coeff);
                }
            }
            model.add_linear_constraint(expr, ConstraintOp::Le, capacity.get(r) * max_area_ratio);
        }
    }
}

fn add_crossing_constraints(
    model: &mut GoodLpModel,
    graph: &DataflowGraph,
    v_set: &HashSet<VertexId>,
    y1: &VarMap,
    y2: &VarMap,
    y3: &VarMap,
    budgets: CrossingBudgets3,
) {
    let edges = graph.edges_within(v_set);

    let mut expr1 = LinearExpr::constant(0.0);
    let mut expr2 = LinearExpr::constant(0.0);
    let mut expr3 = LinearExpr::constant(0.0);

    for &eid in &edges {
        let e = *graph.edge(eid);
        let tag = eid.0;

        let ind1 = primitives::xor(model, LinearExpr::var(y1[&e.src]), LinearExpr::var(y1[&e.dst]), &format!("bit1_{tag}"));
        expr1 = expr1 + LinearExpr::term(ind1, e.width as f64);

        let ind2 = primitives::xor(model, LinearExpr::var(y2[&e.src]), LinearExpr::var(y2[&e.dst]), &format!("bit2_{tag}"));
        expr2 = expr2 + LinearExpr::term(ind2, e.width as f64);

        let ind3 = primitives::xor(model, LinearExpr::var(y3[&e.src]), LinearExpr::var(y3[&e.dst]), &format!("bit3_{tag}"));
        expr3 = expr3 + LinearExpr::term(ind3, e.width as f64);
    }

    model.add_linear_constraint(expr1, ConstraintOp::Le, budgets.bit1);
    model.add_linear_constraint(expr2, ConstraintOp::Le, budgets.bit2);
    model.add_linear_constraint(expr3, ConstraintOp::Le, budgets.bit3);
}

/// `posY(v) = 4*y1_v + 2*y2_v + y3_v`; minimize `Σ width(e) * |posY(src) - posY(dst)|`.
fn add_objective(model: &mut GoodLpModel, graph: &DataflowGraph, v_set: &HashSet<VertexId>, y1: &VarMap, y2: &VarMap, y3: &VarMap) {
    let edges = graph.edges_within(v_set);
    let mut objective = LinearExpr::constant(0.0);
    for &eid in &edges {
        let e = *graph.edge(eid);
        let pos_src = LinearExpr::var(y1[&e.src]) * 4.0 + LinearExpr::var(y2[&e.src]) * 2.0 + LinearExpr::var(y3[&e.src]);
        let pos_dst = LinearExpr::var(y1[&e.dst]) * 4.0 + LinearExpr::var(y2[&e.dst]) * 2.0 + LinearExpr::var(y3[&e.dst]);
        let cost = primitives::abs_value(model, pos_src - pos_dst, &format!("cost{}", eid.0));
        objective = objective + LinearExpr::term(cost, e.width as f64);
    }
    model.set_objective(objective, ObjectiveSense::Minimize);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AreaVector, DeviceGrid, Resource, SlotManager};

    fn tiny_device() -> SlotManager {
        SlotManager::new(DeviceGrid::uniform(8, 1, AreaVector::from_pairs([(Resource::Lut, 1000.0)])))
    }

    #[test]
    fn three_vertices_in_a_chain_minimize_hamming_cost() {
        let mut graph = DataflowGraph::new();
        let a = graph.add_vertex("a", AreaVector::from_pairs([(Resource::Lut, 10.0)]), AreaVector::zero());
        let b = graph.add_vertex("b", AreaVector::from_pairs([(Resource::Lut, 10.0)]), AreaVector::zero());
        let c = graph.add_vertex("c", AreaVector::from_pairs([(Resource::Lut, 10.0)]), AreaVector::zero());
        graph.add_edge(a, b, 50);
        graph.add_edge(b, c, 50);

        let slot_manager = tiny_device();
        let root = slot_manager.root().clone();
        let init_v2s: PartitionMap = [a, b, c].into_iter().map(|v| (v, root.clone())).collect();

        let result = eight_way_partition(
            &graph,
            &init_v2s,
            &[],
            &PartitionMap::new(),
            &slot_manager,
            0.9,
            CrossingBudgets3::uniform(1000.0),
            5,
        )
        .unwrap()
        .expect("expected a feasible mapping");

        assert_eq!(result.len(), 3);
        assert_eq!(result[&a].id(), result[&b].id());
        assert_eq!(result[&b].id(), result[&c].id());
    }

    #[test]
    fn grouping_overrides_crossing_pressure() {
        let mut graph = DataflowGraph::new();
        let a = graph.add_vertex("a", AreaVector::zero(), AreaVector::zero());
        let b = graph.add_vertex("b", AreaVector::zero(), AreaVector::zero());
        graph.add_edge(a, b, 500);
        let slot_manager = tiny_device();
        let root = slot_manager.root().clone();
        let init_v2s: PartitionMap = [a, b].into_iter().map(|v| (v, root.clone())).collect();

        let result = eight_way_partition(
            &graph,
            &init_v2s,
            &[vec![a, b]],
            &PartitionMap::new(),
            &slot_manager,
            0.9,
            CrossingBudgets3::uniform(0.0),
            5,
        )
        .unwrap()
        .expect("grouping alone makes this feasible with zero crossing budget");

        assert_eq!(result[&a].id(), result[&b].id());
    }
}
