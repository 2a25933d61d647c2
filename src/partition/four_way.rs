//! Four-way bipartition (spec §4.2): two binary coordinates per vertex,
//! leaves `L[y1][y2]` addressed SLR0..SLR3 in binary-counting order.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::error::Result;
use crate::ilp::{primitives, ConstraintOp, GoodLpModel, LinearExpr, MipModel, ObjectiveSense, VarId};
use crate::model::{DataflowGraph, PartitionMap, Slot, SlotManager, SplitDir, VertexId, RESOURCE_TYPES};

use super::common::{add_grouping, add_pre_assignments, extract_results, validate_grouping, validate_pre_assignment_membership};

/// Three independently-settable crossing-width budgets, one per inter-SLR
/// boundary. The outer search (§4.5) always probes with the same value
/// replicated across all three; a direct caller may differentiate them.
#[derive(Debug, Clone, Copy)]
pub struct CrossingCaps3 {
    pub w01: f64,
    pub w12: f64,
    pub w23: f64,
}

impl CrossingCaps3 {
    pub fn uniform(cap: f64) -> Self {
        Self { w01: cap, w12: cap, w23: cap }
    }
}

/// Refines `init_v2s` into four leaves. Returns `Ok(None)` if the solver
/// found no feasible assignment within `max_search_time_secs`; returns
/// `Err` only for structural input mistakes (unknown vertices, an
/// unreachable pre-assignment).
pub fn four_way_partition(
    graph: &DataflowGraph,
    init_v2s: &PartitionMap,
    grouping_constraints: &[Vec<VertexId>],
    pre_assignments: &PartitionMap,
    slot_manager: &SlotManager,
    max_area_ratio: f64,
    crossing_caps: CrossingCaps3,
    max_search_time_secs: u64,
) -> Result<Option<PartitionMap>> {
    let v_list: Vec<_> = init_v2s.keys().copied().collect();
    let v_set: HashSet<_> = v_list.iter().copied().collect();

    validate_grouping(&v_set, grouping_constraints)?;
    validate_pre_assignment_membership(&v_set, pre_assignments)?;

    let leaves = slot_manager.get_leaf_slots_after_partition(&[SplitDir::Horizontal, SplitDir::Horizontal]);

    let mut model = GoodLpModel::new();
    let y1: HashMap<_, _> = v_list.iter().map(|&v| (v, model.add_binary_var(&format!("{}_y1", graph.vertex(v).name)))).collect();
    let y2: HashMap<_, _> = v_list.iter().map(|&v| (v, model.add_binary_var(&format!("{}_y2", graph.vertex(v).name)))).collect();

    add_area_constraints(&mut model, graph, &v_list, &y1, &y2, &leaves, slot_manager, max_area_ratio);
    add_crossing_constraints(&mut model, graph, &v_set, &y1, &y2, crossing_caps);
    add_pre_assignments(&mut model, &leaves, pre_assignments, &[&y1, &y2])?;
    add_grouping(&mut model, grouping_constraints, &[&y1, &y2]);
    add_objective(&mut model, graph, &v_set, &y1, &y2);

    debug!(
        max_area_ratio,
        w01 = crossing_caps.w01,
        w12 = crossing_caps.w12,
        w23 = crossing_caps.w23,
        "solving four-way bipartition ILP"
    );
    let status = model.solve(max_search_time_secs);
    debug!(?status, "four-way bipartition ILP solved");

    Ok(extract_results(&model, status, &v_list, &leaves, &[&y1, &y2]))
}

type VarMap = HashMap<VertexId, VarId>;

fn add_area_constraints(
    model: &mut GoodLpModel,
    graph: &DataflowGraph,
    v_list: &[VertexId],
    y1: &VarMap,
    y2: &VarMap,
    leaves: &[Slot],
    slot_manager: &SlotManager,
    max_area_ratio: f64,
) {
    for (idx, leaf) in leaves.iter().enumerate() {
        let y1_star = ((idx >> 1) & 1) as u8;
        let y2_star = (idx & 1) as u8;
        let capacity = slot_manager.capacity(leaf);

        let picks: HashMap<_, _> = v_list
            .iter()
            .map(|&v| {
                let e1 = primitives::eq_const(LinearExpr::var(y1[&v]), y1_star);
                let e2 = primitives::eq_const(LinearExpr::var(y2[&v]), y2_star);
                let label = format!("{}_pick{y1_star}{y2_star}", graph.vertex(v).name);
                (v, primitives::and(model, e1, e2, &label))
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

/// `inSLR0_v = ¬y1_v ∧ ¬y2_v`.
fn in_slr0(model: &mut GoodLpModel, y1: &VarMap, y2: &VarMap, v: VertexId, label: &str) -> VarId {
    let not_y1 = primitives::not(LinearExpr::var(y1[&v]));
    let not_y2 = primitives::not(LinearExpr::var(y2[&v]));
    primitives::and(model, not_y1, not_y2, label)
}

/// `inSLR3_v = y1_v ∧ y2_v`.
fn in_slr3(model: &mut GoodLpModel, y1: &VarMap, y2: &VarMap, v: VertexId, label: &str) -> VarId {
    primitives::and(model, LinearExpr::var(y1[&v]), LinearExpr::var(y2[&v]), label)
}

fn add_crossing_constraints(
    model: &mut GoodLpModel,
    graph: &DataflowGraph,
    v_set: &HashSet<VertexId>,
    y1: &VarMap,
    y2: &VarMap,
    caps: CrossingCaps3,
) {
    let edges = graph.edges_within(v_set);

    let mut expr12 = LinearExpr::constant(0.0);
    let mut expr01 = LinearExpr::constant(0.0);
    let mut expr23 = LinearExpr::constant(0.0);

    for &eid in &edges {
        let e = *graph.edge(eid);
        let tag = eid.0;

        let ind12 = primitives::xor(model, LinearExpr::var(y1[&e.src]), LinearExpr::var(y1[&e.dst]), &format!("cross12_{tag}"));
        expr12 = expr12 + LinearExpr::term(ind12, e.width as f64);

        let in0_s = in_slr0(model, y1, y2, e.src, &format!("in0_s{tag}"));
        let in0_d = in_slr0(model, y1, y2, e.dst, &format!("in0_d{tag}"));
        let not_in0_s = primitives::not(LinearExpr::var(in0_s));
        let not_in0_d = primitives::not(LinearExpr::var(in0_d));
        let left = primitives::and(model, LinearExpr::var(in0_s), not_in0_d, &format!("cross01_l{tag}"));
        let right = primitives::and(model, LinearExpr::var(in0_d), not_in0_s, &format!("cross01_r{tag}"));
        let ind01 = primitives::or(model, LinearExpr::var(left), LinearExpr::var(right), &format!("cross01_{tag}"));
        expr01 = expr01 + LinearExpr::term(ind01, e.width as f64);

        let in3_s = in_slr3(model, y1, y2, e.src, &format!("in3_s{tag}"));
        let in3_d = in_slr3(model, y1, y2, e.dst, &format!("in3_d{tag}"));
        let not_in3_s = primitives::not(LinearExpr::var(in3_s));
        let not_in3_d = primitives::not(LinearExpr::var(in3_d));
        let left3 = primitives::and(model, LinearExpr::var(in3_s), not_in3_d, &format!("cross23_l{tag}"));
        let right3 = primitives::and(model, LinearExpr::var(in3_d), not_in3_s, &format!("cross23_r{tag}"));
        let ind23 = primitives::or(model, LinearExpr::var(left3), LinearExpr::var(right3), &format!("cross23_{tag}"));
        expr23 = expr23 + LinearExpr::term(ind23, e.width as f64);
    }

    model.add_linear_constraint(expr01, ConstraintOp::Le, caps.w01);
    model.add_linear_constraint(expr12, ConstraintOp::Le, caps.w12);
    model.add_linear_constraint(expr23, ConstraintOp::Le, caps.w23);
}

/// `posY(v) = 2*y1_v + y2_v`; minimize `Σ width(e) * |posY(src) - posY(dst)|`.
fn add_objective(model: &mut GoodLpModel, graph: &DataflowGraph, v_set: &HashSet<VertexId>, y1: &VarMap, y2: &VarMap) {
    let edges = graph.edges_within(v_set);
    let mut objective = LinearExpr::constant(0.0);
    for &eid in &edges {
        let e = *graph.edge(eid);
        let pos_src = LinearExpr::var(y1[&e.src]) * 2.0 + LinearExpr::var(y2[&e.src]);
        let pos_dst = LinearExpr::var(y1[&e.dst]) * 2.0 + LinearExpr::var(y2[&e.dst]);
        let cost = primitives::abs_value(model, pos_src - pos_dst, &format!("cost{}", eid.0));
        objective = objective + LinearExpr::term(cost, e.width as f64);
    }
    model.set_objective(objective, ObjectiveSense::Minimize);
}
