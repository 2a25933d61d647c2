//! Validation and extraction helpers shared by the four-way and eight-way
//! bipartition formulations.

use std::collections::{HashMap, HashSet};

use crate::error::{FloorplanError, Result};
use crate::ilp::{GoodLpModel, LinearExpr, SolveStatus, VarId};
use crate::model::{PartitionMap, Slot, VertexId};

/// Every vertex named by a grouping or pre-assignment must be one of the
/// vertices this bipartition call is actually deciding (`init_v2s.keys()`).
pub fn validate_grouping(v_set: &HashSet<VertexId>, grouping: &[Vec<VertexId>]) -> Result<()> {
    for group in grouping {
        for &v in group {
            if !v_set.contains(&v) {
                return Err(FloorplanError::UnknownGroupingVertex(v));
            }
        }
    }
    Ok(())
}

pub fn validate_pre_assignment_membership(v_set: &HashSet<VertexId>, pre_assignments: &PartitionMap) -> Result<()> {
    for &v in pre_assignments.keys() {
        if !v_set.contains(&v) {
            return Err(FloorplanError::UnknownPreAssignedVertex(v));
        }
    }
    Ok(())
}

/// For every pre-assigned vertex, find the leaf containing its expected slot
/// and pin the vertex's coordinate variables to that leaf's index bits.
pub fn add_pre_assignments(
    model: &mut GoodLpModel,
    leaves: &[Slot],
    pre_assignments: &PartitionMap,
    coord_vars: &[&HashMap<VertexId, VarId>],
) -> Result<()> {
    use crate::ilp::{ConstraintOp, MipModel};

    let num_bits = coord_vars.len();
    for (&v, expected_slot) in pre_assignments {
        let leaf_idx = leaves
            .iter()
            .position(|avail| avail.contains_child_slot(expected_slot))
            .ok_or(FloorplanError::PreAssignmentOutsideLeaves(v))?;

        for (bit_pos, vars) in coord_vars.iter().enumerate() {
            let shift = num_bits - bit_pos - 1;
            let bit = (leaf_idx >> shift) & 1;
            let var = vars[&v];
            model.add_linear_constraint(LinearExpr::var(var), ConstraintOp::Eq, bit as f64);
        }
    }
    Ok(())
}

/// Grouped vertices must share every coordinate bit with the group's first member.
pub fn add_grouping(model: &mut GoodLpModel, grouping: &[Vec<VertexId>], coord_vars: &[&HashMap<VertexId, VarId>]) {
    use crate::ilp::{ConstraintOp, MipModel};

    for group in grouping {
        if group.len() < 2 {
            continue;
        }
        let leader = group[0];
        for &member in &group[1..] {
            for vars in coord_vars {
                let expr = LinearExpr::var(vars[&leader]) - LinearExpr::var(vars[&member]);
                model.add_linear_constraint(expr, ConstraintOp::Eq, 0.0);
            }
        }
    }
}

/// Reads each vertex's rounded coordinate bits and assembles the final
/// mapping, or returns `None` on any non-success solver status.
pub fn extract_results(
    model: &GoodLpModel,
    status: SolveStatus,
    v_list: &[VertexId],
    leaves: &[Slot],
    coord_vars: &[&HashMap<VertexId, VarId>],
) -> Option<PartitionMap> {
    use crate::ilp::MipModel;

    if !status.is_success() {
        return None;
    }

    let num_bits = coord_vars.len();
    let mut out = PartitionMap::new();
    for &v in v_list {
        let mut idx = 0usize;
        for vars in coord_vars {
            let bit = model.value(vars[&v]).round() as usize;
            idx = (idx << 1) | bit;
        }
        debug_assert!(idx < (1 << num_bits));
        out.insert(v, leaves[idx].clone());
    }
    Some(out)
}
