//! Reusable linearizations of logical connectives and absolute value over
//! binary decision variables (spec §4.1). These are the shared vocabulary the
//! bipartition formulations use to build crossing detectors and objectives.

use super::expr::LinearExpr;
use super::solver::{ConstraintOp, MipModel, VarId};

/// `c = a ∧ b`.
pub fn and(model: &mut dyn MipModel, a: LinearExpr, b: LinearExpr, label: &str) -> VarId {
    let c = model.add_binary_var(&format!("{label}_and"));
    let c_expr = LinearExpr::var(c);
    model.add_linear_constraint(c_expr.clone() - a.clone(), ConstraintOp::Le, 0.0); // c <= a
    model.add_linear_constraint(c_expr.clone() - b.clone(), ConstraintOp::Le, 0.0); // c <= b
    model.add_linear_constraint(c_expr - a - b, ConstraintOp::Ge, -1.0); // c >= a + b - 1
    c
}

/// `c = a ∨ b`.
pub fn or(model: &mut dyn MipModel, a: LinearExpr, b: LinearExpr, label: &str) -> VarId {
    let c = model.add_binary_var(&format!("{label}_or"));
    let c_expr = LinearExpr::var(c);
    model.add_linear_constraint(c_expr.clone() - a.clone(), ConstraintOp::Ge, 0.0); // c >= a
    model.add_linear_constraint(c_expr.clone() - b.clone(), ConstraintOp::Ge, 0.0); // c >= b
    model.add_linear_constraint(c_expr - a - b, ConstraintOp::Le, 0.0); // c <= a + b
    c
}

/// `c = ¬a`. No auxiliary variable needed: it's an exact linear substitution.
pub fn not(a: LinearExpr) -> LinearExpr {
    LinearExpr::constant(1.0) - a
}

/// `c = a ⊕ b`.
pub fn xor(model: &mut dyn MipModel, a: LinearExpr, b: LinearExpr, label: &str) -> VarId {
    let c = model.add_binary_var(&format!("{label}_xor"));
    let c_expr = LinearExpr::var(c);
    model.add_linear_constraint(c_expr.clone() - a.clone() + b.clone(), ConstraintOp::Ge, 0.0); // c >= a - b
    model.add_linear_constraint(c_expr.clone() + a.clone() - b.clone(), ConstraintOp::Ge, 0.0); // c >= b - a
    model.add_linear_constraint(c_expr.clone() - a.clone() - b.clone(), ConstraintOp::Le, 0.0); // c <= a + b
    model.add_linear_constraint(c_expr + a + b, ConstraintOp::Le, 2.0); // c <= 2 - a - b
    c
}

/// `[x = k]` for a binary `x`: `x` itself when `k == 1`, `¬x` when `k == 0`.
pub fn eq_const(x: LinearExpr, k: u8) -> LinearExpr {
    if k == 1 {
        x
    } else {
        not(x)
    }
}

/// Introduces an integer `t >= 0` with `t >= e` and `t >= -e`; a minimizing
/// objective that charges `t` makes `t == |e|` at the optimum.
pub fn abs_value(model: &mut dyn MipModel, e: LinearExpr, label: &str) -> VarId {
    let t = model.add_integer_var(&format!("{label}_abs"), 0.0);
    let t_expr = LinearExpr::var(t);
    model.add_linear_constraint(t_expr.clone() - e.clone(), ConstraintOp::Ge, 0.0);
    model.add_linear_constraint(t_expr + e, ConstraintOp::Ge, 0.0);
    t
}
