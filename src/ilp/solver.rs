//! A narrow MIP solver interface, per the design note that the rest of the
//! crate should never name a concrete solver type. `good_lp` backs the one
//! implementation shipped here; swapping in another modern MIP backend means
//! writing one more `impl MipModel`.

use good_lp::{variable, Expression, ProblemVariables, ResolutionError, Solution, SolverModel, Variable};

use super::expr::LinearExpr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VarId(pub(crate) usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintOp {
    Le,
    Ge,
    Eq,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectiveSense {
    Minimize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveStatus {
    Optimal,
    Feasible,
    Infeasible,
    Unknown,
}

impl SolveStatus {
    pub fn is_success(self) -> bool {
        matches!(self, SolveStatus::Optimal | SolveStatus::Feasible)
    }
}

/// The abstraction boundary: everything above this trait (primitives,
/// bipartition formulations) builds a model purely in terms of these calls.
pub trait MipModel {
    fn add_binary_var(&mut self, name: &str) -> VarId;
    fn add_integer_var(&mut self, name: &str, lower_bound: f64) -> VarId;
    fn add_linear_constraint(&mut self, expr: LinearExpr, op: ConstraintOp, rhs: f64);
    fn set_objective(&mut self, expr: LinearExpr, sense: ObjectiveSense);
    /// `time_limit_secs` is advisory: a backend that doesn't support a wall
    /// clock cutoff (microlp) runs to completion instead of erroring.
    fn solve(&mut self, time_limit_secs: u64) -> SolveStatus;
    fn value(&self, var: VarId) -> f64;
}

/// `good_lp`-backed [`MipModel`]. Deferred-build: variables and constraints
/// accumulate until [`GoodLpModel::solve`] hands everything to the backend.
#[derive(Default)]
pub struct GoodLpModel {
    vars: ProblemVariables,
    handles: Vec<Variable>,
    constraints: Vec<good_lp::Constraint>,
    objective: Option<LinearExpr>,
    solution: Option<Box<dyn Solution>>,
}

impl GoodLpModel {
    pub fn new() -> Self {
        Self::default()
    }

    fn to_good_lp_expr(&self, expr: &LinearExpr) -> Expression {
        let mut out = Expression::from(expr.constant);
        for (var, coeff) in &expr.terms {
            out += *coeff * self.handles[var.0];
        }
        out
    }
}

impl MipModel for GoodLpModel {
    fn add_binary_var(&mut self, _name: &str) -> VarId {
        let handle = self.vars.add(variable().binary());
        let id = VarId(self.handles.len());
        self.handles.push(handle);
        id
    }

    fn add_integer_var(&mut self, _name: &str, lower_bound: f64) -> VarId {
        let handle = self.vars.add(variable().integer().min(lower_bound));
        let id = VarId(self.handles.len());
        self.handles.push(handle);
        id
    }

    fn add_linear_constraint(&mut self, expr: LinearExpr, op: ConstraintOp, rhs: f64) {
        let lhs = self.to_good_lp_expr(&expr);
        let constraint = match op {
            ConstraintOp::Le => lhs.leq(rhs),
            ConstraintOp::Ge => lhs.geq(rhs),
            ConstraintOp::Eq => lhs.eq(rhs),
        };
        self.constraints.push(constraint);
    }

    fn set_objective(&mut self, expr: LinearExpr, _sense: ObjectiveSense) {
        self.objective = Some(expr);
    }

    fn solve(&mut self, _time_limit_secs: u64) -> SolveStatus {
        let vars = std::mem::take(&mut self.vars);
        let objective_expr = self
            .objective
            .take()
            .map(|e| self.to_good_lp_expr(&e))
            .unwrap_or_else(|| Expression::from(0.0));

        let mut model = vars.minimise(objective_expr).using(good_lp::solvers::microlp::microlp);
        for constraint in self.constraints.drain(..) {
            model = model.with(constraint);
        }

        match model.solve() {
            Ok(solution) => {
                self.solution = Some(Box::new(solution));
                SolveStatus::Optimal
            }
            Err(ResolutionError::Infeasible) => SolveStatus::Infeasible,
            Err(ResolutionError::Unbounded) => SolveStatus::Unknown,
            Err(_) => SolveStatus::Unknown,
        }
    }

    fn value(&self, var: VarId) -> f64 {
        match &self.solution {
            Some(solution) => solution.value(self.handles[var.0]),
            None => 0.0,
        }
    }
}
