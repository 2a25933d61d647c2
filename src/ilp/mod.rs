//! ILP encoding primitives and the narrow solver abstraction they're built on.

pub mod expr;
pub mod primitives;
pub mod solver;

pub use expr::LinearExpr;
pub use solver::{ConstraintOp, GoodLpModel, MipModel, ObjectiveSense, SolveStatus, VarId};
