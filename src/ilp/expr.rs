//! Solver-agnostic linear expressions over the narrow [`crate::ilp::solver::VarId`]
//! handle, so the encoding primitives and bipartition formulations never name
//! a concrete MIP backend type.

use std::ops::{Add, Mul, Neg, Sub};

use super::solver::VarId;

#[derive(Debug, Clone, Default)]
pub struct LinearExpr {
    pub terms: Vec<(VarId, f64)>,
    pub constant: f64,
}

impl LinearExpr {
    pub fn constant(c: f64) -> Self {
        Self { terms: Vec::new(), constant: c }
    }

    pub fn term(var: VarId, coeff: f64) -> Self {
        Self { terms: vec![(var, coeff)], constant: 0.0 }
    }

    pub fn var(var: VarId) -> Self {
        Self::term(var, 1.0)
    }
}

impl From<VarId> for LinearExpr {
    fn from(var: VarId) -> Self {
        LinearExpr::var(var)
    }
}

impl Add for LinearExpr {
    type Output = LinearExpr;
    fn add(mut self, rhs: LinearExpr) -> LinearExpr {
        self.terms.extend(rhs.terms);
        self.constant += rhs.constant;
        self
    }
}

impl Sub for LinearExpr {
    type Output = LinearExpr;
    fn sub(self, rhs: LinearExpr) -> LinearExpr {
        self + (-rhs)
    }
}

impl Neg for LinearExpr {
    type Output = LinearExpr;
    fn neg(mut self) -> LinearExpr {
        for (_, coeff) in self.terms.iter_mut() {
            *coeff = -*coeff;
        }
        self.constant = -self.constant;
        self
    }
}

impl Mul<f64> for LinearExpr {
    type Output = LinearExpr;
    fn mul(mut self, rhs: f64) -> LinearExpr {
        for (_, coeff) in self.terms.iter_mut() {
            *coeff *= rhs;
        }
        self.constant *= rhs;
        self
    }
}
