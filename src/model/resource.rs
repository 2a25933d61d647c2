//! Per-resource area accounting shared by vertices and slots.

use std::ops::{Add, AddAssign, Mul};

/// The resource dimensions tracked by the floorplanner. Implementation-defined
/// per the device's fabric; this crate tracks the five kinds a multi-die FPGA
/// design typically budgets against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Resource {
    Lut,
    Ff,
    Bram,
    Dsp,
    Uram,
}

/// Canonical, stable ordering of [`Resource`] used to index [`AreaVector`].
pub const RESOURCE_TYPES: [Resource; 5] = [
    Resource::Lut,
    Resource::Ff,
    Resource::Bram,
    Resource::Dsp,
    Resource::Uram,
];

impl Resource {
    fn index(self) -> usize {
        match self {
            Resource::Lut => 0,
            Resource::Ff => 1,
            Resource::Bram => 2,
            Resource::Dsp => 3,
            Resource::Uram => 4,
        }
    }
}

/// A dense per-resource quantity: vertex area, inbound-FIFO area, slot
/// capacity, and accumulated slot usage are all expressed in this type.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AreaVector([f64; RESOURCE_TYPES.len()]);

impl AreaVector {
    pub fn zero() -> Self {
        Self([0.0; RESOURCE_TYPES.len()])
    }

    /// Build a vector from `(resource, amount)` pairs; resources not listed are zero.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (Resource, f64)>) -> Self {
        let mut v = Self::zero();
        for (r, amount) in pairs {
            v.set(r, amount);
        }
        v
    }

    pub fn get(&self, r: Resource) -> f64 {
        self.0[r.index()]
    }

    pub fn set(&mut self, r: Resource, amount: f64) {
        self.0[r.index()] = amount;
    }

    /// Scale every resource by `ratio`, used to compute `capacity * area_cap`.
    pub fn scaled(&self, ratio: f64) -> Self {
        let mut out = *self;
        for x in out.0.iter_mut() {
            *x *= ratio;
        }
        out
    }
}

impl Add for AreaVector {
    type Output = AreaVector;
    fn add(self, rhs: AreaVector) -> AreaVector {
        let mut out = self;
        for (a, b) in out.0.iter_mut().zip(rhs.0.iter()) {
            *a += b;
        }
        out
    }
}

impl AddAssign for AreaVector {
    fn add_assign(&mut self, rhs: AreaVector) {
        *self = *self + rhs;
    }
}

impl Mul<f64> for AreaVector {
    type Output = AreaVector;
    fn mul(self, rhs: f64) -> AreaVector {
        self.scaled(rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_area_sums_componentwise() {
        let a = AreaVector::from_pairs([(Resource::Lut, 10.0), (Resource::Dsp, 2.0)]);
        let b = AreaVector::from_pairs([(Resource::Lut, 5.0), (Resource::Bram, 1.0)]);
        let sum = a + b;
        assert_eq!(sum.get(Resource::Lut), 15.0);
        assert_eq!(sum.get(Resource::Dsp), 2.0);
        assert_eq!(sum.get(Resource::Bram), 1.0);
        assert_eq!(sum.get(Resource::Ff), 0.0);
    }

    #[test]
    fn scaled_applies_ratio_to_every_resource() {
        let a = AreaVector::from_pairs([(Resource::Lut, 100.0), (Resource::Ff, 200.0)]);
        let scaled = a.scaled(0.85);
        assert_eq!(scaled.get(Resource::Lut), 85.0);
        assert_eq!(scaled.get(Resource::Ff), 170.0);
    }
}
