use parking_lot::Mutex;

use super::Point;
use crate::params::SchemeParams;

/// A point that can be updated in place by several concurrent writers.
///
/// Prefer giving each task its own [`Point`] and combining the results in a single owner;
/// this type is for the cases where a single running value is genuinely shared.
#[derive(Debug)]
pub struct SharedPoint<P: SchemeParams>(Mutex<Point<P>>);

impl<P: SchemeParams> SharedPoint<P> {
    /// Wraps the given point.
    pub fn new(point: Point<P>) -> Self {
        Self(Mutex::new(point))
    }

    /// Creates a shared accumulator starting at the group identity.
    pub fn identity() -> Self {
        Self::new(Point::identity())
    }

    /// Atomically replaces the value with `value + other`.
    pub fn add_assign(&self, other: &Point<P>) {
        let mut guard = self.0.lock();
        *guard += other;
    }

    /// Atomically replaces the value with `value - other`.
    pub fn sub_assign(&self, other: &Point<P>) {
        let mut guard = self.0.lock();
        *guard -= other;
    }

    /// Replaces the stored point.
    pub fn set(&self, value: Point<P>) {
        *self.0.lock() = value;
    }

    /// Returns a snapshot of the current value.
    pub fn get(&self) -> Point<P> {
        *self.0.lock()
    }

    /// Consumes the wrapper and returns the stored point.
    pub fn into_inner(self) -> Point<P> {
        self.0.into_inner()
    }
}

impl<P: SchemeParams> Default for SharedPoint<P> {
    fn default() -> Self {
        Self::identity()
    }
}

#[cfg(test)]
mod tests {
    use rayon::prelude::*;

    use super::SharedPoint;
    use crate::{
        curve::{Point, Scalar},
        dev::TestParams,
    };

    #[test]
    fn concurrent_accumulation() {
        let shared = SharedPoint::<TestParams>::identity();
        let g = Point::generator();

        (0..200).into_par_iter().for_each(|_| shared.add_assign(&g));

        assert_eq!(shared.into_inner(), Scalar::from(200u64).mul_by_generator());
    }

    #[test]
    fn set_and_subtract() {
        let shared = SharedPoint::<TestParams>::default();
        shared.set(Scalar::from(10).mul_by_generator());
        shared.sub_assign(&Scalar::from(3).mul_by_generator());
        assert_eq!(shared.get(), Scalar::from(7).mul_by_generator());
    }
}
