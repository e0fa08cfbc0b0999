//! Dimension-generic view of the kernel vectors.
//!
//! The point-segment primitive is written once against [`Coord`] and used
//! with both `Vec2<f64>` and `Vec3<f64>`. The trait also owns how a point
//! is read from and written to a flat coordinate vector.

use core::fmt::Debug;
use core::ops::{Add, Mul, Neg, Sub};
use dcard_math::{Vec2, Vec3};

use crate::error::{InputFault, Result};

pub trait Coord:
    Copy
    + Debug
    + PartialEq
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<f64, Output = Self>
    + Neg<Output = Self>
    + Send
    + Sync
{
    /// Number of scalars per point.
    const DIM: usize;

    fn zero() -> Self;
    fn dot(self, rhs: Self) -> f64;
    /// Squared norm of the cross product, `|self × rhs|²`.
    fn cross_norm_sq(self, rhs: Self) -> f64;
    fn read(src: &[f64]) -> Self;
    fn write(self, dst: &mut [f64]);

    #[inline]
    fn norm_sq(self) -> f64 {
        self.dot(self)
    }

    #[inline]
    fn norm(self) -> f64 {
        self.norm_sq().sqrt()
    }

    /// Point number `slot` of a flat layout.
    #[inline]
    fn at(src: &[f64], slot: usize) -> Self {
        Self::read(&src[slot * Self::DIM..])
    }

    /// Add `self` into point number `slot` of a flat layout.
    #[inline]
    fn scatter(self, dst: &mut [f64], slot: usize) {
        let mut tmp = [0.0; 3];
        self.write(&mut tmp);
        for (d, s) in dst[slot * Self::DIM..(slot + 1) * Self::DIM].iter_mut().zip(tmp) {
            *d += s;
        }
    }
}

impl Coord for Vec2<f64> {
    const DIM: usize = 2;

    #[inline]
    fn zero() -> Self {
        Vec2::zero()
    }
    #[inline]
    fn dot(self, rhs: Self) -> f64 {
        Vec2::dot(self, rhs)
    }
    #[inline]
    fn cross_norm_sq(self, rhs: Self) -> f64 {
        let c = self.cross(rhs);
        c * c
    }
    #[inline]
    fn read(src: &[f64]) -> Self {
        Vec2::from_slice(src)
    }
    #[inline]
    fn write(self, dst: &mut [f64]) {
        self.write_to(dst)
    }
}

impl Coord for Vec3<f64> {
    const DIM: usize = 3;

    #[inline]
    fn zero() -> Self {
        Vec3::zero()
    }
    #[inline]
    fn dot(self, rhs: Self) -> f64 {
        Vec3::dot(self, rhs)
    }
    #[inline]
    fn cross_norm_sq(self, rhs: Self) -> f64 {
        self.cross(rhs).norm_sq()
    }
    #[inline]
    fn read(src: &[f64]) -> Self {
        Vec3::from_slice(src)
    }
    #[inline]
    fn write(self, dst: &mut [f64]) {
        self.write_to(dst)
    }
}

/// Validate a flat input against a layout of `points` points of type `V`.
pub fn validate<V: Coord>(x: &[f64], points: usize) -> Result<()> {
    let expected = points * V::DIM;
    if x.len() != expected {
        return Err(InputFault::Length { expected, got: x.len() }.into());
    }
    match x.iter().position(|c| !c.is_finite()) {
        Some(index) => Err(InputFault::NonFinite { index }.into()),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DistanceError;

    #[test]
    fn scatter_accumulates_into_slot() {
        let mut g = [0.0; 6];
        Vec2::new(1.0, 2.0).scatter(&mut g, 1);
        Vec2::new(0.5, 0.5).scatter(&mut g, 1);
        assert_eq!(g, [0.0, 0.0, 1.5, 2.5, 0.0, 0.0]);
    }

    #[test]
    fn at_reads_slot() {
        let x = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(<Vec3<f64> as Coord>::at(&x, 1), Vec3::new(3.0, 4.0, 5.0));
    }

    #[test]
    fn cross_norm_sq_agrees_across_dimensions() {
        let a = Vec2::new(1.0, 2.0);
        let b = Vec2::new(-3.0, 0.5);
        let a3 = Vec3::new(1.0, 2.0, 0.0);
        let b3 = Vec3::new(-3.0, 0.5, 0.0);
        assert!((a.cross_norm_sq(b) - a3.cross_norm_sq(b3)).abs() < 1e-12);
    }

    #[test]
    fn validate_reports_faults() {
        assert_eq!(
            validate::<Vec2<f64>>(&[0.0; 5], 3),
            Err(DistanceError::InvalidInput(InputFault::Length { expected: 6, got: 5 }))
        );
        let x = [0.0, 0.0, f64::INFINITY, 0.0, 1.0, 1.0];
        assert_eq!(
            validate::<Vec2<f64>>(&x, 3),
            Err(DistanceError::InvalidInput(InputFault::NonFinite { index: 2 }))
        );
        assert!(validate::<Vec2<f64>>(&[0.0; 6], 3).is_ok());
    }
}
