use core::fmt;
use core::ops::{Add, Mul, Neg, Sub};

/// Trait for scalar types the vector kernel is generic over.
///
/// The distance engine evaluates in f64 only; the kernel types stay
/// generic so the vector algebra reads the same for any float.
pub trait Scalar:
    Copy
    + fmt::Debug
    + PartialEq
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Neg<Output = Self>
    + Send
    + Sync
    + 'static
{
    const ZERO: Self;

    fn sqrt(self) -> Self;
}

impl Scalar for f64 {
    const ZERO: Self = 0.0;

    #[inline]
    fn sqrt(self) -> Self {
        f64::sqrt(self)
    }
}
