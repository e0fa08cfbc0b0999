//! Exact geometric predicates using adaptive-precision arithmetic.
//!
//! Topological decisions (which side of a line or plane, whether two
//! segments cross) must not flip under rounding, so they go through the `robust`
//! crate (Shewchuk's algorithm) rather than a plain cross product.

use crate::{Vec2, Vec3};

/// Orientation sign
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sign {
    Negative,
    Zero,
    Positive,
}

impl Sign {
    pub fn from_f64(v: f64) -> Self {
        if v > 0.0 {
            Sign::Positive
        } else if v < 0.0 {
            Sign::Negative
        } else {
            Sign::Zero
        }
    }

    /// Strictly opposite, non-zero signs.
    pub fn opposes(self, other: Sign) -> bool {
        matches!(
            (self, other),
            (Sign::Positive, Sign::Negative) | (Sign::Negative, Sign::Positive)
        )
    }
}

fn c2(p: &Vec2<f64>) -> robust::Coord<f64> {
    robust::Coord { x: p.x, y: p.y }
}
fn c3(p: &Vec3<f64>) -> robust::Coord3D<f64> {
    robust::Coord3D {
        x: p.x,
        y: p.y,
        z: p.z,
    }
}

/// Orientation of point `c` relative to directed line `a → b`.
/// Positive = left (CCW), Negative = right (CW), Zero = collinear.
pub fn orient2d(a: &Vec2<f64>, b: &Vec2<f64>, c: &Vec2<f64>) -> Sign {
    Sign::from_f64(robust::orient2d(c2(a), c2(b), c2(c)))
}

/// Orientation of point `d` relative to plane through `a, b, c`.
pub fn orient3d(a: &Vec3<f64>, b: &Vec3<f64>, c: &Vec3<f64>, d: &Vec3<f64>) -> Sign {
    Sign::from_f64(robust::orient3d(c3(a), c3(b), c3(c), c3(d)))
}

/// Do segments `[p0, p1]` and `[q0, q1]` cross at a single interior point?
///
/// Touching at an endpoint or overlapping collinearly is *not* a strict
/// crossing: every orientation involved must be non-zero.
pub fn segments_cross_strictly(
    p0: &Vec2<f64>,
    p1: &Vec2<f64>,
    q0: &Vec2<f64>,
    q1: &Vec2<f64>,
) -> bool {
    orient2d(p0, p1, q0).opposes(orient2d(p0, p1, q1))
        && orient2d(q0, q1, p0).opposes(orient2d(q0, q1, p1))
}
