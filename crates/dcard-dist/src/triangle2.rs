//! Distance from a point to the boundary of a 2D triangle.
//!
//! There is no interior branch: a point inside the triangle is measured to
//! its nearest edge like any other.

use dcard_math::Vec2;

use crate::candidate::Candidate;
use crate::config::Tolerances;
use crate::coord::{self, Coord};
use crate::error::{DistanceError, InputFault, Primitive, Result};
use crate::select::{min_distance, select};
use crate::triangle::{edge_candidates, TriangleFeature};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Triangle2Boundary {
    pub point: Vec2<f64>,
    pub a: Vec2<f64>,
    pub b: Vec2<f64>,
    pub c: Vec2<f64>,
}

impl Triangle2Boundary {
    /// Points in the flat layout `[p, a, b, c]`.
    pub const POINTS: usize = 4;
    pub const LEN: usize = 8;

    pub fn new(point: Vec2<f64>, a: Vec2<f64>, b: Vec2<f64>, c: Vec2<f64>) -> Self {
        Self { point, a, b, c }
    }

    pub fn from_flat(x: &[f64]) -> Result<Self> {
        coord::validate::<Vec2<f64>>(x, Self::POINTS)?;
        Ok(Self::new(Coord::at(x, 0), Coord::at(x, 1), Coord::at(x, 2), Coord::at(x, 3)))
    }

    /// Squared doubled signed area.
    pub fn area_norm_sq(&self) -> f64 {
        let twice = (self.b - self.a).cross(self.c - self.a);
        twice * twice
    }

    pub fn candidates(
        &self,
        tol: &Tolerances,
    ) -> Result<Vec<Candidate<TriangleFeature, Vec2<f64>>>> {
        let area = self.area_norm_sq();
        if !area.is_finite() {
            return Err(InputFault::Overflow.into());
        }
        if area <= tol.min_area_norm_sq {
            return Err(DistanceError::DegenerateGeometry(Primitive::Triangle));
        }
        edge_candidates(self.point, [self.a, self.b, self.c], tol)
    }

    pub fn distance(&self, tol: &Tolerances) -> Result<f64> {
        let cs = self.candidates(tol)?;
        min_distance(&cs).ok_or(DistanceError::NonUniqueBranch { ties: 0 })
    }

    /// The unique nearest feature, or why there is none.
    pub fn nearest_feature(&self, tol: &Tolerances) -> Result<TriangleFeature> {
        let cs = self.candidates(tol)?;
        Ok(select(&cs, tol)?.feature)
    }

    /// Gradient in the layout `[p, a, b, c]`.
    pub fn gradient(&self, tol: &Tolerances) -> Result<Vec<f64>> {
        let cs = self.candidates(tol)?;
        select(&cs, tol)?.gradient(tol, Self::LEN)
    }
}
