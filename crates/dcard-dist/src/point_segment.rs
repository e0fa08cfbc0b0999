//! Point-segment distance: the atomic building block of every card.
//!
//! The distance is piecewise: nearest to `start` when the projection
//! parameter `t ≤ 0`, nearest to `end` when `t ≥ 1`, and to the interior
//! otherwise. [`PointSegment::project`] classifies the branch and
//! evaluates the distance; [`PointSegment::gradient_at`] differentiates
//! the branch it was given, after the guards have passed.

use crate::config::Tolerances;
use crate::coord::Coord;
use crate::error::{DistanceError, InputFault, Primitive, Result};

/// Which piece of a segment is nearest to the query point.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SegmentFeature {
    Start,
    Interior,
    End,
}

/// Branch classification of one point-segment evaluation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projection {
    /// Projection parameter along `start → end`, unclamped.
    pub t: f64,
    pub feature: SegmentFeature,
    pub distance: f64,
}

impl Projection {
    /// Is `t` within `margin` of the 0 or 1 branch boundary? A NaN `t`
    /// counts as near.
    #[inline]
    pub fn near_boundary(&self, margin: f64) -> bool {
        !(self.t.abs() > margin && (self.t - 1.0).abs() > margin)
    }
}

/// Gradient of the distance with respect to each of the three points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SegmentGradient<V> {
    pub point: V,
    pub start: V,
    pub end: V,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointSegment<V> {
    pub point: V,
    pub start: V,
    pub end: V,
}

impl<V: Coord> PointSegment<V> {
    #[inline]
    pub fn new(point: V, start: V, end: V) -> Self {
        Self { point, start, end }
    }

    /// Classify the nearest branch and evaluate its distance.
    ///
    /// Fails when the segment is shorter than the degeneracy threshold or
    /// when the coordinates are too large to evaluate in f64; zero
    /// distance is a valid result here.
    pub fn project(&self, tol: &Tolerances) -> Result<Projection> {
        let d = self.end - self.start;
        let v = d.norm_sq();
        if !v.is_finite() {
            return Err(InputFault::Overflow.into());
        }
        if v <= tol.min_segment_norm_sq {
            return Err(DistanceError::DegenerateGeometry(Primitive::Segment));
        }
        let w = self.point - self.start;
        let t = w.dot(d) / v;

        let (feature, distance) = if t <= 0.0 {
            (SegmentFeature::Start, w.norm())
        } else if t >= 1.0 {
            (SegmentFeature::End, (self.point - self.end).norm())
        } else {
            (SegmentFeature::Interior, d.cross_norm_sq(w).sqrt() / v.sqrt())
        };
        if !(t.is_finite() && distance.is_finite()) {
            return Err(InputFault::Overflow.into());
        }
        Ok(Projection { t, feature, distance })
    }

    pub fn distance(&self, tol: &Tolerances) -> Result<f64> {
        Ok(self.project(tol)?.distance)
    }

    pub fn gradient(&self, tol: &Tolerances) -> Result<SegmentGradient<V>> {
        let projection = self.project(tol)?;
        self.gradient_at(&projection, tol)
    }

    /// Differentiate the branch recorded in `projection`.
    ///
    /// `projection` must come from [`project`](Self::project) on `self`.
    pub fn gradient_at(
        &self,
        projection: &Projection,
        tol: &Tolerances,
    ) -> Result<SegmentGradient<V>> {
        let dist = projection.distance;
        // Negated comparisons so a NaN fails closed.
        if !(dist > tol.min_distance) {
            return Err(DistanceError::SingularDistance { distance: dist });
        }
        if projection.near_boundary(tol.branch_margin) {
            return Err(DistanceError::BranchBoundary { parameter: projection.t });
        }

        let grad = match projection.feature {
            SegmentFeature::Start => {
                let u = (self.point - self.start) * (1.0 / dist);
                SegmentGradient { point: u, start: -u, end: V::zero() }
            }
            SegmentFeature::End => {
                let u = (self.point - self.end) * (1.0 / dist);
                SegmentGradient { point: u, start: V::zero(), end: -u }
            }
            SegmentFeature::Interior => {
                // d² = N²/V with N² = |d × w|², V = |d|²; ∇d = ∇(N²/V) / 2d.
                let w = self.point - self.start;
                let d = self.end - self.start;
                let v = d.norm_sq();
                let dw = d.dot(w);
                let n_sq = d.cross_norm_sq(w);
                let scale = 1.0 / (v * dist);

                let g_w = (w * v - d * dw) * scale;
                let g_d = (d * w.norm_sq() - w * dw) * scale - d * (n_sq / (v * v * dist));
                SegmentGradient { point: g_w, start: -(g_w + g_d), end: g_d }
            }
        };
        Ok(grad)
    }
}
