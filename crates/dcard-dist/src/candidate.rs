//! Candidate features and the lazy gradient each one carries.
//!
//! A decomposer emits one [`Candidate`] per sub-feature it considered.
//! The distance is evaluated eagerly; the gradient is only produced for
//! the winner, after the selector has established that the winner is
//! unique, so a zero-distance loser never trips a guard.

use crate::config::Tolerances;
use crate::coord::Coord;
use crate::error::{DistanceError, Result};
use crate::point_segment::{PointSegment, Projection};

/// How a candidate's gradient is produced and where it lands in the
/// caller's flat layout.
#[derive(Clone, Copy, Debug)]
pub(crate) enum Probe<V> {
    /// Point-segment evaluation. `slots` are the layout slots of
    /// (query point, segment start, segment end).
    Segment {
        query: PointSegment<V>,
        projection: Projection,
        slots: [usize; 3],
    },
    /// Orthogonal projection onto a triangle's interior. `direction` is
    /// the unit normal on the query point's side, `weights` the
    /// barycentric coordinates of the foot point. `slots` are the layout
    /// slots of (query point, a, b, c).
    Face {
        direction: V,
        weights: [f64; 3],
        slots: [usize; 4],
    },
}

#[derive(Clone, Copy, Debug)]
pub struct Candidate<F, V> {
    pub feature: F,
    pub distance: f64,
    pub(crate) probe: Probe<V>,
}

impl<F: Copy, V: Coord> Candidate<F, V> {
    pub(crate) fn segment(
        feature: F,
        query: PointSegment<V>,
        projection: Projection,
        slots: [usize; 3],
    ) -> Self {
        Self {
            feature,
            distance: projection.distance,
            probe: Probe::Segment { query, projection, slots },
        }
    }

    pub(crate) fn face(
        feature: F,
        distance: f64,
        direction: V,
        weights: [f64; 3],
        slots: [usize; 4],
    ) -> Self {
        Self {
            feature,
            distance,
            probe: Probe::Face { direction, weights, slots },
        }
    }

    /// Projection parameter of a segment candidate.
    pub fn parameter(&self) -> Option<f64> {
        match self.probe {
            Probe::Segment { projection, .. } => Some(projection.t),
            Probe::Face { .. } => None,
        }
    }

    /// Run this candidate's guards and return its gradient zero-extended
    /// to a layout of `len` coordinates.
    pub fn gradient(&self, tol: &Tolerances, len: usize) -> Result<Vec<f64>> {
        let mut out = vec![0.0; len];
        match &self.probe {
            Probe::Segment { query, projection, slots } => {
                let g = query.gradient_at(projection, tol)?;
                g.point.scatter(&mut out, slots[0]);
                g.start.scatter(&mut out, slots[1]);
                g.end.scatter(&mut out, slots[2]);
            }
            Probe::Face { direction, weights, slots } => {
                if !(self.distance > tol.min_distance) {
                    return Err(DistanceError::SingularDistance { distance: self.distance });
                }
                if let Some(&w) = weights.iter().find(|&&w| !(w > tol.branch_margin)) {
                    return Err(DistanceError::BranchBoundary { parameter: w });
                }
                direction.scatter(&mut out, slots[0]);
                for (w, slot) in weights.iter().zip(&slots[1..]) {
                    (-*direction * *w).scatter(&mut out, *slot);
                }
            }
        }
        Ok(out)
    }
}
