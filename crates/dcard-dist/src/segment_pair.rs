//! Distance between two 2D segments `[p0, p1]` and `[q0, q1]`.
//!
//! Non-crossing segments attain their distance at an endpoint of one of
//! them, so four point-segment candidates cover every case. Strictly
//! crossing segments are detected first with exact orientation tests:
//! their distance is 0 and no gradient exists.

use dcard_math::predicates::segments_cross_strictly;
use dcard_math::Vec2;

use crate::candidate::Candidate;
use crate::config::Tolerances;
use crate::coord::{self, Coord};
use crate::error::{DistanceError, Primitive, Result};
use crate::point_segment::{PointSegment, SegmentFeature};
use crate::select::{min_distance, select};

/// Nearest feature on each of the two segments.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PairFeature {
    pub first: SegmentFeature,
    pub second: SegmentFeature,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SegmentPair {
    pub p0: Vec2<f64>,
    pub p1: Vec2<f64>,
    pub q0: Vec2<f64>,
    pub q1: Vec2<f64>,
}

impl SegmentPair {
    /// Points in the flat layout `[p0, p1, q0, q1]`.
    pub const POINTS: usize = 4;
    pub const LEN: usize = 8;

    pub fn new(p0: Vec2<f64>, p1: Vec2<f64>, q0: Vec2<f64>, q1: Vec2<f64>) -> Self {
        Self { p0, p1, q0, q1 }
    }

    pub fn from_flat(x: &[f64]) -> Result<Self> {
        coord::validate::<Vec2<f64>>(x, Self::POINTS)?;
        Ok(Self::new(Coord::at(x, 0), Coord::at(x, 1), Coord::at(x, 2), Coord::at(x, 3)))
    }

    fn check(&self, tol: &Tolerances) -> Result<()> {
        for (s, e) in [(self.p0, self.p1), (self.q0, self.q1)] {
            if (e - s).norm_sq() <= tol.min_segment_norm_sq {
                return Err(DistanceError::DegenerateGeometry(Primitive::Segment));
            }
        }
        Ok(())
    }

    pub fn crosses(&self) -> bool {
        segments_cross_strictly(&self.p0, &self.p1, &self.q0, &self.q1)
    }

    /// Endpoint-versus-segment candidates: p0, p1 against q, then q0, q1
    /// against p.
    pub fn candidates(&self, tol: &Tolerances) -> Result<Vec<Candidate<PairFeature, Vec2<f64>>>> {
        self.check(tol)?;
        let probes = [
            (self.p0, self.q0, self.q1, [0, 2, 3], SegmentFeature::Start, true),
            (self.p1, self.q0, self.q1, [1, 2, 3], SegmentFeature::End, true),
            (self.q0, self.p0, self.p1, [2, 0, 1], SegmentFeature::Start, false),
            (self.q1, self.p0, self.p1, [3, 0, 1], SegmentFeature::End, false),
        ];
        probes
            .into_iter()
            .map(|(point, start, end, slots, endpoint, on_first)| {
                let query = PointSegment::new(point, start, end);
                let projection = query.project(tol)?;
                let feature = if on_first {
                    PairFeature { first: endpoint, second: projection.feature }
                } else {
                    PairFeature { first: projection.feature, second: endpoint }
                };
                Ok(Candidate::segment(feature, query, projection, slots))
            })
            .collect()
    }

    pub fn distance(&self, tol: &Tolerances) -> Result<f64> {
        self.check(tol)?;
        if self.crosses() {
            return Ok(0.0);
        }
        let cs = self.candidates(tol)?;
        min_distance(&cs).ok_or(DistanceError::NonUniqueBranch { ties: 0 })
    }

    pub fn nearest_feature(&self, tol: &Tolerances) -> Result<PairFeature> {
        self.check(tol)?;
        if self.crosses() {
            return Err(DistanceError::NonUniqueBranch { ties: 2 });
        }
        let cs = self.candidates(tol)?;
        Ok(select(&cs, tol)?.feature)
    }

    /// Gradient in the layout `[p0, p1, q0, q1]`.
    pub fn gradient(&self, tol: &Tolerances) -> Result<Vec<f64>> {
        self.check(tol)?;
        if self.crosses() {
            // Both interiors meet; the subgradient is a whole cone.
            return Err(DistanceError::NonUniqueBranch { ties: 2 });
        }
        let cs = self.candidates(tol)?;
        select(&cs, tol)?.gradient(tol, Self::LEN)
    }
}
