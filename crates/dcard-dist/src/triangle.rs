//! Triangle feature tags and the edge decomposition shared by the 2D and
//! 3D point-triangle cards.
//!
//! Layout for both cards: slot 0 is the query point, slots 1..=3 are the
//! corners a, b, c.

use crate::candidate::Candidate;
use crate::config::Tolerances;
use crate::coord::Coord;
use crate::error::Result;
use crate::point_segment::{PointSegment, SegmentFeature};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Corner {
    A,
    B,
    C,
}

impl Corner {
    /// Layout slot of this corner.
    pub fn slot(self) -> usize {
        match self {
            Corner::A => 1,
            Corner::B => 2,
            Corner::C => 3,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Edge {
    AB,
    BC,
    CA,
}

impl Edge {
    pub const ALL: [Edge; 3] = [Edge::AB, Edge::BC, Edge::CA];

    /// (start, end) corners in traversal order.
    pub fn corners(self) -> (Corner, Corner) {
        match self {
            Edge::AB => (Corner::A, Corner::B),
            Edge::BC => (Corner::B, Corner::C),
            Edge::CA => (Corner::C, Corner::A),
        }
    }
}

/// Sub-feature of a triangle nearest to the query point.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TriangleFeature {
    Vertex(Corner),
    Edge(Edge),
    Face,
}

impl TriangleFeature {
    /// The triangle feature a point-segment branch on `edge` realises.
    pub fn on_edge(edge: Edge, branch: SegmentFeature) -> Self {
        let (start, end) = edge.corners();
        match branch {
            SegmentFeature::Start => TriangleFeature::Vertex(start),
            SegmentFeature::Interior => TriangleFeature::Edge(edge),
            SegmentFeature::End => TriangleFeature::Vertex(end),
        }
    }
}

/// One point-segment candidate per edge, in the order ab, bc, ca.
pub(crate) fn edge_candidates<V: Coord>(
    point: V,
    corners: [V; 3],
    tol: &Tolerances,
) -> Result<Vec<Candidate<TriangleFeature, V>>> {
    let corner = |c: Corner| corners[c.slot() - 1];
    Edge::ALL
        .iter()
        .map(|&edge| {
            let (s, e) = edge.corners();
            let query = PointSegment::new(point, corner(s), corner(e));
            let projection = query.project(tol)?;
            Ok(Candidate::segment(
                TriangleFeature::on_edge(edge, projection.feature),
                query,
                projection,
                [0, s.slot(), e.slot()],
            ))
        })
        .collect()
}
