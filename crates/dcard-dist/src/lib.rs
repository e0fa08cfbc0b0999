//! dcard-dist — piecewise nearest-feature distance cards
//!
//! Distances from points to segments and triangles, and between segments,
//! with hand-derived gradients. Each compound primitive is decomposed into
//! sub-features (endpoints, edge interiors, face interior); every feature
//! yields a candidate distance, the nearest one is selected, and its
//! gradient is returned only when it is mathematically well defined.
//!
//! ```
//! use dcard_dist::{Card, SegmentSegmentCard};
//!
//! let card = SegmentSegmentCard::default();
//! let x = [0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 1.0, 1.0];
//! assert_eq!(card.value(&x), Ok(1.0));
//! assert!(card.grad(&x).is_err()); // every endpoint pair ties
//! ```
//!
//! Evaluation is pure: no caching, no shared state, every call reads only
//! its arguments.

pub mod candidate;
pub mod cards;
pub mod config;
pub mod coord;
pub mod error;
pub mod point_segment;
pub mod sampler;
pub mod segment_pair;
pub mod select;
pub mod triangle;
pub mod triangle2;
pub mod triangle3;

pub use candidate::Candidate;
pub use cards::{
    catalog, Card, PointSegmentCard, PointTriangle2Card, PointTriangle3Card, SegmentSegmentCard,
};
pub use config::Tolerances;
pub use coord::Coord;
pub use error::{DistanceError, InputFault, Primitive, Result};
pub use point_segment::{PointSegment, Projection, SegmentFeature, SegmentGradient};
pub use sampler::{Lcg, SampleError};
pub use segment_pair::{PairFeature, SegmentPair};
pub use select::{select, Selection};
pub use triangle::{Corner, Edge, TriangleFeature};
pub use triangle2::Triangle2Boundary;
pub use triangle3::Triangle3;

pub use dcard_math::{Vec2, Vec3};
