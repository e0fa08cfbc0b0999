//! Flat-vector cards over the typed shapes.
//!
//! A card is what the verification harness sees: a name, an input
//! dimension, `value`/`grad` over `&[f64]`, and a seeded domain sampler.

use core::marker::PhantomData;

use dcard_math::{Vec2, Vec3};

use crate::config::Tolerances;
use crate::coord::{self, Coord};
use crate::error::{DistanceError, Result};
use crate::point_segment::PointSegment;
use crate::sampler::{sample_with, Lcg, SampleError};
use crate::segment_pair::SegmentPair;
use crate::triangle2::Triangle2Boundary;
use crate::triangle3::Triangle3;

/// Half-width of the box query points are drawn from.
const QUERY_BOX: f64 = 1.5;
/// Half-width of the box primitive vertices are drawn from.
const SHAPE_BOX: f64 = 1.0;
/// Half-width of one nudge step.
const NUDGE: f64 = 0.25;

pub trait Card: Send + Sync {
    fn name(&self) -> &'static str;

    /// Length of the flat input vector.
    fn dim(&self) -> usize;

    fn tolerances(&self) -> &Tolerances;

    fn value(&self, x: &[f64]) -> Result<f64>;

    /// Gradient with the same layout as `x`.
    fn grad(&self, x: &[f64]) -> Result<Vec<f64>>;

    fn hessian(&self, _x: &[f64]) -> Result<Vec<f64>> {
        Err(DistanceError::UnsupportedOperation("hessian"))
    }

    fn hvp(&self, _x: &[f64], _v: &[f64]) -> Result<Vec<f64>> {
        Err(DistanceError::UnsupportedOperation("hessian-vector product"))
    }

    /// `count` inputs at which `grad` is safe to check numerically.
    fn sample(&self, seed: u32, count: usize) -> std::result::Result<Vec<Vec<f64>>, SampleError>;
}

/// Flat vector of `points` points, vertices in the shape box and the
/// query point (slot 0) in the wider query box.
fn fresh_points<V: Coord>(rng: &mut Lcg, points: usize) -> Vec<f64> {
    let mut x = vec![0.0; points * V::DIM];
    rng.point::<V>(-QUERY_BOX, QUERY_BOX).scatter(&mut x, 0);
    for slot in 1..points {
        rng.point::<V>(-SHAPE_BOX, SHAPE_BOX).scatter(&mut x, slot);
    }
    x
}

fn nudge_slots<V: Coord>(rng: &mut Lcg, x: &mut [f64], slots: &[usize]) {
    let step: V = rng.point(-NUDGE, NUDGE);
    for &slot in slots {
        step.scatter(x, slot);
    }
}

/// Point to segment, layout `[p, a, b]`, in 2D or 3D.
#[derive(Clone, Debug)]
pub struct PointSegmentCard<V> {
    tol: Tolerances,
    _dim: PhantomData<V>,
}

impl<V: Coord> Default for PointSegmentCard<V> {
    fn default() -> Self {
        Self::new(Tolerances::default())
    }
}

impl<V: Coord> PointSegmentCard<V> {
    pub fn new(tol: Tolerances) -> Self {
        Self { tol, _dim: PhantomData }
    }

    fn shape(x: &[f64]) -> Result<PointSegment<V>> {
        coord::validate::<V>(x, 3)?;
        Ok(PointSegment::new(V::at(x, 0), V::at(x, 1), V::at(x, 2)))
    }
}

impl<V: Coord> Card for PointSegmentCard<V> {
    fn name(&self) -> &'static str {
        if V::DIM == 2 {
            "point_segment_2d"
        } else {
            "point_segment_3d"
        }
    }

    fn dim(&self) -> usize {
        3 * V::DIM
    }

    fn tolerances(&self) -> &Tolerances {
        &self.tol
    }

    fn value(&self, x: &[f64]) -> Result<f64> {
        Self::shape(x)?.distance(&self.tol)
    }

    fn grad(&self, x: &[f64]) -> Result<Vec<f64>> {
        let g = Self::shape(x)?.gradient(&self.tol)?;
        let mut out = vec![0.0; self.dim()];
        g.point.scatter(&mut out, 0);
        g.start.scatter(&mut out, 1);
        g.end.scatter(&mut out, 2);
        Ok(out)
    }

    fn sample(&self, seed: u32, count: usize) -> std::result::Result<Vec<Vec<f64>>, SampleError> {
        let screen = Self::new(Tolerances::sampling().strictest(&self.tol));
        sample_with(
            self.name(),
            seed,
            count,
            |rng| fresh_points::<V>(rng, 3),
            |rng, x| nudge_slots::<V>(rng, x, &[0]),
            |x| screen.grad(x).map(drop),
        )
    }
}

/// Point to the boundary of a 2D triangle, layout `[p, a, b, c]`.
#[derive(Clone, Debug, Default)]
pub struct PointTriangle2Card {
    tol: Tolerances,
}

impl PointTriangle2Card {
    pub fn new(tol: Tolerances) -> Self {
        Self { tol }
    }
}

impl Card for PointTriangle2Card {
    fn name(&self) -> &'static str {
        "point_triangle_2d"
    }

    fn dim(&self) -> usize {
        Triangle2Boundary::LEN
    }

    fn tolerances(&self) -> &Tolerances {
        &self.tol
    }

    fn value(&self, x: &[f64]) -> Result<f64> {
        Triangle2Boundary::from_flat(x)?.distance(&self.tol)
    }

    fn grad(&self, x: &[f64]) -> Result<Vec<f64>> {
        Triangle2Boundary::from_flat(x)?.gradient(&self.tol)
    }

    fn sample(&self, seed: u32, count: usize) -> std::result::Result<Vec<Vec<f64>>, SampleError> {
        let screen = Self::new(Tolerances::sampling().strictest(&self.tol));
        sample_with(
            self.name(),
            seed,
            count,
            |rng| fresh_points::<Vec2<f64>>(rng, Triangle2Boundary::POINTS),
            |rng, x| nudge_slots::<Vec2<f64>>(rng, x, &[0]),
            |x| screen.grad(x).map(drop),
        )
    }
}

/// Point to a solid 3D triangle, layout `[p, a, b, c]`.
#[derive(Clone, Debug, Default)]
pub struct PointTriangle3Card {
    tol: Tolerances,
}

impl PointTriangle3Card {
    pub fn new(tol: Tolerances) -> Self {
        Self { tol }
    }
}

impl Card for PointTriangle3Card {
    fn name(&self) -> &'static str {
        "point_triangle_3d"
    }

    fn dim(&self) -> usize {
        Triangle3::LEN
    }

    fn tolerances(&self) -> &Tolerances {
        &self.tol
    }

    fn value(&self, x: &[f64]) -> Result<f64> {
        Triangle3::from_flat(x)?.distance(&self.tol)
    }

    fn grad(&self, x: &[f64]) -> Result<Vec<f64>> {
        Triangle3::from_flat(x)?.gradient(&self.tol)
    }

    fn sample(&self, seed: u32, count: usize) -> std::result::Result<Vec<Vec<f64>>, SampleError> {
        let screen = Self::new(Tolerances::sampling().strictest(&self.tol));
        sample_with(
            self.name(),
            seed,
            count,
            |rng| fresh_points::<Vec3<f64>>(rng, Triangle3::POINTS),
            |rng, x| nudge_slots::<Vec3<f64>>(rng, x, &[0]),
            |x| screen.grad(x).map(drop),
        )
    }
}

/// Segment to segment in 2D, layout `[p0, p1, q0, q1]`.
#[derive(Clone, Debug, Default)]
pub struct SegmentSegmentCard {
    tol: Tolerances,
}

impl SegmentSegmentCard {
    pub fn new(tol: Tolerances) -> Self {
        Self { tol }
    }
}

impl Card for SegmentSegmentCard {
    fn name(&self) -> &'static str {
        "segment_segment_2d"
    }

    fn dim(&self) -> usize {
        SegmentPair::LEN
    }

    fn tolerances(&self) -> &Tolerances {
        &self.tol
    }

    fn value(&self, x: &[f64]) -> Result<f64> {
        SegmentPair::from_flat(x)?.distance(&self.tol)
    }

    fn grad(&self, x: &[f64]) -> Result<Vec<f64>> {
        SegmentPair::from_flat(x)?.gradient(&self.tol)
    }

    fn sample(&self, seed: u32, count: usize) -> std::result::Result<Vec<Vec<f64>>, SampleError> {
        let screen = Self::new(Tolerances::sampling().strictest(&self.tol));
        sample_with(
            self.name(),
            seed,
            count,
            |rng| {
                let mut x = vec![0.0; SegmentPair::LEN];
                for slot in 0..SegmentPair::POINTS {
                    rng.point::<Vec2<f64>>(-SHAPE_BOX, SHAPE_BOX).scatter(&mut x, slot);
                }
                x
            },
            // Crossing or tied configurations move the whole second segment.
            |rng, x| nudge_slots::<Vec2<f64>>(rng, x, &[2, 3]),
            |x| screen.grad(x).map(drop),
        )
    }
}

/// Every card with default tolerances.
pub fn catalog() -> Vec<Box<dyn Card>> {
    vec![
        Box::new(PointSegmentCard::<Vec2<f64>>::default()),
        Box::new(PointSegmentCard::<Vec3<f64>>::default()),
        Box::new(PointTriangle2Card::default()),
        Box::new(PointTriangle3Card::default()),
        Box::new(SegmentSegmentCard::default()),
    ]
}
