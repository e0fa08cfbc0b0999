//! Distance from a point to a solid 3D triangle.
//!
//! Up to four candidates: the face interior, when the orthogonal
//! projection lands inside the triangle, and the three edges.

use dcard_math::predicates::orient3d;
use dcard_math::Vec3;

use crate::candidate::Candidate;
use crate::config::Tolerances;
use crate::coord::{self, Coord};
use crate::error::{DistanceError, InputFault, Primitive, Result};
use crate::select::{min_distance, select};
use crate::triangle::{edge_candidates, TriangleFeature};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Triangle3 {
    pub point: Vec3<f64>,
    pub a: Vec3<f64>,
    pub b: Vec3<f64>,
    pub c: Vec3<f64>,
}

impl Triangle3 {
    /// Points in the flat layout `[p, a, b, c]`.
    pub const POINTS: usize = 4;
    pub const LEN: usize = 12;

    pub fn new(point: Vec3<f64>, a: Vec3<f64>, b: Vec3<f64>, c: Vec3<f64>) -> Self {
        Self { point, a, b, c }
    }

    pub fn from_flat(x: &[f64]) -> Result<Self> {
        coord::validate::<Vec3<f64>>(x, Self::POINTS)?;
        Ok(Self::new(Coord::at(x, 0), Coord::at(x, 1), Coord::at(x, 2), Coord::at(x, 3)))
    }

    /// Unnormalised normal `(b − a) × (c − a)`.
    pub fn normal(&self) -> Vec3<f64> {
        (self.b - self.a).cross(self.c - self.a)
    }

    fn checked_normal(&self, tol: &Tolerances) -> Result<Vec3<f64>> {
        let n = self.normal();
        let n_sq = n.norm_sq();
        if !n_sq.is_finite() {
            return Err(InputFault::Overflow.into());
        }
        if n_sq <= tol.min_area_norm_sq {
            return Err(DistanceError::DegenerateGeometry(Primitive::Triangle));
        }
        Ok(n)
    }

    /// Barycentric weights of the point's orthogonal projection onto the
    /// plane, and its signed height above it along `normal`.
    pub fn barycentric(&self, normal: Vec3<f64>) -> ([f64; 3], f64) {
        let n_sq = normal.norm_sq();
        let n_len = n_sq.sqrt();
        let height = normal.dot(self.point - self.a) / n_len;
        let foot = self.point - normal * (height / n_len);

        let alpha = normal.dot((self.b - foot).cross(self.c - foot)) / n_sq;
        let beta = normal.dot((self.c - foot).cross(self.a - foot)) / n_sq;
        ([alpha, beta, 1.0 - alpha - beta], height)
    }

    /// Face-interior candidate, present only when the projection lands
    /// inside the triangle (all barycentric weights non-negative).
    fn face_candidate(&self, normal: Vec3<f64>) -> Option<Candidate<TriangleFeature, Vec3<f64>>> {
        let (weights, height) = self.barycentric(normal);
        if !weights.iter().all(|&w| w >= 0.0) {
            return None;
        }
        let unit = normal * (1.0 / normal.norm());
        // The side is decided exactly, against the side the normal points to.
        let side = orient3d(&self.a, &self.b, &self.c, &self.point);
        let up = orient3d(&self.a, &self.b, &self.c, &(self.a + normal));
        let direction = if side.opposes(up) { -unit } else { unit };
        Some(Candidate::face(
            TriangleFeature::Face,
            height.abs(),
            direction,
            weights,
            [0, 1, 2, 3],
        ))
    }

    pub fn candidates(
        &self,
        tol: &Tolerances,
    ) -> Result<Vec<Candidate<TriangleFeature, Vec3<f64>>>> {
        let normal = self.checked_normal(tol)?;
        let mut cs = Vec::with_capacity(4);
        if let Some(face) = self.face_candidate(normal) {
            if !face.distance.is_finite() {
                return Err(InputFault::Overflow.into());
            }
            cs.push(face);
        }
        cs.extend(edge_candidates(self.point, [self.a, self.b, self.c], tol)?);
        Ok(cs)
    }

    pub fn distance(&self, tol: &Tolerances) -> Result<f64> {
        let cs = self.candidates(tol)?;
        min_distance(&cs).ok_or(DistanceError::NonUniqueBranch { ties: 0 })
    }

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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::triangle::{Corner, Edge};

    fn flat_xy(point: Vec3<f64>) -> Triangle3 {
        Triangle3::new(
            point,
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        )
    }

    fn close(a: &[f64], b: &[f64]) -> bool {
        a.iter().zip(b).all(|(x, y)| (x - y).abs() < 1e-12)
    }

    #[test]
    fn above_the_face() {
        let tol = Tolerances::default();
        let tri = flat_xy(Vec3::new(0.2, 0.2, 1.5));
        assert_eq!(tri.nearest_feature(&tol), Ok(TriangleFeature::Face));
        assert!((tri.distance(&tol).unwrap() - 1.5).abs() < 1e-12);

        let g = tri.gradient(&tol).unwrap();
        assert!(close(&g[0..3], &[0.0, 0.0, 1.0]));
        assert!(close(&g[3..6], &[0.0, 0.0, -0.6]));
        assert!(close(&g[6..9], &[0.0, 0.0, -0.2]));
        assert!(close(&g[9..12], &[0.0, 0.0, -0.2]));
    }

    #[test]
    fn below_the_face_flips_direction() {
        let tol = Tolerances::default();
        let tri = flat_xy(Vec3::new(0.2, 0.2, -1.0));
        let g = tri.gradient(&tol).unwrap();
        assert!(close(&g[0..3], &[0.0, 0.0, -1.0]));
        assert!(close(&g[3..6], &[0.0, 0.0, 0.6]));
    }

    #[test]
    fn barycentric_weights_reconstruct_the_foot_point() {
        let tri = Triangle3::new(
            Vec3::new(0.3, -0.2, 0.9),
            Vec3::new(-1.0, 0.0, 0.2),
            Vec3::new(1.0, 0.3, -0.1),
            Vec3::new(0.1, 1.2, 0.4),
        );
        let n = tri.normal();
        let (w, height) = tri.barycentric(n);
        let foot = tri.a * w[0] + tri.b * w[1] + tri.c * w[2];
        let lifted = foot + n * (height / n.norm());
        assert!((lifted - tri.point).norm() < 1e-12);
    }

    #[test]
    fn outside_projection_uses_edges() {
        let tol = Tolerances::default();
        let tri = flat_xy(Vec3::new(2.0, 2.0, 1.0));
        let cs = tri.candidates(&tol).unwrap();
        assert_eq!(cs.len(), 3);
        assert_eq!(tri.nearest_feature(&tol), Ok(TriangleFeature::Edge(Edge::BC)));
        assert!((tri.distance(&tol).unwrap() - 5.5_f64.sqrt()).abs() < 1e-12);

        let corner = flat_xy(Vec3::new(-1.0, -1.0, 0.5));
        assert_eq!(corner.nearest_feature(&tol), Ok(TriangleFeature::Vertex(Corner::A)));
        let g = corner.gradient(&tol).unwrap();
        // Vertex a pulls against the point; b and c do not move the distance.
        assert!(close(&g[6..12], &[0.0; 6]));
        assert!(close(&g[0..3], &[-g[3], -g[4], -g[5]]));
    }

    #[test]
    fn in_plane_point_inside_is_singular() {
        let tol = Tolerances::default();
        let tri = flat_xy(Vec3::new(0.2, 0.2, 0.0));
        assert_eq!(tri.distance(&tol), Ok(0.0));
        assert!(matches!(
            tri.gradient(&tol),
            Err(DistanceError::SingularDistance { .. })
        ));
    }

    #[test]
    fn projection_on_an_edge_is_a_boundary() {
        let tol = Tolerances::default();
        // Foot point lies on edge ab; face and edge ab give the same distance.
        let tri = flat_xy(Vec3::new(0.5, 0.0, 1.0));
        assert!((tri.distance(&tol).unwrap() - 1.0).abs() < 1e-12);
        assert_eq!(tri.gradient(&tol), Err(DistanceError::NonUniqueBranch { ties: 2 }));
        assert_eq!(tri.nearest_feature(&tol), Err(DistanceError::NonUniqueBranch { ties: 2 }));
    }

    #[test]
    fn overflowing_coordinates_are_rejected() {
        let tol = Tolerances::default();
        let far = flat_xy(Vec3::new(1e200, 1e200, 1e200));
        let err = Err(DistanceError::InvalidInput(InputFault::Overflow));
        assert_eq!(far.distance(&tol), err);
        assert_eq!(far.gradient(&tol).map(|_| 0.0), err);

        let huge = Triangle3::new(
            Vec3::new(0.0, 0.0, 1.0),
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1e200, 0.0, 0.0),
            Vec3::new(0.0, 1e200, 0.0),
        );
        assert_eq!(huge.distance(&tol), err);
    }

    #[test]
    fn degenerate_triangle() {
        let tol = Tolerances::default();
        let tri = Triangle3::new(
            Vec3::new(0.0, 0.0, 1.0),
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 1.0, 1.0),
            Vec3::new(2.0, 2.0, 2.0),
        );
        let err = DistanceError::DegenerateGeometry(Primitive::Triangle);
        assert_eq!(tri.distance(&tol), Err(err));
        assert_eq!(tri.gradient(&tol), Err(err));
    }
}
