//! Branch selection and the differentiability guards.
//!
//! `value` only needs the smallest candidate distance, which is well
//! defined even at a tie. `grad` additionally needs the minimising
//! feature to be unique and every candidate realising it to pass its own
//! guards.

use core::fmt::Debug;

use tracing::trace;

use crate::candidate::Candidate;
use crate::config::Tolerances;
use crate::coord::Coord;
use crate::error::{DistanceError, Result};

/// Smallest candidate distance, or `None` for an empty list.
pub fn min_distance<F, V>(candidates: &[Candidate<F, V>]) -> Option<f64> {
    candidates.iter().map(|c| c.distance).reduce(f64::min)
}

/// The winning feature and every candidate that realises it.
#[derive(Debug)]
pub struct Selection<'a, F, V> {
    pub feature: F,
    pub distance: f64,
    active: Vec<&'a Candidate<F, V>>,
}

impl<'a, F: Copy + Debug, V: Coord> Selection<'a, F, V> {
    /// Candidates realising the winning feature, in decomposition order.
    pub fn active(&self) -> &[&'a Candidate<F, V>] {
        &self.active
    }

    /// Check every active candidate's guards, then return the first one's
    /// gradient in a layout of `len` coordinates.
    pub fn gradient(&self, tol: &Tolerances, len: usize) -> Result<Vec<f64>> {
        let mut grads = self.active.iter().map(|c| c.gradient(tol, len));
        let first = grads
            .next()
            .ok_or(DistanceError::NonUniqueBranch { ties: 0 })??;
        for g in grads {
            if let Err(e) = g {
                trace!(feature = ?self.feature, error = %e, "guard failed on co-active candidate");
                return Err(e);
            }
        }
        Ok(first)
    }
}

/// Pick the minimum-distance feature and require it to be unique.
///
/// Candidates within `tie_margin` of the minimum that name the *same*
/// feature (a shared triangle vertex reached from two edges, say) are
/// one feature, not a tie. An empty list is reported as a zero-way tie.
pub fn select<'a, F, V>(
    candidates: &'a [Candidate<F, V>],
    tol: &Tolerances,
) -> Result<Selection<'a, F, V>>
where
    F: Copy + Eq + Debug,
    V: Coord,
{
    let best = candidates
        .iter()
        .reduce(|best, c| if c.distance < best.distance { c } else { best })
        .ok_or(DistanceError::NonUniqueBranch { ties: 0 })?;

    let within: Vec<&Candidate<F, V>> = candidates
        .iter()
        .filter(|c| !(c.distance - best.distance > tol.tie_margin))
        .collect();

    let mut features: Vec<F> = Vec::with_capacity(within.len());
    for c in &within {
        if !features.contains(&c.feature) {
            features.push(c.feature);
        }
    }
    if features.len() > 1 {
        trace!(?features, distance = best.distance, "non-unique nearest feature");
        return Err(DistanceError::NonUniqueBranch { ties: features.len() });
    }

    Ok(Selection {
        feature: best.feature,
        distance: best.distance,
        active: within,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point_segment::PointSegment;
    use dcard_math::Vec2;

    fn candidate(feature: u8, point: Vec2<f64>) -> Candidate<u8, Vec2<f64>> {
        let query = PointSegment::new(point, Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0));
        let projection = query.project(&Tolerances::default()).unwrap();
        Candidate::segment(feature, query, projection, [0, 1, 2])
    }

    #[test]
    fn picks_the_nearest() {
        let cs = [
            candidate(0, Vec2::new(0.5, 3.0)),
            candidate(1, Vec2::new(0.5, 1.0)),
            candidate(2, Vec2::new(0.5, 2.0)),
        ];
        assert_eq!(min_distance(&cs), Some(1.0));
        let s = select(&cs, &Tolerances::default()).unwrap();
        assert_eq!(s.feature, 1);
        assert_eq!(s.active().len(), 1);
        let g = s.gradient(&Tolerances::default(), 6).unwrap();
        assert!((g[1] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn distinct_features_at_equal_distance_tie() {
        let cs = [
            candidate(0, Vec2::new(0.25, 1.0)),
            candidate(1, Vec2::new(0.75, -1.0)),
        ];
        assert_eq!(min_distance(&cs), Some(1.0));
        assert_eq!(
            select(&cs, &Tolerances::default()).map(|s| s.feature),
            Err(DistanceError::NonUniqueBranch { ties: 2 })
        );
    }

    #[test]
    fn same_feature_twice_is_not_a_tie() {
        let cs = [
            candidate(4, Vec2::new(0.25, 1.0)),
            candidate(4, Vec2::new(0.25, 1.0)),
        ];
        let s = select(&cs, &Tolerances::default()).unwrap();
        assert_eq!(s.active().len(), 2);
        assert!(s.gradient(&Tolerances::default(), 6).is_ok());
    }

    #[test]
    fn co_active_guard_failure_propagates() {
        // Same feature, one copy sits exactly on t = 0.
        let cs = [
            candidate(4, Vec2::new(0.5, 1.0)),
            candidate(4, Vec2::new(0.0, 1.0)),
        ];
        let s = select(&cs, &Tolerances::default()).unwrap();
        assert_eq!(
            s.gradient(&Tolerances::default(), 6),
            Err(DistanceError::BranchBoundary { parameter: 0.0 })
        );
    }

    #[test]
    fn empty_list() {
        let cs: [Candidate<u8, Vec2<f64>>; 0] = [];
        assert_eq!(min_distance(&cs), None);
        assert!(matches!(
            select(&cs, &Tolerances::default()),
            Err(DistanceError::NonUniqueBranch { ties: 0 })
        ));
    }
}
