//! Reproducible input generation for finite-difference verification.
//!
//! Inputs are drawn from a fixed linear congruential generator so that a
//! seed always reproduces the same sequence. Each proposal is screened by
//! the card's own `grad` under [`Tolerances::sampling`], which keeps it
//! away from degenerate primitives, near-zero distances, branch
//! boundaries and near ties.

use std::fmt;

use tracing::{debug, warn};

use crate::coord::Coord;
use crate::error::DistanceError;

const MULTIPLIER: u32 = 1664525;
const INCREMENT: u32 = 1013904223;
/// 2³², the generator's modulus.
const MODULUS: f64 = 4294967296.0;

/// Proposals (fresh draws plus nudges) allowed per sample.
pub const MAX_ATTEMPTS: usize = 256;

/// Linear congruential generator modulo 2³².
///
/// ```
/// # use dcard_dist::sampler::Lcg;
/// let mut rng = Lcg::new(7);
/// let u = rng.next_f64(); // uniform in [0, 1)
/// assert!((0.0..1.0).contains(&u));
/// ```
#[derive(Clone, Debug)]
pub struct Lcg {
    state: u32,
}

impl Lcg {
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Advance the generator and return the new state.
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(MULTIPLIER).wrapping_add(INCREMENT);
        self.state
    }

    /// Uniform `f64` in [0, 1).
    pub fn next_f64(&mut self) -> f64 {
        self.next_u32() as f64 / MODULUS
    }

    /// Uniform `f64` in [lo, hi).
    pub fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64()
    }

    /// Point with every coordinate uniform in [lo, hi).
    pub fn point<V: Coord>(&mut self, lo: f64, hi: f64) -> V {
        let mut buf = [0.0; 3];
        for c in buf.iter_mut().take(V::DIM) {
            *c = self.uniform(lo, hi);
        }
        V::read(&buf)
    }
}

/// Errors raised while drawing samples.
#[derive(Debug, Clone, PartialEq)]
pub enum SampleError {
    /// No acceptable input was found within the attempt budget.
    Exhausted {
        card: &'static str,
        index: usize,
        attempts: usize,
        last: DistanceError,
    },
}

impl fmt::Display for SampleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exhausted { card, index, attempts, last } => write!(
                f,
                "{card}: sample {index} still rejected after {attempts} attempts ({last})"
            ),
        }
    }
}

impl std::error::Error for SampleError {}

/// Draw `count` accepted inputs.
///
/// `fresh` proposes a whole new input; `nudge` perturbs a rejected one in
/// place; `screen` accepts or rejects. A degenerate proposal is redrawn,
/// any other rejection is nudged.
pub fn sample_with<F, N, S>(
    card: &'static str,
    seed: u32,
    count: usize,
    mut fresh: F,
    mut nudge: N,
    screen: S,
) -> Result<Vec<Vec<f64>>, SampleError>
where
    F: FnMut(&mut Lcg) -> Vec<f64>,
    N: FnMut(&mut Lcg, &mut [f64]),
    S: Fn(&[f64]) -> Result<(), DistanceError>,
{
    let mut rng = Lcg::new(seed);
    let mut out = Vec::with_capacity(count);
    for index in 0..count {
        let mut x = fresh(&mut rng);
        let mut attempts = 1;
        loop {
            match screen(&x) {
                Ok(()) => break,
                Err(last) if attempts >= MAX_ATTEMPTS => {
                    warn!(card, index, attempts, %last, "sampler budget exhausted");
                    return Err(SampleError::Exhausted { card, index, attempts, last });
                }
                Err(DistanceError::DegenerateGeometry(_)) => {
                    debug!(card, index, "redrawing degenerate proposal");
                    x = fresh(&mut rng);
                }
                Err(reason) => {
                    debug!(card, index, %reason, "nudging rejected proposal");
                    nudge(&mut rng, &mut x);
                }
            }
            attempts += 1;
        }
        out.push(x);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dcard_math::Vec3;

    #[test]
    fn lcg_sequence_is_the_classic_one() {
        let mut rng = Lcg::new(0);
        assert_eq!(rng.next_u32(), 1013904223);
        assert_eq!(rng.next_u32(), 1196435762);
        let mut rng = Lcg::new(1);
        assert_eq!(rng.next_u32(), 1015568748);
    }

    #[test]
    fn deterministic() {
        let mut a = Lcg::new(42);
        let mut b = Lcg::new(42);
        for _ in 0..100 {
            assert_eq!(a.next_u32(), b.next_u32());
        }
    }

    #[test]
    fn uniform_in_range() {
        let mut rng = Lcg::new(99);
        for _ in 0..10_000 {
            let v = rng.uniform(-2.0, 3.0);
            assert!((-2.0..3.0).contains(&v), "value {v} out of [-2, 3)");
        }
        let p: Vec3<f64> = rng.point(-1.0, 1.0);
        assert!(p.x.abs() < 1.0 && p.y.abs() < 1.0 && p.z.abs() < 1.0);
    }

    #[test]
    fn uniform_mean_approx_half() {
        let mut rng = Lcg::new(12345);
        let n = 10_000;
        let mean = (0..n).map(|_| rng.next_f64()).sum::<f64>() / n as f64;
        assert!((mean - 0.5).abs() < 0.02, "uniform mean {mean} too far from 0.5");
    }

    #[test]
    fn rejected_proposals_are_nudged_until_accepted() {
        let samples = sample_with(
            "test",
            3,
            5,
            |rng| vec![rng.uniform(0.0, 0.1)],
            |_, x| x[0] += 1.0,
            |x| {
                if x[0] > 2.0 {
                    Ok(())
                } else {
                    Err(DistanceError::SingularDistance { distance: x[0] })
                }
            },
        )
        .unwrap();
        assert_eq!(samples.len(), 5);
        assert!(samples.iter().all(|x| x[0] > 2.0 && x[0] < 3.1));
    }

    #[test]
    fn exhaustion_is_an_error() {
        let err = sample_with(
            "never",
            1,
            2,
            |_| vec![0.0],
            |_, _| {},
            |_| Err(DistanceError::NonUniqueBranch { ties: 2 }),
        )
        .unwrap_err();
        assert_eq!(
            err,
            SampleError::Exhausted {
                card: "never",
                index: 0,
                attempts: MAX_ATTEMPTS,
                last: DistanceError::NonUniqueBranch { ties: 2 },
            }
        );
    }
}
