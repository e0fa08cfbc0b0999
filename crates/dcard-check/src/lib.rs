//! dcard-check — finite-difference verification of distance cards
//!
//! Draws inputs from a card's own sampler, evaluates the analytic
//! gradient, and compares it against central differences of `value`.
//! Samples are independent, so [`check_card_parallel`] fans them out over
//! rayon and produces the same report as [`check_card`].

pub mod fd;

use std::fmt;

use dcard_dist::{Card, DistanceError, SampleError};
use rayon::prelude::*;
use tracing::{info, warn};

pub use fd::{central_difference, within};

/// Verification settings.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CheckConfig {
    /// Central-difference step.
    pub step: f64,
    pub atol: f64,
    pub rtol: f64,
    pub samples: usize,
    pub seed: u32,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            step: 1e-6,
            atol: 1e-6,
            rtol: 1e-6,
            samples: 64,
            seed: 7,
        }
    }
}

/// A property violated at one sample.
#[derive(Clone, Debug, PartialEq)]
pub enum Finding {
    /// Analytic and numeric partial derivative disagree.
    Gradient {
        sample: usize,
        index: usize,
        analytic: f64,
        numeric: f64,
    },
    NegativeValue { sample: usize, value: f64 },
    /// Two identical calls returned different bits.
    NotRepeatable { sample: usize },
}

/// Outcome of one card's verification run.
#[derive(Clone, Debug, PartialEq)]
pub struct CheckReport {
    pub card: &'static str,
    pub samples: usize,
    /// Largest `|analytic − numeric|` seen over all components.
    pub max_abs_error: f64,
    pub findings: Vec<Finding>,
}

impl CheckReport {
    pub fn passed(&self) -> bool {
        self.findings.is_empty()
    }
}

/// Errors that stop a verification run.
#[derive(Debug, Clone, PartialEq)]
pub enum CheckError {
    /// The sampler could not produce inputs.
    Sample(SampleError),
    /// `value` or `grad` failed at a sampled input.
    Distance { sample: usize, error: DistanceError },
}

impl fmt::Display for CheckError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sample(e) => write!(f, "sampling failed: {e}"),
            Self::Distance { sample, error } => write!(f, "sample {sample}: {error}"),
        }
    }
}

impl std::error::Error for CheckError {}

impl From<SampleError> for CheckError {
    fn from(e: SampleError) -> Self {
        Self::Sample(e)
    }
}

struct SampleOutcome {
    max_abs_error: f64,
    findings: Vec<Finding>,
}

fn check_sample(
    card: &dyn Card,
    sample: usize,
    x: &[f64],
    cfg: &CheckConfig,
) -> Result<SampleOutcome, CheckError> {
    let at = |error| CheckError::Distance { sample, error };

    let value = card.value(x).map_err(at)?;
    let analytic = card.grad(x).map_err(at)?;
    let numeric = central_difference(|y| card.value(y), x, cfg.step).map_err(at)?;

    let mut findings = Vec::new();
    if value < 0.0 {
        findings.push(Finding::NegativeValue { sample, value });
    }
    let again = card.grad(x).map_err(at)?;
    let same_value = card.value(x).map_err(at)?.to_bits() == value.to_bits();
    let same_grad = again.iter().zip(&analytic).all(|(a, b)| a.to_bits() == b.to_bits());
    if !(same_value && same_grad) {
        findings.push(Finding::NotRepeatable { sample });
    }

    let mut max_abs_error = 0.0_f64;
    for (index, (&a, &n)) in analytic.iter().zip(&numeric).enumerate() {
        max_abs_error = max_abs_error.max((a - n).abs());
        if !within(a, n, cfg.atol, cfg.rtol) {
            findings.push(Finding::Gradient { sample, index, analytic: a, numeric: n });
        }
    }
    Ok(SampleOutcome { max_abs_error, findings })
}

fn merge(card: &dyn Card, outcomes: Vec<SampleOutcome>) -> CheckReport {
    let samples = outcomes.len();
    let mut report = CheckReport {
        card: card.name(),
        samples,
        max_abs_error: 0.0,
        findings: Vec::new(),
    };
    for o in outcomes {
        report.max_abs_error = report.max_abs_error.max(o.max_abs_error);
        report.findings.extend(o.findings);
    }
    if report.passed() {
        info!(
            card = report.card,
            samples,
            max_abs_error = report.max_abs_error,
            "gradient check passed"
        );
    } else {
        warn!(card = report.card, findings = report.findings.len(), "gradient check failed");
    }
    report
}

/// Verify `card` on `cfg.samples` sampled inputs, one after another.
pub fn check_card(card: &dyn Card, cfg: &CheckConfig) -> Result<CheckReport, CheckError> {
    let inputs = card.sample(cfg.seed, cfg.samples)?;
    let outcomes = inputs
        .iter()
        .enumerate()
        .map(|(i, x)| check_sample(card, i, x, cfg))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(merge(card, outcomes))
}

/// Same as [`check_card`], with samples verified in parallel.
pub fn check_card_parallel(card: &dyn Card, cfg: &CheckConfig) -> Result<CheckReport, CheckError> {
    let inputs = card.sample(cfg.seed, cfg.samples)?;
    let outcomes = inputs
        .par_iter()
        .enumerate()
        .map(|(i, x)| check_sample(card, i, x, cfg))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(merge(card, outcomes))
}

/// Verify every card in the catalog in parallel.
pub fn check_catalog(cfg: &CheckConfig) -> Vec<Result<CheckReport, CheckError>> {
    dcard_dist::catalog()
        .par_iter()
        .map(|card| check_card(card.as_ref(), cfg))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use dcard_dist::{PointSegmentCard, Result as DistResult, Tolerances, Vec2};

    /// A card whose gradient is deliberately off by a factor of two.
    struct Doubled(PointSegmentCard<Vec2<f64>>);

    impl Card for Doubled {
        fn name(&self) -> &'static str {
            "doubled"
        }
        fn dim(&self) -> usize {
            self.0.dim()
        }
        fn tolerances(&self) -> &Tolerances {
            self.0.tolerances()
        }
        fn value(&self, x: &[f64]) -> DistResult<f64> {
            self.0.value(x)
        }
        fn grad(&self, x: &[f64]) -> DistResult<Vec<f64>> {
            Ok(self.0.grad(x)?.into_iter().map(|g| 2.0 * g).collect())
        }
        fn sample(&self, seed: u32, count: usize) -> Result<Vec<Vec<f64>>, SampleError> {
            self.0.sample(seed, count)
        }
    }

    #[test]
    fn wrong_gradient_is_reported() {
        let cfg = CheckConfig { samples: 4, ..CheckConfig::default() };
        let report = check_card(&Doubled(PointSegmentCard::default()), &cfg).unwrap();
        assert!(!report.passed());
        assert!(report.max_abs_error > 0.1);
        assert!(report
            .findings
            .iter()
            .all(|f| matches!(f, Finding::Gradient { .. })));
    }

    #[test]
    fn correct_gradient_passes() {
        let cfg = CheckConfig { samples: 8, ..CheckConfig::default() };
        let report = check_card(&PointSegmentCard::<Vec2<f64>>::default(), &cfg).unwrap();
        assert!(report.passed(), "{:?}", report.findings);
        assert_eq!(report.samples, 8);
        assert_eq!(report.card, "point_segment_2d");
    }
}
