//! Shared helpers for dcard benchmarks: fixed seeds, sampled inputs.

use dcard_dist::{catalog, Card, Lcg, SampleError};

pub const SEED: u32 = 0xCAFE_BABE;

/// Accepted inputs for `card`, drawn with the benchmark seed.
pub fn sampled_inputs(card: &dyn Card, n: usize) -> Result<Vec<Vec<f64>>, SampleError> {
    card.sample(SEED, n)
}

/// Raw coordinates in `[-1, 1)` with no acceptance screening. Many of
/// these sit in degenerate or tied configurations, which is what the
/// rejection-path benchmarks want.
pub fn raw_inputs(dim: usize, n: usize) -> Vec<Vec<f64>> {
    let mut rng = Lcg::new(SEED);
    (0..n)
        .map(|_| (0..dim).map(|_| rng.uniform(-1.0, 1.0)).collect())
        .collect()
}

/// Every catalog card paired with its sampled inputs.
pub fn fixtures(n: usize) -> Result<Vec<(Box<dyn Card>, Vec<Vec<f64>>)>, SampleError> {
    catalog()
        .into_iter()
        .map(|card| {
            let inputs = sampled_inputs(card.as_ref(), n)?;
            Ok((card, inputs))
        })
        .collect()
}
