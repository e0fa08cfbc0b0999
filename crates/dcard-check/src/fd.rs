//! Central differences and the tolerance they are compared under.

/// Central-difference gradient of `f` at `x` with step `h`.
///
/// Fails with the first error `f` returns at a perturbed point.
pub fn central_difference<F, E>(f: F, x: &[f64], h: f64) -> Result<Vec<f64>, E>
where
    F: Fn(&[f64]) -> Result<f64, E>,
{
    let mut probe = x.to_vec();
    let mut grad = Vec::with_capacity(x.len());
    for i in 0..x.len() {
        probe[i] = x[i] + h;
        let plus = f(&probe)?;
        probe[i] = x[i] - h;
        let minus = f(&probe)?;
        probe[i] = x[i];
        grad.push((plus - minus) / (2.0 * h));
    }
    Ok(grad)
}

/// `|analytic − numeric| ≤ atol + rtol·|numeric|`
#[inline]
pub fn within(analytic: f64, numeric: f64, atol: f64, rtol: f64) -> bool {
    (analytic - numeric).abs() <= atol + rtol * numeric.abs()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quadratic() {
        // f(x, y) = x² + 2xy + y², ∇f = (2x + 2y, 2x + 2y)
        let f = |v: &[f64]| -> Result<f64, ()> {
            Ok(v[0] * v[0] + 2.0 * v[0] * v[1] + v[1] * v[1])
        };
        let g = central_difference(f, &[1.0, 2.0], 1e-6).unwrap();
        assert!((g[0] - 6.0).abs() < 1e-6);
        assert!((g[1] - 6.0).abs() < 1e-6);
    }

    #[test]
    fn errors_propagate() {
        let f = |v: &[f64]| {
            if v[0] > 0.0 {
                Err("positive")
            } else {
                Ok(v[0])
            }
        };
        assert_eq!(central_difference(f, &[0.0], 1e-3), Err("positive"));
    }

    #[test]
    fn tolerance_scales_with_magnitude() {
        assert!(within(1000.0005, 1000.0, 1e-6, 1e-6));
        assert!(!within(1.0005, 1.0, 1e-6, 1e-6));
    }
}
