//! Numeric thresholds shared by every card.
//!
//! All thresholds live in one immutable [`Tolerances`] value that is passed
//! into each evaluation; nothing here is mutable at runtime.

/// Squared length below which a segment is degenerate.
pub const MIN_SEGMENT_NORM_SQ: f64 = 1e-12;
/// Squared doubled area (2D) or squared normal norm (3D) below which a
/// triangle is degenerate.
pub const MIN_AREA_NORM_SQ: f64 = 1e-12;
/// Distance at or below which the gradient direction is undefined.
pub const MIN_DISTANCE: f64 = 1e-9;
/// Exclusion band around projection parameters 0 and 1.
pub const BRANCH_MARGIN: f64 = 1e-9;
/// Two candidate distances closer than this are a tie.
pub const TIE_MARGIN: f64 = 1e-9;

/// Thresholds consulted by the differentiability guards.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tolerances {
    pub min_segment_norm_sq: f64,
    pub min_area_norm_sq: f64,
    pub min_distance: f64,
    pub branch_margin: f64,
    pub tie_margin: f64,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            min_segment_norm_sq: MIN_SEGMENT_NORM_SQ,
            min_area_norm_sq: MIN_AREA_NORM_SQ,
            min_distance: MIN_DISTANCE,
            branch_margin: BRANCH_MARGIN,
            tie_margin: TIE_MARGIN,
        }
    }
}

impl Tolerances {
    /// Conservative thresholds for drawing finite-difference test inputs.
    ///
    /// An input that passes `grad` under these stays on one smooth branch
    /// for any central-difference step far below 0.05.
    pub fn sampling() -> Self {
        Self {
            min_segment_norm_sq: 0.04,
            min_area_norm_sq: 0.01,
            min_distance: 0.05,
            branch_margin: 0.05,
            tie_margin: 0.02,
        }
    }

    /// Field-wise stricter of `self` and `other`.
    pub fn strictest(&self, other: &Tolerances) -> Tolerances {
        Tolerances {
            min_segment_norm_sq: self.min_segment_norm_sq.max(other.min_segment_norm_sq),
            min_area_norm_sq: self.min_area_norm_sq.max(other.min_area_norm_sq),
            min_distance: self.min_distance.max(other.min_distance),
            branch_margin: self.branch_margin.max(other.branch_margin),
            tie_margin: self.tie_margin.max(other.tie_margin),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sampling_is_stricter_than_default() {
        let sampling = Tolerances::sampling();
        assert_eq!(sampling.strictest(&Tolerances::default()), sampling);
        assert_eq!(Tolerances::default().strictest(&sampling), sampling);
    }

    #[test]
    fn strictest_takes_each_field_separately() {
        let custom = Tolerances {
            min_distance: 0.5,
            ..Tolerances::default()
        };
        let s = Tolerances::sampling().strictest(&custom);
        assert_eq!(s.min_distance, 0.5);
        assert_eq!(s.branch_margin, Tolerances::sampling().branch_margin);
    }
}
