//! Error types for dcard-dist.
//!
//! Every variant marks an input where the distance or its derivative is
//! undefined. None of them is retryable: the caller gets the condition
//! back by name and decides what to do.

use std::fmt;

/// Which primitive failed its minimum-size invariant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    Segment,
    Triangle,
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Segment => f.write_str("segment"),
            Self::Triangle => f.write_str("triangle"),
        }
    }
}

/// What was wrong with a flat input vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFault {
    /// Coordinate at `index` is NaN or infinite.
    NonFinite { index: usize },
    /// Input length does not match the card's layout.
    Length { expected: usize, got: usize },
    /// Finite coordinates whose products or norms overflow f64.
    Overflow,
}

/// Errors raised by distance evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DistanceError {
    /// Malformed input vector.
    InvalidInput(InputFault),
    /// A segment or triangle is below its minimum-size threshold.
    DegenerateGeometry(Primitive),
    /// Distance at or below the zero threshold; the unit direction is undefined.
    SingularDistance { distance: f64 },
    /// Projection parameter (or barycentric weight) inside the exclusion
    /// margin of a branch boundary.
    BranchBoundary { parameter: f64 },
    /// Several distinct features attain the minimum within the tie margin.
    NonUniqueBranch { ties: usize },
    /// Derivative order not provided analytically by this card.
    UnsupportedOperation(&'static str),
}

impl fmt::Display for DistanceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidInput(InputFault::NonFinite { index }) => {
                write!(f, "invalid input: coordinate {index} is not finite")
            }
            Self::InvalidInput(InputFault::Length { expected, got }) => {
                write!(f, "invalid input: expected {expected} coordinates, got {got}")
            }
            Self::InvalidInput(InputFault::Overflow) => {
                f.write_str("invalid input: coordinates too large to evaluate")
            }
            Self::DegenerateGeometry(p) => write!(f, "degenerate {p}"),
            Self::SingularDistance { distance } => {
                write!(f, "distance {distance:e} is too close to zero to differentiate")
            }
            Self::BranchBoundary { parameter } => {
                write!(f, "parameter {parameter} lies on a branch boundary")
            }
            Self::NonUniqueBranch { ties } => {
                write!(f, "{ties} features tie for the minimum distance")
            }
            Self::UnsupportedOperation(op) => write!(f, "{op} is not implemented for this card"),
        }
    }
}

impl std::error::Error for DistanceError {}

impl From<InputFault> for DistanceError {
    fn from(fault: InputFault) -> Self {
        Self::InvalidInput(fault)
    }
}

pub type Result<T> = std::result::Result<T, DistanceError>;
