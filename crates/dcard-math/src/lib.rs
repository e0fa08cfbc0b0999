//! dcard-math — vector algebra kernel for the distance cards
//!
//! Fixed-dimension vectors generic over scalar type, plus exact
//! orientation predicates for the topological decisions the distance
//! engine makes before it differentiates anything.
//!
//! # Design principles
//! - Generic over `Scalar` type (the engine instantiates f64)
//! - `#[repr(C)]` plain structs, `Copy` everywhere
//! - Positions and directions share `Vec2`/`Vec3`; the engine never needs
//!   affine point/vector separation
//! - Exact predicates only behind the `exact` feature

mod scalar;
mod vec2;
mod vec3;

#[cfg(feature = "exact")]
pub mod predicates;

pub use scalar::Scalar;
pub use vec2::Vec2;
pub use vec3::Vec3;
