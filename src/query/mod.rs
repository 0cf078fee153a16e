//! Non-persistent geometric queries.
//!
//! * [`query::penetration()`](penetration()) computes the penetration depth, contact normal and
//!   witness points of two convex shapes.
//! * [`gjk::intersection`] decides whether two convex shapes overlap.
//! * [`epa::EPA`] measures the penetration of two shapes from a GJK simplex.

pub use self::epa::{EpaFailure, Penetration, PenetrationResult, Termination};
pub use self::penetration::penetration;
pub use self::query_options::{EpaOptions, InvalidEpaOptions, MIN_TRIANGLES};

pub mod epa;
pub mod gjk;
mod penetration;
mod query_options;
