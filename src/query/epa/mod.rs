//! The EPA algorithm for penetration depth computation.
//!
//! The polytope is stored as an arena of [`TriangleEPA`] in a [`TrianglesStore`]. Triangles
//! refer to their neighbors through [`EdgeEPA`] values (a triangle index and a local edge
//! index), and candidate faces are ordered by a [`TriangleHeap`].

pub use self::edge_epa::EdgeEPA;
pub use self::epa3::EPA;
pub use self::penetration_result::{EpaFailure, Penetration, PenetrationResult, Termination};
pub(crate) use self::polytope::Polytope;
pub use self::triangle_epa::{compute_silhouette, half_link, link, TriangleEPA};
pub use self::triangle_heap::TriangleHeap;
pub use self::triangles_store::{TrianglesStore, DEFAULT_MAX_TRIANGLES};

mod edge_epa;
pub mod epa3;
mod penetration_result;
mod polytope;
mod triangle_epa;
mod triangle_heap;
mod triangles_store;
