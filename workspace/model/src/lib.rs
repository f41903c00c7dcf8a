//! Read-only snapshots of the platform records consumed by the compute crate.
//!
//! Creators, investments and backer holdings are owned by the hosted data
//! layer; this crate only describes their shape. Nothing here is mutated by
//! the calculators.

pub mod creator;
pub mod holding;
pub mod insight;
pub mod investment;
pub mod post;

pub use creator::Creator;
pub use holding::Holding;
pub use insight::CreatorInsight;
pub use investment::Investment;
pub use post::Post;
