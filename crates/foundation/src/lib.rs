pub mod coord;

// Foundation crate: small, well-tested primitives only.
pub use coord::*;
