pub mod cycle;
pub mod metrics;
pub mod ticker;

pub use cycle::*;
pub use metrics::*;
pub use ticker::*;
