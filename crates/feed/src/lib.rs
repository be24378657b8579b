//! Vehicle-position feed: wire decoding, route filtering and GeoJSON output.

pub mod collection;
pub mod error;
pub mod protocol;
pub mod report;
pub mod source;

pub use collection::*;
pub use error::*;
pub use protocol::*;
pub use report::*;
pub use source::*;
