pub mod layer;
pub mod markers;
pub mod raster;
pub mod surface;
pub mod symbology;

pub use layer::*;
pub use markers::*;
pub use raster::*;
pub use surface::*;
pub use symbology::*;
