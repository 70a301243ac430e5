//! Domain types for the placement pipeline.

mod distance;
mod frame;
mod object;
mod scaling;

pub use distance::{DistanceRecord, LY_PER_PARSEC};
pub use frame::{ProjectionFrame, DEFAULT_MARGIN_FRACTION};
pub use object::{CelestialObject, PixelCoord, RaUnit};
pub use scaling::ScalingParameters;
