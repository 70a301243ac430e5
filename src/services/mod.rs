//! High-level placement services.
//!
//! - [`resolver`]: distance resolution from parallax, supplied distance, and
//!   catalog tiers
//! - [`projector`]: tangent-plane projection onto image pixels
//! - [`calibration`]: label-keyed pixel overrides
//! - [`placement`]: the batch pipeline tying the pieces together

pub mod calibration;
pub mod placement;
pub mod projector;
pub mod resolver;

pub use calibration::CalibrationStore;
pub use placement::{place_batch, RemoteTier};
