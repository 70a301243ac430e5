//! Error types for the placement pipeline.
//!
//! All per-object error kinds are non-fatal: the offending object is dropped
//! from the batch and the failure is reported for diagnostics while the rest
//! of the batch continues. The only batch-fatal condition is an empty result
//! ([`PlacementError::EmptyBatch`]).

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::api::CatalogId;

/// Result type for placement operations.
pub type PlaceResult<T> = Result<T, PlacementError>;

/// Errors produced by the resolution, projection, and scaling pipeline.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
pub enum PlacementError {
    /// No usable distance data for an object: no positive parallax, no
    /// supplied distance, and no catalog match.
    #[error("no usable distance data for object {id}")]
    NotResolvable { id: CatalogId },

    /// The tangent plane is undefined for this RA/Dec pair (the point is on
    /// or beyond the great circle 90 degrees from the projection center).
    #[error("tangent plane undefined for ra={ra_deg} dec={dec_deg}")]
    ProjectionSingularity { ra_deg: f64, dec_deg: f64 },

    /// The projected pixel fell outside the frame's margin band.
    #[error("projected pixel ({x:.1}, {y:.1}) outside frame margin")]
    OutOfBounds { x: f64, y: f64 },

    /// A remote catalog lookup timed out. Treated identically to not-found
    /// by the fallback chain.
    #[error("remote catalog lookup timed out for object {id}")]
    RemoteLookupTimeout { id: CatalogId },

    /// Projection frame parameters failed validation.
    #[error("invalid projection frame: {message}")]
    InvalidFrame { message: String },

    /// Zero objects survived resolution and placement, so there is nothing
    /// to render. Distinct from a partial-success batch.
    #[error("no objects survived resolution and placement")]
    EmptyBatch,
}

impl PlacementError {
    pub fn invalid_frame(message: impl Into<String>) -> Self {
        Self::InvalidFrame {
            message: message.into(),
        }
    }
}
