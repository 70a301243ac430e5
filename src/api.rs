//! Public API surface for the placement core.
//!
//! This file consolidates the identifier newtypes and the batch output types
//! handed to the (out-of-scope) rendering layer. All types derive
//! Serialize/Deserialize for JSON serialization.

use serde::{Deserialize, Serialize};

use crate::error::PlacementError;
use crate::models::{DistanceRecord, PixelCoord, ScalingParameters};

/// Catalog identifier (integer catalog number, e.g. a HIP number).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CatalogId(pub i64);

impl CatalogId {
    pub fn new(value: i64) -> Self {
        CatalogId(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for CatalogId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Final placement for a single object, consumed by the rendering layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlacementRecord {
    pub id: CatalogId,
    /// In-bounds pixel coordinate (clamped or calibration-supplied).
    pub pixel: PixelCoord,
    /// Resolved distance in parsecs, light-years, and arcseconds of parallax.
    pub distance: DistanceRecord,
    /// Normalized rendering-volume depth in [0, 1].
    pub scaled_distance: f64,
}

/// Outcome of placing a whole batch.
///
/// `placements` is ordered nearest-first so downstream "show N nearest"
/// filtering and depth ordering stay consistent. `dropped` carries the
/// per-object failures for diagnostics; a non-empty `dropped` alongside a
/// non-empty `placements` is a partial success, not an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchOutcome {
    pub placements: Vec<PlacementRecord>,
    pub dropped: Vec<(CatalogId, PlacementError)>,
    pub scaling: ScalingParameters,
}

impl BatchOutcome {
    /// Serialize for the rendering layer's JSON boundary.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
