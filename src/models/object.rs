//! Celestial objects as ingested from tabular input.

use serde::{Deserialize, Serialize};

use crate::api::CatalogId;

/// Unit tag for right ascension values on ingestion.
///
/// RA below 24 is ambiguous between hours and degrees, so the unit is an
/// explicit input-side declaration rather than a heuristic.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RaUnit {
    Degrees,
    Hours,
}

impl RaUnit {
    /// Convert a raw RA value in this unit to degrees in [0, 360).
    pub fn to_degrees(self, value: f64) -> qtty::Degrees {
        let deg = match self {
            RaUnit::Degrees => value,
            RaUnit::Hours => value * 15.0,
        };
        qtty::Degrees::new(deg.rem_euclid(360.0))
    }
}

/// An image-pixel coordinate. Origin at the top-left corner, Y increasing
/// downward.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PixelCoord {
    pub x: f64,
    pub y: f64,
}

impl PixelCoord {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// One star (or other point source) as ingested from catalog measurements.
///
/// Optional fields reflect real catalog sparsity: a row may carry a parallax,
/// a direct distance, both, or neither, and may pin its own pixel position.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CelestialObject {
    pub id: CatalogId,
    /// Display label, used as the calibration-override key. Defaults to the
    /// catalog number rendered as text.
    pub label: String,
    /// Right ascension, [0, 360) degrees.
    pub ra: qtty::Degrees,
    /// Declination, [-90, 90] degrees.
    pub dec: qtty::Degrees,
    pub magnitude: Option<f64>,
    /// Parallax in milliarcseconds, as published by the source catalog.
    pub parallax_mas: Option<f64>,
    /// Directly supplied distance in parsecs.
    pub distance_pc: Option<f64>,
    /// Explicit pixel coordinate supplied by the input row, if any.
    pub pixel_hint: Option<PixelCoord>,
}

impl CelestialObject {
    pub fn new(id: CatalogId, ra: qtty::Degrees, dec: qtty::Degrees) -> Self {
        Self {
            id,
            label: id.to_string(),
            ra,
            dec,
            magnitude: None,
            parallax_mas: None,
            distance_pc: None,
            pixel_hint: None,
        }
    }
}
