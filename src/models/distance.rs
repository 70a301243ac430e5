//! Canonical distance records derived from parallax or catalog distance.

use serde::{Deserialize, Serialize};

/// Light-years per parsec. The pipeline uses this constant exactly; no
/// alternate rounding.
pub const LY_PER_PARSEC: f64 = 3.26156;

/// A resolved stellar distance in the three forms the UI displays.
///
/// `light_years` and `parallax_arcsec` are always derived from `parsecs`,
/// never stored independently, so the three fields cannot drift apart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DistanceRecord {
    pub parsecs: f64,
    pub light_years: f64,
    pub parallax_arcsec: f64,
}

impl DistanceRecord {
    /// Build a record from a distance in parsecs.
    ///
    /// Derives `parallax_arcsec = 1/pc` for display symmetry with
    /// parallax-resolved objects.
    pub fn from_parsecs(parsecs: f64) -> Self {
        Self {
            parsecs,
            light_years: parsecs * LY_PER_PARSEC,
            parallax_arcsec: 1.0 / parsecs,
        }
    }

    /// Build a record from a parallax in milliarcseconds.
    ///
    /// Returns `None` unless the parallax is strictly positive; Gaia and
    /// Hipparcos both publish zero and negative parallaxes for poorly
    /// measured stars, and those carry no distance information.
    pub fn from_parallax_mas(parallax_mas: f64) -> Option<Self> {
        if parallax_mas <= 0.0 {
            return None;
        }
        let parallax_arcsec = parallax_mas / 1000.0;
        let parsecs = 1.0 / parallax_arcsec;
        Some(Self {
            parsecs,
            light_years: parsecs * LY_PER_PARSEC,
            parallax_arcsec,
        })
    }
}
