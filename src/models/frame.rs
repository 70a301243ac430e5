//! Projection frame: the image geometry the projector maps sky coordinates
//! into.

use serde::{Deserialize, Serialize};

use crate::error::{PlaceResult, PlacementError};

/// Fraction of the larger image dimension accepted beyond the image edge
/// before a projected point is rejected as out of bounds.
pub const DEFAULT_MARGIN_FRACTION: f64 = 0.2;

/// Image geometry and plate scale for the tangent-plane projection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionFrame {
    /// Right ascension of the image center, degrees.
    pub center_ra: qtty::Degrees,
    /// Declination of the image center, degrees.
    pub center_dec: qtty::Degrees,
    /// Plate scale in arcseconds per pixel.
    pub scale_arcsec_per_px: f64,
    pub width_px: f64,
    pub height_px: f64,
    /// Out-of-bounds margin as a fraction of the larger image dimension.
    pub margin_fraction: f64,
}

impl ProjectionFrame {
    /// Build a frame from an explicit plate scale.
    pub fn new(
        center_ra: qtty::Degrees,
        center_dec: qtty::Degrees,
        scale_arcsec_per_px: f64,
        width_px: f64,
        height_px: f64,
    ) -> PlaceResult<Self> {
        if !(scale_arcsec_per_px > 0.0) {
            return Err(PlacementError::invalid_frame(format!(
                "plate scale must be positive, got {}",
                scale_arcsec_per_px
            )));
        }
        if !(width_px > 0.0) || !(height_px > 0.0) {
            return Err(PlacementError::invalid_frame(format!(
                "image dimensions must be positive, got {}x{}",
                width_px, height_px
            )));
        }
        Ok(Self {
            center_ra,
            center_dec,
            scale_arcsec_per_px,
            width_px,
            height_px,
            margin_fraction: DEFAULT_MARGIN_FRACTION,
        })
    }

    /// Build a frame from a field of view instead of a plate scale.
    ///
    /// `scale = fov_deg * 3600 / dimension_px` per axis. When both axes are
    /// given, the two per-axis scales are averaged into one isotropic scale;
    /// this is an approximation valid for small, near-square fields.
    pub fn from_field_of_view(
        center_ra: qtty::Degrees,
        center_dec: qtty::Degrees,
        fov_x_deg: f64,
        fov_y_deg: Option<f64>,
        width_px: f64,
        height_px: f64,
    ) -> PlaceResult<Self> {
        if !(fov_x_deg > 0.0) {
            return Err(PlacementError::invalid_frame(format!(
                "field of view must be positive, got {}",
                fov_x_deg
            )));
        }
        let scale_x = fov_x_deg * 3600.0 / width_px;
        let scale = match fov_y_deg {
            Some(fov_y) if fov_y > 0.0 => {
                let scale_y = fov_y * 3600.0 / height_px;
                (scale_x + scale_y) / 2.0
            }
            _ => scale_x,
        };
        Self::new(center_ra, center_dec, scale, width_px, height_px)
    }

    /// Set a non-default out-of-bounds margin fraction.
    pub fn with_margin_fraction(mut self, margin_fraction: f64) -> PlaceResult<Self> {
        if margin_fraction < 0.0 {
            return Err(PlacementError::invalid_frame(format!(
                "margin fraction must be non-negative, got {}",
                margin_fraction
            )));
        }
        self.margin_fraction = margin_fraction;
        Ok(self)
    }

    /// Margin band in pixels, shared by both axes.
    pub fn margin_px(&self) -> f64 {
        self.width_px.max(self.height_px) * self.margin_fraction
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deg(v: f64) -> qtty::Degrees {
        qtty::Degrees::new(v)
    }

    #[test]
    fn test_new_rejects_bad_parameters() {
        assert!(ProjectionFrame::new(deg(0.0), deg(0.0), 0.0, 100.0, 100.0).is_err());
        assert!(ProjectionFrame::new(deg(0.0), deg(0.0), -1.0, 100.0, 100.0).is_err());
        assert!(ProjectionFrame::new(deg(0.0), deg(0.0), 1.0, 0.0, 100.0).is_err());
        assert!(ProjectionFrame::new(deg(0.0), deg(0.0), f64::NAN, 100.0, 100.0).is_err());
    }

    #[test]
    fn test_scale_from_single_axis_fov() {
        let frame =
            ProjectionFrame::from_field_of_view(deg(10.0), deg(20.0), 2.0, None, 4000.0, 3000.0)
                .unwrap();
        assert!((frame.scale_arcsec_per_px - 1.8).abs() < 1e-9);
    }

    #[test]
    fn test_scale_averages_both_axes() {
        // x: 2.0 deg over 4000 px = 1.8 "/px; y: 1.5 deg over 3000 px = 1.8 "/px
        let frame = ProjectionFrame::from_field_of_view(
            deg(10.0),
            deg(20.0),
            2.0,
            Some(1.5),
            4000.0,
            3000.0,
        )
        .unwrap();
        assert!((frame.scale_arcsec_per_px - 1.8).abs() < 1e-9);

        // asymmetric case averages
        let frame = ProjectionFrame::from_field_of_view(
            deg(10.0),
            deg(20.0),
            2.0,
            Some(1.8),
            4000.0,
            3000.0,
        )
        .unwrap();
        assert!((frame.scale_arcsec_per_px - (1.8 + 2.16) / 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_margin_uses_larger_dimension() {
        let frame = ProjectionFrame::new(deg(0.0), deg(0.0), 1.0, 4000.0, 3000.0).unwrap();
        assert!((frame.margin_px() - 800.0).abs() < 1e-9);
    }

    #[test]
    fn test_margin_fraction_override_and_validation() {
        let frame = ProjectionFrame::new(deg(0.0), deg(0.0), 1.0, 4000.0, 3000.0)
            .unwrap()
            .with_margin_fraction(0.5)
            .unwrap();
        assert!((frame.margin_px() - 2000.0).abs() < 1e-9);

        let frame = ProjectionFrame::new(deg(0.0), deg(0.0), 1.0, 4000.0, 3000.0).unwrap();
        assert!(frame.with_margin_fraction(-0.1).is_err());
    }
}
