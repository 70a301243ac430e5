//! Tangent-plane (gnomonic) projection of equatorial coordinates onto image
//! pixels.
//!
//! The projection plane is tangent to the celestial sphere at the frame
//! center. Points 90 degrees or more from the center have no image on the
//! plane: the denominator of the projection reaches zero at 90 degrees and
//! goes negative beyond it, where the ray would pass through the sphere and
//! land on a wrong pixel. The projector reports a singularity for the whole
//! region instead of returning a wild coordinate.

use crate::error::{PlaceResult, PlacementError};
use crate::models::{PixelCoord, ProjectionFrame};

/// Arcseconds per radian (180 * 3600 / pi, to catalog precision).
pub const ARCSEC_PER_RADIAN: f64 = 206265.0;

/// Denominator threshold below which the tangent plane is undefined.
const SINGULARITY_EPS: f64 = 1e-10;

/// Normalize an RA difference into (-180, 180] degrees.
///
/// Keeps objects on either side of the 0/360 seam close to a center near the
/// seam, instead of 360 degrees away.
fn normalize_ra_diff(mut diff_deg: f64) -> f64 {
    while diff_deg <= -180.0 {
        diff_deg += 360.0;
    }
    while diff_deg > 180.0 {
        diff_deg -= 360.0;
    }
    diff_deg
}

/// Project equatorial coordinates onto the frame's pixel grid.
///
/// Returns an in-bounds pixel (clamped into `[0, dimension]` on each axis),
/// or fails with [`PlacementError::ProjectionSingularity`] when the tangent
/// plane is undefined for the coordinates, or
/// [`PlacementError::OutOfBounds`] when the raw pixel lies outside the
/// frame's margin band. A silently wrong coordinate is never returned.
pub fn project(
    frame: &ProjectionFrame,
    ra: qtty::Degrees,
    dec: qtty::Degrees,
) -> PlaceResult<PixelCoord> {
    let ra_diff_rad = normalize_ra_diff(ra.value() - frame.center_ra.value()).to_radians();
    let dec_rad = dec.value().to_radians();
    let center_dec_rad = frame.center_dec.value().to_radians();

    let a = dec_rad.cos() * ra_diff_rad.cos();
    let denominator = center_dec_rad.sin() * dec_rad.sin() + center_dec_rad.cos() * a;
    // A non-positive denominator means the point is on or beyond the great
    // circle 90 degrees from the center: it has no image on the tangent
    // plane, and dividing by it would project through the sphere onto a
    // plausible-looking but wrong pixel.
    if denominator < SINGULARITY_EPS {
        return Err(PlacementError::ProjectionSingularity {
            ra_deg: ra.value(),
            dec_deg: dec.value(),
        });
    }

    let x_rad = -(dec_rad.cos() * ra_diff_rad.sin()) / denominator;
    let y_rad = (center_dec_rad.cos() * dec_rad.sin() - center_dec_rad.sin() * a) / denominator;

    let x_px = frame.width_px / 2.0 + x_rad * ARCSEC_PER_RADIAN / frame.scale_arcsec_per_px;
    // Pixel Y increases downward while Dec increases upward, hence the flip.
    let y_px = frame.height_px / 2.0 - y_rad * ARCSEC_PER_RADIAN / frame.scale_arcsec_per_px;

    let margin = frame.margin_px();
    if x_px < -margin
        || x_px > frame.width_px + margin
        || y_px < -margin
        || y_px > frame.height_px + margin
    {
        return Err(PlacementError::OutOfBounds { x: x_px, y: y_px });
    }

    Ok(PixelCoord::new(
        x_px.clamp(0.0, frame.width_px),
        y_px.clamp(0.0, frame.height_px),
    ))
}
