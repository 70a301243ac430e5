//! Linear normalization of batch distances into a bounded rendering volume.

use serde::{Deserialize, Serialize};

/// Parameters of the linear distance-to-depth mapping for one batch.
///
/// Recomputed once per batch whenever its objects or the volume depth change.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScalingParameters {
    /// Near boundary, light-years: the batch minimum rounded down to the
    /// nearest multiple of 10.
    pub front_offset_ly: f64,
    /// Batch maximum distance, light-years.
    pub max_distance_ly: f64,
    /// Normalization denominator, light-years. Always positive: degenerate
    /// batches substitute the volume depth.
    pub distance_range_ly: f64,
    /// Depth of the rendering volume, rendering units.
    pub volume_depth: f64,
}

impl ScalingParameters {
    /// Compute scaling parameters for a batch of resolved distances.
    ///
    /// The front offset rounds the nearest distance down to a multiple of 10
    /// light-years, giving a round, slightly-closer-than-nearest near plane.
    /// An empty batch, or one where every object is equidistant, yields the
    /// identity mapping over the volume depth so the divisor is never zero.
    pub fn for_batch(distances_ly: &[f64], volume_depth: f64) -> Self {
        let mut min = f64::MAX;
        let mut max = f64::MIN;
        for &d in distances_ly {
            min = min.min(d);
            max = max.max(d);
        }

        if distances_ly.is_empty() {
            return Self::identity(volume_depth);
        }

        let front_offset_ly = (min / 10.0).floor() * 10.0;
        let distance_range_ly = max - front_offset_ly;
        if distance_range_ly <= 0.0 {
            return Self {
                front_offset_ly: 0.0,
                max_distance_ly: max,
                distance_range_ly: volume_depth,
                volume_depth,
            };
        }

        Self {
            front_offset_ly,
            max_distance_ly: max,
            distance_range_ly,
            volume_depth,
        }
    }

    /// Identity scaling for an empty batch: no offset, range equal to the
    /// volume depth.
    pub fn identity(volume_depth: f64) -> Self {
        Self {
            front_offset_ly: 0.0,
            max_distance_ly: 0.0,
            distance_range_ly: volume_depth,
            volume_depth,
        }
    }

    /// Normalized depth for one distance, clamped into [0, 1].
    pub fn scaled_distance(&self, distance_ly: f64) -> f64 {
        ((distance_ly - self.front_offset_ly) / self.distance_range_ly).clamp(0.0, 1.0)
    }
}
