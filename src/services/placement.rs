//! Batch placement pipeline: fallback-chain resolution, projection, and
//! depth scaling for a whole import.
//!
//! Per object, first match wins:
//!
//! 1. calibration override (pixel placement only; distance is still resolved
//!    for display)
//! 2. row-supplied pixel coordinate (same: placement only)
//! 3. local parallax/distance fields
//! 4. local static catalog by identifier
//! 5. remote catalog by identifier, rate-limited and sequential
//! 6. drop the object and report the failure
//!
//! Every failure is per-object and non-fatal; the batch is fatal only when
//! zero objects survive.

use std::collections::HashMap;

use log::warn;

use crate::api::{BatchOutcome, CatalogId, PlacementRecord};
use crate::catalog::local::LocalCatalog;
use crate::catalog::queue::{LookupOutcome, LookupQueue};
use crate::catalog::remote::RemoteCatalog;
use crate::error::{PlaceResult, PlacementError};
use crate::models::{CelestialObject, DistanceRecord, PixelCoord, ProjectionFrame, ScalingParameters};
use crate::services::calibration::CalibrationStore;
use crate::services::projector;
use crate::services::resolver;

/// Remote fallback tier: the catalog client plus the queue that throttles it.
pub struct RemoteTier<'a> {
    pub catalog: &'a dyn RemoteCatalog,
    pub queue: &'a LookupQueue,
}

/// Place a whole batch of objects into the frame and rendering volume.
///
/// Objects whose distance cannot be resolved, or whose projection is
/// singular or out of bounds, are dropped and reported in
/// [`BatchOutcome::dropped`]; the rest of the batch proceeds. Surviving
/// placements come back nearest-first. An empty input yields an empty
/// outcome with identity scaling; a non-empty input with zero survivors
/// fails with [`PlacementError::EmptyBatch`].
pub async fn place_batch(
    objects: &[CelestialObject],
    frame: &ProjectionFrame,
    calibration: &CalibrationStore,
    local_catalog: &LocalCatalog,
    remote: Option<RemoteTier<'_>>,
    volume_depth: f64,
) -> PlaceResult<BatchOutcome> {
    if objects.is_empty() {
        return Ok(BatchOutcome {
            placements: Vec::new(),
            dropped: Vec::new(),
            scaling: ScalingParameters::identity(volume_depth),
        });
    }

    // First pass: resolve distances from local data, collecting the ids that
    // need the remote tier. Remote lookups run afterwards as one sequential,
    // rate-limited pass in input order.
    let mut local_distances: HashMap<CatalogId, DistanceRecord> = HashMap::new();
    let mut unresolved: Vec<CatalogId> = Vec::new();
    for object in objects {
        if let Ok(record) = resolver::resolve_distance(object) {
            local_distances.insert(object.id, record);
        } else if let Some(record) = resolver::resolve_from_local_catalog(object.id, local_catalog)
        {
            local_distances.insert(object.id, record);
        } else {
            unresolved.push(object.id);
        }
    }

    let mut remote_outcomes: HashMap<CatalogId, LookupOutcome> = HashMap::new();
    if !unresolved.is_empty() {
        if let Some(tier) = &remote {
            for (id, outcome) in tier.queue.run(tier.catalog, &unresolved).await {
                remote_outcomes.insert(id, outcome);
            }
        }
    }

    let mut dropped: Vec<(CatalogId, PlacementError)> = Vec::new();
    let mut placed: Vec<(CelestialObject, DistanceRecord, PixelCoord)> = Vec::new();

    for object in objects {
        let (distance, remote_position) = match resolve_with_remote(
            object,
            &local_distances,
            &remote_outcomes,
        ) {
            Ok(resolved) => resolved,
            Err(err) => {
                warn!("dropping object {}: {}", object.id, err);
                dropped.push((object.id, err));
                continue;
            }
        };

        // Calibration wins over the row's own pixel hint, which wins over
        // computed projection.
        let pixel = if let Some(pixel) = calibration.get(&object.label) {
            Ok(pixel)
        } else if let Some(pixel) = object.pixel_hint {
            Ok(pixel)
        } else {
            let (ra, dec) = remote_position.unwrap_or((object.ra, object.dec));
            projector::project(frame, ra, dec)
        };

        match pixel {
            Ok(pixel) => placed.push((object.clone(), distance, pixel)),
            Err(err) => {
                warn!("dropping object {}: {}", object.id, err);
                dropped.push((object.id, err));
            }
        }
    }

    if placed.is_empty() {
        return Err(PlacementError::EmptyBatch);
    }

    let distances_ly: Vec<f64> = placed.iter().map(|(_, d, _)| d.light_years).collect();
    let scaling = ScalingParameters::for_batch(&distances_ly, volume_depth);

    let mut placements: Vec<PlacementRecord> = placed
        .into_iter()
        .map(|(object, distance, pixel)| PlacementRecord {
            id: object.id,
            pixel,
            scaled_distance: scaling.scaled_distance(distance.light_years),
            distance,
        })
        .collect();

    // Nearest-first for consistent depth ordering downstream.
    placements.sort_by(|a, b| {
        a.distance
            .light_years
            .partial_cmp(&b.distance.light_years)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    Ok(BatchOutcome {
        placements,
        dropped,
        scaling,
    })
}

type RemotePosition = Option<(qtty::Degrees, qtty::Degrees)>;

/// Second-pass resolution: local results, then the remote outcome for ids
/// that needed it.
///
/// A remote record may also carry catalog coordinates; those are preferred
/// for projection over the row's own, since the row evidently had no usable
/// measurements for this object.
fn resolve_with_remote(
    object: &CelestialObject,
    local_distances: &HashMap<CatalogId, DistanceRecord>,
    remote_outcomes: &HashMap<CatalogId, LookupOutcome>,
) -> PlaceResult<(DistanceRecord, RemotePosition)> {
    if let Some(record) = local_distances.get(&object.id) {
        return Ok((*record, None));
    }

    match remote_outcomes.get(&object.id) {
        Some(LookupOutcome::Found(remote_record)) => {
            match resolver::resolve_from_remote_record(remote_record) {
                Some(distance) => {
                    let position = remote_record.ra.zip(remote_record.dec);
                    Ok((distance, position))
                }
                None => Err(PlacementError::NotResolvable { id: object.id }),
            }
        }
        Some(LookupOutcome::TimedOut) => Err(PlacementError::RemoteLookupTimeout { id: object.id }),
        Some(LookupOutcome::NotFound) | None => {
            Err(PlacementError::NotResolvable { id: object.id })
        }
    }
}
