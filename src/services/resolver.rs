//! Distance resolution from parallax, supplied distance, or catalog lookup.

use crate::api::CatalogId;
use crate::catalog::local::LocalCatalog;
use crate::catalog::remote::RemoteRecord;
use crate::error::{PlaceResult, PlacementError};
use crate::models::{CelestialObject, DistanceRecord};

/// Resolve a distance from the object's own fields.
///
/// A positive parallax wins over a supplied distance; a non-positive
/// parallax carries no distance information and falls through. Fails with
/// [`PlacementError::NotResolvable`] when neither field is usable.
pub fn resolve_distance(object: &CelestialObject) -> PlaceResult<DistanceRecord> {
    if let Some(record) = object.parallax_mas.and_then(DistanceRecord::from_parallax_mas) {
        return Ok(record);
    }
    if let Some(parsecs) = object.distance_pc {
        if parsecs > 0.0 {
            return Ok(DistanceRecord::from_parsecs(parsecs));
        }
    }
    Err(PlacementError::NotResolvable { id: object.id })
}

/// Resolve a distance from the local static catalog.
pub fn resolve_from_local_catalog(
    id: CatalogId,
    catalog: &LocalCatalog,
) -> Option<DistanceRecord> {
    catalog
        .get(id)?
        .parallax_mas
        .and_then(DistanceRecord::from_parallax_mas)
}

/// Resolve a distance from a remote catalog record.
pub fn resolve_from_remote_record(record: &RemoteRecord) -> Option<DistanceRecord> {
    record
        .parallax_mas
        .and_then(DistanceRecord::from_parallax_mas)
}
