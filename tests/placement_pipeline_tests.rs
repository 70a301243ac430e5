//! End-to-end pipeline tests: CSV import, catalog fallbacks, projection,
//! and depth scaling working together.

use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;

use skyplace::api::CatalogId;
use skyplace::catalog::{LocalCatalog, LookupQueue, RemoteCatalog, RemoteRecord};
use skyplace::ingest::{import_csv, ImportOptions};
use skyplace::models::{CelestialObject, ProjectionFrame, RaUnit, ScalingParameters};
use skyplace::services::{place_batch, CalibrationStore, RemoteTier};
use skyplace::PlacementError;

fn deg(v: f64) -> qtty::Degrees {
    qtty::Degrees::new(v)
}

/// Remote catalog stub answering from a fixed script.
struct FixedCatalog;

#[async_trait]
impl RemoteCatalog for FixedCatalog {
    async fn lookup(&self, id: CatalogId) -> Result<Option<RemoteRecord>> {
        match id.value() {
            70890 => Ok(Some(RemoteRecord {
                parallax_mas: Some(768.07),
                ra: Some(deg(217.4289)),
                dec: Some(deg(-62.6795)),
            })),
            _ => Ok(None),
        }
    }
}

#[tokio::test]
async fn test_csv_to_placements_end_to_end() {
    let csv = "\
hip,name,ra,dec,parallax,mag,ra_h,ra_m,ra_s,dec_sign,dec_d,dec_m,dec_s,scale
1001,Near,2.05,29.04,100.0,3.2,0,8,36,+,29,3,43.2,1.825
1002,Far,2.10,29.00,5.0,7.7,,,,,,,,
1003,Broken,2.20,29.10,,,,,,,,,,
";
    let report = import_csv(
        csv.as_bytes(),
        ImportOptions {
            ra_unit: RaUnit::Degrees,
        },
    )
    .unwrap();
    assert_eq!(report.objects.len(), 3);

    let frame = report.frame.unwrap().to_frame(4000.0, 3000.0).unwrap();
    assert!((frame.center_ra.value() - 2.15).abs() < 1e-9);

    let outcome = place_batch(
        &report.objects,
        &frame,
        &CalibrationStore::new(),
        &LocalCatalog::new(),
        None,
        1000.0,
    )
    .await
    .unwrap();

    // Broken has no distance data and no catalog match
    assert_eq!(outcome.placements.len(), 2);
    assert_eq!(outcome.dropped.len(), 1);
    assert_eq!(outcome.dropped[0].0, CatalogId::new(1003));

    // nearest-first: 10 pc before 200 pc
    assert_eq!(outcome.placements[0].id, CatalogId::new(1001));
    assert!((outcome.placements[0].distance.parsecs - 10.0).abs() < 1e-9);
    assert!(outcome.placements[0].scaled_distance <= outcome.placements[1].scaled_distance);

    // every pixel is inside the frame
    for placement in &outcome.placements {
        assert!((0.0..=4000.0).contains(&placement.pixel.x));
        assert!((0.0..=3000.0).contains(&placement.pixel.y));
    }
}

#[tokio::test]
async fn test_remote_tier_supplies_distance_and_position() {
    // Row carries an identifier and rough coordinates but no distance data,
    // and the local catalog is empty: only the remote tier can resolve it.
    let mut object = CelestialObject::new(CatalogId::new(70890), deg(217.4), deg(-62.7));
    object.label = "Proxima".to_string();

    let frame = ProjectionFrame::new(deg(217.4289), deg(-62.6795), 2.0, 2000.0, 2000.0).unwrap();
    let queue = LookupQueue::new(Duration::from_millis(1), Duration::from_secs(5));

    let outcome = place_batch(
        std::slice::from_ref(&object),
        &frame,
        &CalibrationStore::new(),
        &LocalCatalog::new(),
        Some(RemoteTier {
            catalog: &FixedCatalog,
            queue: &queue,
        }),
        1000.0,
    )
    .await
    .unwrap();

    let placement = &outcome.placements[0];
    assert!((placement.distance.parsecs - 1000.0 / 768.07).abs() < 1e-6);

    // The remote catalog position matches the frame center exactly, so the
    // placement must land on the image center, not wherever the row's rough
    // coordinates would project.
    assert!((placement.pixel.x - 1000.0).abs() < 1e-6);
    assert!((placement.pixel.y - 1000.0).abs() < 1e-6);
}

#[tokio::test]
async fn test_remote_miss_drops_object() {
    let object = CelestialObject::new(CatalogId::new(555), deg(10.0), deg(10.0));
    let frame = ProjectionFrame::new(deg(10.0), deg(10.0), 2.0, 2000.0, 2000.0).unwrap();
    let queue = LookupQueue::new(Duration::from_millis(1), Duration::from_secs(5));

    let err = place_batch(
        std::slice::from_ref(&object),
        &frame,
        &CalibrationStore::new(),
        &LocalCatalog::new(),
        Some(RemoteTier {
            catalog: &FixedCatalog,
            queue: &queue,
        }),
        1000.0,
    )
    .await
    .unwrap_err();

    assert_eq!(err, PlacementError::EmptyBatch);
}

#[test]
fn test_import_from_file_on_disk() {
    use std::io::Write;

    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "hip,ra,dec,parallax\n70890,217.4289,-62.6795,768.07\n").unwrap();

    let report = skyplace::ingest::import_csv_file(
        file.path(),
        ImportOptions {
            ra_unit: RaUnit::Degrees,
        },
    )
    .unwrap();

    assert_eq!(report.objects.len(), 1);
    assert!((report.objects[0].parallax_mas.unwrap() - 768.07).abs() < 1e-9);
}

mod depth_ordering {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// The nearest object never scales deeper than any farther object,
        /// and every scaled depth stays inside [0, 1].
        #[test]
        fn scaled_depth_is_monotonic(
            distances in proptest::collection::vec(0.1f64..100_000.0, 1..50),
            volume_depth in 1.0f64..10_000.0,
        ) {
            let params = ScalingParameters::for_batch(&distances, volume_depth);

            let mut sorted = distances.clone();
            sorted.sort_by(|a, b| a.partial_cmp(b).unwrap());

            let scaled: Vec<f64> =
                sorted.iter().map(|&d| params.scaled_distance(d)).collect();
            for pair in scaled.windows(2) {
                prop_assert!(pair[0] <= pair[1]);
            }
            for s in scaled {
                prop_assert!((0.0..=1.0).contains(&s));
            }
        }
    }
}
