//! CSV import of per-object rows and first-row frame metadata.
//!
//! Header names vary across exports (`HIP`, `Hip`, `hip`, ...), so the
//! importer normalizes the header row against an explicit alias table once,
//! before any row is read; nothing downstream ever probes alternative field
//! names. Malformed rows are skipped with a diagnostic and counted, never
//! fatal.

use std::collections::HashMap;
use std::io::Read;

use anyhow::{Context, Result};
use log::warn;

use crate::api::CatalogId;
use crate::error::{PlaceResult, PlacementError};
use crate::ingest::sexagesimal::{dms_to_degrees, hms_to_degrees};
use crate::models::{CelestialObject, PixelCoord, ProjectionFrame, RaUnit};

/// Canonical column names and the header aliases that map to them.
const HEADER_ALIASES: &[(&str, &[&str])] = &[
    ("hip", &["hip", "id", "identifier", "catalog_id"]),
    ("label", &["label", "name", "object", "star"]),
    ("ra", &["ra", "right_ascension", "ra_deg"]),
    ("dec", &["dec", "declination", "dec_deg"]),
    ("distance_pc", &["distance", "distance_pc", "dist"]),
    ("parallax_mas", &["parallax", "parallax_mas", "plx"]),
    ("magnitude", &["magnitude", "mag", "vmag"]),
    ("pixel_x", &["pixel_x", "x", "px"]),
    ("pixel_y", &["pixel_y", "y", "py"]),
    ("image", &["image", "image_file", "filename"]),
    ("image_small", &["image_small", "thumbnail", "preview"]),
    ("center_ra_h", &["center_ra_h", "ra_h"]),
    ("center_ra_m", &["center_ra_m", "ra_m"]),
    ("center_ra_s", &["center_ra_s", "ra_s"]),
    ("center_dec_sign", &["center_dec_sign", "dec_sign"]),
    ("center_dec_d", &["center_dec_d", "dec_d"]),
    ("center_dec_m", &["center_dec_m", "dec_m"]),
    ("center_dec_s", &["center_dec_s", "dec_s"]),
    ("scale", &["scale", "plate_scale", "arcsec_per_pixel"]),
    ("fov_deg", &["fov", "fov_deg", "field_of_view"]),
    ("fov_y_deg", &["fov_y", "fov_y_deg"]),
];

/// Import options. The RA unit is a required declaration: values below 24
/// are ambiguous between hours and degrees, so the importer never guesses.
#[derive(Debug, Clone, Copy)]
pub struct ImportOptions {
    pub ra_unit: RaUnit,
}

/// Frame description carried on the first data row.
///
/// Image pixel dimensions belong to the decoded image, not the table, so
/// the metadata converts into a [`ProjectionFrame`] only once the caller
/// supplies them.
#[derive(Debug, Clone)]
pub struct FrameMetadata {
    pub image: Option<String>,
    pub image_small: Option<String>,
    pub center_ra: qtty::Degrees,
    pub center_dec: qtty::Degrees,
    pub scale_arcsec_per_px: Option<f64>,
    pub fov_deg: Option<f64>,
    pub fov_y_deg: Option<f64>,
}

impl FrameMetadata {
    /// Build the projection frame for an image of the given pixel size.
    ///
    /// An explicit plate scale wins over a field of view.
    pub fn to_frame(&self, width_px: f64, height_px: f64) -> PlaceResult<ProjectionFrame> {
        if let Some(scale) = self.scale_arcsec_per_px {
            return ProjectionFrame::new(self.center_ra, self.center_dec, scale, width_px, height_px);
        }
        if let Some(fov) = self.fov_deg {
            return ProjectionFrame::from_field_of_view(
                self.center_ra,
                self.center_dec,
                fov,
                self.fov_y_deg,
                width_px,
                height_px,
            );
        }
        Err(PlacementError::invalid_frame(
            "table carries neither a plate scale nor a field of view",
        ))
    }
}

/// Result of one CSV import.
#[derive(Debug)]
pub struct ImportReport {
    pub objects: Vec<CelestialObject>,
    pub frame: Option<FrameMetadata>,
    /// Rows dropped by validation, for the caller's diagnostics.
    pub skipped_rows: usize,
}

/// Map each canonical column to its index in the header row.
///
/// Matching is case-insensitive and runs once per import; this is the only
/// place aliases exist.
fn normalize_headers(headers: &csv::StringRecord) -> HashMap<&'static str, usize> {
    let mut columns = HashMap::new();
    for (index, raw) in headers.iter().enumerate() {
        let lowered = raw.trim().to_ascii_lowercase();
        for (canonical, aliases) in HEADER_ALIASES {
            if aliases.contains(&lowered.as_str()) {
                columns.entry(*canonical).or_insert(index);
            }
        }
    }
    columns
}

fn field<'r>(
    record: &'r csv::StringRecord,
    columns: &HashMap<&'static str, usize>,
    name: &'static str,
) -> Option<&'r str> {
    let value = record.get(*columns.get(name)?)?.trim();
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

fn numeric_field(
    record: &csv::StringRecord,
    columns: &HashMap<&'static str, usize>,
    name: &'static str,
) -> Option<f64> {
    field(record, columns, name)?.parse().ok()
}

/// Read objects and frame metadata from CSV.
///
/// Frame metadata is taken from the first data row only; object fields are
/// read from every row. Rows without a parseable identifier, or without any
/// position or pixel coordinate, are skipped with a warning.
pub fn import_csv<R: Read>(reader: R, options: ImportOptions) -> Result<ImportReport> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader
        .headers()
        .context("CSV header row unreadable")?
        .clone();
    let columns = normalize_headers(&headers);

    let mut objects = Vec::new();
    let mut frame = None;
    let mut skipped_rows = 0;

    for (row_index, record) in csv_reader.records().enumerate() {
        let record = match record {
            Ok(record) => record,
            Err(err) => {
                warn!("skipping unreadable CSV row {}: {}", row_index + 2, err);
                skipped_rows += 1;
                continue;
            }
        };

        if row_index == 0 {
            frame = parse_frame_metadata(&record, &columns);
        }

        match parse_object_row(&record, &columns, options) {
            Some(object) => objects.push(object),
            None => {
                warn!("skipping malformed CSV row {}", row_index + 2);
                skipped_rows += 1;
            }
        }
    }

    Ok(ImportReport {
        objects,
        frame,
        skipped_rows,
    })
}

/// Read objects and frame metadata from a CSV file on disk.
pub fn import_csv_file(path: &std::path::Path, options: ImportOptions) -> Result<ImportReport> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("failed to open CSV file {}", path.display()))?;
    import_csv(file, options)
}

fn parse_object_row(
    record: &csv::StringRecord,
    columns: &HashMap<&'static str, usize>,
    options: ImportOptions,
) -> Option<CelestialObject> {
    let id = CatalogId::new(field(record, columns, "hip")?.parse().ok()?);

    let ra = numeric_field(record, columns, "ra").map(|v| options.ra_unit.to_degrees(v));
    let dec = numeric_field(record, columns, "dec").map(qtty::Degrees::new);

    let pixel_hint = match (
        numeric_field(record, columns, "pixel_x"),
        numeric_field(record, columns, "pixel_y"),
    ) {
        (Some(x), Some(y)) => Some(PixelCoord::new(x, y)),
        _ => None,
    };

    // A row is placeable only if it has a sky position or pins its own
    // pixel; otherwise nothing downstream can use it.
    let (ra, dec) = match (ra, dec) {
        (Some(ra), Some(dec)) => (ra, dec),
        _ if pixel_hint.is_some() => (qtty::Degrees::new(0.0), qtty::Degrees::new(0.0)),
        _ => return None,
    };

    let mut object = CelestialObject::new(id, ra, dec);
    if let Some(label) = field(record, columns, "label") {
        object.label = label.to_string();
    }
    object.magnitude = numeric_field(record, columns, "magnitude");
    object.parallax_mas = numeric_field(record, columns, "parallax_mas");
    object.distance_pc = numeric_field(record, columns, "distance_pc");
    object.pixel_hint = pixel_hint;
    Some(object)
}

fn parse_frame_metadata(
    record: &csv::StringRecord,
    columns: &HashMap<&'static str, usize>,
) -> Option<FrameMetadata> {
    let ra_h = numeric_field(record, columns, "center_ra_h")?;
    let ra_m = numeric_field(record, columns, "center_ra_m")?;
    let ra_s = numeric_field(record, columns, "center_ra_s")?;
    let dec_negative = field(record, columns, "center_dec_sign")
        .map(|sign| sign.starts_with('-'))
        .unwrap_or(false);
    let dec_d = numeric_field(record, columns, "center_dec_d")?;
    let dec_m = numeric_field(record, columns, "center_dec_m")?;
    let dec_s = numeric_field(record, columns, "center_dec_s")?;

    Some(FrameMetadata {
        image: field(record, columns, "image").map(str::to_string),
        image_small: field(record, columns, "image_small").map(str::to_string),
        center_ra: hms_to_degrees(ra_h, ra_m, ra_s),
        center_dec: dms_to_degrees(dec_negative, dec_d, dec_m, dec_s),
        scale_arcsec_per_px: numeric_field(record, columns, "scale"),
        fov_deg: numeric_field(record, columns, "fov_deg"),
        fov_y_deg: numeric_field(record, columns, "fov_y_deg"),
    })
}
