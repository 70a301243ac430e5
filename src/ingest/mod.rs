//! Tabular import: CSV rows to domain objects plus frame metadata.

pub mod csv;
pub mod sexagesimal;

pub use csv::{import_csv, import_csv_file, FrameMetadata, ImportOptions, ImportReport};
pub use sexagesimal::{dms_to_degrees, hms_to_degrees};
