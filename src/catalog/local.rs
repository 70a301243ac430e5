//! In-process static catalog used as a low-latency fallback.
//!
//! Explicitly owned and passed by reference, with a load/invalidate
//! lifecycle. Keyed by Hipparcos catalog number.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::api::CatalogId;

/// Position and parallax for one catalog entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalCatalogEntry {
    pub ra: qtty::Degrees,
    pub dec: qtty::Degrees,
    /// Parallax in milliarcseconds, when the table carries one.
    pub parallax_mas: Option<f64>,
}

/// Static identifier-keyed catalog table.
#[derive(Debug, Default)]
pub struct LocalCatalog {
    entries: HashMap<CatalogId, LocalCatalogEntry>,
}

impl LocalCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// A small bright-star table (Hipparcos numbers, ICRS positions, and
    /// catalog parallaxes) for sessions with no loaded table of their own.
    pub fn with_bright_stars() -> Self {
        let mut catalog = Self::new();
        let rows: &[(i64, f64, f64, f64)] = &[
            // (HIP, ra_deg, dec_deg, parallax_mas)
            (32349, 101.2872, -16.7161, 379.21),  // Sirius
            (30438, 95.9880, -52.6957, 10.55),    // Canopus
            (71683, 219.9021, -60.8340, 754.81),  // Alpha Cen A
            (69673, 213.9154, 19.1825, 88.83),    // Arcturus
            (91262, 279.2347, 38.7837, 130.23),   // Vega
            (37279, 114.8255, 5.2250, 284.56),    // Procyon
            (24436, 78.6345, -8.2016, 3.78),      // Rigel
            (27989, 88.7929, 7.4071, 6.55),       // Betelgeuse
            (70890, 217.4289, -62.6795, 768.07),  // Proxima Cen
            (87937, 269.4521, 4.6934, 546.98),    // Barnard's Star
            (104214, 316.7248, 38.7494, 287.18),  // 61 Cygni A
            (8102, 26.0170, -15.9375, 273.96),    // Tau Ceti
        ];
        for &(hip, ra, dec, parallax) in rows {
            catalog.insert(
                CatalogId::new(hip),
                LocalCatalogEntry {
                    ra: qtty::Degrees::new(ra),
                    dec: qtty::Degrees::new(dec),
                    parallax_mas: Some(parallax),
                },
            );
        }
        catalog
    }

    /// Replace the whole table.
    pub fn load(&mut self, entries: HashMap<CatalogId, LocalCatalogEntry>) {
        self.entries = entries;
    }

    pub fn insert(&mut self, id: CatalogId, entry: LocalCatalogEntry) {
        self.entries.insert(id, entry);
    }

    pub fn get(&self, id: CatalogId) -> Option<&LocalCatalogEntry> {
        self.entries.get(&id)
    }

    /// Drop every entry.
    pub fn invalidate(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
