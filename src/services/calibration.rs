//! Label-keyed calibration overrides: explicit pixel coordinates that preempt
//! computed projection.
//!
//! The store is explicitly owned and passed by reference, with a
//! load/invalidate lifecycle; there is no module-level cache. Reads are pure,
//! writes go through the lock. Precedence is deterministic: a calibration
//! entry wins over both a row-supplied pixel hint and the projector's output
//! for the same label.

use std::collections::HashMap;

use parking_lot::RwLock;

use crate::models::PixelCoord;

/// Mutable mapping from object label to an explicit pixel coordinate.
///
/// Single-writer discipline: batch reads may run concurrently, but callers
/// must not interleave `set`/`remove` with an in-flight batch.
#[derive(Debug, Default)]
pub struct CalibrationStore {
    entries: RwLock<HashMap<String, PixelCoord>>,
}

impl CalibrationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole mapping, e.g. when a session loads a saved
    /// calibration file.
    pub fn load(&self, entries: HashMap<String, PixelCoord>) {
        *self.entries.write() = entries;
    }

    /// Insert or update the override for one label.
    pub fn set(&self, label: impl Into<String>, pixel: PixelCoord) {
        self.entries.write().insert(label.into(), pixel);
    }

    /// Look up the override for a label. Pure and side-effect-free.
    pub fn get(&self, label: &str) -> Option<PixelCoord> {
        self.entries.read().get(label).copied()
    }

    /// Remove the override for one label.
    pub fn remove(&self, label: &str) -> Option<PixelCoord> {
        self.entries.write().remove(label)
    }

    /// Drop every entry, e.g. when the session's image changes.
    pub fn invalidate(&self) {
        self.entries.write().clear();
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}
