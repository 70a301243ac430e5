//! # Skyplace
//!
//! Astrometric placement core for star-field visualization.
//!
//! This crate turns a 2D astronomical image plus catalog measurements (sky
//! position, parallax or distance) into 3D spatial placements for a rendering
//! layer. It owns the numerical pipeline only; upload forms, scene
//! construction, and image handling live elsewhere and consume the placement
//! records this crate produces.
//!
//! ## Pipeline
//!
//! - **Distance resolution**: parallax or catalog distance to a canonical
//!   [`models::DistanceRecord`], with local-catalog and remote-catalog
//!   fallbacks
//! - **Projection**: equatorial RA/Dec to image-pixel coordinates via a
//!   tangent-plane (gnomonic) projection
//! - **Calibration overrides**: label-keyed explicit pixel coordinates that
//!   preempt computed projection
//! - **Depth scaling**: linear normalization of a batch's distances into a
//!   bounded rendering-volume depth
//!
//! ## Architecture
//!
//! The crate is organized into several logical modules:
//!
//! - [`api`]: identifier newtypes and batch output types
//! - [`models`]: domain types (objects, frames, distances, scaling)
//! - [`catalog`]: local static catalog and rate-limited remote lookups
//! - [`services`]: resolver, projector, calibration store, scaler, and the
//!   batch placement pipeline
//! - [`ingest`]: CSV import with canonical-schema normalization

pub mod api;
pub mod catalog;
pub mod error;
pub mod ingest;
pub mod models;
pub mod services;

pub use error::{PlaceResult, PlacementError};
