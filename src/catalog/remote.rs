//! Remote catalog client and free-text response parsing.
//!
//! The remote service answers identifier queries with free-form text. Fields
//! of interest are extracted by fixed-format scanning of labeled lines:
//!
//! ```text
//! Parallax: 768.07 mas
//! RA(ICRS) : 14 29 42.94
//! Dec(ICRS) : -62 40 46.1
//! ```
//!
//! A response missing the expected pattern is "not found", never a parse
//! error that would abort a batch.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::api::CatalogId;

/// Fields extracted from one remote catalog response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RemoteRecord {
    pub parallax_mas: Option<f64>,
    pub ra: Option<qtty::Degrees>,
    pub dec: Option<qtty::Degrees>,
}

impl RemoteRecord {
    fn is_empty(&self) -> bool {
        self.parallax_mas.is_none() && self.ra.is_none() && self.dec.is_none()
    }
}

/// Identifier lookup against a remote catalog service.
///
/// `Ok(None)` means the service had no usable answer for the identifier;
/// `Err` is reserved for transport failures.
#[async_trait]
pub trait RemoteCatalog: Send + Sync {
    async fn lookup(&self, id: CatalogId) -> Result<Option<RemoteRecord>>;
}

/// HTTP client for a SIMBAD-style identifier query endpoint.
#[derive(Debug, Clone)]
pub struct HttpRemoteCatalog {
    client: reqwest::Client,
    base_url: String,
}

impl HttpRemoteCatalog {
    /// Build a client for the given query endpoint. The per-request timeout
    /// is a transport ceiling; the lookup queue applies its own per-object
    /// deadline on top.
    pub fn new(base_url: impl Into<String>, request_timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(request_timeout)
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }
}

#[async_trait]
impl RemoteCatalog for HttpRemoteCatalog {
    async fn lookup(&self, id: CatalogId) -> Result<Option<RemoteRecord>> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("Ident", format!("HIP {}", id.value())),
                ("output.format", "ASCII".to_string()),
            ])
            .send()
            .await
            .with_context(|| format!("catalog request failed for {}", id))?;

        let body = response
            .text()
            .await
            .with_context(|| format!("catalog response unreadable for {}", id))?;

        Ok(parse_catalog_response(&body))
    }
}

/// Extract parallax and ICRS coordinates from a free-text catalog response.
///
/// Returns `None` when nothing recognizable is present.
pub fn parse_catalog_response(body: &str) -> Option<RemoteRecord> {
    let mut record = RemoteRecord::default();

    for line in body.lines() {
        if record.parallax_mas.is_none() && line.contains("Parallax") && line.contains("mas") {
            record.parallax_mas = first_number(line);
        }
        if record.ra.is_none() && line.contains("RA(ICRS)") {
            record.ra = parse_hms(line).map(|(h, m, s)| {
                qtty::Degrees::new((h + m / 60.0 + s / 3600.0) * 15.0)
            });
        }
        if record.dec.is_none() && line.contains("Dec(ICRS)") {
            record.dec = parse_hms(line).map(|(d, m, s)| {
                let sign = if d.is_sign_negative() { -1.0 } else { 1.0 };
                qtty::Degrees::new(sign * (d.abs() + m / 60.0 + s / 3600.0))
            });
        }
    }

    if record.is_empty() {
        None
    } else {
        Some(record)
    }
}

/// First whitespace-separated token after the label that parses as a number.
fn first_number(line: &str) -> Option<f64> {
    let after_label = line.split_once(':').map(|(_, rest)| rest).unwrap_or(line);
    after_label
        .split_whitespace()
        .find_map(|token| token.parse::<f64>().ok())
}

/// Three numeric sexagesimal components after the label.
fn parse_hms(line: &str) -> Option<(f64, f64, f64)> {
    let after_label = line.split_once(':').map(|(_, rest)| rest)?;
    let mut numbers = after_label
        .split_whitespace()
        .filter_map(|token| token.parse::<f64>().ok());
    Some((numbers.next()?, numbers.next()?, numbers.next()?))
}
