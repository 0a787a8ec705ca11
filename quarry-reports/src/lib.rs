//! Shared models and helpers for the reservation report binaries.
//!
//! Every binary in this crate reads one reservation-export JSON document
//! from stdin and prints a plain-text summary to stdout. The export shape
//! is `{ data: { reservations: [...] }, pagination: { totalCount } }` with
//! camelCase record fields; every field is tolerant of absence or null so a
//! partial export still produces a report instead of a parse error.

use anyhow::{Context, Result};
use chrono::{DateTime, FixedOffset};
use serde::Deserialize;
use std::collections::HashMap;
use std::io::Read;

/// Top-level export document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReservationExport {
    #[serde(default)]
    pub data: ExportData,
    #[serde(default)]
    pub pagination: Pagination,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExportData {
    #[serde(default)]
    pub reservations: Vec<Reservation>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    #[serde(default)]
    pub total_count: u64,
}

/// One reservation record. Dates are kept as the export's ISO-8601 strings;
/// reports slice prefixes for display and parse only when they need to
/// compare.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub external_id: Option<String>,
    #[serde(default)]
    pub resource_id: Option<String>,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub resource: Option<NamedRef>,
    #[serde(default)]
    pub pet: Option<NamedRef>,
}

/// A nested `{ "name": ... }` reference.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NamedRef {
    #[serde(default)]
    pub name: Option<String>,
}

impl Reservation {
    /// The linked resource's name, or the given fallback.
    pub fn resource_name<'a>(&'a self, fallback: &'a str) -> &'a str {
        named(&self.resource, fallback)
    }

    /// The linked pet's name, or the given fallback.
    pub fn pet_name<'a>(&'a self, fallback: &'a str) -> &'a str {
        named(&self.pet, fallback)
    }

    /// Whether this record was imported from an external system.
    pub fn is_imported(&self) -> bool {
        self.external_id.as_deref().is_some_and(|id| !id.is_empty())
    }

    /// `resource_id` when present and non-empty.
    pub fn resource_id(&self) -> Option<&str> {
        self.resource_id.as_deref().filter(|id| !id.is_empty())
    }

    /// Start date parsed as an ISO-8601 timestamp, when parseable.
    pub fn start(&self) -> Option<DateTime<FixedOffset>> {
        DateTime::parse_from_rfc3339(&self.start_date).ok()
    }
}

fn named<'a>(reference: &'a Option<NamedRef>, fallback: &'a str) -> &'a str {
    reference
        .as_ref()
        .and_then(|r| r.name.as_deref())
        .unwrap_or(fallback)
}

/// Parse an export document from a reader.
pub fn read_export(reader: impl Read) -> Result<ReservationExport> {
    serde_json::from_reader(reader).context("failed to parse reservation export from stdin")
}

/// First `n` characters of a string (whole string when shorter).
pub fn prefix(s: &str, n: usize) -> &str {
    match s.char_indices().nth(n) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// The `YYYY-MM-DD` part of an ISO-8601 timestamp string.
pub fn date_part(s: &str) -> &str {
    prefix(s, 10)
}

/// Occurrence counts in descending order, name ascending on ties.
pub fn counted_desc<'a>(names: impl Iterator<Item = &'a str>) -> Vec<(String, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for name in names {
        *counts.entry(name).or_default() += 1;
    }
    let mut counted: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(name, count)| (name.to_string(), count))
        .collect();
    counted.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    counted
}
