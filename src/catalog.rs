//! Catalog store: loads the pattern catalog and answers lookups over it.
//!
//! The catalog is a single JSON array of pattern records, read once at
//! startup and treated as read-only for the process lifetime. A failed read
//! or parse is fatal — no partial catalog is ever served.

use anyhow::{Context, Result};
use std::path::Path;

use crate::models::Pattern;

/// Load the catalog from a JSON file, preserving source order.
///
/// Safe to call repeatedly; each call re-reads the same file and returns the
/// same logical data. Callers (the CLI and the server) load once and pass
/// the result by reference into the filter and resolver functions.
pub fn load(path: &Path) -> Result<Vec<Pattern>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read catalog file: {}", path.display()))?;

    let patterns: Vec<Pattern> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse catalog file: {}", path.display()))?;

    Ok(patterns)
}

/// Distinct non-empty domain values, sorted ascending (case-sensitive).
///
/// Patterns without a domain are uncategorized and contribute nothing to
/// the facet.
pub fn domains(catalog: &[Pattern]) -> Vec<String> {
    let mut out: Vec<String> = catalog
        .iter()
        .filter_map(|p| p.domain.as_deref())
        .filter(|d| !d.is_empty())
        .map(str::to_string)
        .collect();
    out.sort();
    out.dedup();
    out
}

/// Look up a single pattern by id.
pub fn find<'a>(catalog: &'a [Pattern], id: &str) -> Option<&'a Pattern> {
    catalog.iter().find(|p| p.id == id)
}
