//! Filter engine: reduces the catalog to a view subset.
//!
//! All functions here are pure — the same catalog and criteria always yield
//! the same output in the same order, so the presentation layer can safely
//! re-run them on every render.

use clap::ValueEnum;

use crate::models::Pattern;

/// Implementation complexity facet values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Complexity {
    Low,
    Medium,
    High,
}

impl Complexity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Complexity::Low => "Low",
            Complexity::Medium => "Medium",
            Complexity::High => "High",
        }
    }
}

/// Release maturity facet values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Maturity {
    Preview,
    Ga,
}

impl Maturity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Maturity::Preview => "Preview",
            Maturity::Ga => "GA",
        }
    }
}

/// Filter criteria combined with logical AND.
///
/// `None` for complexity/maturity and an empty `domains` list disable the
/// respective predicate (match everything, not nothing).
#[derive(Debug, Clone, Default)]
pub struct FilterCriteria {
    /// Case-insensitive substring match over name, description, and summary.
    pub search: String,
    pub domains: Vec<String>,
    pub complexity: Option<Complexity>,
    pub maturity: Option<Maturity>,
}

/// Apply the criteria to the catalog, preserving source order.
pub fn filter<'a>(catalog: &'a [Pattern], criteria: &FilterCriteria) -> Vec<&'a Pattern> {
    let query = criteria.search.to_lowercase();

    catalog
        .iter()
        .filter(|p| matches_search(p, &query))
        .filter(|p| {
            criteria.domains.is_empty()
                || p.domain
                    .as_deref()
                    .is_some_and(|d| criteria.domains.iter().any(|want| want.as_str() == d))
        })
        .filter(|p| {
            criteria
                .complexity
                .is_none_or(|c| p.complexity.as_deref() == Some(c.as_str()))
        })
        .filter(|p| {
            criteria
                .maturity
                .is_none_or(|m| p.maturity.as_deref() == Some(m.as_str()))
        })
        .collect()
}

fn matches_search(pattern: &Pattern, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    pattern.name.to_lowercase().contains(query)
        || pattern.description.to_lowercase().contains(query)
        || pattern.summary.to_lowercase().contains(query)
}

/// Per-bucket pattern counts within an already-filtered view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ComplexityCounts {
    pub low: usize,
    pub medium: usize,
    pub high: usize,
}

/// Count patterns per complexity bucket.
///
/// Values outside Low/Medium/High (including absent ones) count nowhere;
/// they never error and never introduce a fourth bucket.
pub fn complexity_counts(filtered: &[&Pattern]) -> ComplexityCounts {
    let mut counts = ComplexityCounts::default();
    for p in filtered {
        match p.complexity.as_deref() {
            Some("Low") => counts.low += 1,
            Some("Medium") => counts.medium += 1,
            Some("High") => counts.high += 1,
            _ => {}
        }
    }
    counts
}
