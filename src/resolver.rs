//! Relationship resolver: analyzes a selected stack against the catalog's
//! prerequisite, compatibility, and incompatibility edges.
//!
//! The analysis is total: unknown ids, duplicate selections, empty
//! selections, and self-referencing edges all degrade into (possibly odd)
//! report lines rather than errors. Report lines are collected into sets so
//! duplicates collapse and iteration order is deterministic.

use std::collections::{BTreeSet, HashMap};

use crate::models::Pattern;

/// Result of analyzing one selection against the catalog.
///
/// Each entry is a preformatted, human-readable report line:
/// `"<A> ↔ <B>"`, `"<A> requires <B>"`, `"<A> is incompatible with <B>"`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StackAnalysis {
    pub compatible_pairs: BTreeSet<String>,
    pub missing_prerequisites: BTreeSet<String>,
    pub incompatibilities: BTreeSet<String>,
}

/// Analyze a selection of pattern ids against the full catalog.
///
/// Prerequisites: for every selected pattern, every declared prerequisite
/// not itself in the selection produces a report line. A prerequisite id
/// that does not resolve in the catalog is reported by its raw id.
///
/// Pairs: every unordered pair of selected ids is considered once, in
/// selection order, and only the earlier pattern's edge lists are
/// consulted. Incompatibility wins over compatibility for the same pair.
/// The check is deliberately one-directional; edges are directed and the
/// curated catalog declares them on the side that cares.
pub fn analyze(selected_ids: &[String], catalog: &[Pattern]) -> StackAnalysis {
    let by_id: HashMap<&str, &Pattern> = catalog.iter().map(|p| (p.id.as_str(), p)).collect();

    let mut analysis = StackAnalysis::default();

    for id in selected_ids {
        let Some(pattern) = by_id.get(id.as_str()) else {
            continue;
        };
        for prereq_id in &pattern.prerequisites {
            if selected_ids.contains(prereq_id) {
                continue;
            }
            let prereq_display = by_id
                .get(prereq_id.as_str())
                .map(|p| p.name.as_str())
                .unwrap_or(prereq_id.as_str());
            analysis
                .missing_prerequisites
                .insert(format!("{} requires {}", pattern.name, prereq_display));
        }
    }

    for (i, id_a) in selected_ids.iter().enumerate() {
        let Some(a) = by_id.get(id_a.as_str()) else {
            continue;
        };
        for id_b in &selected_ids[i + 1..] {
            let Some(b) = by_id.get(id_b.as_str()) else {
                continue;
            };
            if a.incompatible_with.contains(id_b) {
                analysis
                    .incompatibilities
                    .insert(format!("{} is incompatible with {}", a.name, b.name));
            } else if a.compatible_with.contains(id_b) {
                analysis
                    .compatible_pairs
                    .insert(format!("{} ↔ {}", a.name, b.name));
            }
        }
    }

    analysis
}

/// Aggregate footprint of a selection, for the stack narrative.
#[derive(Debug, Clone, Default)]
pub struct StackSummary {
    /// Pattern names in selection order.
    pub names: Vec<String>,
    /// Sorted union of every selected pattern's fabric components.
    pub components: Vec<String>,
    /// Distinct effort labels, sorted; patterns without one contribute "N/A".
    pub efforts: Vec<String>,
}

/// Summarize the selected patterns' combined footprint.
pub fn summarize(selected: &[&Pattern]) -> StackSummary {
    let names = selected.iter().map(|p| p.name.clone()).collect();

    let components: BTreeSet<String> = selected
        .iter()
        .flat_map(|p| p.fabric_components.iter().cloned())
        .collect();

    let efforts: BTreeSet<String> = selected
        .iter()
        .map(|p| {
            p.estimated_implementation_effort
                .clone()
                .unwrap_or_else(|| "N/A".to_string())
        })
        .collect();

    StackSummary {
        names,
        components: components.into_iter().collect(),
        efforts: efforts.into_iter().collect(),
    }
}
