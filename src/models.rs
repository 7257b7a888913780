//! Core data models for the Fabric pattern catalog.
//!
//! A [`Pattern`] is one architectural approach in the catalog. Records are
//! loaded once from the catalog JSON and never mutated; optional attributes
//! are represented as `Option`s and defaulted only at the presentation
//! boundary, never inside the engine.

use serde::{Deserialize, Serialize};

/// A single architecture pattern record.
///
/// Field names follow the catalog JSON's camelCase schema. Every field
/// except `id` and `name` may be absent in the source document; sequences
/// default to empty. `complexity` and `maturity` are kept as raw strings so
/// that the structured export embeds records verbatim and a value outside
/// the known vocabulary never fails a load.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pattern {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub complexity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maturity: Option<String>,
    /// Pattern ids this pattern depends on, in declaration order.
    #[serde(default)]
    pub prerequisites: Vec<String>,
    /// Directed affinity edges: ids this pattern declares synergy with.
    #[serde(default)]
    pub compatible_with: Vec<String>,
    /// Directed conflict edges: ids this pattern declares conflict with.
    #[serde(default)]
    pub incompatible_with: Vec<String>,
    /// Fabric workload components the pattern touches (e.g. "Lakehouse").
    #[serde(default)]
    pub fabric_components: Vec<String>,
    #[serde(default)]
    pub pros: Vec<String>,
    #[serde(default)]
    pub cons: Vec<String>,
    #[serde(default)]
    pub people_analytics_use_cases: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub governance_considerations: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_implementation_effort: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost_implications: Option<String>,
    #[serde(default)]
    pub reference_links: Vec<ReferenceLink>,
}

/// A labelled documentation link attached to a pattern.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReferenceLink {
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub url: String,
}
