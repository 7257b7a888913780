//! # Fabric Catalog
//!
//! A catalog and stack-builder for Microsoft Fabric HR analytics
//! architecture patterns.
//!
//! Fabric Catalog loads a curated JSON catalog of architecture patterns —
//! each with facets (domain, complexity, maturity), pros/cons, governance
//! notes, and directed prerequisite/compatibility/incompatibility edges to
//! other patterns — and lets a user assemble a subset into a stack, check
//! that stack for missing prerequisites and pairwise conflicts, and export
//! it as JSON or HTML.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   ┌──────────────────────────────┐
//! │ patterns.json│──▶│  Catalog (immutable, loaded   │
//! └──────────────┘   │  once, passed by reference)   │
//!                    └───────┬──────────┬───────────┘
//!                            ▼          ▼
//!                     ┌──────────┐ ┌──────────┐ ┌──────────┐
//!                     │  Filter  │ │ Resolver │ │  Export  │
//!                     └────┬─────┘ └────┬─────┘ └────┬─────┘
//!                          └───────────┬┴────────────┘
//!                            ▼                   ▼
//!                       ┌──────────┐       ┌──────────┐
//!                       │   CLI    │       │   HTTP   │
//!                       │ (fabcat) │       │  (JSON)  │
//!                       └──────────┘       └──────────┘
//! ```
//!
//! The engine (catalog, filter, resolver, export) is pure and synchronous:
//! the catalog is read once at startup and shared read-only, selections and
//! criteria are passed in per call, and identical inputs always produce
//! identical outputs. The CLI and HTTP server are presentation glue over
//! the same surface.
//!
//! ## Quick Start
//!
//! ```bash
//! fabcat list --search "lake" --domain Storage
//! fabcat show medallion-architecture
//! fabcat analyze medallion-architecture direct-lake
//! fabcat export medallion-architecture direct-lake --format html
//! fabcat serve
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`models`] | Pattern record types |
//! | [`catalog`] | Catalog loading and lookups |
//! | [`filter`] | Search and facet filtering |
//! | [`resolver`] | Stack compatibility analysis |
//! | [`export`] | JSON and HTML stack exports |
//! | [`server`] | JSON HTTP server |

pub mod catalog;
pub mod config;
pub mod export;
pub mod filter;
pub mod models;
pub mod resolver;
pub mod server;
