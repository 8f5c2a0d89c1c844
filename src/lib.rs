//! # Cellar Map
//!
//! A static wine-collection catalog: a curated list of wines with map
//! coordinates, filtering and keyword search, per-wine detail, and aggregate
//! statistics.
//!
//! The dataset is bundled with the crate and loaded once; nothing is ever
//! written. The same read-only operations are available as a library, from
//! the `cellar` CLI, and over a JSON HTTP API.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   ┌──────────────┐   ┌───────────────┐
//! │ wines.json   │──▶│   Catalog    │──▶│ filter / geo  │
//! │ (embedded)   │   │ (validated)  │   │ stats / map   │
//! └──────────────┘   └──────┬───────┘   └───────┬───────┘
//!                           │                   │
//!                      ┌────┴─────┐       ┌─────┴────┐
//!                      │   CLI    │       │   HTTP   │
//!                      │ (cellar) │       │  (axum)  │
//!                      └──────────┘       └──────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! cellar list --type red --keyword cherry
//! cellar get tignanello-2018
//! cellar stats
//! cellar serve
//! ```
//!
//! ## Library use
//!
//! ```rust
//! use cellar_map::dataset;
//! use cellar_map::filter::filter_wines;
//! use cellar_map::models::{FilterCriteria, WineType};
//!
//! # fn main() -> anyhow::Result<()> {
//! let wines = dataset::get_all_wines()?;
//! let criteria = FilterCriteria {
//!     wine_type: Some(WineType::Red),
//!     keyword: Some("bordeaux".to_string()),
//!     ..Default::default()
//! };
//! for wine in filter_wines(wines, &criteria) {
//!     println!("{} {}", wine.name, wine.vintage);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`models`] | Core data types |
//! | [`dataset`] | Dataset loading, validation, and accessors |
//! | [`filter`] | The filter engine |
//! | [`geo`] | Distance, coordinate validation, bounds |
//! | [`search`] | Filtered listings |
//! | [`get`] | Single-wine detail |
//! | [`facets`] | Types, regions, countries |
//! | [`stats`] | Collection statistics |
//! | [`pairing`] | Food pairing suggestions |
//! | [`map`] | Map markers and viewport |
//! | [`server`] | JSON HTTP server |

pub mod config;
pub mod dataset;
pub mod facets;
pub mod filter;
pub mod geo;
pub mod get;
pub mod map;
pub mod models;
pub mod pairing;
pub mod search;
pub mod server;
pub mod stats;
