//! The dataset accessor.
//!
//! A [`Catalog`] owns the validated wine records and answers the read-only
//! queries every surface needs: the full list, lookup by id, and the facet
//! lists used to populate selection controls.
//!
//! The collection bundled with the crate (`data/wines.json`) is compiled
//! into the binary. [`catalog`] lazily loads it into a process-wide cache on
//! first use; [`install`] substitutes a different catalog before that point.
//! The free functions ([`get_all_wines`], [`get_wine_by_id`], ...) read from
//! that cache.
//!
//! # Validation
//!
//! Loading fails fast on the first malformed record. The error names the
//! record's position and id and the rule it broke:
//!
//! - every required field present and well-typed
//! - `id`, `name` and `region` non-empty
//! - `id` unique across the dataset
//! - `vintage` within [1, 9999]
//! - coordinates within lat [-90, 90], lng [-180, 180]
//! - `alcohol`, when present, within [0, 100]

use anyhow::{anyhow, bail, Context, Result};
use serde_json::Value;
use std::collections::{BTreeSet, HashMap};
use std::path::Path;
use std::sync::OnceLock;

use crate::models::{WineRecord, WineType};

/// The dataset compiled into the crate.
pub const EMBEDDED_DATASET: &str = include_str!("../data/wines.json");

static CATALOG: OnceLock<Catalog> = OnceLock::new();

/// An immutable, validated collection of wines.
#[derive(Debug, Clone)]
pub struct Catalog {
    wines: Vec<WineRecord>,
    by_id: HashMap<String, usize>,
}

impl Catalog {
    /// Validates `wines` and builds the id index. Dataset order is kept.
    pub fn from_records(wines: Vec<WineRecord>) -> Result<Self> {
        let mut by_id = HashMap::with_capacity(wines.len());
        for (pos, wine) in wines.iter().enumerate() {
            validate_record(wine).map_err(|e| anyhow!("{}: {}", describe(pos, Some(&wine.id)), e))?;
            if let Some(first) = by_id.insert(wine.id.clone(), pos) {
                bail!(
                    "{}: duplicate id (first used by record #{})",
                    describe(pos, Some(&wine.id)),
                    first
                );
            }
        }
        Ok(Self { wines, by_id })
    }

    /// Parses a JSON array of wine records.
    pub fn from_json(json: &str) -> Result<Self> {
        let values: Vec<Value> =
            serde_json::from_str(json).context("wine dataset must be a JSON array of records")?;

        let mut wines = Vec::with_capacity(values.len());
        for (pos, value) in values.into_iter().enumerate() {
            let id = value.get("id").and_then(Value::as_str).map(str::to_string);
            let wine: WineRecord = serde_json::from_value(value)
                .with_context(|| describe(pos, id.as_deref()))?;
            wines.push(wine);
        }

        Self::from_records(wines)
    }

    /// Reads and parses a dataset file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read wine dataset: {}", path.display()))?;
        let catalog = Self::from_json(&content)
            .with_context(|| format!("Invalid wine dataset: {}", path.display()))?;
        tracing::debug!(path = %path.display(), wines = catalog.len(), "loaded wine dataset");
        Ok(catalog)
    }

    /// Parses the dataset compiled into the crate.
    pub fn embedded() -> Result<Self> {
        Self::from_json(EMBEDDED_DATASET).context("Invalid embedded wine dataset")
    }

    /// Every record, in dataset order.
    pub fn all_wines(&self) -> &[WineRecord] {
        &self.wines
    }

    pub fn wine_by_id(&self, id: &str) -> Option<&WineRecord> {
        self.by_id.get(id).map(|&pos| &self.wines[pos])
    }

    /// The six wine types in display order.
    pub fn wine_types(&self) -> [WineType; 6] {
        WineType::ALL
    }

    /// Distinct regions, ascending.
    pub fn unique_regions(&self) -> Vec<&str> {
        self.wines
            .iter()
            .map(|w| w.region.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Distinct non-empty countries, ascending.
    pub fn unique_countries(&self) -> Vec<&str> {
        self.wines
            .iter()
            .filter_map(|w| w.country.as_deref())
            .filter(|c| !c.is_empty())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.wines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.wines.is_empty()
    }
}

fn validate_record(wine: &WineRecord) -> Result<()> {
    if wine.id.trim().is_empty() {
        bail!("id must not be empty");
    }
    if wine.name.trim().is_empty() {
        bail!("name must not be empty");
    }
    if wine.region.trim().is_empty() {
        bail!("region must not be empty");
    }
    if !(1..=9999).contains(&wine.vintage) {
        bail!("vintage out of range: {}", wine.vintage);
    }
    if !wine.coordinates.is_valid() {
        bail!(
            "coordinates out of range: lat {}, lng {}",
            wine.coordinates.lat,
            wine.coordinates.lng
        );
    }
    if let Some(alcohol) = wine.alcohol {
        if !(0.0..=100.0).contains(&alcohol) {
            bail!("alcohol must be between 0 and 100, got {}", alcohol);
        }
    }
    Ok(())
}

fn describe(pos: usize, id: Option<&str>) -> String {
    match id {
        Some(id) => format!("wine record #{} (id '{}')", pos, id),
        None => format!("wine record #{}", pos),
    }
}

// ============ Process-wide cache ============

/// The process-wide catalog, loading the embedded dataset on first use.
pub fn catalog() -> Result<&'static Catalog> {
    if let Some(catalog) = CATALOG.get() {
        return Ok(catalog);
    }
    let loaded = Catalog::embedded()?;
    // A concurrent first call may win the race; either value is identical.
    Ok(CATALOG.get_or_init(|| loaded))
}

/// Replaces the embedded dataset for this process.
///
/// Must run before anything reads the cache.
pub fn install(catalog: Catalog) -> Result<()> {
    CATALOG
        .set(catalog)
        .map_err(|_| anyhow!("wine catalog already initialized"))
}

pub fn get_all_wines() -> Result<&'static [WineRecord]> {
    Ok(catalog()?.all_wines())
}

pub fn get_wine_by_id(id: &str) -> Result<Option<&'static WineRecord>> {
    Ok(catalog()?.wine_by_id(id))
}

pub fn get_wine_types() -> [WineType; 6] {
    WineType::ALL
}

pub fn get_unique_regions() -> Result<Vec<&'static str>> {
    Ok(catalog()?.unique_regions())
}

pub fn get_unique_countries() -> Result<Vec<&'static str>> {
    Ok(catalog()?.unique_countries())
}
