//! Collection statistics.
//!
//! Aggregate counts over the catalog: totals, favourites, cellar status,
//! per-type and per-region breakdowns, and the vintage range. Used by
//! `cellar stats` and `GET /stats`.

use anyhow::Result;
use chrono::Datelike;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::dataset::Catalog;
use crate::models::{WineRecord, WineStatus, WineType};

/// Summary of a set of wines.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CollectionStats {
    pub total_wines: usize,
    pub favorites: usize,
    pub in_cellar: usize,
    pub consumed: usize,
    pub countries: usize,
    pub regions: usize,
    /// One entry per type, in [`WineType::ALL`] order, zero counts included.
    pub by_type: Vec<TypeCount>,
    /// One entry per distinct region, ascending.
    pub by_region: Vec<RegionCount>,
    pub oldest_vintage: Option<i32>,
    pub newest_vintage: Option<i32>,
    /// Mean of `current_year - vintage`, rounded to one decimal.
    pub average_age_years: Option<f64>,
    pub with_notes: usize,
    pub with_winery: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeCount {
    #[serde(rename = "type")]
    pub wine_type: WineType,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionCount {
    pub region: String,
    pub count: usize,
}

/// Computes statistics for `wines` as of `current_year`.
pub fn collection_stats(wines: &[WineRecord], current_year: i32) -> CollectionStats {
    let by_type = WineType::ALL
        .iter()
        .map(|&wine_type| TypeCount {
            wine_type,
            count: wines.iter().filter(|w| w.wine_type == wine_type).count(),
        })
        .collect();

    let mut region_counts: BTreeMap<&str, usize> = BTreeMap::new();
    for w in wines {
        *region_counts.entry(w.region.as_str()).or_insert(0) += 1;
    }

    let country_count = wines
        .iter()
        .filter_map(|w| w.country.as_deref())
        .filter(|c| !c.is_empty())
        .collect::<std::collections::BTreeSet<_>>()
        .len();

    let average_age_years = if wines.is_empty() {
        None
    } else {
        let total_age: i64 = wines
            .iter()
            .map(|w| i64::from(current_year) - i64::from(w.vintage))
            .sum();
        let mean = total_age as f64 / wines.len() as f64;
        Some((mean * 10.0).round() / 10.0)
    };

    CollectionStats {
        total_wines: wines.len(),
        favorites: wines.iter().filter(|w| w.favorite).count(),
        in_cellar: wines.iter().filter(|w| w.status == WineStatus::Cellar).count(),
        consumed: wines.iter().filter(|w| w.status == WineStatus::Consumed).count(),
        countries: country_count,
        regions: region_counts.len(),
        by_type,
        by_region: region_counts
            .into_iter()
            .map(|(region, count)| RegionCount {
                region: region.to_string(),
                count,
            })
            .collect(),
        oldest_vintage: wines.iter().map(|w| w.vintage).min(),
        newest_vintage: wines.iter().map(|w| w.vintage).max(),
        average_age_years,
        with_notes: wines.iter().filter(|w| has_text(&w.notes)).count(),
        with_winery: wines.iter().filter(|w| has_text(&w.winery)).count(),
    }
}

/// The current calendar year in local time.
pub fn current_year() -> i32 {
    chrono::Local::now().year()
}

fn has_text(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.is_empty())
}

/// Run the stats command: compute and print a summary.
pub fn run_stats(catalog: &Catalog, json: bool) -> Result<()> {
    let stats = collection_stats(catalog.all_wines(), current_year());

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!("Cellar Map — Collection Stats");
    println!("=============================");
    println!();
    println!("  Wines:       {}", stats.total_wines);
    println!("  Favorites:   {}", stats.favorites);
    println!("  In cellar:   {}", stats.in_cellar);
    println!("  Consumed:    {}", stats.consumed);
    println!("  Countries:   {}", stats.countries);
    println!("  Regions:     {}", stats.regions);
    match (stats.oldest_vintage, stats.newest_vintage) {
        (Some(oldest), Some(newest)) => println!("  Vintages:    {} – {}", oldest, newest),
        _ => println!("  Vintages:    n/a"),
    }
    if let Some(age) = stats.average_age_years {
        println!("  Avg age:     {:.1} years", age);
    }
    println!("  With notes:  {}", stats.with_notes);
    println!("  With winery: {}", stats.with_winery);

    println!();
    println!("  By type:");
    println!("  {:<12} {:>6}", "TYPE", "WINES");
    println!("  {}", "-".repeat(19));
    for t in &stats.by_type {
        println!("  {:<12} {:>6}", t.wine_type.as_str(), t.count);
    }

    if !stats.by_region.is_empty() {
        println!();
        println!("  By region:");
        println!("  {:<28} {:>6}", "REGION", "WINES");
        println!("  {}", "-".repeat(35));
        for r in &stats.by_region {
            println!("  {:<28} {:>6}", r.region, r.count);
        }
    }

    println!();
    Ok(())
}
