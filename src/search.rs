//! Filtered listing of the catalog.
//!
//! Wraps the [filter engine](crate::filter) with the response shape shared
//! by `cellar list` and `GET /wines`.

use anyhow::Result;
use serde::Serialize;

use crate::dataset::Catalog;
use crate::filter::filter_wines;
use crate::models::{FilterCriteria, WineRecord};

/// Result of a filtered listing.
#[derive(Debug, Clone, Serialize)]
pub struct WineListResponse {
    /// Size of the whole catalog.
    pub total: usize,
    /// Number of matching wines.
    pub count: usize,
    pub wines: Vec<WineRecord>,
}

/// Core search function returning structured data (used by CLI and server).
pub fn search_wines(catalog: &Catalog, criteria: &FilterCriteria) -> WineListResponse {
    let wines: Vec<WineRecord> = filter_wines(catalog.all_wines(), criteria)
        .into_iter()
        .cloned()
        .collect();

    tracing::debug!(
        active = criteria.active_count(),
        matched = wines.len(),
        "filtered wines"
    );

    WineListResponse {
        total: catalog.len(),
        count: wines.len(),
        wines,
    }
}

/// CLI entry point: filter and print a table (or JSON).
pub fn run_search(catalog: &Catalog, criteria: &FilterCriteria, json: bool) -> Result<()> {
    let response = search_wines(catalog, criteria);

    if json {
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    if response.wines.is_empty() {
        println!("No wines match.");
        return Ok(());
    }

    println!(
        "{:<28} {:<34} {:>7} {:<10} {:<22} {}",
        "ID", "NAME", "VINTAGE", "TYPE", "REGION", "COUNTRY"
    );
    println!("{}", "-".repeat(112));
    for wine in &response.wines {
        let star = if wine.favorite { " *" } else { "" };
        println!(
            "{:<28} {:<34} {:>7} {:<10} {:<22} {}",
            wine.id,
            truncate(&format!("{}{}", wine.name, star), 34),
            wine.vintage,
            wine.wine_type.as_str(),
            truncate(&wine.region, 22),
            wine.country.as_deref().unwrap_or("-")
        );
    }
    println!();
    println!(
        "{} of {} wine{}",
        response.count,
        response.total,
        if response.total == 1 { "" } else { "s" }
    );

    Ok(())
}

fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let mut out: String = s.chars().take(width.saturating_sub(1)).collect();
        out.push('…');
        out
    }
}
