//! Wine retrieval by ID.
//!
//! Fetches a single wine with the derived fields its detail view shows.
//! Used by both the `cellar get` CLI command and `GET /wines/{id}`.

use anyhow::{bail, Result};
use serde::Serialize;

use crate::dataset::Catalog;
use crate::models::WineRecord;
use crate::pairing::food_pairings;
use crate::stats::current_year;

/// Detail response for one wine.
#[derive(Debug, Clone, Serialize)]
pub struct WineDetail {
    pub wine: WineRecord,
    pub status_label: &'static str,
    pub age_years: i64,
    pub pairings: Vec<&'static str>,
}

impl WineDetail {
    pub fn new(wine: &WineRecord, current_year: i32) -> Self {
        Self {
            wine: wine.clone(),
            status_label: wine.status.label(),
            age_years: i64::from(current_year) - i64::from(wine.vintage),
            pairings: food_pairings(wine),
        }
    }
}

/// Core get function returning structured data (used by CLI and server).
pub fn get_wine(catalog: &Catalog, id: &str) -> Result<WineDetail> {
    match catalog.wine_by_id(id) {
        Some(wine) => Ok(WineDetail::new(wine, current_year())),
        None => bail!("wine not found: {}", id),
    }
}

/// CLI entry point — calls get_wine and prints to stdout.
pub fn run_get(catalog: &Catalog, id: &str, json: bool) -> Result<()> {
    let detail = match get_wine(catalog, id) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&detail)?);
        return Ok(());
    }

    let wine = &detail.wine;
    println!("--- {} {} ---", wine.name, wine.vintage);
    println!("id:         {}", wine.id);
    println!("type:       {}", wine.wine_type);
    println!("region:     {}", wine.region);
    if let Some(ref country) = wine.country {
        println!("country:    {}", country);
    }
    if let Some(ref winery) = wine.winery {
        println!("winery:     {}", winery);
    }
    println!(
        "location:   {:.4}, {:.4}",
        wine.coordinates.lat, wine.coordinates.lng
    );
    if let Some(alcohol) = wine.alcohol {
        println!("alcohol:    {}%", alcohol);
    }
    if let Some(tannins) = wine.tannins {
        println!("tannins:    {}", tannins.as_str());
    }
    if let Some(body) = wine.body {
        println!("body:       {}", body.as_str());
    }
    if let Some(acidity) = wine.acidity {
        println!("acidity:    {}", acidity.as_str());
    }
    println!("status:     {}", detail.status_label);
    println!("favorite:   {}", if wine.favorite { "yes" } else { "no" });
    println!("age:        {} years", detail.age_years);

    print_list("varietals", &wine.varietals);
    print_list("aromas", &wine.aromas);
    print_list("tags", &wine.tags);

    if let Some(ref details) = wine.details {
        println!();
        println!("--- Details ---");
        println!("{}", details);
    }
    if let Some(ref notes) = wine.notes {
        println!();
        println!("--- Tasting Notes ---");
        println!("{}", notes);
    }

    if !detail.pairings.is_empty() {
        println!();
        println!("--- Food Pairings ---");
        for p in &detail.pairings {
            println!("  - {}", p);
        }
    }
    println!();

    Ok(())
}

fn print_list(label: &str, items: &[String]) {
    if !items.is_empty() {
        println!("{:<11} {}", format!("{}:", label), items.join(", "));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_existing() {
        let catalog = Catalog::embedded().unwrap();
        let detail = get_wine(&catalog, "krug-grande-cuvee").unwrap();
        assert_eq!(detail.wine.name, "Krug Grande Cuvée 171ème Édition");
        assert_eq!(detail.status_label, "In Cellar");
        assert!(detail.pairings.contains(&"Oysters"));
    }

    #[test]
    fn test_get_missing() {
        let catalog = Catalog::embedded().unwrap();
        let err = get_wine(&catalog, "no-such-wine").unwrap_err();
        assert_eq!(err.to_string(), "wine not found: no-such-wine");
    }

    #[test]
    fn test_age_from_vintage() {
        let catalog = Catalog::embedded().unwrap();
        let detail = WineDetail::new(catalog.wine_by_id("chateau-dyquem-2009").unwrap(), 2026);
        assert_eq!(detail.age_years, 17);
    }
}
