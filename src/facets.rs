//! Facet lists for selection controls: types, regions, countries.

use anyhow::Result;
use serde::Serialize;

use crate::dataset::Catalog;
use crate::models::WineType;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Facets<'a> {
    pub types: [WineType; 6],
    pub regions: Vec<&'a str>,
    pub countries: Vec<&'a str>,
}

pub fn facets(catalog: &Catalog) -> Facets<'_> {
    Facets {
        types: catalog.wine_types(),
        regions: catalog.unique_regions(),
        countries: catalog.unique_countries(),
    }
}

pub fn run_facets(catalog: &Catalog) -> Result<()> {
    let f = facets(catalog);

    println!("Types ({}):", f.types.len());
    for t in &f.types {
        println!("  {}", t);
    }
    println!();
    println!("Regions ({}):", f.regions.len());
    for r in &f.regions {
        println!("  {}", r);
    }
    println!();
    println!("Countries ({}):", f.countries.len());
    for c in &f.countries {
        println!("  {}", c);
    }

    Ok(())
}
