//! Geographic helpers: great-circle distance, coordinate validation, and
//! bounding boxes for map views.

use anyhow::{bail, Result};
use serde::Serialize;

use crate::dataset::Catalog;
use crate::models::{Coordinates, MapBounds, WineRecord};

/// Mean Earth radius used by [`calculate_distance`].
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two points in kilometres (haversine).
pub fn calculate_distance(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lng = (lng2 - lng1).to_radians();
    let a = (d_lat / 2.0).sin() * (d_lat / 2.0).sin()
        + lat1.to_radians().cos()
            * lat2.to_radians().cos()
            * (d_lng / 2.0).sin()
            * (d_lng / 2.0).sin();
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_KM * c
}

/// True iff `lat` is in [-90, 90] and `lng` is in [-180, 180]. NaN fails.
pub fn validate_coordinates(lat: f64, lng: f64) -> bool {
    (-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lng)
}

impl Coordinates {
    pub fn is_valid(&self) -> bool {
        validate_coordinates(self.lat, self.lng)
    }

    pub fn distance_to(&self, other: &Coordinates) -> f64 {
        calculate_distance(self.lat, self.lng, other.lat, other.lng)
    }
}

impl MapBounds {
    /// Smallest box containing every point, or `None` for no points.
    ///
    /// Boxes never wrap the antimeridian: `west <= east` always holds.
    pub fn enclosing<'a, I>(points: I) -> Option<MapBounds>
    where
        I: IntoIterator<Item = &'a Coordinates>,
    {
        points.into_iter().fold(None, |bounds, p| {
            Some(match bounds {
                None => MapBounds {
                    north: p.lat,
                    south: p.lat,
                    east: p.lng,
                    west: p.lng,
                },
                Some(b) => MapBounds {
                    north: b.north.max(p.lat),
                    south: b.south.min(p.lat),
                    east: b.east.max(p.lng),
                    west: b.west.min(p.lng),
                },
            })
        })
    }

    pub fn contains(&self, point: &Coordinates) -> bool {
        (self.south..=self.north).contains(&point.lat)
            && (self.west..=self.east).contains(&point.lng)
    }
}

/// A record paired with its distance from a query point.
#[derive(Debug, Clone, Serialize)]
pub struct NearbyWine<'a> {
    pub wine: &'a WineRecord,
    pub distance_km: f64,
}

/// The `limit` records closest to (`lat`, `lng`), nearest first.
///
/// Equal distances keep dataset order.
pub fn nearest_wines(
    records: &[WineRecord],
    lat: f64,
    lng: f64,
    limit: usize,
) -> Vec<NearbyWine<'_>> {
    let origin = Coordinates { lat, lng };
    let mut nearby: Vec<NearbyWine<'_>> = records
        .iter()
        .map(|wine| NearbyWine {
            wine,
            distance_km: origin.distance_to(&wine.coordinates),
        })
        .collect();

    // sort_by is stable, so ties stay in dataset order
    nearby.sort_by(|a, b| {
        a.distance_km
            .partial_cmp(&b.distance_km)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    nearby.truncate(limit);
    nearby
}

/// CLI entry point for `cellar near`.
pub fn run_near(catalog: &Catalog, lat: f64, lng: f64, limit: usize) -> Result<()> {
    if !validate_coordinates(lat, lng) {
        bail!("invalid coordinates: lat {}, lng {}", lat, lng);
    }

    let nearby = nearest_wines(catalog.all_wines(), lat, lng, limit);
    if nearby.is_empty() {
        println!("No wines.");
        return Ok(());
    }

    println!("{:>10}  {:<28} {}", "KM", "ID", "REGION");
    for n in &nearby {
        println!(
            "{:>10.1}  {:<28} {}",
            n.distance_km, n.wine.id, n.wine.region
        );
    }
    Ok(())
}

/// CLI entry point for `cellar distance`.
pub fn run_distance(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> Result<()> {
    for (lat, lng) in [(lat1, lng1), (lat2, lng2)] {
        if !validate_coordinates(lat, lng) {
            bail!("invalid coordinates: lat {}, lng {}", lat, lng);
        }
    }
    println!("{:.1} km", calculate_distance(lat1, lng1, lat2, lng2));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{WineStatus, WineType};

    fn wine_at(id: &str, lat: f64, lng: f64) -> WineRecord {
        WineRecord {
            id: id.to_string(),
            name: id.to_string(),
            vintage: 2020,
            wine_type: WineType::Red,
            region: "Somewhere".to_string(),
            country: None,
            winery: None,
            coordinates: Coordinates { lat, lng },
            notes: None,
            details: None,
            aromas: Vec::new(),
            varietals: Vec::new(),
            tags: Vec::new(),
            alcohol: None,
            tannins: None,
            body: None,
            acidity: None,
            favorite: false,
            status: WineStatus::Cellar,
        }
    }

    #[test]
    fn test_validate_coordinates_edges() {
        assert!(validate_coordinates(90.0, 180.0));
        assert!(validate_coordinates(-90.0, -180.0));
        assert!(!validate_coordinates(91.0, 0.0));
        assert!(!validate_coordinates(0.0, -181.0));
        assert!(!validate_coordinates(f64::NAN, 0.0));
    }

    #[test]
    fn test_distance_zero() {
        assert_eq!(calculate_distance(0.0, 0.0, 0.0, 0.0), 0.0);
    }

    #[test]
    fn test_distance_half_circumference() {
        let d = calculate_distance(0.0, 0.0, 0.0, 180.0);
        let expected = std::f64::consts::PI * EARTH_RADIUS_KM;
        assert!((d - expected).abs() < 1e-6, "got {}", d);
        assert!((d - 20015.0).abs() < 1.0);
    }

    #[test]
    fn test_distance_bordeaux_to_florence() {
        // Roughly 940 km as the crow flies
        let d = calculate_distance(44.8378, -0.5792, 43.7696, 11.2558);
        assert!(d > 900.0 && d < 980.0, "got {}", d);
    }

    #[test]
    fn test_distance_is_symmetric() {
        let there = calculate_distance(38.5, -122.3, -34.6, 138.9);
        let back = calculate_distance(-34.6, 138.9, 38.5, -122.3);
        assert!((there - back).abs() < 1e-9);
    }

    #[test]
    fn test_bounds_empty() {
        let none: Vec<Coordinates> = Vec::new();
        assert!(MapBounds::enclosing(&none).is_none());
    }

    #[test]
    fn test_bounds_contain_all_points() {
        let points = vec![
            Coordinates { lat: 44.8, lng: -0.6 },
            Coordinates { lat: -34.5, lng: 138.9 },
            Coordinates { lat: 38.3, lng: -122.3 },
        ];
        let bounds = MapBounds::enclosing(&points).unwrap();
        assert_eq!(bounds.north, 44.8);
        assert_eq!(bounds.south, -34.5);
        assert_eq!(bounds.east, 138.9);
        assert_eq!(bounds.west, -122.3);
        for p in &points {
            assert!(bounds.contains(p));
        }
        assert!(!bounds.contains(&Coordinates { lat: 60.0, lng: 0.0 }));
    }

    #[test]
    fn test_nearest_wines_ordering_and_limit() {
        let wines = vec![
            wine_at("far", 0.0, 90.0),
            wine_at("near", 0.0, 1.0),
            wine_at("here", 0.0, 0.0),
            wine_at("near-twin", 0.0, -1.0),
        ];
        let result = nearest_wines(&wines, 0.0, 0.0, 3);
        let ids: Vec<&str> = result.iter().map(|n| n.wine.id.as_str()).collect();
        assert_eq!(ids, vec!["here", "near", "near-twin"]);
        assert_eq!(result[0].distance_km, 0.0);
    }
}
