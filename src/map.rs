//! Marker data for the map view.
//!
//! A map widget needs one pin per wine plus an initial viewport. Styling is
//! limited to what the pin itself carries: a colour per wine type and a
//! one-letter label.

use serde::Serialize;

use crate::config::MapConfig;
use crate::models::{Coordinates, MapBounds, WineRecord, WineType};

/// One map pin.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub id: String,
    pub name: String,
    pub vintage: i32,
    #[serde(rename = "type")]
    pub wine_type: WineType,
    pub favorite: bool,
    pub position: Coordinates,
    /// CSS hex colour for the pin.
    pub color: &'static str,
    /// Upper-case first letter of the type.
    pub label: String,
}

/// Everything a map widget needs to draw a set of wines.
#[derive(Debug, Clone, Serialize)]
pub struct MapView {
    pub center: Coordinates,
    pub zoom: u8,
    /// `None` when there are no markers.
    pub bounds: Option<MapBounds>,
    pub markers: Vec<Marker>,
}

/// Pin colour for a wine type.
pub fn type_color(wine_type: WineType) -> &'static str {
    match wine_type {
        WineType::Red => "#dc2626",
        WineType::White => "#eab308",
        WineType::Rose => "#ec4899",
        WineType::Sparkling => "#9333ea",
        WineType::Dessert => "#d97706",
        WineType::Fortified => "#ea580c",
    }
}

impl Marker {
    pub fn for_wine(wine: &WineRecord) -> Self {
        Self {
            id: wine.id.clone(),
            name: wine.name.clone(),
            vintage: wine.vintage,
            wine_type: wine.wine_type,
            favorite: wine.favorite,
            position: wine.coordinates,
            color: type_color(wine.wine_type),
            label: wine
                .wine_type
                .as_str()
                .chars()
                .next()
                .map(|c| c.to_uppercase().collect::<String>())
                .unwrap_or_default(),
        }
    }
}

/// Builds the map view for `wines` using the configured initial viewport.
pub fn map_view<'a, I>(wines: I, config: &MapConfig) -> MapView
where
    I: IntoIterator<Item = &'a WineRecord>,
{
    let markers: Vec<Marker> = wines.into_iter().map(Marker::for_wine).collect();
    let bounds = MapBounds::enclosing(markers.iter().map(|m| &m.position));

    MapView {
        center: Coordinates {
            lat: config.center[0],
            lng: config.center[1],
        },
        zoom: config.zoom,
        bounds,
        markers,
    }
}
