//! Core data models used throughout Cellar Map.
//!
//! These types mirror the JSON dataset one-to-one: a [`WineRecord`] per
//! catalog entry, plus the closed enumerations its fields draw from.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Broad style of a wine. Closed set, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WineType {
    Red,
    White,
    #[serde(rename = "rosé", alias = "rose")]
    Rose,
    Sparkling,
    Dessert,
    Fortified,
}

impl WineType {
    /// Every type, in the order selection controls present them.
    pub const ALL: [WineType; 6] = [
        WineType::Red,
        WineType::White,
        WineType::Rose,
        WineType::Sparkling,
        WineType::Dessert,
        WineType::Fortified,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WineType::Red => "red",
            WineType::White => "white",
            WineType::Rose => "rosé",
            WineType::Sparkling => "sparkling",
            WineType::Dessert => "dessert",
            WineType::Fortified => "fortified",
        }
    }
}

impl fmt::Display for WineType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WineType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "red" => Ok(WineType::Red),
            "white" => Ok(WineType::White),
            "rosé" | "rose" => Ok(WineType::Rose),
            "sparkling" => Ok(WineType::Sparkling),
            "dessert" => Ok(WineType::Dessert),
            "fortified" => Ok(WineType::Fortified),
            other => Err(format!(
                "invalid wine type '{}'. Must be one of red, white, rosé, sparkling, dessert, fortified.",
                other
            )),
        }
    }
}

/// Whether a bottle is still on hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WineStatus {
    Cellar,
    Consumed,
}

impl WineStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            WineStatus::Cellar => "cellar",
            WineStatus::Consumed => "consumed",
        }
    }

    /// Human-facing label used on detail views.
    pub fn label(&self) -> &'static str {
        match self {
            WineStatus::Cellar => "In Cellar",
            WineStatus::Consumed => "Consumed",
        }
    }
}

/// Five-step scale shared by tannins and acidity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Level {
    Low,
    MediumLow,
    Medium,
    MediumHigh,
    High,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Low => "low",
            Level::MediumLow => "medium-low",
            Level::Medium => "medium",
            Level::MediumHigh => "medium-high",
            Level::High => "high",
        }
    }
}

/// Body scale, light to full.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Body {
    Light,
    MediumLight,
    Medium,
    MediumFull,
    Full,
}

impl Body {
    pub fn as_str(&self) -> &'static str {
        match self {
            Body::Light => "light",
            Body::MediumLight => "medium-light",
            Body::Medium => "medium",
            Body::MediumFull => "medium-full",
            Body::Full => "full",
        }
    }
}

/// A point on the map, in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// One catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WineRecord {
    pub id: String,
    pub name: String,
    pub vintage: i32,
    #[serde(rename = "type")]
    pub wine_type: WineType,
    pub region: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub winery: Option<String>,
    pub coordinates: Coordinates,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aromas: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub varietals: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alcohol: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tannins: Option<Level>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Body>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub acidity: Option<Level>,
    pub favorite: bool,
    pub status: WineStatus,
}

/// Constraints a consumer applies to narrow the displayed records.
///
/// Every field is optional; `None` places no constraint on that dimension.
/// Note that `favorite: Some(false)` is a real constraint (non-favorites
/// only), distinct from `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterCriteria {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub wine_type: Option<WineType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub favorite: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
}

/// Geographic bounding box in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapBounds {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
}
