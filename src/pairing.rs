//! Food pairing suggestions for a wine's detail view.
//!
//! Suggestions come from three sources, in this order: the wine's tags, its
//! type, and its aromas. Duplicates are dropped (first occurrence wins) and
//! the list is capped at [`MAX_PAIRINGS`].

use crate::models::{WineRecord, WineType};

pub const MAX_PAIRINGS: usize = 6;

fn tag_pairings(tag: &str) -> &'static [&'static str] {
    match tag {
        "seafood" | "seafood-pairing" => &["Grilled fish", "Oysters", "Lobster", "Ceviche"],
        "bbq-friendly" | "bbq" => &["Grilled meats", "BBQ ribs", "Burgers", "Steak"],
        "pizza-pasta" => &["Pizza", "Pasta", "Italian dishes", "Margherita pizza"],
        "cheese" => &["Cheese board", "Aged cheeses", "Soft cheeses"],
        "charcuterie" => &["Charcuterie board", "Cured meats", "Prosciutto"],
        "spicy-food" => &["Spicy dishes", "Curry", "Thai food", "Mexican cuisine"],
        "dessert" => &["Desserts", "Chocolate", "Fruit tarts", "Cheesecake"],
        "aperitif" => &["Appetizers", "Light snacks", "Canapés"],
        _ => &[],
    }
}

fn aroma_pairings(aroma: &str) -> &'static [&'static str] {
    match aroma {
        "lavender" | "garrigue" => &["Provençal cuisine", "Herbed dishes", "Mediterranean food"],
        "smoke" | "tobacco" => &["Smoked meats", "Grilled foods", "Barbecue"],
        "citrus" | "lemon" => &["Seafood", "Light fish", "Citrus-based dishes"],
        "spice" | "pepper" => &["Spicy foods", "Asian cuisine", "Curry"],
        _ => &[],
    }
}

/// Suggested dishes for `wine`, at most [`MAX_PAIRINGS`].
pub fn food_pairings(wine: &WineRecord) -> Vec<&'static str> {
    let mut pairings: Vec<&'static str> = Vec::new();

    for tag in &wine.tags {
        pairings.extend_from_slice(tag_pairings(tag));
    }

    // Red and white defaults are skipped when tags already cover the
    // matching main course.
    match wine.wine_type {
        WineType::Red => {
            if !pairings.contains(&"Grilled meats") {
                pairings.extend_from_slice(&["Grilled meats", "Red meat", "Game"]);
            }
        }
        WineType::White => {
            if !pairings.contains(&"Grilled fish") {
                pairings.extend_from_slice(&["White fish", "Chicken", "Salads"]);
            }
        }
        WineType::Rose => pairings.extend_from_slice(&[
            "Summer salads",
            "Light appetizers",
            "Mediterranean cuisine",
        ]),
        WineType::Sparkling => {
            pairings.extend_from_slice(&["Celebration foods", "Light appetizers", "Brunch"])
        }
        WineType::Dessert => {
            pairings.extend_from_slice(&["Desserts", "Fruit", "Chocolate", "Cheese"])
        }
        WineType::Fortified => {}
    }

    for aroma in &wine.aromas {
        pairings.extend_from_slice(aroma_pairings(aroma));
    }

    let mut unique: Vec<&'static str> = Vec::with_capacity(MAX_PAIRINGS);
    for p in pairings {
        if !unique.contains(&p) {
            unique.push(p);
            if unique.len() == MAX_PAIRINGS {
                break;
            }
        }
    }
    unique
}
