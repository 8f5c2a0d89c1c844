//! The filter engine.
//!
//! [`filter_wines`] narrows a record list to the entries that satisfy every
//! constraint in a [`FilterCriteria`]. Matching is a plain conjunction of
//! per-dimension predicates, so the result is always an order-preserving
//! subsequence of the input and filtering twice with the same criteria is a
//! no-op.

use crate::models::{FilterCriteria, WineRecord};

/// Returns the records matching `criteria`, in their original order.
///
/// Accepts anything that yields `&WineRecord`, so a previous result can be
/// filtered again with `filter_wines(previous.iter().copied(), ..)`.
pub fn filter_wines<'a, I>(records: I, criteria: &FilterCriteria) -> Vec<&'a WineRecord>
where
    I: IntoIterator<Item = &'a WineRecord>,
{
    let prepared = Prepared::new(criteria);
    records
        .into_iter()
        .filter(|wine| prepared.matches(wine))
        .collect()
}

impl FilterCriteria {
    /// True if `wine` satisfies every constraint set on `self`.
    pub fn matches(&self, wine: &WineRecord) -> bool {
        Prepared::new(self).matches(wine)
    }

    /// Number of constrained dimensions. Blank text fields do not count.
    pub fn active_count(&self) -> usize {
        [
            self.wine_type.is_some(),
            self.favorite.is_some(),
            non_blank(&self.region).is_some(),
            non_blank(&self.country).is_some(),
            non_blank(&self.keyword).is_some(),
        ]
        .iter()
        .filter(|set| **set)
        .count()
    }

    /// True if no dimension is constrained.
    pub fn is_empty(&self) -> bool {
        self.active_count() == 0
    }
}

/// Criteria with the text needles lower-cased once up front.
struct Prepared<'c> {
    criteria: &'c FilterCriteria,
    region: Option<String>,
    country: Option<String>,
    keyword: Option<String>,
}

impl<'c> Prepared<'c> {
    fn new(criteria: &'c FilterCriteria) -> Self {
        Self {
            criteria,
            region: non_blank(&criteria.region).map(str::to_lowercase),
            country: non_blank(&criteria.country).map(str::to_lowercase),
            keyword: non_blank(&criteria.keyword).map(str::to_lowercase),
        }
    }

    fn matches(&self, wine: &WineRecord) -> bool {
        if let Some(wine_type) = self.criteria.wine_type {
            if wine.wine_type != wine_type {
                return false;
            }
        }

        if let Some(favorite) = self.criteria.favorite {
            if wine.favorite != favorite {
                return false;
            }
        }

        if let Some(ref region) = self.region {
            if !contains_folded(&wine.region, region) {
                return false;
            }
        }

        if let Some(ref country) = self.country {
            match wine.country.as_deref() {
                Some(c) if contains_folded(c, country) => {}
                _ => return false,
            }
        }

        if let Some(ref keyword) = self.keyword {
            if !searchable_fields(wine).any(|field| contains_folded(field, keyword)) {
                return false;
            }
        }

        true
    }
}

/// Every text field the keyword search looks at. Absent optional fields are
/// skipped rather than treated as empty strings.
fn searchable_fields(wine: &WineRecord) -> impl Iterator<Item = &str> {
    [
        Some(wine.name.as_str()),
        wine.notes.as_deref(),
        wine.winery.as_deref(),
        Some(wine.region.as_str()),
        wine.country.as_deref(),
    ]
    .into_iter()
    .flatten()
    .chain(wine.aromas.iter().map(String::as_str))
    .chain(wine.varietals.iter().map(String::as_str))
    .chain(wine.tags.iter().map(String::as_str))
    .filter(|field| !field.is_empty())
}

/// `needle` must already be lower-case.
fn contains_folded(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}
