// Query filter engine
// Narrows the accommodation table by optional query parameters. Every present
// parameter becomes one independent predicate and a record is kept only if it
// passes all of them.

use std::collections::HashMap;

use tracing::debug;

use crate::dataset::{Accommodation, Identified};

pub const COUNTRY_PARAM: &str = "country";
pub const TYPE_PARAM: &str = "type";
pub const MIN_PRICE_PARAM: &str = "minPrice";
pub const MAX_PRICE_PARAM: &str = "maxPrice";

// A price bound as given in the query string. A value with no leading digits
// is kept as `Unparseable` and no price ever satisfies it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceBound {
    Value(i64),
    Unparseable,
}

impl PriceBound {
    pub fn parse(raw: &str) -> Self {
        parse_leading_int(raw).map_or(PriceBound::Unparseable, PriceBound::Value)
    }

    fn min_satisfied_by(&self, price: f64) -> bool {
        match self {
            PriceBound::Value(min) => price >= *min as f64,
            PriceBound::Unparseable => false,
        }
    }

    fn max_satisfied_by(&self, price: f64) -> bool {
        match self {
            PriceBound::Value(max) => price <= *max as f64,
            PriceBound::Unparseable => false,
        }
    }
}

// Leading integer of `raw`: surrounding whitespace and an optional sign are
// accepted, anything after the digits is ignored ("50.9" -> 50, "80usd" -> 80).
// Out of range values saturate.
fn parse_leading_int(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits: &str = {
        let end = rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(rest.len());
        &rest[..end]
    };
    if digits.is_empty() {
        return None;
    }

    let magnitude = digits.bytes().fold(0i64, |acc, b| {
        acc.saturating_mul(10).saturating_add((b - b'0') as i64)
    });
    Some(if negative { -magnitude } else { magnitude })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    Country(String),
    Type(String),
    MinPrice(PriceBound),
    MaxPrice(PriceBound),
}

impl Predicate {
    pub fn matches(&self, accommodation: &Accommodation) -> bool {
        match self {
            Predicate::Country(country) => accommodation.location.country == *country,
            Predicate::Type(accommodation_type) => {
                accommodation.accommodation_type.as_str() == accommodation_type
            }
            Predicate::MinPrice(bound) => bound.min_satisfied_by(accommodation.price_per_night),
            Predicate::MaxPrice(bound) => bound.max_satisfied_by(accommodation.price_per_night),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccommodationFilter {
    pub country: Option<String>,
    pub accommodation_type: Option<String>,
    pub min_price: Option<PriceBound>,
    pub max_price: Option<PriceBound>,
}

// Query pairs in request order, collapsed so that the first occurrence of a
// repeated key wins
pub fn first_values(pairs: Vec<(String, String)>) -> HashMap<String, String> {
    let mut params = HashMap::with_capacity(pairs.len());
    for (key, value) in pairs {
        params.entry(key).or_insert(value);
    }
    params
}

// A parameter with an empty value counts as absent
pub fn non_empty<'a>(params: &'a HashMap<String, String>, key: &str) -> Option<&'a str> {
    params
        .get(key)
        .map(String::as_str)
        .filter(|value| !value.is_empty())
}

impl AccommodationFilter {
    // Unknown keys are ignored
    pub fn from_query(params: &HashMap<String, String>) -> Self {
        Self {
            country: non_empty(params, COUNTRY_PARAM).map(str::to_string),
            accommodation_type: non_empty(params, TYPE_PARAM).map(str::to_string),
            min_price: non_empty(params, MIN_PRICE_PARAM).map(PriceBound::parse),
            max_price: non_empty(params, MAX_PRICE_PARAM).map(PriceBound::parse),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.predicates().is_empty()
    }

    pub fn predicates(&self) -> Vec<Predicate> {
        let mut predicates = Vec::new();
        if let Some(country) = &self.country {
            predicates.push(Predicate::Country(country.clone()));
        }
        if let Some(accommodation_type) = &self.accommodation_type {
            predicates.push(Predicate::Type(accommodation_type.clone()));
        }
        if let Some(bound) = self.min_price {
            predicates.push(Predicate::MinPrice(bound));
        }
        if let Some(bound) = self.max_price {
            predicates.push(Predicate::MaxPrice(bound));
        }
        predicates
    }

    pub fn apply<'a>(&self, accommodations: &'a [Accommodation]) -> Vec<&'a Accommodation> {
        let predicates = self.predicates();
        let filtered = apply_predicates(accommodations, &predicates);

        debug!(
            filters = predicates.len(),
            total = accommodations.len(),
            matched = filtered.len(),
            "Filtered accommodations"
        );

        filtered
    }
}

// Stable filter: keeps dataset order, no re-sort
pub fn apply_predicates<'a>(
    accommodations: &'a [Accommodation],
    predicates: &[Predicate],
) -> Vec<&'a Accommodation> {
    accommodations
        .iter()
        .filter(|accommodation| predicates.iter().all(|p| p.matches(accommodation)))
        .collect()
}

pub fn find_by_id<'a, T: Identified>(items: &'a [T], id: &str) -> Option<&'a T> {
    items.iter().find(|item| item.id() == id)
}
