// Static dataset provider
// Accommodation and package tables are loaded once at startup and never mutated

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::DatasetError;

// Tables compiled into the binary, used when no data directory is configured
pub const EMBEDDED_ACCOMMODATIONS: &str = include_str!("../data/accommodations.json");
pub const EMBEDDED_PACKAGES: &str = include_str!("../data/packages.json");

pub const ACCOMMODATIONS_FILE: &str = "accommodations.json";
pub const PACKAGES_FILE: &str = "packages.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccommodationType {
    Hotel,
    Resort,
    Lodge,
    Camp,
    Villa,
    Apartment,
}

impl AccommodationType {
    // Same spelling as the serialized form, which is what `type=` is matched against
    pub fn as_str(&self) -> &'static str {
        match self {
            AccommodationType::Hotel => "hotel",
            AccommodationType::Resort => "resort",
            AccommodationType::Lodge => "lodge",
            AccommodationType::Camp => "camp",
            AccommodationType::Villa => "villa",
            AccommodationType::Apartment => "apartment",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub country: String,
    pub city: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Accommodation {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub accommodation_type: AccommodationType,
    pub location: Location,
    pub price_per_night: f64,
    pub rating: f32,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default)]
    pub images: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItineraryDay {
    pub day: u32,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Package {
    pub id: String,
    pub title: String,
    pub destination: String,
    pub duration_days: u32,
    pub price: f64,
    pub currency: String,
    pub itinerary: Vec<ItineraryDay>,
    #[serde(default)]
    pub inclusions: Vec<String>,
}

// Records addressable by an exact id
pub trait Identified {
    fn id(&self) -> &str;
}

impl Identified for Accommodation {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Identified for Package {
    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, Default)]
pub struct Dataset {
    accommodations: Vec<Accommodation>,
    packages: Vec<Package>,
}

impl Dataset {
    pub fn new(
        accommodations: Vec<Accommodation>,
        packages: Vec<Package>,
    ) -> Result<Self, DatasetError> {
        ensure_unique_ids("accommodations", &accommodations)?;
        ensure_unique_ids("packages", &packages)?;

        Ok(Self {
            accommodations,
            packages,
        })
    }

    pub fn from_json(accommodations_json: &str, packages_json: &str) -> Result<Self, DatasetError> {
        let accommodations = parse_table("accommodations", accommodations_json)?;
        let packages = parse_table("packages", packages_json)?;
        Self::new(accommodations, packages)
    }

    pub fn embedded() -> Result<Self, DatasetError> {
        Self::from_json(EMBEDDED_ACCOMMODATIONS, EMBEDDED_PACKAGES)
    }

    // Load both tables from `dir`, or fall back to the embedded copies
    pub fn load(dir: Option<&Path>) -> Result<Self, DatasetError> {
        let dataset = match dir {
            Some(dir) => {
                let accommodations = read_file(&dir.join(ACCOMMODATIONS_FILE))?;
                let packages = read_file(&dir.join(PACKAGES_FILE))?;
                Self::from_json(&accommodations, &packages)?
            }
            None => Self::embedded()?,
        };

        let source = dir.map_or("embedded".to_string(), |d| d.display().to_string());
        info!(
            accommodations = dataset.accommodations.len(),
            packages = dataset.packages.len(),
            source = %source,
            "Dataset loaded"
        );

        Ok(dataset)
    }

    pub fn accommodations(&self) -> &[Accommodation] {
        &self.accommodations
    }

    pub fn packages(&self) -> &[Package] {
        &self.packages
    }
}

fn read_file(path: &Path) -> Result<String, DatasetError> {
    std::fs::read_to_string(path).map_err(|source| DatasetError::Io {
        path: path.display().to_string(),
        source,
    })
}

fn parse_table<T: for<'de> Deserialize<'de>>(
    table: &'static str,
    json: &str,
) -> Result<Vec<T>, DatasetError> {
    serde_json::from_str(json).map_err(|e| DatasetError::JsonParse {
        table,
        message: e.to_string(),
    })
}

fn ensure_unique_ids<T: Identified>(table: &'static str, items: &[T]) -> Result<(), DatasetError> {
    let mut seen = HashSet::new();
    for item in items {
        if !seen.insert(item.id()) {
            return Err(DatasetError::DuplicateId {
                table,
                id: item.id().to_string(),
            });
        }
    }
    Ok(())
}
