//! Boundary traits for external collaborators
//!
//! The plant catalog classifies plants by name. Services depend on the
//! trait so tests can supply their own catalog.

use std::collections::BTreeMap;

use crate::domain::Preference;

/// Classification of a plant kind.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogEntry {
    /// Section the plant is routed to
    pub section: String,
    pub sunlight: Preference,
    pub water: Preference,
    /// List price of one plant
    pub price: f64,
}

impl CatalogEntry {
    pub fn new(section: &str, sunlight: Preference, water: Preference, price: f64) -> Self {
        Self {
            section: section.to_string(),
            sunlight,
            water,
            price,
        }
    }
}

/// Plant classification lookup.
pub trait PlantCatalog: Send + Sync {
    /// Look up a plant kind by name (case-insensitive).
    fn lookup(&self, name: &str) -> Option<CatalogEntry>;

    /// All known plant names with their entries, sorted by name.
    fn entries(&self) -> Vec<(String, CatalogEntry)>;

    /// Section a plant of this name belongs to.
    fn section_for(&self, name: &str) -> Option<String> {
        self.lookup(name).map(|entry| entry.section)
    }
}

/// Built-in catalog of the nursery's stock.
#[derive(Debug, Clone)]
pub struct BuiltinCatalog {
    plants: BTreeMap<String, CatalogEntry>,
}

impl Default for BuiltinCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl BuiltinCatalog {
    pub fn new() -> Self {
        use Preference::{High, Low, Medium};

        let rows: [(&str, &str, Preference, Preference, f64); 20] = [
            ("cactus", "succulent", High, Low, 8.0),
            ("aloe vera", "succulent", High, Low, 12.0),
            ("jade plant", "succulent", High, Low, 15.0),
            ("haworthia", "succulent", Medium, Low, 9.0),
            ("echeveria", "succulent", High, Low, 7.5),
            ("monstera", "tropical", Medium, Medium, 35.0),
            ("philodendron", "tropical", Medium, Medium, 22.0),
            ("pothos", "tropical", Low, Medium, 14.0),
            ("bird of paradise", "tropical", High, Medium, 45.0),
            ("peace lily", "tropical", Low, High, 18.0),
            ("basil", "herb", High, High, 4.0),
            ("mint", "herb", Medium, High, 4.0),
            ("rosemary", "herb", High, Low, 5.0),
            ("thyme", "herb", High, Low, 4.5),
            ("oregano", "herb", High, Low, 4.5),
            ("rose", "flowering", High, Medium, 20.0),
            ("lavender", "flowering", High, Low, 11.0),
            ("orchid", "flowering", Low, Medium, 28.0),
            ("sunflower", "flowering", High, High, 6.0),
            ("hydrangea", "flowering", Low, High, 24.0),
        ];

        let plants = rows
            .into_iter()
            .map(|(name, section, sunlight, water, price)| {
                (
                    name.to_string(),
                    CatalogEntry::new(section, sunlight, water, price),
                )
            })
            .collect();
        Self { plants }
    }
}

impl PlantCatalog for BuiltinCatalog {
    fn lookup(&self, name: &str) -> Option<CatalogEntry> {
        self.plants.get(&name.trim().to_lowercase()).cloned()
    }

    fn entries(&self) -> Vec<(String, CatalogEntry)> {
        self.plants
            .iter()
            .map(|(name, entry)| (name.clone(), entry.clone()))
            .collect()
    }
}
