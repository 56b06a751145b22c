//! Plant factory
//!
//! Builds seedlings from catalog entries with matching care strategies.

use std::sync::Arc;

use tracing::debug;

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{sunlight_for, water_loss_for, CareParams, Plant};
use crate::infrastructure::traits::PlantCatalog;

/// Creates plants for catalog names.
pub struct PlantFactory {
    catalog: Arc<dyn PlantCatalog>,
    care: CareParams,
}

impl PlantFactory {
    pub fn new(catalog: Arc<dyn PlantCatalog>, care: CareParams) -> Self {
        Self { catalog, care }
    }

    /// Create a seedling for `name`.
    ///
    /// The plant keeps the caller's spelling of the name; strategies follow
    /// the catalog's sunlight and water tiers.
    pub fn create(&self, name: &str) -> ApplicationResult<Plant> {
        let entry = self
            .catalog
            .lookup(name)
            .ok_or_else(|| ApplicationError::UnknownPlant(name.to_string()))?;
        debug!(
            "create: {} (section={}, sun={}, water={})",
            name, entry.section, entry.sunlight, entry.water
        );
        Ok(Plant::with_care(
            name,
            entry.price,
            water_loss_for(entry.water),
            sunlight_for(entry.sunlight),
            self.care,
        ))
    }
}
