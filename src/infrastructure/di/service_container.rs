//! Service container for dependency injection
//!
//! Wires up the catalog, factory, nursery and day driver from settings.

use std::sync::Arc;

use tracing::instrument;

use crate::application::services::{Nursery, PlantFactory, Simulation};
use crate::application::ApplicationResult;
use crate::config::Settings;
use crate::infrastructure::traits::{BuiltinCatalog, PlantCatalog};

/// Container holding the shared collaborators of all services.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Plant classification
    pub catalog: Arc<dyn PlantCatalog>,
}

impl ServiceContainer {
    /// Create a new service container with the built-in catalog.
    pub fn new(settings: Settings) -> Self {
        Self::with_deps(settings, Arc::new(BuiltinCatalog::new()))
    }

    /// Create a service container with a custom catalog (for testing).
    pub fn with_deps(settings: Settings, catalog: Arc<dyn PlantCatalog>) -> Self {
        Self {
            settings: Arc::new(settings),
            catalog,
        }
    }

    pub fn plant_factory(&self) -> PlantFactory {
        PlantFactory::new(Arc::clone(&self.catalog), self.settings.care_params())
    }

    /// Empty nursery rooted at the configured root section.
    pub fn empty_nursery(&self) -> Nursery {
        Nursery::new(self.settings.root_name.clone(), Arc::clone(&self.catalog))
    }

    /// Nursery stocked with the configured selection.
    #[instrument(level = "debug", skip(self))]
    pub fn stocked_nursery(&self) -> ApplicationResult<Nursery> {
        let mut nursery = self.empty_nursery();
        nursery.stock(&self.plant_factory(), &self.settings.stock)?;
        Ok(nursery)
    }

    /// Day driver over a freshly stocked nursery.
    pub fn simulation(&self) -> ApplicationResult<Simulation> {
        Ok(Simulation::new(
            self.stocked_nursery()?,
            self.settings.simulation.thirst_threshold,
        ))
    }
}
