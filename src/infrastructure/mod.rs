//! Infrastructure layer: external collaborators and DI container
//!
//! This layer provides the plant catalog and wires up services.

pub mod di;
pub mod traits;

pub use di::ServiceContainer;
pub use traits::{BuiltinCatalog, CatalogEntry, PlantCatalog};
