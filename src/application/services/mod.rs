//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services depend on boundary traits (PlantCatalog) but are themselves
//! concrete structs, not traits.

mod nursery;
mod simulation;
mod stocking;

pub use nursery::{Nursery, DEFAULT_ROOT_NAME};
pub use simulation::{DaySummary, Simulation, DEFAULT_THIRST_THRESHOLD};
pub use stocking::PlantFactory;
