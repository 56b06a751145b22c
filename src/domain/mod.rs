//! Domain layer: garden tree, plants and their care rules
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod error;
pub mod garden;
pub mod iter;
pub mod lifecycle;
pub mod plant;
pub mod strategy;

pub use error::{GardenError, GardenResult};
pub use garden::{Component, Garden, GardenNode, NodeId, Section};
pub use iter::{LevelOrderIter, PlantIter, SectionIter, Traversal};
pub use lifecycle::LifecycleState;
pub use plant::{CareParams, Plant};
pub use strategy::*;
