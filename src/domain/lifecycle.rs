//! Plant lifecycle state machine.
//!
//! Seedling -> Mature -> Dead. Dead is absorbing.

use std::fmt;

use crate::domain::plant::Plant;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LifecycleState {
    #[default]
    Seedling,
    Mature,
    Dead,
}

impl LifecycleState {
    pub fn can_sell(self) -> bool {
        matches!(self, LifecycleState::Mature)
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, LifecycleState::Dead)
    }

    /// Live states take a water dose; the plant checks for overwatering.
    pub(crate) fn handle_water(self, plant: &mut Plant) {
        match self {
            LifecycleState::Seedling | LifecycleState::Mature => {
                let dose = plant.care().water_dose;
                plant.add_water(dose);
            }
            LifecycleState::Dead => {}
        }
    }

    pub(crate) fn handle_lose_water(self, plant: &mut Plant) {
        match self {
            LifecycleState::Seedling | LifecycleState::Mature => plant.apply_water_loss(),
            LifecycleState::Dead => {}
        }
    }

    pub(crate) fn handle_expose_to_sunlight(self, plant: &mut Plant) {
        match self {
            LifecycleState::Seedling | LifecycleState::Mature => plant.apply_expose_to_sunlight(),
            LifecycleState::Dead => {}
        }
    }

    /// Growth beyond maturity is lethal.
    pub(crate) fn handle_grow(self, plant: &mut Plant) {
        match self {
            LifecycleState::Seedling => plant.set_state(LifecycleState::Mature),
            LifecycleState::Mature => plant.set_state(LifecycleState::Dead),
            LifecycleState::Dead => {}
        }
    }
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LifecycleState::Seedling => "seedling",
            LifecycleState::Mature => "mature",
            LifecycleState::Dead => "dead",
        };
        f.pad(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_mature_sells() {
        assert!(!LifecycleState::Seedling.can_sell());
        assert!(LifecycleState::Mature.can_sell());
        assert!(!LifecycleState::Dead.can_sell());
    }

    #[test]
    fn test_default_is_seedling() {
        assert_eq!(LifecycleState::default(), LifecycleState::Seedling);
    }
}
