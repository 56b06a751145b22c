//! Plant: the leaf component of the garden tree.

use std::fmt;

use tracing::debug;

use crate::domain::lifecycle::LifecycleState;
use crate::domain::strategy::{Location, Preference, SunlightStrategy, WaterLossStrategy};

/// Water added per `water()` call.
pub const WATER_DOSE: f64 = 0.35;
/// Age added per `grow()` call.
pub const AGE_STEP: u32 = 2;
/// Any age above this forces the plant to die.
pub const AGE_CEILING: u32 = 60;
/// `try_grow()` requires at least this water level.
pub const GROW_MIN_WATER: f64 = 0.5;
/// `try_grow()` requires at least this age.
pub const GROW_MIN_AGE: u32 = 5;
/// Water level of a freshly potted plant.
pub const INITIAL_WATER_LEVEL: f64 = 1.0;

/// Upper bound of a healthy water level; anything above drowns the plant.
const MAX_WATER_LEVEL: f64 = 1.0;
/// Lower bound of a healthy water level; anything below dehydrates the plant.
const MIN_WATER_LEVEL: f64 = 0.0;

/// Tunable care numbers carried by every plant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CareParams {
    pub water_dose: f64,
    pub age_step: u32,
    pub age_ceiling: u32,
    pub grow_min_water: f64,
    pub grow_min_age: u32,
    pub initial_water_level: f64,
}

impl Default for CareParams {
    fn default() -> Self {
        Self {
            water_dose: WATER_DOSE,
            age_step: AGE_STEP,
            age_ceiling: AGE_CEILING,
            grow_min_water: GROW_MIN_WATER,
            grow_min_age: GROW_MIN_AGE,
            initial_water_level: INITIAL_WATER_LEVEL,
        }
    }
}

/// A single plant with its lifecycle state and care strategies.
///
/// The plant exclusively owns its strategies and its current state;
/// replacing the state drops the previous one.
#[derive(Debug)]
pub struct Plant {
    name: String,
    price: f64,
    water_level: f64,
    age: u32,
    location: Location,
    water_loss: Box<dyn WaterLossStrategy>,
    sunlight: Box<dyn SunlightStrategy>,
    state: LifecycleState,
    care: CareParams,
}

impl Plant {
    /// Create a seedling with default care parameters.
    pub fn new(
        name: impl Into<String>,
        price: f64,
        water_loss: Box<dyn WaterLossStrategy>,
        sunlight: Box<dyn SunlightStrategy>,
    ) -> Self {
        Self::with_care(name, price, water_loss, sunlight, CareParams::default())
    }

    pub fn with_care(
        name: impl Into<String>,
        price: f64,
        water_loss: Box<dyn WaterLossStrategy>,
        sunlight: Box<dyn SunlightStrategy>,
        care: CareParams,
    ) -> Self {
        Self {
            name: name.into(),
            price,
            water_level: care.initial_water_level,
            age: 0,
            location: Location::Inside,
            water_loss,
            sunlight,
            state: LifecycleState::Seedling,
            care,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn water_level(&self) -> f64 {
        self.water_level
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn location(&self) -> Location {
        self.location
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    pub fn care(&self) -> &CareParams {
        &self.care
    }

    pub fn is_mature(&self) -> bool {
        self.state == LifecycleState::Mature
    }

    pub fn is_dead(&self) -> bool {
        self.state == LifecycleState::Dead
    }

    pub fn water_preference(&self) -> Preference {
        self.water_loss.preference()
    }

    pub fn sunlight_preference(&self) -> Preference {
        self.sunlight.preference()
    }

    pub fn can_sell(&self) -> bool {
        self.state.can_sell()
    }

    /// Water the plant through its current state.
    pub fn water(&mut self) {
        let state = self.state;
        state.handle_water(self);
        if self.water_level > MAX_WATER_LEVEL {
            self.set_state(LifecycleState::Dead);
        }
    }

    pub fn lose_water(&mut self) {
        let state = self.state;
        state.handle_lose_water(self);
        if self.water_level < MIN_WATER_LEVEL {
            self.set_state(LifecycleState::Dead);
        }
    }

    pub fn expose_to_sunlight(&mut self) {
        let state = self.state;
        state.handle_expose_to_sunlight(self);
    }

    /// Age the plant by one step and run the state's growth rule.
    ///
    /// Ungated: use [`Plant::try_grow`] for regular simulation ticks.
    pub fn grow(&mut self) {
        self.age = self.age.saturating_add(self.care.age_step);
        let state = self.state;
        state.handle_grow(self);
        self.enforce_age_ceiling();
    }

    /// Grow only when the plant is watered and old enough.
    pub fn try_grow(&mut self) -> bool {
        if self.water_level >= self.care.grow_min_water && self.age >= self.care.grow_min_age {
            self.grow();
            return true;
        }
        false
    }

    /// Calendar ageing without a lifecycle step.
    pub fn advance_age(&mut self, days: u32) {
        self.age = self.age.saturating_add(days);
        self.enforce_age_ceiling();
    }

    /// Add water directly, bypassing the state.
    pub fn add_water(&mut self, amount: f64) {
        self.water_level += amount;
        if self.water_level > MAX_WATER_LEVEL {
            self.set_state(LifecycleState::Dead);
        }
    }

    pub fn apply_water_loss(&mut self) {
        self.water_level -= self.water_loss.lose_water();
        if self.water_level < MIN_WATER_LEVEL {
            self.set_state(LifecycleState::Dead);
        }
    }

    pub fn apply_expose_to_sunlight(&mut self) {
        self.location = self.sunlight.expose_to_sun();
    }

    fn enforce_age_ceiling(&mut self) {
        if self.age > self.care.age_ceiling {
            self.set_state(LifecycleState::Dead);
        }
    }

    /// Replace the current state. Dead never transitions out.
    pub(crate) fn set_state(&mut self, next: LifecycleState) {
        if self.state == next || self.state.is_terminal() {
            return;
        }
        debug!(
            plant = %self.name,
            from = %self.state,
            to = %next,
            water = self.water_level,
            age = self.age,
            "lifecycle transition"
        );
        self.state = next;
    }
}

impl fmt::Display for Plant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}] water={:.2} age={} {}",
            self.name, self.state, self.water_level, self.age, self.location
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::strategy::{HighSunlight, HighWaterLoss, LowSunlight, LowWaterLoss};

    fn seedling(name: &str) -> Plant {
        Plant::new(name, 10.0, Box::new(LowWaterLoss), Box::new(LowSunlight))
    }

    #[test]
    fn test_new_plant_defaults() {
        let plant = seedling("Fern");
        assert_eq!(plant.state(), LifecycleState::Seedling);
        assert_eq!(plant.age(), 0);
        assert_eq!(plant.location(), Location::Inside);
        assert!((plant.water_level() - INITIAL_WATER_LEVEL).abs() < 1e-9);
    }

    #[test]
    fn test_dead_state_is_absorbing() {
        let mut plant = seedling("Fern");
        plant.add_water(2.0);
        assert!(plant.is_dead());
        plant.set_state(LifecycleState::Mature);
        assert!(plant.is_dead());
    }

    #[test]
    fn test_sunlight_moves_live_plant_only() {
        let mut plant = Plant::new("Cactus", 8.0, Box::new(HighWaterLoss), Box::new(HighSunlight));
        plant.expose_to_sunlight();
        assert_eq!(plant.location(), Location::Outside);
    }

    #[test]
    fn test_advance_age_past_ceiling_kills() {
        let mut plant = seedling("Fern");
        plant.advance_age(AGE_CEILING);
        assert!(!plant.is_dead());
        plant.advance_age(1);
        assert!(plant.is_dead());
    }
}
