//! Care strategies: water-loss rate and sunlight-driven placement.
//!
//! Strategies are pure policies. Each one reports its tier through
//! `preference()` so callers never need to inspect the concrete type.

use std::fmt;

/// Water lost per `lose_water()` for low-loss plants.
pub const LOW_WATER_LOSS: f64 = 0.10;
/// Water lost per `lose_water()` for medium-loss plants.
pub const MEDIUM_WATER_LOSS: f64 = 0.25;
/// Water lost per `lose_water()` for high-loss plants.
pub const HIGH_WATER_LOSS: f64 = 0.35;

/// Tier of a care preference (sunlight or water).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Preference {
    Low,
    Medium,
    High,
}

impl fmt::Display for Preference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Preference::Low => "low",
            Preference::Medium => "medium",
            Preference::High => "high",
        };
        f.pad(s)
    }
}

/// Where a plant is currently placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Location {
    Outside,
    Greenhouse,
    Inside,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Location::Outside => "outside",
            Location::Greenhouse => "greenhouse",
            Location::Inside => "inside",
        };
        f.pad(s)
    }
}

/// Policy deciding how much water a plant loses per tick.
pub trait WaterLossStrategy: fmt::Debug + Send + Sync {
    /// Amount subtracted from the water level.
    fn lose_water(&self) -> f64;

    fn preference(&self) -> Preference;
}

/// Policy deciding where a plant goes when exposed to sunlight.
pub trait SunlightStrategy: fmt::Debug + Send + Sync {
    /// Target location for the plant.
    fn expose_to_sun(&self) -> Location;

    fn preference(&self) -> Preference;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LowWaterLoss;

#[derive(Debug, Clone, Copy, Default)]
pub struct MediumWaterLoss;

#[derive(Debug, Clone, Copy, Default)]
pub struct HighWaterLoss;

impl WaterLossStrategy for LowWaterLoss {
    fn lose_water(&self) -> f64 {
        LOW_WATER_LOSS
    }

    fn preference(&self) -> Preference {
        Preference::Low
    }
}

impl WaterLossStrategy for MediumWaterLoss {
    fn lose_water(&self) -> f64 {
        MEDIUM_WATER_LOSS
    }

    fn preference(&self) -> Preference {
        Preference::Medium
    }
}

impl WaterLossStrategy for HighWaterLoss {
    fn lose_water(&self) -> f64 {
        HIGH_WATER_LOSS
    }

    fn preference(&self) -> Preference {
        Preference::High
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LowSunlight;

#[derive(Debug, Clone, Copy, Default)]
pub struct MediumSunlight;

#[derive(Debug, Clone, Copy, Default)]
pub struct HighSunlight;

impl SunlightStrategy for LowSunlight {
    fn expose_to_sun(&self) -> Location {
        Location::Inside
    }

    fn preference(&self) -> Preference {
        Preference::Low
    }
}

impl SunlightStrategy for MediumSunlight {
    fn expose_to_sun(&self) -> Location {
        Location::Greenhouse
    }

    fn preference(&self) -> Preference {
        Preference::Medium
    }
}

impl SunlightStrategy for HighSunlight {
    fn expose_to_sun(&self) -> Location {
        Location::Outside
    }

    fn preference(&self) -> Preference {
        Preference::High
    }
}

/// Water-loss strategy for a tier.
pub fn water_loss_for(preference: Preference) -> Box<dyn WaterLossStrategy> {
    match preference {
        Preference::Low => Box::new(LowWaterLoss),
        Preference::Medium => Box::new(MediumWaterLoss),
        Preference::High => Box::new(HighWaterLoss),
    }
}

/// Sunlight strategy for a tier.
pub fn sunlight_for(preference: Preference) -> Box<dyn SunlightStrategy> {
    match preference {
        Preference::Low => Box::new(LowSunlight),
        Preference::Medium => Box::new(MediumSunlight),
        Preference::High => Box::new(HighSunlight),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loss_tiers_are_ordered() {
        assert!(LowWaterLoss.lose_water() < MediumWaterLoss.lose_water());
        assert!(MediumWaterLoss.lose_water() < HighWaterLoss.lose_water());
    }

    #[test]
    fn test_factories_round_trip_preference() {
        for pref in [Preference::Low, Preference::Medium, Preference::High] {
            assert_eq!(water_loss_for(pref).preference(), pref);
            assert_eq!(sunlight_for(pref).preference(), pref);
        }
    }
}
