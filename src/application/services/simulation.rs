//! Day-by-day driver over a stocked nursery.

use tracing::{debug, info, instrument};

use crate::application::services::Nursery;
use crate::application::ApplicationResult;
use crate::domain::{LifecycleState, NodeId, Plant};

/// Plants below this water level get watered at the end of a day.
pub const DEFAULT_THIRST_THRESHOLD: f64 = 0.5;

/// Counters collected at the end of one simulated day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DaySummary {
    pub day: u32,
    pub plants: usize,
    pub seedlings: usize,
    pub mature: usize,
    pub sellable: usize,
    pub watered: usize,
    pub grown: usize,
    pub cleared: usize,
}

/// Runs the daily maintenance cycle on a nursery.
pub struct Simulation {
    nursery: Nursery,
    thirst_threshold: f64,
    day: u32,
}

impl Simulation {
    pub fn new(nursery: Nursery, thirst_threshold: f64) -> Self {
        Self {
            nursery,
            thirst_threshold,
            day: 0,
        }
    }

    pub fn nursery(&self) -> &Nursery {
        &self.nursery
    }

    pub fn nursery_mut(&mut self) -> &mut Nursery {
        &mut self.nursery
    }

    pub fn into_nursery(self) -> Nursery {
        self.nursery
    }

    /// Days simulated so far.
    pub fn day(&self) -> u32 {
        self.day
    }

    pub fn run(&mut self, days: u32) -> ApplicationResult<Vec<DaySummary>> {
        (0..days).map(|_| self.step()).collect()
    }

    /// One day: sunlight, evaporation, watering of thirsty plants, ageing,
    /// gated growth, then removal of the dead.
    #[instrument(level = "debug", skip(self), fields(day = self.day + 1))]
    pub fn step(&mut self) -> ApplicationResult<DaySummary> {
        self.day += 1;
        let root = self.nursery.root();
        let threshold = self.thirst_threshold;

        let garden = self.nursery.garden_mut();
        garden.expose_to_sunlight(root)?;
        garden.lose_water(root)?;

        let thirsty: Vec<NodeId> = garden
            .plants(root)
            .filter(|(_, c)| {
                c.as_plant()
                    .is_some_and(|p| !p.is_dead() && p.water_level() < threshold)
            })
            .map(|(idx, _)| idx)
            .collect();
        for &idx in &thirsty {
            garden.water(idx)?;
        }

        garden.advance_age(root, 1)?;
        let grown = garden.try_grow(root)?;
        let cleared = self.nursery.clear_all_dead();

        let summary = self.summarize(thirsty.len(), grown, cleared);
        debug!(?summary, "day complete");
        if summary.cleared > 0 {
            info!("day {}: {} plants died", summary.day, summary.cleared);
        }
        Ok(summary)
    }

    fn summarize(&self, watered: usize, grown: usize, cleared: usize) -> DaySummary {
        let garden = self.nursery.garden();
        let plants: Vec<&Plant> = garden
            .plants(garden.root())
            .filter_map(|(_, c)| c.as_plant())
            .collect();
        let count = |state: LifecycleState| plants.iter().filter(|p| p.state() == state).count();

        DaySummary {
            day: self.day,
            plants: plants.len(),
            seedlings: count(LifecycleState::Seedling),
            mature: count(LifecycleState::Mature),
            sellable: plants.iter().filter(|p| p.can_sell()).count(),
            watered,
            grown,
            cleared,
        }
    }
}
