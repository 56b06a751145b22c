//! Day driver tests over the default stock.
//!
//! With the canonical care numbers every default plant matures on day 5 and
//! dies on its next gated growth, day 6.

use nursery::application::services::Simulation;
use nursery::config::Settings;
use nursery::infrastructure::ServiceContainer;
use nursery::util::testing::{empty_nursery, init_test_setup};

fn default_simulation() -> (Simulation, usize) {
    let settings = Settings::default();
    let stocked = settings.stock.values().sum::<u32>() as usize;
    let simulation = ServiceContainer::new(settings).simulation().unwrap();
    (simulation, stocked)
}

#[test]
fn given_fresh_stock_when_first_day_then_all_seedlings() {
    init_test_setup();
    let (mut simulation, stocked) = default_simulation();

    let day = simulation.step().unwrap();

    assert_eq!(day.day, 1);
    assert_eq!(day.plants, stocked);
    assert_eq!(day.seedlings, stocked);
    assert_eq!(day.grown, 0);
    assert_eq!(day.cleared, 0);
}

#[test]
fn given_high_water_loss_plants_when_second_day_then_thirsty_ones_watered() {
    let (mut simulation, _) = default_simulation();
    let days = simulation.run(2).unwrap();

    // only basil (high loss) drops below the threshold by day 2
    assert_eq!(days[0].watered, 0);
    assert_eq!(days[1].watered, 4);
}

#[test]
fn given_five_days_when_run_then_whole_stock_sellable() {
    let (mut simulation, stocked) = default_simulation();

    let days = simulation.run(5).unwrap();

    let last = days.last().unwrap();
    assert_eq!(last.day, 5);
    assert_eq!(last.grown, stocked);
    assert_eq!(last.mature, stocked);
    assert_eq!(last.sellable, stocked);
    let nursery = simulation.nursery();
    assert!(nursery.garden().can_sell(nursery.root()).unwrap());
}

#[test]
fn given_mature_stock_when_next_day_then_grows_to_death_and_cleared() {
    let (mut simulation, stocked) = default_simulation();

    let days = simulation.run(6).unwrap();

    let last = days.last().unwrap();
    assert_eq!(last.cleared, stocked);
    assert_eq!(last.plants, 0);
    assert_eq!(simulation.day(), 6);
}

#[test]
fn given_mature_day_when_taking_plant_then_sold_plant_leaves_nursery() {
    let (mut simulation, stocked) = default_simulation();
    simulation.run(5).unwrap();

    let rose = simulation.nursery_mut().take_mature("rose").unwrap();

    assert!(rose.can_sell());
    let garden = simulation.nursery().garden();
    assert_eq!(garden.plants(garden.root()).count(), stocked - 1);
}

#[test]
fn given_empty_nursery_when_run_then_quiet_days() {
    let mut simulation = Simulation::new(empty_nursery(), 0.5);
    let days = simulation.run(3).unwrap();
    assert_eq!(days.len(), 3);
    assert!(days.iter().all(|d| d.plants == 0 && d.cleared == 0));
}
