//! Nursery registry tests.

use std::collections::BTreeMap;
use std::sync::Arc;

use nursery::application::services::{Nursery, PlantFactory};
use nursery::application::ApplicationError;
use nursery::domain::{CareParams, LifecycleState, Preference, Section};
use nursery::infrastructure::BuiltinCatalog;
use nursery::util::testing::{empty_nursery, init_test_setup, mature, seedling};

fn factory() -> PlantFactory {
    PlantFactory::new(Arc::new(BuiltinCatalog::new()), CareParams::default())
}

fn sections_named(nursery: &Nursery, name: &str) -> usize {
    let garden = nursery.garden();
    garden
        .sections(garden.root())
        .filter(|(_, c)| c.name() == name)
        .count()
}

// ============================================================
// Sections
// ============================================================

#[test]
fn given_section_added_twice_when_adding_then_same_section_returned() {
    init_test_setup();
    let mut nursery = empty_nursery();

    let first = nursery.add_section("A").unwrap();
    let second = nursery.add_section("A").unwrap();

    assert_eq!(first, second);
    assert_eq!(sections_named(&nursery, "A"), 1);
}

#[test]
fn given_parent_name_when_adding_section_then_nested_under_parent() {
    let mut nursery = empty_nursery();
    let herbs = nursery.add_section("herbs").unwrap();
    let pots = nursery.add_section_under("pots", "herbs").unwrap();

    assert_eq!(nursery.garden().parent(pots), Some(herbs));
    assert_eq!(nursery.find_section("pots"), Some(pots));
}

#[test]
fn given_empty_parent_when_adding_section_then_goes_to_root() {
    let mut nursery = empty_nursery();
    let herbs = nursery.add_section_under("herbs", "").unwrap();
    assert_eq!(nursery.garden().parent(herbs), Some(nursery.root()));
}

#[test]
fn given_missing_parent_or_empty_name_when_adding_section_then_invalid_argument() {
    let mut nursery = empty_nursery();
    assert!(nursery.add_section_under("pots", "nowhere").is_err());
    assert!(nursery.add_section("").is_err());
    assert_eq!(nursery.garden().node_count(), 1);
}

// ============================================================
// Lazy reconciliation
// ============================================================

#[test]
fn given_section_added_directly_when_find_section_then_indexed_lazily() {
    let mut nursery = empty_nursery();
    let root = nursery.root();
    let hidden = nursery
        .garden_mut()
        .add(root, Section::new("hidden"))
        .unwrap();
    assert!(!nursery.is_consistent());

    assert_eq!(nursery.find_section("hidden"), Some(hidden));
    assert!(nursery.is_consistent());
    assert!(nursery.section_names().contains(&"hidden"));
}

#[test]
fn given_section_removed_directly_when_find_section_then_stale_entry_purged() {
    let mut nursery = empty_nursery();
    let root = nursery.root();
    let b = nursery.add_section("B").unwrap();
    nursery.garden_mut().remove(root, b).unwrap();

    assert_eq!(nursery.find_section("B"), None);
    assert!(!nursery.section_names().contains(&"B"));
    assert!(nursery.is_consistent());
}

#[test]
fn given_out_of_band_changes_when_reconcile_then_consistent() {
    let mut nursery = empty_nursery();
    let root = nursery.root();
    let gone = nursery.add_section("gone").unwrap();
    nursery.garden_mut().remove(root, gone).unwrap();
    nursery
        .garden_mut()
        .add(root, Section::new("new"))
        .unwrap();

    nursery.reconcile();

    assert!(nursery.is_consistent());
    assert_eq!(nursery.section_names(), vec!["greenhouse", "new"]);
}

// ============================================================
// Plants
// ============================================================

#[test]
fn given_catalog_plant_when_added_then_routed_to_its_section() {
    let mut nursery = empty_nursery();
    let rose = nursery.add_plant(mature("rose")).unwrap();

    let flowering = nursery.find_section("flowering").unwrap();
    assert_eq!(nursery.garden().parent(rose), Some(flowering));
}

#[test]
fn given_unknown_plant_when_added_then_goes_to_root() {
    let mut nursery = empty_nursery();
    let tulip = nursery
        .add_plant(seedling("tulip", Preference::Low, Preference::Low))
        .unwrap();
    assert_eq!(nursery.garden().parent(tulip), Some(nursery.root()));
}

#[test]
fn given_absent_name_when_removing_then_false_and_tree_unchanged() {
    let mut nursery = empty_nursery();
    nursery.add_plant(mature("rose")).unwrap();
    let size = nursery.garden().node_count();

    assert!(!nursery.remove_plant_by_name("orchid"));
    assert!(!nursery.remove_plant_by_name(""));
    assert_eq!(nursery.garden().node_count(), size);
}

#[test]
fn given_present_name_when_removing_then_first_match_removed() {
    let mut nursery = empty_nursery();
    nursery.add_plant(mature("rose")).unwrap();
    nursery.add_plant(mature("rose")).unwrap();

    assert!(nursery.remove_plant_by_name("rose"));
    assert!(nursery.find("rose").is_some());
    assert!(nursery.remove_plant_by_name("rose"));
    assert!(nursery.find("rose").is_none());
}

#[test]
fn given_section_handle_when_remove_plant_then_false() {
    let mut nursery = empty_nursery();
    let herbs = nursery.add_section("herbs").unwrap();
    assert!(!nursery.remove_plant(herbs));
    assert!(nursery.find_section("herbs").is_some());
}

#[test]
fn given_mixed_states_when_clear_all_dead_then_only_dead_removed() {
    let mut nursery = empty_nursery();
    let mut dead_rose = mature("rose");
    dead_rose.grow();
    let mut dead_basil = mature("basil");
    dead_basil.grow();

    nursery.add_plant(dead_rose).unwrap();
    nursery.add_plant(dead_basil).unwrap();
    nursery.add_plant(mature("orchid")).unwrap();
    nursery
        .add_plant(seedling("mint", Preference::High, Preference::Medium))
        .unwrap();

    assert_eq!(nursery.clear_all_dead(), 2);

    let garden = nursery.garden();
    let states: Vec<LifecycleState> = garden
        .plants(garden.root())
        .filter_map(|(_, c)| c.as_plant().map(|p| p.state()))
        .collect();
    assert_eq!(states, vec![LifecycleState::Mature, LifecycleState::Seedling]);
    assert_eq!(nursery.clear_all_dead(), 0);
}

#[test]
fn given_seedling_and_mature_when_find_mature_then_skips_seedling() {
    let mut nursery = empty_nursery();
    nursery
        .add_plant(seedling("rose", Preference::Medium, Preference::High))
        .unwrap();
    let ripe = nursery.add_plant(mature("rose")).unwrap();

    assert_eq!(nursery.find_mature("rose"), Some(ripe));
}

#[test]
fn given_mature_plant_when_take_mature_then_detached_and_returned() {
    let mut nursery = empty_nursery();
    nursery.add_plant(mature("orchid")).unwrap();

    let plant = nursery.take_mature("orchid").unwrap();

    assert_eq!(plant.name(), "orchid");
    assert!(plant.can_sell());
    assert!(nursery.find("orchid").is_none());
    assert!(nursery.take_mature("orchid").is_none());
}

// ============================================================
// Stocking
// ============================================================

#[test]
fn given_selection_when_stocking_then_plants_created_in_sections() {
    let mut nursery = empty_nursery();
    let selection: BTreeMap<String, u32> =
        [("basil".to_string(), 2), ("cactus".to_string(), 1)].into();

    let added = nursery.stock(&factory(), &selection).unwrap();

    assert_eq!(added, 3);
    let herb = nursery.find_section("herb").unwrap();
    assert_eq!(nursery.garden().children(herb).len(), 2);
    assert!(nursery.find_section("succulent").is_some());
    assert!(nursery.is_consistent());
}

#[test]
fn given_unknown_name_when_stocking_then_unknown_plant_error() {
    let mut nursery = empty_nursery();
    let selection: BTreeMap<String, u32> = [("triffid".to_string(), 1)].into();

    let err = nursery.stock(&factory(), &selection).unwrap_err();
    assert!(matches!(err, ApplicationError::UnknownPlant(name) if name == "triffid"));
}
