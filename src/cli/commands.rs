//! Command dispatch
//!
//! Every command works on a nursery stocked from settings within one run.

use std::io;

use clap::CommandFactory;
use clap_complete::generate;
use itertools::Itertools;
use tracing::{debug, instrument};

use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{global_config_path, Settings};
use crate::infrastructure::ServiceContainer;
use crate::tree_traits::TreeNodeConvert;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        Commands::Config { command } => execute_config(cli, command),
        Commands::Completion { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
        command => {
            let settings = Settings::load(cli.config.as_deref())?;
            debug!("settings: {:?}", settings);
            let container = ServiceContainer::new(settings);
            match command {
                Commands::Tree => cmd_tree(&container),
                Commands::Simulate { days } => cmd_simulate(&container, *days),
                Commands::Find { name } => cmd_find(&container, name),
                Commands::Sell { name, days } => cmd_sell(&container, name, *days),
                Commands::Catalog => cmd_catalog(&container),
                Commands::Config { .. } | Commands::Completion { .. } => Ok(()),
            }
        }
    }
}

fn execute_config(cli: &Cli, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            let settings = Settings::load(cli.config.as_deref())?;
            output::info(&settings.to_toml()?);
        }
        ConfigCommands::Template => output::info(&Settings::template()),
        ConfigCommands::Path => match global_config_path() {
            Some(path) => {
                output::info(&path.display());
                if !path.exists() {
                    output::warning("global config file does not exist");
                }
            }
            None => output::warning("no config directory available on this platform"),
        },
    }
    Ok(())
}

#[instrument(level = "debug", skip(container))]
fn cmd_tree(container: &ServiceContainer) -> CliResult<()> {
    let nursery = container.stocked_nursery()?;
    let garden = nursery.garden();
    let root = garden.root();

    output::info(&garden.to_tree_string());
    output::detail(&format!(
        "{} plants in {} sections, depth {}",
        garden.plants(root).count(),
        garden.sections(root).count(),
        garden.depth()
    ));
    Ok(())
}

fn resolve_days(container: &ServiceContainer, days: Option<u32>) -> CliResult<u32> {
    match days.unwrap_or(container.settings.simulation.days) {
        0 => Err(CliError::Usage("days must be at least 1".into())),
        n => Ok(n),
    }
}

#[instrument(level = "debug", skip(container))]
fn cmd_simulate(container: &ServiceContainer, days: Option<u32>) -> CliResult<()> {
    let days = resolve_days(container, days)?;
    let mut simulation = container.simulation()?;
    let summaries = simulation.run(days)?;

    output::header(&format!("{days} days in {}", container.settings.root_name));
    for s in &summaries {
        output::detail(&format!(
            "day {:>3}: {:>3} plants ({} seedling, {} mature, {} sellable)  watered={} grown={} cleared={}",
            s.day, s.plants, s.seedlings, s.mature, s.sellable, s.watered, s.grown, s.cleared
        ));
    }

    let garden = simulation.nursery().garden();
    for (_, component) in garden.plants(garden.root()) {
        if let Some(plant) = component.as_plant() {
            output::detail(&output::plant_line(plant));
        }
    }
    Ok(())
}

#[instrument(level = "debug", skip(container))]
fn cmd_find(container: &ServiceContainer, name: &str) -> CliResult<()> {
    let nursery = container.stocked_nursery()?;
    let id = nursery
        .find(name)
        .ok_or_else(|| CliError::NotFound(format!("plant '{name}'")))?;

    let garden = nursery.garden();
    let section = garden
        .parent(id)
        .and_then(|parent| garden.component(parent))
        .map(|c| c.name().to_string())
        .unwrap_or_default();
    if let Some(plant) = nursery.plant(id) {
        output::action("found", &format!("{} in {}/", output::plant_line(plant), section));
    }
    Ok(())
}

#[instrument(level = "debug", skip(container))]
fn cmd_sell(container: &ServiceContainer, name: &str, days: Option<u32>) -> CliResult<()> {
    let days = resolve_days(container, days)?;
    let mut simulation = container.simulation()?;
    simulation.run(days)?;

    let plant = simulation
        .nursery_mut()
        .take_mature(name)
        .ok_or_else(|| CliError::NotFound(format!("no mature '{name}' after {days} days")))?;
    output::action("sold", &format!("{} for {:.2}", plant.name(), plant.price()));
    Ok(())
}

fn cmd_catalog(container: &ServiceContainer) -> CliResult<()> {
    let entries = container
        .catalog
        .entries()
        .into_iter()
        .sorted_by(|(a_name, a), (b_name, b)| {
            a.section.cmp(&b.section).then_with(|| a_name.cmp(b_name))
        });
    let by_section = entries.chunk_by(|(_, entry)| entry.section.clone());

    for (section, group) in &by_section {
        output::header(&format!("{section}/"));
        for (name, entry) in group {
            output::detail(&format!(
                "{:<18} sun={:<6} water={:<6} {:>7.2}",
                name, entry.sunlight, entry.water, entry.price
            ));
        }
    }
    Ok(())
}
