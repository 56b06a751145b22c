//! Test setup and fixtures shared by unit and integration tests.

use std::sync::{Arc, Once};

use tracing::{debug, info};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use crate::application::services::{Nursery, DEFAULT_ROOT_NAME};
use crate::domain::{sunlight_for, water_loss_for, Plant, Preference};
use crate::infrastructure::traits::BuiltinCatalog;

static TEST_SETUP: Once = Once::new();

/// Install the test logging subscriber once per process.
///
/// `RUST_LOG` takes precedence; otherwise the crate logs at debug level.
pub fn init_test_setup() {
    TEST_SETUP.call_once(|| {
        setup_test_logging();
        info!("Test Setup complete");
    });
}

fn setup_test_logging() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("nursery=debug"));

    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .with_test_writer()
            .with_target(true)
            .with_thread_names(false)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(env_filter),
    );

    if tracing::dispatcher::has_been_set() {
        debug!("Tracing subscriber already set");
    } else {
        subscriber.try_init().unwrap_or_else(|e| {
            eprintln!("Error: Failed to set up logging: {}", e);
        });
    }
}

/// Seedling with default care and the given strategy tiers.
pub fn seedling(name: &str, water: Preference, sunlight: Preference) -> Plant {
    Plant::new(name, 1.0, water_loss_for(water), sunlight_for(sunlight))
}

/// Mature plant (one unconditional growth step from seedling).
pub fn mature(name: &str) -> Plant {
    let mut plant = seedling(name, Preference::Low, Preference::Low);
    plant.grow();
    plant
}

/// Empty nursery over the built-in catalog.
pub fn empty_nursery() -> Nursery {
    Nursery::new(DEFAULT_ROOT_NAME, Arc::new(BuiltinCatalog::new()))
}
