//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/nursery/nursery.toml`
//! 3. Explicit config file (`--config <file>`)
//! 4. Environment variables: `NURSERY_*` prefix, `__` separates sections

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::services::{DEFAULT_ROOT_NAME, DEFAULT_THIRST_THRESHOLD};
use crate::application::ApplicationError;
use crate::domain::CareParams;

/// Plant care numbers.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CareConfig {
    /// Water added per watering
    pub water_dose: f64,
    /// Age added per growth step
    pub age_step: u32,
    /// Plants older than this die
    pub age_ceiling: u32,
    /// Minimum water level for gated growth
    pub grow_min_water: f64,
    /// Minimum age for gated growth
    pub grow_min_age: u32,
    /// Water level of new plants
    pub initial_water_level: f64,
}

impl Default for CareConfig {
    fn default() -> Self {
        CareParams::default().into()
    }
}

impl From<CareParams> for CareConfig {
    fn from(p: CareParams) -> Self {
        Self {
            water_dose: p.water_dose,
            age_step: p.age_step,
            age_ceiling: p.age_ceiling,
            grow_min_water: p.grow_min_water,
            grow_min_age: p.grow_min_age,
            initial_water_level: p.initial_water_level,
        }
    }
}

impl From<CareConfig> for CareParams {
    fn from(c: CareConfig) -> Self {
        Self {
            water_dose: c.water_dose,
            age_step: c.age_step,
            age_ceiling: c.age_ceiling,
            grow_min_water: c.grow_min_water,
            grow_min_age: c.grow_min_age,
            initial_water_level: c.initial_water_level,
        }
    }
}

/// Raw care config for intermediate parsing (`None` → inherit from base).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawCareConfig {
    pub water_dose: Option<f64>,
    pub age_step: Option<u32>,
    pub age_ceiling: Option<u32>,
    pub grow_min_water: Option<f64>,
    pub grow_min_age: Option<u32>,
    pub initial_water_level: Option<f64>,
}

impl CareConfig {
    /// Scalar options: overlay wins if Some, otherwise keep base.
    pub fn merge(&self, overlay: &RawCareConfig) -> Self {
        Self {
            water_dose: overlay.water_dose.unwrap_or(self.water_dose),
            age_step: overlay.age_step.unwrap_or(self.age_step),
            age_ceiling: overlay.age_ceiling.unwrap_or(self.age_ceiling),
            grow_min_water: overlay.grow_min_water.unwrap_or(self.grow_min_water),
            grow_min_age: overlay.grow_min_age.unwrap_or(self.grow_min_age),
            initial_water_level: overlay
                .initial_water_level
                .unwrap_or(self.initial_water_level),
        }
    }
}

/// Day driver settings.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SimulationConfig {
    /// Number of days to simulate
    pub days: u32,
    /// Plants below this water level are watered each day
    pub thirst_threshold: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            days: 5,
            thirst_threshold: DEFAULT_THIRST_THRESHOLD,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSimulationConfig {
    pub days: Option<u32>,
    pub thirst_threshold: Option<f64>,
}

/// Raw settings for intermediate parsing.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub root_name: Option<String>,
    pub care: RawCareConfig,
    pub simulation: RawSimulationConfig,
    pub stock: Option<BTreeMap<String, u32>>,
}

/// Unified configuration for nursery.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Name of the root section (default: greenhouse)
    pub root_name: String,
    /// Plant care numbers
    pub care: CareConfig,
    /// Day driver settings
    pub simulation: SimulationConfig,
    /// Initial stock: plant name -> count
    pub stock: BTreeMap<String, u32>,
}

impl Default for Settings {
    fn default() -> Self {
        let stock = [
            ("basil", 4),
            ("cactus", 2),
            ("lavender", 2),
            ("monstera", 1),
            ("rose", 3),
        ]
        .into_iter()
        .map(|(name, count)| (name.to_string(), count))
        .collect();

        Self {
            root_name: DEFAULT_ROOT_NAME.to_string(),
            care: CareConfig::default(),
            simulation: SimulationConfig::default(),
            stock,
        }
    }
}

/// Get the XDG config directory for nursery.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "nursery").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("nursery.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    parse_raw_settings(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

fn parse_raw_settings(content: &str) -> Result<RawSettings, toml::de::Error> {
    toml::from_str(content)
}

impl Settings {
    /// Care parameters for new plants.
    pub fn care_params(&self) -> CareParams {
        self.care.into()
    }

    /// Merge overlay config onto self (base).
    ///
    /// - Scalar options: overlay wins if Some, otherwise keep base
    /// - Stock: merged per plant; a count of 0 removes an inherited entry
    pub fn merge_with(&self, overlay: &RawSettings) -> Self {
        let mut stock = self.stock.clone();
        if let Some(extra) = &overlay.stock {
            for (name, &count) in extra {
                if count == 0 {
                    stock.remove(name);
                } else {
                    stock.insert(name.clone(), count);
                }
            }
        }

        Self {
            root_name: overlay
                .root_name
                .clone()
                .unwrap_or_else(|| self.root_name.clone()),
            care: self.care.merge(&overlay.care),
            simulation: SimulationConfig {
                days: overlay.simulation.days.unwrap_or(self.simulation.days),
                thirst_threshold: overlay
                    .simulation
                    .thirst_threshold
                    .unwrap_or(self.simulation.thirst_threshold),
            },
            stock,
        }
    }

    /// Merge a TOML document onto self.
    pub fn merge_toml(&self, content: &str) -> Result<Self, ApplicationError> {
        let raw = parse_raw_settings(content).map_err(|e| ApplicationError::Config {
            message: format!("parse: {e}"),
        })?;
        let merged = self.merge_with(&raw);
        merged.validate()?;
        Ok(merged)
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `config_file` - Optional explicit config file; it must exist
    pub fn load(config_file: Option<&Path>) -> Result<Self, ApplicationError> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Global config
        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                let raw = load_raw_settings(&global_path)?;
                current = current.merge_with(&raw);
            }
        }

        // 3. Explicit config file
        if let Some(path) = config_file {
            let raw = load_raw_settings(path)?;
            current = current.merge_with(&raw);
        }

        // 4. Environment variables (explicit override)
        current = Self::apply_env_overrides(current)?;

        current.validate()?;
        Ok(current)
    }

    /// Apply NURSERY_* environment variables as explicit overrides.
    fn apply_env_overrides(settings: Self) -> Result<Self, ApplicationError> {
        settings.overlay_env(None)
    }

    /// Apply NURSERY_* variables from `vars` instead of the process environment.
    pub fn with_env_vars<K, V>(
        &self,
        vars: impl IntoIterator<Item = (K, V)>,
    ) -> Result<Self, ApplicationError>
    where
        K: Into<String>,
        V: Into<String>,
    {
        let vars: config::Map<String, String> = vars
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        let merged = self.clone().overlay_env(Some(vars))?;
        merged.validate()?;
        Ok(merged)
    }

    /// A set variable that fails to parse is an error, not a silent skip.
    fn overlay_env(
        mut self,
        vars: Option<config::Map<String, String>>,
    ) -> Result<Self, ApplicationError> {
        // Use config crate just for env var parsing
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("NURSERY")
                    .prefix_separator("_")
                    .separator("__")
                    .source(vars),
            )
            .build()
            .map_err(config_err)?;

        if let Some(val) = env_value(config.get_string("root_name"))? {
            self.root_name = val;
        }
        if let Some(val) = env_value(config.get_float("care.water_dose"))? {
            self.care.water_dose = val;
        }
        if let Some(val) = env_value(config.get_float("care.grow_min_water"))? {
            self.care.grow_min_water = val;
        }
        if let Some(val) = env_value(config.get_float("care.initial_water_level"))? {
            self.care.initial_water_level = val;
        }
        if let Some(val) = env_value(config.get_int("care.age_step"))? {
            self.care.age_step = to_u32("care.age_step", val)?;
        }
        if let Some(val) = env_value(config.get_int("care.age_ceiling"))? {
            self.care.age_ceiling = to_u32("care.age_ceiling", val)?;
        }
        if let Some(val) = env_value(config.get_int("care.grow_min_age"))? {
            self.care.grow_min_age = to_u32("care.grow_min_age", val)?;
        }
        if let Some(val) = env_value(config.get_int("simulation.days"))? {
            self.simulation.days = to_u32("simulation.days", val)?;
        }
        if let Some(val) = env_value(config.get_float("simulation.thirst_threshold"))? {
            self.simulation.thirst_threshold = val;
        }

        Ok(self)
    }

    /// Reject settings the nursery cannot run with.
    pub fn validate(&self) -> Result<(), ApplicationError> {
        if self.root_name.trim().is_empty() {
            return Err(ApplicationError::Config {
                message: "root_name cannot be empty".into(),
            });
        }
        non_negative("care.water_dose", self.care.water_dose)?;
        non_negative("care.grow_min_water", self.care.grow_min_water)?;
        non_negative("simulation.thirst_threshold", self.simulation.thirst_threshold)?;
        let level = self.care.initial_water_level;
        if !(0.0..=1.0).contains(&level) {
            return Err(ApplicationError::Config {
                message: format!("care.initial_water_level must be within 0.0..=1.0: {level}"),
            });
        }
        Ok(())
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# nursery configuration
#
# Locations (by precedence, lowest to highest):
#   Global:   ~/.config/nursery/nursery.toml
#   Explicit: nursery --config <file>
#   Env:      NURSERY_* environment variables, e.g. NURSERY_CARE__WATER_DOSE=0.3

# Name of the root section
# root_name = "greenhouse"

[care]
# Water added per watering; above 1.0 a plant drowns
# water_dose = 0.35
# Age added per growth step
# age_step = 2
# Plants older than this die
# age_ceiling = 60
# Gated growth needs at least this water level and age
# grow_min_water = 0.5
# grow_min_age = 5
# initial_water_level = 1.0

[simulation]
# days = 5
# thirst_threshold = 0.5

[stock]
# Plant name -> count (merged with inherited stock, 0 removes an entry)
# rose = 3
# basil = 4
"#
        .to_string()
    }
}

fn to_u32(key: &str, val: i64) -> Result<u32, ApplicationError> {
    u32::try_from(val).map_err(|_| ApplicationError::Config {
        message: format!("{key} out of range: {val}"),
    })
}

/// NaN fails this check too.
fn non_negative(key: &str, val: f64) -> Result<(), ApplicationError> {
    if val.is_finite() && val >= 0.0 {
        Ok(())
    } else {
        Err(ApplicationError::Config {
            message: format!("{key} must be a non-negative number: {val}"),
        })
    }
}

/// `NotFound` means the variable is unset.
fn env_value<T>(result: Result<T, ConfigError>) -> Result<Option<T>, ApplicationError> {
    match result {
        Ok(val) => Ok(Some(val)),
        Err(ConfigError::NotFound(_)) => Ok(None),
        Err(e) => Err(config_err(e)),
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[test]
    fn given_no_config_when_defaults_then_matches_canonical_care() {
        let settings = Settings::default();
        assert_eq!(settings.care_params(), CareParams::default());
        assert_eq!(settings.root_name, DEFAULT_ROOT_NAME);
    }

    #[test]
    fn test_merge_stock_adds_and_overrides() {
        let base = Settings::default();
        let merged = base
            .merge_toml(
                r#"
[stock]
rose = 5
orchid = 1
"#,
            )
            .unwrap();
        assert_eq!(merged.stock.get("rose"), Some(&5));
        assert_eq!(merged.stock.get("orchid"), Some(&1));
        assert_eq!(merged.stock.get("basil"), Some(&4));
    }

    #[test]
    fn test_merge_stock_zero_removes_entry() {
        let merged = Settings::default()
            .merge_toml("[stock]\ncactus = 0\n")
            .unwrap();
        assert!(!merged.stock.contains_key("cactus"));
    }

    #[test]
    fn test_merge_care_keeps_base_when_not_specified() {
        let merged = Settings::default()
            .merge_toml("[care]\nwater_dose = 0.2\n")
            .unwrap();
        assert!((merged.care.water_dose - 0.2).abs() < 1e-9);
        assert_eq!(merged.care.age_ceiling, 60);
    }

    #[test]
    fn test_empty_root_name_rejected() {
        let err = Settings::default()
            .merge_toml("root_name = \"\"\n")
            .unwrap_err();
        assert!(matches!(err, ApplicationError::Config { .. }));
    }

    #[rstest]
    #[case("[care]\nwater_dose = nan\n")]
    #[case("[care]\nwater_dose = -0.1\n")]
    #[case("[care]\ngrow_min_water = -1.0\n")]
    #[case("[care]\ngrow_min_water = nan\n")]
    #[case("[care]\ninitial_water_level = 1.5\n")]
    #[case("[care]\ninitial_water_level = -0.5\n")]
    #[case("[care]\ninitial_water_level = nan\n")]
    #[case("[simulation]\nthirst_threshold = -0.2\n")]
    #[case("[simulation]\nthirst_threshold = nan\n")]
    fn given_out_of_range_care_value_when_merged_then_config_error(#[case] content: &str) {
        let err = Settings::default().merge_toml(content).unwrap_err();
        assert!(matches!(err, ApplicationError::Config { .. }), "{content}");
    }

    #[test]
    fn given_boundary_water_levels_when_merged_then_accepted() {
        let merged = Settings::default()
            .merge_toml("[care]\ninitial_water_level = 0.0\ngrow_min_water = 0.0\n")
            .unwrap();
        assert_eq!(merged.care.initial_water_level, 0.0);
    }

    #[test]
    fn test_env_value_treats_missing_key_as_unset() {
        let config = Config::builder().build().unwrap();
        assert!(env_value(config.get_float("care.water_dose")).unwrap().is_none());
    }

    #[test]
    fn test_to_toml_round_trips() {
        let settings = Settings::default();
        let toml = settings.to_toml().unwrap();
        let reparsed = Settings::default().merge_toml(&toml).unwrap();
        assert_eq!(reparsed, settings);
    }

    #[test]
    fn test_template_parses() {
        let merged = Settings::default().merge_toml(&Settings::template()).unwrap();
        assert_eq!(merged, Settings::default());
    }
}
