//! Inspection settings.
//!
//! Defaults can be overridden through environment variables:
//!
//! | Variable              | Default | Meaning                                   |
//! |-----------------------|---------|-------------------------------------------|
//! | `SUI_REPLAY_DECIMALS` | `9`     | decimal places of the display unit        |
//! | `SUI_REPLAY_UNIT`     | `SUI`   | label printed next to converted amounts   |
//! | `SUI_REPLAY_THREADS`  | unset   | worker threads for batch mode             |
//! | `SUI_REPLAY_JSON`     | `false` | emit JSON instead of the text report      |

use sui_replay_types::env_utils::{env_bool_or, env_string_or, env_var, env_var_or};

use crate::units::SUI_DECIMALS;

pub const DEFAULT_UNIT: &str = "SUI";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InspectConfig {
    pub decimal_places: u32,
    pub unit: String,
    /// `None` lets rayon pick one thread per core
    pub threads: Option<usize>,
    pub json: bool,
}

impl Default for InspectConfig {
    fn default() -> Self {
        Self {
            decimal_places: SUI_DECIMALS,
            unit: DEFAULT_UNIT.to_string(),
            threads: None,
            json: false,
        }
    }
}

impl InspectConfig {
    /// Read the configuration from the environment, falling back to defaults.
    pub fn from_env() -> Self {
        Self {
            decimal_places: env_var_or("SUI_REPLAY_DECIMALS", SUI_DECIMALS),
            unit: env_string_or("SUI_REPLAY_UNIT", DEFAULT_UNIT),
            threads: env_var::<usize>("SUI_REPLAY_THREADS").filter(|n| *n > 0),
            json: env_bool_or("SUI_REPLAY_JSON", false),
        }
    }

    pub fn with_decimal_places(mut self, places: u32) -> Self {
        self.decimal_places = places;
        self
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = unit.into();
        self
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = Some(threads).filter(|n| *n > 0);
        self
    }

    pub fn with_json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }
}
