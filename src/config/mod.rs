//! Configuration
//!
//! Loaded once by the caller and handed to the module operation as explicit
//! options. Precedence: built-in defaults -> project config file -> environment.

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;

use crate::gomod::VerifyOptions;
use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};

/// Project config file, relative to the project root.
pub const PROJECT_CONFIG_FILE: &str = "godel/config/mod-plugin.yml";

/// Prefix for environment overrides (`MOD_PLUGIN__GO_BINARY`, `MOD_PLUGIN__LOGGING__LEVEL`).
pub const ENV_PREFIX: &str = "MOD_PLUGIN";

fn default_go_binary() -> String {
    "go".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModConfig {
    /// Go toolchain binary used to run `mod tidy` and `mod vendor`
    #[serde(default = "default_go_binary")]
    pub go_binary: String,

    /// Force vendor mode on or off. `Some(false)` disables vendoring even when
    /// GOFLAGS contains `-mod=vendor`; None defers to GOFLAGS.
    #[serde(default)]
    pub vendor: Option<bool>,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for ModConfig {
    fn default() -> Self {
        Self {
            go_binary: default_go_binary(),
            vendor: None,
            logging: LoggingConfig::default(),
        }
    }
}

impl ModConfig {
    /// Resolve options from this config and the caller-supplied GOFLAGS value.
    ///
    /// An explicit `vendor` setting wins in both directions; GOFLAGS is only
    /// consulted when it is unset.
    pub fn verify_options(&self, goflags: &str) -> VerifyOptions {
        match self.vendor {
            Some(vendor) => VerifyOptions { vendor },
            None => VerifyOptions::from_goflags(goflags),
        }
    }
}
