//! ConfigLoader facade delegating to merge service.

use super::merge::service::MergeService;
use super::ModConfig;
use config::ConfigError;
use std::path::Path;

/// Configuration loader facade.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration for a project from its config file and environment.
    pub fn load(project_dir: &Path) -> Result<ModConfig, ConfigError> {
        MergeService::load(project_dir)
    }

    /// Load configuration from a specific file.
    pub fn load_from_file(path: &Path) -> Result<ModConfig, ConfigError> {
        MergeService::load_from_file(path)
    }
}
