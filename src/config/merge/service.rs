//! MergeService: orchestrates sources, applies merge policy, deserializes to ModConfig.

use crate::config::sources::{environment, project_file};
use crate::config::ModConfig;
use config::ConfigError;
use config::File;
use std::path::Path;

use super::merge_policy;

/// Merge service for config composition.
pub struct MergeService;

impl MergeService {
    /// Load config for a project.
    /// Precedence: defaults (lowest) -> project file -> environment (highest).
    pub fn load(project_dir: &Path) -> Result<ModConfig, ConfigError> {
        let builder = merge_policy::builder_with_defaults()?;
        let builder = project_file::add_to_builder(builder, project_dir)?;
        let builder = environment::add_to_builder(builder)?;

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Load config from a specific file with environment overlay.
    pub fn load_from_file(path: &Path) -> Result<ModConfig, ConfigError> {
        let builder = merge_policy::builder_with_defaults()?;
        let builder = builder.add_source(File::from(path).required(true));
        let builder = environment::add_to_builder(builder)?;

        let config = builder.build()?;
        config.try_deserialize()
    }
}
