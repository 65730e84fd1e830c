//! Project config file source: `<project>/godel/config/mod-plugin.yml`, optional.

use crate::config::PROJECT_CONFIG_FILE;
use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError, File};
use std::path::Path;

pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
    project_dir: &Path,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let path = project_dir.join(PROJECT_CONFIG_FILE);
    if path.exists() {
        tracing::debug!(path = %path.display(), "Loading project config file");
    }
    Ok(builder.add_source(File::from(path).required(false)))
}
