//! Plugin metadata reported to the host build tool.
//!
//! The host asks the plugin binary to describe itself once, then invokes the
//! `mod` task directly (and with `--verify` during its verify run).

use serde::{Deserialize, Serialize};

pub const PLUGIN_ID: &str = "com.palantir.godel-mod-plugin";
pub const PLUGIN_NAME: &str = "mod-plugin";

/// Verify ordering of the host's format task; `mod` runs right after it.
pub const FORMAT_VERIFY_ORDER: i32 = 100;

pub const DEBUG_FLAG: &str = "--debug";
pub const PROJECT_DIR_FLAG: &str = "--project-dir";
pub const VERIFY_FLAG: &str = "--verify";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginInfo {
    pub plugin_schema_version: String,
    pub id: String,
    pub name: String,
    pub version: String,
    pub uses_config_file: bool,
    pub global_flag_options: GlobalFlagOptions,
    pub tasks: Vec<TaskInfo>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalFlagOptions {
    pub debug_flag: String,
    pub project_dir_flag: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskInfo {
    pub name: String,
    pub description: String,
    pub command: Vec<String>,
    pub verify_options: Option<VerifyTaskOptions>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyTaskOptions {
    /// Arguments appended when the host runs verification without applying changes
    pub apply_false_args: Vec<String>,
    pub ordering: Option<i32>,
}

impl PluginInfo {
    /// Metadata for this build of the plugin.
    pub fn current() -> Self {
        PluginInfo {
            plugin_schema_version: "1".to_string(),
            id: PLUGIN_ID.to_string(),
            name: PLUGIN_NAME.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            uses_config_file: true,
            global_flag_options: GlobalFlagOptions {
                debug_flag: DEBUG_FLAG.to_string(),
                project_dir_flag: PROJECT_DIR_FLAG.to_string(),
            },
            tasks: vec![TaskInfo {
                name: "mod".to_string(),
                description: "Run 'go mod tidy' followed by 'go mod vendor'".to_string(),
                command: vec!["mod".to_string()],
                verify_options: Some(VerifyTaskOptions {
                    apply_false_args: vec![VERIFY_FLAG.to_string()],
                    ordering: Some(FORMAT_VERIFY_ORDER + 50),
                }),
            }],
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
