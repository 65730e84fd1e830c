//! Shared fixtures: a scripted stand-in for `go mod` and a plugin invocation helper.

use mod_plugin::config::ModConfig;
use mod_plugin::runner::CommandRunner;
use mod_plugin::tooling::cli::{report_result, CliContext};
use mod_plugin::ModError;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const MODULE_PATH: &str = "github.com/mod/test";
pub const DEP_VERSION: &str = "v1.0.0";

/// Behaves like `go mod tidy` / `go mod vendor` for a project whose imports
/// are listed one per line in `imports.txt`.
///
/// tidy rewrites `go.mod` from the imports and writes `go.sum` when there is
/// at least one dependency; vendor mirrors the `require` block of `go.mod`.
pub struct FakeGo {
    project_dir: PathBuf,
}

impl FakeGo {
    pub fn new(project_dir: &Path) -> Self {
        Self {
            project_dir: project_dir.to_path_buf(),
        }
    }

    fn imports(&self) -> Vec<String> {
        let content = fs::read_to_string(self.project_dir.join("imports.txt")).unwrap_or_default();
        let mut imports: Vec<String> = content
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect();
        imports.sort();
        imports.dedup();
        imports
    }

    fn requires(&self) -> Vec<String> {
        let content = fs::read_to_string(self.project_dir.join("go.mod")).unwrap_or_default();
        content
            .lines()
            .filter_map(|l| l.strip_prefix('\t'))
            .filter_map(|l| l.split_whitespace().next())
            .map(str::to_string)
            .collect()
    }

    fn tidy(&self, out: &mut dyn Write) -> Result<(), ModError> {
        let imports = self.imports();
        let current = self.requires();
        for import in &imports {
            if import.starts_with("invalid/") {
                writeln!(out, "go: finding module for package {import}").unwrap();
                writeln!(out, "go: {MODULE_PATH} imports\n\t{import}: cannot find module providing package {import}").unwrap();
                return Err(ModError::ExternalToolFailure);
            }
            if !current.contains(import) {
                writeln!(out, "go: finding module for package {import}").unwrap();
                writeln!(out, "go: found {import} in {import} {DEP_VERSION}").unwrap();
            }
        }

        fs::write(self.project_dir.join("go.mod"), render_go_mod(&imports)).unwrap();
        if !imports.is_empty() {
            let sum: String = imports
                .iter()
                .map(|m| format!("{m} {DEP_VERSION} h1:{m}=\n{m} {DEP_VERSION}/go.mod h1:{m}=\n"))
                .collect();
            fs::write(self.project_dir.join("go.sum"), sum).unwrap();
        }
        Ok(())
    }

    fn vendor(&self, out: &mut dyn Write) -> Result<(), ModError> {
        let requires = self.requires();
        if requires.is_empty() {
            writeln!(out, "go: no dependencies to vendor").unwrap();
            return Ok(());
        }

        let vendor = self.project_dir.join("vendor");
        if vendor.exists() {
            fs::remove_dir_all(&vendor).unwrap();
        }
        let mut modules = String::new();
        for module in &requires {
            modules.push_str(&format!("# {module} {DEP_VERSION}\n## explicit\n{module}\n"));
            let name = module.rsplit('/').next().unwrap();
            let dir = vendor.join(module);
            fs::create_dir_all(&dir).unwrap();
            fs::write(dir.join(format!("{name}.go")), format!("package {name}\n")).unwrap();
        }
        fs::write(vendor.join("modules.txt"), modules).unwrap();
        Ok(())
    }
}

impl CommandRunner for FakeGo {
    fn run(&self, operation: &str, out: &mut dyn Write) -> Result<(), ModError> {
        match operation {
            "tidy" => self.tidy(out),
            "vendor" => self.vendor(out),
            other => {
                writeln!(out, "go mod {other}: unknown command").unwrap();
                Err(ModError::ExternalToolFailure)
            }
        }
    }
}

pub fn render_go_mod(requires: &[String]) -> String {
    let mut go_mod = format!("module {MODULE_PATH}\n");
    if !requires.is_empty() {
        go_mod.push_str("\nrequire (\n");
        for module in requires {
            go_mod.push_str(&format!("\t{module} {DEP_VERSION}\n"));
        }
        go_mod.push_str(")\n");
    }
    go_mod
}

/// A freshly `go mod init`-ed project importing `imports`.
pub fn init_project(imports: &[&str]) -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("go.mod"), render_go_mod(&[])).unwrap();
    set_imports(dir.path(), imports);
    dir
}

pub fn set_imports(project_dir: &Path, imports: &[&str]) {
    fs::write(project_dir.join("imports.txt"), imports.join("\n")).unwrap();
}

/// Result of one plugin invocation.
pub struct PluginRun {
    pub exit_code: u8,
    pub output: String,
}

impl PluginRun {
    pub fn succeeded(&self) -> bool {
        self.exit_code == 0
    }
}

/// Invoke the mod task the way the host does, with GOFLAGS given explicitly.
pub fn run_plugin(project_dir: &Path, goflags: &str, verify: bool) -> PluginRun {
    let ctx = CliContext::with_config(project_dir.to_path_buf(), ModConfig::default(), goflags);
    let mut out = Vec::new();
    let result = ctx.run_mod(FakeGo::new(ctx.project_dir()), verify, &mut out);
    let exit_code = report_result(result, &mut out);
    PluginRun {
        exit_code,
        output: String::from_utf8(out).unwrap(),
    }
}
