//! End-to-end runs through the real process runner.
//!
//! `go_binary` is set to `sh`, so `sh mod <op>` executes a `mod` script in the
//! project directory with the operation as `$1`.

#![cfg(unix)]

use mod_plugin::config::ModConfig;
use mod_plugin::tooling::cli::{report_result, CliContext, Commands};
use std::fs;
use std::path::Path;

const GO_MOD: &str = "module github.com/mod/test\n";

fn write_script(project_dir: &Path, script: &str) {
    fs::write(project_dir.join("mod"), script).unwrap();
}

fn execute(project_dir: &Path, verify: bool) -> (u8, String) {
    let config = ModConfig {
        go_binary: "sh".to_string(),
        ..ModConfig::default()
    };
    let ctx = CliContext::with_config(project_dir.to_path_buf(), config, "");
    let mut out = Vec::new();
    let result = ctx.execute(&Commands::Mod { verify }, &mut out);
    let code = report_result(result, &mut out);
    (code, String::from_utf8(out).unwrap())
}

#[test]
fn tidy_output_reaches_sink() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("go.mod"), GO_MOD).unwrap();
    write_script(dir.path(), "echo \"go mod $1\"\necho 'warning' 1>&2\n");

    let (code, output) = execute(dir.path(), true);
    assert_eq!(code, 0, "{output}");
    assert_eq!(output, "go mod tidy\nwarning\n");
}

#[test]
fn tidy_rewriting_go_mod_fails_verification() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("go.mod"), GO_MOD).unwrap();
    write_script(
        dir.path(),
        "if [ \"$1\" = tidy ]; then printf '\\nrequire github.com/pkg/errors v0.9.1\\n' >> go.mod; fi\n",
    );

    let (code, output) = execute(dir.path(), true);
    assert_eq!(code, 1);
    assert!(output.ends_with("Error: go.mod modified\n"), "{output}");
}

#[test]
fn tidy_rewriting_go_mod_is_applied_without_verify() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("go.mod"), GO_MOD).unwrap();
    write_script(
        dir.path(),
        "if [ \"$1\" = tidy ]; then printf 'go 1.21\\n' >> go.mod; fi\n",
    );

    let (code, output) = execute(dir.path(), false);
    assert_eq!(code, 0, "{output}");
    assert!(fs::read_to_string(dir.path().join("go.mod"))
        .unwrap()
        .ends_with("go 1.21\n"));
}

#[test]
fn failing_tool_reports_only_its_own_output() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("go.mod"), GO_MOD).unwrap();
    write_script(dir.path(), "echo 'go: errors parsing go.mod' 1>&2\nexit 1\n");

    let (code, output) = execute(dir.path(), false);
    assert_eq!(code, 1);
    assert_eq!(output, "go: errors parsing go.mod\n");
}

#[test]
fn missing_go_binary_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("go.mod"), GO_MOD).unwrap();
    let config = ModConfig {
        go_binary: "no-such-go-toolchain".to_string(),
        ..ModConfig::default()
    };
    let ctx = CliContext::with_config(dir.path().to_path_buf(), config, "");
    let mut out = Vec::new();
    let result = ctx.execute(&Commands::Mod { verify: false }, &mut out);
    let code = report_result(result, &mut out);

    let output = String::from_utf8(out).unwrap();
    assert_eq!(code, 1);
    assert!(
        output.starts_with("Error: failed to execute command no-such-go-toolchain mod tidy"),
        "{output}"
    );
}
