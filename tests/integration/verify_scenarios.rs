use std::fs;

use crate::integration::support::{init_project, run_plugin, set_imports};

const VENDOR: &str = "-mod=vendor";

#[test]
fn mod_without_vendor_mode_never_creates_vendor() {
    let project = init_project(&["github.com/pkg/errors"]);

    let run = run_plugin(project.path(), "", false);
    assert!(run.succeeded(), "Output: {}", run.output);
    assert!(!project.path().join("vendor").exists());

    let go_mod = fs::read_to_string(project.path().join("go.mod")).unwrap();
    assert!(go_mod.contains("github.com/pkg/errors"));
}

#[test]
fn mod_with_vendor_mode_vendors_dependencies() {
    let project = init_project(&["github.com/pkg/errors"]);

    let run = run_plugin(project.path(), VENDOR, false);
    assert!(run.succeeded(), "Output: {}", run.output);
    assert!(project.path().join("vendor/github.com/pkg/errors").is_dir());
}

#[test]
fn verify_succeeds_when_nothing_changes() {
    let project = init_project(&["github.com/pkg/errors"]);
    assert!(run_plugin(project.path(), "", false).succeeded());

    let run = run_plugin(project.path(), "", true);
    assert!(run.succeeded(), "Output: {}", run.output);
    assert!(!run.output.contains("Error:"));
}

#[test]
fn verify_with_empty_sum_succeeds() {
    let project = init_project(&[]);
    assert!(run_plugin(project.path(), "", false).succeeded());
    assert!(!project.path().join("go.sum").exists());

    let run = run_plugin(project.path(), "", true);
    assert!(run.succeeded(), "Output: {}", run.output);
}

#[test]
fn verify_fails_when_tidy_modifies_go_mod() {
    let project = init_project(&["github.com/pkg/errors"]);
    assert!(run_plugin(project.path(), "", false).succeeded());

    set_imports(project.path(), &["github.com/pkg/errors", "github.com/pkg/math"]);
    let run = run_plugin(project.path(), "", true);
    assert!(!run.succeeded());
    assert!(run.output.ends_with("Error: go.mod modified\n"), "{}", run.output);
}

#[test]
fn verify_fails_when_tidy_modifies_go_mod_with_vendor() {
    let project = init_project(&["github.com/pkg/errors"]);
    assert!(run_plugin(project.path(), VENDOR, false).succeeded());
    assert!(project.path().join("vendor/github.com/pkg/errors").is_dir());

    set_imports(project.path(), &["github.com/pkg/errors", "github.com/pkg/math"]);
    let run = run_plugin(project.path(), VENDOR, true);
    assert!(!run.succeeded());
    assert!(run.output.ends_with("Error: go.mod modified\n"), "{}", run.output);
    // Halted before vendoring.
    assert!(!project.path().join("vendor/github.com/pkg/math").exists());
}

#[test]
fn verify_with_vendor_succeeds_with_no_dependencies() {
    let project = init_project(&[]);
    assert!(run_plugin(project.path(), VENDOR, false).succeeded());
    assert!(!project.path().join("vendor").exists());

    let run = run_plugin(project.path(), VENDOR, true);
    assert!(run.succeeded(), "Output: {}", run.output);
}

#[test]
fn verify_with_vendor_succeeds_after_vendor_created() {
    let project = init_project(&["github.com/pkg/errors"]);
    assert!(run_plugin(project.path(), VENDOR, false).succeeded());
    assert!(project.path().join("vendor").is_dir());

    let run = run_plugin(project.path(), VENDOR, true);
    assert!(run.succeeded(), "Output: {}", run.output);
}

#[test]
fn verify_fails_listing_vendor_files_for_unvendored_dependency() {
    let project = init_project(&["github.com/pkg/errors"]);
    assert!(run_plugin(project.path(), VENDOR, false).succeeded());

    // A dependency lands in go.mod/go.sum without the vendor tree being refreshed.
    set_imports(project.path(), &["github.com/pkg/errors", "github.com/pkg/math"]);
    assert!(run_plugin(project.path(), "", false).succeeded());

    let run = run_plugin(project.path(), VENDOR, true);
    assert!(!run.succeeded());
    assert!(
        run.output.ends_with(
            "Error: vendor directory modified:\n\
             github.com/pkg/math/math.go: added\n\
             modules.txt: modified\n"
        ),
        "{}",
        run.output
    );
}

#[test]
fn verify_fails_when_vendor_directory_is_created() {
    let project = init_project(&["github.com/pkg/errors"]);
    assert!(run_plugin(project.path(), "", false).succeeded());
    assert!(!project.path().join("vendor").exists());

    let run = run_plugin(project.path(), VENDOR, true);
    assert!(!run.succeeded());
    assert!(run.output.ends_with("Error: vendor directory created\n"), "{}", run.output);
}

#[test]
fn verify_requires_go_mod() {
    let project = init_project(&[]);
    fs::remove_file(project.path().join("go.mod")).unwrap();

    let run = run_plugin(project.path(), "", true);
    assert!(!run.succeeded());
    assert!(run.output.starts_with("Error: "), "{}", run.output);
    assert!(run.output.ends_with("go.mod does not exist\n"), "{}", run.output);
}

#[test]
fn tool_failure_output_is_the_failure_detail() {
    let project = init_project(&["invalid/module"]);

    let run = run_plugin(project.path(), VENDOR, false);
    assert!(!run.succeeded());
    assert!(!run.output.contains("Error:"), "{}", run.output);
    assert!(
        run.output.ends_with("cannot find module providing package invalid/module\n"),
        "{}",
        run.output
    );
}
