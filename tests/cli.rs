//! Command line handling that does not need a Vulkan driver.

use std::process::Command;

fn vulkaninfo_bin() -> &'static str {
    env!("CARGO_BIN_EXE_vulkaninfo")
}

#[test]
fn help_lists_output_switches() {
    let output = Command::new(vulkaninfo_bin())
        .arg("--help")
        .output()
        .expect("run vulkaninfo --help");

    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    for switch in ["--html", "--json", "--full-json", "--show-formats"] {
        assert!(stdout.contains(switch), "missing {switch} in help");
    }
}

#[test]
fn unknown_arguments_are_rejected() {
    let output = Command::new(vulkaninfo_bin())
        .arg("--bogus")
        .output()
        .expect("run vulkaninfo --bogus");

    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("--bogus"));
}

#[test]
fn json_selection_requires_an_equals_sign() {
    let output = Command::new(vulkaninfo_bin())
        .args(["--json", "1"])
        .output()
        .expect("run vulkaninfo --json 1");

    assert!(!output.status.success());
}
