use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("fixtures")
        .join(name)
}

fn compare() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("xml-compare"));
    cmd.arg("compare");
    cmd
}

#[test]
fn same_file_is_identical() {
    compare()
        .arg(fixture("order.xml"))
        .arg(fixture("order.xml"))
        .assert()
        .success()
        .stdout(predicate::str::contains("identical=true equal=true"));
}

#[test]
fn reordered_attributes_pass_but_fail_identical_check() {
    compare()
        .arg(fixture("order.xml"))
        .arg(fixture("order_reordered.xml"))
        .assert()
        .success()
        .stdout(predicate::str::contains("~ attribute order differs"))
        .stdout(predicate::str::contains("identical=false equal=true"));

    compare()
        .arg(fixture("order.xml"))
        .arg(fixture("order_reordered.xml"))
        .arg("--identical")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not identical"));
}

#[test]
fn ignore_attribute_order_makes_reordering_identical() {
    compare()
        .arg(fixture("order.xml"))
        .arg(fixture("order_reordered.xml"))
        .arg("--ignore-attribute-order")
        .arg("--identical")
        .assert()
        .success()
        .stdout(predicate::str::contains("identical=true"));
}

#[test]
fn changed_value_fails_with_major_difference() {
    compare()
        .arg(fixture("order.xml"))
        .arg(fixture("order_changed.xml"))
        .assert()
        .failure()
        .stdout(predicate::str::contains("! attribute value differs"))
        .stdout(predicate::str::contains("major=1"))
        .stderr(predicate::str::contains("not equal"));
}

#[test]
fn whitespace_policy_decides_formatting_differences() {
    compare()
        .arg(fixture("order.xml"))
        .arg(fixture("order_compact.xml"))
        .arg("--whitespace")
        .arg("all")
        .assert()
        .failure();

    compare()
        .arg(fixture("order.xml"))
        .arg(fixture("order_compact.xml"))
        .arg("--whitespace")
        .arg("significant")
        .arg("--summary")
        .assert()
        .success()
        .stdout(predicate::str::contains("identical=true equal=true major=0 minor=0"));
}

#[test]
fn json_report_carries_result_and_description() {
    compare()
        .arg(fixture("order.xml"))
        .arg(fixture("order_reordered.xml"))
        .arg("--format")
        .arg("json")
        .arg("--description")
        .arg("nightly export")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"description\": \"nightly export\""))
        .stdout(predicate::str::contains("\"equal\": true"))
        .stdout(predicate::str::contains("\"attribute_sequence_mismatch\""));
}

#[test]
fn settings_file_is_applied() {
    let dir = tempdir().expect("tempdir");
    let settings = dir.path().join("compare.toml");
    fs::write(
        &settings,
        "whitespace_handling = \"significant\"\nignore_attribute_order = true\n",
    )
    .expect("write settings");

    compare()
        .arg(fixture("order_reordered.xml"))
        .arg(fixture("order_compact.xml"))
        .arg("--config")
        .arg(&settings)
        .arg("--identical")
        .assert()
        .success();
}

#[test]
fn flags_override_settings_file() {
    let dir = tempdir().expect("tempdir");
    let settings = dir.path().join("compare.toml");
    fs::write(&settings, "whitespace_handling = \"significant\"\n").expect("write settings");

    compare()
        .arg(fixture("order.xml"))
        .arg(fixture("order_compact.xml"))
        .arg("--config")
        .arg(&settings)
        .arg("--whitespace")
        .arg("all")
        .assert()
        .failure();
}

#[test]
fn unknown_settings_key_is_rejected() {
    let dir = tempdir().expect("tempdir");
    let settings = dir.path().join("compare.toml");
    fs::write(&settings, "ignore_comments = true\n").expect("write settings");

    compare()
        .arg(fixture("order.xml"))
        .arg(fixture("order.xml"))
        .arg("--config")
        .arg(&settings)
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to parse settings file"));
}

#[test]
fn malformed_test_document_names_the_side() {
    compare()
        .arg(fixture("order.xml"))
        .arg(fixture("broken.xml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("malformed test document"));
}

#[test]
fn missing_control_file_fails() {
    let dir = tempdir().expect("tempdir");
    compare()
        .arg(dir.path().join("absent.xml"))
        .arg(fixture("order.xml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("malformed control document"));
}
