//! End-to-end tests for the `sync` and `operations` commands.

#![cfg(unix)]

mod common;
use common::prelude::*;

/// Checkout creates the working copy and logs itself; update appends.
const SYNC_COMMANDS: &str = "\
vcs.remote.repo.url=vcs://server/project
vcs.command.line.checkout.0=mkdir -p ${localRepo}
vcs.command.line.checkout.1=sh -c 'echo checkout >> journal.txt'
vcs.command.line.update=sh -c 'echo update $1 >> journal.txt' sh ${revision}
";

fn sync_fixture(revision: Option<&str>) -> TestFixture {
    let fixture = TestFixture::new().with_config(SYNC_COMMANDS);
    let url = url::Url::from_file_path(fixture.path().join("wc"))
        .unwrap()
        .to_string();
    let fixture = fixture.with_extra_config(&format!("vcs.working.copy.url={}\n", url));
    match revision {
        Some(revision) => fixture.with_extra_config(&format!("vcs.revision={}\n", revision)),
        None => fixture,
    }
}

#[test]
fn test_sync_checks_out_missing_working_copy() {
    let fixture = sync_fixture(Some("r7"));

    fixture.command().arg("sync").assert().success();

    fixture
        .child("wc/journal.txt")
        .assert("checkout\nupdate r7\n");
}

#[test]
fn test_sync_existing_working_copy_only_updates() {
    let fixture = sync_fixture(Some("r7")).with_dir("wc");

    fixture
        .command()
        .arg("sync")
        .assert()
        .success()
        .stderr(predicate::str::contains("Performing update"))
        .stderr(predicate::str::contains("Performing checkout").not());

    fixture.child("wc/journal.txt").assert("update r7\n");
}

#[test]
fn test_sync_fresh_always_checks_out() {
    let fixture = sync_fixture(Some("r7")).with_dir("wc");

    fixture.command().args(["sync", "--fresh"]).assert().success();

    fixture
        .child("wc/journal.txt")
        .assert("checkout\nupdate r7\n");
}

#[test]
fn test_sync_without_configuration_does_nothing() {
    let fixture = TestFixture::new().with_config(
        "vcs.command.line.checkout=touch checked-out\n\
         vcs.command.line.update=touch updated\n",
    );

    fixture
        .command()
        .arg("sync")
        .assert()
        .success()
        .stderr(predicate::str::contains("not configured"));

    fixture.child("checked-out").assert(predicate::path::missing());
    fixture.child("updated").assert(predicate::path::missing());
}

#[test]
fn test_operations_listing() {
    TestFixture::new()
        .with_config(
            "vcs.command.line.required=commit\n\
             vcs.command.line.update.1=vcs pull\n\
             vcs.command.line.update.0=vcs fetch\n\
             vcs.command.line.commit=vcs commit -m ${commitMessage}\n",
        )
        .command()
        .arg("operations")
        .assert()
        .success()
        .stdout(predicate::str::contains("Timeout: 60000ms"))
        .stdout(predicate::str::contains("update:\n  1. vcs fetch\n  2. vcs pull\n"))
        .stdout(predicate::str::contains(
            "commit (required):\n  1. vcs commit -m ${commitMessage}\n",
        ))
        .stdout(predicate::str::contains("checkout: not configured"));
}

#[test]
fn test_operations_json() {
    let output = TestFixture::new()
        .with_config(
            "vcs.command.line.required=update\n\
             vcs.command.line.update=vcs pull\n",
        )
        .command()
        .args(["operations", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let listing: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let operations = listing.as_array().unwrap();
    assert_eq!(operations.len(), 9);

    let update = operations
        .iter()
        .find(|op| op["operation"] == "update")
        .unwrap();
    assert_eq!(update["key"], "vcs.command.line.update");
    assert_eq!(update["required"], true);
    assert_eq!(update["commands"], serde_json::json!(["vcs pull"]));

    let checkout = operations
        .iter()
        .find(|op| op["operation"] == "checkout")
        .unwrap();
    assert_eq!(checkout["required"], false);
    assert_eq!(checkout["commands"], serde_json::json!([]));
}
