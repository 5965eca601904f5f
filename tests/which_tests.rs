//! Package-presence check: pass on non-empty lookup output, fail on empty
//! output, skip (never abort) on spawn errors.

use casegen::harness::{which, WhichOptions};
use casegen::host::{CaseStatus, InProcessHost};

#[test]
fn non_empty_lookup_output_passes() {
    // `echo` prints the package name back, standing in for a successful
    // lookup without depending on what is installed on the machine.
    let mut options = WhichOptions::new(["serde", "tokio"]);
    options.lookup_command = "echo".to_string();

    let mut host = InProcessHost::new();
    which(&mut host, &options);
    let reports = host.run();

    assert_eq!(reports.len(), 2);
    assert!(reports
        .iter()
        .all(|r| matches!(r.status, CaseStatus::Pass)));
}

#[test]
fn empty_lookup_output_fails() {
    // `true` exits cleanly but prints nothing, so the presence proxy fails.
    let mut options = WhichOptions::new(["anything"]);
    options.lookup_command = "true".to_string();

    let mut host = InProcessHost::new();
    which(&mut host, &options);
    let reports = host.run();

    assert_eq!(reports.len(), 1);
    assert!(matches!(reports[0].status, CaseStatus::Fail(_)));
}

#[test]
fn spawn_error_skips_the_case_without_failing_the_group() {
    let mut options = WhichOptions::new(["first"]);
    options.lookup_command = "casegen-no-such-lookup-command".to_string();
    options.packages.push("second".to_string());

    let mut host = InProcessHost::new();
    which(&mut host, &options);
    let reports = host.run();

    assert_eq!(reports.len(), 2);
    assert!(reports
        .iter()
        .all(|r| matches!(r.status, CaseStatus::Skipped(_))));
}

#[test]
fn default_description_names_the_packages() {
    let options = WhichOptions::new(["git", "cargo"]);
    let mut host = InProcessHost::new();
    which(&mut host, &options);
    let titles = host.group_titles();
    assert!(titles[0].contains("git, cargo"));
}
