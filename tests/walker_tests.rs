//! Traversal-level properties: cases are emitted exactly at leaf functions
//! with present datasets, in dataset insertion order, and nowhere else.

use casegen::harness::{start, StartOptions};
use casegen::host::InProcessHost;
use casegen::matcher::{ResultDescriptor, TestCase};
use casegen::tree::{DatasetNode, SubjectNode};
use casegen::value::Value;

fn case(label: &str) -> TestCase {
    TestCase::new(label, Value::Nil, ResultDescriptor::being("nil"))
}

fn identity() -> SubjectNode {
    SubjectNode::func(|args| args.clone())
}

#[test]
fn cases_are_emitted_only_at_functions_with_datasets() {
    let subject = SubjectNode::branch()
        .with("add", identity())
        .with(
            "math",
            SubjectNode::branch()
                .with("mul", identity())
                .with("noop", identity()),
        )
        // Present in the subject but absent from the dataset: no cases.
        .with("orphan", identity());
    let dataset = DatasetNode::branch()
        .with(
            "add",
            DatasetNode::cases(vec![case("one"), case("two")]),
        )
        .with(
            "math",
            DatasetNode::branch()
                .with("mul", DatasetNode::cases(vec![case("three")]))
                // Present but empty: a group opens, zero cases register.
                .with("noop", DatasetNode::cases(vec![])),
        )
        // Present in the dataset but absent from the subject: skipped.
        .with("ghost", DatasetNode::cases(vec![case("never")]));

    let mut host = InProcessHost::new();
    let options = StartOptions::new("tree", "root", subject, dataset);
    start(&mut host, &options).unwrap();

    assert_eq!(host.case_count(), 3);
    let titles = host.group_titles();
    assert!(titles.contains(&"#root.add()"));
    assert!(titles.contains(&"#root.math.mul()"));
    assert!(titles.contains(&"#root.math.noop()"));
    assert!(!titles.iter().any(|t| t.contains("ghost")));
    assert!(!titles.iter().any(|t| t.contains("orphan")));
}

#[test]
fn groups_open_in_dataset_insertion_order() {
    let subject = SubjectNode::branch()
        .with("alpha", identity())
        .with("beta", identity());
    // Dataset lists beta first, so beta's group must open first.
    let dataset = DatasetNode::branch()
        .with("beta", DatasetNode::cases(vec![case("b")]))
        .with("alpha", DatasetNode::cases(vec![case("a")]));

    let mut host = InProcessHost::new();
    let options = StartOptions::new("ordered", "root", subject, dataset);
    start(&mut host, &options).unwrap();

    let titles = host.group_titles();
    let beta = titles.iter().position(|t| *t == "#root.beta()").unwrap();
    let alpha = titles.iter().position(|t| *t == "#root.alpha()").unwrap();
    assert!(beta < alpha);
}

#[test]
fn functions_are_never_recursed_into() {
    // The dataset pretends `add` is a branch with children; the subject says
    // it is a function. Nothing may be emitted for that path.
    let subject = SubjectNode::branch().with("add", identity());
    let dataset = DatasetNode::branch().with(
        "add",
        DatasetNode::branch().with("deeper", DatasetNode::cases(vec![case("no")])),
    );

    let mut host = InProcessHost::new();
    let options = StartOptions::new("mismatch", "root", subject, dataset);
    start(&mut host, &options).unwrap();
    assert_eq!(host.case_count(), 0);
}

#[test]
fn case_list_at_a_branch_yields_nothing() {
    let subject = SubjectNode::branch().with(
        "math",
        SubjectNode::branch().with("mul", identity()),
    );
    let dataset = DatasetNode::branch().with("math", DatasetNode::cases(vec![case("no")]));

    let mut host = InProcessHost::new();
    let options = StartOptions::new("mismatch", "root", subject, dataset);
    start(&mut host, &options).unwrap();
    assert_eq!(host.case_count(), 0);
}

#[test]
fn a_leaf_subject_at_the_root_registers_nothing() {
    let mut host = InProcessHost::new();
    let options = StartOptions::new(
        "flat",
        "root",
        identity(),
        DatasetNode::cases(vec![case("no")]),
    );
    start(&mut host, &options).unwrap();
    // Only the suite group itself exists.
    assert_eq!(host.group_titles(), vec!["flat"]);
    assert_eq!(host.case_count(), 0);
}
