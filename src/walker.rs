//! Recursive descent over the subject tree and its parallel dataset,
//! wrapper, and hook trees.
//!
//! The walk is driven by the dataset's key set: branches are visited in
//! insertion order, one sibling fully processed before the next. Keys the
//! subject tree lacks, and kind mismatches between the two trees, are
//! skipped silently; that leniency is the contract, not a validation gap
//! (strict checking is available separately via `tree::check_congruent`).

use crate::host::{GroupId, TestHost};
use crate::runner::{CaseRunner, HookLeaves};
use crate::tree::{DatasetNode, HookNode, SubjectNode, TreeNode};
use crate::wrapper::WrapperNode;

/// The four optional lifecycle-hook trees carried alongside the descent.
#[derive(Clone, Copy, Default)]
pub struct HookForest<'a> {
    pub before_each: Option<&'a HookNode>,
    pub after_each: Option<&'a HookNode>,
    pub before: Option<&'a HookNode>,
    pub after: Option<&'a HookNode>,
}

impl<'a> HookForest<'a> {
    /// Descends every hook tree by one key; trees without that branch drop
    /// out of the forest.
    fn child(&self, key: &str) -> HookForest<'a> {
        HookForest {
            before_each: self.before_each.and_then(|n| n.child(key)),
            after_each: self.after_each.and_then(|n| n.child(key)),
            before: self.before.and_then(|n| n.child(key)),
            after: self.after.and_then(|n| n.child(key)),
        }
    }

    /// Resolves the hook leaves at one key, for handing to the case runner.
    fn leaves(&self, key: &str) -> HookLeaves {
        let leaf = |tree: Option<&'a HookNode>| {
            tree.and_then(|n| n.child(key))
                .and_then(|n| n.as_leaf())
                .cloned()
        };
        HookLeaves {
            before_each: leaf(self.before_each),
            after_each: leaf(self.after_each),
            before: leaf(self.before),
            after: leaf(self.after),
        }
    }
}

pub struct TreeWalker;

impl TreeWalker {
    /// Walks `subject` and `dataset` in parallel under the open group
    /// `group`, composing dotted namespaces, and dispatches to
    /// [`CaseRunner`] at every function the dataset supplies cases for.
    /// Its only effect is the registrations it performs on the host.
    pub fn walk(
        host: &mut dyn TestHost,
        group: GroupId,
        subject: &SubjectNode,
        dataset: &DatasetNode,
        wrappers: Option<&WrapperNode>,
        hooks: HookForest<'_>,
        namespace: &str,
    ) {
        if subject.as_leaf().is_some() {
            // A function is never recursed into as a subtree.
            return;
        }
        let DatasetNode::Branch(entries) = dataset else {
            return;
        };
        for (key, dataset_child) in entries {
            let child_namespace = format!("{}.{}", namespace, key);
            match subject.child(key) {
                Some(TreeNode::Leaf(func)) => {
                    // Cases at a function: emit. A dataset subtree at a
                    // function is a shape mismatch and yields nothing.
                    if let DatasetNode::Cases(cases) = dataset_child {
                        let wrapper = wrappers
                            .and_then(|w| w.child(key))
                            .and_then(|w| w.as_leaf())
                            .cloned();
                        CaseRunner::run(
                            host,
                            group,
                            func.clone(),
                            cases,
                            &child_namespace,
                            wrapper,
                            &hooks.leaves(key),
                        );
                    }
                }
                Some(branch) => {
                    TreeWalker::walk(
                        host,
                        group,
                        branch,
                        dataset_child,
                        wrappers.and_then(|w| w.child(key)),
                        hooks.child(key),
                        &child_namespace,
                    );
                }
                None => {
                    // Dataset key with no subject counterpart: no case, no
                    // diagnostic.
                }
            }
        }
    }
}
