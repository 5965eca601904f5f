//! The suite/case registration interface the harness drives.
//!
//! The current-group context is an explicit handle returned by `open_group`
//! rather than ambient state, so traversal code is reentrant and the whole
//! registration side can be exercised in isolation with a recording host.
//!
//! `InProcessHost` is the batteries-included implementation: it records
//! registrations synchronously in order, then `run` executes everything
//! depth-first in registration order and returns one report per case.
//! Registration and execution are deliberately separate phases; the harness
//! only ever does the former.

use std::rc::Rc;

use crate::error::HarnessError;

/// A lifecycle hook closure, run at a suite lifecycle point.
pub type HookFn = Rc<dyn Fn()>;

/// The body of one registered test case.
pub type CaseFn = Box<dyn FnOnce() -> CaseStatus>;

/// Opaque handle to an open group, issued by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GroupId(usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookKind {
    BeforeEach,
    AfterEach,
    Before,
    After,
}

/// Outcome of one executed case. Skipped counts neither pass nor fail.
#[derive(Debug)]
pub enum CaseStatus {
    Pass,
    Fail(HarnessError),
    Skipped(String),
}

/// Report for one executed case, in execution order.
#[derive(Debug)]
pub struct CaseReport {
    /// Full group title, ancestor titles joined with spaces.
    pub group: String,
    pub name: String,
    pub status: CaseStatus,
}

/// Host test-runner registration primitives consumed by the harness.
pub trait TestHost {
    /// Opens a named group under `parent` (None for a root suite) and
    /// returns its handle.
    fn open_group(&mut self, parent: Option<GroupId>, title: &str) -> GroupId;

    /// Registers a lifecycle hook on a group.
    fn register_hook(&mut self, group: GroupId, kind: HookKind, hook: HookFn);

    /// Registers one named test case on a group. Order of registration is
    /// preserved through execution.
    fn register_case(&mut self, group: GroupId, title: &str, body: CaseFn);
}

struct Group {
    title: String,
    parent: Option<GroupId>,
    before: Vec<HookFn>,
    after: Vec<HookFn>,
    before_each: Vec<HookFn>,
    after_each: Vec<HookFn>,
    cases: Vec<(String, CaseFn)>,
}

/// Records registrations, then executes them on demand.
#[derive(Default)]
pub struct InProcessHost {
    groups: Vec<Group>,
}

impl TestHost for InProcessHost {
    fn open_group(&mut self, parent: Option<GroupId>, title: &str) -> GroupId {
        self.groups.push(Group {
            title: title.to_string(),
            parent,
            before: Vec::new(),
            after: Vec::new(),
            before_each: Vec::new(),
            after_each: Vec::new(),
            cases: Vec::new(),
        });
        GroupId(self.groups.len() - 1)
    }

    fn register_hook(&mut self, group: GroupId, kind: HookKind, hook: HookFn) {
        let group = &mut self.groups[group.0];
        match kind {
            HookKind::Before => group.before.push(hook),
            HookKind::After => group.after.push(hook),
            HookKind::BeforeEach => group.before_each.push(hook),
            HookKind::AfterEach => group.after_each.push(hook),
        }
    }

    fn register_case(&mut self, group: GroupId, title: &str, body: CaseFn) {
        self.groups[group.0].cases.push((title.to_string(), body));
    }
}

impl InProcessHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cases registered so far, across all groups.
    pub fn case_count(&self) -> usize {
        self.groups.iter().map(|g| g.cases.len()).sum()
    }

    /// Titles of all opened groups, in registration order.
    pub fn group_titles(&self) -> Vec<&str> {
        self.groups.iter().map(|g| g.title.as_str()).collect()
    }

    /// Chain of group indices from the root down to `id`, inclusive.
    fn lineage(&self, id: usize) -> Vec<usize> {
        let mut chain = vec![id];
        let mut current = id;
        while let Some(GroupId(parent)) = self.groups[current].parent {
            chain.push(parent);
            current = parent;
        }
        chain.reverse();
        chain
    }

    fn full_title(&self, lineage: &[usize]) -> String {
        lineage
            .iter()
            .map(|&i| self.groups[i].title.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Executes all registered cases in registration order and returns their
    /// reports. `before` hooks fire the first time a case inside a group's
    /// subtree runs; `after` hooks fire once everything is done, innermost
    /// first. `beforeEach`/`afterEach` chains include ancestor groups.
    pub fn run(mut self) -> Vec<CaseReport> {
        let mut reports = Vec::new();
        let mut started = vec![false; self.groups.len()];

        for idx in 0..self.groups.len() {
            let cases = std::mem::take(&mut self.groups[idx].cases);
            if cases.is_empty() {
                continue;
            }
            let lineage = self.lineage(idx);
            let full = self.full_title(&lineage);

            for &ancestor in &lineage {
                if !started[ancestor] {
                    started[ancestor] = true;
                    for hook in &self.groups[ancestor].before {
                        hook();
                    }
                }
            }

            let before_each: Vec<HookFn> = lineage
                .iter()
                .flat_map(|&i| self.groups[i].before_each.iter().cloned())
                .collect();
            let after_each: Vec<HookFn> = lineage
                .iter()
                .rev()
                .flat_map(|&i| self.groups[i].after_each.iter().cloned())
                .collect();

            for (name, body) in cases {
                for hook in &before_each {
                    hook();
                }
                let status = body();
                for hook in &after_each {
                    hook();
                }
                reports.push(CaseReport {
                    group: full.clone(),
                    name,
                    status,
                });
            }
        }

        for idx in (0..self.groups.len()).rev() {
            if started[idx] {
                for hook in &self.groups[idx].after {
                    hook();
                }
            }
        }

        reports
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[test]
    fn cases_execute_in_registration_order_with_hooks() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let push = |log: &Rc<RefCell<Vec<String>>>, tag: &str| {
            let log = log.clone();
            let tag = tag.to_string();
            move || log.borrow_mut().push(tag.clone())
        };

        let mut host = InProcessHost::new();
        let root = host.open_group(None, "suite");
        let inner = host.open_group(Some(root), "#ns()");
        host.register_hook(inner, HookKind::Before, Rc::new(push(&log, "before")));
        host.register_hook(inner, HookKind::BeforeEach, Rc::new(push(&log, "each")));
        host.register_hook(inner, HookKind::After, Rc::new(push(&log, "after")));
        for name in ["one", "two"] {
            let log = log.clone();
            let name = name.to_string();
            host.register_case(
                inner,
                &name.clone(),
                Box::new(move || {
                    log.borrow_mut().push(name);
                    CaseStatus::Pass
                }),
            );
        }

        let reports = host.run();
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].group, "suite #ns()");
        assert_eq!(
            *log.borrow(),
            vec!["before", "each", "one", "each", "two", "after"]
        );
    }

    #[test]
    fn empty_groups_never_fire_hooks() {
        let fired = Rc::new(RefCell::new(false));
        let mut host = InProcessHost::new();
        let root = host.open_group(None, "suite");
        let flag = fired.clone();
        host.register_hook(
            root,
            HookKind::Before,
            Rc::new(move || *flag.borrow_mut() = true),
        );
        assert!(host.run().is_empty());
        assert!(!*fired.borrow());
    }
}
