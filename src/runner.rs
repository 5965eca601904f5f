//! Registers the cases for one resolved function under test.

use crate::error::HarnessError;
use crate::host::{CaseFn, CaseStatus, GroupId, HookFn, HookKind, TestHost};
use crate::matcher::{self, TestCase};
use crate::tree::TestFn;
use crate::wrapper::{completion, default_wrapper, WrapperFn};

/// The lifecycle hooks resolved at one subject path. Absent entries simply
/// register nothing.
#[derive(Clone, Default)]
pub struct HookLeaves {
    pub before_each: Option<HookFn>,
    pub after_each: Option<HookFn>,
    pub before: Option<HookFn>,
    pub after: Option<HookFn>,
}

pub struct CaseRunner;

impl CaseRunner {
    /// Opens a group titled `#namespace()` under `parent`, registers the
    /// present hooks, and registers one test per case in order. Each test
    /// invokes the effective wrapper (the supplied one, or the default) with
    /// a fresh completion pair, then feeds the delivered value and the
    /// case's result descriptor to the matcher.
    ///
    /// A wrapper that returns without resolving its handle yields a failed
    /// case; the harness itself never retries or re-invokes.
    pub fn run(
        host: &mut dyn TestHost,
        parent: GroupId,
        func: TestFn,
        cases: &[TestCase],
        namespace: &str,
        wrapper: Option<WrapperFn>,
        hooks: &HookLeaves,
    ) {
        let group = host.open_group(Some(parent), &format!("#{}()", namespace));

        if let Some(hook) = &hooks.before_each {
            host.register_hook(group, HookKind::BeforeEach, hook.clone());
        }
        if let Some(hook) = &hooks.after_each {
            host.register_hook(group, HookKind::AfterEach, hook.clone());
        }
        if let Some(hook) = &hooks.before {
            host.register_hook(group, HookKind::Before, hook.clone());
        }
        if let Some(hook) = &hooks.after {
            host.register_hook(group, HookKind::After, hook.clone());
        }

        let wrapper = wrapper.unwrap_or_else(default_wrapper);

        for case in cases {
            let title = case.label.clone();
            let func = func.clone();
            let wrapper = wrapper.clone();
            let case = case.clone();
            let body: CaseFn = Box::new(move || {
                let (done, slot) = completion();
                wrapper(&func, &case, done);
                match slot.take() {
                    Some(actual) => match matcher::check(&actual, &case.result) {
                        Ok(()) => CaseStatus::Pass,
                        Err(failure) => CaseStatus::Fail(failure),
                    },
                    None => CaseStatus::Fail(HarnessError::NeverCompleted {
                        case: case.label.clone(),
                    }),
                }
            });
            host.register_case(group, &title, body);
        }
    }
}
