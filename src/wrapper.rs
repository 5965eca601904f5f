//! Invocation wrappers: the strategy that calls a function under test and
//! delivers its result.
//!
//! Delivery goes through a one-shot `Completion` handle. `resolve` consumes
//! the handle, so the exactly-once contract is enforced by the type system
//! rather than by convention. A wrapper that never resolves leaves the slot
//! empty, which the case runner reports as a failed case.

use std::cell::RefCell;
use std::rc::Rc;

use crate::matcher::TestCase;
use crate::tree::{TestFn, TreeNode};
use crate::value::Value;

/// Invocation strategy: receives the function under test, the current case,
/// and the completion handle to resolve with the value to assert against.
/// Overrides may defer resolution (for functions that suspend) as long as
/// the handle is resolved before the case body returns to the host.
pub type WrapperFn = Rc<dyn Fn(&TestFn, &TestCase, Completion)>;

/// Per-path wrapper overrides, mirroring the subject tree.
pub type WrapperNode = TreeNode<WrapperFn>;

impl TreeNode<WrapperFn> {
    /// Wraps a plain closure as a wrapper leaf.
    pub fn wrap(f: impl Fn(&TestFn, &TestCase, Completion) + 'static) -> Self {
        TreeNode::Leaf(Rc::new(f))
    }
}

/// Write end of a completion pair. Consumed on resolve.
pub struct Completion {
    slot: Rc<RefCell<Option<Value>>>,
}

impl Completion {
    /// Delivers the value to assert against.
    pub fn resolve(self, value: Value) {
        *self.slot.borrow_mut() = Some(value);
    }
}

/// Read end of a completion pair, drained by the case runner.
pub struct CompletionSlot {
    slot: Rc<RefCell<Option<Value>>>,
}

impl CompletionSlot {
    /// Takes the delivered value, if the wrapper resolved.
    pub fn take(&self) -> Option<Value> {
        self.slot.borrow_mut().take()
    }
}

/// Creates a fresh completion pair for one case invocation.
pub fn completion() -> (Completion, CompletionSlot) {
    let slot = Rc::new(RefCell::new(None));
    (
        Completion { slot: slot.clone() },
        CompletionSlot { slot },
    )
}

/// The fallback wrapper: invokes the function synchronously with the case's
/// arguments and resolves immediately with its return value, unmodified.
pub fn default_wrapper() -> WrapperFn {
    Rc::new(|f: &TestFn, case: &TestCase, done: Completion| done.resolve(f(&case.arguments)))
}
