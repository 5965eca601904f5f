pub use crate::error::HarnessError;

pub mod dataset;
pub mod error;
pub mod expect;
pub mod harness;
pub mod host;
pub mod matcher;
pub mod report;
pub mod runner;
pub mod tree;
pub mod value;
pub mod walker;
pub mod wrapper;

pub use crate::harness::{start, which, StartOptions, WhichOptions};
pub use crate::host::{CaseReport, CaseStatus, InProcessHost, TestHost};
pub use crate::matcher::{ResultDescriptor, TestCase};
pub use crate::tree::{DatasetNode, HookNode, SubjectNode, TreeNode};
pub use crate::value::Value;
pub use crate::wrapper::{Completion, WrapperNode};
