//! Typed tree shapes shared by the harness.
//!
//! The subject, wrapper, and hook trees are all the same recursive variant
//! over different leaf payloads; the dataset tree gets its own enum because
//! its leaves are ordered case lists and it must deserialize from files.
//! Branches keep entries in insertion order, and the walker relies on that
//! order when registering tests.

use std::rc::Rc;

use serde::de::{MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer};

use crate::error::HarnessError;
use crate::host::HookFn;
use crate::matcher::TestCase;
use crate::value::Value;

/// A function under test, already bound to whatever state it closes over.
pub type TestFn = Rc<dyn Fn(&Value) -> Value>;

/// A nested mapping from key to either a leaf payload or a subtree.
#[derive(Clone)]
pub enum TreeNode<T> {
    Leaf(T),
    Branch(Vec<(String, TreeNode<T>)>),
}

pub type SubjectNode = TreeNode<TestFn>;
pub type HookNode = TreeNode<HookFn>;

impl<T> TreeNode<T> {
    pub fn leaf(value: T) -> Self {
        TreeNode::Leaf(value)
    }

    /// An empty branch, ready for `with`.
    pub fn branch() -> Self {
        TreeNode::Branch(Vec::new())
    }

    /// Appends a child entry, preserving insertion order.
    ///
    /// # Panics
    ///
    /// Panics when called on a leaf; leaves have no children by construction.
    pub fn with(mut self, key: impl Into<String>, child: TreeNode<T>) -> Self {
        match &mut self {
            TreeNode::Branch(entries) => entries.push((key.into(), child)),
            TreeNode::Leaf(_) => panic!("cannot add a child to a leaf node"),
        }
        self
    }

    /// Looks up a direct child by key.
    pub fn child(&self, key: &str) -> Option<&TreeNode<T>> {
        match self {
            TreeNode::Branch(entries) => entries
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, node)| node),
            TreeNode::Leaf(_) => None,
        }
    }

    pub fn as_leaf(&self) -> Option<&T> {
        match self {
            TreeNode::Leaf(value) => Some(value),
            TreeNode::Branch(_) => None,
        }
    }

    pub fn entries(&self) -> Option<&[(String, TreeNode<T>)]> {
        match self {
            TreeNode::Branch(entries) => Some(entries),
            TreeNode::Leaf(_) => None,
        }
    }
}

// Leaf payloads are closures, so Debug renders structure only.
impl<T> std::fmt::Debug for TreeNode<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TreeNode::Leaf(_) => write!(f, "Leaf(..)"),
            TreeNode::Branch(entries) => {
                let mut map = f.debug_map();
                for (key, node) in entries {
                    map.entry(key, node);
                }
                map.finish()
            }
        }
    }
}

impl TreeNode<TestFn> {
    /// Wraps a plain closure as a subject leaf.
    pub fn func(f: impl Fn(&Value) -> Value + 'static) -> Self {
        TreeNode::Leaf(Rc::new(f))
    }
}

impl TreeNode<HookFn> {
    /// Wraps a plain closure as a lifecycle hook leaf.
    pub fn hook(f: impl Fn() + 'static) -> Self {
        TreeNode::Leaf(Rc::new(f))
    }
}

/// The dataset tree mirroring the subject tree: case lists sit at the paths
/// where the subject has functions, branches everywhere else.
#[derive(Debug, Clone)]
pub enum DatasetNode {
    Cases(Vec<TestCase>),
    Branch(Vec<(String, DatasetNode)>),
}

impl DatasetNode {
    pub fn cases(cases: Vec<TestCase>) -> Self {
        DatasetNode::Cases(cases)
    }

    pub fn branch() -> Self {
        DatasetNode::Branch(Vec::new())
    }

    /// Appends a child entry, preserving insertion order.
    ///
    /// # Panics
    ///
    /// Panics when called on a case list.
    pub fn with(mut self, key: impl Into<String>, child: DatasetNode) -> Self {
        match &mut self {
            DatasetNode::Branch(entries) => entries.push((key.into(), child)),
            DatasetNode::Cases(_) => panic!("cannot add a child to a case list"),
        }
        self
    }

    pub fn child(&self, key: &str) -> Option<&DatasetNode> {
        match self {
            DatasetNode::Branch(entries) => entries
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, node)| node),
            DatasetNode::Cases(_) => None,
        }
    }
}

impl<'de> Deserialize<'de> for DatasetNode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct NodeVisitor;

        impl<'de> Visitor<'de> for NodeVisitor {
            type Value = DatasetNode;

            fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                f.write_str("a sequence of test cases or a mapping of child datasets")
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let mut cases = Vec::new();
                while let Some(case) = seq.next_element::<TestCase>()? {
                    cases.push(case);
                }
                Ok(DatasetNode::Cases(cases))
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::new();
                while let Some((key, node)) = map.next_entry::<String, DatasetNode>()? {
                    entries.push((key, node));
                }
                Ok(DatasetNode::Branch(entries))
            }
        }

        deserializer.deserialize_any(NodeVisitor)
    }
}

/// Strict-mode congruence check: every dataset path must land on a subject
/// node of the matching kind. Reports the first offending dotted path.
///
/// The walker itself never calls this; lenient silent-skip is the default
/// contract, and strictness is opted into at bootstrap.
pub fn check_congruent(
    subject: &SubjectNode,
    dataset: &DatasetNode,
    namespace: &str,
) -> Result<(), HarnessError> {
    match dataset {
        DatasetNode::Cases(_) => match subject {
            TreeNode::Leaf(_) => Ok(()),
            TreeNode::Branch(_) => Err(HarnessError::Shape {
                path: namespace.to_string(),
                reason: "case list supplied where the subject is a branch".to_string(),
            }),
        },
        DatasetNode::Branch(entries) => {
            if subject.as_leaf().is_some() {
                return Err(HarnessError::Shape {
                    path: namespace.to_string(),
                    reason: "child datasets supplied where the subject is a function".to_string(),
                });
            }
            for (key, child) in entries {
                let path = format!("{}.{}", namespace, key);
                match subject.child(key) {
                    Some(node) => check_congruent(node, child, &path)?,
                    None => {
                        return Err(HarnessError::Shape {
                            path,
                            reason: "no matching key in the subject tree".to_string(),
                        })
                    }
                }
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn branch_entries_keep_insertion_order() {
        let tree = SubjectNode::branch()
            .with("z", SubjectNode::func(|_| Value::Nil))
            .with("a", SubjectNode::func(|_| Value::Nil));
        let keys: Vec<_> = tree
            .entries()
            .unwrap()
            .iter()
            .map(|(k, _)| k.as_str())
            .collect();
        assert_eq!(keys, vec!["z", "a"]);
    }

    #[test]
    fn dataset_deserializes_nested_mappings_and_sequences() {
        let yaml = r#"
math:
  add:
    - label: adds
      arguments: { a: 1, b: 2 }
      result: { equal: 3 }
"#;
        let node: DatasetNode = serde_yaml::from_str(yaml).unwrap();
        let math = node.child("math").unwrap();
        match math.child("add").unwrap() {
            DatasetNode::Cases(cases) => {
                assert_eq!(cases.len(), 1);
                assert_eq!(cases[0].label, "adds");
            }
            DatasetNode::Branch(_) => panic!("expected a case list"),
        }
    }

    #[test]
    fn congruence_check_names_the_offending_path() {
        let subject = SubjectNode::branch().with("add", SubjectNode::func(|_| Value::Nil));
        let dataset = DatasetNode::branch().with("extra", DatasetNode::cases(vec![]));
        let err = check_congruent(&subject, &dataset, "root").unwrap_err();
        match err {
            HarnessError::Shape { path, .. } => assert_eq!(path, "root.extra"),
            other => panic!("unexpected error: {other}"),
        }
    }
}
