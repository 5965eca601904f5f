//! Top-level entry points: suite bootstrap and the ancillary
//! package-presence check.

use std::process::Command;

use crate::error::HarnessError;
use crate::host::{CaseStatus, GroupId, TestHost};
use crate::matcher::{self, ResultDescriptor};
use crate::tree::{self, DatasetNode, HookNode, SubjectNode};
use crate::value::Value;
use crate::walker::{HookForest, TreeWalker};
use crate::wrapper::WrapperNode;

/// Everything needed to generate one suite: the suite title, the root
/// namespace segment, the subject tree of functions under test, the mirrored
/// dataset tree, and optional per-path wrapper and lifecycle-hook trees.
pub struct StartOptions {
    pub description: String,
    pub root: String,
    pub subject: SubjectNode,
    pub dataset: DatasetNode,
    pub wrapper: Option<WrapperNode>,
    pub before_each: Option<HookNode>,
    pub after_each: Option<HookNode>,
    pub before: Option<HookNode>,
    pub after: Option<HookNode>,
    /// When set, the dataset tree is validated against the subject tree up
    /// front and any shape mismatch fails the bootstrap instead of being
    /// skipped silently during the walk.
    pub strict: bool,
}

impl StartOptions {
    pub fn new(
        description: impl Into<String>,
        root: impl Into<String>,
        subject: SubjectNode,
        dataset: DatasetNode,
    ) -> Self {
        Self {
            description: description.into(),
            root: root.into(),
            subject,
            dataset,
            wrapper: None,
            before_each: None,
            after_each: None,
            before: None,
            after: None,
            strict: false,
        }
    }
}

/// Opens the suite group and walks the trees from the root namespace.
///
/// Calling this twice with the same options registers two independent,
/// identically shaped suites; no state is shared between runs beyond the
/// host itself.
pub fn start(host: &mut dyn TestHost, options: &StartOptions) -> Result<GroupId, HarnessError> {
    if options.strict {
        tree::check_congruent(&options.subject, &options.dataset, &options.root)?;
    }
    let suite = host.open_group(None, &options.description);
    let hooks = HookForest {
        before_each: options.before_each.as_ref(),
        after_each: options.after_each.as_ref(),
        before: options.before.as_ref(),
        after: options.after.as_ref(),
    };
    TreeWalker::walk(
        host,
        suite,
        &options.subject,
        &options.dataset,
        options.wrapper.as_ref(),
        hooks,
        &options.root,
    );
    Ok(suite)
}

/// Options for the package-presence check.
pub struct WhichOptions {
    pub packages: Vec<String>,
    pub description: Option<String>,
    /// The lookup program spawned once per package, `which` by default.
    pub lookup_command: String,
}

impl WhichOptions {
    pub fn new<I, S>(packages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            packages: packages.into_iter().map(Into::into).collect(),
            description: None,
            lookup_command: "which".to_string(),
        }
    }
}

/// Registers one case per package that spawns the lookup command and asserts
/// its standard output was non-empty, as a proxy for "found on PATH".
///
/// A spawn-level failure is logged with the package name and the case is
/// skipped, counting neither pass nor fail; the rest of the group proceeds.
pub fn which(host: &mut dyn TestHost, options: &WhichOptions) -> GroupId {
    let description = options.description.clone().unwrap_or_else(|| {
        format!(
            "checks that the following packages are present on this machine: {}",
            options.packages.join(", ")
        )
    });
    let group = host.open_group(None, &description);

    for package in &options.packages {
        let title = package.clone();
        let package = package.clone();
        let command = options.lookup_command.clone();
        host.register_case(
            group,
            &title,
            Box::new(move || match Command::new(&command).arg(&package).output() {
                Ok(output) => {
                    let stdout = String::from_utf8_lossy(&output.stdout);
                    let found = Value::Bool(!stdout.trim().is_empty());
                    match matcher::check(&found, &ResultDescriptor::equals(true)) {
                        Ok(()) => CaseStatus::Pass,
                        Err(failure) => CaseStatus::Fail(failure.with_help(format!(
                            "'{} {}' exited with {:?}; stderr: {}",
                            command,
                            package,
                            output.status.code(),
                            String::from_utf8_lossy(&output.stderr).trim()
                        ))),
                    }
                }
                Err(spawn_error) => {
                    eprintln!(
                        "package check skipped: failed to spawn '{} {}': {}",
                        command, package, spawn_error
                    );
                    CaseStatus::Skipped(format!(
                        "failed to spawn '{}': {}",
                        command, spawn_error
                    ))
                }
            }),
        );
    }

    group
}
