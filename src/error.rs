//! Unified error type for the harness.
//!
//! Assertion failures are ordinary errors here: they travel back to the host
//! runner as failed cases and are never swallowed along the way. Everything
//! is a `miette` diagnostic so failures render with codes and help text when
//! a caller chooses to report them that way.

use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum HarnessError {
    /// A result-descriptor check did not hold against the actual value.
    #[error("assertion failed: {message}")]
    #[diagnostic(code(casegen::assertion))]
    Assertion {
        message: String,
        expected: Option<String>,
        actual: Option<String>,
        #[help]
        help: Option<String>,
    },

    /// A dataset/wrapper/hook tree disagrees with the subject tree's shape.
    /// Only raised in strict mode; the default policy skips silently.
    #[error("shape mismatch at '{path}': {reason}")]
    #[diagnostic(code(casegen::shape))]
    Shape { path: String, reason: String },

    /// A dataset file could not be read or parsed.
    #[error("failed to load dataset '{path}': {reason}")]
    #[diagnostic(code(casegen::dataset))]
    Dataset { path: String, reason: String },

    #[error("io error: {0}")]
    #[diagnostic(code(casegen::io))]
    Io(#[from] std::io::Error),

    /// The invocation wrapper returned without ever resolving its completion
    /// handle, so there is no value to assert against.
    #[error("case '{case}' finished without delivering a result")]
    #[diagnostic(
        code(casegen::never_completed),
        help("the invocation wrapper must resolve its completion handle exactly once")
    )]
    NeverCompleted { case: String },
}

impl HarnessError {
    /// Builds an assertion failure carrying printable expected/actual values
    /// for diff-based reporting.
    pub fn assertion(
        message: impl Into<String>,
        expected: Option<String>,
        actual: Option<String>,
    ) -> Self {
        HarnessError::Assertion {
            message: message.into(),
            expected,
            actual,
            help: None,
        }
    }

    /// Attaches a help message to an assertion failure; no-op for other kinds.
    pub fn with_help(mut self, text: impl Into<String>) -> Self {
        if let HarnessError::Assertion { help, .. } = &mut self {
            *help = Some(text.into());
        }
        self
    }

    /// Returns the rendered expected/actual pair when this is an assertion
    /// failure that captured both sides.
    pub fn expected_actual(&self) -> Option<(&str, &str)> {
        match self {
            HarnessError::Assertion {
                expected: Some(e),
                actual: Some(a),
                ..
            } => Some((e.as_str(), a.as_str())),
            _ => None,
        }
    }
}
