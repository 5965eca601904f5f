//! Fluent expectation builder backing the result matcher.
//!
//! `expect(value)` starts a chain; `.not()` flips the sense of whichever
//! check terminates it. Terminal checks return `Result` so failures propagate
//! to the host runner instead of panicking inside harness code.

use crate::error::HarnessError;
use crate::value::Value;

/// Starts an expectation chain against an actual value.
pub fn expect(actual: Value) -> Expectation {
    Expectation {
        actual,
        negated: false,
    }
}

/// One pending assertion: an actual value plus an optional negation.
#[derive(Debug, Clone)]
pub struct Expectation {
    actual: Value,
    negated: bool,
}

impl Expectation {
    /// Inverts the outcome of the terminal check.
    pub fn not(mut self) -> Self {
        self.negated = !self.negated;
        self
    }

    /// Asserts value equality.
    pub fn to_equal(self, expected: &Value) -> Result<(), HarnessError> {
        let holds = self.actual == *expected;
        self.conclude(
            holds,
            format!("to equal {}", expected),
            Some(expected.to_string()),
        )
    }

    /// Asserts that the subject contains `member`: an element of a List, a
    /// substring of a String, or a key of a Map. Subjects that carry no
    /// notion of containment fail outright, negated or not.
    pub fn to_include(self, member: &Value) -> Result<(), HarnessError> {
        let holds = match (&self.actual, member) {
            (Value::List(items), m) => Some(items.contains(m)),
            (Value::String(s), Value::String(sub)) => Some(s.contains(sub.as_str())),
            (Value::Map(entries), Value::String(key)) => Some(entries.contains_key(key)),
            _ => None,
        };
        match holds {
            Some(holds) => self.conclude(holds, format!("to include {}", member), None),
            None => Err(HarnessError::assertion(
                format!(
                    "cannot check that {} ({}) includes {} ({})",
                    self.actual,
                    self.actual.type_name(),
                    member,
                    member.type_name()
                ),
                None,
                Some(self.actual.to_string()),
            )),
        }
    }

    /// Asserts the element/character/entry count of the subject.
    pub fn to_have_length(self, expected: usize) -> Result<(), HarnessError> {
        match self.actual.length() {
            Some(len) => {
                let holds = len == expected;
                let detail = format!("to have length {} (was {})", expected, len);
                self.conclude(holds, detail, Some(expected.to_string()))
            }
            None => Err(HarnessError::assertion(
                format!(
                    "{} ({}) has no length",
                    self.actual,
                    self.actual.type_name()
                ),
                None,
                Some(self.actual.to_string()),
            )),
        }
    }

    /// Asserts that the subject is a Map owning the named property.
    pub fn to_have_property(self, name: &str) -> Result<(), HarnessError> {
        match &self.actual {
            Value::Map(entries) => {
                let holds = entries.contains_key(name);
                self.conclude(holds, format!("to have property {:?}", name), None)
            }
            _ => Err(HarnessError::assertion(
                format!(
                    "{} ({}) cannot own properties",
                    self.actual,
                    self.actual.type_name()
                ),
                None,
                Some(self.actual.to_string()),
            )),
        }
    }

    /// Asserts the type tag of the subject; tags compare case-insensitively
    /// so dataset files may write `number` for `Number`.
    pub fn to_be_a(self, type_tag: &str) -> Result<(), HarnessError> {
        let holds = self.actual.type_name().eq_ignore_ascii_case(type_tag);
        let detail = format!("to be a {} (was {})", type_tag, self.actual.type_name());
        self.conclude(holds, detail, Some(type_tag.to_string()))
    }

    fn conclude(
        self,
        holds: bool,
        detail: String,
        expected: Option<String>,
    ) -> Result<(), HarnessError> {
        if holds != self.negated {
            return Ok(());
        }
        let sense = if self.negated { "not " } else { "" };
        let message = format!("expected {} {}{}", self.actual, sense, detail);
        // A rendered expected value only helps the diff on the plain sense.
        let expected = if self.negated { None } else { expected };
        Err(HarnessError::assertion(
            message,
            expected,
            Some(self.actual.to_string()),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_and_negation() {
        assert!(expect(Value::Number(4.0)).to_equal(&Value::Number(4.0)).is_ok());
        assert!(expect(Value::Number(4.0))
            .not()
            .to_equal(&Value::Number(5.0))
            .is_ok());
        assert!(expect(Value::Number(5.0))
            .not()
            .to_equal(&Value::Number(5.0))
            .is_err());
    }

    #[test]
    fn inclusion_over_lists_strings_and_maps() {
        let list = Value::List(vec![Value::Number(1.0), Value::Number(2.0)]);
        assert!(expect(list).to_include(&Value::Number(2.0)).is_ok());
        assert!(expect(Value::from("hello world"))
            .to_include(&Value::from("world"))
            .is_ok());
        let map = Value::Map(im::hashmap! {"a".to_string() => Value::Nil});
        assert!(expect(map).to_include(&Value::from("a")).is_ok());
    }

    #[test]
    fn inclusion_on_a_number_is_an_error_even_when_negated() {
        let err = expect(Value::Number(1.0))
            .not()
            .to_include(&Value::Number(1.0));
        assert!(err.is_err());
    }

    #[test]
    fn failure_carries_expected_and_actual() {
        let err = expect(Value::Number(4.0))
            .to_equal(&Value::Number(5.0))
            .unwrap_err();
        assert_eq!(err.expected_actual(), Some(("5", "4")));
    }
}
