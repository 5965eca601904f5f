//! Declarative result descriptors and the matcher that turns one descriptor
//! into exactly one assertion against an actual value.
//!
//! Precedence is fixed: `include` wins outright and nothing combines with it,
//! then `not` flips whichever check follows, then the first present key of
//! `equal` / `length` / `property` / `be` is applied. A descriptor with none
//! of those degenerates to equality against its `value` field (absent `value`
//! compares against Nil). Presence is what counts, never truthiness: an
//! expected value of `0`, `false`, or `""` is honored like any other.

use serde::Deserialize;

use crate::error::HarnessError;
use crate::expect::expect;
use crate::value::Value;

/// One test case: a display label, an opaque argument value handed to the
/// function under test, and the declarative expected result.
///
/// Labels should be unique within their group; the harness does not enforce
/// this, but duplicate labels make reports ambiguous.
#[derive(Debug, Clone, Deserialize)]
pub struct TestCase {
    pub label: String,
    #[serde(default)]
    pub arguments: Value,
    #[serde(default)]
    pub result: ResultDescriptor,
}

impl TestCase {
    pub fn new(label: impl Into<String>, arguments: Value, result: ResultDescriptor) -> Self {
        Self {
            label: label.into(),
            arguments,
            result,
        }
    }
}

/// Declarative specification of the assertion to run against an actual value.
/// All keys are optional; see the module docs for precedence.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResultDescriptor {
    /// Exact value equality.
    pub equal: Option<Value>,
    /// Negates the chosen assertion. A flag: `not: false` means no negation.
    #[serde(default)]
    pub not: bool,
    /// Containment: the actual value must be a member of / substring of /
    /// key of this value. Short-circuits every other key.
    pub include: Option<Value>,
    /// Expected element/character/entry count.
    pub length: Option<usize>,
    /// Name of a property the actual value must own.
    pub property: Option<String>,
    /// Expected type tag, matched case-insensitively.
    pub be: Option<String>,
    /// Fallback expected value when no other key is present.
    pub value: Option<Value>,
}

impl ResultDescriptor {
    pub fn equals(expected: impl Into<Value>) -> Self {
        Self {
            equal: Some(expected.into()),
            ..Self::default()
        }
    }

    pub fn including(container: impl Into<Value>) -> Self {
        Self {
            include: Some(container.into()),
            ..Self::default()
        }
    }

    pub fn with_length(expected: usize) -> Self {
        Self {
            length: Some(expected),
            ..Self::default()
        }
    }

    pub fn with_property(name: impl Into<String>) -> Self {
        Self {
            property: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn being(type_tag: impl Into<String>) -> Self {
        Self {
            be: Some(type_tag.into()),
            ..Self::default()
        }
    }

    pub fn negated(mut self) -> Self {
        self.not = true;
        self
    }
}

/// Applies exactly one assertion per the descriptor's precedence rules.
pub fn check(actual: &Value, descriptor: &ResultDescriptor) -> Result<(), HarnessError> {
    if let Some(container) = &descriptor.include {
        return expect(container.clone()).to_include(actual);
    }
    let mut chain = expect(actual.clone());
    if descriptor.not {
        chain = chain.not();
    }
    if let Some(expected) = &descriptor.equal {
        return chain.to_equal(expected);
    }
    if let Some(len) = descriptor.length {
        return chain.to_have_length(len);
    }
    if let Some(name) = &descriptor.property {
        return chain.to_have_property(name);
    }
    if let Some(tag) = &descriptor.be {
        return chain.to_be_a(tag);
    }
    let fallback = descriptor.value.clone().unwrap_or_default();
    chain.to_equal(&fallback)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn include_short_circuits_other_keys() {
        let descriptor = ResultDescriptor {
            include: Some(Value::List(vec![Value::Number(1.0), Value::Number(2.0)])),
            not: true,
            equal: Some(Value::Number(99.0)),
            ..ResultDescriptor::default()
        };
        // Containment holds, so neither `not` nor `equal` may change that.
        assert!(check(&Value::Number(2.0), &descriptor).is_ok());
        assert!(check(&Value::Number(3.0), &descriptor).is_err());
    }

    #[test]
    fn equal_takes_priority_over_length() {
        let descriptor = ResultDescriptor {
            equal: Some(Value::from("ab")),
            length: Some(5),
            ..ResultDescriptor::default()
        };
        assert!(check(&Value::from("ab"), &descriptor).is_ok());
    }

    #[test]
    fn falsy_expected_values_are_still_present() {
        assert!(check(&Value::Number(0.0), &ResultDescriptor::equals(0.0)).is_ok());
        assert!(check(&Value::Bool(false), &ResultDescriptor::equals(false)).is_ok());
        assert!(check(&Value::from(""), &ResultDescriptor::equals("")).is_ok());
        assert!(check(&Value::Nil, &ResultDescriptor::equals(0.0)).is_err());
    }

    #[test]
    fn missing_keys_fall_back_to_value_field() {
        let descriptor = ResultDescriptor {
            value: Some(Value::from("out")),
            ..ResultDescriptor::default()
        };
        assert!(check(&Value::from("out"), &descriptor).is_ok());
        // With no value either, the comparison target is Nil.
        assert!(check(&Value::Nil, &ResultDescriptor::default()).is_ok());
        assert!(check(&Value::Number(1.0), &ResultDescriptor::default()).is_err());
    }

    #[test]
    fn descriptor_deserializes_from_yaml() {
        let descriptor: ResultDescriptor =
            serde_yaml::from_str("{ not: true, equal: 5 }").unwrap();
        assert!(descriptor.not);
        assert!(check(&Value::Number(4.0), &descriptor).is_ok());
        assert!(check(&Value::Number(5.0), &descriptor).is_err());
    }
}
