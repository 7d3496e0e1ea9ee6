//! A single named form control

use super::rule::{evaluate, Rule, ValidationError};

/// A string-valued form control with its rules and current validation state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormControl {
    name: &'static str,
    value: String,
    rules: Vec<Rule>,
    errors: Vec<ValidationError>,
}

impl FormControl {
    /// Create an empty control and validate its initial value
    pub fn new(name: &'static str, rules: Vec<Rule>) -> Self {
        let mut control = Self {
            name,
            value: String::new(),
            rules,
            errors: Vec::new(),
        };
        control.validate(None);
        control
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    pub fn valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn has_error(&self, error: &ValidationError) -> bool {
        self.errors.contains(error)
    }

    /// Name of the sibling control this one is compared against, if any
    pub fn sibling(&self) -> Option<&'static str> {
        self.rules.iter().find_map(Rule::sibling)
    }

    pub(crate) fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    /// Re-run all rules against the current value
    pub(crate) fn validate(&mut self, sibling: Option<&str>) {
        self.errors = evaluate(&self.rules, &self.value, sibling);
    }
}
