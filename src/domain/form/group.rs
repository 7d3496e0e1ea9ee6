//! Ordered group of form controls

use super::control::FormControl;
use super::rule::ValidationError;
use crate::domain::DomainError;

/// An ordered set of named controls edited together.
///
/// Setting a value re-validates the control and every control whose rules
/// compare against it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldGroup {
    controls: Vec<FormControl>,
}

impl FieldGroup {
    pub fn new(controls: Vec<FormControl>) -> Self {
        Self { controls }
    }

    /// Look up a control by name
    pub fn get(&self, name: &str) -> Option<&FormControl> {
        self.controls.iter().find(|c| c.name() == name)
    }

    /// Current value of a control, if it exists
    pub fn value_of(&self, name: &str) -> Option<&str> {
        self.get(name).map(FormControl::value)
    }

    /// Current value of a control, or the empty string if it does not exist
    pub fn value_or_empty(&self, name: &str) -> String {
        self.value_of(name).unwrap_or_default().to_string()
    }

    /// Set a control's value and re-validate it and its dependents
    pub fn set_value(&mut self, name: &str, value: impl Into<String>) -> Result<(), DomainError> {
        let index = self
            .controls
            .iter()
            .position(|c| c.name() == name)
            .ok_or_else(|| DomainError::validation(format!("Unknown field '{}'", name)))?;

        self.controls[index].set_value(value);
        self.revalidate(index);

        let changed = self.controls[index].name();
        let dependents: Vec<usize> = self
            .controls
            .iter()
            .enumerate()
            .filter(|(i, c)| *i != index && c.sibling() == Some(changed))
            .map(|(i, _)| i)
            .collect();

        for dependent in dependents {
            self.revalidate(dependent);
        }

        Ok(())
    }

    fn revalidate(&mut self, index: usize) {
        let sibling = self.controls[index]
            .sibling()
            .and_then(|name| self.value_of(name))
            .map(str::to_owned);

        self.controls[index].validate(sibling.as_deref());
    }

    /// Check if every control is valid
    pub fn valid(&self) -> bool {
        self.controls.iter().all(FormControl::valid)
    }

    /// Name and value of every control, in declaration order
    pub fn values(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.controls.iter().map(|c| (c.name(), c.value()))
    }

    /// Failing controls with their errors
    pub fn errors(&self) -> Vec<(&'static str, &[ValidationError])> {
        self.controls
            .iter()
            .filter(|c| !c.valid())
            .map(|c| (c.name(), c.errors()))
            .collect()
    }
}
