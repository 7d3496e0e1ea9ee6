//! Wizard step counter

use serde::Serialize;

/// Number of steps in the org setup wizard
pub const TOTAL_STEPS: u32 = 2;

/// Step counter of a multi-step form.
///
/// The current step always stays within `1..=total_steps`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WizardState {
    total_steps: u32,
    current_step: u32,
}

impl WizardState {
    pub fn new(total_steps: u32) -> Self {
        Self {
            total_steps: total_steps.max(1),
            current_step: 1,
        }
    }

    pub fn total_steps(&self) -> u32 {
        self.total_steps
    }

    pub fn current_step(&self) -> u32 {
        self.current_step
    }

    pub fn is_first_step(&self) -> bool {
        self.current_step == 1
    }

    pub fn is_last_step(&self) -> bool {
        self.current_step == self.total_steps
    }

    /// Advance one step, staying on the last step
    pub fn next(&mut self) {
        if self.current_step < self.total_steps {
            self.current_step += 1;
        }
    }

    /// Go back one step, staying on the first step
    pub fn previous(&mut self) {
        if self.current_step > 1 {
            self.current_step -= 1;
        }
    }
}

impl Default for WizardState {
    fn default() -> Self {
        Self::new(TOTAL_STEPS)
    }
}
