//! Password policy domain
//!
//! The complexity policy served by the management API, the trait used to
//! fetch it and the builder that turns it into password field rules.

mod entity;
mod provider;
mod rules;

pub use entity::PasswordPolicy;
pub use provider::PasswordPolicyProvider;
pub use rules::{build_confirm_rules, build_password_rules};

#[cfg(test)]
pub use provider::mock::MockPasswordPolicyProvider;
