//! Form domain
//!
//! String-valued controls, the rules attached to them and the interpreter
//! that turns rules into presentation-level validation errors.

mod control;
mod group;
mod rule;

pub use control::FormControl;
pub use group::FieldGroup;
pub use rule::{evaluate, passwords_match, CharClass, Rule, ValidationError};
