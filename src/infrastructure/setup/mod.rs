//! Organization setup infrastructure
//!
//! The two-step creation form and the headless notification and navigation
//! sinks used when it runs outside a UI.

mod form;
mod sinks;

pub use form::{OrgCreateForm, SetupOutcome, SetupServices};
pub use sinks::{LogNotifier, RecordingNavigator};
