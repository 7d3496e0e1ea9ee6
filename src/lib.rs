//! Organization Setup
//!
//! A two-step wizard that provisions an organization together with its
//! first administrator:
//! - Password rules built from the server's complexity policy
//! - Field groups with presentation-level validation state
//! - Submission through a pluggable provisioning backend
//! - HTTP client for the console admin API

pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;
pub use domain::DomainError;
pub use infrastructure::setup::{OrgCreateForm, SetupOutcome, SetupServices};
