//! Infrastructure layer - External service implementations

pub mod admin;
pub mod logging;
pub mod setup;
