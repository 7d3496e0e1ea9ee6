//! Organization domain
//!
//! Request and response types for the org setup call and the trait
//! implemented by provisioning backends.

mod entity;
mod provisioner;

pub use entity::{CreateOrgRequest, Org, OrgSetUpResponse};
pub use provisioner::OrgProvisioner;

#[cfg(test)]
pub use provisioner::mock::MockOrgProvisioner;

/// Control names of the organization field group
pub mod field {
    pub const NAME: &str = "name";
    pub const DOMAIN: &str = "domain";
}
