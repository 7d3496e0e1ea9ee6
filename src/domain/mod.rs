//! Domain layer - organization setup types, rules and service traits

pub mod error;
pub mod form;
pub mod org;
pub mod policy;
pub mod sink;
pub mod user;
pub mod wizard;

pub use error::DomainError;
pub use form::{FieldGroup, FormControl, Rule, ValidationError};
pub use org::{CreateOrgRequest, OrgProvisioner, OrgSetUpResponse};
pub use policy::{PasswordPolicy, PasswordPolicyProvider};
pub use sink::{Navigator, Notifier};
pub use user::{CreateUserRequest, Gender};
pub use wizard::WizardState;
