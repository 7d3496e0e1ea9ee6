//! Password policy provider trait

use async_trait::async_trait;
use std::fmt::Debug;

use super::entity::PasswordPolicy;
use crate::domain::DomainError;

/// Source of the password complexity policy
#[async_trait]
pub trait PasswordPolicyProvider: Send + Sync + Debug {
    /// Fetch the policy that applies to newly created users
    async fn get_password_complexity_policy(&self) -> Result<PasswordPolicy, DomainError>;
}
