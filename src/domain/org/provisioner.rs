//! Organization provisioning trait

use async_trait::async_trait;
use std::fmt::Debug;

use super::entity::{CreateOrgRequest, OrgSetUpResponse};
use crate::domain::user::CreateUserRequest;
use crate::domain::DomainError;

/// Backend that creates an organization together with its first user
#[async_trait]
pub trait OrgProvisioner: Send + Sync + Debug {
    async fn set_up_org(
        &self,
        org: CreateOrgRequest,
        user: CreateUserRequest,
    ) -> Result<OrgSetUpResponse, DomainError>;
}
