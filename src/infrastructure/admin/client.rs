//! Admin API client for policy lookup and org provisioning

use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, info};
use uuid::Uuid;

use super::http_client::HttpClientTrait;
use crate::domain::{
    CreateOrgRequest, CreateUserRequest, DomainError, OrgProvisioner, OrgSetUpResponse,
    PasswordPolicy, PasswordPolicyProvider,
};

const PASSWORD_COMPLEXITY_POLICY_PATH: &str = "/management/v1/policies/passwords/complexity";
const ORG_SETUP_PATH: &str = "/admin/v1/orgs/_setup";

/// Client for the console's admin and management API
#[derive(Debug)]
pub struct HttpAdminClient<C: HttpClientTrait> {
    client: C,
    base_url: String,
    auth_header: Option<String>,
}

#[derive(Serialize)]
struct SetUpOrgBody<'a> {
    org: &'a CreateOrgRequest,
    user: &'a CreateUserRequest,
}

impl<C: HttpClientTrait> HttpAdminClient<C> {
    pub fn new(client: C, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            auth_header: None,
        }
    }

    /// Send `Authorization: Bearer <token>` with every request
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.auth_header = Some(format!("Bearer {}", token.into()));
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn headers<'a>(&'a self, request_id: &'a str) -> Vec<(&'a str, &'a str)> {
        let mut headers = vec![
            ("Accept", "application/json"),
            ("X-Request-Id", request_id),
        ];
        if let Some(auth) = &self.auth_header {
            headers.push(("Authorization", auth.as_str()));
        }
        headers
    }

    fn parse_policy(json: serde_json::Value) -> Result<PasswordPolicy, DomainError> {
        // Policies come either bare or wrapped in a `policy` envelope
        let json = match json {
            serde_json::Value::Object(mut map) if map.contains_key("policy") => {
                map.remove("policy").unwrap_or_default()
            }
            other => other,
        };

        serde_json::from_value(json).map_err(|e| {
            DomainError::provider("admin", format!("Invalid password policy: {}", e))
        })
    }
}

#[async_trait]
impl<C: HttpClientTrait> PasswordPolicyProvider for HttpAdminClient<C> {
    async fn get_password_complexity_policy(&self) -> Result<PasswordPolicy, DomainError> {
        let request_id = Uuid::new_v4().to_string();
        debug!(request_id = %request_id, "Fetching password complexity policy");

        let json = self
            .client
            .get_json(
                &self.url(PASSWORD_COMPLEXITY_POLICY_PATH),
                self.headers(&request_id),
            )
            .await?;

        Self::parse_policy(json)
    }
}

#[async_trait]
impl<C: HttpClientTrait> OrgProvisioner for HttpAdminClient<C> {
    async fn set_up_org(
        &self,
        org: CreateOrgRequest,
        user: CreateUserRequest,
    ) -> Result<OrgSetUpResponse, DomainError> {
        let request_id = Uuid::new_v4().to_string();
        info!(
            request_id = %request_id,
            org = %org.name,
            domain = %org.domain,
            user = %user.user_name,
            "Setting up organization"
        );

        let body = serde_json::to_value(SetUpOrgBody {
            org: &org,
            user: &user,
        })
        .map_err(|e| DomainError::internal(format!("Failed to encode setup request: {}", e)))?;

        let json = self
            .client
            .post_json(&self.url(ORG_SETUP_PATH), self.headers(&request_id), &body)
            .await?;

        serde_json::from_value(json).map_err(|e| {
            DomainError::provider("admin", format!("Invalid setup response: {}", e))
        })
    }
}
