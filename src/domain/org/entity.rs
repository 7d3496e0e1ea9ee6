//! Organization request and response types

use serde::{Deserialize, Serialize};

/// Organization part of a setup request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrgRequest {
    pub name: String,
    pub domain: String,
}

impl CreateOrgRequest {
    pub fn new(name: impl Into<String>, domain: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            domain: domain.into(),
        }
    }
}

/// Organization created by a setup call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Org {
    pub id: String,
}

/// Response of the org setup call
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrgSetUpResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub org: Option<Org>,
}

impl OrgSetUpResponse {
    /// Identifier of the created organization, if the response carries one
    pub fn org_id(&self) -> Option<&str> {
        self.org.as_ref().map(|o| o.id.as_str())
    }
}
