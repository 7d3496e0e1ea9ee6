//! Admin API infrastructure
//!
//! HTTP implementation of the policy provider and org provisioner traits.

mod client;
mod http_client;

pub use client::HttpAdminClient;
pub use http_client::{HttpClient, HttpClientTrait};
