//! Policy command - prints the password rules in effect

use tracing::warn;

use crate::config::AppConfig;
use crate::domain::policy::{build_confirm_rules, build_password_rules};
use crate::domain::PasswordPolicyProvider;

use super::admin_client;

/// Fetch the policy and print the rules the form would apply
pub async fn run(config: &AppConfig) -> anyhow::Result<()> {
    let client = admin_client(config)?;

    let policy = match client.get_password_complexity_policy().await {
        Ok(policy) => Some(policy),
        Err(e) => {
            warn!(error = %e, "No password complexity policy defined, using fallback rules");
            None
        }
    };

    match &policy {
        Some(policy) if policy.is_empty() => {
            println!("password complexity policy has no requirements")
        }
        Some(policy) => println!("{}", serde_json::to_string_pretty(policy)?),
        None => println!("no password complexity policy"),
    }

    println!("password:");
    for rule in build_password_rules(policy.as_ref()) {
        println!("  - {}", rule);
    }

    println!("confirmPassword:");
    for rule in build_confirm_rules(policy.as_ref()) {
        println!("  - {}", rule);
    }

    Ok(())
}
