//! Password complexity policy

use serde::{Deserialize, Serialize};

/// Password complexity policy as served by the management API.
///
/// Fields absent from the payload default to "not required".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PasswordPolicy {
    /// Minimum number of characters, 0 disables the check
    pub min_length: u32,
    pub has_lowercase: bool,
    pub has_uppercase: bool,
    pub has_number: bool,
    pub has_symbol: bool,
}

impl PasswordPolicy {
    /// Check if the policy imposes any complexity requirement
    pub fn is_empty(&self) -> bool {
        self.min_length == 0
            && !self.has_lowercase
            && !self.has_uppercase
            && !self.has_number
            && !self.has_symbol
    }
}
