//! Password rule construction from a complexity policy

use super::entity::PasswordPolicy;
use crate::domain::form::{CharClass, Rule};
use crate::domain::user::field;

/// Build the ordered rule list for the password field.
///
/// Without a policy only `Required` is applied.
pub fn build_password_rules(policy: Option<&PasswordPolicy>) -> Vec<Rule> {
    let mut rules = vec![Rule::Required];

    let Some(policy) = policy else {
        return rules;
    };

    if policy.min_length > 0 {
        rules.push(Rule::MinLength(policy.min_length as usize));
    }
    if policy.has_lowercase {
        rules.push(Rule::MatchesPattern(CharClass::Lowercase));
    }
    if policy.has_uppercase {
        rules.push(Rule::MatchesPattern(CharClass::Uppercase));
    }
    if policy.has_number {
        rules.push(Rule::MatchesPattern(CharClass::Digit));
    }
    if policy.has_symbol {
        rules.push(Rule::MatchesPattern(CharClass::Symbol));
    }

    rules
}

/// Build the rule list for the confirmation field: the password rules
/// followed by the equality check against the password field
pub fn build_confirm_rules(policy: Option<&PasswordPolicy>) -> Vec<Rule> {
    let mut rules = build_password_rules(policy);
    rules.push(Rule::MatchesField(field::PASSWORD));
    rules
}
