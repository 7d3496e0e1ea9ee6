//! Validation rules and their interpreter

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

static LOWERCASE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(CharClass::Lowercase.pattern()).unwrap());
static UPPERCASE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(CharClass::Uppercase.pattern()).unwrap());
static DIGIT_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(CharClass::Digit.pattern()).unwrap());
static SYMBOL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(CharClass::Symbol.pattern()).unwrap());

/// Character class a value must contain at least once
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharClass {
    Lowercase,
    Uppercase,
    Digit,
    /// Anything outside `[a-zA-Z0-9]`
    Symbol,
}

impl CharClass {
    /// Source of the regex used for this class
    pub fn pattern(&self) -> &'static str {
        match self {
            Self::Lowercase => "[a-z]",
            Self::Uppercase => "[A-Z]",
            Self::Digit => "[0-9]",
            Self::Symbol => "[^a-zA-Z0-9]",
        }
    }

    fn regex(&self) -> &'static Regex {
        match self {
            Self::Lowercase => &*LOWERCASE_PATTERN,
            Self::Uppercase => &*UPPERCASE_PATTERN,
            Self::Digit => &*DIGIT_PATTERN,
            Self::Symbol => &*SYMBOL_PATTERN,
        }
    }

    /// Check whether the value contains a character of this class
    pub fn is_contained_in(&self, value: &str) -> bool {
        self.regex().is_match(value)
    }
}

impl fmt::Display for CharClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lowercase => write!(f, "a lowercase letter"),
            Self::Uppercase => write!(f, "an uppercase letter"),
            Self::Digit => write!(f, "a digit"),
            Self::Symbol => write!(f, "a symbol"),
        }
    }
}

/// A single validation rule attached to a form control.
///
/// Only `Required` rejects an empty value. Length and pattern rules pass on
/// empty input so an untouched field reports a single error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    /// Value must be non-empty
    Required,
    /// Value must have at least this many characters
    MinLength(usize),
    /// Value must contain at least one character of the class
    MatchesPattern(CharClass),
    /// Value must equal the named sibling control's value
    MatchesField(&'static str),
}

impl Rule {
    /// Evaluate the rule against a value.
    ///
    /// `sibling` is the current value of the control named by
    /// `MatchesField`, and is ignored by every other rule.
    pub fn check(&self, value: &str, sibling: Option<&str>) -> Option<ValidationError> {
        match self {
            Self::Required => value.is_empty().then_some(ValidationError::Required),
            Self::MinLength(min) => {
                let actual = value.chars().count();
                (!value.is_empty() && actual < *min).then_some(ValidationError::MinLength {
                    required: *min,
                    actual,
                })
            }
            Self::MatchesPattern(class) => (!value.is_empty() && !class.is_contained_in(value))
                .then_some(ValidationError::Pattern(*class)),
            Self::MatchesField(_) => {
                let other = sibling.unwrap_or_default();
                (!passwords_match(other, value)).then_some(ValidationError::Mismatch)
            }
        }
    }

    /// Check if this rule reads a sibling control
    pub fn sibling(&self) -> Option<&'static str> {
        match self {
            Self::MatchesField(name) => Some(*name),
            _ => None,
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Required => write!(f, "required"),
            Self::MinLength(min) => write!(f, "at least {} characters", min),
            Self::MatchesPattern(class) => write!(f, "contains {}", class),
            Self::MatchesField(name) => write!(f, "equals {}", name),
        }
    }
}

/// A failed rule as presented on a control
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("This field is required")]
    Required,

    #[error("Must be at least {required} characters long (currently {actual})")]
    MinLength { required: usize, actual: usize },

    #[error("Must contain {0}")]
    Pattern(CharClass),

    #[error("Passwords do not match")]
    Mismatch,
}

/// Run every rule in order and collect the failures
pub fn evaluate(rules: &[Rule], value: &str, sibling: Option<&str>) -> Vec<ValidationError> {
    rules
        .iter()
        .filter_map(|rule| rule.check(value, sibling))
        .collect()
}

/// Cross-field comparison for password confirmation
pub fn passwords_match(password: &str, confirm: &str) -> bool {
    password == confirm
}
