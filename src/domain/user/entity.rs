//! User request types

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// Gender of the initial user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Gender {
    #[serde(rename = "GENDER_FEMALE")]
    Female,
    #[serde(rename = "GENDER_MALE")]
    Male,
    #[default]
    #[serde(rename = "GENDER_UNSPECIFIED")]
    Unspecified,
}

impl Gender {
    /// Selectable genders, in display order
    pub const ALL: [Gender; 3] = [Gender::Female, Gender::Male, Gender::Unspecified];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Female => "GENDER_FEMALE",
            Self::Male => "GENDER_MALE",
            Self::Unspecified => "GENDER_UNSPECIFIED",
        }
    }

    /// Parse a form value, treating empty or unknown input as unspecified
    pub fn from_form_value(value: &str) -> Self {
        value.parse().unwrap_or_default()
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Gender {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "female" | "gender_female" => Ok(Self::Female),
            "male" | "gender_male" => Ok(Self::Male),
            "unspecified" | "gender_unspecified" => Ok(Self::Unspecified),
            other => Err(DomainError::validation(format!("Unknown gender '{}'", other))),
        }
    }
}

/// User part of a setup request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub user_name: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub nick_name: String,
    pub gender: Gender,
    pub password: String,
    pub preferred_language: String,
}
