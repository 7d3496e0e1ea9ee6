//! User domain
//!
//! Request types for the initial administrator created alongside an
//! organization.

mod entity;

pub use entity::{CreateUserRequest, Gender};

/// Preferred languages offered by the form
pub const LANGUAGES: [&str; 2] = ["de", "en"];

/// Control names of the user field group
pub mod field {
    pub const USER_NAME: &str = "userName";
    pub const FIRST_NAME: &str = "firstName";
    pub const LAST_NAME: &str = "lastName";
    pub const EMAIL: &str = "email";
    pub const GENDER: &str = "gender";
    pub const NICK_NAME: &str = "nickName";
    pub const PREFERRED_LANGUAGE: &str = "preferredLanguage";
    pub const PASSWORD: &str = "password";
    pub const CONFIRM_PASSWORD: &str = "confirmPassword";
}
