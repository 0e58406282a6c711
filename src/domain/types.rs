//! Strongly-typed value objects used by domain entities.
//!
//! These wrappers enforce basic invariants (positive identifiers, normalized
//! email, known roles) so that once a value reaches the domain layer it can be
//! treated as trusted.
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::ValidateEmail;

/// Errors produced when attempting to construct a constrained value object.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// Provided identifier is zero or negative.
    #[error("id must be greater than zero")]
    NonPositiveId,
    /// Provided email failed format validation.
    #[error("invalid email address")]
    InvalidEmail,
    /// Provided string contained no non-whitespace characters.
    #[error("value cannot be empty")]
    EmptyString,
    /// Role name or code is not one of the known roles.
    #[error("unknown role: {0}")]
    UnknownRole(String),
    /// News status code or name is not recognised.
    #[error("unknown news status: {0}")]
    UnknownStatus(String),
}

/// Normalizes and validates an email string.
fn normalize_email<S: Into<String>>(email: S) -> Result<String, TypeConstraintError> {
    let normalized = email.into().trim().to_lowercase();
    if normalized.validate_email() {
        Ok(normalized)
    } else {
        Err(TypeConstraintError::InvalidEmail)
    }
}

/// Macro to generate lightweight newtypes for positive identifiers.
macro_rules! id_newtype {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[serde(try_from = "i32", into = "i32")]
        pub struct $name(i32);

        impl $name {
            /// Creates a new identifier ensuring it is greater than zero.
            pub fn new(value: i32) -> Result<Self, TypeConstraintError> {
                if value > 0 {
                    Ok(Self(value))
                } else {
                    Err(TypeConstraintError::NonPositiveId)
                }
            }

            /// Returns the raw `i32` backing this identifier.
            pub const fn get(self) -> i32 {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<i32> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: i32) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for i32 {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

id_newtype!(AccountId, "Unique identifier for a system account.");
id_newtype!(CategoryId, "Unique identifier for a news category.");
id_newtype!(NewsArticleId, "Unique identifier for a news article.");
id_newtype!(TagId, "Unique identifier for a tag.");

/// Lower-cased and validated email address.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// Validates and normalizes an email string.
    pub fn new<S: Into<String>>(email: S) -> Result<Self, TypeConstraintError> {
        let normalized = normalize_email(email)?;
        Ok(Self(normalized))
    }

    /// Borrow the email as a `&str`.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert into the owned inner `String`.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for Email {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for Email {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for Email {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Email> for String {
    fn from(value: Email) -> Self {
        value.0
    }
}

/// Trimmed string guaranteed to be non-empty.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct NonEmptyString(String);

impl NonEmptyString {
    /// Trims the value and rejects blank input.
    pub fn new<S: AsRef<str>>(value: S) -> Result<Self, TypeConstraintError> {
        let trimmed = value.as_ref().trim();
        if trimmed.is_empty() {
            Err(TypeConstraintError::EmptyString)
        } else {
            Ok(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for NonEmptyString {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for NonEmptyString {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<NonEmptyString> for String {
    fn from(value: NonEmptyString) -> Self {
        value.0
    }
}

/// Role carried by an account and by the session claims.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    Admin,
    Staff,
    Lecturer,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Admin, Role::Staff, Role::Lecturer];

    /// Textual form used by create/update payloads and token claims.
    pub const fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Staff => "Staff",
            Role::Lecturer => "Lecturer",
        }
    }

    /// Numeric form used by account listings and the `AccountRole` filter.
    pub const fn code(self) -> i32 {
        match self {
            Role::Admin => 0,
            Role::Staff => 1,
            Role::Lecturer => 2,
        }
    }

    pub fn from_code(code: i32) -> Result<Self, TypeConstraintError> {
        match code {
            0 => Ok(Role::Admin),
            1 => Ok(Role::Staff),
            2 => Ok(Role::Lecturer),
            other => Err(TypeConstraintError::UnknownRole(other.to_string())),
        }
    }

    /// Case-insensitive comparison against a raw role claim.
    pub fn matches(self, raw: &str) -> bool {
        raw.trim().eq_ignore_ascii_case(self.as_str())
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| role.matches(s))
            .ok_or_else(|| TypeConstraintError::UnknownRole(s.to_string()))
    }
}

impl Serialize for Role {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Role {
    /// Accepts both the numeric code and the role name.
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Code(i32),
            Name(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Code(code) => Role::from_code(code).map_err(serde::de::Error::custom),
            Raw::Name(name) => name.parse().map_err(serde::de::Error::custom),
        }
    }
}

/// Publication state of a news article.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum NewsStatus {
    /// Draft, hidden from the public reader.
    Inactive,
    /// Published.
    #[default]
    Active,
}

impl NewsStatus {
    /// Value sent as the `NewsStatus` request parameter and in payloads.
    pub const fn as_param(self) -> &'static str {
        match self {
            NewsStatus::Inactive => "Inactive",
            NewsStatus::Active => "Active",
        }
    }

    pub const fn code(self) -> i32 {
        match self {
            NewsStatus::Inactive => 0,
            NewsStatus::Active => 1,
        }
    }

    pub fn from_code(code: i32) -> Result<Self, TypeConstraintError> {
        match code {
            0 => Ok(NewsStatus::Inactive),
            1 => Ok(NewsStatus::Active),
            other => Err(TypeConstraintError::UnknownStatus(other.to_string())),
        }
    }

    /// Label shown on status badges.
    pub const fn label(self) -> &'static str {
        match self {
            NewsStatus::Inactive => "Draft",
            NewsStatus::Active => "Published",
        }
    }

    pub const fn toggled(self) -> Self {
        match self {
            NewsStatus::Inactive => NewsStatus::Active,
            NewsStatus::Active => NewsStatus::Inactive,
        }
    }
}

impl FromStr for NewsStatus {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "active" => Ok(NewsStatus::Active),
            "inactive" => Ok(NewsStatus::Inactive),
            _ => Err(TypeConstraintError::UnknownStatus(s.to_string())),
        }
    }
}

impl Serialize for NewsStatus {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_param())
    }
}

impl<'de> Deserialize<'de> for NewsStatus {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Code(i32),
            Name(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Code(code) => NewsStatus::from_code(code).map_err(serde::de::Error::custom),
            Raw::Name(name) => name.parse().map_err(serde::de::Error::custom),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_reject_non_positive_values() {
        assert_eq!(CategoryId::new(0), Err(TypeConstraintError::NonPositiveId));
        assert_eq!(AccountId::new(-3), Err(TypeConstraintError::NonPositiveId));
        assert_eq!(TagId::new(7).map(TagId::get), Ok(7));
    }

    #[test]
    fn email_is_trimmed_and_lowercased() {
        let email = Email::new("  Editor@Example.COM ").unwrap();
        assert_eq!(email.as_str(), "editor@example.com");
        assert_eq!(Email::new("not-an-email"), Err(TypeConstraintError::InvalidEmail));
    }

    #[test]
    fn role_parses_names_case_insensitively() {
        assert_eq!("ADMIN".parse::<Role>(), Ok(Role::Admin));
        assert_eq!(" staff ".parse::<Role>(), Ok(Role::Staff));
        assert!("editor".parse::<Role>().is_err());
    }

    #[test]
    fn role_deserializes_from_code_or_name() {
        let from_code: Role = serde_json::from_str("1").unwrap();
        let from_name: Role = serde_json::from_str("\"Lecturer\"").unwrap();
        assert_eq!(from_code, Role::Staff);
        assert_eq!(from_name, Role::Lecturer);
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"Admin\"");
    }

    #[test]
    fn news_status_maps_codes_and_params() {
        let status: NewsStatus = serde_json::from_str("0").unwrap();
        assert_eq!(status, NewsStatus::Inactive);
        assert_eq!(status.label(), "Draft");
        assert_eq!(status.toggled().as_param(), "Active");
    }
}
