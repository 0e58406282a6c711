use serde::{Deserialize, Serialize};

use crate::domain::types::{AccountId, Email, NonEmptyString, Role};

/// System account as returned by the account endpoints.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Account {
    #[serde(rename = "accountId")]
    pub id: AccountId,
    #[serde(rename = "accountName")]
    pub name: String,
    #[serde(rename = "accountEmail")]
    pub email: String,
    #[serde(rename = "accountRole")]
    pub role: Role,
}

/// Payload for `POST /Accounts`.
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewAccount {
    pub account_name: NonEmptyString,
    pub account_email: Email,
    pub password: String,
    pub account_role: Role,
}

/// Payload for the admin `PUT /Accounts/{id}` call.
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAccount {
    pub account_name: NonEmptyString,
    pub account_email: Email,
    pub account_role: Role,
}

/// Payload for `PUT /Accounts/profile` when editing name and email.
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfile {
    pub account_name: NonEmptyString,
    pub account_email: Email,
}

/// Payload for `PUT /Accounts/profile` when changing the password.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct ChangePassword {
    pub password: String,
}

/// Body of `POST /Accounts/login`.
#[derive(Clone, Serialize, PartialEq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}
