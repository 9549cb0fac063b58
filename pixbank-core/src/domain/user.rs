//! User domain models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User summary returned by sign in and embedded in bank accounts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: i64,
    pub name: String,
    pub email: String,
}

impl SessionUser {
    pub fn new(id: i64, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
        }
    }
}

/// Profile of the authenticated user (`GET /users/infos`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// The backend answers `/users/infos` either with the bare profile or
/// wrapped in a `user` key.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum UserProfileResponse {
    Wrapped { user: UserProfile },
    Bare(UserProfile),
}

impl From<UserProfileResponse> for UserProfile {
    fn from(response: UserProfileResponse) -> Self {
        match response {
            UserProfileResponse::Wrapped { user } => user,
            UserProfileResponse::Bare(user) => user,
        }
    }
}
