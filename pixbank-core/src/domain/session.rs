//! Session and authentication payloads

use serde::{Deserialize, Serialize};

use super::user::SessionUser;

/// The authenticated session held on the client
///
/// There is no expiry: a token stays valid until it is cleared locally or
/// the backend rejects it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: SessionUser,
}

impl Session {
    pub fn new(token: impl Into<String>, user: SessionUser) -> Self {
        Self {
            token: token.into(),
            user,
        }
    }
}

/// Body returned by sign up and sign in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: SessionUser,
}

impl From<AuthResponse> for Session {
    fn from(response: AuthResponse) -> Self {
        Session::new(response.token, response.user)
    }
}

/// `PUT /auth/sign_in` body
#[derive(Debug, Clone, Serialize)]
pub struct LoginCredentials {
    pub user: LoginUser,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginUser {
    pub email: String,
    pub password: String,
}

impl LoginCredentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            user: LoginUser {
                email: email.into(),
                password: password.into(),
            },
        }
    }
}

/// `POST /auth/sign_up` body
#[derive(Debug, Clone, Serialize)]
pub struct SignUpCredentials {
    pub user: SignUpUser,
}

#[derive(Debug, Clone, Serialize)]
pub struct SignUpUser {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl SignUpCredentials {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            user: SignUpUser {
                name: name.into(),
                email: email.into(),
                password: password.into(),
            },
        }
    }
}
