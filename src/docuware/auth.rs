//! HTTP Basic credentials passed through to DocuWare.

use base64::{engine::general_purpose, Engine as _};

/// Username and password supplied by the caller for one request.
///
/// `Debug` redacts the password so credentials can sit inside logged structs.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// `base64("username:password")`.
    pub fn encoded(&self) -> String {
        general_purpose::STANDARD.encode(format!("{}:{}", self.username, self.password))
    }

    /// Full `Authorization` header value.
    pub fn authorization_header(&self) -> String {
        format!("Basic {}", self.encoded())
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}
