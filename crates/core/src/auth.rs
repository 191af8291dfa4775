use serde::{Deserialize, Serialize};

/// Raw identity claims handed over by the transport layer for one request.
///
/// ACL strings stay unparsed here; the domain `Principal` parses them once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityClaims {
    subject: String,
    display_name: String,
    email: Option<String>,
    acl: Vec<String>,
}

impl IdentityClaims {
    /// Creates a claims bag from identity provider data.
    #[must_use]
    pub fn new(
        subject: impl Into<String>,
        display_name: impl Into<String>,
        email: Option<String>,
        acl: Vec<String>,
    ) -> Self {
        Self {
            subject: subject.into(),
            display_name: display_name.into(),
            email,
            acl,
        }
    }

    /// Returns the stable subject claim from the identity provider.
    #[must_use]
    pub fn subject(&self) -> &str {
        self.subject.as_str()
    }

    /// Returns the display name for the current user.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.display_name.as_str()
    }

    /// Returns the email, if the provider returned one.
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    /// Returns raw ACL claim strings such as `Project/INTERNAL=V,E`.
    #[must_use]
    pub fn acl(&self) -> &[String] {
        &self.acl
    }
}
