//! Caller identity carried into engine operations.

use std::fmt;

/// Access to the credential of the caller invoking an engine operation.
///
/// Embedding runtimes and transport adapters carry their own context
/// types (request scopes, session objects); implementing this trait is
/// all the engine requires of them.
pub trait CallerContext: Send + Sync {
    /// The caller's raw bearer credential, if one is present.
    fn token(&self) -> Option<&str>;
}

/// A plain bearer-token identity.
#[derive(Clone, PartialEq, Eq)]
pub struct Identity {
    token: Option<String>,
}

impl Identity {
    /// Create an identity holding the given credential.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
        }
    }

    /// Create an identity with no credential attached.
    #[must_use]
    pub const fn anonymous() -> Self {
        Self { token: None }
    }
}

impl CallerContext for Identity {
    fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }
}

impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Identity")
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_exposes_token() {
        let identity = Identity::new("secret-token");
        assert_eq!(identity.token(), Some("secret-token"));
    }

    #[test]
    fn anonymous_has_no_token() {
        let identity = Identity::anonymous();
        assert_eq!(identity.token(), None);
    }

    #[test]
    fn debug_never_prints_the_token() {
        let identity = Identity::new("secret-token");
        let rendered = format!("{identity:?}");
        assert!(!rendered.contains("secret-token"));
        assert!(rendered.contains("[REDACTED]"));
    }

    #[test]
    fn debug_distinguishes_missing_token() {
        let rendered = format!("{:?}", Identity::anonymous());
        assert!(rendered.contains("None"));
    }
}
