//! Session handling.
//!
//! Every route receives the caller's [`Session`] explicitly. When no access
//! code is configured the gate is open and new sessions start signed in as
//! the local user.

use uuid::Uuid;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::types::UserId;

/// User assigned to sessions when no access code is configured.
pub const LOCAL_USER: &str = "local";

/// Per-client session state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Opaque session token.
    pub token: Uuid,
    /// Signed-in user, if any.
    pub user: Option<UserId>,
}

impl Session {
    /// A fresh, signed-out session.
    pub fn anonymous() -> Self {
        Self { token: Uuid::new_v4(), user: None }
    }

    /// A fresh session signed in as `user`.
    pub fn signed_in(user: impl Into<UserId>) -> Self {
        Self { token: Uuid::new_v4(), user: Some(user.into()) }
    }
}

/// Whether the session belongs to a signed-in user.
pub fn is_authenticated(session: &Session) -> bool {
    session.user.is_some()
}

/// Checks access codes and signs sessions in and out.
#[derive(Debug, Clone, Default)]
pub struct Authenticator {
    access_code: Option<String>,
}

impl Authenticator {
    /// Gate on the configured access code, if any.
    pub fn from_config(config: &Config) -> Self {
        config.access_code.clone().map_or_else(Self::open, Self::with_code)
    }

    /// Gate requiring `code`.
    pub fn with_code(code: impl Into<String>) -> Self {
        Self { access_code: Some(code.into()) }
    }

    /// No gate: every new session is signed in.
    pub const fn open() -> Self {
        Self { access_code: None }
    }

    /// Whether users must log in.
    pub const fn requires_login(&self) -> bool {
        self.access_code.is_some()
    }

    /// Start a session; signed in already when the gate is open.
    pub fn new_session(&self) -> Session {
        if self.requires_login() {
            Session::anonymous()
        } else {
            Session::signed_in(LOCAL_USER)
        }
    }

    /// Sign `session` in as `user` if `code` matches.
    pub fn login(&self, session: &mut Session, user: &str, code: &str) -> Result<()> {
        if let Some(expected) = &self.access_code {
            if expected != code {
                tracing::warn!("Rejected login for {user:?}");
                return Err(Error::Unauthorized);
            }
        }

        let user = user.trim();
        let user = if user.is_empty() { LOCAL_USER } else { user };
        session.user = Some(UserId::new(user));
        tracing::info!("Signed in as {user}");
        Ok(())
    }

    /// Sign the session out.
    pub fn logout(&self, session: &mut Session) {
        session.user = None;
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    #[test]
    fn test_open_gate_signs_in_local_user() {
        let session = Authenticator::open().new_session();
        assert!(is_authenticated(&session));
        assert_eq!(session.user, Some(UserId::new(LOCAL_USER)));
    }

    #[test]
    fn test_gated_session_starts_signed_out() {
        let auth = Authenticator::with_code("louvor");
        let session = auth.new_session();
        assert!(!is_authenticated(&session));
    }

    #[test]
    fn test_login_with_right_and_wrong_code() {
        let auth = Authenticator::with_code("louvor");
        let mut session = auth.new_session();

        let err = auth.login(&mut session, "ana", "errado").unwrap_err();
        assert!(matches!(err, Error::Unauthorized));
        assert!(!is_authenticated(&session));

        auth.login(&mut session, "ana", "louvor").unwrap();
        assert_eq!(session.user, Some(UserId::new("ana")));

        auth.logout(&mut session);
        assert!(!is_authenticated(&session));
    }

    #[test]
    fn test_sessions_get_distinct_tokens() {
        assert_ne!(Session::anonymous().token, Session::anonymous().token);
    }
}
