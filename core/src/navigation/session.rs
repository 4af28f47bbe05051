// marketplace/src/navigation/session.rs

//! The authentication collaborator as seen by the navigation guard.

use crate::error::MarketResult;
use async_trait::async_trait;
use parking_lot::RwLock;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
  pub user_id: String,
  pub email: Option<String>,
}

impl Session {
  pub fn new(user_id: impl Into<String>) -> Self {
    Self {
      user_id: user_id.into(),
      email: None,
    }
  }
}

/// "Current session" lookup, backed by an external identity service.
#[async_trait]
pub trait SessionProvider: Send + Sync + 'static {
  async fn current_session(&self) -> MarketResult<Option<Session>>;
}

/// A session holder that is set and cleared explicitly (sign-in / sign-out).
#[derive(Debug, Default)]
pub struct StaticSession {
  session: RwLock<Option<Session>>,
}

impl StaticSession {
  pub fn signed_out() -> Self {
    Self::default()
  }

  pub fn signed_in(session: Session) -> Self {
    Self {
      session: RwLock::new(Some(session)),
    }
  }

  pub fn sign_in(&self, session: Session) {
    *self.session.write() = Some(session);
  }

  pub fn sign_out(&self) {
    *self.session.write() = None;
  }
}

#[async_trait]
impl SessionProvider for StaticSession {
  async fn current_session(&self) -> MarketResult<Option<Session>> {
    Ok(self.session.read().clone())
  }
}
