// marketplace/src/navigation/guard.rs

//! Pre-navigation authentication check.

use super::routes::{match_route, Access, DASHBOARD, LOGIN};
use super::session::SessionProvider;
use std::sync::Arc;
use tracing::{event, instrument, Level};

/// Outcome of a navigation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
  /// Render the named route.
  Allow(&'static str),
  /// Go to the named route instead. `redirect` carries the originally requested
  /// path so the login view can send the user back after signing in.
  Redirect {
    name: &'static str,
    redirect: Option<String>,
  },
}

pub struct NavigationGuard {
  sessions: Arc<dyn SessionProvider>,
}

impl NavigationGuard {
  pub fn new(sessions: Arc<dyn SessionProvider>) -> Self {
    Self { sessions }
  }

  #[instrument(name = "NavigationGuard::resolve", skip(self), ret)]
  pub async fn resolve(&self, full_path: &str) -> Navigation {
    let route = match_route(full_path);

    if let Some(target) = route.redirect_to {
      return Navigation::Redirect {
        name: target,
        redirect: None,
      };
    }

    if route.access == Access::Public {
      return Navigation::Allow(route.name);
    }

    let authenticated = match self.sessions.current_session().await {
      Ok(session) => session.is_some(),
      Err(e) => {
        event!(Level::WARN, error = %e, "Session lookup failed; treating visitor as signed out.");
        false
      }
    };

    match route.access {
      Access::RequiresAuth if !authenticated => Navigation::Redirect {
        name: LOGIN,
        redirect: Some(full_path.to_string()),
      },
      Access::RequiresGuest if authenticated => Navigation::Redirect {
        name: DASHBOARD,
        redirect: None,
      },
      _ => Navigation::Allow(route.name),
    }
  }
}

impl std::fmt::Debug for NavigationGuard {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("NavigationGuard").finish_non_exhaustive()
  }
}
