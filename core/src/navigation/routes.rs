// marketplace/src/navigation/routes.rs

//! The application's route table.

/// Who may visit a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
  Public,
  /// Signed-in users only.
  RequiresAuth,
  /// Signed-out users only (login, registration).
  RequiresGuest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
  pub path: &'static str,
  pub name: &'static str,
  pub access: Access,
  /// Navigating here is immediately redirected to the named route.
  pub redirect_to: Option<&'static str>,
}

pub const LOGIN: &str = "login";
pub const DASHBOARD: &str = "dashboard";
pub const NOT_FOUND: &str = "not-found";

static ROUTES: [Route; 8] = [
  Route { path: "/", name: "root", access: Access::Public, redirect_to: Some(LOGIN) },
  Route { path: "/login", name: LOGIN, access: Access::RequiresGuest, redirect_to: None },
  Route { path: "/register", name: "register", access: Access::RequiresGuest, redirect_to: None },
  Route { path: "/dashboard", name: DASHBOARD, access: Access::RequiresAuth, redirect_to: None },
  Route { path: "/transaction-history", name: "transaction-history", access: Access::RequiresAuth, redirect_to: None },
  Route { path: "/checkout", name: "checkout", access: Access::RequiresAuth, redirect_to: None },
  Route { path: "/forbidden", name: "forbidden", access: Access::Public, redirect_to: None },
  Route { path: "/*", name: NOT_FOUND, access: Access::Public, redirect_to: None },
];

pub fn routes() -> &'static [Route] {
  &ROUTES
}

/// Resolves a full path (optionally with `?query` / `#fragment`) to its route.
/// Unknown paths resolve to the catch-all `not-found` route.
pub fn match_route(full_path: &str) -> &'static Route {
  let path = full_path.split(['?', '#']).next().unwrap_or("/");
  let path = if path.len() > 1 { path.trim_end_matches('/') } else { path };
  let path = if path.is_empty() { "/" } else { path };

  ROUTES
    .iter()
    .find(|route| route.name != NOT_FOUND && route.path == path)
    .unwrap_or(&ROUTES[ROUTES.len() - 1])
}

pub fn find_by_name(name: &str) -> Option<&'static Route> {
  ROUTES.iter().find(|route| route.name == name)
}
