// marketplace/src/navigation/mod.rs

//! Route table and the authentication guard consulted before each navigation.

pub mod guard;
pub mod routes;
pub mod session;

pub use guard::{Navigation, NavigationGuard};
pub use routes::{find_by_name, match_route, routes, Access, Route};
pub use session::{Session, SessionProvider, StaticSession};
