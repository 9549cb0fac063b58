//! Service layer
//!
//! Services own the client operations: session state, authentication,
//! account queries and the diagnostic event log.

pub mod account;
pub mod auth;
pub mod logging;
pub mod session;

pub use account::AccountService;
pub use auth::AuthService;
pub use logging::{EntryPoint, LogEntry, LogEvent, LoggingService};
pub use session::SessionStore;
