//! PixBank Core - session, routing and REST client for the PixBank backend
//!
//! Laid out as a small hexagonal core:
//!
//! - **domain**: DTOs mirroring the backend payloads (BankAccount, Transfer, ...)
//! - **ports**: trait definitions for external dependencies (KeyValueStorage)
//! - **adapters**: concrete implementations (file storage, HTTP client)
//! - **services**: session store, auth and account operations, event log
//! - **router**: client paths and the authentication guard

pub mod adapters;
pub mod config;
pub mod domain;
pub mod log_migrations;
pub mod ports;
pub mod router;
pub mod services;

use std::path::Path;
use std::sync::Arc;

use adapters::file_storage::FileStorage;
use adapters::http::ApiClient;
use config::Config;
use ports::KeyValueStorage;
use router::Router;
use services::*;

// Re-export commonly used types at crate root
pub use domain::result::{Error, Result};
pub use domain::{
    AuthResponse, BankAccount, Direction, Session, SessionUser, Statement, Transfer,
    TransferFilters, TransferRequest, TransferType, UserProfile,
};
pub use router::{RouteMatch, View};
pub use services::{EntryPoint, LogEntry, LogEvent, LoggingService};

/// Main context for PixBank operations
///
/// Owns the one session store and hands it to the HTTP layer, the
/// services and the router.
pub struct PixbankContext {
    pub config: Config,
    pub session: Arc<SessionStore>,
    pub api: Arc<ApiClient>,
    pub auth_service: AuthService,
    pub account_service: AccountService,
    pub router: Router,
    pub logger: Option<Arc<LoggingService>>,
}

impl PixbankContext {
    /// Create a context over `<data_dir>/session.json`
    pub fn new(data_dir: &Path, logger: Option<Arc<LoggingService>>) -> Result<Self> {
        let config = Config::load(data_dir)?;
        let storage: Arc<dyn KeyValueStorage> = Arc::new(FileStorage::in_dir(data_dir));
        Self::with_storage(config, storage, logger)
    }

    /// Create a context over any storage backend
    pub fn with_storage(
        config: Config,
        storage: Arc<dyn KeyValueStorage>,
        logger: Option<Arc<LoggingService>>,
    ) -> Result<Self> {
        let session = Arc::new(SessionStore::new(storage));
        let api = Arc::new(ApiClient::new(&config.api_url, Arc::clone(&session))?);

        let auth_service =
            AuthService::new(Arc::clone(&api), Arc::clone(&session), logger.clone());
        let account_service = AccountService::new(Arc::clone(&api), logger.clone());
        let router = Router::new(Arc::clone(&session));

        Ok(Self {
            config,
            session,
            api,
            auth_service,
            account_service,
            router,
            logger,
        })
    }

    /// Navigate to `path`, recording guard redirects in the event log
    pub fn navigate(&self, path: &str) -> Result<RouteMatch> {
        let route = self.router.navigate(path)?;
        if route.guarded {
            if let (Some(logger), Some(from)) = (&self.logger, &route.redirected_from) {
                let _ = logger.log_redirect(from, &route.path);
            }
        }
        Ok(route)
    }
}
