//! Auth service - sign up, sign in, profile and local session reads

use std::sync::Arc;

use crate::adapters::http::ApiClient;
use crate::domain::result::Result;
use crate::domain::{
    AuthResponse, LoginCredentials, Session, SessionUser, SignUpCredentials, UserProfile,
};
use crate::domain::UserProfileResponse;
use crate::services::logging::{record, LogEvent, LoggingService};
use crate::services::session::SessionStore;

pub struct AuthService {
    api: Arc<ApiClient>,
    session: Arc<SessionStore>,
    logger: Option<Arc<LoggingService>>,
}

impl AuthService {
    pub fn new(
        api: Arc<ApiClient>,
        session: Arc<SessionStore>,
        logger: Option<Arc<LoggingService>>,
    ) -> Self {
        Self {
            api,
            session,
            logger,
        }
    }

    /// Create an account. The returned session is not persisted.
    pub fn sign_up(&self, name: &str, email: &str, password: &str) -> Result<AuthResponse> {
        let credentials = SignUpCredentials::new(name, email, password);
        self.api
            .post("/auth/sign_up", &credentials)
            .inspect_err(|e| {
                record(
                    &self.logger,
                    LogEvent::new("sign_up_failed")
                        .with_operation("sign_up")
                        .with_status(e.status())
                        .with_error(e.to_string()),
                )
            })
    }

    /// Sign in and persist the session. On failure nothing is written.
    ///
    /// An unreadable stored session is discarded first, since the new one
    /// replaces it anyway.
    pub fn login(&self, email: &str, password: &str) -> Result<AuthResponse> {
        if self.session.discard_if_unreadable()? {
            record(&self.logger, LogEvent::new("session_discarded").with_operation("login"));
        }
        let credentials = LoginCredentials::new(email, password);
        let response: AuthResponse = match self.api.put("/auth/sign_in", &credentials) {
            Ok(response) => response,
            Err(e) => {
                record(
                    &self.logger,
                    LogEvent::new("login_failed")
                        .with_operation("login")
                        .with_status(e.status())
                        .with_error(e.to_string()),
                );
                return Err(e);
            }
        };

        self.session.set(&Session::from(response.clone()))?;
        record(&self.logger, LogEvent::new("login_succeeded").with_operation("login"));
        Ok(response)
    }

    /// Profile of the signed-in user. The credential is attached by the
    /// shared request authenticator.
    pub fn user_info(&self) -> Result<UserProfile> {
        self.api
            .get::<UserProfileResponse>("/users/infos")
            .map(UserProfile::from)
            .inspect_err(|e| {
                record(
                    &self.logger,
                    LogEvent::new("request_failed")
                        .with_operation("user_info")
                        .with_status(e.status())
                        .with_error(e.to_string()),
                )
            })
    }

    /// Drop the local session. The backend is not contacted.
    pub fn logout(&self) -> Result<()> {
        self.session.clear()?;
        record(&self.logger, LogEvent::new("logout").with_operation("logout"));
        Ok(())
    }

    pub fn token(&self) -> Result<Option<String>> {
        self.session.token()
    }

    pub fn user(&self) -> Result<Option<SessionUser>> {
        self.session.user()
    }

    pub fn is_authenticated(&self) -> Result<bool> {
        self.session.is_authenticated()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::file_storage::FileStorage;
    use crate::adapters::memory_storage::MemoryStorage;
    use crate::adapters::mock_backend::{MockBackend, MockConfig};
    use crate::services::logging::EntryPoint;
    use tempfile::{tempdir, TempDir};

    fn setup(server: &MockBackend) -> (Arc<SessionStore>, AuthService) {
        let session = Arc::new(SessionStore::new(Arc::new(MemoryStorage::new())));
        let api = Arc::new(ApiClient::new(&server.base_url(), session.clone()).unwrap());
        let auth = AuthService::new(api, session.clone(), None);
        (session, auth)
    }

    #[test]
    fn test_login_persists_session() {
        let server = MockBackend::start(MockConfig::default()).unwrap();
        let (session, auth) = setup(&server);

        let response = auth.login("ana@example.com", "secret").unwrap();

        assert_eq!(response.token, "mock-token");
        let stored = session.get().unwrap().unwrap();
        assert_eq!(stored.token, response.token);
        assert_eq!(stored.user, response.user);
        assert!(auth.is_authenticated().unwrap());
        assert_eq!(auth.user().unwrap().unwrap().email, "ana@example.com");

        let request = server.last_request().unwrap();
        assert_eq!(request.method, "PUT");
        assert_eq!(request.path, "/v1/auth/sign_in");
    }

    #[test]
    fn test_failed_login_leaves_session_untouched() {
        let server = MockBackend::start(MockConfig::default()).unwrap();
        let (session, auth) = setup(&server);
        session
            .set(&Session::new("old-token", SessionUser::new(9, "Old", "old@example.com")))
            .unwrap();

        let err = auth.login("ana@example.com", "wrong").unwrap_err();

        assert_eq!(err.status(), Some(401));
        assert_eq!(session.token().unwrap(), Some("old-token".to_string()));
        assert_eq!(server.requests().len(), 1);
    }

    #[test]
    fn test_sign_up_does_not_persist() {
        let server = MockBackend::start(MockConfig::default()).unwrap();
        let (session, auth) = setup(&server);

        let response = auth.sign_up("Bruno", "bruno@example.com", "secret").unwrap();

        assert_eq!(response.user.name, "Bruno");
        assert_eq!(response.token, "signup-token");
        assert!(!session.is_authenticated().unwrap());

        let request = server.last_request().unwrap();
        assert_eq!(request.method, "POST");
        assert_eq!(request.path, "/v1/auth/sign_up");
        assert_eq!(request.json_body().unwrap()["user"]["email"], "bruno@example.com");
    }

    #[test]
    fn test_user_info_sends_single_bearer_header() {
        let server = MockBackend::start(MockConfig::default()).unwrap();
        let (_, auth) = setup(&server);
        auth.login("ana@example.com", "secret").unwrap();

        let profile = auth.user_info().unwrap();
        assert_eq!(profile.id, 1);

        let request = server.last_request().unwrap();
        let auth_headers: Vec<_> = request
            .headers
            .iter()
            .filter(|(name, _)| name == "authorization")
            .collect();
        assert_eq!(auth_headers.len(), 1);
        assert_eq!(auth_headers[0].1, "Bearer mock-token");
    }

    #[test]
    fn test_user_info_without_session_is_rejected() {
        let server = MockBackend::start(MockConfig::default()).unwrap();
        let (_, auth) = setup(&server);

        let err = auth.user_info().unwrap_err();
        assert!(err.is_unauthorized());
        assert!(server.last_request().unwrap().header("authorization").is_none());
    }

    #[test]
    fn test_logout_clears_without_server_call() {
        let server = MockBackend::start(MockConfig::default()).unwrap();
        let (session, auth) = setup(&server);
        auth.login("ana@example.com", "secret").unwrap();
        let before = server.requests().len();

        auth.logout().unwrap();

        assert_eq!(session.get().unwrap(), None);
        assert_eq!(auth.token().unwrap(), None);
        assert_eq!(auth.user().unwrap(), None);
        assert!(!auth.is_authenticated().unwrap());
        assert_eq!(server.requests().len(), before);
    }

    fn file_backed(server: &MockBackend) -> (TempDir, FileStorage, AuthService) {
        let dir = tempdir().unwrap();
        let file = FileStorage::in_dir(dir.path());
        std::fs::write(file.path(), "{truncated").unwrap();
        let session = Arc::new(SessionStore::new(Arc::new(file.clone())));
        let api = Arc::new(ApiClient::new(&server.base_url(), session.clone()).unwrap());
        (dir, file, AuthService::new(api, session, None))
    }

    #[test]
    fn test_logout_clears_corrupt_session_file() {
        let server = MockBackend::start(MockConfig::default()).unwrap();
        let (_dir, file, auth) = file_backed(&server);

        auth.logout().unwrap();

        assert!(!file.path().exists());
        assert!(!auth.is_authenticated().unwrap());
        assert!(server.requests().is_empty());
    }

    #[test]
    fn test_login_replaces_corrupt_session_file() {
        let server = MockBackend::start(MockConfig::default()).unwrap();
        let (_dir, _file, auth) = file_backed(&server);

        auth.login("ana@example.com", "secret").unwrap();

        assert_eq!(auth.token().unwrap(), Some("mock-token".to_string()));
        assert_eq!(auth.user().unwrap().unwrap().name, "Ana Souza");
        assert!(server.last_request().unwrap().header("authorization").is_none());
    }

    #[test]
    fn test_login_events_are_logged() {
        let server = MockBackend::start(MockConfig::default()).unwrap();
        let dir = tempdir().unwrap();
        let logger =
            Arc::new(LoggingService::new(dir.path(), EntryPoint::Library, "test").unwrap());
        let session = Arc::new(SessionStore::new(Arc::new(MemoryStorage::new())));
        let api = Arc::new(ApiClient::new(&server.base_url(), session.clone()).unwrap());
        let auth = AuthService::new(api, session, Some(logger.clone()));

        let _ = auth.login("ana@example.com", "wrong");
        auth.login("ana@example.com", "secret").unwrap();

        let entries = logger.get_recent(10).unwrap();
        let events: Vec<_> = entries.iter().map(|e| e.event.as_str()).collect();
        assert!(events.contains(&"login_failed"));
        assert!(events.contains(&"login_succeeded"));

        let errors = logger.get_errors(10).unwrap();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].status, Some(401));
    }
}
