//! Who is logged in.
//!
//! [`Session`] is a plain reducer state; [`SessionContext`] runs the async
//! operations against an [`AuthApi`] and reports every state change through a
//! `dispatch` callback, so the same code drives a UI reducer and the tests.

use crate::api::AuthApi;
use crate::error::ApiResult;
use crate::types::{Credentials, Registration, SessionPayload, UserSummary};
use tracing::{debug, warn};

pub const EXPIRED_NOTICE: &str = "Your session expired, please log in again.";

/// Process-wide authentication state.
///
/// While `is_loading` is true the startup probe has not settled and `user`
/// must not be trusted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user: Option<UserSummary>,
    pub is_loading: bool,
    /// Set when the server rejected a request with 401 after the session was
    /// established.
    pub expired: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            user: None,
            is_loading: true,
            expired: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionAction {
    /// Startup probe settled
    Resolved(Option<UserSummary>),
    LoggedIn(UserSummary),
    /// Logout, or a failed login
    Cleared,
    /// A request came back 401
    Expired,
}

impl Session {
    #[must_use]
    pub fn reduce(&self, action: SessionAction) -> Self {
        match action {
            SessionAction::Resolved(user) => Self {
                user,
                is_loading: false,
                expired: false,
            },
            SessionAction::LoggedIn(user) => Self {
                user: Some(user),
                is_loading: false,
                expired: false,
            },
            SessionAction::Cleared => Self {
                user: None,
                is_loading: false,
                expired: false,
            },
            SessionAction::Expired => Self {
                user: None,
                is_loading: false,
                expired: self.user.is_some() || self.expired,
            },
        }
    }

    pub const fn is_authenticated(&self) -> bool {
        !self.is_loading && self.user.is_some()
    }

    pub fn username(&self) -> Option<&str> {
        self.user.as_ref().map(|user| user.username.as_str())
    }

    /// What the login view tells a visitor who was logged out by the server
    pub const fn notice(&self) -> Option<&'static str> {
        if self.expired { Some(EXPIRED_NOTICE) } else { None }
    }
}

/// Session operations bound to an API implementation
#[derive(Debug, Clone)]
pub struct SessionContext<A> {
    api: A,
}

impl<A: AuthApi> SessionContext<A> {
    pub const fn new(api: A) -> Self {
        Self { api }
    }

    pub const fn api(&self) -> &A {
        &self.api
    }

    /// Probe the server once at startup. Always dispatches exactly one
    /// [`SessionAction::Resolved`]; any failure counts as logged out.
    pub async fn initialize(&self, dispatch: impl Fn(SessionAction)) {
        let user = match self.api.me().await {
            Ok(payload) => {
                debug!(username = %payload.user.username, "Session restored");
                Some(payload.user)
            }
            Err(error) => {
                debug!(%error, "No active session");
                None
            }
        };
        dispatch(SessionAction::Resolved(user));
    }

    /// Authenticate and start a session. On failure the local user is reset
    /// and the error is handed back untouched for display.
    pub async fn login(
        &self,
        credentials: &Credentials,
        dispatch: impl Fn(SessionAction),
    ) -> ApiResult<SessionPayload> {
        match self.api.login(credentials).await {
            Ok(payload) => {
                debug!(username = %payload.user.username, "Logged in");
                dispatch(SessionAction::LoggedIn(payload.user.clone()));
                Ok(payload)
            }
            Err(error) => {
                warn!(%error, username = %credentials.username, "Login failed");
                dispatch(SessionAction::Cleared);
                Err(error)
            }
        }
    }

    /// End the session. The local user is cleared even if the server call
    /// fails.
    pub async fn logout(&self, dispatch: impl Fn(SessionAction)) -> ApiResult<()> {
        let result = self.api.logout().await;
        if let Err(error) = &result {
            warn!(%error, "Logout request failed, clearing local session anyway");
        }
        dispatch(SessionAction::Cleared);
        result
    }

    /// Create an account. Does not log in.
    pub async fn register(&self, registration: &Registration) -> ApiResult<UserSummary> {
        let user = self.api.register(registration).await?;
        debug!(username = %user.username, "Account created");
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::MockAuthApi;
    use crate::error::ApiError;
    use std::cell::RefCell;

    fn ada() -> UserSummary {
        UserSummary {
            id: 1,
            username: "ada".into(),
            email: "ada@example.com".into(),
            first_name: String::new(),
            last_name: String::new(),
        }
    }

    fn payload(user: UserSummary) -> SessionPayload {
        SessionPayload {
            user,
            profile: None,
        }
    }

    /// Applies dispatched actions the way a UI reducer would and keeps the log
    struct Recorder {
        state: RefCell<Session>,
        actions: RefCell<Vec<SessionAction>>,
    }

    impl Recorder {
        fn new() -> Self {
            Self {
                state: RefCell::new(Session::default()),
                actions: RefCell::new(Vec::new()),
            }
        }

        fn dispatch(&self) -> impl Fn(SessionAction) + '_ {
            move |action| {
                let next = self.state.borrow().reduce(action.clone());
                *self.state.borrow_mut() = next;
                self.actions.borrow_mut().push(action);
            }
        }

        fn resolved_count(&self) -> usize {
            self.actions
                .borrow()
                .iter()
                .filter(|action| matches!(action, SessionAction::Resolved(_)))
                .count()
        }
    }

    #[test]
    fn default_session_is_loading() {
        let session = Session::default();
        assert!(session.is_loading);
        assert!(session.user.is_none());
        assert!(!session.is_authenticated());
    }

    #[tokio::test]
    async fn initialize_restores_user() {
        let mut api = MockAuthApi::new();
        api.expect_me().times(1).returning(|| Ok(payload(ada())));

        let recorder = Recorder::new();
        SessionContext::new(api)
            .initialize(recorder.dispatch())
            .await;

        let state = recorder.state.borrow();
        assert!(!state.is_loading);
        assert_eq!(state.user, Some(ada()));
        assert_eq!(recorder.resolved_count(), 1);
    }

    #[tokio::test]
    async fn initialize_fails_closed() {
        for error in [
            ApiError::Unauthorized("Authentication credentials were not provided.".into()),
            ApiError::Transport("connection refused".into()),
            ApiError::Server {
                status: 502,
                message: "Bad gateway".into(),
            },
        ] {
            let mut api = MockAuthApi::new();
            api.expect_me().times(1).returning(move || Err(error.clone()));

            let recorder = Recorder::new();
            SessionContext::new(api)
                .initialize(recorder.dispatch())
                .await;

            let state = recorder.state.borrow();
            assert!(!state.is_loading);
            assert!(state.user.is_none());
            assert_eq!(recorder.resolved_count(), 1);
        }
    }

    #[tokio::test]
    async fn login_success_sets_user_and_returns_payload() {
        let mut api = MockAuthApi::new();
        api.expect_login()
            .withf(|credentials| credentials.username == "ada")
            .times(1)
            .returning(|_| Ok(payload(ada())));

        let recorder = Recorder::new();
        let credentials = Credentials {
            username: "ada".into(),
            password: "secret".into(),
        };
        let result = SessionContext::new(api)
            .login(&credentials, recorder.dispatch())
            .await
            .unwrap();

        assert_eq!(result.user, ada());
        assert_eq!(recorder.state.borrow().user, Some(ada()));
        assert!(recorder.state.borrow().is_authenticated());
    }

    #[tokio::test]
    async fn login_failure_clears_user_and_propagates() {
        let mut api = MockAuthApi::new();
        api.expect_login()
            .times(1)
            .returning(|_| Err(ApiError::Unauthorized("Invalid credentials".into())));

        let recorder = Recorder::new();
        *recorder.state.borrow_mut() = Session::default().reduce(SessionAction::LoggedIn(ada()));

        let err = SessionContext::new(api)
            .login(&Credentials::default(), recorder.dispatch())
            .await
            .unwrap_err();

        assert_eq!(err, ApiError::Unauthorized("Invalid credentials".into()));
        assert!(recorder.state.borrow().user.is_none());
        assert!(!recorder.state.borrow().is_loading);
    }

    #[tokio::test]
    async fn logout_clears_user_even_when_request_fails() {
        let mut api = MockAuthApi::new();
        api.expect_logout()
            .times(1)
            .returning(|| Err(ApiError::Transport("offline".into())));

        let recorder = Recorder::new();
        *recorder.state.borrow_mut() = Session::default().reduce(SessionAction::LoggedIn(ada()));

        let result = SessionContext::new(api).logout(recorder.dispatch()).await;

        assert!(result.is_err());
        assert!(recorder.state.borrow().user.is_none());
    }

    #[tokio::test]
    async fn register_does_not_touch_session() {
        let mut api = MockAuthApi::new();
        api.expect_register().times(1).returning(|_| Ok(ada()));
        api.expect_login().never();

        let context = SessionContext::new(api);
        let user = context
            .register(&Registration {
                username: "ada".into(),
                ..Registration::default()
            })
            .await
            .unwrap();
        assert_eq!(user.username, "ada");
    }

    #[test]
    fn expiry_only_flags_established_sessions() {
        let logged_in = Session::default().reduce(SessionAction::LoggedIn(ada()));
        let expired = logged_in.reduce(SessionAction::Expired);
        assert!(expired.user.is_none());
        assert!(expired.expired);

        let anonymous = Session::default().reduce(SessionAction::Resolved(None));
        assert!(!anonymous.reduce(SessionAction::Expired).expired);

        assert!(!expired.reduce(SessionAction::LoggedIn(ada())).expired);
    }

    #[test]
    fn notice_shown_until_next_login_or_logout() {
        let expired = Session::default()
            .reduce(SessionAction::LoggedIn(ada()))
            .reduce(SessionAction::Expired);
        assert_eq!(expired.notice(), Some(EXPIRED_NOTICE));

        // A second 401 burst keeps the flag
        assert_eq!(expired.reduce(SessionAction::Expired).notice(), Some(EXPIRED_NOTICE));

        assert_eq!(expired.reduce(SessionAction::Cleared).notice(), None);
        assert_eq!(expired.reduce(SessionAction::LoggedIn(ada())).notice(), None);
        assert_eq!(Session::default().notice(), None);
    }
}
