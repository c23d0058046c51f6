//! Route gating decisions.

use crate::session::Session;
use std::cell::Cell;

/// What a protected route should render for the current session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// Startup probe still running: neutral placeholder only
    Loading,
    RedirectToLogin,
    Render,
}

pub const fn guard(session: &Session) -> GuardDecision {
    if session.is_loading {
        GuardDecision::Loading
    } else if session.user.is_none() {
        GuardDecision::RedirectToLogin
    } else {
        GuardDecision::Render
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomeTarget {
    Feed,
    Login,
}

/// Where `/` sends the visitor; `None` while the session is unknown
pub const fn home_target(session: &Session) -> Option<HomeTarget> {
    match guard(session) {
        GuardDecision::Loading => None,
        GuardDecision::RedirectToLogin => Some(HomeTarget::Login),
        GuardDecision::Render => Some(HomeTarget::Feed),
    }
}

/// Turns a stream of 401 responses into at most one navigation to the login
/// view.
#[derive(Debug)]
pub struct UnauthorizedRedirect {
    login_path: String,
    pending: Cell<bool>,
}

impl UnauthorizedRedirect {
    pub fn new(login_path: impl Into<String>) -> Self {
        Self {
            login_path: login_path.into(),
            pending: Cell::new(false),
        }
    }

    pub fn login_path(&self) -> &str {
        &self.login_path
    }

    pub fn is_login_path(&self, path: &str) -> bool {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        path.trim_end_matches('/') == self.login_path.trim_end_matches('/')
    }

    pub fn should_redirect(&self, current_path: &str) -> bool {
        !self.is_login_path(current_path)
    }

    /// Called for every 401. Returns `true` when the caller should navigate
    /// to the login view: never while already there, and only once per burst.
    pub fn on_unauthorized(&self, current_path: &str) -> bool {
        if !self.should_redirect(current_path) || self.pending.get() {
            return false;
        }
        self.pending.set(true);
        true
    }

    /// Arm again once the login view is showing or a login succeeded
    pub fn reset(&self) {
        self.pending.set(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SessionAction;
    use crate::types::UserSummary;

    fn logged_in() -> Session {
        Session::default().reduce(SessionAction::LoggedIn(UserSummary {
            id: 1,
            username: "ada".into(),
            email: String::new(),
            first_name: String::new(),
            last_name: String::new(),
        }))
    }

    #[test]
    fn loading_session_never_redirects_or_renders() {
        let loading = Session::default();
        assert_eq!(guard(&loading), GuardDecision::Loading);
        assert_eq!(home_target(&loading), None);

        // A user left over from a previous state does not matter while loading
        let stale = Session {
            is_loading: true,
            ..logged_in()
        };
        assert_eq!(guard(&stale), GuardDecision::Loading);
    }

    #[test]
    fn anonymous_session_redirects() {
        let anonymous = Session::default().reduce(SessionAction::Resolved(None));
        assert_eq!(guard(&anonymous), GuardDecision::RedirectToLogin);
        assert_eq!(home_target(&anonymous), Some(HomeTarget::Login));
    }

    #[test]
    fn authenticated_session_renders() {
        assert_eq!(guard(&logged_in()), GuardDecision::Render);
        assert_eq!(home_target(&logged_in()), Some(HomeTarget::Feed));
    }

    #[test]
    fn burst_of_401s_redirects_once() {
        let redirect = UnauthorizedRedirect::new("/login");
        assert!(redirect.on_unauthorized("/feed"));
        assert!(!redirect.on_unauthorized("/feed"));
        assert!(!redirect.on_unauthorized("/profile/ada"));

        redirect.reset();
        assert!(redirect.on_unauthorized("/projects/3"));
    }

    #[test]
    fn no_redirect_from_login_view() {
        let redirect = UnauthorizedRedirect::new("/login");
        assert!(!redirect.on_unauthorized("/login"));
        assert!(!redirect.on_unauthorized("/login/"));
        assert!(!redirect.on_unauthorized("/login?next=/feed"));
        assert!(!redirect.should_redirect("/login#top"));
        assert!(redirect.on_unauthorized("/feed"));
    }
}
