//! Global session context and provider

use crate::app::Route;
use crate::auth::error_handler::{clear_unauthorized_callback, set_unauthorized_callback};
use crate::client::api;
use crate::config::AppConfig;
use midart_core::{
    ApiResult, Credentials, Registration, Session, SessionAction, SessionContext,
    SessionPayload, UnauthorizedRedirect,
};
use std::rc::Rc;
use tracing::debug;
use yew::prelude::*;
use yew_router::prelude::*;

/// Reducer wrapper around [`Session`]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionStore {
    pub session: Session,
}

impl Reducible for SessionStore {
    type Action = SessionAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        Rc::new(Self {
            session: self.session.reduce(action),
        })
    }
}

pub type SessionHandle = UseReducerHandle<SessionStore>;

#[derive(Properties, PartialEq)]
pub struct SessionProviderProps {
    pub children: Children,
}

/// Probes `/auth/me/` once on mount and owns the 401 redirect
#[function_component(SessionProvider)]
pub fn session_provider(props: &SessionProviderProps) -> Html {
    let session = use_reducer(SessionStore::default);
    let navigator = use_navigator();
    let location = use_location();
    let redirect = use_memo((), |()| UnauthorizedRedirect::new(AppConfig::LOGIN_PATH));

    // Startup probe
    {
        let session = session.clone();
        use_effect_with((), move |()| {
            wasm_bindgen_futures::spawn_local(async move {
                match api() {
                    Ok(client) => {
                        SessionContext::new(client)
                            .initialize(|action| session.dispatch(action))
                            .await;
                    }
                    Err(error) => {
                        debug!(%error, "API client unavailable");
                        session.dispatch(SessionAction::Resolved(None));
                    }
                }
            });
        });
    }

    // 401 handler
    {
        let session = session.clone();
        let redirect = redirect.clone();
        use_effect_with((), move |()| {
            set_unauthorized_callback(Rc::new(move || {
                session.dispatch(SessionAction::Expired);

                let path = current_path();
                if Route::is_protected_path(&path) && redirect.on_unauthorized(&path) {
                    debug!(%path, "Session expired, redirecting to login");
                    if let Some(navigator) = &navigator {
                        navigator.push(&Route::Login);
                    }
                }
            }));
            clear_unauthorized_callback
        });
    }

    // Re-arm once the login view is showing
    {
        let path = location.map(|location| location.path().to_string());
        use_effect_with(path, move |path| {
            if path
                .as_deref()
                .is_some_and(|path| redirect.is_login_path(path))
            {
                redirect.reset();
            }
        });
    }

    html! {
        <ContextProvider<SessionHandle> context={session}>
            {props.children.clone()}
        </ContextProvider<SessionHandle>>
    }
}

fn current_path() -> String {
    web_sys::window()
        .and_then(|window| window.location().pathname().ok())
        .unwrap_or_default()
}

/// Hook to use the session context
#[hook]
pub fn use_session() -> SessionHandle {
    use_context::<SessionHandle>()
        .expect("Session context not found. Make sure to wrap your component with SessionProvider")
}

/// Session operations bound to the provider's reducer
#[derive(Clone)]
pub struct SessionActions {
    handle: SessionHandle,
}

impl SessionActions {
    pub async fn login(&self, credentials: &Credentials) -> ApiResult<SessionPayload> {
        let handle = self.handle.clone();
        SessionContext::new(api()?)
            .login(credentials, move |action| handle.dispatch(action))
            .await
    }

    pub async fn logout(&self) -> ApiResult<()> {
        let handle = self.handle.clone();
        match api() {
            Ok(client) => {
                SessionContext::new(client)
                    .logout(move |action| handle.dispatch(action))
                    .await
            }
            Err(error) => {
                handle.dispatch(SessionAction::Cleared);
                Err(error)
            }
        }
    }

    /// Create the account, then log straight in with the same credentials
    pub async fn register(&self, registration: &Registration) -> ApiResult<SessionPayload> {
        SessionContext::new(api()?).register(registration).await?;
        self.login(&Credentials {
            username: registration.username.clone(),
            password: registration.password.clone(),
        })
        .await
    }
}

#[hook]
pub fn use_session_actions() -> SessionActions {
    SessionActions {
        handle: use_session(),
    }
}
