//! Routes and the root component

use crate::auth::{SessionProvider, use_session};
use crate::auth_guard::ProtectedRoute;
use crate::components::{AppShell, LoadingSpinner};
use crate::pages::{
    CreateProjectPage, EditProfilePage, FeedPage, FollowKind, FollowListPage, LoginPage,
    MessagesPage, ProfilePage, ProjectDetailPage, RegisterPage,
};
use midart_core::{HomeTarget, home_target};
use yew::prelude::*;
use yew_router::prelude::*;

#[derive(Clone, Debug, Routable, PartialEq, Eq)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/login")]
    Login,
    #[at("/register")]
    Register,
    #[at("/feed")]
    Feed,
    #[at("/profile/:username")]
    Profile { username: String },
    #[at("/profile/:username/edit")]
    EditProfile { username: String },
    #[at("/profile/:username/followers")]
    Followers { username: String },
    #[at("/profile/:username/following")]
    Following { username: String },
    #[at("/projects/create")]
    CreateProject,
    #[at("/projects/:id")]
    Project { id: u64 },
    #[at("/messages")]
    Messages,
    #[not_found]
    #[at("/404")]
    NotFound,
}

impl Route {
    /// Routes that need a logged-in user
    pub const fn is_protected(&self) -> bool {
        !matches!(
            self,
            Self::Home | Self::Login | Self::Register | Self::NotFound
        )
    }

    /// Whether `path` resolves to a protected route
    pub fn is_protected_path(path: &str) -> bool {
        Self::recognize(path).is_some_and(|route| route.is_protected())
    }
}

fn switch(route: Route) -> Html {
    let page = match &route {
        Route::Home => return html! { <HomeRedirect /> },
        Route::Login => return html! { <LoginPage /> },
        Route::Register => return html! { <RegisterPage /> },
        Route::NotFound => {
            return html! {
                <div class="max-w-xl mx-auto p-8 text-center">
                    <h1 class="text-2xl font-semibold mb-2">{"Page not found"}</h1>
                    <Link<Route> to={Route::Home} classes="text-blue-600 hover:underline">
                        {"Back to Midart"}
                    </Link<Route>>
                </div>
            };
        }
        Route::Feed => html! { <FeedPage /> },
        Route::Profile { username } => html! { <ProfilePage username={username.clone()} /> },
        Route::EditProfile { username } => {
            html! { <EditProfilePage username={username.clone()} /> }
        }
        Route::Followers { username } => html! {
            <FollowListPage username={username.clone()} kind={FollowKind::Followers} />
        },
        Route::Following { username } => html! {
            <FollowListPage username={username.clone()} kind={FollowKind::Following} />
        },
        Route::CreateProject => html! { <CreateProjectPage /> },
        Route::Project { id } => html! { <ProjectDetailPage id={*id} /> },
        Route::Messages => html! { <MessagesPage /> },
    };

    html! { <ProtectedRoute>{page}</ProtectedRoute> }
}

/// `/` sends visitors to the feed or the login view once the session is known
#[function_component(HomeRedirect)]
fn home_redirect() -> Html {
    let session = use_session();
    match home_target(&session.session) {
        None => html! { <LoadingSpinner /> },
        Some(HomeTarget::Feed) => html! { <Redirect<Route> to={Route::Feed} /> },
        Some(HomeTarget::Login) => html! { <Redirect<Route> to={Route::Login} /> },
    }
}

#[function_component(App)]
pub fn app() -> Html {
    html! {
        <BrowserRouter>
            <SessionProvider>
                <AppShell>
                    <Switch<Route> render={switch} />
                </AppShell>
            </SessionProvider>
        </BrowserRouter>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_routes() {
        for path in ["/", "/login", "/register", "/does/not/exist"] {
            assert!(!Route::is_protected_path(path), "{path}");
        }
    }

    #[test]
    fn protected_routes() {
        for path in [
            "/feed",
            "/profile/ada",
            "/profile/ada/edit",
            "/profile/ada/followers",
            "/projects/create",
            "/projects/12",
            "/messages",
        ] {
            assert!(Route::is_protected_path(path), "{path}");
        }
    }

    #[test]
    fn create_is_not_a_project_id() {
        assert_eq!(Route::recognize("/projects/create"), Some(Route::CreateProject));
        assert_eq!(Route::recognize("/projects/7"), Some(Route::Project { id: 7 }));
    }
}
