//! Page chrome: header navigation around the routed view

use crate::app::Route;
use crate::auth::{use_session, use_session_actions};
use crate::components::SearchBox;
use tracing::warn;
use yew::prelude::*;
use yew_router::prelude::*;

#[derive(Properties, PartialEq)]
pub struct AppShellProps {
    pub children: Children,
}

#[function_component(AppShell)]
pub fn app_shell(props: &AppShellProps) -> Html {
    let session = use_session();
    let actions = use_session_actions();
    let navigator = use_navigator();

    let on_logout = Callback::from(move |_: MouseEvent| {
        let actions = actions.clone();
        let navigator = navigator.clone();
        wasm_bindgen_futures::spawn_local(async move {
            if let Err(error) = actions.logout().await {
                warn!(%error, "Logout request failed");
            }
            if let Some(navigator) = navigator {
                navigator.push(&Route::Login);
            }
        });
    });

    let link = "text-sm text-gray-600 hover:text-gray-900";
    let account = match (&session.session.user, session.session.is_loading) {
        (_, true) => Html::default(),
        (Some(user), false) => html! {
            <>
                <SearchBox />
                <Link<Route> to={Route::Messages} classes={link}>{"Messages"}</Link<Route>>
                <Link<Route> to={Route::CreateProject} classes={link}>{"New project"}</Link<Route>>
                <Link<Route>
                    to={Route::Profile { username: user.username.clone() }}
                    classes={link}
                >
                    {format!("@{}", user.username)}
                </Link<Route>>
                <button
                    class="text-sm px-3 py-1.5 rounded-xl border border-gray-200 hover:bg-gray-50"
                    onclick={on_logout}
                >
                    {"Logout"}
                </button>
            </>
        },
        (None, false) => html! {
            <Link<Route> to={Route::Login} classes={link}>{"Login"}</Link<Route>>
        },
    };

    html! {
        <div class="min-h-screen bg-white">
            <header class="border-b border-gray-100 bg-white">
                <div class="max-w-3xl mx-auto px-6 py-4 flex items-center justify-between">
                    <Link<Route> to={Route::Home} classes="text-lg font-semibold text-gray-900">
                        {"MidArt"}
                    </Link<Route>>
                    <nav class="flex items-center gap-4">
                        <Link<Route> to={Route::Feed} classes={link}>{"Feed"}</Link<Route>>
                        {account}
                    </nav>
                </div>
            </header>
            <main class="max-w-3xl mx-auto px-6 py-8">
                {props.children.clone()}
            </main>
        </div>
    }
}
