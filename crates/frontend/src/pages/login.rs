use crate::app::Route;
use crate::auth::{use_session, use_session_actions};
use crate::components::ErrorBanner;
use crate::utils::input_value;
use midart_core::Credentials;
use yew::prelude::*;
use yew_router::prelude::*;

#[function_component(LoginPage)]
pub fn login_page() -> Html {
    let session = use_session();
    let actions = use_session_actions();
    let navigator = use_navigator();
    let form = use_state(Credentials::default);
    let error = use_state(|| None::<String>);
    let submitting = use_state(|| false);

    let on_username = {
        let form = form.clone();
        Callback::from(move |e: InputEvent| {
            form.set(Credentials {
                username: input_value(&e),
                ..(*form).clone()
            });
        })
    };
    let on_password = {
        let form = form.clone();
        Callback::from(move |e: InputEvent| {
            form.set(Credentials {
                password: input_value(&e),
                ..(*form).clone()
            });
        })
    };

    let on_submit = {
        let form = form.clone();
        let error = error.clone();
        let submitting = submitting.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *submitting {
                return;
            }
            let credentials = (*form).clone();
            let actions = actions.clone();
            let navigator = navigator.clone();
            let error = error.clone();
            let submitting = submitting.clone();
            error.set(None);
            submitting.set(true);

            wasm_bindgen_futures::spawn_local(async move {
                match actions.login(&credentials).await {
                    Ok(_) => {
                        if let Some(navigator) = navigator {
                            navigator.push(&Route::Feed);
                        }
                    }
                    Err(err) => error.set(err.message_or("Login failed")),
                }
                submitting.set(false);
            });
        })
    };

    if session.session.is_authenticated() && !*submitting {
        return html! { <Redirect<Route> to={Route::Feed} /> };
    }

    html! {
        <div class="max-w-md mx-auto">
            <div class="rounded-2xl border border-gray-100 p-6">
                <h1 class="text-lg font-semibold text-gray-900 mb-1">{"Login"}</h1>
                <p class="text-sm text-gray-500 mb-5">{"Welcome back."}</p>
                if let Some(notice) = session.session.notice() {
                    <p class="mb-4 text-sm px-3 py-2 rounded-xl bg-amber-50 text-amber-800">{notice}</p>
                }

                <form onsubmit={on_submit} class="space-y-3">
                    <input
                        class="w-full px-4 py-3 text-sm rounded-xl border border-gray-200"
                        placeholder="Username"
                        autocomplete="username"
                        value={form.username.clone()}
                        oninput={on_username}
                    />
                    <input
                        class="w-full px-4 py-3 text-sm rounded-xl border border-gray-200"
                        type="password"
                        placeholder="Password"
                        autocomplete="current-password"
                        value={form.password.clone()}
                        oninput={on_password}
                    />
                    <ErrorBanner message={(*error).clone()} />
                    <button
                        class="w-full text-sm px-4 py-2.5 rounded-xl bg-gray-900 text-white"
                        type="submit"
                        disabled={*submitting}
                    >
                        { if *submitting { "Logging in..." } else { "Login" } }
                    </button>
                </form>

                <p class="text-sm text-gray-500 mt-4">
                    {"New here? "}
                    <Link<Route> to={Route::Register} classes="text-gray-900 underline">
                        {"Create an account"}
                    </Link<Route>>
                </p>
            </div>
        </div>
    }
}
