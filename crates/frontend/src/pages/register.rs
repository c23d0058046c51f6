use crate::app::Route;
use crate::auth::use_session_actions;
use crate::components::ErrorBanner;
use crate::utils::{input_value, select_value};
use midart_core::{Registration, UserType};
use yew::prelude::*;
use yew_router::prelude::*;

#[function_component(RegisterPage)]
pub fn register_page() -> Html {
    let actions = use_session_actions();
    let navigator = use_navigator();
    let form = use_state(Registration::default);
    let confirm = use_state(String::new);
    let error = use_state(|| None::<String>);
    let submitting = use_state(|| false);

    let field = |update: fn(&mut Registration, String)| {
        let form = form.clone();
        Callback::from(move |e: InputEvent| {
            let mut next = (*form).clone();
            update(&mut next, input_value(&e));
            form.set(next);
        })
    };
    let on_username = field(|form, value| form.username = value);
    let on_email = field(|form, value| form.email = value);
    let on_password = field(|form, value| form.password = value);

    let on_confirm = {
        let confirm = confirm.clone();
        Callback::from(move |e: InputEvent| confirm.set(input_value(&e)))
    };
    let on_user_type = {
        let form = form.clone();
        Callback::from(move |e: Event| {
            form.set(Registration {
                user_type: UserType::from(select_value(&e)),
                ..(*form).clone()
            });
        })
    };

    let on_submit = {
        let form = form.clone();
        let confirm = confirm.clone();
        let error = error.clone();
        let submitting = submitting.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *submitting {
                return;
            }
            let registration = (*form).clone();
            if registration.username.trim().is_empty() || registration.password.is_empty() {
                error.set(Some("Username and password are required.".into()));
                return;
            }
            if registration.password != *confirm {
                error.set(Some("Passwords do not match.".into()));
                return;
            }

            let actions = actions.clone();
            let navigator = navigator.clone();
            let error = error.clone();
            let submitting = submitting.clone();
            error.set(None);
            submitting.set(true);

            wasm_bindgen_futures::spawn_local(async move {
                match actions.register(&registration).await {
                    Ok(_) => {
                        if let Some(navigator) = navigator {
                            navigator.push(&Route::Feed);
                        }
                    }
                    Err(err) => error.set(err.message_or("Registration failed")),
                }
                submitting.set(false);
            });
        })
    };

    let input_class = "w-full px-4 py-3 text-sm rounded-xl border border-gray-200";

    html! {
        <div class="max-w-md mx-auto">
            <div class="rounded-2xl border border-gray-100 p-6">
                <h1 class="text-lg font-semibold text-gray-900 mb-1">{"Create an account"}</h1>
                <p class="text-sm text-gray-500 mb-5">{"Share your work and follow other artists."}</p>

                <form onsubmit={on_submit} class="space-y-3">
                    <input class={input_class} placeholder="Username" autocomplete="username"
                        value={form.username.clone()} oninput={on_username} />
                    <input class={input_class} type="email" placeholder="Email" autocomplete="email"
                        value={form.email.clone()} oninput={on_email} />
                    <input class={input_class} type="password" placeholder="Password" autocomplete="new-password"
                        value={form.password.clone()} oninput={on_password} />
                    <input class={input_class} type="password" placeholder="Confirm password" autocomplete="new-password"
                        value={(*confirm).clone()} oninput={on_confirm} />
                    <select class={input_class} onchange={on_user_type}>
                        { for UserType::ALL.iter().map(|kind| html! {
                            <option value={kind.as_str().to_string()} selected={*kind == form.user_type}>
                                {kind.label()}
                            </option>
                        }) }
                    </select>
                    <ErrorBanner message={(*error).clone()} />
                    <button
                        class="w-full text-sm px-4 py-2.5 rounded-xl bg-gray-900 text-white"
                        type="submit"
                        disabled={*submitting}
                    >
                        { if *submitting { "Creating account..." } else { "Sign up" } }
                    </button>
                </form>

                <p class="text-sm text-gray-500 mt-4">
                    {"Already have an account? "}
                    <Link<Route> to={Route::Login} classes="text-gray-900 underline">{"Log in"}</Link<Route>>
                </p>
            </div>
        </div>
    }
}
