use crate::app::Route;
use crate::auth::use_session;
use crate::client::api;
use crate::components::{ErrorBanner, LoadingSpinner};
use crate::hooks::use_request_slot;
use crate::utils::{read_upload, select_value, selected_file, textarea_value};
use midart_core::{ApiError, ProfileUpdate, UserType};
use tracing::warn;
use yew::prelude::*;
use yew_router::prelude::*;

#[derive(Properties, PartialEq)]
pub struct EditProfilePageProps {
    pub username: String,
}

async fn save(bio: String, user_type: UserType, image: Option<web_sys::File>) -> Result<(), ApiError> {
    let profile_image = match image {
        Some(file) => Some(read_upload(file).await.map_err(ApiError::Transport)?),
        None => None,
    };
    api()?
        .update_profile(&ProfileUpdate {
            bio: Some(bio),
            user_type: Some(user_type),
            profile_image,
        })
        .await?;
    Ok(())
}

/// Bio, account type and avatar. Only reachable for the viewer's own handle.
#[function_component(EditProfilePage)]
pub fn edit_profile_page(props: &EditProfilePageProps) -> Html {
    let session = use_session();
    let navigator = use_navigator();
    let loaded = use_state(|| false);
    let bio = use_state(String::new);
    let user_type = use_state(UserType::default);
    let image = use_state(|| None::<web_sys::File>);
    let error = use_state(|| None::<String>);
    let saving = use_state(|| false);

    let is_own = session.session.username() == Some(props.username.as_str());

    let requests = use_request_slot();

    {
        let (loaded, bio, user_type, error) =
            (loaded.clone(), bio.clone(), user_type.clone(), error.clone());
        use_effect_with((props.username.clone(), is_own), move |(username, is_own)| {
            if *is_own {
                let username = username.clone();
                let ticket = requests.begin();
                wasm_bindgen_futures::spawn_local(async move {
                    let fetch = async { Ok::<_, ApiError>(api()?.profile(&username).await?) };
                    let Some(result) = requests.settle(&ticket, fetch).await else {
                        return;
                    };
                    match result {
                        Ok(profile) => {
                            bio.set(profile.bio);
                            user_type.set(profile.user_type);
                        }
                        Err(err) => {
                            warn!(%err, %username, "Profile request failed");
                            error.set(err.message_or("Could not load your profile."));
                        }
                    }
                    loaded.set(true);
                });
            }
        });
    }

    let on_bio = {
        let bio = bio.clone();
        Callback::from(move |e: InputEvent| bio.set(textarea_value(&e)))
    };
    let on_user_type = {
        let user_type = user_type.clone();
        Callback::from(move |e: Event| user_type.set(UserType::from(select_value(&e))))
    };
    let on_image = {
        let image = image.clone();
        Callback::from(move |e: Event| image.set(selected_file(&e)))
    };

    let on_submit = {
        let username = props.username.clone();
        let (bio, user_type, image, error, saving) = (
            bio.clone(),
            user_type.clone(),
            image.clone(),
            error.clone(),
            saving.clone(),
        );
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *saving {
                return;
            }
            let (bio, user_type, image) = ((*bio).clone(), (*user_type).clone(), (*image).clone());
            let username = username.clone();
            let navigator = navigator.clone();
            let error = error.clone();
            let saving = saving.clone();
            saving.set(true);
            error.set(None);
            wasm_bindgen_futures::spawn_local(async move {
                match save(bio, user_type, image).await {
                    Ok(()) => {
                        if let Some(navigator) = navigator {
                            navigator.push(&Route::Profile { username });
                        }
                    }
                    Err(err) => {
                        warn!(%err, "Profile update failed");
                        error.set(err.message_or("Could not save your profile."));
                    }
                }
                saving.set(false);
            });
        })
    };

    if !is_own {
        return html! {
            <div class="space-y-3">
                <ErrorBanner message={Some("You can only edit your own profile.".to_string())} />
                <Link<Route> to={Route::Profile { username: props.username.clone() }}
                    classes="text-sm text-gray-700 underline">
                    {"Back to profile"}
                </Link<Route>>
            </div>
        };
    }
    if !*loaded {
        return html! { <LoadingSpinner /> };
    }

    let input_class = "w-full px-4 py-3 text-sm rounded-xl border border-gray-200";
    html! {
        <div class="max-w-md space-y-4">
            <h1 class="text-xl font-semibold text-gray-900">{"Edit profile"}</h1>
            <form onsubmit={on_submit} class="space-y-3">
                <label class="block text-sm text-gray-700">{"Bio"}</label>
                <textarea class={input_class} rows="4" value={(*bio).clone()} oninput={on_bio} />
                <label class="block text-sm text-gray-700">{"Account type"}</label>
                <select class={input_class} onchange={on_user_type}>
                    { for UserType::ALL.iter().map(|kind| html! {
                        <option value={kind.as_str().to_string()} selected={*kind == *user_type}>
                            {kind.label()}
                        </option>
                    }) }
                </select>
                <label class="block text-sm text-gray-700">{"Profile image"}</label>
                <input type="file" accept="image/*" onchange={on_image} />
                <ErrorBanner message={(*error).clone()} />
                <button class="text-sm px-4 py-2 rounded-xl bg-gray-900 text-white" type="submit" disabled={*saving}>
                    { if *saving { "Saving…" } else { "Save" } }
                </button>
            </form>
        </div>
    }
}
