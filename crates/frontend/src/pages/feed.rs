//! Home feed: compose box plus the followed users' posts

use crate::auth::use_session;
use crate::client::api;
use crate::components::{ErrorBanner, FeedItemCard, LoadingSpinner};
use crate::config::AppConfig;
use crate::utils::{read_upload, selected_file, textarea_value};
use midart_core::{
    ApiError, FEED_LOAD_ERROR, FeedItem, FeedLoader, FeedState, FeedUpdate, NewImagePost,
    NewVerbalise,
};
use std::rc::Rc;
use tracing::warn;
use yew::prelude::*;

/// Reducer wrapper around [`FeedState`]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FeedStore {
    pub state: FeedState,
}

impl Reducible for FeedStore {
    type Action = FeedUpdate;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        Rc::new(Self {
            state: self.state.reduce(action),
        })
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum ComposeMode {
    Image,
    Verbalise,
}

/// Why a compose form cannot be sent, if it cannot
fn verbalise_problem(text: &str) -> Option<String> {
    let length = text.trim().chars().count();
    if length == 0 {
        Some("Write something first.".into())
    } else if length > AppConfig::VERBALISE_LIMIT {
        Some(format!(
            "Verbalise posts are limited to {} characters.",
            AppConfig::VERBALISE_LIMIT
        ))
    } else {
        None
    }
}

async fn reload(loader: Rc<FeedLoader>, feed: UseReducerHandle<FeedStore>) {
    match api() {
        Ok(client) => {
            loader.load(&client, |update| feed.dispatch(update)).await;
        }
        Err(error) => {
            warn!(%error, "API client unavailable");
            feed.dispatch(FeedUpdate::Failed(FEED_LOAD_ERROR.to_string()));
        }
    }
}

async fn toggle_like(
    loader: Rc<FeedLoader>,
    feed: UseReducerHandle<FeedStore>,
    item: FeedItem,
) -> Result<(), ApiError> {
    let client = api()?;
    loader
        .toggle_like(&client, &item, |update| feed.dispatch(update))
        .await?;
    Ok(())
}

async fn publish(post: Post) -> Result<(), ApiError> {
    let client = api()?;
    match post {
        Post::Image { file, caption } => {
            let image = read_upload(file).await.map_err(ApiError::Transport)?;
            client
                .create_image_post(&NewImagePost { image, caption })
                .await?;
        }
        Post::Verbalise(content) => {
            client.create_verbalise(&NewVerbalise { content }).await?;
        }
    }
    Ok(())
}

enum Post {
    Image { file: web_sys::File, caption: String },
    Verbalise(String),
}

#[function_component(FeedPage)]
pub fn feed_page() -> Html {
    let session = use_session();
    let loader = use_memo((), |()| FeedLoader::new());
    let feed = use_reducer(FeedStore::default);

    let mode = use_state(|| ComposeMode::Image);
    let caption = use_state(String::new);
    let image = use_state(|| None::<web_sys::File>);
    let verbal = use_state(String::new);
    let busy = use_state(|| false);
    let compose_error = use_state(|| None::<String>);
    let action_error = use_state(|| None::<String>);
    // Key of the item whose like/delete is in flight
    let pending = use_state(|| None::<String>);

    // Load on mount; drop whatever is outstanding on unmount
    {
        let loader = loader.clone();
        let feed = feed.clone();
        use_effect_with((), move |()| {
            wasm_bindgen_futures::spawn_local(reload(loader.clone(), feed));
            move || loader.teardown()
        });
    }

    let set_mode = |next: ComposeMode| {
        let mode = mode.clone();
        let compose_error = compose_error.clone();
        Callback::from(move |_: MouseEvent| {
            mode.set(next);
            compose_error.set(None);
        })
    };

    let on_caption = {
        let caption = caption.clone();
        Callback::from(move |e: InputEvent| caption.set(textarea_value(&e)))
    };
    let on_verbal = {
        let verbal = verbal.clone();
        Callback::from(move |e: InputEvent| verbal.set(textarea_value(&e)))
    };
    let on_image = {
        let image = image.clone();
        Callback::from(move |e: Event| image.set(selected_file(&e)))
    };

    let on_submit = {
        let loader = loader.clone();
        let feed = feed.clone();
        let mode = mode.clone();
        let caption = caption.clone();
        let image = image.clone();
        let verbal = verbal.clone();
        let busy = busy.clone();
        let compose_error = compose_error.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *busy {
                return;
            }

            let post = match *mode {
                ComposeMode::Image => {
                    let Some(file) = (*image).clone() else {
                        compose_error.set(Some("Please choose an image.".into()));
                        return;
                    };
                    Post::Image {
                        file,
                        caption: (*caption).clone(),
                    }
                }
                ComposeMode::Verbalise => {
                    if let Some(problem) = verbalise_problem(&verbal) {
                        compose_error.set(Some(problem));
                        return;
                    }
                    Post::Verbalise(verbal.trim().to_string())
                }
            };

            busy.set(true);
            compose_error.set(None);

            let loader = loader.clone();
            let feed = feed.clone();
            let caption = caption.clone();
            let image = image.clone();
            let verbal = verbal.clone();
            let busy = busy.clone();
            let compose_error = compose_error.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match publish(post).await {
                    Ok(()) => {
                        caption.set(String::new());
                        image.set(None);
                        verbal.set(String::new());
                        busy.set(false);
                        reload(loader, feed).await;
                    }
                    Err(err) => {
                        warn!(%err, "Creating post failed");
                        compose_error.set(err.message_or("Post failed. Try again."));
                        busy.set(false);
                    }
                }
            });
        })
    };

    let on_like = {
        let loader = loader.clone();
        let feed = feed.clone();
        let pending = pending.clone();
        let action_error = action_error.clone();
        Callback::from(move |item: FeedItem| {
            if pending.is_some() {
                return;
            }
            pending.set(Some(item.key()));
            action_error.set(None);

            let loader = loader.clone();
            let feed = feed.clone();
            let pending = pending.clone();
            let action_error = action_error.clone();
            wasm_bindgen_futures::spawn_local(async move {
                if let Err(err) = toggle_like(loader, feed, item).await {
                    warn!(%err, "Like failed");
                    action_error.set(err.message_or("Like failed."));
                }
                pending.set(None);
            });
        })
    };

    let on_delete = {
        let loader = loader.clone();
        let feed = feed.clone();
        let pending = pending.clone();
        let action_error = action_error.clone();
        Callback::from(move |item: FeedItem| {
            if pending.is_some() {
                return;
            }
            pending.set(Some(item.key()));
            action_error.set(None);

            let loader = loader.clone();
            let feed = feed.clone();
            let pending = pending.clone();
            let action_error = action_error.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let result = async { Ok::<_, ApiError>(api()?.delete_item(&item).await?) }.await;
                match result {
                    Ok(()) => reload(loader, feed).await,
                    Err(err) => {
                        warn!(%err, key = %item.key(), "Delete failed");
                        action_error.set(err.message_or("Could not delete the post."));
                    }
                }
                pending.set(None);
            });
        })
    };

    let me = session.session.username().map(str::to_string);
    let state = &feed.state;
    let verbal_length = verbal.chars().count();
    let counter_color = if verbal_length > AppConfig::VERBALISE_LIMIT {
        "text-red-600"
    } else {
        "text-gray-500"
    };

    let list = if state.is_loading && state.items.is_empty() {
        html! { <LoadingSpinner /> }
    } else if state.items.is_empty() && state.error.is_none() {
        html! {
            <div class="rounded-2xl border border-gray-100 p-5 text-sm text-gray-700">
                {"Your feed is empty. Follow someone or post something."}
            </div>
        }
    } else {
        html! {
            <div class="space-y-4">
                { for state.items.iter().map(|item| {
                    let own = me.as_deref() == Some(item.author.username.as_str());
                    html! {
                        <FeedItemCard
                            key={item.key()}
                            item={item.clone()}
                            on_like={on_like.clone()}
                            on_delete={own.then(|| on_delete.clone())}
                            busy={pending.as_deref() == Some(item.key().as_str())}
                        />
                    }
                }) }
            </div>
        }
    };

    let tab = |active: bool| {
        if active {
            "text-sm px-3 py-1.5 rounded-xl bg-gray-900 text-white"
        } else {
            "text-sm px-3 py-1.5 rounded-xl border border-gray-200 text-gray-700"
        }
    };

    html! {
        <div class="space-y-6">
            <div>
                <h1 class="text-xl font-semibold text-gray-900">{"Feed"}</h1>
                <p class="text-sm text-gray-600 mt-1">
                    {"Image posts + Verbalise, from people you follow (and you)."}
                </p>
            </div>

            <div class="rounded-2xl border border-gray-100 p-5 space-y-4">
                <div class="flex items-center gap-2">
                    <button type="button" class={tab(*mode == ComposeMode::Image)}
                        onclick={set_mode(ComposeMode::Image)}>{"Image"}</button>
                    <button type="button" class={tab(*mode == ComposeMode::Verbalise)}
                        onclick={set_mode(ComposeMode::Verbalise)}>{"Verbalise"}</button>
                </div>

                <ErrorBanner message={(*compose_error).clone()} />

                <form onsubmit={on_submit} class="space-y-3">
                    if *mode == ComposeMode::Image {
                        <input type="file" accept="image/*" onchange={on_image} />
                        <textarea
                            class="w-full px-4 py-3 text-sm rounded-xl border border-gray-200"
                            rows="3"
                            placeholder="Caption (optional)"
                            value={(*caption).clone()}
                            oninput={on_caption}
                        />
                    } else {
                        <textarea
                            class="w-full px-4 py-3 text-sm rounded-xl border border-gray-200"
                            rows="4"
                            placeholder="Verbalise it. 280 characters max."
                            value={(*verbal).clone()}
                            oninput={on_verbal}
                        />
                        <div class={classes!("text-xs", counter_color)}>
                            {format!("{verbal_length}/{}", AppConfig::VERBALISE_LIMIT)}
                        </div>
                    }
                    <button
                        class="text-sm px-4 py-2 rounded-xl bg-gray-900 text-white"
                        type="submit"
                        disabled={*busy}
                    >
                        { if *busy { "Posting…" } else { "Post" } }
                    </button>
                </form>
            </div>

            <ErrorBanner message={state.error.clone()} />
            <ErrorBanner message={(*action_error).clone()} />
            {list}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbalise_limit_counts_characters() {
        assert!(verbalise_problem("   ").is_some());
        assert!(verbalise_problem("hello").is_none());
        assert!(verbalise_problem(&"é".repeat(AppConfig::VERBALISE_LIMIT)).is_none());
        assert!(verbalise_problem(&"a".repeat(AppConfig::VERBALISE_LIMIT + 1)).is_some());
    }

    #[test]
    fn verbalise_limit_is_not_utf16_units() {
        // Each of these is two UTF-16 code units but one character
        let emoji = "🎨".repeat(AppConfig::VERBALISE_LIMIT);
        assert_eq!(emoji.encode_utf16().count(), 2 * AppConfig::VERBALISE_LIMIT);
        assert!(verbalise_problem(&emoji).is_none());
        assert!(verbalise_problem(&format!("{emoji}🎨")).is_some());
    }

    #[test]
    fn store_follows_core_reducer() {
        let store = Rc::new(FeedStore::default());
        let next = store.reduce(FeedUpdate::Failed(FEED_LOAD_ERROR.into()));
        assert!(!next.state.is_loading);
        assert_eq!(next.state.error.as_deref(), Some(FEED_LOAD_ERROR));
    }
}
