//! Comment thread under a post, fetched when first opened

use crate::app::Route;
use crate::client::api;
use crate::components::ErrorBanner;
use crate::hooks::use_request_slot;
use crate::utils::{format_timestamp, input_value};
use midart_core::{ApiError, Comment, NewComment, PostKind};
use tracing::{debug, warn};
use yew::prelude::*;
use yew_router::prelude::*;

#[derive(Properties, PartialEq)]
pub struct CommentThreadProps {
    pub kind: PostKind,
    pub post_id: u64,
    /// Count from the feed record, shown until the thread is loaded
    pub count: u64,
}

async fn fetch(kind: PostKind, post_id: u64) -> Result<Vec<Comment>, ApiError> {
    Ok(api()?.comments(kind, post_id).await?)
}

async fn post(kind: PostKind, post_id: u64, content: String) -> Result<Comment, ApiError> {
    Ok(api()?.add_comment(kind, post_id, &NewComment { content }).await?)
}

#[function_component(CommentThread)]
pub fn comment_thread(props: &CommentThreadProps) -> Html {
    let open = use_state(|| false);
    let comments = use_state(|| None::<Vec<Comment>>);
    let draft = use_state(String::new);
    let posting = use_state(|| false);
    let error = use_state(|| None::<String>);
    let requests = use_request_slot();

    {
        let (comments, error) = (comments.clone(), error.clone());
        use_effect_with((props.kind, props.post_id, *open), move |&(kind, post_id, open)| {
            if open {
                let ticket = requests.begin();
                wasm_bindgen_futures::spawn_local(async move {
                    let Some(result) = requests.settle(&ticket, fetch(kind, post_id)).await else {
                        return;
                    };
                    match result {
                        Ok(list) => comments.set(Some(list)),
                        Err(err) => {
                            warn!(%err, %kind, post_id, "Comments request failed");
                            error.set(err.message_or("Could not load comments."));
                            comments.set(Some(Vec::new()));
                        }
                    }
                });
            } else {
                requests.cancel();
            }
        });
    }

    let on_toggle = {
        let open = open.clone();
        Callback::from(move |_: MouseEvent| open.set(!*open))
    };
    let on_draft = {
        let draft = draft.clone();
        Callback::from(move |e: InputEvent| draft.set(input_value(&e)))
    };

    let on_submit = {
        let (kind, post_id) = (props.kind, props.post_id);
        let (comments, draft, posting, error) =
            (comments.clone(), draft.clone(), posting.clone(), error.clone());
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let content = draft.trim().to_string();
            if content.is_empty() || *posting {
                return;
            }
            let (comments, draft, posting, error) =
                (comments.clone(), draft.clone(), posting.clone(), error.clone());
            posting.set(true);
            error.set(None);
            wasm_bindgen_futures::spawn_local(async move {
                match post(kind, post_id, content).await {
                    Ok(comment) => {
                        debug!(%kind, post_id, "Comment added");
                        let mut list = (*comments).clone().unwrap_or_default();
                        list.push(comment);
                        comments.set(Some(list));
                        draft.set(String::new());
                    }
                    Err(err) => {
                        warn!(%err, %kind, post_id, "Comment failed");
                        error.set(err.message_or("Could not post the comment."));
                    }
                }
                posting.set(false);
            });
        })
    };

    let count = comments
        .as_ref()
        .map_or(props.count, |list| list.len() as u64);

    html! {
        <div class="space-y-2">
            <button class="text-sm text-gray-500 hover:text-gray-900" onclick={on_toggle}>
                {format!("Comments: {count}")}
            </button>
            if *open {
                <div class="space-y-2 pl-3 border-l border-gray-100">
                    <ErrorBanner message={(*error).clone()} />
                    {
                        match comments.as_deref() {
                            None => html! { <p class="text-xs text-gray-400">{"Loading…"}</p> },
                            Some([]) => html! { <p class="text-sm text-gray-400">{"No comments yet"}</p> },
                            Some(list) => html! {
                                <ul class="space-y-1">
                                    { for list.iter().map(|comment| html! {
                                        <li key={comment.id} class="text-sm">
                                            <Link<Route>
                                                to={Route::Profile { username: comment.author().to_string() }}
                                                classes="font-medium text-gray-900 mr-2"
                                            >
                                                {comment.author()}
                                            </Link<Route>>
                                            <span class="text-gray-700">{&comment.content}</span>
                                            <span class="ml-2 text-xs text-gray-400">
                                                {format_timestamp(comment.created_at)}
                                            </span>
                                        </li>
                                    }) }
                                </ul>
                            },
                        }
                    }
                    <form class="flex items-center gap-2" onsubmit={on_submit}>
                        <input
                            class="flex-1 px-3 py-2 text-sm rounded-xl border border-gray-200"
                            placeholder="Add a comment..."
                            value={(*draft).clone()}
                            oninput={on_draft}
                        />
                        <button
                            class="text-sm px-3 py-1.5 rounded-xl bg-gray-900 text-white"
                            type="submit"
                            disabled={*posting || draft.trim().is_empty()}
                        >
                            {"Post"}
                        </button>
                    </form>
                </div>
            }
        </div>
    }
}
