use crate::app::Route;
use crate::components::CommentThread;
use crate::utils::format_timestamp;
use midart_core::{FeedItem, PostBody};
use yew::prelude::*;
use yew_router::prelude::*;

#[derive(Properties, PartialEq)]
pub struct FeedItemCardProps {
    pub item: FeedItem,
    pub on_like: Callback<FeedItem>,
    /// Shown only for the viewer's own posts
    #[prop_or_default]
    pub on_delete: Option<Callback<FeedItem>>,
    #[prop_or_default]
    pub busy: bool,
}

/// One image or verbalise post
#[function_component(FeedItemCard)]
pub fn feed_item_card(props: &FeedItemCardProps) -> Html {
    let item = &props.item;

    let on_like = {
        let item = item.clone();
        props.on_like.reform(move |_: MouseEvent| item.clone())
    };
    let delete_button = props.on_delete.as_ref().map(|on_delete| {
        let item = item.clone();
        let onclick = on_delete.reform(move |_: MouseEvent| item.clone());
        html! {
            <button
                class="ml-auto text-xs text-gray-500 hover:text-red-600"
                disabled={props.busy}
                {onclick}
            >
                {"Delete"}
            </button>
        }
    });

    let avatar = item.author.profile_image.as_ref().map_or_else(
        || html! { <div class="text-[10px] text-gray-400">{"No"}</div> },
        |url| html! { <img src={url.clone()} alt="Profile" class="w-full h-full object-cover" /> },
    );

    let body = match &item.body {
        PostBody::Image { image, caption } => html! {
            <div class="space-y-3">
                <div class="rounded-xl overflow-hidden border border-gray-100 bg-gray-50">
                    <img src={image.clone()} alt="Post" class="w-full object-cover" />
                </div>
                if !caption.is_empty() {
                    <div class="text-sm text-gray-700">{caption}</div>
                }
            </div>
        },
        PostBody::Verbalise { content } => html! {
            <div class="text-base text-gray-900 whitespace-pre-wrap">{content}</div>
        },
    };

    let like_class = if item.is_liked {
        "text-sm px-3 py-1.5 rounded-xl border border-gray-200 text-gray-900"
    } else {
        "text-sm px-3 py-1.5 rounded-xl bg-gray-900 text-white"
    };

    html! {
        <div class="rounded-2xl border border-gray-100 p-5 space-y-3">
            <div class="flex items-center gap-3">
                <div class="w-9 h-9 rounded-xl overflow-hidden border border-gray-100 bg-gray-50 flex items-center justify-center">
                    {avatar}
                </div>
                <Link<Route>
                    to={Route::Profile { username: item.author.username.clone() }}
                    classes="text-sm font-medium text-gray-900"
                >
                    {format!("@{}", item.author.username)}
                </Link<Route>>
                <div class="ml-auto text-xs text-gray-500">
                    {format_timestamp(item.created_at)}
                </div>
            </div>
            {body}
            <div class="flex items-center gap-2">
                <button class={like_class} disabled={props.busy} onclick={on_like}>
                    {format!(
                        "{} · {}",
                        if item.is_liked { "Liked" } else { "Like" },
                        item.like_count
                    )}
                </button>
                {delete_button}
            </div>
            <CommentThread kind={item.kind()} post_id={item.id} count={item.comment_count} />
        </div>
    }
}
