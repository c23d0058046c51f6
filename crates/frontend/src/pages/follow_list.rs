use crate::app::Route;
use crate::client::api;
use crate::components::{ErrorBanner, LoadingSpinner};
use crate::hooks::use_request_slot;
use midart_core::{ApiError, UserSummary};
use tracing::warn;
use yew::prelude::*;
use yew_router::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FollowKind {
    Followers,
    Following,
}

impl FollowKind {
    const fn title(self) -> &'static str {
        match self {
            Self::Followers => "Followers",
            Self::Following => "Following",
        }
    }

    const fn empty_text(self) -> &'static str {
        match self {
            Self::Followers => "No followers yet.",
            Self::Following => "Not following anyone yet.",
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct FollowListPageProps {
    pub username: String,
    pub kind: FollowKind,
}

async fn load(username: &str, kind: FollowKind) -> Result<Vec<UserSummary>, ApiError> {
    let client = api()?;
    Ok(match kind {
        FollowKind::Followers => client.followers(username).await?,
        FollowKind::Following => client.following(username).await?,
    })
}

#[function_component(FollowListPage)]
pub fn follow_list_page(props: &FollowListPageProps) -> Html {
    let users = use_state(|| None::<Vec<UserSummary>>);
    let error = use_state(|| None::<String>);

    let requests = use_request_slot();

    {
        let users = users.clone();
        let error = error.clone();
        use_effect_with((props.username.clone(), props.kind), move |(username, kind)| {
            let (username, kind) = (username.clone(), *kind);
            users.set(None);
            error.set(None);
            let ticket = requests.begin();
            wasm_bindgen_futures::spawn_local(async move {
                let Some(result) = requests.settle(&ticket, load(&username, kind)).await else {
                    return;
                };
                match result {
                    Ok(list) => users.set(Some(list)),
                    Err(err) => {
                        warn!(%err, %username, ?kind, "Follow list request failed");
                        error.set(err.message_or("Could not load the list."));
                        users.set(Some(Vec::new()));
                    }
                }
            });
        });
    }

    let body = match users.as_deref() {
        None => html! { <LoadingSpinner /> },
        Some([]) if error.is_none() => html! {
            <div class="rounded-2xl border border-gray-100 p-5 text-sm text-gray-700">
                {props.kind.empty_text()}
            </div>
        },
        Some(list) => html! {
            <ul class="divide-y divide-gray-100 rounded-2xl border border-gray-100">
                { for list.iter().map(|user| html! {
                    <li key={user.id} class="p-4 flex items-center justify-between">
                        <Link<Route> to={Route::Profile { username: user.username.clone() }}
                            classes="text-sm font-medium text-gray-900 hover:underline">
                            {format!("@{}", user.username)}
                        </Link<Route>>
                        <span class="text-xs text-gray-500">{user.display_name()}</span>
                    </li>
                }) }
            </ul>
        },
    };

    html! {
        <div class="space-y-4">
            <div>
                <Link<Route> to={Route::Profile { username: props.username.clone() }}
                    classes="text-sm text-gray-500 hover:underline">
                    {format!("← @{}", props.username)}
                </Link<Route>>
                <h1 class="text-xl font-semibold text-gray-900 mt-1">{props.kind.title()}</h1>
            </div>
            <ErrorBanner message={(*error).clone()} />
            {body}
        </div>
    }
}
