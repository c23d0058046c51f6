//! Header search over users and projects

use crate::app::Route;
use crate::client::api;
use crate::hooks::use_request_slot;
use crate::utils::input_value;
use midart_core::{ApiError, SEARCH_MIN_CHARS, SearchResults};
use tracing::warn;
use yew::prelude::*;
use yew_router::prelude::*;

async fn lookup(query: String) -> Result<SearchResults, ApiError> {
    Ok(api()?.search(&query).await?)
}

#[function_component(SearchBox)]
pub fn search_box() -> Html {
    let query = use_state(String::new);
    let results = use_state(|| None::<SearchResults>);
    let requests = use_request_slot();

    let on_input = {
        let (query, results) = (query.clone(), results.clone());
        let requests = requests.clone();
        Callback::from(move |e: InputEvent| {
            let value = input_value(&e);
            if value.trim().chars().count() < SEARCH_MIN_CHARS {
                requests.cancel();
                results.set(None);
            }
            query.set(value);
        })
    };

    let on_submit = {
        let (query, results) = (query.clone(), results.clone());
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let text = (*query).clone();
            let results = results.clone();
            let requests = requests.clone();
            let ticket = requests.begin();
            wasm_bindgen_futures::spawn_local(async move {
                let Some(result) = requests.settle(&ticket, lookup(text)).await else {
                    return;
                };
                match result {
                    Ok(found) => results.set(Some(found)),
                    Err(err) => {
                        warn!(%err, "Search failed");
                        results.set(Some(SearchResults::default()));
                    }
                }
            });
        })
    };

    let on_pick = {
        let (query, results) = (query.clone(), results.clone());
        Callback::from(move |_: MouseEvent| {
            query.set(String::new());
            results.set(None);
        })
    };

    let row = "block px-3 py-2 text-sm text-gray-700 hover:bg-gray-50";
    let dropdown = results.as_ref().map(|found| {
        let body = if found.is_empty() {
            html! { <p class="px-3 py-2 text-sm text-gray-400">{"Nothing found"}</p> }
        } else {
            html! {
                <>
                    { for found.users.iter().map(|user| html! {
                        <div key={format!("user-{}", user.id)} onclick={on_pick.clone()}>
                            <Link<Route> to={Route::Profile { username: user.username.clone() }} classes={row}>
                                {format!("@{}", user.username)}
                                <span class="ml-2 text-xs text-gray-400">{user.display_name()}</span>
                            </Link<Route>>
                        </div>
                    }) }
                    { for found.projects.iter().map(|project| html! {
                        <div key={format!("project-{}", project.id)} onclick={on_pick.clone()}>
                            <Link<Route> to={Route::Project { id: project.id }} classes={row}>
                                {&project.title}
                                <span class="ml-2 text-xs text-gray-400">{format!("by @{}", project.creator.username)}</span>
                            </Link<Route>>
                        </div>
                    }) }
                </>
            }
        };
        html! {
            <div class="absolute right-0 mt-1 w-64 rounded-xl border border-gray-100 bg-white shadow-sm z-10">
                {body}
            </div>
        }
    });

    html! {
        <form class="relative" onsubmit={on_submit}>
            <input
                class="w-40 px-3 py-1.5 text-sm rounded-xl border border-gray-200"
                type="search"
                placeholder="Search"
                value={(*query).clone()}
                oninput={on_input}
            />
            {dropdown}
        </form>
    }
}
