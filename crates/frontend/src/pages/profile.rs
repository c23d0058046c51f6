use crate::app::Route;
use crate::auth::use_session;
use crate::client::api;
use crate::components::{ErrorBanner, FeedItemCard, LoadingSpinner};
use crate::hooks::use_request_slot;
use midart_core::{ApiError, FeedApi, FeedItem, Profile, ProjectSummary};
use tracing::warn;
use yew::prelude::*;
use yew_router::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Tab {
    Posts,
    Projects,
}

#[derive(Clone, PartialEq)]
enum TabContent {
    Loading,
    Posts(Vec<FeedItem>),
    Projects(Vec<ProjectSummary>),
    Failed(Option<String>),
}

#[derive(Properties, PartialEq)]
pub struct ProfilePageProps {
    pub username: String,
}

async fn load_profile(username: &str) -> Result<Profile, ApiError> {
    Ok(api()?.profile(username).await?)
}

async fn load_tab(username: &str, tab: Tab) -> Result<TabContent, ApiError> {
    let client = api()?;
    Ok(match tab {
        Tab::Posts => TabContent::Posts(client.user_posts(username).await?),
        Tab::Projects => TabContent::Projects(client.user_projects(username).await?),
    })
}

async fn set_following(username: &str, follow: bool) -> Result<(), ApiError> {
    let client = api()?;
    if follow {
        client.follow(username).await?;
    } else {
        client.unfollow(username).await?;
    }
    Ok(())
}

#[function_component(ProfilePage)]
pub fn profile_page(props: &ProfilePageProps) -> Html {
    let session = use_session();
    let profile = use_state(|| None::<Profile>);
    let error = use_state(|| None::<String>);
    let tab = use_state(|| Tab::Posts);
    let content = use_state(|| TabContent::Loading);
    let follow_busy = use_state(|| false);
    let action_error = use_state(|| None::<String>);
    // Bumped to refetch after a follow toggle or a like
    let profile_version = use_state(|| 0_u32);
    let tab_version = use_state(|| 0_u32);

    let profile_requests = use_request_slot();
    let tab_requests = use_request_slot();

    {
        let profile = profile.clone();
        let error = error.clone();
        use_effect_with(
            (props.username.clone(), *profile_version),
            move |(username, _)| {
                let username = username.clone();
                let ticket = profile_requests.begin();
                wasm_bindgen_futures::spawn_local(async move {
                    let Some(result) = profile_requests.settle(&ticket, load_profile(&username)).await
                    else {
                        return;
                    };
                    match result {
                        Ok(loaded) => {
                            profile.set(Some(loaded));
                            error.set(None);
                        }
                        Err(err) => {
                            warn!(%err, %username, "Profile request failed");
                            profile.set(None);
                            error.set(err.message_or("User not found"));
                        }
                    }
                });
            },
        );
    }

    {
        let content = content.clone();
        use_effect_with(
            (props.username.clone(), *tab, *tab_version),
            move |(username, tab, _)| {
                let (username, tab) = (username.clone(), *tab);
                content.set(TabContent::Loading);
                let ticket = tab_requests.begin();
                wasm_bindgen_futures::spawn_local(async move {
                    let Some(result) = tab_requests.settle(&ticket, load_tab(&username, tab)).await
                    else {
                        return;
                    };
                    match result {
                        Ok(loaded) => content.set(loaded),
                        Err(err) => {
                            warn!(%err, %username, ?tab, "Profile tab request failed");
                            content.set(TabContent::Failed(err.display_message()));
                        }
                    }
                });
            },
        );
    }

    let on_follow = {
        let username = props.username.clone();
        let profile = profile.clone();
        let follow_busy = follow_busy.clone();
        let action_error = action_error.clone();
        let profile_version = profile_version.clone();
        Callback::from(move |_: MouseEvent| {
            let Some(current) = profile.as_ref() else {
                return;
            };
            if *follow_busy {
                return;
            }
            let follow = !current.is_following;
            let username = username.clone();
            let follow_busy = follow_busy.clone();
            let action_error = action_error.clone();
            let profile_version = profile_version.clone();
            follow_busy.set(true);
            action_error.set(None);
            wasm_bindgen_futures::spawn_local(async move {
                match set_following(&username, follow).await {
                    Ok(()) => profile_version.set(*profile_version + 1),
                    Err(err) => {
                        warn!(%err, %username, follow, "Follow toggle failed");
                        action_error.set(err.message_or("Follow action failed. Please try again."));
                    }
                }
                follow_busy.set(false);
            });
        })
    };

    let on_like = {
        let action_error = action_error.clone();
        let tab_version = tab_version.clone();
        Callback::from(move |item: FeedItem| {
            let action_error = action_error.clone();
            let tab_version = tab_version.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let result = async { api()?.toggle_like(&item).await }.await;
                match result {
                    Ok(_) => tab_version.set(*tab_version + 1),
                    Err(err) => {
                        warn!(%err, key = %item.key(), "Like failed");
                        action_error.set(err.message_or("Like failed."));
                    }
                }
            });
        })
    };

    let select_tab = |next: Tab| {
        let tab = tab.clone();
        Callback::from(move |_: MouseEvent| tab.set(next))
    };

    let Some(profile) = (*profile).clone() else {
        return match (*error).clone() {
            Some(message) => html! { <ErrorBanner message={Some(message)} /> },
            None => html! { <LoadingSpinner /> },
        };
    };

    let is_you = session.session.username() == Some(props.username.as_str());
    let username = props.username.clone();

    let avatar = profile.profile_image.as_ref().map_or_else(
        || html! { <div class="text-xs text-gray-400">{"No photo"}</div> },
        |url| html! { <img src={url.clone()} alt="Profile" class="w-full h-full object-cover" /> },
    );

    let actions = if is_you {
        html! {
            <>
                <Link<Route> to={Route::EditProfile { username: username.clone() }}
                    classes="text-sm px-3 py-1.5 rounded-xl border border-gray-200">
                    {"Edit"}
                </Link<Route>>
                <Link<Route> to={Route::CreateProject}
                    classes="text-sm px-3 py-1.5 rounded-xl bg-gray-900 text-white">
                    {"Create project"}
                </Link<Route>>
            </>
        }
    } else {
        let label = match (*follow_busy, profile.is_following) {
            (true, _) => "Working…",
            (false, true) => "Unfollow",
            (false, false) => "Follow",
        };
        html! {
            <button
                class={if profile.is_following {
                    "text-sm px-3 py-1.5 rounded-xl border border-gray-200"
                } else {
                    "text-sm px-3 py-1.5 rounded-xl bg-gray-900 text-white"
                }}
                disabled={*follow_busy}
                onclick={on_follow}
            >
                {label}
            </button>
        }
    };

    let tab_class = |active: bool| {
        if active {
            "text-sm px-3 py-1.5 rounded-xl bg-gray-900 text-white"
        } else {
            "text-sm px-3 py-1.5 rounded-xl border border-gray-200 text-gray-700"
        }
    };

    let body = match &*content {
        TabContent::Loading => html! { <LoadingSpinner /> },
        TabContent::Failed(message) => html! { <ErrorBanner message={message.clone()} /> },
        TabContent::Posts(posts) if posts.is_empty() => empty("No posts yet."),
        TabContent::Projects(projects) if projects.is_empty() => empty("No projects yet."),
        TabContent::Posts(posts) => html! {
            <div class="space-y-3">
                { for posts.iter().map(|item| html! {
                    <FeedItemCard key={item.key()} item={item.clone()} on_like={on_like.clone()} />
                }) }
            </div>
        },
        TabContent::Projects(projects) => html! {
            <div class="space-y-3">
                { for projects.iter().map(project_card) }
            </div>
        },
    };

    html! {
        <div class="space-y-6">
            <div class="flex items-start justify-between gap-4">
                <div class="flex items-start gap-4">
                    <div class="w-14 h-14 rounded-2xl overflow-hidden border border-gray-100 bg-gray-50 flex items-center justify-center">
                        {avatar}
                    </div>
                    <div class="space-y-1">
                        <h1 class="text-xl font-semibold text-gray-900">
                            {format!("@{}", profile.username)}
                            if is_you { {" (you)"} }
                        </h1>
                        <div class="text-xs text-gray-500">{profile.user_type.label()}</div>
                        if !profile.bio.is_empty() {
                            <p class="text-sm text-gray-600">{&profile.bio}</p>
                        }
                        <div class="flex gap-4 pt-2">
                            <Link<Route> to={Route::Followers { username: username.clone() }}
                                classes="text-sm text-gray-700 hover:underline">
                                <span class="font-medium">{profile.follower_count}</span>{" followers"}
                            </Link<Route>>
                            <Link<Route> to={Route::Following { username: username.clone() }}
                                classes="text-sm text-gray-700 hover:underline">
                                <span class="font-medium">{profile.following_count}</span>{" following"}
                            </Link<Route>>
                        </div>
                    </div>
                </div>
                <div class="flex gap-2">{actions}</div>
            </div>

            <ErrorBanner message={(*action_error).clone()} />

            <div class="flex items-center gap-2">
                <button type="button" class={tab_class(*tab == Tab::Posts)} onclick={select_tab(Tab::Posts)}>
                    {"Posts"}
                </button>
                <button type="button" class={tab_class(*tab == Tab::Projects)} onclick={select_tab(Tab::Projects)}>
                    {"Projects"}
                </button>
            </div>

            {body}
        </div>
    }
}

fn empty(text: &'static str) -> Html {
    html! {
        <div class="rounded-2xl border border-gray-100 p-5 text-sm text-gray-700">{text}</div>
    }
}

fn project_card(project: &ProjectSummary) -> Html {
    let mut meta = format!("{} · {}", project.status.label(), project.project_type.label());
    if let Some(percent) = project.progress_percent {
        meta.push_str(&format!(" · {percent}%"));
    }
    html! {
        <Link<Route> key={project.id} to={Route::Project { id: project.id }} classes="block">
            <div class="rounded-2xl border border-gray-100 p-4 hover:bg-gray-50">
                <div class="text-sm font-medium text-gray-900">{&project.title}</div>
                <div class="text-xs text-gray-500 mt-1">{meta}</div>
                <div class="text-sm text-gray-700 mt-2 line-clamp-2">{&project.description}</div>
            </div>
        </Link<Route>>
    }
}
