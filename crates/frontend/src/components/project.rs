//! Sections of the project page that edit one part of a project

use crate::app::Route;
use crate::client::api;
use crate::components::{ErrorBanner, ProgressBar};
use crate::hooks::use_request_slot;
use crate::utils::{checkbox_checked, format_timestamp, input_value, read_upload, selected_file};
use midart_core::{
    ApiError, BudgetItem, Funding, NewBudgetItem, ProjectPhoto, Supporter, SupportPledge, UserSummary,
};
use tracing::warn;
use yew::prelude::*;
use yew_router::prelude::*;

const BUTTON: &str = "text-sm px-3 py-1.5 rounded-xl bg-gray-900 text-white";
const INPUT: &str = "flex-1 px-3 py-2 text-sm rounded-xl border border-gray-200";

/// Run `work`, then either notify `done` or show the error
fn run<F>(
    work: F,
    busy: UseStateHandle<bool>,
    error: UseStateHandle<Option<String>>,
    fallback: &'static str,
    done: Callback<()>,
) where
    F: Future<Output = Result<(), ApiError>> + 'static,
{
    busy.set(true);
    error.set(None);
    wasm_bindgen_futures::spawn_local(async move {
        match work.await {
            Ok(()) => done.emit(()),
            Err(err) => {
                warn!(%err, "{fallback}");
                error.set(err.message_or(fallback));
            }
        }
        busy.set(false);
    });
}

// ========== Photos ==========

#[derive(Properties, PartialEq)]
pub struct PhotoGalleryProps {
    pub project_id: u64,
    pub photos: Vec<ProjectPhoto>,
    pub is_owner: bool,
    pub on_changed: Callback<()>,
}

#[function_component(PhotoGallery)]
pub fn photo_gallery(props: &PhotoGalleryProps) -> Html {
    let file = use_state(|| None::<web_sys::File>);
    let caption = use_state(String::new);
    let busy = use_state(|| false);
    let error = use_state(|| None::<String>);

    let on_file = {
        let file = file.clone();
        Callback::from(move |e: Event| file.set(selected_file(&e)))
    };
    let on_caption = {
        let caption = caption.clone();
        Callback::from(move |e: InputEvent| caption.set(input_value(&e)))
    };

    let on_upload = {
        let project_id = props.project_id;
        let (file, caption, busy, error) = (file.clone(), caption.clone(), busy.clone(), error.clone());
        let on_changed = props.on_changed.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let Some(picked) = (*file).clone() else {
                error.set(Some("Choose a photo first.".into()));
                return;
            };
            let text = (*caption).clone();
            let (file, caption) = (file.clone(), caption.clone());
            let done = on_changed.reform(move |()| {
                file.set(None);
                caption.set(String::new());
            });
            let work = async move {
                let upload = read_upload(picked).await.map_err(ApiError::Transport)?;
                api()?.upload_project_photo(project_id, &upload, &text).await?;
                Ok::<(), ApiError>(())
            };
            run(work, busy.clone(), error.clone(), "Photo upload failed.", done);
        })
    };

    let on_delete = {
        let project_id = props.project_id;
        let (busy, error) = (busy.clone(), error.clone());
        let on_changed = props.on_changed.clone();
        Callback::from(move |photo_id: u64| {
            let work = async move {
                api()?.delete_project_photo(project_id, photo_id).await?;
                Ok::<(), ApiError>(())
            };
            run(work, busy.clone(), error.clone(), "Could not delete the photo.", on_changed.clone());
        })
    };

    html! {
        <section class="space-y-3">
            <h2 class="text-sm font-semibold text-gray-900">{"Photos"}</h2>
            <ErrorBanner message={(*error).clone()} />
            if props.photos.is_empty() {
                <p class="text-sm text-gray-500">{"No photos yet."}</p>
            } else {
                <div class="grid grid-cols-2 md:grid-cols-3 gap-3">
                    { for props.photos.iter().map(|photo| {
                        let photo_id = photo.id;
                        let onclick = on_delete.reform(move |_: MouseEvent| photo_id);
                        html! {
                            <figure key={photo.id} class="space-y-1">
                                <img src={photo.image.clone()} alt={photo.caption.clone()}
                                    class="w-full aspect-square object-cover rounded-xl border border-gray-100" />
                                <figcaption class="flex items-center justify-between text-xs text-gray-600">
                                    <span>{&photo.caption}</span>
                                    if props.is_owner {
                                        <button class="text-gray-400 hover:text-red-600" disabled={*busy} {onclick}>
                                            {"Remove"}
                                        </button>
                                    }
                                </figcaption>
                            </figure>
                        }
                    }) }
                </div>
            }
            if props.is_owner {
                <form class="flex flex-wrap items-center gap-2" onsubmit={on_upload}>
                    <input type="file" accept="image/*" onchange={on_file} />
                    <input class={INPUT} placeholder="Caption" value={(*caption).clone()} oninput={on_caption} />
                    <button class={BUTTON} type="submit" disabled={*busy}>{"Upload"}</button>
                </form>
            }
        </section>
    }
}

// ========== Collaborators and manifestations ==========

#[derive(Properties, PartialEq)]
pub struct MemberListProps {
    pub project_id: u64,
    pub collaborators: Vec<UserSummary>,
    pub manifestations: Vec<String>,
    pub is_owner: bool,
    pub on_changed: Callback<()>,
}

#[derive(Clone, Copy)]
enum Member {
    Collaborator,
    Manifestation,
}

async fn change_member(project_id: u64, member: Member, name: String, add: bool) -> Result<(), ApiError> {
    let client = api()?;
    match (member, add) {
        (Member::Collaborator, true) => client.add_collaborator(project_id, &name).await?,
        (Member::Collaborator, false) => client.remove_collaborator(project_id, &name).await?,
        (Member::Manifestation, true) => client.add_manifestation(project_id, &name).await?,
        (Member::Manifestation, false) => client.remove_manifestation(project_id, &name).await?,
    }
    Ok(())
}

/// Collaborators (users) and manifestations (free-form venues or outputs)
#[function_component(MemberList)]
pub fn member_list(props: &MemberListProps) -> Html {
    let collaborator = use_state(String::new);
    let manifestation = use_state(String::new);
    let busy = use_state(|| false);
    let error = use_state(|| None::<String>);

    let change = {
        let project_id = props.project_id;
        let (busy, error) = (busy.clone(), error.clone());
        let on_changed = props.on_changed.clone();
        Callback::from(move |(member, name, add): (Member, String, bool)| {
            let name = name.trim().to_string();
            if name.is_empty() {
                return;
            }
            run(
                change_member(project_id, member, name, add),
                busy.clone(),
                error.clone(),
                "Could not update the project.",
                on_changed.clone(),
            );
        })
    };

    let input = |state: &UseStateHandle<String>| {
        let state = state.clone();
        Callback::from(move |e: InputEvent| state.set(input_value(&e)))
    };
    let submit = |state: &UseStateHandle<String>, member: Member| {
        let state = state.clone();
        let change = change.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            change.emit((member, (*state).clone(), true));
            state.set(String::new());
        })
    };
    let remove = |member: Member, name: String| {
        change.reform(move |_: MouseEvent| (member, name.clone(), false))
    };

    let owner = props.is_owner;
    html! {
        <section class="grid grid-cols-1 md:grid-cols-2 gap-6">
            <div class="space-y-2">
                <h2 class="text-sm font-semibold text-gray-900">{"Collaborators"}</h2>
                if props.collaborators.is_empty() {
                    <p class="text-sm text-gray-500">{"Solo for now."}</p>
                }
                <ul class="space-y-1">
                    { for props.collaborators.iter().map(|user| html! {
                        <li key={user.id} class="flex items-center justify-between text-sm">
                            <Link<Route> to={Route::Profile { username: user.username.clone() }}
                                classes="text-gray-900 hover:underline">
                                {format!("@{}", user.username)}
                            </Link<Route>>
                            if owner {
                                <button class="text-xs text-gray-400 hover:text-red-600" disabled={*busy}
                                    onclick={remove(Member::Collaborator, user.username.clone())}>
                                    {"Remove"}
                                </button>
                            }
                        </li>
                    }) }
                </ul>
                if owner {
                    <form class="flex gap-2" onsubmit={submit(&collaborator, Member::Collaborator)}>
                        <input class={INPUT} placeholder="Username" value={(*collaborator).clone()}
                            oninput={input(&collaborator)} />
                        <button class={BUTTON} type="submit" disabled={*busy}>{"Add"}</button>
                    </form>
                }
            </div>

            <div class="space-y-2">
                <h2 class="text-sm font-semibold text-gray-900">{"Manifestations"}</h2>
                if props.manifestations.is_empty() {
                    <p class="text-sm text-gray-500">{"None yet."}</p>
                }
                <ul class="flex flex-wrap gap-2">
                    { for props.manifestations.iter().map(|name| html! {
                        <li key={name.clone()} class="text-xs px-2 py-1 rounded-lg bg-gray-100 text-gray-700 flex items-center gap-1">
                            {name}
                            if owner {
                                <button class="text-gray-400 hover:text-red-600" disabled={*busy}
                                    onclick={remove(Member::Manifestation, name.clone())}>
                                    {"×"}
                                </button>
                            }
                        </li>
                    }) }
                </ul>
                if owner {
                    <form class="flex gap-2" onsubmit={submit(&manifestation, Member::Manifestation)}>
                        <input class={INPUT} placeholder="Exhibition, zine, performance…"
                            value={(*manifestation).clone()} oninput={input(&manifestation)} />
                        <button class={BUTTON} type="submit" disabled={*busy}>{"Add"}</button>
                    </form>
                }
            </div>

            <div class="md:col-span-2"><ErrorBanner message={(*error).clone()} /></div>
        </section>
    }
}

// ========== Funding ==========

#[derive(Properties, PartialEq)]
pub struct FundingPanelProps {
    pub project_id: u64,
    pub funding: Funding,
    /// Owners see the totals but cannot pledge
    pub can_support: bool,
    /// Owners can extend the budget breakdown
    #[prop_or_default]
    pub is_owner: bool,
}

fn parse_amount(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|v| v.is_finite() && *v > 0.0)
}

fn budget_table(items: &[BudgetItem]) -> Html {
    if items.is_empty() {
        return Html::default();
    }
    html! {
        <div class="space-y-1">
            <h3 class="text-xs font-semibold text-gray-700">{"Budget"}</h3>
            <ul class="text-sm divide-y divide-gray-100">
                { for items.iter().map(|item| html! {
                    <li key={item.id} class="flex justify-between py-1">
                        <span class="text-gray-700">
                            {&item.category}
                            if !item.description.is_empty() {
                                <span class="ml-2 text-xs text-gray-400">{&item.description}</span>
                            }
                        </span>
                        <span class="text-gray-900">{format!("{:.2}", item.amount)}</span>
                    </li>
                }) }
            </ul>
        </div>
    }
}

fn supporter_list(supporters: &[Supporter]) -> Html {
    if supporters.is_empty() {
        return Html::default();
    }
    html! {
        <div class="space-y-1">
            <h3 class="text-xs font-semibold text-gray-700">{"Recent supporters"}</h3>
            <ul class="text-sm space-y-1">
                { for supporters.iter().map(|supporter| html! {
                    <li key={supporter.id}>
                        <span class="font-medium text-gray-900">{&supporter.display_name}</span>
                        <span class="ml-2 text-gray-600">{format!("{:.2}", supporter.amount)}</span>
                        <span class="ml-2 text-xs text-gray-400">{format_timestamp(supporter.created_at)}</span>
                        if !supporter.message.is_empty() {
                            <p class="text-xs text-gray-600">{&supporter.message}</p>
                        }
                    </li>
                }) }
            </ul>
        </div>
    }
}

#[function_component(FundingPanel)]
pub fn funding_panel(props: &FundingPanelProps) -> Html {
    let funding = use_state(|| props.funding.clone());
    let amount = use_state(String::new);
    let message = use_state(String::new);
    let anonymous = use_state(|| false);
    let busy = use_state(|| false);
    let error = use_state(|| None::<String>);
    let thanks = use_state(|| false);

    let category = use_state(String::new);
    let budget_amount = use_state(String::new);
    let requests = use_request_slot();

    // The project payload only carries totals; the funding endpoint adds the
    // breakdown and supporters
    {
        let funding = funding.clone();
        use_effect_with(
            (props.project_id, props.funding.clone()),
            move |(project_id, latest)| {
                funding.set(latest.clone());
                if matches!(latest, Funding::Enabled { .. }) {
                    let project_id = *project_id;
                    let ticket = requests.begin();
                    wasm_bindgen_futures::spawn_local(async move {
                        let fetch = async { Ok::<_, ApiError>(api()?.project_funding(project_id).await?) };
                        match requests.settle(&ticket, fetch).await {
                            Some(Ok(detail)) => funding.set(detail),
                            Some(Err(err)) => warn!(%err, project_id, "Funding detail request failed"),
                            None => {}
                        }
                    });
                }
            },
        );
    }

    let on_amount = {
        let amount = amount.clone();
        Callback::from(move |e: InputEvent| amount.set(input_value(&e)))
    };
    let on_message = {
        let message = message.clone();
        Callback::from(move |e: InputEvent| message.set(input_value(&e)))
    };
    let on_anonymous = {
        let anonymous = anonymous.clone();
        Callback::from(move |e: Event| anonymous.set(checkbox_checked(&e)))
    };

    let on_support = {
        let project_id = props.project_id;
        let (funding, amount, message, anonymous, busy, error, thanks) = (
            funding.clone(),
            amount.clone(),
            message.clone(),
            anonymous.clone(),
            busy.clone(),
            error.clone(),
            thanks.clone(),
        );
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let Some(value) = parse_amount(&amount) else {
                error.set(Some("Enter an amount greater than zero.".into()));
                return;
            };
            let pledge = SupportPledge {
                amount: value,
                message: message.trim().to_string(),
                is_anonymous: *anonymous,
            };
            let refreshed = funding.clone();
            let (amount, message, thanks) = (amount.clone(), message.clone(), thanks.clone());
            let done = Callback::from(move |()| {
                amount.set(String::new());
                message.set(String::new());
                thanks.set(true);
            });
            let work = async move {
                let client = api()?;
                client.support_project(project_id, &pledge).await?;
                refreshed.set(client.project_funding(project_id).await?);
                Ok::<(), ApiError>(())
            };
            run(work, busy.clone(), error.clone(), "Could not record your support.", done);
        })
    };

    let on_category = {
        let category = category.clone();
        Callback::from(move |e: InputEvent| category.set(input_value(&e)))
    };
    let on_budget_amount = {
        let budget_amount = budget_amount.clone();
        Callback::from(move |e: InputEvent| budget_amount.set(input_value(&e)))
    };

    let on_add_item = {
        let project_id = props.project_id;
        let (funding, category, budget_amount, busy, error) = (
            funding.clone(),
            category.clone(),
            budget_amount.clone(),
            busy.clone(),
            error.clone(),
        );
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let name = category.trim().to_string();
            let Some(value) = parse_amount(&budget_amount).filter(|_| !name.is_empty()) else {
                error.set(Some("Enter a category and an amount greater than zero.".into()));
                return;
            };
            let item = NewBudgetItem {
                category: name,
                amount: value,
                description: String::new(),
            };
            let refreshed = funding.clone();
            let (category, budget_amount) = (category.clone(), budget_amount.clone());
            let done = Callback::from(move |()| {
                category.set(String::new());
                budget_amount.set(String::new());
            });
            let work = async move {
                let client = api()?;
                client.add_budget_item(project_id, &item).await?;
                refreshed.set(client.project_funding(project_id).await?);
                Ok::<(), ApiError>(())
            };
            run(work, busy.clone(), error.clone(), "Could not add the budget item.", done);
        })
    };

    let Funding::Enabled {
        goal,
        raised,
        percentage,
        is_funded,
        supporter_count,
        budget_items,
        recent_supporters,
    } = (*funding).clone()
    else {
        return Html::default();
    };

    let summary = match supporter_count {
        Some(count) => format!("{raised:.2} of {goal:.2} raised · {count} supporters"),
        None => format!("{raised:.2} of {goal:.2} raised"),
    };

    html! {
        <section class="rounded-2xl border border-gray-100 p-5 space-y-3">
            <h2 class="text-sm font-semibold text-gray-900">{"Funding"}</h2>
            <ProgressBar percent={percentage} label={AttrValue::from(summary)} />
            if is_funded {
                <p class="text-xs text-green-700">{"Fully funded"}</p>
            }
            if *thanks {
                <p class="text-xs text-gray-600">{"Thank you for your support."}</p>
            }
            {budget_table(&budget_items)}
            {supporter_list(&recent_supporters)}
            <ErrorBanner message={(*error).clone()} />
            if props.is_owner {
                <form class="flex gap-2" onsubmit={on_add_item}>
                    <input class={INPUT} placeholder="Budget category" value={(*category).clone()}
                        oninput={on_category} />
                    <input class="w-28 px-3 py-2 text-sm rounded-xl border border-gray-200" type="number"
                        min="0.01" step="0.01" placeholder="Amount" value={(*budget_amount).clone()}
                        oninput={on_budget_amount} />
                    <button class={BUTTON} type="submit" disabled={*busy}>{"Add"}</button>
                </form>
            }
            if props.can_support {
                <form class="space-y-2" onsubmit={on_support}>
                    <div class="flex gap-2">
                        <input class={INPUT} type="number" min="1" step="0.01" placeholder="Amount"
                            value={(*amount).clone()} oninput={on_amount} />
                        <button class={BUTTON} type="submit" disabled={*busy}>{"Support"}</button>
                    </div>
                    <input class="w-full px-3 py-2 text-sm rounded-xl border border-gray-200"
                        placeholder="Message (optional)" value={(*message).clone()} oninput={on_message} />
                    <label class="flex items-center gap-2 text-xs text-gray-600">
                        <input type="checkbox" checked={*anonymous} onchange={on_anonymous} />
                        {"Support anonymously"}
                    </label>
                </form>
            }
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amounts_must_be_positive_numbers() {
        assert_eq!(parse_amount(" 12.50 "), Some(12.5));
        assert_eq!(parse_amount("0"), None);
        assert_eq!(parse_amount("-3"), None);
        assert_eq!(parse_amount("NaN"), None);
        assert_eq!(parse_amount("lots"), None);
    }
}
