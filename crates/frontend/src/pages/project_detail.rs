use crate::app::Route;
use crate::auth::use_session;
use crate::client::api;
use crate::components::{
    ErrorBanner, FundingPanel, LoadingSpinner, MemberList, MonthCalendar, PhotoGallery, ProgressBar,
};
use crate::hooks::use_request_slot;
use crate::utils::{format_date, select_value, today};
use midart_core::progress::days_remaining;
use midart_core::{ApiError, ProjectDetail, ProjectPatch, ProjectStatus};
use tracing::{debug, warn};
use yew::prelude::*;
use yew_router::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ProjectDetailPageProps {
    pub id: u64,
}

async fn load(id: u64) -> Result<ProjectDetail, ApiError> {
    Ok(api()?.project(id).await?)
}

fn schedule_text(project: &ProjectDetail) -> Option<String> {
    let dates = match (project.start_date, project.end_date) {
        (Some(start), Some(end)) => format!("{} – {}", format_date(start), format_date(end)),
        (Some(start), None) => format!("Started {}", format_date(start)),
        (None, Some(end)) => format!("Due {}", format_date(end)),
        (None, None) => return None,
    };
    let remaining = project
        .days_remaining
        .or_else(|| days_remaining(project.end_date, today()));
    Some(match remaining {
        Some(days) if days < 0 => format!("{dates} · {} days overdue", -days),
        Some(0) => format!("{dates} · due today"),
        Some(days) => format!("{dates} · {days} days left"),
        None => dates,
    })
}

#[function_component(ProjectDetailPage)]
pub fn project_detail_page(props: &ProjectDetailPageProps) -> Html {
    let session = use_session();
    let navigator = use_navigator();
    let project = use_state(|| None::<ProjectDetail>);
    let error = use_state(|| None::<String>);
    let action_error = use_state(|| None::<String>);
    let busy = use_state(|| false);
    // Bumped by sections that changed the project
    let version = use_state(|| 0_u32);

    let requests = use_request_slot();

    {
        let project = project.clone();
        let error = error.clone();
        use_effect_with((props.id, *version), move |&(id, _)| {
            let ticket = requests.begin();
            wasm_bindgen_futures::spawn_local(async move {
                let Some(result) = requests.settle(&ticket, load(id)).await else {
                    return;
                };
                match result {
                    Ok(loaded) => {
                        project.set(Some(loaded));
                        error.set(None);
                    }
                    Err(err) => {
                        warn!(%err, id, "Project request failed");
                        error.set(err.message_or("Project not found."));
                    }
                }
            });
        });
    }

    let on_changed = {
        let version = version.clone();
        Callback::from(move |()| version.set(*version + 1))
    };

    let on_status = {
        let id = props.id;
        let (busy, action_error, on_changed) = (busy.clone(), action_error.clone(), on_changed.clone());
        Callback::from(move |e: Event| {
            let patch = ProjectPatch {
                status: Some(ProjectStatus::from(select_value(&e))),
                ..ProjectPatch::default()
            };
            let (busy, action_error, on_changed) = (busy.clone(), action_error.clone(), on_changed.clone());
            busy.set(true);
            wasm_bindgen_futures::spawn_local(async move {
                let result = async { Ok::<_, ApiError>(api()?.update_project(id, &patch).await?) }.await;
                match result {
                    Ok(()) => {
                        action_error.set(None);
                        on_changed.emit(());
                    }
                    Err(err) => {
                        warn!(%err, id, "Status update failed");
                        action_error.set(err.message_or("Could not change the status."));
                    }
                }
                busy.set(false);
            });
        })
    };

    let on_delete = {
        let id = props.id;
        let username = session.session.username().map(str::to_string);
        let (busy, action_error) = (busy.clone(), action_error.clone());
        Callback::from(move |_: MouseEvent| {
            let confirmed = web_sys::window()
                .and_then(|window| window.confirm_with_message("Delete this project?").ok())
                .unwrap_or(false);
            if !confirmed {
                return;
            }
            let (busy, action_error, navigator, username) =
                (busy.clone(), action_error.clone(), navigator.clone(), username.clone());
            busy.set(true);
            wasm_bindgen_futures::spawn_local(async move {
                let result = async { Ok::<_, ApiError>(api()?.delete_project(id).await?) }.await;
                match result {
                    Ok(()) => {
                        debug!(id, "Project deleted");
                        if let Some(navigator) = navigator {
                            match username {
                                Some(username) => navigator.push(&Route::Profile { username }),
                                None => navigator.push(&Route::Feed),
                            }
                        }
                    }
                    Err(err) => {
                        warn!(%err, id, "Delete failed");
                        action_error.set(err.message_or("Could not delete the project."));
                        busy.set(false);
                    }
                }
            });
        })
    };

    let Some(project) = (*project).clone() else {
        return match (*error).clone() {
            Some(message) => html! { <ErrorBanner message={Some(message)} /> },
            None => html! { <LoadingSpinner /> },
        };
    };

    let is_owner = project.is_owned_by(session.session.user.as_ref());
    let progress = project.effective_progress(today());

    let status = if is_owner {
        html! {
            <select class="text-sm px-2 py-1 rounded-lg border border-gray-200"
                disabled={*busy} onchange={on_status}>
                { for ProjectStatus::ALL.iter().map(|status| html! {
                    <option value={status.as_str().to_string()} selected={*status == project.status}>
                        {status.label()}
                    </option>
                }) }
            </select>
        }
    } else {
        html! { <span>{project.status.label()}</span> }
    };

    html! {
        <div class="space-y-6">
            <div class="flex items-start justify-between gap-4">
                <div class="space-y-1">
                    <h1 class="text-xl font-semibold text-gray-900">{&project.title}</h1>
                    <div class="flex flex-wrap items-center gap-2 text-sm text-gray-600">
                        <Link<Route> to={Route::Profile { username: project.creator.username.clone() }}
                            classes="hover:underline">
                            {format!("by @{}", project.creator.username)}
                        </Link<Route>>
                        <span>{"·"}</span>
                        {status}
                        <span>{"·"}</span>
                        <span>{project.project_type.label()}</span>
                        <span>{"·"}</span>
                        <span>{project.budget_type.label()}</span>
                    </div>
                    if let Some(schedule) = schedule_text(&project) {
                        <div class="text-xs text-gray-500">{schedule}</div>
                    }
                </div>
                <div class="flex gap-2">
                    <Link<Route> to={Route::Feed}
                        classes="text-sm px-3 py-1.5 rounded-xl border border-gray-200">
                        {"Back"}
                    </Link<Route>>
                    if is_owner {
                        <button class="text-sm px-3 py-1.5 rounded-xl border border-red-200 text-red-600"
                            disabled={*busy} onclick={on_delete}>
                            {"Delete"}
                        </button>
                    }
                </div>
            </div>

            <ErrorBanner message={(*action_error).clone()} />

            if let Some(percent) = progress {
                <ProgressBar percent={percent} label={AttrValue::from("Timeline")} />
            }

            if let Some(cover) = &project.cover_photo {
                <div class="rounded-2xl overflow-hidden border border-gray-100">
                    <img src={cover.clone()} alt="Cover" class="w-full object-cover" />
                </div>
            }

            <div class="rounded-2xl border border-gray-100 p-5 text-sm text-gray-800 whitespace-pre-wrap">
                {&project.description}
            </div>

            <FundingPanel
                project_id={project.id}
                funding={project.funding.clone()}
                can_support={!is_owner}
                is_owner={is_owner}
            />

            <MemberList
                project_id={project.id}
                collaborators={project.collaborators.clone()}
                manifestations={project.manifestations.clone()}
                is_owner={is_owner}
                on_changed={on_changed.clone()}
            />

            <PhotoGallery
                project_id={project.id}
                photos={project.photos.clone()}
                is_owner={is_owner}
                on_changed={on_changed}
            />

            <section class="space-y-2">
                <h2 class="text-sm font-semibold text-gray-900">{"Calendar"}</h2>
                <MonthCalendar
                    project_id={project.id}
                    is_owner={is_owner}
                    start_date={project.start_date}
                    end_date={project.end_date}
                />
            </section>
        </div>
    }
}
