use crate::app::Route;
use crate::client::api;
use crate::components::ErrorBanner;
use crate::utils::{input_value, parse_date, read_upload, select_value, selected_file, textarea_value};
use midart_core::{
    ApiError, BudgetType, CreatedProject, NewProject, ProjectStatus, ProjectType,
};
use tracing::{debug, warn};
use yew::prelude::*;
use yew_router::prelude::*;

/// Checks the form before anything is sent
fn validate(project: &NewProject) -> Result<(), String> {
    if project.title.trim().is_empty() {
        return Err("Give the project a title.".into());
    }
    if project.description.trim().is_empty() {
        return Err("Describe the project.".into());
    }
    if let (Some(start), Some(end)) = (project.start_date, project.end_date)
        && end < start
    {
        return Err("The end date cannot be before the start date.".into());
    }
    if project.funding_goal.is_some_and(|goal| !goal.is_finite() || goal <= 0.0) {
        return Err("The funding goal must be a positive amount.".into());
    }
    Ok(())
}

/// Empty input means no goal; anything else must parse
fn parse_goal(value: &str) -> Result<Option<f64>, String> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    value
        .parse::<f64>()
        .map(Some)
        .map_err(|_| "The funding goal must be a number.".to_string())
}

async fn create(mut project: NewProject, cover: Option<web_sys::File>) -> Result<CreatedProject, ApiError> {
    if let Some(file) = cover {
        project.cover_photo = Some(read_upload(file).await.map_err(ApiError::Transport)?);
    }
    Ok(api()?.create_project(&project).await?)
}

fn options<'a>(items: impl Iterator<Item = (&'a str, &'a str)>, current: &str) -> Html {
    items
        .map(|(value, label)| {
            html! { <option value={value.to_string()} selected={value == current}>{label.to_string()}</option> }
        })
        .collect()
}

#[function_component(CreateProjectPage)]
pub fn create_project_page() -> Html {
    let navigator = use_navigator();
    let form = use_state(NewProject::default);
    let start = use_state(String::new);
    let end = use_state(String::new);
    let goal = use_state(String::new);
    let cover = use_state(|| None::<web_sys::File>);
    let busy = use_state(|| false);
    let error = use_state(|| None::<String>);

    let update = |apply: fn(&mut NewProject, String)| {
        let form = form.clone();
        move |value: String| {
            let mut next = (*form).clone();
            apply(&mut next, value);
            form.set(next);
        }
    };
    let on_title = {
        let set = update(|form, value| form.title = value);
        Callback::from(move |e: InputEvent| set(input_value(&e)))
    };
    let on_description = {
        let set = update(|form, value| form.description = value);
        Callback::from(move |e: InputEvent| set(textarea_value(&e)))
    };
    let on_type = {
        let set = update(|form, value| form.project_type = ProjectType::from(value));
        Callback::from(move |e: Event| set(select_value(&e)))
    };
    let on_status = {
        let set = update(|form, value| form.status = ProjectStatus::from(value));
        Callback::from(move |e: Event| set(select_value(&e)))
    };
    let on_budget = {
        let set = update(|form, value| form.budget_type = BudgetType::from(value));
        Callback::from(move |e: Event| set(select_value(&e)))
    };
    let text = |state: &UseStateHandle<String>| {
        let state = state.clone();
        Callback::from(move |e: InputEvent| state.set(input_value(&e)))
    };
    let (on_start, on_end, on_goal) = (text(&start), text(&end), text(&goal));
    let on_cover = {
        let cover = cover.clone();
        Callback::from(move |e: Event| cover.set(selected_file(&e)))
    };

    let on_submit = {
        let (form, start, end, goal, cover, busy, error) = (
            form.clone(),
            start.clone(),
            end.clone(),
            goal.clone(),
            cover.clone(),
            busy.clone(),
            error.clone(),
        );
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *busy {
                return;
            }

            let funding_goal = match parse_goal(&goal) {
                Ok(goal) => goal,
                Err(message) => {
                    error.set(Some(message));
                    return;
                }
            };
            let project = NewProject {
                start_date: parse_date(&start),
                end_date: parse_date(&end),
                funding_goal,
                ..(*form).clone()
            };
            if let Err(message) = validate(&project) {
                error.set(Some(message));
                return;
            }

            let cover = (*cover).clone();
            let navigator = navigator.clone();
            let busy = busy.clone();
            let error = error.clone();
            busy.set(true);
            error.set(None);
            wasm_bindgen_futures::spawn_local(async move {
                match create(project, cover).await {
                    Ok(created) => {
                        debug!(id = created.id, title = %created.title, "Project created");
                        if let Some(navigator) = navigator {
                            navigator.push(&Route::Project { id: created.id });
                        }
                    }
                    Err(err) => {
                        warn!(%err, "Creating project failed");
                        error.set(err.message_or("Create project failed."));
                    }
                }
                busy.set(false);
            });
        })
    };

    let input_class = "w-full px-4 py-3 text-sm rounded-xl border border-gray-200";
    let select_class = "w-full px-3 py-2 text-sm rounded-xl border border-gray-200";

    html! {
        <div class="max-w-2xl space-y-6">
            <div>
                <h1 class="text-xl font-semibold text-gray-900">{"Create project"}</h1>
                <p class="text-sm text-gray-600 mt-1">{"Process-first. You can refine later."}</p>
            </div>

            <ErrorBanner message={(*error).clone()} />

            <form class="rounded-2xl border border-gray-100 p-6 space-y-4" onsubmit={on_submit}>
                <div class="space-y-2">
                    <label class="text-sm font-medium">{"Title"}</label>
                    <input class={input_class} placeholder="Project title"
                        value={form.title.clone()} oninput={on_title} />
                </div>
                <div class="space-y-2">
                    <label class="text-sm font-medium">{"Description"}</label>
                    <textarea class={input_class} rows="5" placeholder="Describe the project…"
                        value={form.description.clone()} oninput={on_description} />
                </div>

                <div class="grid grid-cols-1 md:grid-cols-3 gap-3">
                    <div class="space-y-2">
                        <label class="text-sm font-medium">{"Type"}</label>
                        <select class={select_class} onchange={on_type}>
                            { options(ProjectType::ALL.iter().map(|v| (v.as_str(), v.label())), form.project_type.as_str()) }
                        </select>
                    </div>
                    <div class="space-y-2">
                        <label class="text-sm font-medium">{"Status"}</label>
                        <select class={select_class} onchange={on_status}>
                            { options(ProjectStatus::ALL.iter().map(|v| (v.as_str(), v.label())), form.status.as_str()) }
                        </select>
                    </div>
                    <div class="space-y-2">
                        <label class="text-sm font-medium">{"Budget"}</label>
                        <select class={select_class} onchange={on_budget}>
                            { options(BudgetType::ALL.iter().map(|v| (v.as_str(), v.label())), form.budget_type.as_str()) }
                        </select>
                    </div>
                </div>

                <div class="grid grid-cols-1 md:grid-cols-2 gap-3">
                    <div class="space-y-2">
                        <label class="text-sm font-medium">{"Start date"}</label>
                        <input type="date" class={select_class} value={(*start).clone()} oninput={on_start} />
                    </div>
                    <div class="space-y-2">
                        <label class="text-sm font-medium">{"End date"}</label>
                        <input type="date" class={select_class} value={(*end).clone()} oninput={on_end} />
                    </div>
                </div>

                <div class="space-y-2">
                    <label class="text-sm font-medium">{"Funding goal (optional)"}</label>
                    <input type="number" min="1" step="0.01" class={select_class}
                        placeholder="e.g. 500" value={(*goal).clone()} oninput={on_goal} />
                </div>

                <div class="space-y-2">
                    <label class="text-sm font-medium">{"Cover photo"}</label>
                    <input type="file" accept="image/*" onchange={on_cover} />
                </div>

                <button class="text-sm px-4 py-2 rounded-xl bg-gray-900 text-white" type="submit" disabled={*busy}>
                    { if *busy { "Creating…" } else { "Create project" } }
                </button>
            </form>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn draft() -> NewProject {
        NewProject {
            title: "Murals".into(),
            description: "Street walls".into(),
            ..NewProject::default()
        }
    }

    #[test]
    fn end_date_may_not_precede_start() {
        let mut project = draft();
        project.start_date = NaiveDate::from_ymd_opt(2025, 5, 2);
        project.end_date = NaiveDate::from_ymd_opt(2025, 5, 1);
        assert!(validate(&project).is_err());

        project.end_date = project.start_date;
        assert!(validate(&project).is_ok());
    }

    #[test]
    fn title_and_description_are_required() {
        assert!(validate(&NewProject::default()).is_err());
        assert!(validate(&draft()).is_ok());
    }

    #[test]
    fn funding_goal_parsing() {
        assert_eq!(parse_goal(""), Ok(None));
        assert_eq!(parse_goal(" 250.5 "), Ok(Some(250.5)));
        assert!(parse_goal("lots").is_err());

        let mut project = draft();
        project.funding_goal = Some(0.0);
        assert!(validate(&project).is_err());
    }
}
