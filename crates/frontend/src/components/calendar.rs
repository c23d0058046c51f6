//! Month view of a project's calendar notes

use crate::client::api;
use crate::components::ErrorBanner;
use crate::hooks::use_request_slot;
use crate::utils::{textarea_value, today};
use chrono::{Datelike, NaiveDate};
use midart_core::progress::{month_grid, shift_month};
use midart_core::{ApiError, CalendarEntry, NewCalendarEntry};
use std::collections::HashMap;
use tracing::warn;
use yew::prelude::*;

const WEEKDAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

#[derive(Properties, PartialEq)]
pub struct MonthCalendarProps {
    pub project_id: u64,
    pub is_owner: bool,
    #[prop_or_default]
    pub start_date: Option<NaiveDate>,
    #[prop_or_default]
    pub end_date: Option<NaiveDate>,
}

async fn fetch_month(project_id: u64, year: i32, month: u32) -> Result<Vec<CalendarEntry>, ApiError> {
    Ok(api()?.calendar_entries(project_id, year, month).await?)
}

/// Saves the note, or deletes it when the text is blank
async fn store_note(project_id: u64, date: NaiveDate, content: String) -> Result<(), ApiError> {
    let client = api()?;
    if content.trim().is_empty() {
        client.delete_calendar_entry(project_id, date).await?;
    } else {
        client
            .save_calendar_entry(project_id, &NewCalendarEntry { date, content })
            .await?;
    }
    Ok(())
}

#[function_component(MonthCalendar)]
pub fn month_calendar(props: &MonthCalendarProps) -> Html {
    let shown = use_state(|| {
        let today = today();
        (today.year(), today.month())
    });
    let entries = use_state(HashMap::<NaiveDate, String>::new);
    let selected = use_state(|| None::<NaiveDate>);
    let draft = use_state(String::new);
    let saving = use_state(|| false);
    let error = use_state(|| None::<String>);

    let requests = use_request_slot();

    // Reload whenever the project or the shown month changes
    {
        let entries = entries.clone();
        let error = error.clone();
        let (year, month) = *shown;
        use_effect_with((props.project_id, year, month), move |&(project_id, year, month)| {
            let ticket = requests.begin();
            wasm_bindgen_futures::spawn_local(async move {
                let Some(result) = requests
                    .settle(&ticket, fetch_month(project_id, year, month))
                    .await
                else {
                    return;
                };
                match result {
                    Ok(list) => {
                        entries.set(
                            list.into_iter()
                                .map(|entry| (entry.date, entry.content))
                                .collect(),
                        );
                        error.set(None);
                    }
                    Err(err) => {
                        warn!(%err, project_id, "Calendar request failed");
                        error.set(err.message_or("Could not load calendar."));
                    }
                }
            });
        });
    }

    let step = |delta: i32| {
        let shown = shown.clone();
        Callback::from(move |_: MouseEvent| {
            let (year, month) = *shown;
            if let Some(next) = shift_month(year, month, delta) {
                shown.set(next);
            }
        })
    };

    let on_draft = {
        let draft = draft.clone();
        Callback::from(move |e: InputEvent| draft.set(textarea_value(&e)))
    };

    let on_cancel = {
        let selected = selected.clone();
        Callback::from(move |_: MouseEvent| selected.set(None))
    };

    let on_save = {
        let project_id = props.project_id;
        let entries = entries.clone();
        let selected = selected.clone();
        let draft = draft.clone();
        let saving = saving.clone();
        let error = error.clone();
        Callback::from(move |_: MouseEvent| {
            let Some(date) = *selected else {
                return;
            };
            let content = (*draft).clone();
            let entries = entries.clone();
            let selected = selected.clone();
            let saving = saving.clone();
            let error = error.clone();
            saving.set(true);
            wasm_bindgen_futures::spawn_local(async move {
                match store_note(project_id, date, content.clone()).await {
                    Ok(()) => {
                        let mut next = (*entries).clone();
                        if content.trim().is_empty() {
                            next.remove(&date);
                        } else {
                            next.insert(date, content);
                        }
                        entries.set(next);
                        selected.set(None);
                        error.set(None);
                    }
                    Err(err) => {
                        warn!(%err, %date, "Saving calendar note failed");
                        error.set(err.message_or("Could not save the note."));
                    }
                }
                saving.set(false);
            });
        })
    };

    let (year, month) = *shown;
    let days = month_grid(year, month).unwrap_or_default();
    let title = NaiveDate::from_ymd_opt(year, month, 1)
        .map(|first| first.format("%B %Y").to_string())
        .unwrap_or_default();

    let cells = days.into_iter().map(|day| {
        let note = entries.get(&day).cloned();
        let in_month = day.month() == month;
        let onclick = props.is_owner.then(|| {
            let selected = selected.clone();
            let draft = draft.clone();
            let note = note.clone().unwrap_or_default();
            Callback::from(move |_: MouseEvent| {
                draft.set(note.clone());
                selected.set(Some(day));
            })
        });

        let class = classes!(
            "relative", "min-h-[60px]", "p-1", "border", "rounded", "text-xs",
            if in_month { "bg-white" } else { "bg-gray-50 text-gray-300" },
            if note.is_some() { "border-blue-200 bg-blue-50" } else { "border-gray-100" },
            props.is_owner.then_some("cursor-pointer hover:border-gray-300"),
        );

        html! {
            <div key={day.to_string()} {class} {onclick}>
                <div class="flex items-center justify-between">
                    <span class={if in_month { "text-gray-700" } else { "text-gray-300" }}>
                        {day.day()}
                    </span>
                    if props.start_date == Some(day) {
                        <span class="px-1 py-0.5 text-[10px] bg-green-100 text-green-700 rounded">{"START"}</span>
                    }
                    if props.end_date == Some(day) {
                        <span class="px-1 py-0.5 text-[10px] bg-red-100 text-red-700 rounded">{"END"}</span>
                    }
                </div>
                if let Some(note) = note {
                    <p class="mt-1 text-[10px] text-gray-600 line-clamp-2">{note}</p>
                }
            </div>
        }
    });

    html! {
        <div class="bg-white rounded-xl border border-gray-100 p-4 space-y-3">
            <div class="flex items-center justify-between">
                <button class="p-1 text-gray-400 hover:text-gray-600 rounded" onclick={step(-1)}>
                    {"‹"}
                </button>
                <h3 class="font-medium text-gray-900">{title}</h3>
                <button class="p-1 text-gray-400 hover:text-gray-600 rounded" onclick={step(1)}>
                    {"›"}
                </button>
            </div>

            <ErrorBanner message={(*error).clone()} />

            <div class="grid grid-cols-7 gap-1">
                { for WEEKDAYS.iter().map(|day| html! {
                    <div class="text-center text-xs text-gray-400 py-1">{*day}</div>
                }) }
            </div>
            <div class="grid grid-cols-7 gap-1">
                { for cells }
            </div>

            if let Some(date) = *selected {
                <div class="border-t border-gray-100 pt-3 space-y-2">
                    <div class="text-sm font-medium text-gray-900">{date.format("%A, %B %-d").to_string()}</div>
                    <textarea
                        class="w-full px-3 py-2 text-sm rounded-xl border border-gray-200"
                        rows="3"
                        value={(*draft).clone()}
                        oninput={on_draft}
                        placeholder="What happened on this day? Leave empty to remove the note."
                    />
                    <div class="flex gap-2">
                        <button
                            class="text-sm px-3 py-1.5 rounded-xl bg-gray-900 text-white"
                            disabled={*saving}
                            onclick={on_save}
                        >
                            { if *saving { "Saving…" } else { "Save" } }
                        </button>
                        <button class="text-sm px-3 py-1.5 rounded-xl border border-gray-200" onclick={on_cancel}>
                            {"Cancel"}
                        </button>
                    </div>
                </div>
            }

            if !props.is_owner {
                <p class="text-xs text-gray-400 text-center">
                    {"Only the project creator can edit this calendar."}
                </p>
            }
        </div>
    }
}
