//! Direct messages: inbox, sent, compose

use crate::client::api;
use crate::components::{ErrorBanner, LoadingSpinner};
use crate::hooks::use_request_slot;
use crate::utils::{format_timestamp, input_value, textarea_value};
use midart_core::{ApiError, Message, NewMessage};
use tracing::{debug, warn};
use yew::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Tab {
    Inbox,
    Sent,
    Compose,
}

/// Compose form prefilled to answer `message`
fn reply_to(message: &Message) -> NewMessage {
    let subject = if message.subject.to_lowercase().starts_with("re:") {
        message.subject.clone()
    } else {
        format!("Re: {}", message.subject)
    };
    NewMessage {
        recipient_username: message.sender.username.clone(),
        subject,
        body: String::new(),
        parent: Some(message.id),
    }
}

fn check(message: &NewMessage) -> Result<(), String> {
    if message.recipient_username.trim().is_empty() {
        Err("Who is this message for?".into())
    } else if message.body.trim().is_empty() {
        Err("Write a message first.".into())
    } else {
        Ok(())
    }
}

async fn load(tab: Tab) -> Result<Vec<Message>, ApiError> {
    let client = api()?;
    Ok(match tab {
        Tab::Inbox => client.inbox().await?,
        Tab::Sent => client.outbox().await?,
        Tab::Compose => Vec::new(),
    })
}

#[function_component(MessagesPage)]
pub fn messages_page() -> Html {
    let tab = use_state(|| Tab::Inbox);
    let messages = use_state(|| None::<Vec<Message>>);
    let open = use_state(|| None::<u64>);
    let error = use_state(|| None::<String>);
    let draft = use_state(NewMessage::default);
    let sending = use_state(|| false);

    let requests = use_request_slot();

    {
        let messages = messages.clone();
        let error = error.clone();
        use_effect_with(*tab, move |&tab| {
            if tab == Tab::Compose {
                requests.cancel();
            } else {
                messages.set(None);
                error.set(None);
                let ticket = requests.begin();
                wasm_bindgen_futures::spawn_local(async move {
                    let Some(result) = requests.settle(&ticket, load(tab)).await else {
                        return;
                    };
                    match result {
                        Ok(list) => messages.set(Some(list)),
                        Err(err) => {
                            warn!(%err, ?tab, "Messages request failed");
                            error.set(err.message_or("Could not load messages."));
                            messages.set(Some(Vec::new()));
                        }
                    }
                });
            }
        });
    }

    let select = |next: Tab| {
        let (tab, open, error) = (tab.clone(), open.clone(), error.clone());
        Callback::from(move |_: MouseEvent| {
            open.set(None);
            error.set(None);
            tab.set(next);
        })
    };

    let field = |apply: fn(&mut NewMessage, String), textarea: bool| {
        let draft = draft.clone();
        Callback::from(move |e: InputEvent| {
            let mut next = (*draft).clone();
            let value = if textarea { textarea_value(&e) } else { input_value(&e) };
            apply(&mut next, value);
            draft.set(next);
        })
    };
    let on_recipient = field(|draft, value| draft.recipient_username = value, false);
    let on_subject = field(|draft, value| draft.subject = value, false);
    let on_body = field(|draft, value| draft.body = value, true);

    let on_send = {
        let (tab, draft, sending, error) = (tab.clone(), draft.clone(), sending.clone(), error.clone());
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *sending {
                return;
            }
            let message = NewMessage {
                recipient_username: draft.recipient_username.trim().to_string(),
                ..(*draft).clone()
            };
            if let Err(problem) = check(&message) {
                error.set(Some(problem));
                return;
            }
            let (tab, draft, sending, error) = (tab.clone(), draft.clone(), sending.clone(), error.clone());
            sending.set(true);
            error.set(None);
            wasm_bindgen_futures::spawn_local(async move {
                let result = async { Ok::<_, ApiError>(api()?.send_message(&message).await?) }.await;
                match result {
                    Ok(()) => {
                        debug!(to = %message.recipient_username, "Message sent");
                        draft.set(NewMessage::default());
                        tab.set(Tab::Sent);
                    }
                    Err(err) => {
                        warn!(%err, "Sending message failed");
                        error.set(err.message_or("Could not send the message."));
                    }
                }
                sending.set(false);
            });
        })
    };

    let tab_class = |current: Tab| {
        if *tab == current {
            "pb-3 text-sm font-medium text-gray-900 border-b-2 border-gray-900"
        } else {
            "pb-3 text-sm font-medium text-gray-400 hover:text-gray-600"
        }
    };

    let inbox = *tab == Tab::Inbox;
    let list = |items: &[Message]| -> Html {
        if items.is_empty() {
            let text = if inbox { "No messages in your inbox" } else { "No sent messages" };
            return html! { <p class="text-center py-12 text-gray-400">{text}</p> };
        }
        html! {
            <div class="space-y-3">
                { for items.iter().map(|message| {
                    let other = if inbox { &message.sender } else { &message.recipient };
                    let expanded = *open == Some(message.id);
                    let toggle = {
                        let open = open.clone();
                        let id = message.id;
                        Callback::from(move |_: MouseEvent| {
                            open.set(if *open == Some(id) { None } else { Some(id) });
                        })
                    };
                    let reply = {
                        let (tab, draft) = (tab.clone(), draft.clone());
                        let prefilled = reply_to(message);
                        Callback::from(move |_: MouseEvent| {
                            draft.set(prefilled.clone());
                            tab.set(Tab::Compose);
                        })
                    };
                    let border = if inbox && !message.is_read {
                        "border-blue-200 bg-blue-50"
                    } else {
                        "border-gray-100"
                    };
                    html! {
                        <div key={message.id} class={classes!("p-4", "border", "rounded-xl", border)}>
                            <div class="cursor-pointer" onclick={toggle}>
                                <div class="flex items-center justify-between mb-1">
                                    <span class="font-medium text-sm text-gray-900">{format!("@{}", other.username)}</span>
                                    <span class="text-xs text-gray-400">{format_timestamp(message.created_at)}</span>
                                </div>
                                <p class="text-sm font-medium text-gray-700 truncate">{&message.subject}</p>
                                if !expanded {
                                    <p class="text-sm text-gray-500 truncate">{&message.body}</p>
                                }
                            </div>
                            if expanded {
                                <p class="text-sm text-gray-800 whitespace-pre-wrap mt-2">{&message.body}</p>
                                if inbox {
                                    <button class="mt-3 text-sm px-3 py-1.5 rounded-xl border border-gray-200"
                                        onclick={reply}>
                                        {"Reply"}
                                    </button>
                                }
                            }
                        </div>
                    }
                }) }
            </div>
        }
    };

    let input_class = "w-full px-4 py-3 text-sm rounded-xl border border-gray-200";
    let body = match *tab {
        Tab::Compose => html! {
            <form class="space-y-3" onsubmit={on_send}>
                <input class={input_class} placeholder="To (username)"
                    value={draft.recipient_username.clone()} oninput={on_recipient} />
                <input class={input_class} placeholder="Subject"
                    value={draft.subject.clone()} oninput={on_subject} />
                <textarea class={input_class} rows="6" placeholder="Message"
                    value={draft.body.clone()} oninput={on_body} />
                <button class="text-sm px-4 py-2 rounded-xl bg-gray-900 text-white" type="submit" disabled={*sending}>
                    { if *sending { "Sending…" } else { "Send" } }
                </button>
            </form>
        },
        Tab::Inbox | Tab::Sent => match messages.as_deref() {
            None => html! { <LoadingSpinner /> },
            Some(items) => list(items),
        },
    };

    html! {
        <div class="space-y-6">
            <h1 class="text-2xl font-light text-gray-900">{"Messages"}</h1>
            <div class="flex gap-4 border-b border-gray-100">
                <button class={tab_class(Tab::Inbox)} onclick={select(Tab::Inbox)}>{"Inbox"}</button>
                <button class={tab_class(Tab::Sent)} onclick={select(Tab::Sent)}>{"Sent"}</button>
                <button class={tab_class(Tab::Compose)} onclick={select(Tab::Compose)}>{"Compose"}</button>
            </div>
            <ErrorBanner message={(*error).clone()} />
            {body}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use midart_core::UserSummary;

    fn user(id: u64, username: &str) -> UserSummary {
        UserSummary {
            id,
            username: username.into(),
            email: String::new(),
            first_name: String::new(),
            last_name: String::new(),
        }
    }

    fn message(subject: &str) -> Message {
        Message {
            id: 5,
            sender: user(1, "ada"),
            recipient: user(2, "lin"),
            subject: subject.into(),
            body: "hi".into(),
            is_read: false,
            parent: None,
            created_at: Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap(),
        }
    }

    #[test]
    fn reply_targets_sender_and_threads() {
        let reply = reply_to(&message("Studio visit"));
        assert_eq!(reply.recipient_username, "ada");
        assert_eq!(reply.subject, "Re: Studio visit");
        assert_eq!(reply.parent, Some(5));

        assert_eq!(reply_to(&message("RE: Studio visit")).subject, "RE: Studio visit");
    }

    #[test]
    fn compose_needs_recipient_and_body() {
        let mut draft = NewMessage::default();
        assert!(check(&draft).is_err());
        draft.recipient_username = "ada".into();
        assert!(check(&draft).is_err());
        draft.body = "hello".into();
        assert!(check(&draft).is_ok());
    }
}
