use std::rc::Rc;

use dioxus::prelude::*;
use futures_util::StreamExt;
use serde_json::{Map, Value};

use crate::charts::ChartDescriptor;
use crate::core::transcript::{ReplyHandlers, Role, Transcript};
use crate::core::DashboardConfig;
use crate::t;

use super::client::{deliver, HttpChatClient};

enum ChatEvent {
    Submit(String),
}

/// Floating chat launcher and panel.
///
/// Every exchange runs as its own task, so a second message sent while the
/// first is still in flight is not ordered against it: whichever reply
/// lands first is appended first.
#[component]
pub fn ChatWidget(
    on_insights: Option<EventHandler<Vec<ChartDescriptor>>>,
    on_structured: Option<EventHandler<Map<String, Value>>>,
    on_planning: Option<EventHandler<Value>>,
    on_related_docs: Option<EventHandler<String>>,
) -> Element {
    let config = try_use_context::<DashboardConfig>().unwrap_or_default();
    let transcript = use_signal(Transcript::default);
    let mut draft = use_signal(String::new);
    let mut is_open = use_signal(|| false);
    let mut end_marker = use_signal(|| Option::<Rc<MountedData>>::None);

    let chat = use_coroutine(move |mut rx: UnboundedReceiver<ChatEvent>| {
        let client = HttpChatClient::new(config.chat_endpoint.clone());
        let mut transcript = transcript;

        async move {
            while let Some(ChatEvent::Submit(text)) = rx.next().await {
                let Some(request) = transcript.write().begin_turn(&text) else {
                    continue;
                };
                let client = client.clone();
                spawn(async move {
                    let outcome = deliver(&client, &request).await;
                    let forwards = transcript.write().settle(outcome);
                    if let Some(forwards) = forwards {
                        forwards.dispatch(&ReplyHandlers {
                            structured: forward(on_structured),
                            planning: forward(on_planning),
                            related_docs: forward(on_related_docs),
                            predictions: forward(on_insights),
                        });
                    }
                });
            }
        }
    });

    let mut submit = move || {
        let text = draft();
        if text.trim().is_empty() {
            return;
        }
        draft.set(String::new());
        chat.send(ChatEvent::Submit(text));
    };

    use_effect(move || {
        let _len = transcript.read().messages().len();
        if let Some(marker) = end_marker() {
            spawn(async move {
                let _ = marker.scroll_to(ScrollBehavior::Smooth).await;
            });
        }
    });

    let messages = transcript.read().messages().to_vec();

    if !is_open() {
        return rsx! {
            button {
                r#type: "button",
                class: "chat-launcher",
                aria_label: t!("chat-open"),
                onclick: move |_| is_open.set(true),
                "💬"
            }
        };
    }

    rsx! {
        aside { class: "chat-panel",
            header { class: "chat-panel__header",
                strong { {t!("chat-title")} }
                button {
                    r#type: "button",
                    class: "button button--ghost chat-panel__close",
                    aria_label: t!("chat-close"),
                    onclick: move |_| is_open.set(false),
                    "✕"
                }
            }

            div { class: "chat-panel__log",
                for (idx, message) in messages.iter().enumerate() {
                    div {
                        key: "{idx}",
                        class: if message.role == Role::User {
                            "chat-bubble chat-bubble--user"
                        } else {
                            "chat-bubble chat-bubble--assistant"
                        },
                        "{message.content}"
                    }
                }
                div {
                    class: "chat-panel__end",
                    onmounted: move |evt| end_marker.set(Some(evt.data())),
                }
            }

            div { class: "chat-panel__composer",
                input {
                    class: "chat-panel__input",
                    r#type: "text",
                    placeholder: t!("chat-placeholder"),
                    value: "{draft}",
                    oninput: move |evt| draft.set(evt.value()),
                    onkeydown: move |evt| {
                        if evt.key().to_string().eq_ignore_ascii_case("enter") {
                            evt.prevent_default();
                            submit();
                        }
                    },
                }
                button {
                    r#type: "button",
                    class: "button button--primary",
                    onclick: move |_| submit(),
                    {t!("chat-send")}
                }
            }
        }
    }
}

fn forward<T: 'static>(handler: Option<EventHandler<T>>) -> Option<Box<dyn Fn(T)>> {
    handler.map(|handler| Box::new(move |value: T| handler.call(value)) as Box<dyn Fn(T)>)
}
