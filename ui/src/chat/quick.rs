use dioxus::prelude::*;

use crate::core::transcript::QuickLog;
use crate::core::DashboardConfig;
use crate::t;

use super::client::{resolve_endpoint, QuickAskClient};

/// Minimal one-question chat box backed by the secondary endpoint.
#[component]
pub fn QuickAskBox() -> Element {
    let config = try_use_context::<DashboardConfig>().unwrap_or_default();
    let endpoint = resolve_endpoint(&config.chat_endpoint, &config.quick_chat_endpoint);
    let client = use_signal(move || QuickAskClient::new(endpoint));
    let mut log = use_signal(QuickLog::default);
    let mut draft = use_signal(String::new);

    let mut send = move || {
        let text = draft();
        let Some(request) = log.write().begin(&text) else {
            return;
        };
        draft.set(String::new());
        let client = client.read().clone();
        spawn(async move {
            let outcome = client.ask(&request).await;
            log.write().settle(outcome);
        });
    };

    let lines = log.read().lines().to_vec();

    rsx! {
        div { class: "quick-ask",
            div { class: "quick-ask__log",
                for (idx, line) in lines.iter().enumerate() {
                    p { key: "{idx}", class: "quick-ask__line",
                        strong { "{line.sender}:" }
                        " {line.text}"
                    }
                }
            }
            div { class: "quick-ask__composer",
                input {
                    class: "quick-ask__input",
                    r#type: "text",
                    value: "{draft}",
                    oninput: move |evt| draft.set(evt.value()),
                    onkeydown: move |evt| {
                        if evt.key().to_string().eq_ignore_ascii_case("enter") {
                            send();
                        }
                    },
                }
                button {
                    r#type: "button",
                    class: "button button--primary",
                    onclick: move |_| send(),
                    {t!("quick-send")}
                }
            }
        }
    }
}
