use dioxus::prelude::*;

use crate::chat::QuickAskBox;
use crate::t;

#[component]
pub fn QuickChat() -> Element {
    rsx! {
        section { class: "page page-quick-chat",
            h1 { {t!("quick-title")} }
            p { {t!("quick-intro")} }
            QuickAskBox {}
        }
    }
}
