use dioxus::prelude::*;

use crate::t;

#[component]
pub fn UploadData() -> Element {
    rsx! {
        section { class: "page page-placeholder",
            h1 { {t!("upload-title")} }
            p { {t!("upload-intro")} }
        }
    }
}

#[component]
pub fn ManageProject() -> Element {
    rsx! {
        section { class: "page page-placeholder",
            h1 { {t!("projects-title")} }
            p { {t!("projects-intro")} }
        }
    }
}
