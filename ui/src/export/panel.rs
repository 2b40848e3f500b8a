use dioxus::prelude::*;

use crate::core::tabs::InsightTabs;
use crate::core::{DashboardConfig, SectionMap};
use crate::t;

use super::{export_report, Delivery, ReportModel};

#[derive(Clone, Debug, PartialEq)]
enum ExportStatus {
    Idle,
    Working,
    Done(String),
    Error(String),
}

/// "Download Reports" button with an inline status line.
#[component]
pub fn ReportExportButton(sections: Signal<SectionMap>, tabs: Signal<InsightTabs>) -> Element {
    let config = try_use_context::<DashboardConfig>().unwrap_or_default();
    let mut status = use_signal(|| ExportStatus::Idle);
    let mut busy = use_signal(|| false);

    let feedback = match &status() {
        ExportStatus::Idle => None,
        ExportStatus::Working => Some((
            "export-status".to_string(),
            format!("{}…", t!("export-working")),
        )),
        ExportStatus::Done(message) => Some((
            "export-status export-status--success".to_string(),
            format!("✅ {message}"),
        )),
        ExportStatus::Error(err) => Some((
            "export-status export-status--error".to_string(),
            format!("⚠️ {err}"),
        )),
    };

    let on_export = move |_| {
        if busy() {
            return;
        }
        busy.set(true);
        status.set(ExportStatus::Working);
        let model = ReportModel::collect(t!("report-title"), &sections.read(), &tabs.read());
        let filename = config.report_filename.clone();
        spawn(async move {
            match export_report(model, &filename).await {
                Ok(Delivery::Saved(path)) => {
                    let path = path.display().to_string();
                    status.set(ExportStatus::Done(t!("export-done-saved", path = path)));
                }
                Ok(Delivery::Downloaded) => {
                    status.set(ExportStatus::Done(t!("export-done-download")))
                }
                Err(err) => {
                    tracing::error!(%err, "report export failed");
                    let error = err.to_string();
                    status.set(ExportStatus::Error(t!("export-failed", error = error)));
                }
            }
            busy.set(false);
        });
    };

    rsx! {
        div { class: "report-export",
            button {
                r#type: "button",
                class: "button button--primary",
                disabled: busy(),
                onclick: on_export,
                {t!("dashboard-download")}
            }
            if let Some((class_name, message)) = feedback {
                p { class: "{class_name}", "{message}" }
            }
        }
    }
}
