#![cfg(test)]
//! Selector lint for the shared theme. Components in `ui` rely on these
//! classes; renaming one in markup means updating the list below.

const THEME_CSS: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../ui/assets/theme/main.css"
));

const REQUIRED_SELECTORS: &[&str] = &[
    ":root",
    "body {",
    ".page {",
    ".app-shell",
    ".app-main",
    ".button {",
    ".button--primary",
    ".button--ghost",
    // Dashboard and export
    ".dashboard__actions",
    ".report-paper",
    ".report-paper__title",
    ".export-status--success",
    ".export-status--error",
    // Insight panel
    ".insight-panel__tabs",
    ".insight-tab--active",
    ".insight-panel__scroll",
    ".insight-section__title",
    ".insight-planning",
    ".insight-docs__paragraph",
    // Charts
    ".chart-list",
    ".chart-card__svg",
    ".chart-card__pies",
    ".chart-card__empty",
    ".chart-table",
    // Chat
    ".chat-launcher",
    ".chat-panel__log",
    ".chat-bubble--user",
    ".chat-bubble--assistant",
    ".chat-panel__composer",
    ".quick-ask__log",
    "@media (max-width: 720px)",
];

#[test]
fn unified_theme_contains_required_selectors() {
    let missing: Vec<_> = REQUIRED_SELECTORS
        .iter()
        .filter(|sel| !THEME_CSS.contains(**sel))
        .copied()
        .collect();
    assert!(
        missing.is_empty(),
        "missing {} required selectors in unified theme:\n{}",
        missing.len(),
        missing.join("\n")
    );
}

#[test]
fn unified_theme_not_trivially_empty() {
    let non_ws_len = THEME_CSS.chars().filter(|c| !c.is_whitespace()).count();
    assert!(
        non_ws_len > 4_000,
        "embedded theme is unexpectedly small ({non_ws_len} non-whitespace chars)"
    );
}

#[test]
fn chat_bubbles_come_in_pairs() {
    let user = THEME_CSS.contains(".chat-bubble--user");
    let assistant = THEME_CSS.contains(".chat-bubble--assistant");
    assert!(user && assistant, "chat bubble variants missing (user: {user}, assistant: {assistant})");
}
