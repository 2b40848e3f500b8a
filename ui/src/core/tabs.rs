//! Tab set for the insight panel: section tabs followed by extra tabs that
//! appear once the chat service has delivered the matching payload.

use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabKind {
    /// Index into the section map.
    Section(usize),
    Structured,
    Planning,
    RelatedDocs,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tab {
    pub title: String,
    pub kind: TabKind,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct InsightTabs {
    base: Vec<String>,
    structured: Option<Map<String, Value>>,
    planning: Option<Value>,
    related_docs: Option<String>,
    active: usize,
}

impl InsightTabs {
    pub fn new(base: Vec<String>) -> Self {
        Self {
            base,
            ..Self::default()
        }
    }

    /// Swap the section titles, keeping payloads and a valid active index.
    /// An active extra tab stays active; it moves with the section count.
    pub fn rebase(&mut self, base: Vec<String>) {
        let (old_base, old_len) = (self.base.len(), self.len());
        self.base = base;
        if (old_base..old_len).contains(&self.active) {
            self.active = self.active - old_base + self.base.len();
        }
        self.clamp_active();
    }

    /// Empty maps are ignored; a present payload is only ever replaced.
    pub fn absorb_structured(&mut self, payload: Map<String, Value>) -> bool {
        if payload.is_empty() {
            return false;
        }
        self.structured = Some(payload);
        true
    }

    pub fn absorb_planning(&mut self, payload: Value) -> bool {
        let present = match &payload {
            Value::Null => false,
            Value::Object(map) => !map.is_empty(),
            Value::Array(items) => !items.is_empty(),
            Value::String(text) => !text.is_empty(),
            _ => true,
        };
        if present {
            self.planning = Some(payload);
        }
        present
    }

    pub fn absorb_related_docs(&mut self, payload: String) -> bool {
        if payload.is_empty() {
            return false;
        }
        self.related_docs = Some(payload);
        true
    }

    pub fn structured(&self) -> Option<&Map<String, Value>> {
        self.structured.as_ref()
    }

    pub fn planning(&self) -> Option<&Value> {
        self.planning.as_ref()
    }

    pub fn related_docs(&self) -> Option<&str> {
        self.related_docs.as_deref()
    }

    pub fn tabs(&self) -> Vec<Tab> {
        let mut tabs: Vec<Tab> = self
            .base
            .iter()
            .enumerate()
            .map(|(idx, title)| Tab {
                title: title.clone(),
                kind: TabKind::Section(idx),
            })
            .collect();
        if self.structured.is_some() {
            tabs.push(Tab {
                title: crate::t!("tab-structured"),
                kind: TabKind::Structured,
            });
        }
        if self.planning.is_some() {
            tabs.push(Tab {
                title: crate::t!("tab-planning"),
                kind: TabKind::Planning,
            });
        }
        if self.related_docs.is_some() {
            tabs.push(Tab {
                title: crate::t!("tab-related-docs"),
                kind: TabKind::RelatedDocs,
            });
        }
        tabs
    }

    pub fn len(&self) -> usize {
        self.base.len()
            + usize::from(self.structured.is_some())
            + usize::from(self.planning.is_some())
            + usize::from(self.related_docs.is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn active(&self) -> usize {
        self.active
    }

    /// Out-of-range indices are ignored. Returns whether the index changed.
    pub fn activate(&mut self, index: usize) -> bool {
        if index >= self.len() || index == self.active {
            return false;
        }
        self.active = index;
        true
    }

    fn clamp_active(&mut self) {
        let len = self.len();
        if self.active >= len {
            self.active = len.saturating_sub(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn base() -> InsightTabs {
        InsightTabs::new(vec!["overview".into(), "trend".into(), "risk".into()])
    }

    fn kinds(tabs: &InsightTabs) -> Vec<TabKind> {
        tabs.tabs().into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn base_titles_keep_source_order() {
        let tabs = base();
        let titles: Vec<String> = tabs.tabs().into_iter().map(|t| t.title).collect();
        assert_eq!(titles, vec!["overview", "trend", "risk"]);
    }

    #[test]
    fn structured_payload_appends_one_tab_after_sections() {
        let mut tabs = base();
        let payload = json!({ "genre": "뮤지컬", "capacity": 1200 });
        assert!(tabs.absorb_structured(payload.as_object().cloned().unwrap()));
        assert_eq!(
            kinds(&tabs),
            vec![
                TabKind::Section(0),
                TabKind::Section(1),
                TabKind::Section(2),
                TabKind::Structured
            ]
        );
    }

    #[test]
    fn extras_follow_fixed_order_regardless_of_arrival() {
        let mut tabs = base();
        tabs.absorb_related_docs("doc".into());
        tabs.absorb_planning(json!({ "plan": 1 }));
        tabs.absorb_structured(json!({ "k": "v" }).as_object().cloned().unwrap());
        assert_eq!(
            &kinds(&tabs)[3..],
            &[TabKind::Structured, TabKind::Planning, TabKind::RelatedDocs]
        );
    }

    #[test]
    fn empty_payloads_never_retract_a_tab() {
        let mut tabs = base();
        tabs.absorb_related_docs("first".into());
        assert!(!tabs.absorb_related_docs(String::new()));
        assert!(!tabs.absorb_structured(Map::new()));
        assert!(!tabs.absorb_planning(Value::Null));
        assert!(!tabs.absorb_planning(json!({})));
        assert_eq!(tabs.related_docs(), Some("first"));
        assert_eq!(tabs.len(), 4);
    }

    #[test]
    fn activation_ignores_out_of_range() {
        let mut tabs = base();
        assert!(tabs.activate(2));
        assert!(!tabs.activate(3));
        assert_eq!(tabs.active(), 2);
    }

    #[test]
    fn growing_sections_keep_an_active_extra_tab() {
        let mut tabs = base();
        tabs.absorb_structured(json!({ "k": "v" }).as_object().cloned().unwrap());
        tabs.absorb_related_docs("doc".into());
        assert!(tabs.activate(3));
        assert_eq!(tabs.tabs()[tabs.active()].kind, TabKind::Structured);

        tabs.rebase(vec![
            "overview".into(),
            "trend".into(),
            "risk".into(),
            "forecast".into(),
        ]);
        assert_eq!(tabs.active(), 4);
        assert_eq!(tabs.tabs()[tabs.active()].kind, TabKind::Structured);

        tabs.rebase(vec!["overview".into()]);
        assert_eq!(tabs.tabs()[tabs.active()].kind, TabKind::Structured);
    }

    #[test]
    fn growing_sections_leave_an_active_section_alone() {
        let mut tabs = base();
        tabs.absorb_planning(json!({ "plan": 1 }));
        assert!(tabs.activate(1));
        tabs.rebase(vec![
            "overview".into(),
            "trend".into(),
            "risk".into(),
            "forecast".into(),
        ]);
        assert_eq!(tabs.active(), 1);
    }

    #[test]
    fn rebase_keeps_active_index_valid() {
        let mut tabs = base();
        tabs.activate(2);
        tabs.rebase(vec!["only".into()]);
        assert_eq!(tabs.active(), 0);
        assert_eq!(tabs.len(), 1);
    }
}
