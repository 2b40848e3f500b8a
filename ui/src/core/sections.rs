//! Section map: titled groups of chart descriptors, in tab order.

use serde::Deserialize;
use serde_json::{json, Value};
use thiserror::Error;

use crate::charts::ChartDescriptor;

const BUILTIN_SECTIONS: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/assets/data/sections.json"
));

#[derive(Debug, Error)]
pub enum SectionError {
    #[error("section source is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("duplicate section title `{0}`")]
    DuplicateTitle(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub title: String,
    pub charts: Vec<ChartDescriptor>,
}

/// Wire shape of a section. Charts are read one by one so a malformed
/// descriptor only affects its own card.
#[derive(Deserialize)]
struct RawSection {
    title: String,
    #[serde(default)]
    charts: Vec<Value>,
}

/// Insertion-ordered, unique-titled sections. Order is tab order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SectionMap {
    sections: Vec<Section>,
    /// Title of the ad-hoc section appended by [`SectionMap::with_external`].
    external: Option<String>,
}

impl SectionMap {
    pub fn from_json(raw: &str) -> Result<Self, SectionError> {
        let sections: Vec<RawSection> = serde_json::from_str(raw)?;
        let mut map = Self::default();
        for RawSection { title, charts } in sections {
            if map.get(&title).is_some() {
                return Err(SectionError::DuplicateTitle(title));
            }
            map.sections.push(Section {
                title,
                charts: charts.into_iter().map(ChartDescriptor::from_value).collect(),
            });
        }
        Ok(map)
    }

    /// The embedded sample source. Parse failures yield an empty map.
    pub fn builtin() -> Self {
        Self::from_json(BUILTIN_SECTIONS).unwrap_or_else(|err| {
            tracing::warn!(%err, "builtin section source rejected; starting empty");
            Self::default()
        })
    }

    /// Append (or replace in place) one ad-hoc section. Empty input leaves
    /// the map unchanged.
    pub fn with_external(mut self, title: &str, charts: Vec<ChartDescriptor>) -> Self {
        if charts.is_empty() {
            return self;
        }
        if let Some(previous) = self.external.take() {
            if previous != title && self.get(title).is_some() {
                // Another section already owns the new title: it takes the
                // charts and the old ad-hoc section goes away.
                self.sections.retain(|s| s.title != previous);
            } else if let Some(slot) = self.sections.iter_mut().find(|s| s.title == previous) {
                slot.title = title.to_string();
                slot.charts = charts;
                self.external = Some(title.to_string());
                return self;
            }
        }
        if let Some(slot) = self.sections.iter_mut().find(|s| s.title == title) {
            slot.charts = charts;
        } else {
            self.sections.push(Section {
                title: title.to_string(),
                charts,
            });
        }
        self.external = Some(title.to_string());
        self
    }

    pub fn titles(&self) -> Vec<String> {
        self.sections.iter().map(|s| s.title.clone()).collect()
    }

    pub fn get(&self, title: &str) -> Option<&[ChartDescriptor]> {
        self.sections
            .iter()
            .find(|s| s.title == title)
            .map(|s| s.charts.as_slice())
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

/// Two fixed descriptors used to exercise the chart pipeline without the
/// chat service.
pub fn dummy_charts() -> Vec<ChartDescriptor> {
    let raw = json!([
        {
            "chartType": "bar",
            "title": "장르별 예상 관객 수 (Dummy)",
            "xField": "genre",
            "yFields": ["expected_audience"],
            "data": [
                { "genre": "뮤지컬", "expected_audience": 30000 },
                { "genre": "콘서트", "expected_audience": 28000 },
                { "genre": "연극", "expected_audience": 15000 }
            ]
        },
        {
            "chartType": "scatter",
            "title": "좌석 수 vs 예상 관객 수 (Dummy)",
            "xField": "capacity",
            "yField": "expected_audience",
            "categoryField": "genre",
            "data": [
                { "capacity": 600, "expected_audience": 500, "genre": "뮤지컬" },
                { "capacity": 1200, "expected_audience": 1000, "genre": "콘서트" },
                { "capacity": 400, "expected_audience": 300, "genre": "연극" }
            ]
        }
    ]);
    serde_json::from_value(raw).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_source_parses_in_order() {
        let map = SectionMap::builtin();
        assert_eq!(map.len(), 3);
        let titles = map.titles();
        assert_eq!(titles[0], "🎭 공연 시장 개요");
        assert_eq!(titles[2], "⚠️ 리스크 분석");
        assert!(map.get("📊 판매 추이").is_some_and(|c| c.len() == 3));
    }

    #[test]
    fn duplicate_titles_are_rejected() {
        let raw = r#"[{"title":"a","charts":[]},{"title":"a","charts":[]}]"#;
        assert!(matches!(
            SectionMap::from_json(raw),
            Err(SectionError::DuplicateTitle(title)) if title == "a"
        ));
    }

    #[test]
    fn malformed_source_is_a_parse_error() {
        assert!(matches!(
            SectionMap::from_json("{ nope"),
            Err(SectionError::Parse(_))
        ));
    }

    #[test]
    fn external_section_appends_then_replaces_in_place() {
        let base = SectionMap::from_json(r#"[{"title":"a"},{"title":"b"}]"#).unwrap();
        let map = base.clone().with_external("forecast", dummy_charts());
        assert_eq!(map.titles(), vec!["a", "b", "forecast"]);

        let one = dummy_charts().into_iter().take(1).collect();
        let map = map.with_external("forecast", one);
        assert_eq!(map.titles(), vec!["a", "b", "forecast"]);
        assert_eq!(map.get("forecast").map(<[_]>::len), Some(1));

        let renamed = map.with_external("예측", dummy_charts());
        assert_eq!(renamed.titles(), vec!["a", "b", "예측"]);
    }

    #[test]
    fn renaming_onto_an_existing_title_keeps_titles_unique() {
        let base = SectionMap::from_json(r#"[{"title":"a"},{"title":"예측"}]"#).unwrap();
        let map = base.with_external("forecast", dummy_charts());
        assert_eq!(map.titles(), vec!["a", "예측", "forecast"]);

        let map = map.with_external("예측", dummy_charts());
        assert_eq!(map.titles(), vec!["a", "예측"]);
        assert_eq!(map.get("예측").map(<[_]>::len), Some(2));

        let map = map.with_external("forecast", dummy_charts());
        assert_eq!(map.titles(), vec!["a", "forecast"]);
    }

    #[test]
    fn one_bad_descriptor_keeps_the_rest_of_the_source() {
        let raw = r#"[{"title":"a","charts":[
            {"chartType":"bar","title":"ok","data":[]},
            {"chartType":"line-band","title":"half band","band":{"lower":"lo"}},
            {"chartType":"bar","title":"bad fields","yFields":[1]}
        ]}]"#;
        let map = SectionMap::from_json(raw).unwrap();
        let titles: Vec<&str> = map
            .get("a")
            .unwrap_or_default()
            .iter()
            .map(|c| c.title.as_str())
            .collect();
        assert_eq!(titles, vec!["ok", "half band", "bad fields"]);
    }

    #[test]
    fn empty_external_payload_is_ignored() {
        let base = SectionMap::from_json(r#"[{"title":"a"}]"#).unwrap();
        let map = base.clone().with_external("forecast", Vec::new());
        assert_eq!(map, base);
    }

    #[test]
    fn dummy_charts_match_the_test_fixture() {
        let charts = dummy_charts();
        assert_eq!(charts.len(), 2);
        assert_eq!(charts[0].chart_type, "bar");
        assert_eq!(charts[0].records().len(), 3);
        assert_eq!(charts[1].category_field.as_deref(), Some("genre"));
    }
}
