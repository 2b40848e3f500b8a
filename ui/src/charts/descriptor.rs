//! Chart descriptors as produced by the analysis service.
//!
//! A descriptor is a declarative record: a `chartType` tag, the field names
//! to plot, and the raw data. Descriptors are read-only once deserialized.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// One chart request from the analysis service (wire format is camelCase).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartDescriptor {
    #[serde(default)]
    pub chart_type: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x_field: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y_field: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y_fields: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_field: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub columns: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub band: Option<Band>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pie_fields: Option<Vec<PieField>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats: Option<BoxStats>,
    #[serde(default)]
    pub data: Value,
}

/// Upper/lower field names for a confidence band. The band is only drawn
/// when both are named.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Band {
    #[serde(default)]
    pub upper: Option<String>,
    #[serde(default)]
    pub lower: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PieField {
    pub data_key: String,
    pub name_key: String,
    #[serde(default)]
    pub title: String,
}

/// Five-number summary for a boxplot. Every field is optional on the wire
/// and may be a number or a numeric string; a boxplot only renders when all
/// five are present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoxStats {
    #[serde(default, deserialize_with = "lenient_number")]
    pub min: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub max: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub q1: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub q3: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub median: Option<f64>,
}

fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(numeric))
}

/// The five stats resolved, in ascending box order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FiveNumbers {
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

impl BoxStats {
    pub fn complete(&self) -> Option<FiveNumbers> {
        Some(FiveNumbers {
            min: self.min?,
            q1: self.q1?,
            median: self.median?,
            q3: self.q3?,
            max: self.max?,
        })
    }
}

/// Known visual encodings. Anything else renders nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Bar,
    Line,
    MultiLine,
    LineBand,
    Scatter,
    Table,
    RocCurve,
    BarLineCombo,
    PieMultiple,
    Histogram,
    Boxplot,
}

impl ChartKind {
    pub fn from_tag(tag: &str) -> Option<Self> {
        let kind = match tag {
            "bar" => Self::Bar,
            "line" => Self::Line,
            "multi-line" | "line-multiple-series" => Self::MultiLine,
            "line-band" => Self::LineBand,
            "scatter" => Self::Scatter,
            "table" => Self::Table,
            "roc-curve" => Self::RocCurve,
            "bar-line-combo" => Self::BarLineCombo,
            "pie-multiple" => Self::PieMultiple,
            "histogram" => Self::Histogram,
            "boxplot" => Self::Boxplot,
            _ => return None,
        };
        Some(kind)
    }
}

impl ChartDescriptor {
    /// Read one descriptor without failing. An entry that does not match the
    /// wire format keeps whatever `chartType`, `title` and `data` it carries
    /// and renders as a title card only.
    pub fn from_value(raw: Value) -> Self {
        match serde_json::from_value::<Self>(raw.clone()) {
            Ok(descriptor) => descriptor,
            Err(err) => {
                let text = |key: &str| raw.get(key).map(label).unwrap_or_default();
                let descriptor = Self {
                    chart_type: text("chartType"),
                    title: text("title"),
                    ..Default::default()
                };
                tracing::debug!(
                    %err,
                    chart_type = %descriptor.chart_type,
                    title = %descriptor.title,
                    "keeping malformed chart descriptor as a title card"
                );
                descriptor
            }
        }
    }

    pub fn kind(&self) -> Option<ChartKind> {
        ChartKind::from_tag(self.chart_type.as_str())
    }

    /// `yFields` when given, otherwise the single `yField`.
    pub fn series_fields(&self) -> Vec<String> {
        match (&self.y_fields, &self.y_field) {
            (Some(fields), _) => fields.clone(),
            (None, Some(field)) => vec![field.clone()],
            (None, None) => Vec::new(),
        }
    }

    /// Data rows when `data` is an array of records. Non-object entries are skipped.
    pub fn records(&self) -> Vec<&Map<String, Value>> {
        match &self.data {
            Value::Array(items) => items.iter().filter_map(Value::as_object).collect(),
            _ => Vec::new(),
        }
    }
}

/// Numeric reading of a JSON scalar: numbers and numeric strings.
pub fn numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        _ => None,
    }
}

/// Display text for a JSON scalar: strings verbatim, everything else as JSON.
pub fn label(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
