use anyhow::{Error, anyhow};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The record produced by parsing the vision model's reply to one photo.
/// Immutable after creation; every marketplace projection derives from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScannedItemAnalysis {
    pub item_name: String,
    pub category: String,
    pub condition: String,
    pub description: String,
    pub estimated_value_range: String,
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
}

const LABELS: &[&str] = &[
    "ITEM:",
    "CATEGORY:",
    "CONDITION:",
    "DESCRIPTION:",
    "VALUE:",
    "ATTRIBUTES:",
];

/// Parses the six-field reply format. A reply that matches none of the
/// labels is rejected; once `ITEM:` is present, missing fields degrade to
/// empty strings and a malformed `ATTRIBUTES:` blob degrades to an empty map.
pub fn parse_analysis(content: &str) -> Result<ScannedItemAnalysis, Error> {
    if !LABELS.iter().any(|label| {
        content
            .lines()
            .any(|line| line.trim_start().starts_with(label))
    }) {
        return Err(anyhow!("analysis reply does not match the expected format"));
    }

    let mut analysis = ScannedItemAnalysis {
        item_name: String::new(),
        category: String::new(),
        condition: String::new(),
        description: String::new(),
        estimated_value_range: String::new(),
        attributes: BTreeMap::new(),
    };

    for line in content.lines() {
        let line = line.trim();
        if let Some(rest) = line.strip_prefix("ITEM:") {
            analysis.item_name = rest.trim().to_string();
        } else if let Some(rest) = line.strip_prefix("CATEGORY:") {
            analysis.category = rest.trim().to_string();
        } else if let Some(rest) = line.strip_prefix("CONDITION:") {
            analysis.condition = rest.trim().to_string();
        } else if let Some(rest) = line.strip_prefix("DESCRIPTION:") {
            analysis.description = rest.trim().to_string();
        } else if let Some(rest) = line.strip_prefix("VALUE:") {
            analysis.estimated_value_range = rest.trim().to_string();
        } else if let Some(rest) = line.strip_prefix("ATTRIBUTES:") {
            analysis.attributes = parse_attributes(rest.trim());
        }
    }

    if analysis.item_name.is_empty() {
        return Err(anyhow!("analysis reply is missing the ITEM field"));
    }

    Ok(analysis)
}

fn parse_attributes(raw: &str) -> BTreeMap<String, String> {
    match serde_json::from_str::<serde_json::Value>(raw) {
        Ok(serde_json::Value::Object(map)) => map
            .into_iter()
            .filter_map(|(k, v)| match v {
                serde_json::Value::String(s) => Some((k, s)),
                serde_json::Value::Number(n) => Some((k, n.to_string())),
                serde_json::Value::Bool(b) => Some((k, b.to_string())),
                _ => None,
            })
            .collect(),
        _ => BTreeMap::new(),
    }
}
