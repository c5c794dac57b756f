use std::collections::HashSet;

use anyhow::{Context, Result, anyhow};
use serde::Deserialize;
use serde_json::Value;

use crate::util::normalize_tag;

use super::item::Item;

#[derive(Clone, Debug, Deserialize)]
struct RawItem {
    #[serde(default)]
    id: Value,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    link: Option<String>,
    #[serde(default)]
    categories: Option<Value>,
}

fn id_to_string(id: &Value) -> Option<String> {
    match id {
        Value::String(text) => {
            let text = text.trim();
            (!text.is_empty()).then(|| text.to_owned())
        }
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

fn normalize_categories(raw: Option<&Value>) -> Vec<String> {
    let Some(Value::Array(values)) = raw else {
        return Vec::new();
    };

    let mut seen = HashSet::new();
    values
        .iter()
        .filter_map(|value| match value {
            Value::String(text) => normalize_tag(text),
            Value::Null => None,
            other => normalize_tag(&other.to_string()),
        })
        .filter(|tag| seen.insert(tag.clone()))
        .collect()
}

pub(super) fn parse_items(raw: &str) -> Result<Vec<Item>> {
    let parsed: Value = serde_json::from_str(raw).context("invalid JSON in item list")?;
    let entries = parsed
        .as_array()
        .ok_or_else(|| anyhow!("expected a JSON array of items"))?;

    let mut ids = HashSet::with_capacity(entries.len());
    let mut items = Vec::with_capacity(entries.len());
    for (position, entry) in entries.iter().enumerate() {
        let raw_item = RawItem::deserialize(entry)
            .with_context(|| format!("invalid item at position {position}"))?;

        let Some(id) = id_to_string(&raw_item.id) else {
            log::warn!("skipping item at position {position}: id is not a string or number");
            continue;
        };
        if !ids.insert(id.clone()) {
            log::warn!("skipping duplicate item id {id}");
            continue;
        }

        let title = raw_item
            .title
            .map(|title| title.trim().to_owned())
            .filter(|title| !title.is_empty())
            .unwrap_or_else(|| format!("Article {id}"));
        let link = raw_item
            .link
            .map(|link| link.trim().to_owned())
            .filter(|link| !link.is_empty())
            .unwrap_or_else(|| "#".to_owned());

        items.push(Item {
            categories: normalize_categories(raw_item.categories.as_ref()),
            id,
            title,
            link,
        });
    }

    Ok(items)
}
