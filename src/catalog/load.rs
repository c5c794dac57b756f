use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};

use super::item::Catalog;
use super::parse::parse_items;

pub fn load_catalog(path: impl AsRef<Path>) -> Result<Catalog> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read item list from {}", path.display()))?;

    let items = parse_items(&raw)
        .with_context(|| format!("failed to parse item list in {}", path.display()))?;

    if items.is_empty() {
        return Err(anyhow!("item list in {} contains no items", path.display()));
    }

    log::info!("loaded {} items from {}", items.len(), path.display());
    Ok(Catalog::new(items))
}
