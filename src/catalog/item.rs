use std::collections::BTreeSet;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Item {
    pub id: String,
    pub title: String,
    pub link: String,
    /// Lowercase, trimmed, deduplicated; order is the order the source listed them.
    pub categories: Vec<String>,
}

impl Item {
    pub fn has_category(&self, category: &str) -> bool {
        self.categories.iter().any(|tag| tag == category)
    }
}

#[derive(Clone, Debug, Default)]
pub struct Catalog {
    pub items: Vec<Item>,
}

impl Catalog {
    pub fn new(items: Vec<Item>) -> Self {
        Self { items }
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Sorted distinct set of every category in the catalog.
    pub fn categories(&self) -> Vec<String> {
        self.items
            .iter()
            .flat_map(|item| item.categories.iter().cloned())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}
