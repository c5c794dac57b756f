use std::collections::HashSet;

use crate::catalog::Item;

#[derive(Clone, Debug, PartialEq, Eq)]
pub(in crate::app) struct Link {
    pub(in crate::app) source: String,
    pub(in crate::app) target: String,
    pub(in crate::app) weight: usize,
    /// Shared tags in the order the source item lists them.
    pub(in crate::app) shared: Vec<String>,
}

fn countable_tags<'a>(item: &'a Item, allowed_tags: Option<&HashSet<String>>) -> Vec<&'a str> {
    item.categories
        .iter()
        .filter(|tag| allowed_tags.is_none_or(|allowed| allowed.contains(tag.as_str())))
        .map(String::as_str)
        .collect()
}

/// Links every pair of items sharing at least `min_shared` tags.
///
/// When `allowed_tags` is given only those tags count towards the shared set, so a
/// single-category filter yields weights along that one dimension. Quadratic in the
/// number of items; tag lists are short.
pub(in crate::app) fn build_links(
    items: &[Item],
    min_shared: usize,
    allowed_tags: Option<&HashSet<String>>,
) -> Vec<Link> {
    let min_shared = min_shared.max(1);
    let tags = items
        .iter()
        .map(|item| countable_tags(item, allowed_tags))
        .collect::<Vec<_>>();

    let mut links = Vec::new();
    for i in 0..items.len() {
        if tags[i].len() < min_shared {
            continue;
        }

        for j in (i + 1)..items.len() {
            let shared = tags[i]
                .iter()
                .filter(|tag| tags[j].contains(*tag))
                .map(|tag| (*tag).to_owned())
                .collect::<Vec<_>>();

            if shared.len() >= min_shared {
                links.push(Link {
                    source: items[i].id.clone(),
                    target: items[j].id.clone(),
                    weight: shared.len(),
                    shared,
                });
            }
        }
    }

    links
}
