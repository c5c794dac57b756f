use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

pub fn normalize_tag(raw: &str) -> Option<String> {
    let tag = raw.trim().to_lowercase();
    if tag.is_empty() { None } else { Some(tag) }
}

pub fn short_title(title: &str, max_chars: usize) -> String {
    if title.chars().count() <= max_chars {
        return title.to_owned();
    }

    let mut short = title
        .chars()
        .take(max_chars.saturating_sub(1))
        .collect::<String>();
    short.push('…');
    short
}

pub fn stable_pair(id: &str) -> (f32, f32) {
    let mut hasher = DefaultHasher::new();
    id.hash(&mut hasher);
    let hash = hasher.finish();

    let x = ((hash & 0xffff_ffff) as f64 / u32::MAX as f64) as f32;
    let y = (((hash >> 32) & 0xffff_ffff) as f64 / u32::MAX as f64) as f32;
    ((x * 2.0) - 1.0, (y * 2.0) - 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_tag_trims_and_lowercases() {
        assert_eq!(normalize_tag("  MicroGravity "), Some("microgravity".to_owned()));
        assert_eq!(normalize_tag("   "), None);
    }

    #[test]
    fn short_title_keeps_short_titles() {
        assert_eq!(short_title("Mice", 10), "Mice");
        assert_eq!(short_title("Magnesium transport", 6), "Magne…");
    }

    #[test]
    fn stable_pair_is_repeatable_and_bounded() {
        let first = stable_pair("article-42");
        assert_eq!(first, stable_pair("article-42"));
        assert!((-1.0..=1.0).contains(&first.0));
        assert!((-1.0..=1.0).contains(&first.1));
    }
}
