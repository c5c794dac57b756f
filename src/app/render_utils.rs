use eframe::egui::Color32;

const BASE_NODE_RADIUS: f32 = 10.0;
const MAX_DEGREE_BONUS: f32 = 10.0;
const DEGREE_BONUS: f32 = 1.5;
const COLLISION_PADDING: f32 = 4.0;

pub(super) const UNCATEGORIZED: &str = "uncategorized";
pub(super) const BACKGROUND: Color32 = Color32::from_rgb(19, 23, 29);
pub(super) const HOVER_FILL: Color32 = Color32::from_rgb(249, 115, 22);
pub(super) const TAG_MATCH_EDGE: Color32 = Color32::from_rgb(245, 158, 11);
pub(super) const TITLE_MATCH_RING: Color32 = Color32::from_rgba_premultiplied(225, 104, 20, 230);
pub(super) const NODE_OUTLINE: Color32 = Color32::from_rgba_premultiplied(11, 11, 11, 190);

/// Drawn (and picked) radius of a node with `degree` incident edges.
pub(super) fn node_radius(degree: usize) -> f32 {
    BASE_NODE_RADIUS + (degree as f32 * DEGREE_BONUS).min(MAX_DEGREE_BONUS)
}

pub(super) fn collision_radius(degree: usize) -> f32 {
    node_radius(degree) + COLLISION_PADDING
}

/// Hue in `0..360` from a 31-multiplier hash over UTF-16 code units.
pub(super) fn category_hue(category: &str) -> u32 {
    let hash = category
        .encode_utf16()
        .fold(0i32, |hash, unit| {
            hash.wrapping_shl(5)
                .wrapping_sub(hash)
                .wrapping_add(i32::from(unit))
        });
    hash.unsigned_abs() % 360
}

pub(super) fn category_color(category: Option<&str>) -> Color32 {
    let category = category.filter(|tag| !tag.is_empty()).unwrap_or(UNCATEGORIZED);
    hsl_color(category_hue(category) as f32, 0.70, 0.55)
}

pub(super) fn hsl_color(hue: f32, saturation: f32, lightness: f32) -> Color32 {
    let hue = hue.rem_euclid(360.0) / 60.0;
    let chroma = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
    let second = chroma * (1.0 - ((hue % 2.0) - 1.0).abs());
    let (r, g, b) = match hue as u32 {
        0 => (chroma, second, 0.0),
        1 => (second, chroma, 0.0),
        2 => (0.0, chroma, second),
        3 => (0.0, second, chroma),
        4 => (second, 0.0, chroma),
        _ => (chroma, 0.0, second),
    };
    let lift = lightness - chroma / 2.0;
    let channel = |value: f32| ((value + lift).clamp(0.0, 1.0) * 255.0).round() as u8;
    Color32::from_rgb(channel(r), channel(g), channel(b))
}

/// Stroke colour for the three weight bands used when no tag highlight is active.
pub(super) fn weight_band_color(weight: usize) -> Color32 {
    let alpha = 64;
    match weight {
        weight if weight >= 3 => Color32::from_rgba_unmultiplied(234, 179, 8, alpha),
        2 => Color32::from_rgba_unmultiplied(125, 211, 252, alpha),
        _ => Color32::from_rgba_unmultiplied(147, 197, 253, alpha),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_radius_caps_degree_bonus() {
        assert_eq!(node_radius(0), 10.0);
        assert_eq!(node_radius(2), 13.0);
        assert_eq!(node_radius(50), 20.0);
        assert_eq!(collision_radius(0), 14.0);
    }

    #[test]
    fn category_hue_matches_known_values() {
        assert_eq!(category_hue("y"), 121);
        assert_eq!(category_hue("bone"), 300);
        assert_eq!(category_hue("microgravity"), 166);
    }

    #[test]
    fn category_color_is_stable() {
        assert_eq!(category_color(Some("bone")), Color32::from_rgb(221, 60, 221));
        assert_eq!(category_color(Some("bone")), category_color(Some("bone")));
        assert_ne!(category_color(Some("bone")), category_color(Some("mice")));
    }

    #[test]
    fn missing_category_uses_sentinel_color() {
        assert_eq!(category_color(None), category_color(Some(UNCATEGORIZED)));
        assert_eq!(category_color(Some("")), category_color(Some(UNCATEGORIZED)));
    }

    #[test]
    fn weight_bands_are_distinct() {
        assert_ne!(weight_band_color(1), weight_band_color(2));
        assert_ne!(weight_band_color(2), weight_band_color(3));
        assert_eq!(weight_band_color(3), weight_band_color(7));
    }
}
