use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Color mapping: post type → Color32
// ---------------------------------------------------------------------------

/// Maps each post type to a distinct colour. Keys are coloured in sorted
/// order, so a type keeps its colour whatever the ranking.
#[derive(Debug, Clone, Default)]
pub struct ColorMap {
    mapping: BTreeMap<String, Color32>,
}

impl ColorMap {
    pub fn new<'a>(keys: impl IntoIterator<Item = &'a str>) -> Self {
        let mut keys: Vec<&str> = keys.into_iter().collect();
        keys.sort_unstable();
        keys.dedup();
        let palette = generate_palette(keys.len());
        let mapping = keys
            .into_iter()
            .zip(palette)
            .map(|(k, c)| (k.to_owned(), c))
            .collect();
        Self { mapping }
    }

    /// Colour for `key`, grey when it was not part of the map.
    pub fn color_for(&self, key: &str) -> Color32 {
        self.mapping.get(key).copied().unwrap_or(Color32::GRAY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_has_requested_size() {
        assert!(generate_palette(0).is_empty());
        let p = generate_palette(4);
        assert_eq!(p.len(), 4);
        assert_ne!(p[0], p[1]);
    }

    #[test]
    fn colours_do_not_depend_on_input_order() {
        let a = ColorMap::new(["Video", "Photo", "Link"]);
        let b = ColorMap::new(["Link", "Video", "Photo", "Photo"]);
        assert_eq!(a.mapping.len(), 3);
        assert_eq!(b.mapping.len(), 3);
        for key in ["Link", "Photo", "Video"] {
            assert_eq!(a.color_for(key), b.color_for(key));
        }
        assert_eq!(a.color_for("Album"), Color32::GRAY);
    }
}
