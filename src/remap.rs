use std::collections::{BTreeMap, BTreeSet};

use rgb::RGB8;

use crate::color::key;
use crate::palette::Palette;

/// Mapping from every distinct source color to its replacement.
pub type ColorMap = BTreeMap<[u8; 3], RGB8>;

/// Distinct colors of an image, in ascending (r, g, b) order.
pub fn distinct_colors(pixels: &[RGB8]) -> BTreeSet<[u8; 3]> {
    pixels.iter().map(|&p| key(p)).collect()
}

/// Map each distinct source color to its nearest palette entry.
///
/// Ties go to the lowest palette index. With an empty palette every color
/// maps to itself.
pub fn build_color_map(distinct: &BTreeSet<[u8; 3]>, palette: &Palette) -> ColorMap {
    distinct
        .iter()
        .map(|&[r, g, b]| {
            let original = RGB8::new(r, g, b);
            let target = palette.nearest_color(original).unwrap_or(original);
            ([r, g, b], target)
        })
        .collect()
}

/// Recolor pixels through a color map. Colors missing from the map are kept.
pub fn apply_color_map(pixels: &[RGB8], map: &ColorMap) -> Vec<RGB8> {
    pixels
        .iter()
        .map(|&p| map.get(&key(p)).copied().unwrap_or(p))
        .collect()
}

/// Replace every pixel with its nearest palette entry.
pub fn remap_pixels(pixels: &[RGB8], palette: &Palette) -> Vec<RGB8> {
    pixels
        .iter()
        .map(|&p| palette.nearest_color(p).unwrap_or(p))
        .collect()
}

/// Number of distinct colors in a pixel buffer.
pub fn count_colors(pixels: &[RGB8]) -> usize {
    distinct_colors(pixels).len()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gray(v: u8) -> RGB8 {
        RGB8::new(v, v, v)
    }

    #[test]
    fn distinct_colors_deduplicates_and_sorts() {
        let pixels = [gray(9), RGB8::new(1, 2, 3), gray(9), RGB8::new(1, 0, 0)];
        let distinct: Vec<_> = distinct_colors(&pixels).into_iter().collect();
        assert_eq!(distinct, vec![[1, 0, 0], [1, 2, 3], [9, 9, 9]]);
    }

    #[test]
    fn color_map_covers_every_distinct_color() {
        let pixels = [gray(0), gray(20), gray(250), gray(255), gray(20)];
        let palette = Palette::new(vec![gray(10), gray(252)]);
        let distinct = distinct_colors(&pixels);
        let map = build_color_map(&distinct, &palette);

        assert_eq!(map.len(), distinct.len());
        assert_eq!(map[&[0, 0, 0]], gray(10));
        assert_eq!(map[&[20, 20, 20]], gray(10));
        assert_eq!(map[&[250, 250, 250]], gray(252));
        assert_eq!(map[&[255, 255, 255]], gray(252));
    }

    #[test]
    fn mapped_and_direct_remap_agree() {
        let pixels: Vec<RGB8> = (0..=255u8)
            .step_by(5)
            .map(|v| RGB8::new(v, 255 - v, v / 2))
            .collect();
        let palette = Palette::new(vec![gray(0), gray(128), gray(255), RGB8::new(255, 0, 0)]);
        let map = build_color_map(&distinct_colors(&pixels), &palette);
        assert_eq!(apply_color_map(&pixels, &map), remap_pixels(&pixels, &palette));
    }

    #[test]
    fn empty_palette_is_identity() {
        let pixels = [gray(3), gray(4)];
        assert_eq!(remap_pixels(&pixels, &Palette::new(Vec::new())), pixels.to_vec());
    }

    #[test]
    fn count_colors_basic() {
        assert_eq!(count_colors(&[]), 0);
        assert_eq!(count_colors(&[gray(1)]), 1);
        assert_eq!(count_colors(&[gray(1), gray(1), gray(2)]), 2);
    }
}
