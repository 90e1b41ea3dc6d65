use std::collections::BTreeSet;

use rgb::RGB8;

use crate::color::WorkingColor;
use crate::palette::Palette;
use crate::remap::{apply_color_map, build_color_map, distinct_colors};

/// Indices `(i, j)`, `i < j`, of the closest pair of clusters.
///
/// All pairs are compared in ascending order and only a strictly smaller
/// distance replaces the current best, so the first pair found wins ties.
pub fn closest_pair(clusters: &[WorkingColor]) -> Option<(usize, usize)> {
    let mut best: Option<(usize, usize, f64)> = None;
    for i in 0..clusters.len() {
        for j in (i + 1)..clusters.len() {
            let d = clusters[i].distance_sq(clusters[j]);
            match best {
                Some((_, _, best_dist)) if d >= best_dist => {}
                _ => best = Some((i, j, d)),
            }
        }
    }
    best.map(|(i, j, _)| (i, j))
}

/// Merge the two closest clusters into their unrounded mean.
///
/// The pair is removed and the merged cluster appended at the end.
/// Returns `false` when fewer than two clusters remain.
pub fn merge_closest_pair(clusters: &mut Vec<WorkingColor>) -> bool {
    let Some((i, j)) = closest_pair(clusters) else {
        return false;
    };
    // j > i, so removing j first keeps i in place.
    let b = clusters.remove(j);
    let a = clusters.remove(i);
    let merged = a.midpoint(b);
    log::trace!("merge {a:?} + {b:?} -> {merged:?}");
    clusters.push(merged);
    true
}

/// Agglomerate the distinct colors down to `colors_to_keep` clusters and
/// round them into a palette.
///
/// With `colors_to_keep` at or above the number of distinct colors no merge
/// happens and the palette is the distinct colors themselves.
pub fn cluster_palette(distinct: &BTreeSet<[u8; 3]>, colors_to_keep: usize) -> Palette {
    let mut clusters: Vec<WorkingColor> = distinct
        .iter()
        .map(|&[r, g, b]| WorkingColor::from(RGB8::new(r, g, b)))
        .collect();

    let target = colors_to_keep.max(1);
    let mut merges = 0usize;
    while clusters.len() > target && merge_closest_pair(&mut clusters) {
        merges += 1;
    }

    log::debug!(
        "clustering: {} distinct colors, {merges} merges, {} clusters kept",
        distinct.len(),
        clusters.len()
    );

    Palette::from_centroids(&clusters)
}

/// Hierarchical clustering followed by nearest-cluster recoloring.
pub fn cluster_pixels(pixels: &[RGB8], colors_to_keep: usize) -> Vec<RGB8> {
    let distinct = distinct_colors(pixels);
    if colors_to_keep >= distinct.len() {
        log::debug!(
            "clustering: {} distinct colors fit in {colors_to_keep}, image unchanged",
            distinct.len()
        );
        return pixels.to_vec();
    }

    let palette = cluster_palette(&distinct, colors_to_keep);
    let map = build_color_map(&distinct, &palette);
    apply_color_map(pixels, &map)
}
