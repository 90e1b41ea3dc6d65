use rgb::RGB8;

use crate::color::WorkingColor;
use crate::palette::Palette;
use crate::remap::remap_pixels;

/// A running-mean centroid of the online quantizer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Centroid {
    pub color: WorkingColor,
    /// Number of pixels absorbed so far.
    pub weight: u64,
}

/// `k` centroids evenly spaced along the gray diagonal, all with weight 0.
///
/// Centroid `i` has every channel at `255 * i / (k - 1)`. `k` must be at least 2.
pub fn seed_centroids(k: usize) -> Vec<Centroid> {
    debug_assert!(k >= 2);
    let span = (k - 1) as f64;
    (0..k)
        .map(|i| Centroid {
            color: WorkingColor::gray(255.0 * i as f64 / span),
            weight: 0,
        })
        .collect()
}

/// Index of the centroid closest to `color`. Ties go to the lowest index.
fn nearest_centroid(centroids: &[Centroid], color: WorkingColor) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, c) in centroids.iter().enumerate() {
        let d = color.distance_sq(c.color);
        match best {
            Some((_, best_dist)) if d >= best_dist => {}
            _ => best = Some((i, d)),
        }
    }
    best.map(|(i, _)| i)
}

/// Absorb one pixel into its nearest centroid. Returns the centroid index.
pub fn absorb_pixel(centroids: &mut [Centroid], pixel: RGB8) -> Option<usize> {
    let sample = WorkingColor::from(pixel);
    let idx = nearest_centroid(centroids, sample)?;
    let c = &mut centroids[idx];
    c.color = c.color.absorb(sample, c.weight);
    c.weight += 1;
    Some(idx)
}

/// Single row-major pass over the pixels, then rounding.
///
/// Earlier assignments are never revisited, so the result depends on scan order.
pub fn train_palette(pixels: &[RGB8], k: usize) -> Palette {
    if k > pixels.len() {
        log::warn!(
            "greedy quantization: {k} colors requested for {} pixels, at most {} can be used",
            pixels.len(),
            pixels.len()
        );
    }
    let mut centroids = seed_centroids(k);
    for &pixel in pixels {
        absorb_pixel(&mut centroids, pixel);
    }

    let unused = centroids.iter().filter(|c| c.weight == 0).count();
    log::debug!(
        "greedy quantization: {} pixels, {k} centroids, {unused} never used",
        pixels.len()
    );

    let colors: Vec<WorkingColor> = centroids.iter().map(|c| c.color).collect();
    Palette::from_centroids(&colors)
}

/// Greedy online quantization to `k` colors.
pub fn greedy_pixels(pixels: &[RGB8], k: usize) -> Vec<RGB8> {
    let palette = train_palette(pixels, k);
    remap_pixels(pixels, &palette)
}
