use rgb::RGB8;

/// Label value of a pixel not yet assigned to a zone. Zone ids start at 1.
pub const UNLABELED: u32 = 0;

/// Homogeneity test deciding whether a neighbor joins the growing zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegionRule {
    /// Neighbor joins when every channel differs from the pixel that
    /// discovered it by strictly less than `maxgap`.
    #[default]
    Adjacent,
    /// Neighbor joins when, on every channel, the zone's min/max envelope
    /// widened to include it stays strictly narrower than `maxgap`.
    /// Depends on visitation order.
    Envelope,
}

/// Per-channel min/max of the pixels labeled so far in one zone.
#[derive(Debug, Clone, Copy)]
struct Envelope {
    min: [u8; 3],
    max: [u8; 3],
}

impl Envelope {
    fn new(seed: RGB8) -> Self {
        let c = [seed.r, seed.g, seed.b];
        Self { min: c, max: c }
    }

    fn admits(&self, p: RGB8, maxgap: u32) -> bool {
        let c = [p.r, p.g, p.b];
        (0..3).all(|i| {
            let span = self.max[i].max(c[i]) - self.min[i].min(c[i]);
            (span as u32) < maxgap
        })
    }

    fn include(&mut self, p: RGB8) {
        let c = [p.r, p.g, p.b];
        for i in 0..3 {
            self.min[i] = self.min[i].min(c[i]);
            self.max[i] = self.max[i].max(c[i]);
        }
    }
}

#[inline]
fn within_gap(a: RGB8, b: RGB8, maxgap: u32) -> bool {
    (a.r.abs_diff(b.r) as u32) < maxgap
        && (a.g.abs_diff(b.g) as u32) < maxgap
        && (a.b.abs_diff(b.b) as u32) < maxgap
}

/// Zone label grid produced by region growth.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneLabels {
    labels: Vec<u32>,
    width: usize,
    height: usize,
    zone_count: u32,
}

impl ZoneLabels {
    /// Row-major labels, one per pixel, each in `1..=zone_count`.
    pub fn labels(&self) -> &[u32] {
        &self.labels
    }

    /// Label of the pixel at column `x`, row `y`.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` lies outside the labeled image.
    pub fn label_at(&self, x: usize, y: usize) -> u32 {
        assert!(
            x < self.width && y < self.height,
            "({x}, {y}) is outside a {}x{} label grid",
            self.width,
            self.height
        );
        self.labels[y * self.width + x]
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn zone_count(&self) -> u32 {
        self.zone_count
    }

    /// Floored per-channel mean of each zone. Entry `i` belongs to zone `i + 1`.
    ///
    /// # Panics
    ///
    /// Panics if `pixels` is not the buffer these labels were computed from
    /// (its length differs from the label count).
    pub fn zone_means(&self, pixels: &[RGB8]) -> Vec<RGB8> {
        assert_eq!(
            pixels.len(),
            self.labels.len(),
            "pixel buffer does not match the label grid"
        );

        let zones = self.zone_count as usize;
        let mut sums = vec![[0u64; 3]; zones];
        let mut counts = vec![0u64; zones];

        for (p, &label) in pixels.iter().zip(self.labels.iter()) {
            let z = (label - 1) as usize;
            sums[z][0] += p.r as u64;
            sums[z][1] += p.g as u64;
            sums[z][2] += p.b as u64;
            counts[z] += 1;
        }

        sums.iter()
            .zip(counts.iter())
            .map(|(s, &n)| {
                // Every zone owns at least its seed pixel.
                let n = n.max(1);
                RGB8::new((s[0] / n) as u8, (s[1] / n) as u8, (s[2] / n) as u8)
            })
            .collect()
    }

    /// Image where every pixel carries its zone's color.
    ///
    /// # Panics
    ///
    /// Panics if `zone_colors` holds fewer than `zone_count` entries.
    pub fn paint(&self, zone_colors: &[RGB8]) -> Vec<RGB8> {
        assert!(
            zone_colors.len() >= self.zone_count as usize,
            "{} zone colors for {} zones",
            zone_colors.len(),
            self.zone_count
        );
        self.labels
            .iter()
            .map(|&label| zone_colors[(label - 1) as usize])
            .collect()
    }
}

/// Label 4-connected zones in row-major seed order.
///
/// Growth uses an explicit work list, so zone size is bounded by memory and
/// not by stack depth. A pixel is labeled when pushed and never revisited.
///
/// # Panics
///
/// Panics if `pixels.len()` is not `width * height`, including when that
/// product overflows. The checked entry points report this as
/// [`AvatarError::DimensionMismatch`](crate::AvatarError::DimensionMismatch).
pub fn label_zones(
    pixels: &[RGB8],
    width: usize,
    height: usize,
    maxgap: u32,
    rule: RegionRule,
) -> ZoneLabels {
    assert_eq!(
        width.checked_mul(height),
        Some(pixels.len()),
        "pixel buffer length {} does not match dimensions {width}x{height}",
        pixels.len()
    );

    let mut labels = vec![UNLABELED; pixels.len()];
    let mut stack: Vec<usize> = Vec::new();
    let mut zone_count = 0u32;

    for seed in 0..pixels.len() {
        if labels[seed] != UNLABELED {
            continue;
        }
        zone_count += 1;
        grow(
            pixels,
            width,
            height,
            seed,
            zone_count,
            maxgap,
            rule,
            &mut labels,
            &mut stack,
        );
    }

    ZoneLabels {
        labels,
        width,
        height,
        zone_count,
    }
}

#[allow(clippy::too_many_arguments)]
fn grow(
    pixels: &[RGB8],
    width: usize,
    height: usize,
    seed: usize,
    label: u32,
    maxgap: u32,
    rule: RegionRule,
    labels: &mut [u32],
    stack: &mut Vec<usize>,
) {
    let mut envelope = Envelope::new(pixels[seed]);
    labels[seed] = label;
    stack.push(seed);

    while let Some(idx) = stack.pop() {
        let here = pixels[idx];
        let (x, y) = (idx % width, idx / width);

        // up, down, left, right
        let neighbors = [
            (y > 0).then(|| idx - width),
            (y + 1 < height).then(|| idx + width),
            (x > 0).then(|| idx - 1),
            (x + 1 < width).then(|| idx + 1),
        ];

        for n in neighbors.into_iter().flatten() {
            if labels[n] != UNLABELED {
                continue;
            }
            let candidate = pixels[n];
            let joins = match rule {
                RegionRule::Adjacent => within_gap(here, candidate, maxgap),
                RegionRule::Envelope => envelope.admits(candidate, maxgap),
            };
            if joins {
                labels[n] = label;
                envelope.include(candidate);
                stack.push(n);
            }
        }
    }
}

/// Region growth followed by per-zone averaging.
pub fn segment_pixels(
    pixels: &[RGB8],
    width: usize,
    height: usize,
    maxgap: u32,
    rule: RegionRule,
) -> Vec<RGB8> {
    let zones = label_zones(pixels, width, height, maxgap, rule);
    let means = zones.zone_means(pixels);
    log::debug!(
        "region growth: {}x{} image, maxgap {maxgap}, {rule:?} rule, {} zones",
        width,
        height,
        zones.zone_count()
    );
    zones.paint(&means)
}
