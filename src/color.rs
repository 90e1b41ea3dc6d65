use rgb::RGB8;

/// Squared Euclidean distance between two byte colors.
///
/// Only relative ordering matters to the callers, so no square root is taken.
#[inline]
pub fn distance_sq(a: RGB8, b: RGB8) -> u32 {
    let dr = a.r.abs_diff(b.r) as u32;
    let dg = a.g.abs_diff(b.g) as u32;
    let db = a.b.abs_diff(b.b) as u32;
    dr * dr + dg * dg + db * db
}

/// Lookup key for a byte color. Ordered by (r, g, b).
#[inline]
pub fn key(c: RGB8) -> [u8; 3] {
    [c.r, c.g, c.b]
}

/// Real-valued color used while averaging, before rounding back to bytes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorkingColor {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl WorkingColor {
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// All three channels set to `v`.
    pub const fn gray(v: f64) -> Self {
        Self { r: v, g: v, b: v }
    }

    pub fn distance_sq(self, other: Self) -> f64 {
        let dr = self.r - other.r;
        let dg = self.g - other.g;
        let db = self.b - other.b;
        dr * dr + dg * dg + db * db
    }

    /// Element-wise arithmetic mean of two colors.
    pub fn midpoint(self, other: Self) -> Self {
        Self {
            r: (self.r + other.r) / 2.0,
            g: (self.g + other.g) / 2.0,
            b: (self.b + other.b) / 2.0,
        }
    }

    /// Weighted running mean: `(weight * self + sample) / (weight + 1)`.
    pub fn absorb(self, sample: Self, weight: u64) -> Self {
        let w = weight as f64;
        Self {
            r: (w * self.r + sample.r) / (w + 1.0),
            g: (w * self.g + sample.g) / (w + 1.0),
            b: (w * self.b + sample.b) / (w + 1.0),
        }
    }

    /// Round each channel half-to-even and clamp into byte range.
    pub fn to_rgb8(self) -> RGB8 {
        RGB8 {
            r: round_channel(self.r),
            g: round_channel(self.g),
            b: round_channel(self.b),
        }
    }
}

impl From<RGB8> for WorkingColor {
    fn from(c: RGB8) -> Self {
        Self::new(c.r as f64, c.g as f64, c.b as f64)
    }
}

#[inline]
fn round_channel(v: f64) -> u8 {
    v.round_ties_even().clamp(0.0, 255.0) as u8
}
