use rgb::RGB8;

use crate::color::{WorkingColor, distance_sq};

/// An ordered set of representative colors.
///
/// Entry order is significant: nearest-color lookups scan in ascending index
/// order and keep the first entry at the minimum distance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    entries: Vec<RGB8>,
}

impl Palette {
    pub fn new(entries: Vec<RGB8>) -> Self {
        Self { entries }
    }

    /// Build a palette by rounding working centroids, keeping their order.
    pub fn from_centroids(centroids: &[WorkingColor]) -> Self {
        Self {
            entries: centroids.iter().map(|c| c.to_rgb8()).collect(),
        }
    }

    pub fn entries(&self) -> &[RGB8] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Index of the closest entry (brute force). Ties go to the lowest index.
    ///
    /// Returns `None` only for an empty palette.
    pub fn nearest(&self, color: RGB8) -> Option<usize> {
        let mut best: Option<(usize, u32)> = None;
        for (i, &entry) in self.entries.iter().enumerate() {
            let d = distance_sq(color, entry);
            match best {
                Some((_, best_dist)) if d >= best_dist => {}
                _ => best = Some((i, d)),
            }
        }
        best.map(|(i, _)| i)
    }

    /// The closest entry itself.
    pub fn nearest_color(&self, color: RGB8) -> Option<RGB8> {
        self.nearest(color).map(|i| self.entries[i])
    }
}
