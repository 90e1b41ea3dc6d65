#![forbid(unsafe_code)]

//! Turn a photograph into a stylized low-color avatar.
//!
//! Every transform takes a row-major RGB buffer with its dimensions and
//! returns a new buffer of the same size. Inputs are never modified.

pub mod cluster;
pub mod color;
pub mod error;
pub mod greedy;
pub mod palette;
pub mod precision;
pub mod remap;
pub mod segment;

pub use error::AvatarError;
pub use palette::Palette;
pub use segment::RegionRule;

use std::fmt;
use std::str::FromStr;

use rgb::RGB8;

/// Keep only the `keep_bits` most significant bits of each channel (1..=8).
pub fn reduce_precision(
    pixels: &[RGB8],
    width: usize,
    height: usize,
    keep_bits: u32,
) -> Result<Vec<RGB8>, AvatarError> {
    if !(1..=8).contains(&keep_bits) {
        return Err(AvatarError::InvalidKeepBits(keep_bits as i64));
    }
    validate_dimensions(pixels.len(), width, height)?;
    Ok(precision::mask_pixels(pixels, keep_bits))
}

/// Region-growth segmentation with the adjacent-difference rule.
///
/// Neighbors join a zone when every channel differs from the pixel that
/// reached them by strictly less than `maxgap`. Each zone is painted with
/// its floored mean color.
pub fn segment(
    pixels: &[RGB8],
    width: usize,
    height: usize,
    maxgap: i32,
) -> Result<Vec<RGB8>, AvatarError> {
    segment_with_rule(pixels, width, height, maxgap, RegionRule::Adjacent)
}

/// Region-growth segmentation with an explicit homogeneity rule.
pub fn segment_with_rule(
    pixels: &[RGB8],
    width: usize,
    height: usize,
    maxgap: i32,
    rule: RegionRule,
) -> Result<Vec<RGB8>, AvatarError> {
    let maxgap = u32::try_from(maxgap).map_err(|_| AvatarError::InvalidMaxGap(maxgap as i64))?;
    validate_dimensions(pixels.len(), width, height)?;
    if pixels.is_empty() {
        return Ok(Vec::new());
    }
    Ok(segment::segment_pixels(pixels, width, height, maxgap, rule))
}

/// Agglomerative clustering of the distinct colors down to `colors_to_keep`.
///
/// Returns the input unchanged when it already has no more than
/// `colors_to_keep` distinct colors. Cost grows cubically with the number
/// of distinct colors.
pub fn quantize_clustering(
    pixels: &[RGB8],
    width: usize,
    height: usize,
    colors_to_keep: u32,
) -> Result<Vec<RGB8>, AvatarError> {
    validate_colors_to_keep(colors_to_keep, 1)?;
    validate_dimensions(pixels.len(), width, height)?;
    Ok(cluster::cluster_pixels(pixels, colors_to_keep as usize))
}

/// Single-pass greedy quantization to `colors_to_keep` colors (at least 2).
///
/// Allocates one centroid per requested color up front and costs
/// `O(pixels * colors_to_keep)` over the two passes, so a `colors_to_keep`
/// far above the pixel count wastes memory and time. Only as many colors as
/// there are pixels can ever be used; larger requests are logged as a warning.
pub fn quantize_greedy(
    pixels: &[RGB8],
    width: usize,
    height: usize,
    colors_to_keep: u32,
) -> Result<Vec<RGB8>, AvatarError> {
    validate_colors_to_keep(colors_to_keep, 2)?;
    validate_dimensions(pixels.len(), width, height)?;
    if pixels.is_empty() {
        return Ok(Vec::new());
    }
    Ok(greedy::greedy_pixels(pixels, colors_to_keep as usize))
}

/// The available transforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    /// Bit-depth reduction (`pre`).
    Precision,
    /// Region growth segmentation (`grow`).
    RegionGrowth,
    /// Hierarchical color clustering (`clu`).
    Clustering,
    /// Greedy online quantization (`greed`).
    Greedy,
}

impl Algorithm {
    pub const ALL: [Algorithm; 4] = [
        Self::Precision,
        Self::RegionGrowth,
        Self::Clustering,
        Self::Greedy,
    ];

    /// Short name accepted on the command line.
    pub fn name(self) -> &'static str {
        match self {
            Self::Precision => "pre",
            Self::RegionGrowth => "grow",
            Self::Clustering => "clu",
            Self::Greedy => "greed",
        }
    }

    /// Parameter used when none is given.
    pub fn default_param(self) -> i64 {
        match self {
            Self::Precision => 1,
            Self::RegionGrowth => 25,
            Self::Clustering => 15,
            Self::Greedy => 10,
        }
    }

    /// Run this transform with `param`, or the default parameter if `None`.
    pub fn apply(
        self,
        pixels: &[RGB8],
        width: usize,
        height: usize,
        param: Option<i64>,
    ) -> Result<Vec<RGB8>, AvatarError> {
        let param = param.unwrap_or_else(|| self.default_param());
        log::debug!("applying {} with parameter {param}", self.name());
        match self {
            Self::Precision => {
                let keep_bits =
                    u32::try_from(param).map_err(|_| AvatarError::InvalidKeepBits(param))?;
                reduce_precision(pixels, width, height, keep_bits)
            }
            Self::RegionGrowth => {
                let maxgap = i32::try_from(param).map_err(|_| AvatarError::InvalidMaxGap(param))?;
                segment(pixels, width, height, maxgap)
            }
            Self::Clustering => {
                let k = colors_param(param, 1)?;
                quantize_clustering(pixels, width, height, k)
            }
            Self::Greedy => {
                let k = colors_param(param, 2)?;
                quantize_greedy(pixels, width, height, k)
            }
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = AvatarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pre" | "precision" => Ok(Self::Precision),
            "grow" | "region-growth" => Ok(Self::RegionGrowth),
            "clu" | "clustering" => Ok(Self::Clustering),
            "greed" | "greedy" => Ok(Self::Greedy),
            _ => Err(AvatarError::UnsupportedAlgorithm(s.to_string())),
        }
    }
}

fn colors_param(param: i64, min: u32) -> Result<u32, AvatarError> {
    u32::try_from(param).map_err(|_| AvatarError::InvalidColorsToKeep { min, got: param })
}

fn validate_colors_to_keep(colors_to_keep: u32, min: u32) -> Result<(), AvatarError> {
    if colors_to_keep < min {
        return Err(AvatarError::InvalidColorsToKeep {
            min,
            got: colors_to_keep as i64,
        });
    }
    Ok(())
}

fn validate_dimensions(pixel_count: usize, width: usize, height: usize) -> Result<(), AvatarError> {
    if width.checked_mul(height) != Some(pixel_count) {
        return Err(AvatarError::DimensionMismatch {
            len: pixel_count,
            width,
            height,
        });
    }
    Ok(())
}
