// CLI entry for picture2avatar
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueHint};
use image::RgbImage;
use log::info;
use picture2avatar::Algorithm;
use rgb::RGB8;

#[derive(Parser, Debug)]
#[command(
    name = "picture2avatar",
    version,
    about = "Process a photograph to extract a simple avatar."
)]
struct Cli {
    /// Path to the photograph to process
    #[arg(value_hint = ValueHint::FilePath)]
    input: PathBuf,

    /// Algorithm to apply: pre, grow, clu or greed
    #[arg(value_parser = parse_algorithm)]
    algorithm: Algorithm,

    /// Path to store the resulting picture in (defaults to <input>_avatar.png)
    #[arg(short = 'o', long = "output", value_hint = ValueHint::FilePath)]
    output: Option<PathBuf>,

    /// Parameter given to the algorithm (bits kept, max gap, or number of colors)
    #[arg(short = 'p', long = "param", allow_negative_numbers = true)]
    param: Option<i64>,
}

fn parse_algorithm(s: &str) -> Result<Algorithm, String> {
    s.parse().map_err(|e: picture2avatar::AvatarError| e.to_string())
}

fn default_output(input: &Path) -> PathBuf {
    let mut name = input.file_stem().unwrap_or_default().to_os_string();
    name.push("_avatar.png");
    input.with_file_name(name)
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let output = run(cli)?;
    info!("Avatar saved to {}", output.display());
    Ok(())
}

/// Load `cli.input`, apply the chosen algorithm and write the avatar.
/// Returns the path the avatar was written to.
fn run(cli: Cli) -> Result<PathBuf> {
    info!("Using input file: {}", cli.input.display());
    let img = image::open(&cli.input)
        .with_context(|| format!("The picture {} could not be loaded", cli.input.display()))?
        .to_rgb8();
    let (width, height) = (img.width() as usize, img.height() as usize);

    let pixels: Vec<RGB8> = img
        .pixels()
        .map(|p| RGB8::new(p.0[0], p.0[1], p.0[2]))
        .collect();

    let param = cli.param.unwrap_or_else(|| cli.algorithm.default_param());
    info!("Applying {} with parameter {param} to a {width}x{height} image", cli.algorithm);
    let avatar = cli
        .algorithm
        .apply(&pixels, width, height, Some(param))
        .with_context(|| format!("{} failed", cli.algorithm))?;

    let raw: Vec<u8> = avatar.iter().flat_map(|p| [p.r, p.g, p.b]).collect();
    let out = RgbImage::from_raw(img.width(), img.height(), raw)
        .context("result does not match the input dimensions")?;

    let output = cli.output.unwrap_or_else(|| default_output(&cli.input));
    out.save(&output)
        .with_context(|| format!("could not save {}", output.display()))?;

    Ok(output)
}
