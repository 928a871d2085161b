use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "smile",
    version,
    about = "Textured background with a smile sprite walking a scripted path"
)]
pub struct Cli {
    /// Directory with `textured_quad.wgsl`, `bg.png` and/or `smile.png` overrides.
    #[arg(long, value_name = "DIR", env = "SMILE_ASSETS")]
    pub assets: Option<PathBuf>,

    /// Initial window width in logical pixels.
    #[arg(long, value_name = "PX", default_value_t = 480.0, value_parser = parse_extent)]
    pub width: f64,

    /// Initial window height in logical pixels.
    #[arg(long, value_name = "PX", default_value_t = 600.0, value_parser = parse_extent)]
    pub height: f64,

    /// Log filter in env_logger syntax; overrides `RUST_LOG`.
    #[arg(long, value_name = "FILTER")]
    pub log: Option<String>,

    /// Start the animation without waiting for a trigger.
    #[arg(long)]
    pub autostart: bool,
}

pub fn parse() -> Cli {
    Cli::parse()
}

pub fn parse_extent(value: &str) -> Result<f64, String> {
    let trimmed = value.trim();
    let px: f64 = trimmed
        .parse()
        .map_err(|_| format!("invalid size '{trimmed}'; expected a number of pixels"))?;

    if !px.is_finite() || px < 1.0 {
        return Err(format!("size must be at least 1 pixel (got {trimmed})"));
    }
    Ok(px)
}
