use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tinyboy_gb::{GameBoy, GameBoyConfig, SCREEN_HEIGHT, SCREEN_WIDTH};

const USAGE: &str = "Usage: gb_run <rom_path> <out_pgm_path> [frames]";

fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let rom_path: PathBuf = args.next().map(PathBuf::from).context(USAGE)?;
    let out_path: PathBuf = args.next().map(PathBuf::from).context(USAGE)?;
    let frames: u32 = match args.next() {
        Some(frames) => frames
            .parse()
            .with_context(|| format!("invalid frame count '{frames}'"))?,
        None => 60,
    };

    let rom = std::fs::read(&rom_path)
        .with_context(|| format!("failed to read ROM '{}'", rom_path.display()))?;

    let config = GameBoyConfig::from_env()?;
    let mut gb = GameBoy::with_config(config);
    gb.load_rom(&rom);

    for frame in 0..frames {
        gb.step_frame()
            .with_context(|| format!("emulation stopped during frame {frame}"))?;
    }
    log::info!("ran {frames} frames ({} cycles)", gb.cycles());

    write_pgm(&out_path, gb.frame_buffer())
        .with_context(|| format!("failed to write '{}'", out_path.display()))?;
    Ok(())
}

/// Binary greyscale: colour 0 is white, colour 1 is black.
fn write_pgm(path: &Path, frame: &[u8]) -> Result<()> {
    let mut file = std::io::BufWriter::new(std::fs::File::create(path)?);
    write!(file, "P5\n{SCREEN_WIDTH} {SCREEN_HEIGHT}\n255\n")?;
    let pixels: Vec<u8> = frame
        .iter()
        .map(|&pixel| if pixel == 0 { 255 } else { 0 })
        .collect();
    file.write_all(&pixels)?;
    file.flush()?;
    Ok(())
}
