// Screenshot functionality
//
// Dumps the assembled RGBA frame as a PNG file under a per-ROM
// directory, with a timestamped file name.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Errors that can occur during screenshot operations
#[derive(Debug)]
pub enum ScreenshotError {
    /// I/O error
    Io(io::Error),

    /// PNG encoding error
    PngEncoding(png::EncodingError),
}

impl std::fmt::Display for ScreenshotError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScreenshotError::Io(e) => write!(f, "I/O error: {}", e),
            ScreenshotError::PngEncoding(e) => write!(f, "PNG encoding error: {}", e),
        }
    }
}

impl std::error::Error for ScreenshotError {}

impl From<io::Error> for ScreenshotError {
    fn from(e: io::Error) -> Self {
        ScreenshotError::Io(e)
    }
}

impl From<png::EncodingError> for ScreenshotError {
    fn from(e: png::EncodingError) -> Self {
        ScreenshotError::PngEncoding(e)
    }
}

/// Save an RGBA frame (256x240x4 bytes) as a PNG file
///
/// Returns the path of the written file.
pub fn save_screenshot(
    frame: &[u8],
    rom_path: Option<&Path>,
) -> Result<PathBuf, ScreenshotError> {
    let dir = screenshot_directory(rom_path);
    fs::create_dir_all(&dir)?;

    let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    let file_path = dir.join(format!("screenshot_{}.png", timestamp));

    write_png(&file_path, frame, 256, 240)?;

    log::info!("screenshot saved to {}", file_path.display());
    Ok(file_path)
}

/// Screenshot directory: screenshots/<rom_name>/
fn screenshot_directory(rom_path: Option<&Path>) -> PathBuf {
    let base = PathBuf::from("screenshots");
    match rom_path.and_then(|p| p.file_stem()) {
        Some(stem) => base.join(stem),
        None => base.join("default"),
    }
}

/// Encode RGBA data as a PNG file
fn write_png(path: &Path, data: &[u8], width: u32, height: u32) -> Result<(), ScreenshotError> {
    let file = fs::File::create(path)?;
    let writer = io::BufWriter::new(file);

    let mut encoder = png::Encoder::new(writer, width, height);
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);

    let mut png_writer = encoder.write_header()?;
    png_writer.write_image_data(data)?;

    Ok(())
}
