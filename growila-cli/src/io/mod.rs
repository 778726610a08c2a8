//! Image input and mask output, dispatched on the file extension.

mod fits;
mod tiff;

use std::path::Path;

use anyhow::{bail, Result};
use common::Buffer2;

/// Container format of an image file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    /// `.fits`, `.fit`, `.fts`; the index selects an HDU.
    Fits,
    /// `.tif`, `.tiff`; the index selects a page.
    Tiff,
}

impl ImageFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("fits" | "fit" | "fts") => Ok(Self::Fits),
            Some("tif" | "tiff") => Ok(Self::Tiff),
            _ => bail!(
                "Unrecognized image format for {} (expected .fits, .fit, .fts, .tif or .tiff)",
                path.display()
            ),
        }
    }
}

/// Read image `index` of `path` as `f32` samples.
pub fn read_image(path: &Path, index: usize) -> Result<Buffer2<f32>> {
    match ImageFormat::from_path(path)? {
        ImageFormat::Fits => fits::read_image(path, index),
        ImageFormat::Tiff => self::tiff::read_image(path, index),
    }
}

/// Write a mask as 8-bit samples holding 0 and 1.
pub fn write_mask(path: &Path, mask: &Buffer2<bool>) -> Result<()> {
    let format = ImageFormat::from_path(path)?;

    let mut bytes = Buffer2::new_default(mask.width(), mask.height());
    bytes.generate_from(mask, u8::from);

    match format {
        ImageFormat::Fits => fits::write_bytes(path, &bytes),
        ImageFormat::Tiff => self::tiff::write_bytes(path, &bytes),
    }
}

#[cfg(test)]
pub(crate) fn test_path(name: &str, extension: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!(
        "growila-{}-{}.{}",
        name,
        std::process::id(),
        extension
    ))
}
