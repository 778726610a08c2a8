//! FITS image HDUs.

use std::path::Path;

use anyhow::{bail, Context, Result};
use common::Buffer2;
use fitsio::hdu::HduInfo;
use fitsio::images::{ImageDescription, ImageType};
use fitsio::FitsFile;

/// Read the image stored in HDU `index` (0 is the primary HDU) as `f32` samples.
///
/// cfitsio applies BZERO/BSCALE while converting, so integer data arrives in
/// physical units.
pub fn read_image(path: &Path, index: usize) -> Result<Buffer2<f32>> {
    let mut fptr = FitsFile::open(path)
        .with_context(|| format!("Failed to open FITS file: {}", path.display()))?;

    let hdu = fptr
        .hdu(index)
        .with_context(|| format!("Failed to access HDU {} of {}", index, path.display()))?;

    // Shape is reported slowest axis first: [height, width] or [1, height, width].
    let (width, height) = match &hdu.info {
        HduInfo::ImageInfo { shape, .. } => match shape.as_slice() {
            [height, width] | [1, height, width] => (*width, *height),
            [] => bail!("HDU {} of {} holds no image data", index, path.display()),
            other => bail!(
                "HDU {} of {} has shape {:?}, expected a single-channel 2D image",
                index,
                path.display(),
                other
            ),
        },
        HduInfo::TableInfo { .. } => {
            bail!("HDU {} of {} is a table, not an image", index, path.display())
        }
        HduInfo::AnyInfo => bail!("HDU {} of {} has an unknown type", index, path.display()),
    };

    let pixels: Vec<f32> = hdu
        .read_image(&mut fptr)
        .context("Failed to read image data")?;

    if pixels.len() != width * height {
        bail!(
            "{} decoded {} samples for a {}x{} image",
            path.display(),
            pixels.len(),
            width,
            height
        );
    }

    Ok(Buffer2::new(width, height, pixels))
}

/// Write 8-bit samples as the primary HDU of a new FITS file.
pub fn write_bytes(path: &Path, image: &Buffer2<u8>) -> Result<()> {
    // cfitsio refuses to create over an existing file.
    if path.exists() {
        std::fs::remove_file(path)
            .with_context(|| format!("Failed to replace {}", path.display()))?;
    }

    let description = ImageDescription {
        data_type: ImageType::UnsignedByte,
        dimensions: &[image.height(), image.width()],
    };

    let mut fptr = FitsFile::create(path)
        .with_custom_primary(&description)
        .open()
        .with_context(|| format!("Failed to create FITS file: {}", path.display()))?;

    let hdu = fptr.primary_hdu().context("Failed to get primary HDU")?;
    hdu.write_image(&mut fptr, image.pixels())
        .context("Failed to write FITS image data")?;

    Ok(())
}
