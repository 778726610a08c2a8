//! Single-channel TIFF pages.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use anyhow::{bail, Context, Result};
use common::Buffer2;
use tiff::decoder::{Decoder, DecodingResult, Limits};
use tiff::encoder::{colortype, TiffEncoder};

/// Read one page of a single-channel TIFF as `f32` samples.
pub fn read_image(path: &Path, page: usize) -> Result<Buffer2<f32>> {
    let file =
        File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    // Unlimited so large sensor frames decode.
    let mut decoder = Decoder::new(BufReader::new(file))
        .with_context(|| format!("Failed to read TIFF header of {}", path.display()))?
        .with_limits(Limits::unlimited());

    for index in 0..page {
        if !decoder.more_images() {
            bail!(
                "{} has {} page(s), page {} requested",
                path.display(),
                index + 1,
                page
            );
        }
        decoder.next_image()?;
    }

    let color_type = decoder.colortype()?;
    if !matches!(color_type, tiff::ColorType::Gray(_)) {
        bail!(
            "Unsupported color type {:?} in {}, expected single-channel gray",
            color_type,
            path.display()
        );
    }

    let (width, height) = decoder.dimensions()?;
    let (width, height) = (width as usize, height as usize);

    let pixels: Vec<f32> = match decoder.read_image()? {
        DecodingResult::U8(buf) => buf.into_iter().map(f32::from).collect(),
        DecodingResult::U16(buf) => buf.into_iter().map(f32::from).collect(),
        DecodingResult::U32(buf) => buf.into_iter().map(|v| v as f32).collect(),
        DecodingResult::I8(buf) => buf.into_iter().map(f32::from).collect(),
        DecodingResult::I16(buf) => buf.into_iter().map(f32::from).collect(),
        DecodingResult::I32(buf) => buf.into_iter().map(|v| v as f32).collect(),
        DecodingResult::F32(buf) => buf,
        DecodingResult::F64(buf) => buf.into_iter().map(|v| v as f32).collect(),
        _ => bail!(
            "Unsupported TIFF sample format {:?} in {}",
            color_type,
            path.display()
        ),
    };

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

/// Write 8-bit samples as a gray TIFF.
pub fn write_bytes(path: &Path, image: &Buffer2<u8>) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    let mut encoder = TiffEncoder::new(BufWriter::new(file))?;

    encoder
        .write_image::<colortype::Gray8>(
            image.width() as u32,
            image.height() as u32,
            image.pixels(),
        )
        .with_context(|| format!("Failed to write {}", path.display()))?;

    Ok(())
}
