use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use ndarray::Array2;
use num_traits::ToPrimitive;
use tiff::decoder::{Decoder, DecodingResult};
use tiff::encoder::{colortype, TiffEncoder};
use tiff::ColorType;

use crate::error::{NucleonError, Result};
use crate::raw_image::{RawImage, SampleFormat};

/// Load a single-channel TIFF at its native intensity scale.
///
/// Supports 8/16/32-bit unsigned and 32/64-bit float grayscale.
pub fn load_raw_image(path: &Path) -> Result<RawImage> {
    let mut decoder = open_gray(path)?;
    let (w, h) = decoder.dimensions()?;

    let (samples, format) = match decoder.read_image()? {
        DecodingResult::U8(buf) => (to_f64(&buf), SampleFormat::U8),
        DecodingResult::U16(buf) => (to_f64(&buf), SampleFormat::U16),
        DecodingResult::U32(buf) => (to_f64(&buf), SampleFormat::U32),
        DecodingResult::F32(buf) => (to_f64(&buf), SampleFormat::F32),
        DecodingResult::F64(buf) => (buf, SampleFormat::F64),
        _ => {
            return Err(NucleonError::UnsupportedSampleFormat(format!(
                "{}: signed or 64-bit integer samples",
                path.display()
            )))
        }
    };

    RawImage::new(into_grid(samples, w, h)?, format)
}

/// Save a label image as 32-bit signed integer grayscale TIFF.
pub fn save_label_tiff(labels: &Array2<u32>, path: &Path) -> Result<()> {
    let (h, w) = labels.dim();
    let pixels = labels
        .iter()
        .map(|&lbl| i32::try_from(lbl))
        .collect::<std::result::Result<Vec<i32>, _>>()
        .map_err(|_| {
            NucleonError::InvalidInput(format!(
                "label value exceeds the 32-bit signed range in {}",
                path.display()
            ))
        })?;

    let file = BufWriter::new(File::create(path)?);
    let mut encoder = TiffEncoder::new(file)?;
    encoder.write_image::<colortype::GrayI32>(w as u32, h as u32, &pixels)?;
    Ok(())
}

/// Load a label image written by [`save_label_tiff`] (or any unsigned
/// integer grayscale TIFF).
pub fn load_label_tiff(path: &Path) -> Result<Array2<u32>> {
    let mut decoder = open_gray(path)?;
    let (w, h) = decoder.dimensions()?;

    let labels: Vec<u32> = match decoder.read_image()? {
        DecodingResult::I32(buf) => buf
            .into_iter()
            .map(u32::try_from)
            .collect::<std::result::Result<_, _>>()
            .map_err(|_| {
                NucleonError::InvalidInput(format!(
                    "negative label value in {}",
                    path.display()
                ))
            })?,
        DecodingResult::U32(buf) => buf,
        DecodingResult::U16(buf) => buf.into_iter().map(u32::from).collect(),
        DecodingResult::U8(buf) => buf.into_iter().map(u32::from).collect(),
        _ => {
            return Err(NucleonError::UnsupportedSampleFormat(format!(
                "{}: label images must hold integer samples",
                path.display()
            )))
        }
    };

    into_grid(labels, w, h)
}

fn open_gray(path: &Path) -> Result<Decoder<BufReader<File>>> {
    let file = BufReader::new(File::open(path)?);
    let mut decoder = Decoder::new(file)?;
    match decoder.colortype()? {
        ColorType::Gray(_) => Ok(decoder),
        other => Err(NucleonError::UnsupportedSampleFormat(format!(
            "{}: expected single-channel grayscale, found {other:?}",
            path.display()
        ))),
    }
}

fn to_f64<T: ToPrimitive>(samples: &[T]) -> Vec<f64> {
    samples
        .iter()
        .map(|v| v.to_f64().unwrap_or_default())
        .collect()
}

fn into_grid<T>(samples: Vec<T>, width: u32, height: u32) -> Result<Array2<T>> {
    if width == 0 || height == 0 {
        return Err(NucleonError::InvalidInput(format!(
            "image has no pixels ({width}x{height})"
        )));
    }
    Array2::from_shape_vec((height as usize, width as usize), samples)
        .map_err(|e| NucleonError::InvalidInput(format!("sample count mismatch: {e}")))
}
