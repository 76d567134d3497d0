#![allow(dead_code)]

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use ndarray::Array2;
use tiff::encoder::{colortype, TiffEncoder};

/// Build a mask from text rows: `#` is foreground, anything else background.
pub fn mask_from_rows(rows: &[&str]) -> Array2<bool> {
    let h = rows.len();
    let w = rows.first().map_or(0, |r| r.len());
    Array2::from_shape_fn((h, w), |(row, col)| rows[row].as_bytes()[col] == b'#')
}

/// Uniform background with bright axis-aligned squares.
///
/// Each square is `(top_row, left_col, side)`.
pub fn squares_image(
    height: usize,
    width: usize,
    squares: &[(usize, usize, usize)],
    background: f64,
    foreground: f64,
) -> Array2<f64> {
    let mut data = Array2::from_elem((height, width), background);
    for &(top, left, side) in squares {
        for row in top..top + side {
            for col in left..left + side {
                data[[row, col]] = foreground;
            }
        }
    }
    data
}

/// 10x10 image, background 10, two well separated 3x3 squares of 200.
pub fn two_square_image() -> Array2<f64> {
    squares_image(10, 10, &[(1, 1, 3), (6, 6, 3)], 10.0, 200.0)
}

/// `count` 4x4 squares of value 200 on a zero background, laid out on a grid.
pub fn nuclei_image(count: usize) -> Array2<f64> {
    let squares: Vec<(usize, usize, usize)> = (0..count)
        .map(|i| (2 + (i / 4) * 8, 2 + (i % 4) * 8, 4))
        .collect();
    squares_image(32, 32, &squares, 0.0, 200.0)
}

/// Write a 16-bit grayscale TIFF. Values are rounded and clamped to u16.
pub fn write_gray16_tiff(data: &Array2<f64>, path: &Path) {
    let (h, w) = data.dim();
    let pixels: Vec<u16> = data
        .iter()
        .map(|&v| v.round().clamp(0.0, u16::MAX as f64) as u16)
        .collect();
    let file = BufWriter::new(File::create(path).expect("create tiff"));
    let mut encoder = TiffEncoder::new(file).expect("tiff encoder");
    encoder
        .write_image::<colortype::Gray16>(w as u32, h as u32, &pixels)
        .expect("write tiff");
}

/// Number of foreground pixels.
pub fn count_true(mask: &Array2<bool>) -> usize {
    mask.iter().filter(|&&m| m).count()
}
