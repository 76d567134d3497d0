use std::collections::VecDeque;

use ndarray::Array2;

use super::components::{label_components, neighbor};
use super::config::Connectivity;

/// Clear every connected component with fewer than `min_size` pixels.
///
/// A component of exactly `min_size` pixels is kept.
pub fn remove_small_objects(
    mask: &Array2<bool>,
    min_size: usize,
    connectivity: Connectivity,
) -> Array2<bool> {
    if min_size <= 1 {
        return mask.clone();
    }

    let labels = label_components(mask, connectivity);
    let areas = labels.areas();

    labels
        .data
        .mapv(|lbl| lbl > 0 && areas[lbl as usize] >= min_size)
}

/// Fill background regions that are not connected to the image border.
///
/// `connectivity` is the foreground connectivity; the background is flooded
/// from the border with its complement.
pub fn fill_holes(mask: &Array2<bool>, connectivity: Connectivity) -> Array2<bool> {
    let (h, w) = mask.dim();
    if h == 0 || w == 0 {
        return mask.clone();
    }

    let background = connectivity.complement();
    let mut reached = Array2::from_elem((h, w), false);
    let mut queue = VecDeque::new();

    let mut seed = |row: usize, col: usize, reached: &mut Array2<bool>| {
        if !mask[[row, col]] && !reached[[row, col]] {
            reached[[row, col]] = true;
            queue.push_back((row, col));
        }
    };

    for col in 0..w {
        seed(0, col, &mut reached);
        seed(h - 1, col, &mut reached);
    }
    for row in 0..h {
        seed(row, 0, &mut reached);
        seed(row, w - 1, &mut reached);
    }

    while let Some((row, col)) = queue.pop_front() {
        for &(dr, dc) in background.neighbors() {
            let Some((nr, nc)) = neighbor(row, col, dr, dc, h, w) else {
                continue;
            };
            if !mask[[nr, nc]] && !reached[[nr, nc]] {
                reached[[nr, nc]] = true;
                queue.push_back((nr, nc));
            }
        }
    }

    // Anything the border flood could not reach is foreground or a hole.
    reached.mapv(|r| !r)
}
