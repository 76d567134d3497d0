use ndarray::Array2;

use super::config::Connectivity;

/// Instance label image: 0 is background, `1..=count` are connected regions.
#[derive(Clone, Debug, PartialEq)]
pub struct LabelImage {
    /// Label per pixel, shape = (height, width)
    pub data: Array2<u32>,
    /// Number of distinct positive labels.
    pub count: u32,
}

impl LabelImage {
    pub fn dim(&self) -> (usize, usize) {
        self.data.dim()
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Pixel count per label, indexed by label (index 0 is the background).
    pub fn areas(&self) -> Vec<usize> {
        let mut areas = vec![0usize; self.count as usize + 1];
        for &lbl in self.data.iter() {
            areas[lbl as usize] += 1;
        }
        areas
    }
}

/// Label connected components of a binary mask using two-pass union-find.
///
/// Labels are contiguous from 1 and numbered in row-major order of each
/// component's first pixel.
pub fn label_components(mask: &Array2<bool>, connectivity: Connectivity) -> LabelImage {
    let (h, w) = mask.dim();
    let mut labels = Array2::<u32>::zeros((h, w));
    // Union-find parent array. Index 0 unused; labels start at 1.
    let mut parent: Vec<u32> = vec![0];

    // Pass 1: assign provisional labels.
    for row in 0..h {
        for col in 0..w {
            if !mask[[row, col]] {
                continue;
            }

            let mut current = 0u32;
            for &(dr, dc) in connectivity.preceding_neighbors() {
                let Some((nr, nc)) = neighbor(row, col, dr, dc, h, w) else {
                    continue;
                };
                let lbl = labels[[nr, nc]];
                if lbl == 0 {
                    continue;
                }
                if current == 0 {
                    current = lbl;
                } else if current != lbl {
                    union(&mut parent, current, lbl);
                }
            }

            if current == 0 {
                current = parent.len() as u32;
                parent.push(current);
            }
            labels[[row, col]] = current;
        }
    }

    // Roots are the smallest provisional label of their set, so walking in
    // ascending order always resolves a root before its members.
    let mut resolved = vec![0u32; parent.len()];
    let mut count = 0u32;
    for lbl in 1..parent.len() {
        let root = find(&parent, lbl as u32) as usize;
        if root == lbl {
            count += 1;
            resolved[lbl] = count;
        } else {
            resolved[lbl] = resolved[root];
        }
    }

    // Pass 2: rewrite provisional labels.
    labels.mapv_inplace(|lbl| resolved[lbl as usize]);

    LabelImage {
        data: labels,
        count,
    }
}

/// Bounds-checked neighbor coordinate.
pub(crate) fn neighbor(
    row: usize,
    col: usize,
    dr: isize,
    dc: isize,
    height: usize,
    width: usize,
) -> Option<(usize, usize)> {
    let nr = row.checked_add_signed(dr)?;
    let nc = col.checked_add_signed(dc)?;
    (nr < height && nc < width).then_some((nr, nc))
}

fn find(parent: &[u32], mut x: u32) -> u32 {
    while parent[x as usize] != x {
        x = parent[x as usize];
    }
    x
}

fn union(parent: &mut [u32], a: u32, b: u32) {
    let ra = find(parent, a);
    let rb = find(parent, b);
    if ra != rb {
        // Merge larger root into smaller root to keep labels consistent.
        let (small, big) = if ra < rb { (ra, rb) } else { (rb, ra) };
        parent[big as usize] = small;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neighbor_bounds() {
        assert_eq!(neighbor(0, 0, -1, 0, 3, 3), None);
        assert_eq!(neighbor(2, 2, 0, 1, 3, 3), None);
        assert_eq!(neighbor(1, 1, 1, -1, 3, 3), Some((2, 0)));
    }

    #[test]
    fn test_union_keeps_smaller_root() {
        let mut parent = vec![0, 1, 2, 3];
        union(&mut parent, 3, 1);
        assert_eq!(find(&parent, 3), 1);
        union(&mut parent, 2, 3);
        assert_eq!(find(&parent, 2), 1);
    }
}
