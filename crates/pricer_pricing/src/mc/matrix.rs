//! Dense path storage.
//!
//! # Memory Layout
//!
//! Paths are stored in row-major order: `data[path_idx * n_points + point_idx]`
//! where `point_idx = 0` is the valuation date. One row is one simulation, so
//! per-path loops walk contiguous memory.

/// Row-major `n_paths × n_points` matrix of `f64`.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::PathMatrix;
///
/// let mut m = PathMatrix::zeros(2, 3);
/// m.row_mut(1)[2] = 4.0;
///
/// assert_eq!(m.shape(), (2, 3));
/// assert_eq!(m.get(1, 2), 4.0);
/// assert_eq!(m.row(1), &[0.0, 0.0, 4.0]);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct PathMatrix {
    data: Vec<f64>,
    n_paths: usize,
    n_points: usize,
}

impl PathMatrix {
    /// Allocates a zero-filled matrix.
    pub fn zeros(n_paths: usize, n_points: usize) -> Self {
        Self {
            data: vec![0.0; n_paths * n_points],
            n_paths,
            n_points,
        }
    }

    /// Builds a matrix from row slices.
    ///
    /// Returns `None` if the rows have different lengths.
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Option<Self> {
        let n_points = rows.first().map_or(0, |r| r.as_ref().len());
        let mut data = Vec::with_capacity(rows.len() * n_points);
        for row in rows {
            let row = row.as_ref();
            if row.len() != n_points {
                return None;
            }
            data.extend_from_slice(row);
        }
        Some(Self {
            data,
            n_paths: rows.len(),
            n_points,
        })
    }

    /// Number of rows (simulations).
    #[inline]
    pub fn rows(&self) -> usize {
        self.n_paths
    }

    /// Number of columns (grid points).
    #[inline]
    pub fn cols(&self) -> usize {
        self.n_points
    }

    /// `(rows, cols)`.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.n_paths, self.n_points)
    }

    /// Row `path` as a slice.
    ///
    /// # Panics
    ///
    /// Panics if `path >= rows()`.
    #[inline]
    pub fn row(&self, path: usize) -> &[f64] {
        let start = path * self.n_points;
        &self.data[start..start + self.n_points]
    }

    /// Row `path` as a mutable slice.
    ///
    /// # Panics
    ///
    /// Panics if `path >= rows()`.
    #[inline]
    pub fn row_mut(&mut self, path: usize) -> &mut [f64] {
        let start = path * self.n_points;
        &mut self.data[start..start + self.n_points]
    }

    /// Element at `(path, point)`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    #[inline]
    pub fn get(&self, path: usize, point: usize) -> f64 {
        assert!(point < self.n_points, "point index {} out of range", point);
        self.data[path * self.n_points + point]
    }

    /// Iterator over rows.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[f64]> {
        // chunks_exact rejects a zero chunk size
        self.data.chunks_exact(self.n_points.max(1)).take(self.n_paths)
    }

    /// Flat row-major view.
    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }
}
