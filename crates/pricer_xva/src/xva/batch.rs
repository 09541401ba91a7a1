//! Shape checks on a simulated batch before estimation.

use pricer_pricing::mc::{DefaultTime, PathMatrix, SimulatedPaths};

use super::error::XvaError;

/// `(n_paths, n_points)` of a batch, after checking the hazard matrix
/// against the grid.
pub(crate) fn dims(paths: &SimulatedPaths) -> Result<(usize, usize), XvaError> {
    let dims = (paths.n_paths(), paths.n_points());
    if dims.0 == 0 {
        return Err(XvaError::EmptyBatch);
    }
    matrix("hazard", paths.hazard(), dims)?;
    Ok(dims)
}

pub(crate) fn matrix(
    field: &'static str,
    m: &PathMatrix,
    expected: (usize, usize),
) -> Result<(), XvaError> {
    if m.shape() == expected {
        Ok(())
    } else {
        Err(XvaError::ShapeMismatch {
            field,
            expected,
            got: m.shape(),
        })
    }
}

pub(crate) fn vector(field: &'static str, len: usize, n_paths: usize) -> Result<(), XvaError> {
    if len == n_paths {
        Ok(())
    } else {
        Err(XvaError::ShapeMismatch {
            field,
            expected: (n_paths, 1),
            got: (len, 1),
        })
    }
}

/// Checks length and that every default lies in `[1, n_points)`.
pub(crate) fn defaults(
    field: &'static str,
    taus: &[DefaultTime],
    (n_paths, n_points): (usize, usize),
) -> Result<(), XvaError> {
    vector(field, taus.len(), n_paths)?;
    for (path, tau) in taus.iter().enumerate() {
        if let DefaultTime::At(index) = *tau {
            if index == 0 || index >= n_points {
                return Err(XvaError::DefaultIndexOutOfRange {
                    path,
                    index,
                    n_points,
                });
            }
        }
    }
    Ok(())
}
