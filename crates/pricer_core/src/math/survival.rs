//! Survival probabilities on a discrete hazard path.
//!
//! Given a hazard path `λ_0, ..., λ_{n-1}` sampled on a uniform grid with step
//! `dt`, the survival probability uses left-point integration of the
//! cumulative hazard:
//!
//! ```text
//! S_0 = 1
//! S_j = exp(-Σ_{k<j} λ_k · dt)
//! ```
//!
//! Default times are sampled by inverse transform: for a quantile `u`, the
//! default falls in the first interval `(t_{j-1}, t_j]` whose end-point
//! survival has dropped below `u`. Since `S` is non-increasing the lookup is a
//! binary search over the forward sequence.
//!
//! All functions are generic over `T: Float` so they can be used with
//! `f32`, `f64` or dual number types.

use num_traits::Float;

/// Fills `out` with the survival probabilities of a hazard path.
///
/// Only `hazard[0..n-1]` contribute; the last hazard value lies beyond the
/// final grid point.
///
/// # Panics
///
/// Panics in debug builds if `hazard` and `out` have different lengths.
///
/// # Examples
///
/// ```
/// use pricer_core::math::survival::survival_probabilities;
///
/// let hazard = [0.1_f64, 0.2, 0.3];
/// let mut survival = [0.0; 3];
/// survival_probabilities(&hazard, 0.5, &mut survival);
///
/// assert_eq!(survival[0], 1.0);
/// assert!((survival[1] - (-0.05_f64).exp()).abs() < 1e-15);
/// assert!((survival[2] - (-0.15_f64).exp()).abs() < 1e-15);
/// ```
pub fn survival_probabilities<T: Float>(hazard: &[T], dt: T, out: &mut [T]) {
    debug_assert_eq!(hazard.len(), out.len());
    if out.is_empty() {
        return;
    }

    out[0] = T::one();
    let mut cumulative = T::zero();
    for j in 1..out.len() {
        cumulative = cumulative + hazard[j - 1] * dt;
        out[j] = (-cumulative).exp();
    }
}

/// Fills `out` with marginal default probabilities `S_{j-1} - S_j`.
///
/// `out[0]` is zero: no default mass sits on the valuation date.
///
/// # Examples
///
/// ```
/// use pricer_core::math::survival::marginal_default_probabilities;
///
/// let survival = [1.0_f64, 0.9, 0.85];
/// let mut dp = [0.0; 3];
/// marginal_default_probabilities(&survival, &mut dp);
/// assert_eq!(dp[0], 0.0);
/// assert!((dp[1] - 0.1).abs() < 1e-15);
/// assert!((dp[2] - 0.05).abs() < 1e-15);
/// ```
pub fn marginal_default_probabilities<T: Float>(survival: &[T], out: &mut [T]) {
    debug_assert_eq!(survival.len(), out.len());
    if out.is_empty() {
        return;
    }

    out[0] = T::zero();
    for j in 1..out.len() {
        out[j] = survival[j - 1] - survival[j];
    }
}

/// Returns the grid index of the default implied by `quantile`.
///
/// The result is the smallest `j >= 1` with `survival[j] < quantile`, i.e. the
/// default occurs in `(t_{j-1}, t_j]`. Returns `None` when no such index
/// exists: the quantile is at or below terminal survival and the name
/// survives past the last grid point.
///
/// Ties (`survival[j] == quantile`) resolve to "still alive", so the search
/// is deterministic even on flat survival segments.
///
/// # Examples
///
/// ```
/// use pricer_core::math::survival::first_default_index;
///
/// let survival = [1.0_f64, 0.9, 0.8, 0.7];
/// assert_eq!(first_default_index(&survival, 0.95), Some(1));
/// assert_eq!(first_default_index(&survival, 0.85), Some(2));
/// assert_eq!(first_default_index(&survival, 0.8), Some(3));
/// assert_eq!(first_default_index(&survival, 0.7), None);
/// ```
pub fn first_default_index<T: Float>(survival: &[T], quantile: T) -> Option<usize> {
    if survival.len() < 2 {
        return None;
    }

    let tail = &survival[1..];
    let alive = tail.partition_point(|&s| s >= quantile);
    if alive == tail.len() {
        None
    } else {
        Some(alive + 1)
    }
}

/// Returns the terminal survival probability `S_{n-1}`, or one for an empty slice.
#[inline]
pub fn terminal_survival<T: Float>(survival: &[T]) -> T {
    survival.last().copied().unwrap_or_else(T::one)
}
