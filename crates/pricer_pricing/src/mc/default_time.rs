//! Default-time sampling by survival-curve inversion.
//!
//! # Direct sampling
//!
//! A quantile `u ~ U(0, 1)` defaults in the first interval `(t_{j-1}, t_j]`
//! with `S(t_j) < u`; if `u <= S(T)` the name survives the horizon.
//!
//! # Importance sampling
//!
//! Defaults are rare for small hazard rates, so most direct draws carry no
//! CVA information. The importance sampler splits the quantile range at
//! terminal survival `S_T` and picks each half with probability 1/2:
//!
//! | Region | Quantile range | Outcome | Weight |
//! |--------|----------------|---------|--------|
//! | `Early` | `(S_T, 1)` | default before maturity | `(1 − S_T) / 0.5` |
//! | `Late` | `(0, S_T)` | survival to maturity | `S_T / 0.5` |
//!
//! The weight is the likelihood ratio of the true region mass to the mixture
//! probability, so its expectation is one.

use pricer_core::math::survival::{first_default_index, terminal_survival};

/// Probability of selecting [`SamplingRegion::Early`].
pub const MIXTURE_PROBABILITY: f64 = 0.5;

/// Sampled default time on a grid.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::DefaultTime;
///
/// let tau = DefaultTime::At(3);
/// assert!(tau.is_default());
/// assert_eq!(tau.grid_index(13), 3);
///
/// // Survival maps to the "beyond grid" sentinel
/// assert_eq!(DefaultTime::AfterMaturity.grid_index(13), 13);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DefaultTime {
    /// Default in `(t_{j-1}, t_j]`; the index is `j >= 1`.
    At(usize),
    /// No default up to and including the last grid point.
    AfterMaturity,
}

impl DefaultTime {
    /// Maps an optional grid index to a default time.
    #[inline]
    pub fn from_index(index: Option<usize>) -> Self {
        index.map_or(Self::AfterMaturity, Self::At)
    }

    /// Grid index of the default, or `n_points` after maturity.
    #[inline]
    pub fn grid_index(&self, n_points: usize) -> usize {
        match self {
            Self::At(j) => *j,
            Self::AfterMaturity => n_points,
        }
    }

    /// Grid index of the default, if any.
    #[inline]
    pub fn index(&self) -> Option<usize> {
        match self {
            Self::At(j) => Some(*j),
            Self::AfterMaturity => None,
        }
    }

    /// Whether the name defaults on the grid.
    #[inline]
    pub fn is_default(&self) -> bool {
        matches!(self, Self::At(_))
    }

    /// Whether the name is still alive at grid point `j`.
    #[inline]
    pub fn survives(&self, j: usize) -> bool {
        match self {
            Self::At(k) => *k > j,
            Self::AfterMaturity => true,
        }
    }
}

/// Importance-sampling stratum.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SamplingRegion {
    /// Quantile in `(S_T, 1)`: default before maturity.
    Early,
    /// Quantile in `(0, S_T)`: survival to maturity.
    Late,
}

impl SamplingRegion {
    /// Picks a region from a coin `c ~ U(0, 1)`.
    #[inline]
    pub fn select(coin: f64) -> Self {
        if coin < MIXTURE_PROBABILITY {
            Self::Early
        } else {
            Self::Late
        }
    }

    /// Quantile range `(low, high)` for terminal survival `s_t`.
    #[inline]
    pub fn bounds(&self, s_t: f64) -> (f64, f64) {
        match self {
            Self::Early => (s_t, 1.0),
            Self::Late => (0.0, s_t),
        }
    }

    /// True probability mass of the region.
    #[inline]
    pub fn mass(&self, s_t: f64) -> f64 {
        let (low, high) = self.bounds(s_t);
        high - low
    }

    /// Likelihood-ratio weight of a draw from this region.
    #[inline]
    pub fn weight(&self, s_t: f64) -> f64 {
        let selection = match self {
            Self::Early => MIXTURE_PROBABILITY,
            Self::Late => 1.0 - MIXTURE_PROBABILITY,
        };
        self.mass(s_t) / selection
    }

    /// Maps `u ∈ (0, 1)` affinely into the region's quantile range.
    #[inline]
    pub fn quantile(&self, s_t: f64, u: f64) -> f64 {
        let (low, high) = self.bounds(s_t);
        low + (high - low) * u
    }
}

/// One importance-sampled default draw.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ImportanceDraw {
    /// Stratum the quantile was drawn from.
    pub region: SamplingRegion,
    /// Default time implied by the quantile.
    pub default_time: DefaultTime,
    /// Likelihood-ratio weight.
    pub weight: f64,
}

/// Direct default time for quantile `u` on a survival row.
///
/// ```rust
/// use pricer_pricing::mc::{sample_direct, DefaultTime};
///
/// let survival = [1.0, 0.9, 0.8];
/// assert_eq!(sample_direct(&survival, 0.95), DefaultTime::At(1));
/// assert_eq!(sample_direct(&survival, 0.5), DefaultTime::AfterMaturity);
/// ```
#[inline]
pub fn sample_direct(survival: &[f64], u: f64) -> DefaultTime {
    DefaultTime::from_index(first_default_index(survival, u))
}

/// Importance-sampled default time from a coin and a uniform `u ∈ (0, 1)`.
///
/// ```rust
/// use pricer_pricing::mc::{sample_importance, SamplingRegion};
///
/// let survival = [1.0, 0.9, 0.8];
///
/// let early = sample_importance(&survival, 0.1, 0.5);
/// assert_eq!(early.region, SamplingRegion::Early);
/// assert!(early.default_time.is_default());
/// assert!((early.weight - 0.4).abs() < 1e-12);
///
/// let late = sample_importance(&survival, 0.9, 0.5);
/// assert!(!late.default_time.is_default());
/// assert!((late.weight - 1.6).abs() < 1e-12);
/// ```
pub fn sample_importance(survival: &[f64], coin: f64, u: f64) -> ImportanceDraw {
    let s_t = terminal_survival(survival);
    let region = SamplingRegion::select(coin);
    let quantile = region.quantile(s_t, u);

    ImportanceDraw {
        region,
        default_time: sample_direct(survival, quantile),
        weight: region.weight(s_t),
    }
}
