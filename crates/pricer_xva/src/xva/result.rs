//! XVA result structures.
//!
//! Every adjustment is estimated three ways from the same batch; the results
//! are kept side by side so their agreement and variance can be compared.

use std::fmt;

use pricer_pricing::mc::McEstimate;

/// Estimator of an expected default-conditional quantity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Estimator {
    /// Survival-curve weighting of the deviation-weighted FX path.
    HazardWeighted,
    /// Directly simulated default time.
    DirectDefault,
    /// Importance-sampled default time.
    ImportanceDefault,
}

impl Estimator {
    /// All estimators, in reporting order.
    pub const ALL: [Estimator; 3] = [
        Estimator::HazardWeighted,
        Estimator::DirectDefault,
        Estimator::ImportanceDefault,
    ];

    /// Machine-readable name.
    pub fn name(&self) -> &'static str {
        match self {
            Estimator::HazardWeighted => "hazard_weighted",
            Estimator::DirectDefault => "direct_default",
            Estimator::ImportanceDefault => "importance_default",
        }
    }
}

impl fmt::Display for Estimator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Estimator::HazardWeighted => "Hazard-weighted",
            Estimator::DirectDefault => "Direct default",
            Estimator::ImportanceDefault => "Importance default",
        };
        f.write_str(label)
    }
}

/// One adjustment estimated by all three estimators.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EstimatorTriple {
    /// Hazard-integral weighting.
    pub hazard_weighted: McEstimate,
    /// Direct default-time simulation.
    pub direct_default: McEstimate,
    /// Importance-sampled default time.
    pub importance_default: McEstimate,
}

impl EstimatorTriple {
    /// Estimate for `estimator`.
    #[inline]
    pub fn get(&self, estimator: Estimator) -> McEstimate {
        match estimator {
            Estimator::HazardWeighted => self.hazard_weighted,
            Estimator::DirectDefault => self.direct_default,
            Estimator::ImportanceDefault => self.importance_default,
        }
    }

    /// `(estimator, estimate)` pairs in reporting order.
    pub fn iter(&self) -> impl Iterator<Item = (Estimator, McEstimate)> + '_ {
        Estimator::ALL.into_iter().map(move |e| (e, self.get(e)))
    }

    /// Largest pairwise gap between the estimates relative to the largest
    /// magnitude; `NaN` when all three are zero.
    ///
    /// ```
    /// use pricer_pricing::mc::McEstimate;
    /// use pricer_xva::xva::EstimatorTriple;
    ///
    /// let est = |value| McEstimate { value, std_error: 0.0 };
    /// let triple = EstimatorTriple {
    ///     hazard_weighted: est(100.0),
    ///     direct_default: est(90.0),
    ///     importance_default: est(95.0),
    /// };
    /// assert!((triple.max_relative_spread() - 0.1).abs() < 1e-12);
    /// ```
    pub fn max_relative_spread(&self) -> f64 {
        let values = Estimator::ALL.map(|e| self.get(e).value);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let scale = values.iter().map(|v| v.abs()).fold(0.0, f64::max);
        if scale == 0.0 {
            f64::NAN
        } else {
            (max - min) / scale
        }
    }
}

/// CVA and FVA of one batch.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct XvaEstimates {
    /// Credit Valuation Adjustment.
    pub cva: EstimatorTriple,
    /// Funding Valuation Adjustment.
    pub fva: EstimatorTriple,
}
