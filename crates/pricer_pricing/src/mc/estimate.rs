//! Monte Carlo point estimates.

/// Sample mean of per-path contributions with its standard error.
///
/// The standard error uses the unbiased sample variance,
/// `std_error = sqrt(Σ(x − x̄)² / (N − 1)) / √N`, and is zero for a single
/// sample.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::McEstimate;
///
/// let est = McEstimate::from_samples(&[1.0, 2.0, 3.0, 4.0]);
/// assert_eq!(est.value, 2.5);
/// assert!((est.relative_error() - est.std_error / 2.5).abs() < 1e-15);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct McEstimate {
    /// Sample mean.
    pub value: f64,
    /// Standard error of the mean.
    pub std_error: f64,
}

impl McEstimate {
    /// Builds an estimate from per-path contributions.
    ///
    /// An empty slice yields `NaN` for both fields.
    pub fn from_samples(samples: &[f64]) -> Self {
        let mut acc = MeanAccumulator::default();
        for &x in samples {
            acc.push(x);
        }
        acc.finish()
    }

    /// Standard error relative to the absolute value, or `NaN` at zero.
    #[inline]
    pub fn relative_error(&self) -> f64 {
        if self.value == 0.0 {
            f64::NAN
        } else {
            self.std_error / self.value.abs()
        }
    }
}

/// Streaming mean/variance accumulator (Welford).
#[derive(Clone, Copy, Debug, Default)]
pub struct MeanAccumulator {
    count: usize,
    mean: f64,
    m2: f64,
}

impl MeanAccumulator {
    /// Adds one contribution.
    #[inline]
    pub fn push(&mut self, x: f64) {
        self.count += 1;
        let delta = x - self.mean;
        self.mean += delta / self.count as f64;
        self.m2 += delta * (x - self.mean);
    }

    /// Number of contributions so far.
    #[inline]
    pub fn count(&self) -> usize {
        self.count
    }

    /// Final estimate.
    pub fn finish(&self) -> McEstimate {
        match self.count {
            0 => McEstimate {
                value: f64::NAN,
                std_error: f64::NAN,
            },
            1 => McEstimate {
                value: self.mean,
                std_error: 0.0,
            },
            n => {
                let variance = (self.m2 / (n - 1) as f64).max(0.0);
                McEstimate {
                    value: self.mean,
                    std_error: (variance / n as f64).sqrt(),
                }
            }
        }
    }
}
