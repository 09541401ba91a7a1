//! Joint hazard-rate / FX model with a devaluation jump at default.
//!
//! ## Dynamics
//!
//! The counterparty's default intensity is lognormal and the FX rate is a
//! geometric Brownian motion, driven by Brownian motions with correlation ρ:
//!
//! ```text
//! dλ/λ = σ_λ dW_λ
//! dX/X = σ_X dW_X − ln(1+J)·λ dt + J dN
//! ```
//!
//! where `N` jumps once, at default. The `ln(1+J)·λ dt` term compensates the
//! expected devaluation while the name is alive.
//!
//! ## Discretisation
//!
//! On a uniform step `dt` both diffusions use the exact log-space update:
//!
//! ```text
//! λ(t+dt) = λ(t)·exp(−½σ_λ²dt + σ_λ√dt·dW_λ)
//! D       = exp(−½σ_X²dt + σ_X√dt·dW_X)
//! C(λ)    = exp(−λ·dt·ln(1+J))
//! ```
//!
//! The lognormal update keeps the hazard rate strictly positive. How `D`,
//! `C` and the jump factor `1+J` combine into FX paths is up to the path
//! generator.

use pricer_core::types::PricingError;

use super::hybrid::{CorrelatedPair, CorrelationError};

/// Parameters of the joint credit/FX model.
///
/// # Examples
///
/// ```
/// use pricer_models::models::CreditFxParams;
///
/// let params = CreditFxParams::new(0.01, 10.0, 0.4, 0.15, 0.0, 0.3).unwrap();
/// assert_eq!(params.hazard0(), 0.01);
/// assert!((params.jump_factor() - 1.3).abs() < 1e-15);
///
/// // Correlation outside [-1, 1] is rejected before any simulation
/// assert!(CreditFxParams::new(0.01, 10.0, 0.4, 0.15, 1.2, 0.3).is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CreditFxParams {
    hazard0: f64,
    fx0: f64,
    vol_hazard: f64,
    vol_fx: f64,
    jump: f64,
    drivers: CorrelatedPair<f64>,
}

impl CreditFxParams {
    /// Creates validated model parameters.
    ///
    /// # Arguments
    ///
    /// * `hazard0` - Initial hazard rate (finite, > 0)
    /// * `fx0` - Initial FX level (finite, > 0)
    /// * `vol_hazard` - Hazard-rate volatility (finite, >= 0)
    /// * `vol_fx` - FX volatility (finite, >= 0)
    /// * `rho` - Brownian correlation in [-1, 1]
    /// * `jump` - Relative FX move at default (finite, > -1)
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::InvalidParameter`] naming the first parameter
    /// outside its domain.
    pub fn new(
        hazard0: f64,
        fx0: f64,
        vol_hazard: f64,
        vol_fx: f64,
        rho: f64,
        jump: f64,
    ) -> Result<Self, PricingError> {
        require_positive("hazard0", hazard0)?;
        require_positive("fx0", fx0)?;
        require_non_negative("vol_hazard", vol_hazard)?;
        require_non_negative("vol_fx", vol_fx)?;
        if !(jump.is_finite() && jump > -1.0) {
            return Err(PricingError::invalid_parameter(
                "jump",
                format!("must be finite and greater than -1, got {}", jump),
            ));
        }
        let drivers = CorrelatedPair::new(rho).map_err(|e: CorrelationError| {
            PricingError::invalid_parameter("rho", e.to_string())
        })?;

        Ok(Self {
            hazard0,
            fx0,
            vol_hazard,
            vol_fx,
            jump,
            drivers,
        })
    }

    /// Initial hazard rate.
    #[inline]
    pub fn hazard0(&self) -> f64 {
        self.hazard0
    }

    /// Initial FX level.
    #[inline]
    pub fn fx0(&self) -> f64 {
        self.fx0
    }

    /// Hazard-rate volatility.
    #[inline]
    pub fn vol_hazard(&self) -> f64 {
        self.vol_hazard
    }

    /// FX volatility.
    #[inline]
    pub fn vol_fx(&self) -> f64 {
        self.vol_fx
    }

    /// Brownian correlation.
    #[inline]
    pub fn rho(&self) -> f64 {
        self.drivers.rho()
    }

    /// Relative FX jump at default.
    #[inline]
    pub fn jump(&self) -> f64 {
        self.jump
    }

    /// Multiplicative jump factor `1 + J`.
    #[inline]
    pub fn jump_factor(&self) -> f64 {
        1.0 + self.jump
    }

    /// Correlated Brownian drivers.
    #[inline]
    pub fn drivers(&self) -> CorrelatedPair<f64> {
        self.drivers
    }

    /// Precomputes the per-step constants for a uniform step `dt`.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::InvalidParameter`] for non-positive or
    /// non-finite `dt`.
    pub fn discretise(&self, dt: f64) -> Result<CreditFxStep, PricingError> {
        require_positive("dt", dt)?;
        let sqrt_dt = dt.sqrt();
        Ok(CreditFxStep {
            hazard_drift: -0.5 * self.vol_hazard * self.vol_hazard * dt,
            hazard_diffusion: self.vol_hazard * sqrt_dt,
            fx_drift: -0.5 * self.vol_fx * self.vol_fx * dt,
            fx_diffusion: self.vol_fx * sqrt_dt,
            compensator_rate: dt * self.jump_factor().ln(),
            jump_factor: self.jump_factor(),
        })
    }
}

impl Default for CreditFxParams {
    /// One-year ZAR-style experiment: 1% hazard, 40% hazard vol, 15% FX vol,
    /// independent drivers, 30% devaluation at default.
    fn default() -> Self {
        Self {
            hazard0: 0.01,
            fx0: 10.0,
            vol_hazard: 0.4,
            vol_fx: 0.15,
            jump: 0.3,
            drivers: CorrelatedPair::independent(),
        }
    }
}

/// Per-step constants of [`CreditFxParams`] on a fixed `dt`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CreditFxStep {
    hazard_drift: f64,
    hazard_diffusion: f64,
    fx_drift: f64,
    fx_diffusion: f64,
    compensator_rate: f64,
    jump_factor: f64,
}

impl CreditFxStep {
    /// Evolves the hazard rate over one step.
    #[inline]
    pub fn hazard_step(&self, hazard: f64, dw_hazard: f64) -> f64 {
        hazard * (self.hazard_drift + self.hazard_diffusion * dw_hazard).exp()
    }

    /// FX diffusion factor `D` for one step.
    #[inline]
    pub fn fx_diffusion_factor(&self, dw_fx: f64) -> f64 {
        (self.fx_drift + self.fx_diffusion * dw_fx).exp()
    }

    /// Pre-default compensator `C(λ)` for a step starting at hazard `λ`.
    #[inline]
    pub fn compensator(&self, hazard: f64) -> f64 {
        (-hazard * self.compensator_rate).exp()
    }

    /// Jump factor `1 + J`.
    #[inline]
    pub fn jump_factor(&self) -> f64 {
        self.jump_factor
    }
}

fn require_positive(name: &'static str, value: f64) -> Result<(), PricingError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(PricingError::invalid_parameter(
            name,
            format!("must be finite and positive, got {}", value),
        ))
    }
}

fn require_non_negative(name: &'static str, value: f64) -> Result<(), PricingError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(PricingError::invalid_parameter(
            name,
            format!("must be finite and non-negative, got {}", value),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn test_default_matches_experiment() {
        let params = CreditFxParams::default();
        assert_eq!(params.hazard0(), 0.01);
        assert_eq!(params.fx0(), 10.0);
        assert_eq!(params.vol_hazard(), 0.4);
        assert_eq!(params.vol_fx(), 0.15);
        assert_eq!(params.rho(), 0.0);
        assert_eq!(params.jump(), 0.3);
        assert_eq!(
            params,
            CreditFxParams::new(0.01, 10.0, 0.4, 0.15, 0.0, 0.3).unwrap()
        );
    }

    #[test]
    fn test_rejects_invalid_inputs() {
        let cases = [
            ("hazard0", CreditFxParams::new(0.0, 10.0, 0.4, 0.15, 0.0, 0.3)),
            ("fx0", CreditFxParams::new(0.01, -1.0, 0.4, 0.15, 0.0, 0.3)),
            ("vol_hazard", CreditFxParams::new(0.01, 10.0, -0.1, 0.15, 0.0, 0.3)),
            ("vol_fx", CreditFxParams::new(0.01, 10.0, 0.4, f64::NAN, 0.0, 0.3)),
            ("rho", CreditFxParams::new(0.01, 10.0, 0.4, 0.15, -1.5, 0.3)),
            ("jump", CreditFxParams::new(0.01, 10.0, 0.4, 0.15, 0.0, -1.0)),
        ];
        for (expected, result) in cases {
            match result {
                Err(PricingError::InvalidParameter { name, .. }) => assert_eq!(name, expected),
                other => panic!("expected error for {}, got {:?}", expected, other),
            }
        }
    }

    #[test]
    fn test_zero_volatilities_allowed() {
        let params = CreditFxParams::new(0.01, 10.0, 0.0, 0.0, 0.0, 0.0).unwrap();
        let step = params.discretise(0.1).unwrap();
        assert_eq!(step.hazard_step(0.01, 3.0), 0.01);
        assert_eq!(step.fx_diffusion_factor(-2.0), 1.0);
        assert_eq!(step.compensator(0.5), 1.0);
    }

    #[test]
    fn test_step_constants() {
        let params = CreditFxParams::default();
        let dt = 0.25;
        let step = params.discretise(dt).unwrap();

        assert_relative_eq!(
            step.hazard_step(0.02, 1.0),
            0.02 * (-0.5 * 0.16 * dt + 0.4 * 0.5).exp(),
            epsilon = 1e-15
        );
        assert_relative_eq!(
            step.fx_diffusion_factor(-1.0),
            (-0.5 * 0.0225 * dt - 0.15 * 0.5).exp(),
            epsilon = 1e-15
        );
        assert_relative_eq!(
            step.compensator(0.02),
            (-0.02 * dt * 1.3_f64.ln()).exp(),
            epsilon = 1e-15
        );
        assert_relative_eq!(step.jump_factor(), 1.3);
    }

    #[test]
    fn test_discretise_rejects_bad_dt() {
        let params = CreditFxParams::default();
        assert!(params.discretise(0.0).is_err());
        assert!(params.discretise(-0.1).is_err());
        assert!(params.discretise(f64::INFINITY).is_err());
    }

    #[test]
    fn test_negative_jump_is_appreciation() {
        let params = CreditFxParams::new(0.01, 10.0, 0.4, 0.15, 0.0, -0.2).unwrap();
        let step = params.discretise(0.5).unwrap();
        // ln(0.8) < 0, so the compensator pushes the rate up before default
        assert!(step.compensator(0.1) > 1.0);
        assert_relative_eq!(params.jump_factor(), 0.8);
    }

    proptest! {
        #[test]
        fn prop_hazard_step_stays_positive(
            hazard in 1e-6_f64..5.0,
            vol in 0.0_f64..3.0,
            dw in -8.0_f64..8.0,
        ) {
            let params = CreditFxParams::new(hazard, 10.0, vol, 0.15, 0.0, 0.3).unwrap();
            let step = params.discretise(1.0 / 12.0).unwrap();
            let next = step.hazard_step(hazard, dw);
            prop_assert!(next > 0.0 && next.is_finite());
        }
    }
}
