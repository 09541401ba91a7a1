//! Joint hazard-rate / FX path generation with a default jump.
//!
//! # Algorithm
//!
//! Each simulation consumes, in order, `2 × (n − 1)` standard normals (two per
//! step, correlated through [`CorrelatedPair`]), one open uniform for the
//! direct default time, one uniform coin and one open uniform for the
//! importance-sampled default time. Rows are generated in path order from a
//! single [`PricerRng`] stream.
//!
//! Per step `j`, with `D_j` the FX diffusion factor and `C_j = C(λ_{j−1})` the
//! pre-default compensator (see [`CreditFxStep`]):
//!
//! ```text
//! deviation:  x_0 = X0·(1+J)   x_j = x_{j−1}·D_j·C_j
//! plain:      x_0 = X0         x_j = x_{j−1}·D_j·(1+J if τ = j)·(C_j if τ > j)
//! importance: as plain, keyed to the importance-sampled τ
//! ```
//!
//! The deviation-weighted path is the FX level conditional on default at `t_j`,
//! which is what the hazard-integral estimators weight.
//!
//! # Memory Layout
//!
//! All matrices are `n_paths × n_points`, row-major (see [`PathMatrix`]).
//!
//! [`CorrelatedPair`]: pricer_models::models::CorrelatedPair

use pricer_core::math::survival::survival_probabilities;
use pricer_core::types::TimeGrid;
use pricer_models::models::{CreditFxParams, CreditFxStep};

use super::config::{SimulationConfig, MAX_PATHS};
use super::default_time::{sample_direct, sample_importance, DefaultTime, SamplingRegion};
use super::error::{ConfigError, SimulationError};
use super::matrix::PathMatrix;
use crate::rng::PricerRng;

/// Raw arrays of one batch, for assembling a [`SimulatedPaths`] outside the
/// generator.
///
/// No shape checks happen here; the XVA estimators validate every array they
/// read against `n_paths × n_points`.
#[derive(Clone, Debug)]
pub struct SimulatedPathsParts {
    /// Grid the batch was simulated on.
    pub grid: TimeGrid,
    /// Model parameters used.
    pub params: CreditFxParams,
    /// Seed of the RNG stream.
    pub seed: u64,
    /// Hazard rates.
    pub hazard: PathMatrix,
    /// Survival probabilities.
    pub survival: PathMatrix,
    /// FX keyed to the direct default time.
    pub fx_plain: PathMatrix,
    /// FX keyed to the importance-sampled default time.
    pub fx_importance: PathMatrix,
    /// FX conditional on default at each grid point.
    pub fx_deviation: PathMatrix,
    /// Direct default time per simulation.
    pub default_direct: Vec<DefaultTime>,
    /// Importance-sampled default time per simulation.
    pub default_importance: Vec<DefaultTime>,
    /// Importance-sampling region per simulation.
    pub regions: Vec<SamplingRegion>,
    /// Likelihood-ratio weight per simulation.
    pub importance_weights: Vec<f64>,
}

/// One simulated batch.
///
/// Created fresh per generator call and read by the XVA estimators. The
/// arrays are only reachable through shared accessors, so a batch never
/// changes after creation.
#[derive(Clone, Debug)]
pub struct SimulatedPaths {
    parts: SimulatedPathsParts,
}

impl SimulatedPaths {
    /// Assembles a batch from precomputed arrays.
    pub fn from_parts(parts: SimulatedPathsParts) -> Self {
        Self { parts }
    }

    /// Releases the underlying arrays.
    pub fn into_parts(self) -> SimulatedPathsParts {
        self.parts
    }

    /// Grid the batch was simulated on.
    #[inline]
    pub fn grid(&self) -> &TimeGrid {
        &self.parts.grid
    }

    /// Model parameters used.
    #[inline]
    pub fn params(&self) -> &CreditFxParams {
        &self.parts.params
    }

    /// Seed of the RNG stream.
    #[inline]
    pub fn seed(&self) -> u64 {
        self.parts.seed
    }

    /// Hazard rates, strictly positive; column 0 is `hazard0`.
    #[inline]
    pub fn hazard(&self) -> &PathMatrix {
        &self.parts.hazard
    }

    /// Survival probabilities; column 0 is one, rows non-increasing.
    #[inline]
    pub fn survival(&self) -> &PathMatrix {
        &self.parts.survival
    }

    /// FX keyed to the direct default time.
    #[inline]
    pub fn fx_plain(&self) -> &PathMatrix {
        &self.parts.fx_plain
    }

    /// FX keyed to the importance-sampled default time.
    #[inline]
    pub fn fx_importance(&self) -> &PathMatrix {
        &self.parts.fx_importance
    }

    /// FX conditional on default at each grid point.
    #[inline]
    pub fn fx_deviation(&self) -> &PathMatrix {
        &self.parts.fx_deviation
    }

    /// Direct default time per simulation.
    #[inline]
    pub fn default_direct(&self) -> &[DefaultTime] {
        &self.parts.default_direct
    }

    /// Importance-sampled default time per simulation.
    #[inline]
    pub fn default_importance(&self) -> &[DefaultTime] {
        &self.parts.default_importance
    }

    /// Importance-sampling region per simulation.
    #[inline]
    pub fn regions(&self) -> &[SamplingRegion] {
        &self.parts.regions
    }

    /// Likelihood-ratio weight per simulation.
    #[inline]
    pub fn importance_weights(&self) -> &[f64] {
        &self.parts.importance_weights
    }

    /// Number of simulations.
    #[inline]
    pub fn n_paths(&self) -> usize {
        self.parts.hazard.rows()
    }

    /// Number of grid points.
    #[inline]
    pub fn n_points(&self) -> usize {
        self.parts.grid.len()
    }

    /// Number of simulations with a direct default on the grid.
    pub fn direct_default_count(&self) -> usize {
        self.parts
            .default_direct
            .iter()
            .filter(|t| t.is_default())
            .count()
    }

    /// Number of simulations with an importance-sampled default on the grid.
    pub fn importance_default_count(&self) -> usize {
        self.parts
            .default_importance
            .iter()
            .filter(|t| t.is_default())
            .count()
    }
}

/// Path generator for [`CreditFxParams`] on a fixed [`TimeGrid`].
///
/// # Examples
///
/// ```rust
/// use pricer_core::types::TimeGrid;
/// use pricer_models::models::CreditFxParams;
/// use pricer_pricing::mc::CreditFxPathGenerator;
/// use pricer_pricing::rng::PricerRng;
///
/// let grid = TimeGrid::linspace(0.0, 1.0, 5).unwrap();
/// let generator = CreditFxPathGenerator::new(CreditFxParams::default(), grid).unwrap();
///
/// let mut rng = PricerRng::from_seed(1);
/// let paths = generator.generate(100, &mut rng).unwrap();
/// assert_eq!(paths.fx_plain().shape(), (100, 5));
/// ```
#[derive(Clone, Debug)]
pub struct CreditFxPathGenerator {
    params: CreditFxParams,
    grid: TimeGrid,
    step: CreditFxStep,
}

impl CreditFxPathGenerator {
    /// Creates a generator.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::Model`] if the grid step cannot be
    /// discretised.
    pub fn new(params: CreditFxParams, grid: TimeGrid) -> Result<Self, SimulationError> {
        let step = params.discretise(grid.dt())?;
        Ok(Self { params, grid, step })
    }

    /// Model parameters.
    #[inline]
    pub fn params(&self) -> &CreditFxParams {
        &self.params
    }

    /// Simulation grid.
    #[inline]
    pub fn grid(&self) -> &TimeGrid {
        &self.grid
    }

    /// Generates `n_paths` simulations from `rng`.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::Config`] if `n_paths` is outside
    /// `[1, MAX_PATHS]`.
    pub fn generate(
        &self,
        n_paths: usize,
        rng: &mut PricerRng,
    ) -> Result<SimulatedPaths, SimulationError> {
        if n_paths == 0 || n_paths > MAX_PATHS {
            return Err(ConfigError::InvalidPathCount(n_paths).into());
        }

        let n_points = self.grid.len();
        let dt = self.grid.dt();
        tracing::debug!(
            n_paths,
            n_points,
            dt,
            seed = rng.seed(),
            "generating credit/FX paths"
        );

        let mut hazard = PathMatrix::zeros(n_paths, n_points);
        let mut survival = PathMatrix::zeros(n_paths, n_points);
        let mut fx_plain = PathMatrix::zeros(n_paths, n_points);
        let mut fx_importance = PathMatrix::zeros(n_paths, n_points);
        let mut fx_deviation = PathMatrix::zeros(n_paths, n_points);
        let mut default_direct = Vec::with_capacity(n_paths);
        let mut default_importance = Vec::with_capacity(n_paths);
        let mut regions = Vec::with_capacity(n_paths);
        let mut importance_weights = Vec::with_capacity(n_paths);

        // FX shocks of the current path, reused across rows
        let mut dw_fx = vec![0.0; n_points];
        let drivers = self.params.drivers();

        for i in 0..n_paths {
            let h = hazard.row_mut(i);
            h[0] = self.params.hazard0();
            for j in 1..n_points {
                let (z1, z2) = (rng.gen_normal(), rng.gen_normal());
                let (dw_h, dw_x) = drivers.correlate(z1, z2);
                h[j] = self.step.hazard_step(h[j - 1], dw_h);
                dw_fx[j] = dw_x;
            }

            let h = hazard.row(i);
            let s = survival.row_mut(i);
            survival_probabilities(h, dt, s);

            let tau = sample_direct(s, rng.gen_open_uniform());
            let coin = rng.gen_uniform();
            let draw = sample_importance(s, coin, rng.gen_open_uniform());

            self.fill_fx(
                h,
                &dw_fx,
                tau,
                draw.default_time,
                fx_plain.row_mut(i),
                fx_importance.row_mut(i),
                fx_deviation.row_mut(i),
            );

            default_direct.push(tau);
            default_importance.push(draw.default_time);
            regions.push(draw.region);
            importance_weights.push(draw.weight);
        }

        let paths = SimulatedPaths::from_parts(SimulatedPathsParts {
            grid: self.grid.clone(),
            params: self.params,
            seed: rng.seed(),
            hazard,
            survival,
            fx_plain,
            fx_importance,
            fx_deviation,
            default_direct,
            default_importance,
            regions,
            importance_weights,
        });

        tracing::debug!(
            n_paths,
            direct_defaults = paths.direct_default_count(),
            importance_defaults = paths.importance_default_count(),
            "path generation complete"
        );
        Ok(paths)
    }

    #[allow(clippy::too_many_arguments)]
    fn fill_fx(
        &self,
        hazard: &[f64],
        dw_fx: &[f64],
        tau: DefaultTime,
        tau_importance: DefaultTime,
        plain: &mut [f64],
        importance: &mut [f64],
        deviation: &mut [f64],
    ) {
        let fx0 = self.params.fx0();
        let jump = self.step.jump_factor();

        plain[0] = fx0;
        importance[0] = fx0;
        deviation[0] = fx0 * jump;

        for j in 1..plain.len() {
            let d = self.step.fx_diffusion_factor(dw_fx[j]);
            let c = self.step.compensator(hazard[j - 1]);

            deviation[j] = deviation[j - 1] * d * c;
            plain[j] = plain[j - 1] * d * default_adjustment(tau, j, c, jump);
            importance[j] = importance[j - 1] * d * default_adjustment(tau_importance, j, c, jump);
        }
    }
}

/// Jump at the default step, compensator while alive, nothing afterwards.
#[inline]
fn default_adjustment(tau: DefaultTime, j: usize, compensator: f64, jump: f64) -> f64 {
    match tau {
        DefaultTime::At(k) if k == j => jump,
        _ if tau.survives(j) => compensator,
        _ => 1.0,
    }
}

/// Generates a batch for `config` on `grid`.
///
/// Seeds the RNG from `config.seed()`, or from entropy when unset (the drawn
/// seed is recorded in [`SimulatedPaths::seed`]).
///
/// # Errors
///
/// Returns [`SimulationError`] if the configuration is invalid.
pub fn generate_paths(
    grid: &TimeGrid,
    config: &SimulationConfig,
    params: &CreditFxParams,
) -> Result<SimulatedPaths, SimulationError> {
    config.validate()?;
    let mut rng = config
        .seed()
        .map_or_else(PricerRng::from_entropy, PricerRng::from_seed);
    CreditFxPathGenerator::new(*params, grid.clone())?.generate(config.n_paths(), &mut rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn grid() -> TimeGrid {
        TimeGrid::linspace(0.0, 1.0, 13).unwrap()
    }

    fn config(n_paths: usize, seed: u64) -> SimulationConfig {
        SimulationConfig::builder()
            .n_paths(n_paths)
            .seed(seed)
            .build()
            .unwrap()
    }

    #[test]
    fn test_shapes() {
        let paths = generate_paths(&grid(), &config(64, 1), &CreditFxParams::default()).unwrap();

        assert_eq!(paths.n_paths(), 64);
        assert_eq!(paths.n_points(), 13);
        for m in [
            paths.hazard(),
            paths.survival(),
            paths.fx_plain(),
            paths.fx_importance(),
            paths.fx_deviation(),
        ] {
            assert_eq!(m.shape(), (64, 13));
        }
        assert_eq!(paths.default_direct().len(), 64);
        assert_eq!(paths.default_importance().len(), 64);
        assert_eq!(paths.regions().len(), 64);
        assert_eq!(paths.importance_weights().len(), 64);
        assert_eq!(paths.seed(), 1);
    }

    #[test]
    fn test_initial_columns() {
        let params = CreditFxParams::default();
        let paths = generate_paths(&grid(), &config(32, 5), &params).unwrap();

        for i in 0..paths.n_paths() {
            assert_eq!(paths.hazard().get(i, 0), params.hazard0());
            assert_eq!(paths.survival().get(i, 0), 1.0);
            assert_eq!(paths.fx_plain().get(i, 0), params.fx0());
            assert_eq!(paths.fx_importance().get(i, 0), params.fx0());
            assert_relative_eq!(paths.fx_deviation().get(i, 0), params.fx0() * 1.3);
        }
    }

    #[test]
    fn test_plain_jump_at_default() {
        // High hazard so that direct defaults are common
        let params = CreditFxParams::new(2.0, 10.0, 0.0, 0.0, 0.0, 0.5).unwrap();
        let paths = generate_paths(&grid(), &config(200, 11), &params).unwrap();
        let step = params.discretise(paths.grid().dt()).unwrap();

        let mut checked = 0;
        for (i, tau) in paths.default_direct().iter().enumerate() {
            if let DefaultTime::At(k) = *tau {
                // Zero FX vol: only compensator and jump move the rate
                let row = paths.fx_plain().row(i);
                let expected_pre = 10.0 * step.compensator(2.0).powi(k as i32 - 1);
                assert_relative_eq!(row[k - 1], expected_pre, epsilon = 1e-12);
                assert_relative_eq!(row[k], expected_pre * 1.5, epsilon = 1e-12);
                // Flat after default
                for j in k + 1..row.len() {
                    assert_relative_eq!(row[j], row[k], epsilon = 1e-12);
                }
                checked += 1;
            }
        }
        assert!(checked > 0);
    }

    /// FX row under zero FX vol: compensator on the hazard at the start of
    /// each step while alive, the jump at `tau`, flat afterwards.
    fn zero_vol_fx_row(
        hazard: &[f64],
        dt: f64,
        fx0: f64,
        jump_factor: f64,
        tau: DefaultTime,
    ) -> Vec<f64> {
        let mut row = vec![fx0; hazard.len()];
        for j in 1..hazard.len() {
            let factor = match tau {
                DefaultTime::At(k) if k == j => jump_factor,
                DefaultTime::At(k) if k < j => 1.0,
                _ => (-hazard[j - 1] * dt * jump_factor.ln()).exp(),
            };
            row[j] = row[j - 1] * factor;
        }
        row
    }

    #[test]
    fn test_compensator_uses_hazard_at_step_start() {
        let params = CreditFxParams::new(0.5, 10.0, 0.8, 0.0, 0.0, 0.5).unwrap();
        let paths = generate_paths(&grid(), &config(200, 21), &params).unwrap();
        let dt = paths.grid().dt();
        let ln_jump = 1.5_f64.ln();

        for i in 0..paths.n_paths() {
            let h = paths.hazard().row(i);
            assert_ne!(h[1], h[0]);

            let deviation = paths.fx_deviation().row(i);
            assert_relative_eq!(deviation[0], 15.0, max_relative = 1e-14);
            for j in 1..deviation.len() {
                let expected = deviation[j - 1] * (-h[j - 1] * dt * ln_jump).exp();
                assert_relative_eq!(deviation[j], expected, max_relative = 1e-12);
            }
        }
    }

    #[test]
    fn test_jump_and_compensator_on_both_default_keyed_paths() {
        let params = CreditFxParams::new(0.5, 10.0, 0.8, 0.0, 0.0, 0.5).unwrap();
        let paths = generate_paths(&grid(), &config(300, 22), &params).unwrap();
        let dt = paths.grid().dt();

        let cases = [
            (paths.fx_plain(), paths.default_direct()),
            (paths.fx_importance(), paths.default_importance()),
        ];
        for (fx, taus) in cases {
            let mut defaults = 0;
            for (i, &tau) in taus.iter().enumerate() {
                let expected = zero_vol_fx_row(paths.hazard().row(i), dt, 10.0, 1.5, tau);
                for (got, want) in fx.row(i).iter().zip(&expected) {
                    assert_relative_eq!(*got, *want, max_relative = 1e-12);
                }
                if tau.is_default() {
                    defaults += 1;
                }
            }
            assert!(defaults > 0);
        }
    }

    #[test]
    fn test_batch_reassembles_from_parts() {
        let paths = generate_paths(&grid(), &config(16, 4), &CreditFxParams::default()).unwrap();
        let rebuilt = SimulatedPaths::from_parts(paths.clone().into_parts());

        assert_eq!(rebuilt.seed(), 4);
        assert_eq!(rebuilt.n_paths(), 16);
        assert_eq!(rebuilt.fx_importance(), paths.fx_importance());
        assert_eq!(rebuilt.default_importance(), paths.default_importance());
        assert_eq!(rebuilt.direct_default_count(), paths.direct_default_count());
    }

    #[test]
    fn test_zero_path_count_rejected() {
        let generator = CreditFxPathGenerator::new(CreditFxParams::default(), grid()).unwrap();
        let mut rng = PricerRng::from_seed(0);
        assert!(matches!(
            generator.generate(0, &mut rng),
            Err(SimulationError::Config(ConfigError::InvalidPathCount(0)))
        ));
    }

    #[test]
    fn test_unseeded_records_seed() {
        let unseeded = SimulationConfig::builder().n_paths(8).build().unwrap();
        let paths = generate_paths(&grid(), &unseeded, &CreditFxParams::default()).unwrap();

        let replay = generate_paths(&grid(), &config(8, paths.seed()), &CreditFxParams::default())
            .unwrap();
        assert_eq!(paths.fx_plain(), replay.fx_plain());
    }

    #[test]
    fn test_default_adjustment() {
        let c = 0.99;
        let jump = 1.3;
        assert_eq!(default_adjustment(DefaultTime::At(3), 2, c, jump), c);
        assert_eq!(default_adjustment(DefaultTime::At(3), 3, c, jump), jump);
        assert_eq!(default_adjustment(DefaultTime::At(3), 4, c, jump), 1.0);
        assert_eq!(default_adjustment(DefaultTime::AfterMaturity, 12, c, jump), c);
    }
}
