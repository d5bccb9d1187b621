// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — SEQA Kernel Configuration
// ─────────────────────────────────────────────────────────────────────

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::error::{SeqaError, SeqaResult};

/// Slider domain for α (syntropic gain).
pub const ALPHA_RANGE: RangeInclusive<f64> = 0.0..=1.0;
/// Slider domain for σ (noise volatility).
pub const SIGMA_RANGE: RangeInclusive<f64> = 0.0..=0.5;
/// Slider domain for k (routing efficiency).
pub const K_RANGE: RangeInclusive<f64> = 0.0..=2.0;
/// Slider domain for γ (energy decay).
pub const GAMMA_RANGE: RangeInclusive<f64> = 0.0..=1.0;
/// Step size used by the default configuration.
pub const DEFAULT_DT: f64 = 0.01;

/// Dynamics parameters, replaced wholesale by the presentation layer.
///
/// The engine accepts any values. Range checks are opt-in via
/// [`SimulationParams::validate`] / [`SimulationParams::clamped`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationParams {
    /// Pull of coherence toward 1.
    pub alpha: f64,
    /// Noise standard-deviation scale.
    pub sigma: f64,
    /// Coherence → routing gain.
    pub k: f64,
    /// Energy decay rate.
    pub gamma: f64,
    /// Fixed integration step.
    pub dt: f64,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            alpha: 0.1,
            sigma: 0.05,
            k: 0.8,
            gamma: 0.1,
            dt: DEFAULT_DT,
        }
    }
}

fn check_range(name: &str, value: f64, range: &RangeInclusive<f64>) -> SeqaResult<()> {
    if range.contains(&value) {
        Ok(())
    } else {
        Err(SeqaError::Validation(format!(
            "{name} must be in [{}, {}], got {value}",
            range.start(),
            range.end()
        )))
    }
}

impl SimulationParams {
    /// Check every parameter against the slider domain.
    pub fn validate(&self) -> SeqaResult<()> {
        check_range("alpha", self.alpha, &ALPHA_RANGE)?;
        check_range("sigma", self.sigma, &SIGMA_RANGE)?;
        check_range("k", self.k, &K_RANGE)?;
        check_range("gamma", self.gamma, &GAMMA_RANGE)?;
        if !(self.dt.is_finite() && self.dt > 0.0) {
            return Err(SeqaError::Validation(format!(
                "dt must be finite and > 0, got {}",
                self.dt
            )));
        }
        Ok(())
    }

    /// Copy with α, σ, k, γ clamped into their slider domains. `dt` is kept.
    pub fn clamped(&self) -> Self {
        let clamp = |v: f64, r: &RangeInclusive<f64>| {
            if v.is_nan() {
                *r.start()
            } else {
                v.clamp(*r.start(), *r.end())
            }
        };
        Self {
            alpha: clamp(self.alpha, &ALPHA_RANGE),
            sigma: clamp(self.sigma, &SIGMA_RANGE),
            k: clamp(self.k, &K_RANGE),
            gamma: clamp(self.gamma, &GAMMA_RANGE),
            dt: self.dt,
        }
    }
}

/// Runtime configuration for a simulation engine and its controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Wall-clock tick period of the controller.
    /// Default: 10.
    pub tick_interval_ms: u64,

    /// Record (and publish) every Nth integrator step.
    /// Default: 5.
    pub decimation: u64,

    /// Maximum points per history series; oldest are evicted first.
    /// Default: 500.
    pub history_capacity: usize,

    /// Number of most recent points averaged for steady values.
    /// Default: 100.
    pub analysis_window: usize,

    /// Energy level the stability test is centred on.
    /// Default: 1.0.
    pub energy_setpoint: f64,

    /// `Stable` iff |steady energy - setpoint| is strictly below this.
    /// Default: 0.2.
    pub stability_tolerance: f64,

    /// Geometric decay applied to pending influence after each step.
    /// Default: 0.95.
    pub influence_decay: f64,

    /// Seed for the normal source. `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 10,
            decimation: 5,
            history_capacity: 500,
            analysis_window: 100,
            energy_setpoint: 1.0,
            stability_tolerance: 0.2,
            influence_decay: 0.95,
            seed: None,
        }
    }
}

impl EngineConfig {
    /// Validate configuration parameters.
    pub fn validate(&self) -> SeqaResult<()> {
        if self.tick_interval_ms == 0 {
            return Err(SeqaError::Config(
                "tick_interval_ms must be > 0".to_string(),
            ));
        }
        if self.decimation == 0 {
            return Err(SeqaError::Config("decimation must be >= 1".to_string()));
        }
        if self.history_capacity == 0 {
            return Err(SeqaError::Config(
                "history_capacity must be >= 1".to_string(),
            ));
        }
        if self.analysis_window == 0 {
            return Err(SeqaError::Config(
                "analysis_window must be >= 1".to_string(),
            ));
        }
        if self.analysis_window > self.history_capacity {
            return Err(SeqaError::Config(format!(
                "analysis_window ({}) must not exceed history_capacity ({})",
                self.analysis_window, self.history_capacity
            )));
        }
        if !self.energy_setpoint.is_finite() {
            return Err(SeqaError::Config(format!(
                "energy_setpoint must be finite, got {}",
                self.energy_setpoint
            )));
        }
        if !(self.stability_tolerance.is_finite() && self.stability_tolerance > 0.0) {
            return Err(SeqaError::Config(format!(
                "stability_tolerance must be finite and > 0, got {}",
                self.stability_tolerance
            )));
        }
        if !(0.0..=1.0).contains(&self.influence_decay) {
            return Err(SeqaError::Config(format!(
                "influence_decay must be in [0, 1], got {}",
                self.influence_decay
            )));
        }
        Ok(())
    }

    /// Load from JSON string. Missing fields take their defaults.
    pub fn from_json(json: &str) -> SeqaResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| SeqaError::Config(format!("JSON parse error: {e}")))
    }
}
