// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — SEQA Simulation Engine
// ─────────────────────────────────────────────────────────────────────
//! Single owner of all mutable simulation state: current state, step
//! counter, decimated history, latest analysis. The influence
//! accumulator is shared (`Arc`) so input can arrive from any thread.
//!
//! Per step:
//!   1. Consume pending influence (decayed in place for the next step)
//!   2. Integrate one Euler-Maruyama step
//!   3. On every `decimation`-th step: record history, re-analyse,
//!      return a `SimulationFrame` for publication

use std::sync::Arc;

use seqa_physics::{BoxMuller, Integrator, NormalSource};
use seqa_types::{
    EngineConfig, Influence, SeqaResult, SimulationAnalysis, SimulationFrame, SimulationHistory,
    SimulationParams, SimulationState,
};

use crate::analyzer::StabilityAnalyzer;
use crate::history::HistoryBuffer;
use crate::influence::InfluenceAccumulator;

/// The cohesive mutable unit behind a simulation run.
pub struct SimulationEngine<N = BoxMuller> {
    config: EngineConfig,
    integrator: Integrator<N>,
    influence: Arc<InfluenceAccumulator>,
    state: SimulationState,
    history: HistoryBuffer,
    analyzer: StabilityAnalyzer,
    analysis: SimulationAnalysis,
    step_count: u64,
}

impl SimulationEngine<BoxMuller> {
    /// Create an engine with Box-Muller noise seeded from `config.seed`.
    pub fn new(config: EngineConfig) -> SeqaResult<Self> {
        let noise = BoxMuller::from_seed_option(config.seed);
        Self::with_noise(config, noise)
    }
}

impl<N: NormalSource> SimulationEngine<N> {
    /// Create an engine with an explicit noise source.
    pub fn with_noise(config: EngineConfig, noise: N) -> SeqaResult<Self> {
        config.validate()?;
        log::info!(
            "SEQA engine: decimation={} capacity={} window={} decay={}",
            config.decimation,
            config.history_capacity,
            config.analysis_window,
            config.influence_decay
        );
        Ok(Self {
            integrator: Integrator::with_decay(noise, config.influence_decay),
            influence: Arc::new(InfluenceAccumulator::new()),
            state: SimulationState::INITIAL,
            history: HistoryBuffer::new(config.history_capacity, config.decimation),
            analyzer: StabilityAnalyzer::from_config(&config),
            analysis: SimulationAnalysis::CALCULATING,
            step_count: 0,
            config,
        })
    }

    /// Advance one step.
    ///
    /// Returns a frame only when the step was recorded into history.
    pub fn step(&mut self, params: &SimulationParams) -> Option<SimulationFrame> {
        let pending = self.influence.consume(self.integrator.influence_decay());
        self.state = self.integrator.advance(&self.state, pending, params);
        self.step_count += 1;

        if !self.history.record(self.step_count, &self.state) {
            return None;
        }

        let history = self.history.snapshot();
        self.analysis = self.analyzer.analyze(&history);
        log::debug!(
            "step {}: C={:.4} E={:.4} R={:.4} history={} {}",
            self.step_count,
            self.state.coherence,
            self.state.energy,
            self.state.routing,
            history.len(),
            self.analysis.stability
        );
        Some(SimulationFrame {
            step: self.step_count,
            state: self.state,
            history,
            analysis: self.analysis,
        })
    }

    /// Run `n_steps` and return the last frame produced, if any.
    pub fn run(&mut self, params: &SimulationParams, n_steps: u64) -> Option<SimulationFrame> {
        let mut last = None;
        for _ in 0..n_steps {
            if let Some(frame) = self.step(params) {
                last = Some(frame);
            }
        }
        last
    }

    /// Back to the initial state: empty history, zero influence, step 0.
    pub fn reset(&mut self) {
        self.state = SimulationState::INITIAL;
        self.history.clear();
        self.influence.clear();
        self.analysis = SimulationAnalysis::CALCULATING;
        self.step_count = 0;
    }

    pub fn apply_influence(&self, delta: Influence) {
        self.influence.apply(delta);
    }

    /// Shared handle to the accumulator, for input paths that must not
    /// wait on the engine.
    pub fn influence(&self) -> Arc<InfluenceAccumulator> {
        Arc::clone(&self.influence)
    }

    pub fn state(&self) -> SimulationState {
        self.state
    }

    pub fn step_count(&self) -> u64 {
        self.step_count
    }

    pub fn analysis(&self) -> SimulationAnalysis {
        self.analysis
    }

    pub fn history(&self) -> SimulationHistory {
        self.history.snapshot()
    }

    /// Frame for the current state, whether or not it was recorded.
    pub fn frame(&self) -> SimulationFrame {
        SimulationFrame {
            step: self.step_count,
            state: self.state,
            history: self.history.snapshot(),
            analysis: self.analysis,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}
