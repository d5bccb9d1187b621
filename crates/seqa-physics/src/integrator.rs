// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — SEQA/DPS Euler-Maruyama Integrator
// ─────────────────────────────────────────────────────────────────────
//! Fixed-step integrator for the coupled system:
//!
//!   dC = α (1 - C) dt + σ dW          (SEQA coherence, OU toward 1)
//!   R  = k · C                        (routing)
//!   dE = (R - γ E) dt                 (DPS energy regulation)
//!
//! with C clipped to [0, 1] and E clipped to [0, 2] after each update.
//! Pending user influence is merged into C and E before the update and
//! only decays afterwards, so a fresh delta lands at full strength.

use seqa_types::{clamp_bounded, Influence, SimulationParams, SimulationState};

use crate::noise::{BoxMuller, NormalSource};
use crate::params::{
    COHERENCE_MAX, COHERENCE_MIN, COHERENCE_TARGET, ENERGY_MAX, ENERGY_MIN, INFLUENCE_DECAY,
};

/// Euler-Maruyama single-step integrator.
#[derive(Debug, Clone)]
pub struct Integrator<N = BoxMuller> {
    noise: N,
    influence_decay: f64,
}

impl Integrator<BoxMuller> {
    /// OS-seeded noise, canonical influence decay.
    pub fn from_entropy() -> Self {
        Self::new(BoxMuller::from_entropy())
    }

    pub fn seeded(seed: u64) -> Self {
        Self::new(BoxMuller::seeded(seed))
    }
}

impl<N: NormalSource> Integrator<N> {
    pub fn new(noise: N) -> Self {
        Self::with_decay(noise, INFLUENCE_DECAY)
    }

    pub fn with_decay(noise: N, influence_decay: f64) -> Self {
        Self {
            noise,
            influence_decay,
        }
    }

    pub fn influence_decay(&self) -> f64 {
        self.influence_decay
    }

    /// Advance `state` by one step with `pending` influence merged in.
    ///
    /// Draws exactly one dW ~ N(0, dt). Never fails; non-finite
    /// intermediates are absorbed by the clamps.
    pub fn advance(
        &mut self,
        state: &SimulationState,
        pending: Influence,
        params: &SimulationParams,
    ) -> SimulationState {
        let SimulationParams {
            alpha,
            sigma,
            k,
            gamma,
            dt,
        } = *params;

        let mut c = state.coherence + pending.coherence;
        let mut e = state.energy + pending.energy;

        let dw = self.noise.sample(0.0, dt.sqrt());
        c += alpha * (COHERENCE_TARGET - c) * dt + sigma * dw;
        c = clamp_bounded(c, COHERENCE_MIN, COHERENCE_MAX);

        let r = k * c;
        e += (r - gamma * e) * dt;
        e = clamp_bounded(e, ENERGY_MIN, ENERGY_MAX);

        SimulationState {
            coherence: c,
            energy: e,
            routing: r,
        }
    }

    /// Pure form of one step: returns the next state and the influence
    /// left pending for the step after (the consumed amount, decayed).
    pub fn step(
        &mut self,
        state: &SimulationState,
        influence: Influence,
        params: &SimulationParams,
    ) -> (SimulationState, Influence) {
        let next_influence = influence.scaled(self.influence_decay);
        let next = self.advance(state, influence, params);
        (next, next_influence)
    }

    /// Run `n_steps` with no further influence after the initial one.
    pub fn run(
        &mut self,
        initial: &SimulationState,
        influence: Influence,
        params: &SimulationParams,
        n_steps: u64,
    ) -> (SimulationState, Influence) {
        let mut state = *initial;
        let mut pending = influence;
        for _ in 0..n_steps {
            (state, pending) = self.step(&state, pending, params);
        }
        (state, pending)
    }
}
