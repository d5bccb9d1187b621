// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — SEQA Kernel Types
// (C) 1998-2026 Miroslav Sotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
#![deny(unsafe_code)]
//! Type definitions, configuration, and error hierarchy for the
//! SEQA coherence/energy simulation kernel.
//!
//! Everything here is plain data: the integrator lives in
//! `seqa-physics`, the engine and tick controller in `seqa-core`.

pub mod config;
pub mod error;
pub mod state;

pub use config::{
    EngineConfig, SimulationParams, ALPHA_RANGE, DEFAULT_DT, GAMMA_RANGE, K_RANGE, SIGMA_RANGE,
};
pub use error::{SeqaError, SeqaResult};
pub use state::{
    clamp_bounded, HistoryPoint, Influence, SimulationAnalysis, SimulationFrame, SimulationHistory,
    SimulationState, Stability, DRAG_INFLUENCE_GAIN,
};
