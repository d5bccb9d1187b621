// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — SEQA Kernel Core Engine
// (C) 1998-2026 Miroslav Sotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
#![deny(unsafe_code)]
//! Simulation engine, decimated history, stability analysis, and the
//! tick controller for the SEQA coherence/energy system.
//!
//! # Invariants
//!
//! 1. **Bounded state**: every emitted state has C ∈ [0, 1] and
//!    E ∈ [0, 2], for any parameters and any influence sequence.
//!    Non-finite intermediates clamp to a bound instead of propagating.
//!
//! 2. **Aligned history**: the three published series are projections
//!    of one ring of composite records; they always have equal length,
//!    never more than `history_capacity`.
//!
//! 3. **Atomic steps**: one engine lock covers a whole step. Influence
//!    writes go through a separate accumulator lock whose
//!    consume-and-decay is a single critical section, so input never
//!    waits on a step and an applied delta is never lost.
//!
//! 4. **Synchronous cancellation**: when `stop()`/`reset()` return, the
//!    ticker thread has been joined and no further step can run.
//!
//! 5. **Detached reads**: frames handed to getters and observers are
//!    owned copies; later eviction never touches them.

pub mod analyzer;
pub mod controller;
pub mod engine;
pub mod history;
pub mod influence;

pub use analyzer::StabilityAnalyzer;
pub use controller::{Observer, ObserverId, SimulationController};
pub use engine::SimulationEngine;
pub use history::{HistoryBuffer, HistoryRecord};
pub use influence::InfluenceAccumulator;
