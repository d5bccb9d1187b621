// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — SEQA Physics Engine
// (C) 1998-2026 Miroslav Sotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
#![deny(unsafe_code)]
//! SEQA/DPS physics: Box-Muller normal source and the fixed-step
//! Euler-Maruyama integrator for the coupled coherence/energy system.

pub mod integrator;
pub mod noise;
pub mod params;

pub use integrator::Integrator;
pub use noise::{BoxMuller, FixedNormal, NormalSource};
pub use params::{
    COHERENCE_MAX, COHERENCE_MIN, COHERENCE_TARGET, ENERGY_MAX, ENERGY_MIN, INFLUENCE_DECAY,
};
