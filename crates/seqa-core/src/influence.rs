// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — Influence Accumulator
// ─────────────────────────────────────────────────────────────────────
//! Pending user perturbation shared between the input path (pointer
//! drags, arbitrary threads) and the step path (ticker thread).
//!
//! Both read-modify-write operations run under one lock, so an
//! `apply` can never be lost inside a step's consume-and-decay.

use parking_lot::Mutex;

use seqa_types::Influence;

/// Thread-safe additive accumulator with geometric decay.
#[derive(Debug, Default)]
pub struct InfluenceAccumulator {
    pending: Mutex<Influence>,
}

impl InfluenceAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `delta` to the pending influence. No clamping.
    pub fn apply(&self, delta: Influence) {
        *self.pending.lock() += delta;
    }

    /// Take the full pending amount for this step and leave
    /// `pending * decay` behind for the next one.
    pub fn consume(&self, decay: f64) -> Influence {
        let mut pending = self.pending.lock();
        let current = *pending;
        *pending = current.scaled(decay);
        current
    }

    /// Current pending amount without touching it.
    pub fn pending(&self) -> Influence {
        *self.pending.lock()
    }

    pub fn clear(&self) {
        *self.pending.lock() = Influence::ZERO;
    }
}
