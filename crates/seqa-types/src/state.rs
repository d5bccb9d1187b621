// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — SEQA Kernel State Types
// ─────────────────────────────────────────────────────────────────────

use std::fmt;

use serde::{Deserialize, Serialize};

/// Clamp a value to [lo, hi], mapping NaN to lo and Inf to the nearest bound.
///
/// Finite values behave exactly like `f64::clamp`. A NaN state (from
/// NaN influence or a degenerate parameter set) carries no direction,
/// so it lands on the lower bound: coherence 0 and energy 0 are the
/// collapsed state the system can recover from, and `f64::clamp` would
/// otherwise pass the NaN through and poison every later step.
#[inline]
pub fn clamp_bounded(value: f64, lo: f64, hi: f64) -> f64 {
    if value.is_nan() {
        log::warn!("clamp_bounded: NaN detected, clamping to {lo:.4}");
        return lo;
    }
    if value.is_infinite() {
        let boundary = if value > 0.0 { hi } else { lo };
        log::warn!("clamp_bounded: Inf detected, clamping to {boundary:.4}");
        return boundary;
    }
    value.clamp(lo, hi)
}

/// Instantaneous state of the coupled coherence/energy system.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationState {
    /// SEQA coherence C ∈ [0, 1].
    pub coherence: f64,
    /// DPS energy E ∈ [0, 2].
    pub energy: f64,
    /// Routing R = k · C, as computed in the step that produced this state.
    pub routing: f64,
}

impl SimulationState {
    /// State every engine starts from and returns to on reset.
    pub const INITIAL: Self = Self {
        coherence: 0.5,
        energy: 1.0,
        routing: 0.4,
    };
}

impl Default for SimulationState {
    fn default() -> Self {
        Self::INITIAL
    }
}

/// Screen-pixel → influence gain used by the drag handler.
pub const DRAG_INFLUENCE_GAIN: f64 = 0.001;

/// An additive perturbation to coherence and energy.
///
/// Used both for the deltas pushed in by the user and for the pending
/// amount held by the accumulator. Unbounded in sign and magnitude.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Influence {
    pub coherence: f64,
    pub energy: f64,
}

impl Influence {
    pub const ZERO: Self = Self {
        coherence: 0.0,
        energy: 0.0,
    };

    pub fn new(coherence: f64, energy: f64) -> Self {
        Self { coherence, energy }
    }

    /// Map a pointer drag (pixels) to an influence delta.
    ///
    /// Horizontal motion pushes coherence, vertical motion pushes energy.
    /// Screen Y grows downward, so dragging up raises energy.
    pub fn from_drag(dx: f64, dy: f64) -> Self {
        Self {
            coherence: dx * DRAG_INFLUENCE_GAIN,
            energy: -dy * DRAG_INFLUENCE_GAIN,
        }
    }

    pub fn scaled(self, factor: f64) -> Self {
        Self {
            coherence: self.coherence * factor,
            energy: self.energy * factor,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.coherence == 0.0 && self.energy == 0.0
    }
}

impl std::ops::Add for Influence {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            coherence: self.coherence + rhs.coherence,
            energy: self.energy + rhs.energy,
        }
    }
}

impl std::ops::AddAssign for Influence {
    fn add_assign(&mut self, rhs: Self) {
        self.coherence += rhs.coherence;
        self.energy += rhs.energy;
    }
}

/// One recorded sample of a single series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistoryPoint {
    pub step: u64,
    pub value: f64,
}

/// Three index-aligned series of recorded samples, oldest first.
///
/// Always handed out as an owned copy; mutating it does not touch the
/// engine's buffer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationHistory {
    pub coherence: Vec<HistoryPoint>,
    pub energy: Vec<HistoryPoint>,
    pub routing: Vec<HistoryPoint>,
}

impl SimulationHistory {
    /// Number of recorded points (the coherence series is authoritative).
    pub fn len(&self) -> usize {
        self.coherence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coherence.is_empty()
    }

    /// Step of the most recent recorded point, if any.
    pub fn last_step(&self) -> Option<u64> {
        self.coherence.last().map(|p| p.step)
    }
}

/// Steady-state classification of the energy series.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stability {
    /// Not enough history yet.
    #[default]
    Calculating,
    Stable,
    Unstable,
}

impl fmt::Display for Stability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stability::Calculating => f.write_str("Calculating..."),
            Stability::Stable => f.write_str("Stable"),
            Stability::Unstable => f.write_str("Unstable"),
        }
    }
}

/// Rolling-window analysis derived from the latest history.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationAnalysis {
    pub steady_coherence: f64,
    pub steady_energy: f64,
    pub stability: Stability,
}

impl SimulationAnalysis {
    /// `{0, 0, Calculating}`.
    pub const CALCULATING: Self = Self {
        steady_coherence: 0.0,
        steady_energy: 0.0,
        stability: Stability::Calculating,
    };
}

/// Everything the presentation layer reads after a recorded step.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationFrame {
    /// Integrator steps taken since the last reset.
    pub step: u64,
    pub state: SimulationState,
    pub history: SimulationHistory,
    pub analysis: SimulationAnalysis,
}
