// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — SEQA/DPS Canonical Constants
// ─────────────────────────────────────────────────────────────────────
//! Hard bounds and fixed targets of the coherence/energy dynamics.

/// Lower bound of coherence C.
pub const COHERENCE_MIN: f64 = 0.0;
/// Upper bound of coherence C.
pub const COHERENCE_MAX: f64 = 1.0;
/// Level the Ornstein-Uhlenbeck drift pulls coherence toward.
pub const COHERENCE_TARGET: f64 = 1.0;

/// Lower bound of energy E.
pub const ENERGY_MIN: f64 = 0.0;
/// Upper bound of energy E.
pub const ENERGY_MAX: f64 = 2.0;

/// Per-step geometric decay of pending user influence.
pub const INFLUENCE_DECAY: f64 = 0.95;

#[cfg(test)]
mod tests {
    use super::*;
    use seqa_types::{EngineConfig, SimulationState};

    #[test]
    fn test_initial_state_inside_bounds() {
        let s = SimulationState::INITIAL;
        assert!((COHERENCE_MIN..=COHERENCE_MAX).contains(&s.coherence));
        assert!((ENERGY_MIN..=ENERGY_MAX).contains(&s.energy));
    }

    #[test]
    fn test_config_decay_matches_canonical() {
        assert_eq!(EngineConfig::default().influence_decay, INFLUENCE_DECAY);
    }
}
