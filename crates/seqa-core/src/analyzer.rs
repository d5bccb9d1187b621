// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — Stability Analyzer
// ─────────────────────────────────────────────────────────────────────
//! Rolling-window steady values and the energy stability test.
//!
//! Stable iff |mean(E over last window) - setpoint| < tolerance.
//! Until a full window of history exists the result is
//! `{0, 0, Calculating}`.

use seqa_types::{EngineConfig, HistoryPoint, SimulationAnalysis, SimulationHistory, Stability};

/// Stateless classifier over a history snapshot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StabilityAnalyzer {
    window: usize,
    energy_setpoint: f64,
    tolerance: f64,
}

impl Default for StabilityAnalyzer {
    fn default() -> Self {
        Self::from_config(&EngineConfig::default())
    }
}

fn tail_mean(series: &[HistoryPoint], window: usize) -> f64 {
    let tail = &series[series.len() - window..];
    tail.iter().map(|p| p.value).sum::<f64>() / window as f64
}

impl StabilityAnalyzer {
    pub fn new(window: usize, energy_setpoint: f64, tolerance: f64) -> Self {
        Self {
            window: window.max(1),
            energy_setpoint,
            tolerance,
        }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(
            config.analysis_window,
            config.energy_setpoint,
            config.stability_tolerance,
        )
    }

    pub fn window(&self) -> usize {
        self.window
    }

    /// Classify the last `window` points of `history`.
    pub fn analyze(&self, history: &SimulationHistory) -> SimulationAnalysis {
        if history.coherence.len() < self.window || history.energy.len() < self.window {
            return SimulationAnalysis::CALCULATING;
        }

        let steady_coherence = tail_mean(&history.coherence, self.window);
        let steady_energy = tail_mean(&history.energy, self.window);
        let stability = if (steady_energy - self.energy_setpoint).abs() < self.tolerance {
            Stability::Stable
        } else {
            Stability::Unstable
        };

        SimulationAnalysis {
            steady_coherence,
            steady_energy,
            stability,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn synthetic(
        n: usize,
        coherence: impl Fn(usize) -> f64,
        energy: impl Fn(usize) -> f64,
    ) -> SimulationHistory {
        let mut h = SimulationHistory::default();
        for i in 0..n {
            let step = 5 * (i as u64 + 1);
            h.coherence.push(HistoryPoint {
                step,
                value: coherence(i),
            });
            h.energy.push(HistoryPoint {
                step,
                value: energy(i),
            });
            h.routing.push(HistoryPoint {
                step,
                value: 0.8 * coherence(i),
            });
        }
        h
    }

    #[test]
    fn test_calculating_below_window() {
        let h = synthetic(99, |_| 0.9, |_| 1.0);
        let a = StabilityAnalyzer::default().analyze(&h);
        assert_eq!(a, SimulationAnalysis::CALCULATING);
    }

    #[test]
    fn test_empty_history_calculating() {
        let a = StabilityAnalyzer::default().analyze(&SimulationHistory::default());
        assert_eq!(a.stability, Stability::Calculating);
        assert_eq!(a.steady_energy, 0.0);
    }

    #[test]
    fn test_stable_near_setpoint() {
        let h = synthetic(100, |_| 0.9, |_| 1.05);
        let a = StabilityAnalyzer::default().analyze(&h);
        assert_eq!(a.stability, Stability::Stable);
        assert!((a.steady_energy - 1.05).abs() < 1e-12);
        assert!((a.steady_coherence - 0.9).abs() < 1e-12);
    }

    #[test]
    fn test_unstable_far_from_setpoint() {
        let h = synthetic(100, |_| 0.9, |_| 1.5);
        let a = StabilityAnalyzer::default().analyze(&h);
        assert_eq!(a.stability, Stability::Unstable);
        assert!((a.steady_energy - 1.5).abs() < 1e-12);
    }

    #[test]
    fn test_unstable_below_setpoint() {
        let h = synthetic(120, |_| 0.1, |_| 0.5);
        assert_eq!(
            StabilityAnalyzer::default().analyze(&h).stability,
            Stability::Unstable
        );
    }

    #[test]
    fn test_only_last_window_counts() {
        // First 50 points far off, last 100 exactly on setpoint.
        let h = synthetic(
            150,
            |i| if i < 50 { 0.0 } else { 1.0 },
            |i| if i < 50 { 2.0 } else { 1.0 },
        );
        let a = StabilityAnalyzer::default().analyze(&h);
        assert_eq!(a.stability, Stability::Stable);
        assert!((a.steady_energy - 1.0).abs() < 1e-12);
        assert!((a.steady_coherence - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_mean_over_alternating_values() {
        let h = synthetic(100, |i| (i % 2) as f64, |i| if i % 2 == 0 { 0.9 } else { 1.3 });
        let a = StabilityAnalyzer::default().analyze(&h);
        assert!((a.steady_coherence - 0.5).abs() < 1e-12);
        assert!((a.steady_energy - 1.1).abs() < 1e-12);
        assert_eq!(a.stability, Stability::Stable);
    }

    #[test]
    fn test_custom_window_and_tolerance() {
        let analyzer = StabilityAnalyzer::new(10, 1.5, 0.05);
        let h = synthetic(10, |_| 0.5, |_| 1.52);
        assert_eq!(analyzer.analyze(&h).stability, Stability::Stable);
        let h = synthetic(10, |_| 0.5, |_| 1.6);
        assert_eq!(analyzer.analyze(&h).stability, Stability::Unstable);
    }
}
