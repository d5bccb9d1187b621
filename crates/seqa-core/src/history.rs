// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — Decimated History Buffer
// ─────────────────────────────────────────────────────────────────────
//! Bounded FIFO of recorded states.
//!
//! Stored as one ring of composite records, so the three public series
//! cannot drift out of alignment: they are projections of the same ring.

use std::collections::{vec_deque, VecDeque};

use seqa_types::{HistoryPoint, SimulationHistory, SimulationState};

/// One recorded step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistoryRecord {
    pub step: u64,
    pub coherence: f64,
    pub energy: f64,
    pub routing: f64,
}

/// Fixed-capacity ring, appended every `decimation`-th step.
#[derive(Debug, Clone)]
pub struct HistoryBuffer {
    records: VecDeque<HistoryRecord>,
    capacity: usize,
    decimation: u64,
}

impl HistoryBuffer {
    pub fn new(capacity: usize, decimation: u64) -> Self {
        Self {
            records: VecDeque::with_capacity(capacity + 1),
            capacity,
            decimation: decimation.max(1),
        }
    }

    /// Record `state` if `step` falls on the decimation grid.
    ///
    /// Returns whether a point was appended.
    pub fn record(&mut self, step: u64, state: &SimulationState) -> bool {
        if step % self.decimation != 0 {
            return false;
        }
        self.records.push_back(HistoryRecord {
            step,
            coherence: state.coherence,
            energy: state.energy,
            routing: state.routing,
        });
        while self.records.len() > self.capacity {
            self.records.pop_front();
        }
        true
    }

    /// Owned copy split into the three public series.
    pub fn snapshot(&self) -> SimulationHistory {
        let n = self.records.len();
        let mut history = SimulationHistory {
            coherence: Vec::with_capacity(n),
            energy: Vec::with_capacity(n),
            routing: Vec::with_capacity(n),
        };
        for r in &self.records {
            history.coherence.push(HistoryPoint {
                step: r.step,
                value: r.coherence,
            });
            history.energy.push(HistoryPoint {
                step: r.step,
                value: r.energy,
            });
            history.routing.push(HistoryPoint {
                step: r.step,
                value: r.routing,
            });
        }
        history
    }

    pub fn iter(&self) -> vec_deque::Iter<'_, HistoryRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn decimation(&self) -> u64 {
        self.decimation
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(c: f64) -> SimulationState {
        SimulationState {
            coherence: c,
            energy: 2.0 * c,
            routing: 0.8 * c,
        }
    }

    #[test]
    fn test_records_only_on_decimation_grid() {
        let mut buf = HistoryBuffer::new(500, 5);
        let appended: Vec<u64> = (1..=23)
            .filter(|&step| buf.record(step, &state(0.5)))
            .collect();
        assert_eq!(appended, vec![5, 10, 15, 20]);
        assert_eq!(buf.len(), 4);
    }

    #[test]
    fn test_evicts_oldest_first() {
        let mut buf = HistoryBuffer::new(3, 1);
        for step in 1..=5 {
            buf.record(step, &state(step as f64 / 10.0));
        }
        let steps: Vec<u64> = buf.iter().map(|r| r.step).collect();
        assert_eq!(steps, vec![3, 4, 5]);
    }

    #[test]
    fn test_snapshot_series_aligned() {
        let mut buf = HistoryBuffer::new(500, 5);
        for step in 1..=3_000 {
            buf.record(step, &state((step % 10) as f64 / 10.0));
        }
        let h = buf.snapshot();
        assert_eq!(h.coherence.len(), 500);
        assert_eq!(h.energy.len(), 500);
        assert_eq!(h.routing.len(), 500);
        for i in 0..500 {
            assert_eq!(h.coherence[i].step, h.energy[i].step);
            assert_eq!(h.coherence[i].step, h.routing[i].step);
        }
        assert_eq!(h.coherence[0].step, 505);
        assert_eq!(h.last_step(), Some(3_000));
    }

    #[test]
    fn test_snapshot_is_detached() {
        let mut buf = HistoryBuffer::new(10, 1);
        buf.record(1, &state(0.3));
        let mut snap = buf.snapshot();
        snap.coherence.clear();
        buf.record(2, &state(0.4));
        assert_eq!(buf.len(), 2);
        assert!(snap.coherence.is_empty());
    }

    #[test]
    fn test_clear() {
        let mut buf = HistoryBuffer::new(10, 1);
        buf.record(1, &state(0.3));
        buf.clear();
        assert!(buf.is_empty());
        assert!(buf.snapshot().is_empty());
    }

    #[test]
    fn test_zero_decimation_treated_as_every_step() {
        let mut buf = HistoryBuffer::new(10, 0);
        assert_eq!(buf.decimation(), 1);
        assert!(buf.record(7, &state(0.1)));
    }
}
