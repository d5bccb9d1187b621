// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — SEQA Kernel Engine Benchmarks
// ─────────────────────────────────────────────────────────────────────
//! Criterion benchmarks for the per-tick hot path. One tick has a
//! 10 ms budget; a recorded step (snapshot + analysis) is the worst case.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use seqa_core::{HistoryBuffer, SimulationEngine, StabilityAnalyzer};
use seqa_physics::Integrator;
use seqa_types::{EngineConfig, Influence, SimulationParams, SimulationState};

fn seeded_engine() -> SimulationEngine {
    SimulationEngine::new(EngineConfig {
        seed: Some(42),
        ..Default::default()
    })
    .expect("default config is valid")
}

fn full_history() -> HistoryBuffer {
    let mut buf = HistoryBuffer::new(500, 5);
    let mut integrator = Integrator::seeded(7);
    let params = SimulationParams::default();
    let mut state = SimulationState::INITIAL;
    for step in 1..=2_500 {
        state = integrator.advance(&state, Influence::ZERO, &params);
        buf.record(step, &state);
    }
    buf
}

// ── Integrator ──────────────────────────────────────────────────────

fn bench_integrator_step(c: &mut Criterion) {
    let mut integrator = Integrator::seeded(1);
    let params = SimulationParams::default();
    let state = SimulationState::INITIAL;
    c.bench_function("integrator_step", |b| {
        b.iter(|| integrator.step(black_box(&state), Influence::new(0.001, -0.001), &params))
    });
}

// ── Engine ──────────────────────────────────────────────────────────

fn bench_engine_step(c: &mut Criterion) {
    let mut engine = seeded_engine();
    engine.run(&SimulationParams::default(), 2_500);
    let params = SimulationParams::default();
    c.bench_function("engine_step_full_history", |b| {
        b.iter(|| engine.step(black_box(&params)))
    });
}

fn bench_engine_1000_steps(c: &mut Criterion) {
    let params = SimulationParams::default();
    c.bench_function("engine_1000_steps", |b| {
        b.iter(|| {
            let mut engine = seeded_engine();
            engine.run(black_box(&params), 1_000)
        })
    });
}

// ── History + analysis ──────────────────────────────────────────────

fn bench_history_snapshot(c: &mut Criterion) {
    let buf = full_history();
    c.bench_function("history_snapshot_500", |b| b.iter(|| black_box(&buf).snapshot()));
}

fn bench_analyze(c: &mut Criterion) {
    let history = full_history().snapshot();
    let analyzer = StabilityAnalyzer::default();
    c.bench_function("analyze_500", |b| b.iter(|| analyzer.analyze(black_box(&history))));
}

criterion_group!(
    benches,
    bench_integrator_step,
    bench_engine_step,
    bench_engine_1000_steps,
    bench_history_snapshot,
    bench_analyze,
);
criterion_main!(benches);
