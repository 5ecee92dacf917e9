// ─────────────────────────────────────────────────────────────────────
// SCPN Reactor Kinetics — Solver Benchmarks
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Hot-path benchmark: one coupled implicit tick at the nominal 5 ms
//! period. Accelerated playback runs thousands of these per wall-clock
//! update, so the per-tick cost bounds the achievable speedup.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use reactor_physics::solver::{CoupledSolver, ReactorDynamics};
use reactor_types::config::ReactorConfig;
use reactor_types::state::ReactorState;

fn bench_advance_tick(c: &mut Criterion) {
    let cfg = ReactorConfig::default();
    let dynamics = ReactorDynamics::new(&cfg);
    let solver = CoupledSolver::new(cfg.solver.clone());
    let base = ReactorState::from_initial(&cfg.initial, cfg.physics.neutron_lifetime_s);

    c.bench_function("advance_tick_critical", |b| {
        b.iter(|| {
            let mut state = base.clone();
            state.rod_position_pct = 50.0;
            solver
                .advance_tick(&dynamics, black_box(&mut state), 200.0, 0.005, 0.0)
                .unwrap();
            black_box(state.neutron_density)
        })
    });

    c.bench_function("advance_tick_transient", |b| {
        b.iter(|| {
            let mut state = base.clone();
            state.rod_position_pct = 100.0;
            solver
                .advance_tick(&dynamics, black_box(&mut state), 600.0, 0.005, 0.0)
                .unwrap();
            black_box(state.neutron_density)
        })
    });
}

criterion_group!(benches, bench_advance_tick);
criterion_main!(benches);
