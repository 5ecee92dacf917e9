// ─────────────────────────────────────────────────────────────────────
// SCPN Reactor Kinetics — Command Sequence Properties
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! No finite operator command sequence, however ill-advised, may drive the
//! session out of its state invariants.

use proptest::prelude::*;

use reactor_control::coolant::FlowMode;
use reactor_sim::{Command, PowerMode, ReactorSimulation};
use reactor_types::config::ReactorConfig;

fn command_strategy() -> impl Strategy<Value = Command> {
    prop_oneof![
        (-20.0..150.0f64).prop_map(|percent| Command::RodTarget { percent }),
        (0.0..50.0f64).prop_map(|setpoint_mw| Command::PowerControl(PowerMode::Automatic {
            setpoint_mw
        })),
        Just(Command::PowerControl(PowerMode::Manual)),
        (0.0..2000.0f64)
            .prop_map(|rate_kg_s| Command::CoolantFlow(FlowMode::Manual { rate_kg_s })),
        Just(Command::CoolantFlow(FlowMode::Automatic)),
        Just(Command::Scram),
        Just(Command::ClearScram),
        Just(Command::Pause),
        Just(Command::Resume),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_command_sequences_preserve_invariants(
        commands in prop::collection::vec((command_strategy(), 0u64..40), 0..12)
    ) {
        let mut cfg = ReactorConfig::default();
        cfg.initial.rod_position_pct = 50.0;
        let mut sim = ReactorSimulation::new(cfg.clone()).unwrap();

        for (command, gap_ticks) in commands {
            sim.submit(command).unwrap();
            sim.run_ticks(gap_ticks).unwrap();

            let state = sim.state();
            prop_assert!(state.neutron_density >= 0.0);
            prop_assert!((0.0..=100.0).contains(&state.rod_position_pct));
            prop_assert!(state.fuel_temp_k > 0.0);
            prop_assert!(state.coolant_temp_k > 0.0);
            prop_assert!(state.xe135 >= 0.0 && state.sm149 >= 0.0);
            let sample = sim.sample();
            prop_assert!(
                sample.coolant_flow_kg_s >= cfg.control.flow.min_kg_s
                    && sample.coolant_flow_kg_s <= cfg.control.flow.max_kg_s
            );
            prop_assert!(sim.time_s() <= sim.tick_count() as f64 * cfg.tick_seconds + 1e-9);
        }
    }
}
