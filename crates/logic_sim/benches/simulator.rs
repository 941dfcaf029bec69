//! Simulator benchmark.
//!
//! Target: sub-millisecond zero-delay passes and event-driven runs on
//! circuits in the few-hundred-gate range typical of ISCAS-85 netlists.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use logic_core::{Gate, Kind, LogicValue, Netlist, SimulatorConfig};
use logic_sim::{event_sim, zero_delay, Stimulus};
use std::collections::HashMap;

/// Builds a ripple chain of `depth` two-input AND gates fed by two
/// primary inputs, with a uniform per-gate delay.
fn ripple_chain(depth: usize, delay: u64) -> Netlist {
    let mut gates = Vec::with_capacity(depth + 2);
    gates.push(Gate::new(1, "a", Kind::Inpt, 1, 0, vec![]));
    gates.push(Gate::new(2, "b", Kind::Inpt, 1, 0, vec![]));

    let mut prev = 2u32;
    for i in 0..depth {
        let address = 3 + i as u32;
        let fanout = if i + 1 == depth { 0 } else { 1 };
        let mut g = Gate::new(address, format!("g{i}"), Kind::And, fanout, 2, vec![]);
        g.inputs = vec![1, prev];
        g.delay = delay;
        gates.push(g);
        prev = address;
    }

    Netlist::build(gates).unwrap()
}

fn bench_zero_delay_evaluate(c: &mut Criterion) {
    let mut group = c.benchmark_group("zero_delay_evaluate");

    for depth in [10, 100, 500] {
        let netlist = ripple_chain(depth, 0);

        group.bench_with_input(BenchmarkId::new("depth", depth), &depth, |b, _| {
            b.iter_batched(
                || netlist.clone(),
                |mut nl| zero_delay::evaluate(&mut nl, &[(1, LogicValue::One), (2, LogicValue::One)]),
                criterion::BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

fn bench_event_sim_run(c: &mut Criterion) {
    let mut group = c.benchmark_group("event_sim_run");
    let config = SimulatorConfig::default();

    for depth in [10, 100, 500] {
        let netlist = ripple_chain(depth, 1);
        let mut values = HashMap::new();
        values.insert(1, LogicValue::One);
        values.insert(2, LogicValue::One);
        let stimuli = vec![Stimulus { time: 0, values }];

        group.bench_with_input(BenchmarkId::new("depth", depth), &depth, |b, _| {
            b.iter_batched(
                || netlist.clone(),
                |mut nl| event_sim::run(&mut nl, &stimuli, &config).unwrap(),
                criterion::BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

criterion_group!(benches, bench_zero_delay_evaluate, bench_event_sim_run);
criterion_main!(benches);
