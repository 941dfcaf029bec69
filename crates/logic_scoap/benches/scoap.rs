//! SCOAP computation benchmark.
//!
//! Target: sub-millisecond for circuits in the few-hundred-gate range.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use logic_core::{Gate, Kind, Netlist};
use logic_scoap::compute;

fn ripple_chain(depth: usize) -> Netlist {
    let mut gates = Vec::with_capacity(depth + 2);
    gates.push(Gate::new(1, "a", Kind::Inpt, 1, 0, vec![]));
    gates.push(Gate::new(2, "b", Kind::Inpt, 1, 0, vec![]));

    let mut prev = 2u32;
    for i in 0..depth {
        let address = 3 + i as u32;
        let fanout = if i + 1 == depth { 0 } else { 1 };
        let mut g = Gate::new(address, format!("g{i}"), Kind::And, fanout, 2, vec![]);
        g.inputs = vec![1, prev];
        gates.push(g);
        prev = address;
    }

    Netlist::build(gates).unwrap()
}

fn bench_scoap_compute(c: &mut Criterion) {
    let mut group = c.benchmark_group("scoap_compute");

    for depth in [10, 100, 500] {
        let netlist = ripple_chain(depth);

        group.bench_with_input(BenchmarkId::new("depth", depth), &depth, |b, _| {
            b.iter_batched(
                || netlist.clone(),
                |mut nl| compute(&mut nl),
                criterion::BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

criterion_group!(benches, bench_scoap_compute);
criterion_main!(benches);
