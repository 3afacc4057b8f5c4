//! Benchmark suite for Quine-McCluskey minimization
//!
//! Truth tables are generated from a fixed seed so runs are comparable.
//! Each group sweeps the number of input variables.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use qmc_logic::modify::{ExpressionModifier, NAnd, NInputs};
use qmc_logic::qmc::{BruteForce, LargestFirst, QuineMcCluskey};
use qmc_logic::{Expression, Minimizable, Ternary, TruthTable};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;

/// A random column with roughly 40% ones and 10% don't cares
fn random_column(rng: &mut StdRng, variables: usize) -> Vec<Ternary> {
    (0..1usize << variables)
        .map(|_| match rng.gen_range(0..10) {
            0..=3 => Ternary::One,
            4 => Ternary::DontCare,
            _ => Ternary::Zero,
        })
        .collect()
}

fn names(variables: usize) -> Vec<Arc<str>> {
    (0..variables).map(|i| Arc::from(format!("x{}", i))).collect()
}

fn random_table(seed: u64, variables: usize) -> TruthTable {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut table = TruthTable::new(names(variables)).unwrap();
    table
        .add_output("Y", random_column(&mut rng, variables))
        .unwrap();
    table
}

/// Benchmark: prime implicant generation only
fn bench_reduce(c: &mut Criterion) {
    let mut group = c.benchmark_group("reduce");

    for variables in [4, 6, 8, 10] {
        let table = random_table(variables as u64, variables);
        let output = table.outputs()[0].clone();

        group.throughput(Throughput::Elements(1 << variables));
        group.bench_with_input(
            BenchmarkId::new("primes", variables),
            &output,
            |b, output| {
                b.iter(|| {
                    let mut qmc =
                        QuineMcCluskey::from_output(table.variables(), black_box(output)).unwrap();
                    qmc.reduce();
                    black_box(qmc.primes().len());
                });
            },
        );
    }

    group.finish();
}

/// Benchmark: prime selection strategies on the same reduced problem
fn bench_select(c: &mut Criterion) {
    let mut group = c.benchmark_group("select");

    for variables in [4, 5, 6] {
        let table = random_table(100 + variables as u64, variables);
        let mut reduced =
            QuineMcCluskey::from_output(table.variables(), &table.outputs()[0]).unwrap();
        reduced.reduce();
        reduced.remove_dominated();
        let param = format!("{}vars/{}primes", variables, reduced.primes().len());

        group.bench_with_input(
            BenchmarkId::new("largest_first", &param),
            &reduced,
            |b, reduced| {
                b.iter(|| {
                    let mut qmc = reduced.clone();
                    qmc.select(&mut LargestFirst::new()).unwrap();
                    black_box(qmc);
                });
            },
        );

        if reduced.primes().len() <= 20 {
            group.bench_with_input(
                BenchmarkId::new("brute_force", &param),
                &reduced,
                |b, reduced| {
                    b.iter(|| {
                        let mut qmc = reduced.clone();
                        qmc.select(&mut BruteForce::new()).unwrap();
                        black_box(qmc);
                    });
                },
            );
        }
    }

    group.finish();
}

/// Benchmark: full truth table minimization with the default configuration
fn bench_minimize(c: &mut Criterion) {
    let mut group = c.benchmark_group("minimize");

    for variables in [4, 6, 8, 10, 12] {
        let table = random_table(200 + variables as u64, variables);

        group.throughput(Throughput::Elements(1 << variables));
        group.bench_with_input(
            BenchmarkId::new("truth_table", variables),
            &table,
            |b, table| {
                b.iter(|| {
                    let result = black_box(table).minimize().unwrap();
                    black_box(result);
                });
            },
        );
    }

    group.finish();
}

/// Benchmark: parse, minimize and map onto 2-input NAND gates
fn bench_full_pipeline(c: &mut Criterion) {
    let inputs = [
        ("xor4", "a ^ b ^ c ^ d"),
        ("mux", "s*a + !s*b + a*b"),
        ("adder_carry", "a*b + cin*(a ^ b)"),
        ("sparse6", "a*b*c*d*e*f + !a*!b*!c*!d*!e*!f + a*!c*e + b*!d*f"),
    ];
    let fan_in = NInputs::new(2).unwrap();

    let mut group = c.benchmark_group("full_pipeline");

    for (name, text) in inputs {
        group.bench_with_input(BenchmarkId::new("nand2", name), text, |b, text| {
            b.iter(|| {
                let expr = Expression::parse(black_box(text)).unwrap();
                let minimized = expr.minimize().unwrap();
                let gates = NAnd.apply(&fan_in.apply(&minimized).unwrap()).unwrap();
                black_box(gates);
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_reduce,
    bench_select,
    bench_minimize,
    bench_full_pipeline
);
criterion_main!(benches);
