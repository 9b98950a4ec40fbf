use challenge_core::challenge::{Challenge, DepositSlot};
use challenge_core::pick_best_deposits;
use chrono::{NaiveDate, Utc};
use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};

fn build_challenge(count: usize, paid_every: usize) -> Challenge {
    let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
    let mut challenge = Challenge::new("Benchmark", start, count);
    let paid: Vec<usize> = (0..count).step_by(paid_every).collect();
    let _ = challenge.apply_selection(&paid, Utc::now());
    challenge
}

fn bench_selector(c: &mut Criterion) {
    let classic = build_challenge(50, 7);
    c.bench_function("pick_best_deposits_50", |b| {
        b.iter(|| {
            let picked = pick_best_deposits(&classic.deposits, black_box("500,00"));
            black_box(picked);
        })
    });

    let large = build_challenge(300, 11);
    c.bench_function("pick_best_deposits_300", |b| {
        b.iter(|| {
            let picked = pick_best_deposits(&large.deposits, black_box(12_345i64));
            black_box(picked);
        })
    });

    let fractional: Vec<DepositSlot> = (1..=200)
        .map(|n| DepositSlot::new(f64::from(n) * 1.25))
        .collect();
    c.bench_function("pick_best_deposits_fractional_200", |b| {
        b.iter(|| {
            let picked = pick_best_deposits(&fractional, black_box(9_999.99));
            black_box(picked);
        })
    });
}

fn bench_apply(c: &mut Criterion) {
    let challenge = build_challenge(300, 5);
    c.bench_function("preview_and_apply_300", |b| {
        b.iter_batched(
            || challenge.clone(),
            |mut challenge| {
                let selection = challenge.pick_best_deposits("5000");
                let marked = challenge
                    .apply_selection(&selection.indices, Utc::now())
                    .expect("apply");
                black_box(marked);
            },
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(benches, bench_selector, bench_apply);
criterion_main!(benches);
