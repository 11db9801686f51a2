use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use dlt_checker::{Checker, Draw, DrawNumber, DrawStore, PrizeEntry, Ticket};

fn store(draws: usize) -> DrawStore {
    let draws = (0..draws)
        .map(|i| {
            let front: Vec<String> = (0..5)
                .map(|k| format!("{:02}", (i + k * 7) % 35 + 1))
                .collect();
            let back: Vec<String> = (0..2)
                .map(|k| format!("{:02}", (i + k * 5) % 12 + 1))
                .collect();
            let front: Vec<&str> = front.iter().map(String::as_str).collect();
            let back: Vec<&str> = back.iter().map(String::as_str).collect();
            Draw::new(format!("{}", 25_000 + i), "2025-01-01", &front, &back)
                .with_prize("一等奖", PrizeEntry::new("10,000,000"))
                .with_prize("二等奖", PrizeEntry::new("250,123"))
        })
        .collect();
    DrawStore::new(draws).expect("valid draws")
}

fn tickets(count: usize) -> Vec<Ticket> {
    (0..count)
        .map(|i| {
            let front: Vec<u8> = (0..5).map(|k| ((i + k * 3) % 35 + 1) as u8).collect();
            let back = [(i % 12 + 1) as u8, ((i + 6) % 12 + 1) as u8];
            Ticket::new(&front, &back).expect("valid ticket")
        })
        .collect()
}

fn bench_check(c: &mut Criterion) {
    let store = store(30);
    let tickets = tickets(500);
    let start = DrawNumber::from("25000");

    let mut group = c.benchmark_group("check");
    for workers in [1, 4] {
        let checker = Checker::default().with_worker_threads(workers);
        group.bench_with_input(BenchmarkId::new("workers", workers), &workers, |b, _| {
            b.iter(|| checker.check(black_box(&tickets), &store, &start, 30, true))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_check);
criterion_main!(benches);
