use std::hint::black_box;

use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use minelogic_core::*;

const SEEDS: u64 = 8;

fn tiers() -> [(&'static str, GameConfig); 3] {
    [
        ("beginner", GameConfig::beginner()),
        ("intermediate", GameConfig::intermediate()),
        ("expert", GameConfig::expert()),
    ]
}

fn start_of(config: GameConfig) -> Coord2 {
    (config.size.0 / 2, config.size.1 / 2)
}

fn bench_autoplay(c: &mut Criterion) {
    let mut group = c.benchmark_group("autoplay");
    group.sample_size(10);

    for (name, config) in tiers() {
        let start = start_of(config);
        let layouts: Vec<_> = (0..SEEDS)
            .map(|seed| {
                RandomLayoutGenerator::new(seed, start, StartCell::AlwaysZero).generate(config)
            })
            .collect();

        group.bench_function(name, |b| {
            b.iter_batched(
                || layouts.iter().cloned().map(SimBoard::new).collect::<Vec<_>>(),
                |boards| {
                    for mut board in boards {
                        let mut deducer = MineDeducer::with_size(config.size);
                        black_box(autoplay(&mut board, &mut deducer, start).ok());
                    }
                },
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

fn bench_first_pass(c: &mut Criterion) {
    let config = GameConfig::expert();
    let start = start_of(config);
    let layout = RandomLayoutGenerator::new(3, start, StartCell::AlwaysZero).generate(config);
    let mut board = SimBoard::new(layout);
    let opening = board.reveal(start).map(|report| report.revealed).unwrap_or_default();

    c.bench_function("expert opening pass", |b| {
        b.iter(|| {
            let mut deducer = MineDeducer::with_size(config.size);
            deducer.add_observations(opening.iter().copied()).ok();
            black_box(deducer.request_safe_move().ok())
        })
    });
}

criterion_group!(benches, bench_autoplay, bench_first_pass);
criterion_main!(benches);
