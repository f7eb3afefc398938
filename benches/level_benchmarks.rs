use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use sokoban_engine::persistence::{SaveRecord, restore, save};
use sokoban_engine::{DirectoryLevelSource, Direction, Level, LevelSource};
use std::hint::black_box;

const BUNDLED_LEVELS: &[u32] = &[1, 2, 3, 4, 5];

fn bundled() -> DirectoryLevelSource {
    DirectoryLevelSource::new(concat!(env!("CARGO_MANIFEST_DIR"), "/levels"))
}

/// A fixed wander that bumps into walls and pushes boxes on every level.
fn wander(len: usize) -> Vec<Direction> {
    (0..len)
        .map(|i| Direction::ALL[(i * 7 + i / 3) % Direction::ALL.len()])
        .collect()
}

fn played(number: u32, source: &dyn LevelSource, moves: &[Direction]) -> Level {
    let mut level = Level::load(number, source).unwrap();
    for &direction in moves {
        level.apply_move(direction);
    }
    level
}

pub fn bench_apply_moves(c: &mut Criterion) {
    let source = bundled();
    let moves = wander(500);
    let mut group = c.benchmark_group("apply_moves");

    for &number in BUNDLED_LEVELS {
        group.bench_with_input(BenchmarkId::new("wander_500", number), &number, |b, &number| {
            b.iter_with_setup(
                || Level::load(number, &source).unwrap(),
                |mut level| {
                    for &direction in &moves {
                        black_box(level.apply_move(direction));
                    }
                    level
                },
            );
        });
    }
    group.finish();
}

pub fn bench_undo(c: &mut Criterion) {
    let source = bundled();
    let moves = wander(200);
    let mut group = c.benchmark_group("undo");

    for &number in BUNDLED_LEVELS {
        let start = played(number, &source, &moves);
        group.bench_with_input(BenchmarkId::new("spend_budget", number), &start, |b, start| {
            b.iter_with_setup(
                || start.clone(),
                |mut level| {
                    while level.undo().is_ok() {}
                    level
                },
            );
        });
    }
    group.finish();
}

pub fn bench_save_restore(c: &mut Criterion) {
    let source = bundled();
    let moves = wander(200);
    let mut group = c.benchmark_group("save_restore");

    for &number in BUNDLED_LEVELS {
        let level = played(number, &source, &moves);
        group.bench_with_input(BenchmarkId::new("json", number), &level, |b, level| {
            b.iter(|| {
                let json = save(level).to_json().unwrap();
                let record = SaveRecord::from_json(&json).unwrap();
                black_box(restore(&record, &source).unwrap())
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_apply_moves, bench_undo, bench_save_restore);
criterion_main!(benches);
