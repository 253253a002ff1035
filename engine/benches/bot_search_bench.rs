use criterion::{criterion_group, criterion_main, Criterion, SamplingMode};
use std::hint::black_box;
use std::time::Duration;
use seeds_engine::bot::{find_all_moves, find_best_move, find_hammer_target};
use seeds_engine::config::{BoardConfig, SearchConfig};
use seeds_engine::{Board, CellStatus, GameMode, SessionRng};

fn random_board(cells: usize, seed: u64) -> Board {
    let config = BoardConfig {
        random_cells: cells,
        ..BoardConfig::default()
    };
    let mut rng = SessionRng::new(seed);
    let mut board = Board::new(config.row_width);
    board.generate(GameMode::Random, None, &config, &mut rng);
    board
}

/// A long game in progress: roughly half of the cells crossed at random.
fn worn_board(cells: usize, seed: u64) -> Board {
    let mut board = random_board(cells, seed);
    let mut rng = SessionRng::new(seed + 1);
    for idx in 0..board.len() {
        if rng.chance(0.5) {
            board.set_status(idx, CellStatus::Crossed);
        }
    }
    board.rebuild_links();
    board
}

fn bench_best_move(board: &Board, search: &SearchConfig) {
    let mut snapshot = board.clone();
    black_box(find_best_move(&mut snapshot, search));
}

fn bot_search_bench(c: &mut Criterion) {
    let search = SearchConfig::default();
    let small = random_board(36, 1);
    let medium = worn_board(2_000, 2);
    let large = worn_board(20_000, 3);

    let mut group = c.benchmark_group("bot_search");

    group
        .sampling_mode(SamplingMode::Flat)
        .sample_size(20)
        .measurement_time(Duration::from_secs(30));

    group.bench_function("best_move_small", |b| {
        b.iter(|| bench_best_move(&small, &search))
    });

    group.bench_function("best_move_medium", |b| {
        b.iter(|| bench_best_move(&medium, &search))
    });

    group.bench_function("best_move_large", |b| {
        b.iter(|| bench_best_move(&large, &search))
    });

    group.bench_function("all_moves_large", |b| {
        b.iter(|| black_box(find_all_moves(&large, &search)))
    });

    group.bench_function("hammer_target_large", |b| {
        b.iter(|| black_box(find_hammer_target(&large)))
    });

    group.finish();
}

criterion_group!(benches, bot_search_bench);
criterion_main!(benches);
