use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tui_minesweeper::core::Board;
use tui_minesweeper::term::{ScreenBuffer, Session};
use tui_minesweeper::types::PlayerAction;

fn bench_flood_dig(c: &mut Criterion) {
    c.bench_function("flood_dig_100x100", |b| {
        b.iter(|| {
            // One corner mine: a single dig floods the rest.
            let mut board = Board::new(100, 100, 12345).unwrap();
            board.place_mine(99, 99).unwrap();
            board.dig(black_box(0), black_box(0)).unwrap();
        })
    });
}

fn bench_mine_placement(c: &mut Criterion) {
    c.bench_function("add_random_mines_40x40", |b| {
        b.iter(|| {
            let mut board = Board::new(40, 40, 12345).unwrap();
            board.add_random_mines(black_box(300));
        })
    });
}

fn bench_guess(c: &mut Criterion) {
    let mut board = Board::new(3, 3, 12345).unwrap();
    board.place_mine(0, 0).unwrap();
    board.dig(1, 1).unwrap();

    c.bench_function("guess_unmatched", |b| {
        b.iter(|| {
            board.guess(black_box(1), black_box(1)).unwrap();
        })
    });
}

fn bench_full_render(c: &mut Criterion) {
    let mut board = Board::new(30, 16, 12345).unwrap();
    board.add_random_mines(99);
    let session = Session::from_board(board, 100);

    c.bench_function("render_frame_30x16", |b| {
        b.iter(|| {
            session.render_frame();
        })
    });
}

fn bench_write_text(c: &mut Criterion) {
    let screen = ScreenBuffer::new(80, 24);
    let text = "The quick brown fox 跳过 the lazy dog.\t".repeat(20);

    c.bench_function("write_text_wrapped", |b| {
        b.iter(|| {
            screen.write_text(black_box(&text), 2, 1, 78, 23, 4);
        })
    });
}

fn bench_apply_flag(c: &mut Criterion) {
    let mut board = Board::new(16, 16, 12345).unwrap();
    board.add_random_mines(40);

    c.bench_function("apply_flag_toggle", |b| {
        b.iter(|| {
            board
                .apply(PlayerAction::Flag, black_box(5), black_box(5))
                .unwrap();
        })
    });
}

criterion_group!(
    benches,
    bench_flood_dig,
    bench_mine_placement,
    bench_guess,
    bench_full_render,
    bench_write_text,
    bench_apply_flag
);
criterion_main!(benches);
