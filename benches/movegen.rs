//! 走子生成性能测试

use cchess_board::test_positions::{EARLY_2, SPECIAL_3};
use cchess_board::{Board, Color, FIRST_FEN};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn bench_from_fen(c: &mut Criterion) {
    c.bench_function("from_fen_start", |b| {
        b.iter(|| black_box(Board::from_fen(FIRST_FEN)))
    });
}

fn bench_legal_moves_start(c: &mut Criterion) {
    let mut board = Board::from_fen(FIRST_FEN).unwrap();

    c.bench_function("legal_moves_start", |b| {
        b.iter(|| black_box(board.legal_moves(Color::Red)))
    });
}

fn bench_legal_moves_both_colors(c: &mut Criterion) {
    let mut board = Board::from_fen(EARLY_2).unwrap();

    c.bench_function("legal_moves_both_colors", |b| {
        b.iter(|| {
            let red = board.legal_moves(Color::Red).map(|m| m.len());
            let black = board.legal_moves(Color::Black).map(|m| m.len());
            black_box((red, black))
        })
    });
}

fn bench_zh_roundtrip(c: &mut Criterion) {
    let mut board = Board::from_fen(SPECIAL_3).unwrap();
    let moves = board.legal_moves(Color::Red).unwrap();

    c.bench_function("zh_roundtrip_multi_pawns", |b| {
        b.iter(|| {
            for &pair in &moves {
                let zh = board.zh_str(pair).unwrap();
                black_box(board.seat_pair_from_zh(&zh).unwrap());
            }
        })
    });
}

criterion_group!(
    benches,
    bench_from_fen,
    bench_legal_moves_start,
    bench_legal_moves_both_colors,
    bench_zh_roundtrip,
);
criterion_main!(benches);
