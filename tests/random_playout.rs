//! 随机对局测试
//!
//! 用固定种子随机走完若干局，每一步都检查合法性过滤不改变棋盘、
//! 走后不被将军，以及中文/ICCS 着法可以互相还原。

use cchess_board::test_positions::{EARLY_2, SPECIAL_3};
use cchess_board::{Board, Color, GameStatus, RecFormat, SeatPair, FIRST_FEN};
use rand::prelude::*;

const MAX_PLIES: usize = 120;

fn check_position(board: &mut Board, color: Color) -> Vec<SeatPair> {
    let before = board.clone();
    let moves = board.legal_moves(color).unwrap();
    assert_eq!(*board, before, "legal move generation changed the board");

    for &pair in &moves {
        let zh = board.zh_str(pair).unwrap();
        assert_eq!(board.seat_pair_from_zh(&zh).unwrap(), pair, "{}", zh);
        assert_eq!(
            board.seat_pair_from_str(&pair.iccs(), RecFormat::PgnIccs).unwrap(),
            pair
        );
    }
    moves
}

fn play(fen: &str, seed: u64) {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut board = Board::from_fen(fen).unwrap();
    let mut color = Color::Red;

    for _ in 0..MAX_PLIES {
        let moves = check_position(&mut board, color);
        let pair = match moves.choose(&mut rng) {
            Some(&pair) => pair,
            None => {
                assert_ne!(board.status(color).unwrap(), GameStatus::Ongoing);
                return;
            }
        };

        let layout = board.piece_chars();
        let eaten = board.make_move(pair).unwrap();
        assert!(!board.is_killed(color).unwrap(), "{} left king in check", pair);
        board.unmake_move(pair, eaten).unwrap();
        assert_eq!(board.piece_chars(), layout);

        board.make_move(pair).unwrap();
        color = color.opposite();
    }
}

#[test]
fn test_random_playout_from_opening() {
    for seed in 0..4 {
        play(FIRST_FEN, seed);
    }
}

#[test]
fn test_random_playout_from_other_positions() {
    play(EARLY_2, 42);
    play(SPECIAL_3, 7);
}
