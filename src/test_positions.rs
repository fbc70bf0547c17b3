//! 测试局面库
//!
//! 提供命名的 FEN 测试局面，方便测试和调试
//!
//! 命名规范:
//! - START: 初始局面
//! - EARLY_n: 开局后 1-2 步
//! - CHECK_n: 将军测试
//! - MATE_n: 杀棋测试
//! - STALEMATE_n: 困毙测试
//! - SPECIAL_n: 着法编码等特殊情况

use crate::fen::FIRST_FEN;

// =============================================================================
// 开局 (START)
// =============================================================================

/// 初始局面
pub const START: &str = FIRST_FEN;

// =============================================================================
// 早期 (EARLY_n)
// =============================================================================

/// 红方第一步: 中炮 (炮二平五)
pub const EARLY_1: &str = "rnbakabnr/9/1c5c1/p1p1p1p1p/9/9/P1P1P1P1P/1C2C4/9/RNBAKABNR";

/// 黑方回应: 马８进７
pub const EARLY_2: &str = "rnbakab1r/9/1c4nc1/p1p1p1p1p/9/9/P1P1P1P1P/1C2C4/9/RNBAKABNR";

pub const EARLY_POSITIONS: [&str; 2] = [EARLY_1, EARLY_2];

// =============================================================================
// 将军 (CHECK_n)
// =============================================================================

/// 红车照将
pub const CHECK_1: &str = "4k4/4R4/9/9/9/9/9/9/9/3K5";

/// 将帅对脸，双方都算被将
pub const CHECK_2: &str = "4k4/9/9/9/9/9/9/9/9/4K4";

/// 黑炮隔兵打帅
pub const CHECK_3: &str = "4k4/9/9/9/4c4/9/9/9/4P4/4K4";

pub const CHECK_POSITIONS: [&str; 3] = [CHECK_1, CHECK_2, CHECK_3];

// =============================================================================
// 杀棋 (MATE_n)
// =============================================================================

/// 双车错杀，黑方被将死
pub const MATE_1: &str = "3k5/4R4/3R5/9/9/9/9/9/9/4K4";

pub const MATE_POSITIONS: [&str; 1] = [MATE_1];

// =============================================================================
// 困毙 (STALEMATE_n)
// =============================================================================

/// 黑将无处可走但未被将军
pub const STALEMATE_1: &str = "3k5/R8/9/9/9/9/9/9/9/4K4";

pub const STALEMATE_POSITIONS: [&str; 1] = [STALEMATE_1];

// =============================================================================
// 特殊 (SPECIAL_n)
// =============================================================================

/// 将帅同列，中间有卒隔开
pub const SPECIAL_1: &str = "4k4/9/9/9/4p4/9/9/9/9/4K4";

/// 两个红马同列（前马/后马）
pub const SPECIAL_2: &str = "3k5/9/9/9/9/9/4N4/9/4N4/4K4";

/// 多兵同列（一兵至四兵）
pub const SPECIAL_3: &str = "3k5/9/9/3P1P3/3P1P3/P8/9/9/9/4K4";

/// 红车被黑车牵制
pub const SPECIAL_4: &str = "3k5/4r4/9/9/9/9/9/9/4R4/4K4";

/// 两个仕同列（仕六进五/仕六退五）
pub const SPECIAL_5: &str = "3k5/9/9/9/9/9/9/3A5/9/3AK4";

pub const SPECIAL_POSITIONS: [&str; 5] = [SPECIAL_1, SPECIAL_2, SPECIAL_3, SPECIAL_4, SPECIAL_5];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Color, GameStatus};
    use crate::Board;

    #[test]
    fn test_start_position_valid() {
        let board = Board::from_fen(START);
        assert!(board.is_ok(), "START position invalid: {:?}", board.err());
    }

    #[test]
    fn test_all_positions_valid() {
        let groups: [(&str, &[&str]); 5] = [
            ("EARLY", &EARLY_POSITIONS),
            ("CHECK", &CHECK_POSITIONS),
            ("MATE", &MATE_POSITIONS),
            ("STALEMATE", &STALEMATE_POSITIONS),
            ("SPECIAL", &SPECIAL_POSITIONS),
        ];
        for (name, fens) in groups {
            for (i, fen) in fens.iter().enumerate() {
                let board = Board::from_fen(fen);
                assert!(board.is_ok(), "{}_{} invalid: {:?}", name, i + 1, board.err());
            }
        }
    }

    #[test]
    fn test_check_positions() {
        let board = Board::from_fen(CHECK_1).unwrap();
        assert!(board.is_killed(Color::Black).unwrap());

        let board = Board::from_fen(CHECK_2).unwrap();
        assert!(board.is_killed(Color::Red).unwrap());
        assert!(board.is_killed(Color::Black).unwrap());

        let board = Board::from_fen(CHECK_3).unwrap();
        assert!(board.is_killed(Color::Red).unwrap());
        assert!(!board.is_killed(Color::Black).unwrap());

        let board = Board::from_fen(SPECIAL_1).unwrap();
        assert!(!board.is_killed(Color::Red).unwrap());
    }

    #[test]
    fn test_mate_and_stalemate() {
        let mut board = Board::from_fen(MATE_1).unwrap();
        assert_eq!(board.status(Color::Black).unwrap(), GameStatus::Checkmate);
        assert_eq!(board.status(Color::Red).unwrap(), GameStatus::Ongoing);

        let mut board = Board::from_fen(STALEMATE_1).unwrap();
        assert_eq!(board.status(Color::Black).unwrap(), GameStatus::Stalemate);
    }
}
