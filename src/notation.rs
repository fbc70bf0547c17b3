//! 着法编解码
//!
//! 中文纵线着法固定 4 个字：
//!
//! - 第 1、2 字：棋子名 + 所在纵线，或同列多子时的“前中后/一二三四五” + 棋子名
//! - 第 3 字：进、平、退
//! - 第 4 字：直线走子（帅车炮兵）进退时为步数，其余情况为目标纵线
//!
//! 红方数字用“一二三…九”，黑方用全角“１２３…９”，因此末字即可判断走子方。
//! 纵线按走子方自己的视角从右到左计数。

use crate::board::Board;
use crate::error::{BoardError, BoardResult};
use crate::seat::sort_front_first;
use crate::types::{Color, PieceKind, Seat, SeatPair, BOARD_COL_NUM};
use log::warn;
use std::collections::HashMap;

/// 前中后
const PRE_CHARS: &str = "前中后";
/// 着法中的棋子名
const NAME_CHARS: &str = "帅将仕士相象马车炮兵卒";
/// 退平进，下标减一即为相对方向
const MOV_CHARS: &str = "退平进";
const RED_NUM_CHARS: &str = "一二三四五六七八九";
const BLACK_NUM_CHARS: &str = "１２３４５６７８９";
/// ICCS 坐标字符
const ICCS_CHARS: &str = "abcdefghi0123456789";

lazy_static::lazy_static! {
    /// 棋子名 -> (种类, 固定颜色)；马车炮红黑同名
    static ref NAME_KINDS: HashMap<char, (PieceKind, Option<Color>)> = {
        let mut map = HashMap::new();
        map.insert('帅', (PieceKind::King, Some(Color::Red)));
        map.insert('将', (PieceKind::King, Some(Color::Black)));
        map.insert('仕', (PieceKind::Advisor, Some(Color::Red)));
        map.insert('士', (PieceKind::Advisor, Some(Color::Black)));
        map.insert('相', (PieceKind::Bishop, Some(Color::Red)));
        map.insert('象', (PieceKind::Bishop, Some(Color::Black)));
        map.insert('马', (PieceKind::Knight, None));
        map.insert('车', (PieceKind::Rook, None));
        map.insert('炮', (PieceKind::Cannon, None));
        map.insert('兵', (PieceKind::Pawn, Some(Color::Red)));
        map.insert('卒', (PieceKind::Pawn, Some(Color::Black)));
        map
    };
    static ref RED_NUMS: Vec<char> = RED_NUM_CHARS.chars().collect();
    static ref BLACK_NUMS: Vec<char> = BLACK_NUM_CHARS.chars().collect();
}

/// 中文着法用到的全部字符
pub fn zh_chars() -> String {
    [PRE_CHARS, NAME_CHARS, MOV_CHARS, RED_NUM_CHARS, BLACK_NUM_CHARS].concat()
}

/// ICCS 着法用到的全部字符
pub fn iccs_chars() -> &'static str {
    ICCS_CHARS
}

fn nums(color: Color) -> &'static [char] {
    match color {
        Color::Red => RED_NUMS.as_slice(),
        Color::Black => BLACK_NUMS.as_slice(),
    }
}

/// 同列多子的前缀字符集
fn pre_chars(len: usize) -> Vec<char> {
    match len {
        2 => vec!['前', '后'],
        3 => PRE_CHARS.chars().collect(),
        _ => RED_NUM_CHARS.chars().take(5).collect(),
    }
}

/// 数字字符（1..=9）
fn num_char(color: Color, num: usize) -> char {
    nums(color)[num - 1]
}

/// 数字字符在本方数字表中的下标
fn num_index(color: Color, ch: char) -> Option<usize> {
    nums(color).iter().position(|&c| c == ch)
}

/// 纵线字符：底方从右到左数，即列号 8 对应“一”
fn col_char(color: Color, is_bottom: bool, col: i8) -> char {
    let index = if is_bottom { BOARD_COL_NUM - 1 - col } else { col };
    nums(color)[index as usize]
}

fn col_from_index(is_bottom: bool, index: usize) -> i8 {
    let index = index as i8;
    if is_bottom {
        BOARD_COL_NUM - 1 - index
    } else {
        index
    }
}

fn mov_char(fseat: Seat, tseat: Seat, is_bottom: bool) -> char {
    if fseat.row == tseat.row {
        '平'
    } else if is_bottom == (tseat.row > fseat.row) {
        '进'
    } else {
        '退'
    }
}

/// 行方向：进为朝对方底线
fn mov_dir(is_bottom: bool, ch: char) -> Option<i8> {
    let index = MOV_CHARS.chars().position(|c| c == ch)? as i8;
    Some((index - 1) * if is_bottom { 1 } else { -1 })
}

fn color_of(ch: char) -> Option<Color> {
    if RED_NUMS.contains(&ch) {
        Some(Color::Red)
    } else if BLACK_NUMS.contains(&ch) {
        Some(Color::Black)
    } else {
        None
    }
}

/// 棋子名对应的种类，名称与颜色不符时返回 None
fn kind_of(name: char, color: Color) -> Option<PieceKind> {
    let &(kind, fixed) = NAME_KINDS.get(&name)?;
    match fixed {
        Some(c) if c != color => None,
        _ => Some(kind),
    }
}

fn malformed(zh: &str) -> BoardError {
    BoardError::MalformedZh(zh.to_string())
}

impl Board {
    /// 着法位置转换为中文纵线着法
    pub fn zh_str(&self, pair: SeatPair) -> BoardResult<String> {
        let (fseat, tseat) = (pair.from, pair.to);
        if !tseat.is_valid() {
            return Err(BoardError::InvalidSeat {
                row: tseat.row as i32,
                col: tseat.col as i32,
            });
        }
        let piece = self.piece(fseat).ok_or(BoardError::EmptySeat(fseat))?;
        let (color, kind) = (piece.color(), piece.kind());
        let is_bottom = self.is_bottom_side(color);

        let mut zh = String::with_capacity(12);
        let col_seats = self.live_seats(color, Some(kind), Some(fseat.col));
        if col_seats.len() > 1 && kind.is_strong() {
            let seats = if kind == PieceKind::Pawn {
                self.seats().sorted_pawn_seats(is_bottom, color)
            } else {
                let mut seats = col_seats;
                sort_front_first(&mut seats, is_bottom);
                seats
            };
            let index = seats
                .iter()
                .position(|&s| s == fseat)
                .ok_or(BoardError::EmptySeat(fseat))?;
            let pres = pre_chars(seats.len());
            let pre = pres
                .get(index)
                .copied()
                .ok_or_else(|| BoardError::IndexOutOfRange {
                    zh: pair.iccs(),
                    index,
                    len: pres.len(),
                })?;
            zh.push(pre);
            zh.push(piece.name());
        } else {
            // 帅、仕、相同列时不分前后，能退的在前，能进的在后
            zh.push(piece.name());
            zh.push(col_char(color, is_bottom, fseat.col));
        }

        zh.push(mov_char(fseat, tseat, is_bottom));
        let is_same_row = fseat.row == tseat.row;
        if kind.is_line_move() && !is_same_row {
            zh.push(num_char(color, (tseat.row - fseat.row).unsigned_abs() as usize));
        } else {
            zh.push(col_char(color, is_bottom, tseat.col));
        }
        Ok(zh)
    }

    /// 中文纵线着法转换为着法位置
    ///
    /// 只检查着法格式与棋子能否找到，不检查目标位置是否合法。
    pub fn seat_pair_from_zh(&self, zh: &str) -> BoardResult<SeatPair> {
        self.parse_zh(zh)
            .map_err(|e| {
                warn!("cannot resolve {}: {}", zh, e);
                e
            })
    }

    fn parse_zh(&self, zh: &str) -> BoardResult<SeatPair> {
        let chars: Vec<char> = zh.chars().collect();
        if chars.len() != 4 {
            return Err(malformed(zh));
        }
        let color = color_of(chars[3]).ok_or_else(|| malformed(zh))?;
        let is_bottom = self.is_bottom_side(color);
        let dir = mov_dir(is_bottom, chars[2]).ok_or_else(|| malformed(zh))?;

        let (kind, fseat) = if NAME_KINDS.contains_key(&chars[0]) {
            let kind = kind_of(chars[0], color).ok_or_else(|| malformed(zh))?;
            let index = num_index(color, chars[1]).ok_or_else(|| malformed(zh))?;
            let seats = self.live_seats(color, Some(kind), Some(col_from_index(is_bottom, index)));
            let fseat = match seats.len() {
                0 => return Err(BoardError::NoCandidate(zh.to_string())),
                1 => seats[0],
                // 仕、相同列两子时以进退区分：进的一方在后，退的一方在前
                2 if dir != 0 && matches!(kind, PieceKind::Advisor | PieceKind::Bishop) => {
                    let (low, high) = if seats[0].row < seats[1].row {
                        (seats[0], seats[1])
                    } else {
                        (seats[1], seats[0])
                    };
                    if dir > 0 {
                        low
                    } else {
                        high
                    }
                }
                _ => return Err(BoardError::AmbiguousCandidate(zh.to_string())),
            };
            (kind, fseat)
        } else {
            let kind = kind_of(chars[1], color).ok_or_else(|| malformed(zh))?;
            // 只有马车炮兵同列多子时才用前缀
            if !kind.is_strong() {
                return Err(malformed(zh));
            }
            let seats = if kind == PieceKind::Pawn {
                self.seats().sorted_pawn_seats(is_bottom, color)
            } else {
                let mut seats = self.live_seats(color, Some(kind), None);
                sort_front_first(&mut seats, is_bottom);
                seats
            };
            match seats.as_slice() {
                [] => return Err(BoardError::NoCandidate(zh.to_string())),
                [_] => return Err(malformed(zh)),
                [first, rest @ ..]
                    if kind != PieceKind::Pawn && rest.iter().any(|s| s.col != first.col) =>
                {
                    return Err(BoardError::AmbiguousCandidate(zh.to_string()));
                }
                _ => {}
            }
            let index = pre_index(zh, chars[0], seats.len())?;
            (kind, seats[index])
        };

        let num = num_index(color, chars[3]).ok_or_else(|| malformed(zh))?;
        let tseat = if kind.is_line_move() {
            if dir == 0 {
                Seat::new(fseat.row, col_from_index(is_bottom, num))
            } else {
                fseat.offset(dir * (num as i8 + 1), 0)
            }
        } else {
            if dir == 0 {
                return Err(malformed(zh));
            }
            let tcol = col_from_index(is_bottom, num);
            let col_away = (tcol - fseat.col).abs();
            let row_away = match kind {
                PieceKind::Advisor | PieceKind::Bishop => col_away,
                _ => {
                    if col_away == 1 {
                        2
                    } else {
                        1
                    }
                }
            };
            Seat::new(fseat.row + dir * row_away, tcol)
        };
        if !tseat.is_valid() {
            return Err(BoardError::InvalidSeat {
                row: tseat.row as i32,
                col: tseat.col as i32,
            });
        }
        Ok(SeatPair::new(fseat, tseat))
    }
}

/// 前缀字符在候选棋子中的下标
fn pre_index(zh: &str, pre: char, len: usize) -> BoardResult<usize> {
    if let Some(index) = pre_chars(len).iter().position(|&c| c == pre) {
        if index < len {
            return Ok(index);
        }
        return Err(BoardError::IndexOutOfRange {
            zh: zh.to_string(),
            index,
            len,
        });
    }
    // 前缀与候选数量不匹配
    let index = PRE_CHARS
        .chars()
        .position(|c| c == pre)
        .or_else(|| num_index(Color::Red, pre).filter(|&i| i < 5))
        .ok_or_else(|| malformed(zh))?;
    if index >= len {
        Err(BoardError::IndexOutOfRange {
            zh: zh.to_string(),
            index,
            len,
        })
    } else {
        Err(malformed(zh))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fen::FIRST_FEN;
    use crate::types::ChangeType;

    fn zh_of(board: &Board, iccs: &str) -> String {
        board.zh_str(SeatPair::from_iccs(iccs).unwrap()).unwrap()
    }

    fn iccs_of(board: &Board, zh: &str) -> String {
        board.seat_pair_from_zh(zh).unwrap().iccs()
    }

    #[test]
    fn test_opening_moves() {
        let board = Board::from_fen(FIRST_FEN).unwrap();
        assert_eq!(zh_of(&board, "h2e2"), "炮二平五");
        assert_eq!(zh_of(&board, "b0c2"), "马八进七");
        assert_eq!(zh_of(&board, "h9g7"), "马８进７");
        assert_eq!(zh_of(&board, "g3g4"), "兵三进一");
        assert_eq!(zh_of(&board, "c6c5"), "卒３进１");
        assert_eq!(zh_of(&board, "f0e1"), "仕四进五");
        assert_eq!(zh_of(&board, "c0e2"), "相七进五");
        assert_eq!(zh_of(&board, "a0a2"), "车九进二");

        assert_eq!(iccs_of(&board, "炮二平五"), "h2e2");
        assert_eq!(iccs_of(&board, "马２进３"), "b9c7");
        assert_eq!(iccs_of(&board, "相三进五"), "g0e2");
        assert_eq!(iccs_of(&board, "车１平２"), "a9b9");
    }

    #[test]
    fn test_opening_roundtrip() {
        let mut board = Board::from_fen(FIRST_FEN).unwrap();
        for color in [Color::Red, Color::Black] {
            for pair in board.legal_moves(color).unwrap() {
                let zh = board.zh_str(pair).unwrap();
                assert_eq!(board.seat_pair_from_zh(&zh).unwrap(), pair, "{}", zh);
            }
        }
    }

    #[test]
    fn test_front_back_follow_orientation() {
        // 两个红马同在 e 列
        let mut board = Board::from_fen("3k5/9/9/9/9/9/4N4/9/4N4/4K4").unwrap();
        let front = board.seat_pair_from_zh("前马进四").unwrap();
        assert_eq!(front.from, Seat::new(3, 4));
        assert_eq!(front.to, Seat::new(5, 5));
        let back = board.seat_pair_from_zh("后马进六").unwrap();
        assert_eq!(back.from, Seat::new(1, 4));
        assert_eq!(zh_of(&board, "e3f5"), "前马进四");

        // 旋转后红方在上，前后随之互换
        board.change_side(ChangeType::Rotate).unwrap();
        let front = board.seat_pair_from_zh("前马进四").unwrap();
        assert_eq!(front.from, Seat::new(6, 4));
        assert_eq!(front.to, Seat::new(4, 3));
        assert_eq!(board.zh_str(front).unwrap(), "前马进四");
    }

    #[test]
    fn test_multi_pawns() {
        // 红兵：d、f 列各两个，a 列一个
        let board = Board::from_fen("4k4/9/9/3P1P3/3P1P3/P8/9/9/9/4K4").unwrap();
        let pawns = board.seats().sorted_pawn_seats(true, Color::Red);
        assert_eq!(
            pawns,
            vec![
                Seat::new(6, 5),
                Seat::new(5, 5),
                Seat::new(6, 3),
                Seat::new(5, 3)
            ]
        );

        assert_eq!(zh_of(&board, "f6f7"), "一兵进一");
        assert_eq!(zh_of(&board, "d6c6"), "三兵平七");
        assert_eq!(zh_of(&board, "d5c5"), "四兵平七");
        // 单兵的列不加前缀
        assert_eq!(zh_of(&board, "a4a5"), "兵九进一");

        assert_eq!(iccs_of(&board, "二兵平三"), "f5g5");
        assert_eq!(iccs_of(&board, "四兵进一"), "d5d6");
        assert_eq!(
            board.seat_pair_from_zh("前兵进一"),
            Err(BoardError::MalformedZh("前兵进一".to_string()))
        );
    }

    #[test]
    fn test_advisor_same_column() {
        // 两个仕同在 d 列，进退区分
        let board = Board::from_fen("3k5/9/9/9/9/9/9/3A5/9/3AK4").unwrap();
        assert_eq!(zh_of(&board, "d0e1"), "仕六进五");
        assert_eq!(zh_of(&board, "d2e1"), "仕六退五");
        assert_eq!(iccs_of(&board, "仕六进五"), "d0e1");
        assert_eq!(iccs_of(&board, "仕六退五"), "d2e1");
    }

    #[test]
    fn test_line_moves() {
        let board = Board::from_fen("3k5/9/9/9/9/9/9/9/4K4/R8").unwrap();
        assert_eq!(zh_of(&board, "a0a9"), "车九进九");
        assert_eq!(zh_of(&board, "a0h0"), "车九平二");
        assert_eq!(zh_of(&board, "e1e0"), "帅五退一");
        assert_eq!(iccs_of(&board, "车九进九"), "a0a9");
        assert_eq!(iccs_of(&board, "帅五平四"), "e1f1");
    }

    #[test]
    fn test_zh_errors() {
        let board = Board::from_fen(FIRST_FEN).unwrap();
        for bad in ["炮二平", "炮二平五五", "炮二走五", "炮二平x", "将５平一", "帅５平４"] {
            assert_eq!(
                board.seat_pair_from_zh(bad),
                Err(BoardError::MalformedZh(bad.to_string())),
                "{}",
                bad
            );
        }
        assert_eq!(
            board.seat_pair_from_zh("车五进一"),
            Err(BoardError::NoCandidate("车五进一".to_string()))
        );
        assert_eq!(
            board.seat_pair_from_zh("前仕进五"),
            Err(BoardError::MalformedZh("前仕进五".to_string()))
        );
        assert_eq!(
            board.seat_pair_from_zh("马八平七"),
            Err(BoardError::MalformedZh("马八平七".to_string()))
        );
        assert_eq!(
            board.zh_str(SeatPair::from_iccs("e4e5").unwrap()),
            Err(BoardError::EmptySeat(Seat::new(4, 4)))
        );
    }

    #[test]
    fn test_index_out_of_range() {
        let board = Board::from_fen("3k5/9/9/9/9/9/4N4/9/4N4/4K4").unwrap();
        assert_eq!(
            board.seat_pair_from_zh("三马进四"),
            Err(BoardError::IndexOutOfRange {
                zh: "三马进四".to_string(),
                index: 2,
                len: 2,
            })
        );
        assert_eq!(
            board.seat_pair_from_zh("中马进四"),
            Err(BoardError::MalformedZh("中马进四".to_string()))
        );
    }

    #[test]
    fn test_same_column_needs_prefix() {
        // 两个红马同在 e 列，必须写前马/后马
        let board = Board::from_fen("3k5/9/9/9/9/9/4N4/9/4N4/4K4").unwrap();
        assert_eq!(zh_of(&board, "e3f1"), "前马退四");
        assert_eq!(
            board.seat_pair_from_zh("马五退四"),
            Err(BoardError::AmbiguousCandidate("马五退四".to_string()))
        );
        assert_eq!(iccs_of(&board, "前马退四"), "e3f1");
    }

    #[test]
    fn test_prefix_needs_same_column() {
        // 两个红马不同列，不能用前后区分
        let board = Board::from_fen("3k5/9/9/9/9/9/9/9/9/1N2K1N2").unwrap();
        assert_eq!(
            board.seat_pair_from_zh("前马进七"),
            Err(BoardError::AmbiguousCandidate("前马进七".to_string()))
        );
        assert_eq!(iccs_of(&board, "马三进五"), "g0e1");

        // 只有一个车时加前缀也不行
        let board = Board::from_fen("3k5/9/9/9/9/9/9/9/9/R3K4").unwrap();
        assert_eq!(
            board.seat_pair_from_zh("前车进一"),
            Err(BoardError::MalformedZh("前车进一".to_string()))
        );
    }

    #[test]
    fn test_zh_str_off_board_target() {
        let board = Board::from_fen(FIRST_FEN).unwrap();
        for to in [Seat::new(0, 9), Seat::new(12, 0), Seat::new(-1, 0)] {
            let pair = SeatPair::new(Seat::new(0, 0), to);
            assert_eq!(
                board.zh_str(pair),
                Err(BoardError::InvalidSeat {
                    row: to.row as i32,
                    col: to.col as i32,
                })
            );
        }
    }

    #[test]
    fn test_alphabets() {
        let zh = zh_chars();
        assert_eq!(zh.chars().count(), 3 + 11 + 3 + 9 + 9);
        assert!(zh.contains('炮') && zh.contains('５'));
        assert_eq!(iccs_chars().len(), 19);
    }
}
