//! 象棋棋盘（局面）
//!
//! 组合棋子集合与位置表，记录哪一方在底部，提供走子合法性、将军检测、
//! 局面变换和着法位置解析。中文纵线着法的编解码见 `notation` 模块。
//!
//! 合法性检测采用“走子 - 检测 - 撤销”的方式直接修改棋盘，期间不得插入
//! 其他走子操作，因此相关方法都需要 `&mut self`。

use crate::error::{BoardError, BoardResult};
use crate::fen::{fen_to_layout, layout_to_fen};
use crate::piece::{assign_pieces, Piece, PieceId};
use crate::seat::{put_seats, Seats};
use crate::types::{ChangeType, Color, GameStatus, PieceKind, RecFormat, Seat, SeatPair};
use log::{debug, trace};
use std::fmt;

/// 象棋棋盘
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    /// 底方颜色，每次整盘放子或变换后重新确定
    bottom_color: Color,
    seats: Seats,
}

impl Default for Board {
    fn default() -> Self {
        Board {
            bottom_color: Color::Red,
            seats: Seats::new(),
        }
    }
}

impl Board {
    /// 空棋盘，默认红方在底部
    pub fn new() -> Self {
        Self::default()
    }

    /// 从布局串创建棋盘
    pub fn from_layout(layout: &str) -> BoardResult<Board> {
        let mut board = Board::new();
        board.set_pieces(layout)?;
        Ok(board)
    }

    /// 从 FEN 字符串创建棋盘
    pub fn from_fen(fen: &str) -> BoardResult<Board> {
        Board::from_layout(&fen_to_layout(fen)?)
    }

    /// 按布局串整盘放置棋子，并重新确定底方
    ///
    /// 失败后棋盘处于未定义状态，调用者不应继续使用。
    pub fn set_pieces(&mut self, layout: &str) -> BoardResult<()> {
        self.seats.set_pieces(assign_pieces(layout)?);
        self.set_bottom_side()?;
        debug!("set pieces: {} (bottom: {})", layout, self.bottom_color);
        Ok(())
    }

    fn set_bottom_side(&mut self) -> BoardResult<()> {
        self.bottom_color = self
            .seats
            .bottom_king_color()
            .ok_or(BoardError::BottomKingMissing)?;
        Ok(())
    }

    /// 该颜色是否在底部
    #[inline]
    pub fn is_bottom_side(&self, color: Color) -> bool {
        self.bottom_color == color
    }

    #[inline]
    pub fn bottom_color(&self) -> Color {
        self.bottom_color
    }

    #[inline]
    pub fn seats(&self) -> &Seats {
        &self.seats
    }

    /// 获取某位置的棋子
    #[inline]
    pub fn piece(&self, seat: Seat) -> Option<Piece> {
        self.seats.piece(seat)
    }

    /// 当前布局串
    pub fn piece_chars(&self) -> String {
        self.seats.piece_chars()
    }

    /// 当前局面的 FEN（棋盘部分）
    pub fn to_fen(&self) -> BoardResult<String> {
        layout_to_fen(&self.piece_chars())
    }

    /// 检查某方是否被将军
    ///
    /// 两个条件任一成立即被将：将帅同列且中间无子（对脸）；对方任一棋子
    /// 可走位置包含本方将（帅）。本方将（帅）不在棋盘上时返回错误。
    pub fn is_killed(&self, color: Color) -> BoardResult<bool> {
        let is_bottom = self.is_bottom_side(color);
        let king_seat = self
            .seats
            .king_seat(color)
            .ok_or(BoardError::KingMissing(color))?;

        // 将帅对脸
        if let Some(oth_king_seat) = self.seats.king_seat(color.opposite()) {
            if king_seat.col == oth_king_seat.col
                && self.seats.is_clear_between(king_seat, oth_king_seat)
            {
                return Ok(true);
            }
        }

        let attacked = self
            .seats
            .live_seats(color.opposite(), None, None)
            .into_iter()
            .any(|fseat| self.seats.move_seats(!is_bottom, fseat).contains(&king_seat));
        Ok(attacked)
    }

    /// 某位置棋子的合法目标位置（已排除走后被将军的位置）
    pub fn legal_destinations(&mut self, fseat: Seat) -> BoardResult<Vec<Seat>> {
        let piece = self.piece(fseat).ok_or(BoardError::EmptySeat(fseat))?;
        let color = piece.color();
        let candidates = self.seats.move_seats(self.is_bottom_side(color), fseat);

        let mut seats = Vec::with_capacity(candidates.len());
        for tseat in candidates {
            // 走子、检测、撤销必须成对完成，撤销之前不得返回
            let eaten = self.seats.move_to(fseat, tseat, None);
            let killed = self.is_killed(color);
            self.seats.move_to(tseat, fseat, eaten);

            if killed? {
                trace!("{} {}{} leaves own king in check", piece, fseat, tseat);
            } else {
                seats.push(tseat);
            }
        }
        Ok(seats)
    }

    /// 某方全部合法着法
    pub fn legal_moves(&mut self, color: Color) -> BoardResult<Vec<SeatPair>> {
        let mut moves = Vec::with_capacity(64);
        for fseat in self.seats.live_seats(color, None, None) {
            for tseat in self.legal_destinations(fseat)? {
                moves.push(SeatPair::new(fseat, tseat));
            }
        }
        Ok(moves)
    }

    /// 某方是否已无棋可走
    pub fn is_dead(&mut self, color: Color) -> BoardResult<bool> {
        for fseat in self.seats.live_seats(color, None, None) {
            if !self.legal_destinations(fseat)?.is_empty() {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// 轮到某方走棋时的局面状态
    pub fn status(&mut self, color: Color) -> BoardResult<GameStatus> {
        if !self.is_dead(color)? {
            return Ok(GameStatus::Ongoing);
        }
        if self.is_killed(color)? {
            Ok(GameStatus::Checkmate)
        } else {
            Ok(GameStatus::Stalemate)
        }
    }

    /// 取得棋盘上活的棋子位置
    pub fn live_seats(&self, color: Color, kind: Option<PieceKind>, col: Option<i8>) -> Vec<Seat> {
        self.seats.live_seats(color, kind, col)
    }

    /// 某方活棋子的 (row, col)
    pub fn live_row_cols(&self, color: Color) -> Vec<(i8, i8)> {
        self.live_seats(color, None, None)
            .into_iter()
            .map(|s| (s.row, s.col))
            .collect()
    }

    /// 摆棋时该棋子可放置的位置
    pub fn put_seats(&self, piece: Piece) -> Vec<Seat> {
        put_seats(self.is_bottom_side(piece.color()), piece.kind())
    }

    /// 执行走子，返回被吃的棋子
    ///
    /// 必须与 `unmake_move` 成对使用，且不检查走子是否合法。
    pub fn make_move(&mut self, pair: SeatPair) -> BoardResult<Option<PieceId>> {
        if !pair.to.is_valid() {
            return Err(invalid_seat(pair.to));
        }
        if self.seats.piece_id(pair.from).is_none() {
            return Err(BoardError::EmptySeat(pair.from));
        }
        Ok(self.seats.move_to(pair.from, pair.to, None))
    }

    /// 撤销走子，放回被吃的棋子
    pub fn unmake_move(&mut self, pair: SeatPair, eaten: Option<PieceId>) -> BoardResult<()> {
        if !pair.from.is_valid() {
            return Err(invalid_seat(pair.from));
        }
        if self.seats.piece_id(pair.to).is_none() {
            return Err(BoardError::EmptySeat(pair.to));
        }
        self.seats.move_to(pair.to, pair.from, eaten);
        Ok(())
    }

    /// 整盘变换，完成后重新确定底方
    pub fn change_side(&mut self, ct: ChangeType) -> BoardResult<()> {
        self.seats.change_side(ct);
        self.set_bottom_side()?;
        debug!("change side: {:?} (bottom: {})", ct, self.bottom_color);
        Ok(())
    }

    /// 行列值对应的位置
    pub fn seat(&self, row: i32, col: i32) -> BoardResult<Seat> {
        if !(0..10).contains(&row) || !(0..9).contains(&col) {
            return Err(BoardError::InvalidSeat { row, col });
        }
        Ok(Seat::new(row as i8, col as i8))
    }

    /// 由起止行列确定着法位置
    pub fn seat_pair(&self, frow: i32, fcol: i32, trow: i32, tcol: i32) -> BoardResult<SeatPair> {
        Ok(SeatPair::new(self.seat(frow, fcol)?, self.seat(trow, tcol)?))
    }

    /// 由压缩行列值（row * 10 + col）确定着法位置
    pub fn seat_pair_from_rowcol(&self, frowcol: i32, trowcol: i32) -> BoardResult<SeatPair> {
        self.seat_pair(frowcol / 10, frowcol % 10, trowcol / 10, trowcol % 10)
    }

    /// 由着法字符串确定着法位置
    ///
    /// 中文格式按纵线着法解析，其余格式按 ICCS 坐标解析。
    pub fn seat_pair_from_str(&self, s: &str, fmt: RecFormat) -> BoardResult<SeatPair> {
        if fmt.is_zh() {
            self.seat_pair_from_zh(s)
        } else {
            SeatPair::from_iccs(s).ok_or_else(|| BoardError::InvalidIccs(s.to_string()))
        }
    }

    /// 着法字符串所指棋子的合法目标位置
    pub fn legal_destinations_from_str(&mut self, s: &str, fmt: RecFormat) -> BoardResult<Vec<Seat>> {
        let pair = self.seat_pair_from_str(s, fmt)?;
        self.legal_destinations(pair.from)
    }
}

fn invalid_seat(seat: Seat) -> BoardError {
    BoardError::InvalidSeat {
        row: seat.row as i32,
        col: seat.col as i32,
    }
}

/// 文本空棋盘，每行 17 个字符
const TEXT_BLANK_BOARD: [&str; 19] = [
    "┏━┯━┯━┯━┯━┯━┯━┯━┓",
    "┃　│　│　│╲│╱│　│　│　┃",
    "┠─┼─┼─┼─╳─┼─┼─┼─┨",
    "┃　│　│　│╱│╲│　│　│　┃",
    "┠─╬─┼─┼─┼─┼─┼─╬─┨",
    "┃　│　│　│　│　│　│　│　┃",
    "┠─┼─╬─┼─╬─┼─╬─┼─┨",
    "┃　│　│　│　│　│　│　│　┃",
    "┠─┴─┴─┴─┴─┴─┴─┴─┨",
    "┃　　　　　　　　　　　　　　　┃",
    "┠─┬─┬─┬─┬─┬─┬─┬─┨",
    "┃　│　│　│　│　│　│　│　┃",
    "┠─┼─╬─┼─╬─┼─╬─┼─┨",
    "┃　│　│　│　│　│　│　│　┃",
    "┠─╬─┼─┼─┼─┼─┼─╬─┨",
    "┃　│　│　│╲│╱│　│　│　┃",
    "┠─┼─┼─┼─╳─┼─┼─┼─┨",
    "┃　│　│　│╱│╲│　│　│　┃",
    "┗━┷━┷━┷━┷━┷━┷━┷━┛",
];

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut lines: Vec<Vec<char>> = TEXT_BLANK_BOARD
            .iter()
            .map(|line| line.chars().collect())
            .collect();
        for color in [Color::Black, Color::Red] {
            for seat in self.live_seats(color, None, None) {
                if let Some(piece) = self.piece(seat) {
                    lines[(9 - seat.row as usize) * 2][seat.col as usize * 2] = piece.print_name();
                }
            }
        }
        for line in lines {
            writeln!(f, "{}", line.into_iter().collect::<String>())?;
        }
        Ok(())
    }
}
