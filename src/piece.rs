//! 棋子集合
//!
//! 一副棋固定 32 个棋子，按 `PIECE_CHARS` 的顺序存放在进程级只读表中。
//! 棋盘位置只保存棋子在表中的下标 (`PieceId`)，棋子本身不记录所在位置。

use crate::error::{BoardError, BoardResult};
use crate::types::{Color, PieceKind, PIECE_NUM, SEAT_NUM};
use std::fmt;

/// 全部棋子字符，红方在前，黑方在后，同一下标 ±16 为对方同种棋子
pub const PIECE_CHARS: &str = "KAABBNNRRCCPPPPPkaabbnnrrccppppp";

/// 布局串中的空位字符
pub const NULL_CHAR: char = '_';

lazy_static::lazy_static! {
    static ref ALL_PIECES: Vec<Piece> = PIECE_CHARS.chars().filter_map(Piece::from_char).collect();
}

/// 棋子在棋子集合中的下标
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PieceId(u8);

impl PieceId {
    #[inline]
    pub fn index(&self) -> usize {
        self.0 as usize
    }

    /// 对方颜色的同种棋子（红黑互换用）
    #[inline]
    pub fn other(&self) -> PieceId {
        PieceId(((self.index() + PIECE_NUM / 2) % PIECE_NUM) as u8)
    }

    #[inline]
    pub fn piece(&self) -> Piece {
        ALL_PIECES[self.index()]
    }
}

/// 棋子
///
/// 以 FEN 字符为标识：大写红方，小写黑方。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    ch: char,
    color: Color,
    kind: PieceKind,
}

impl Piece {
    /// 从 FEN 字符构造
    pub fn from_char(ch: char) -> Option<Piece> {
        let kind = PieceKind::from_fen_char(ch)?;
        let color = if ch.is_ascii_uppercase() {
            Color::Red
        } else {
            Color::Black
        };
        Some(Piece { ch, color, kind })
    }

    #[inline]
    pub fn ch(&self) -> char {
        self.ch
    }

    #[inline]
    pub fn color(&self) -> Color {
        self.color
    }

    #[inline]
    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    /// 着法中使用的棋子名称
    pub fn name(&self) -> char {
        match (self.color, self.kind) {
            (Color::Red, PieceKind::King) => '帅',
            (Color::Black, PieceKind::King) => '将',
            (Color::Red, PieceKind::Advisor) => '仕',
            (Color::Black, PieceKind::Advisor) => '士',
            (Color::Red, PieceKind::Bishop) => '相',
            (Color::Black, PieceKind::Bishop) => '象',
            (_, PieceKind::Knight) => '马',
            (_, PieceKind::Rook) => '车',
            (_, PieceKind::Cannon) => '炮',
            (Color::Red, PieceKind::Pawn) => '兵',
            (Color::Black, PieceKind::Pawn) => '卒',
        }
    }

    /// 棋盘图示中的名称，黑方马车炮用繁体以区分颜色
    pub fn print_name(&self) -> char {
        match (self.color, self.kind) {
            (Color::Black, PieceKind::Knight) => '馬',
            (Color::Black, PieceKind::Rook) => '車',
            (Color::Black, PieceKind::Cannon) => '砲',
            _ => self.name(),
        }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = match self.color {
            Color::Red => '+',
            Color::Black => '*',
        };
        write!(f, "{}{}{}", sign, self.ch, self.name())
    }
}

/// 全部棋子（按集合顺序）
pub fn all_pieces() -> impl Iterator<Item = (PieceId, Piece)> {
    ALL_PIECES
        .iter()
        .enumerate()
        .map(|(i, p)| (PieceId(i as u8), *p))
}

/// 按布局串为每个位置分配棋子
///
/// 同一字符依次取集合中尚未使用的棋子。
pub fn assign_pieces(layout: &str) -> BoardResult<[Option<PieceId>; SEAT_NUM]> {
    let chars: Vec<char> = layout.chars().collect();
    if chars.len() != SEAT_NUM {
        return Err(BoardError::LayoutLength { len: chars.len() });
    }

    let mut slots = [None; SEAT_NUM];
    let mut used = [false; PIECE_NUM];
    for (index, &ch) in chars.iter().enumerate() {
        if ch == NULL_CHAR {
            continue;
        }
        if Piece::from_char(ch).is_none() {
            return Err(BoardError::InvalidPieceChar(ch));
        }
        let id = ALL_PIECES
            .iter()
            .enumerate()
            .position(|(i, p)| p.ch == ch && !used[i])
            .ok_or(BoardError::PieceOverflow(ch))?;
        used[id] = true;
        slots[index] = Some(PieceId(id as u8));
    }
    Ok(slots)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalogue() {
        let pieces: Vec<_> = all_pieces().collect();
        assert_eq!(pieces.len(), PIECE_NUM);
        let red = pieces.iter().filter(|(_, p)| p.color() == Color::Red).count();
        assert_eq!(red, 16);
        let kings = pieces
            .iter()
            .filter(|(_, p)| p.kind() == PieceKind::King)
            .count();
        assert_eq!(kings, 2);
    }

    #[test]
    fn test_other_piece() {
        for (id, piece) in all_pieces() {
            let other = id.other().piece();
            assert_eq!(other.kind(), piece.kind());
            assert_eq!(other.color(), piece.color().opposite());
            assert_eq!(id.other().other(), id);
        }
    }

    #[test]
    fn test_names() {
        let king = Piece::from_char('k').unwrap();
        assert_eq!(king.color(), Color::Black);
        assert_eq!(king.name(), '将');
        assert_eq!(Piece::from_char('K').unwrap().name(), '帅');
        assert_eq!(Piece::from_char('N').unwrap().print_name(), '马');
        assert_eq!(Piece::from_char('n').unwrap().print_name(), '馬');
        assert!(Piece::from_char('x').is_none());
    }

    #[test]
    fn test_assign_pieces() {
        let mut layout: String = std::iter::repeat(NULL_CHAR).take(SEAT_NUM).collect();
        layout.replace_range(4..5, "K");
        let slots = assign_pieces(&layout).unwrap();
        assert_eq!(slots[4].map(|id| id.piece().ch()), Some('K'));
        assert_eq!(slots.iter().flatten().count(), 1);

        assert_eq!(
            assign_pieces("K"),
            Err(BoardError::LayoutLength { len: 1 })
        );
    }

    #[test]
    fn test_assign_overflow() {
        let layout = format!("KK{}", "_".repeat(SEAT_NUM - 2));
        assert_eq!(assign_pieces(&layout), Err(BoardError::PieceOverflow('K')));
        let layout = format!("X{}", "_".repeat(SEAT_NUM - 1));
        assert_eq!(assign_pieces(&layout), Err(BoardError::InvalidPieceChar('X')));
    }
}
