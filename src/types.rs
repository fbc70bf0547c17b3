//! 象棋核心类型定义
//!
//! 定义棋盘引擎中所有基础数据类型

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 棋盘行数
pub const BOARD_ROW_NUM: i8 = 10;
/// 棋盘列数
pub const BOARD_COL_NUM: i8 = 9;
/// 棋盘位置总数
pub const SEAT_NUM: usize = 90;
/// 棋子总数
pub const PIECE_NUM: usize = 32;
/// 河界：行号小于该值属于底方半场
pub const RIVER_ROW: i8 = 5;

/// 棋子颜色/阵营
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    Red,
    Black,
}

impl Color {
    /// 获取对方阵营
    pub fn opposite(&self) -> Color {
        match self {
            Color::Red => Color::Black,
            Color::Black => Color::Red,
        }
    }

    /// 从 FEN 字符解析
    pub fn from_fen_char(c: char) -> Option<Color> {
        match c {
            'r' | 'w' => Some(Color::Red),
            'b' => Some(Color::Black),
            _ => None,
        }
    }

    /// 转换为 FEN 字符
    pub fn to_fen_char(&self) -> char {
        match self {
            Color::Red => 'r',
            Color::Black => 'b',
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Red => write!(f, "Red"),
            Color::Black => write!(f, "Black"),
        }
    }
}

impl FromStr for Color {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "r" | "red" => Ok(Color::Red),
            "b" | "black" => Ok(Color::Black),
            _ => Err(format!("Invalid color: {}", s)),
        }
    }
}

/// 棋子种类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    /// 帅/将
    King,
    /// 仕/士
    Advisor,
    /// 相/象
    Bishop,
    /// 马
    Knight,
    /// 车
    Rook,
    /// 炮
    Cannon,
    /// 兵/卒
    Pawn,
}

impl PieceKind {
    /// 从 FEN 字符解析（大小写均可）
    pub fn from_fen_char(c: char) -> Option<PieceKind> {
        match c.to_ascii_lowercase() {
            'k' => Some(PieceKind::King),
            'a' => Some(PieceKind::Advisor),
            'b' => Some(PieceKind::Bishop),
            'n' => Some(PieceKind::Knight),
            'r' => Some(PieceKind::Rook),
            'c' => Some(PieceKind::Cannon),
            'p' => Some(PieceKind::Pawn),
            _ => None,
        }
    }

    /// 强子：马车炮兵，同列多子时用“前中后”区分
    pub fn is_strong(&self) -> bool {
        matches!(
            self,
            PieceKind::Knight | PieceKind::Rook | PieceKind::Cannon | PieceKind::Pawn
        )
    }

    /// 直线走子：进退时着法末字表示步数而非列
    pub fn is_line_move(&self) -> bool {
        matches!(
            self,
            PieceKind::King | PieceKind::Rook | PieceKind::Cannon | PieceKind::Pawn
        )
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PieceKind::King => "King",
            PieceKind::Advisor => "Advisor",
            PieceKind::Bishop => "Bishop",
            PieceKind::Knight => "Knight",
            PieceKind::Rook => "Rook",
            PieceKind::Cannon => "Cannon",
            PieceKind::Pawn => "Pawn",
        };
        write!(f, "{}", name)
    }
}

/// 棋盘位置 (row, col)
///
/// row: 0-9 (0 是底方底线，9 是顶方底线)
/// col: 0-8 (从左到右)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Seat {
    pub row: i8,
    pub col: i8,
}

impl Seat {
    pub fn new(row: i8, col: i8) -> Self {
        Seat { row, col }
    }

    /// 检查位置是否在棋盘范围内
    pub fn is_valid(&self) -> bool {
        (0..BOARD_ROW_NUM).contains(&self.row) && (0..BOARD_COL_NUM).contains(&self.col)
    }

    /// 行优先的数组下标
    #[inline]
    pub fn index(&self) -> usize {
        (self.row * BOARD_COL_NUM + self.col) as usize
    }

    #[inline]
    pub fn from_index(index: usize) -> Seat {
        Seat {
            row: (index / BOARD_COL_NUM as usize) as i8,
            col: (index % BOARD_COL_NUM as usize) as i8,
        }
    }

    /// 压缩行列值：row * 10 + col
    pub fn rowcol(&self) -> i32 {
        self.row as i32 * 10 + self.col as i32
    }

    pub fn from_rowcol(rowcol: i32) -> Option<Seat> {
        if !(0..100).contains(&rowcol) {
            return None;
        }
        let seat = Seat::new((rowcol / 10) as i8, (rowcol % 10) as i8);
        seat.is_valid().then_some(seat)
    }

    /// 检查位置是否在九宫格内
    pub fn is_in_palace(&self, is_bottom: bool) -> bool {
        if !(3..=5).contains(&self.col) {
            return false;
        }
        if is_bottom {
            (0..=2).contains(&self.row)
        } else {
            (7..=9).contains(&self.row)
        }
    }

    /// 检查位置是否在己方半场
    pub fn is_on_own_side(&self, is_bottom: bool) -> bool {
        if is_bottom {
            (0..RIVER_ROW).contains(&self.row)
        } else {
            (RIVER_ROW..BOARD_ROW_NUM).contains(&self.row)
        }
    }

    /// 位置加偏移量
    pub fn offset(&self, row_delta: i8, col_delta: i8) -> Seat {
        Seat {
            row: self.row + row_delta,
            col: self.col + col_delta,
        }
    }

    /// 旋转 180 度后的位置
    pub fn rotate(&self) -> Seat {
        Seat::new(BOARD_ROW_NUM - 1 - self.row, BOARD_COL_NUM - 1 - self.col)
    }

    /// 左右对称后的位置
    pub fn mirror(&self) -> Seat {
        Seat::new(self.row, BOARD_COL_NUM - 1 - self.col)
    }

    /// 从 ICCS 坐标解析（如 "a0"）
    pub fn from_iccs(s: &str) -> Option<Seat> {
        let mut chars = s.chars();
        let (col_ch, row_ch) = (chars.next()?, chars.next()?);
        if chars.next().is_some() {
            return None;
        }
        let col = match col_ch {
            'a'..='i' => (col_ch as u8 - b'a') as i8,
            _ => return None,
        };
        let row = match row_ch {
            '0'..='9' => (row_ch as u8 - b'0') as i8,
            _ => return None,
        };
        Some(Seat { row, col })
    }

    /// 转换为 ICCS 坐标（如 "a0"）
    pub fn to_iccs(&self) -> String {
        let col_char = (b'a' + self.col as u8) as char;
        format!("{}{}", col_char, self.row)
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_iccs())
    }
}

/// 着法的起止位置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SeatPair {
    pub from: Seat,
    pub to: Seat,
}

impl SeatPair {
    pub fn new(from: Seat, to: Seat) -> Self {
        SeatPair { from, to }
    }

    /// 从 ICCS 走法字符串解析（如 "h2e2"）
    pub fn from_iccs(s: &str) -> Option<SeatPair> {
        let s = s.trim();
        if s.len() != 4 || !s.is_ascii() {
            return None;
        }
        let from = Seat::from_iccs(&s[0..2])?;
        let to = Seat::from_iccs(&s[2..4])?;
        Some(SeatPair { from, to })
    }

    /// 转换为 ICCS 走法字符串
    pub fn iccs(&self) -> String {
        format!("{}{}", self.from.to_iccs(), self.to.to_iccs())
    }
}

impl fmt::Display for SeatPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.iccs())
    }
}

/// 局面变换方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeType {
    /// 红黑互换
    Exchange,
    /// 旋转 180 度
    Rotate,
    /// 左右对称
    Mirror,
}

impl FromStr for ChangeType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "exchange" => Ok(ChangeType::Exchange),
            "rotate" => Ok(ChangeType::Rotate),
            "mirror" | "symmetry" => Ok(ChangeType::Mirror),
            _ => Err(format!("Invalid change type: {}", s)),
        }
    }
}

/// 轮到某方走棋时的局面状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    Ongoing,
    /// 无棋可走且正被将军
    Checkmate,
    /// 无棋可走但未被将军（困毙）
    Stalemate,
}

/// 棋谱文件格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecFormat {
    Xqf,
    Bin,
    Json,
    PgnIccs,
    PgnZh,
    PgnCc,
}

impl RecFormat {
    /// 文件扩展名
    pub fn ext_name(&self) -> &'static str {
        match self {
            RecFormat::Xqf => ".xqf",
            RecFormat::Bin => ".bin",
            RecFormat::Json => ".json",
            RecFormat::PgnIccs => ".pgn_iccs",
            RecFormat::PgnZh => ".pgn_zh",
            RecFormat::PgnCc => ".pgn_cc",
        }
    }

    /// 由扩展名确定格式，未知扩展名按 PgnCc 处理
    pub fn from_ext(ext: &str) -> RecFormat {
        match ext {
            ".xqf" => RecFormat::Xqf,
            ".bin" => RecFormat::Bin,
            ".json" => RecFormat::Json,
            ".pgn_iccs" => RecFormat::PgnIccs,
            ".pgn_zh" => RecFormat::PgnZh,
            _ => RecFormat::PgnCc,
        }
    }

    /// 该格式中的着法是否用中文纵线表示
    pub fn is_zh(&self) -> bool {
        matches!(self, RecFormat::PgnZh | RecFormat::PgnCc)
    }
}
