//! 棋盘引擎错误类型
//!
//! 结构性错误（布局串、FEN、着法串损坏）与逻辑不可能状态（将帅不在棋盘上）。
//! 无合法着法之类的情况是正常查询结果，不属于错误。

use crate::types::{Color, Seat};
use thiserror::Error;

/// 棋盘引擎错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// 布局串长度不是 90
    #[error("Invalid layout length: {len} (must be 90)")]
    LayoutLength { len: usize },

    /// 布局串或 FEN 中出现非法棋子字符
    #[error("Invalid piece char: {0:?}")]
    InvalidPieceChar(char),

    /// 某种棋子数量超过棋子集合的容量
    #[error("Too many pieces of {0:?} in layout")]
    PieceOverflow(char),

    #[error("Invalid FEN: {0}")]
    InvalidFen(String),

    /// 行列越界
    #[error("Invalid seat: row {row}, col {col}")]
    InvalidSeat { row: i32, col: i32 },

    #[error("Invalid ICCS move: {0}")]
    InvalidIccs(String),

    /// 中文着法格式错误
    #[error("Malformed Chinese move: {0}")]
    MalformedZh(String),

    /// 中文着法指向的棋子不存在
    #[error("No candidate piece for Chinese move: {0}")]
    NoCandidate(String),

    /// 同列多子却未用前后区分
    #[error("Ambiguous piece for Chinese move: {0}")]
    AmbiguousCandidate(String),

    /// 前中后/一二三四五 超出候选棋子范围
    #[error("Prefix index {index} out of range ({len} candidates) in Chinese move: {zh}")]
    IndexOutOfRange { zh: String, index: usize, len: usize },

    /// 起始位置无棋子
    #[error("No piece at seat {0}")]
    EmptySeat(Seat),

    /// 将（帅）不在棋盘上
    #[error("King of {0} is not on the board")]
    KingMissing(Color),

    /// 底方九宫内没有将（帅），无法确定棋盘方向
    #[error("No king in the bottom palace")]
    BottomKingMissing,
}

/// 棋盘引擎操作结果
pub type BoardResult<T> = Result<T, BoardError>;
