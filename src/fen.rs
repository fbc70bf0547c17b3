//! FEN 解析和生成
//!
//! 布局串与 FEN 之间的转换，不依赖棋盘状态。
//!
//! 布局串：90 个字符，行优先，第 0 行（底线）在前，空位为 `_`。
//!
//! FEN 棋盘部分：从第 9 行到第 0 行，各行以 `/` 连接，连续空位写作数字 (1-9)。
//!
//! FEN plus：`<棋盘> <走子方> - - 0 1`

use crate::error::{BoardError, BoardResult};
use crate::piece::{Piece, NULL_CHAR};
use crate::types::{Color, BOARD_COL_NUM, BOARD_ROW_NUM, SEAT_NUM};

/// 开局局面
pub const FIRST_FEN: &str = "rnbakabnr/9/1c5c1/p1p1p1p1p/9/9/P1P1P1P1P/1C5C1/9/RNBAKABNR";

/// 布局串转换为 FEN
pub fn layout_to_fen(layout: &str) -> BoardResult<String> {
    let chars: Vec<char> = layout.chars().collect();
    if chars.len() != SEAT_NUM {
        return Err(BoardError::LayoutLength { len: chars.len() });
    }

    let mut rows = Vec::with_capacity(BOARD_ROW_NUM as usize);

    // 从 row 9 到 row 0
    for line in chars.chunks(BOARD_COL_NUM as usize).rev() {
        let mut row_str = String::new();
        let mut empty_count = 0;

        for &ch in line {
            if ch == NULL_CHAR {
                empty_count += 1;
                continue;
            }
            if Piece::from_char(ch).is_none() {
                return Err(BoardError::InvalidPieceChar(ch));
            }
            if empty_count > 0 {
                row_str.push_str(&empty_count.to_string());
                empty_count = 0;
            }
            row_str.push(ch);
        }

        if empty_count > 0 {
            row_str.push_str(&empty_count.to_string());
        }

        rows.push(row_str);
    }

    Ok(rows.join("/"))
}

/// FEN 转换为布局串
///
/// 接受 FEN plus，只取第一个空白前的棋盘部分。
pub fn fen_to_layout(fen: &str) -> BoardResult<String> {
    let board_str = fen_plus_to_fen(fen);
    let rows: Vec<&str> = board_str.split('/').collect();
    if rows.len() != BOARD_ROW_NUM as usize {
        return Err(BoardError::InvalidFen(format!(
            "expected {} rows, got {}: {}",
            BOARD_ROW_NUM,
            rows.len(),
            fen
        )));
    }

    let mut layout = String::with_capacity(SEAT_NUM);

    // FEN 从上往下是 row 9 到 row 0
    for (row_idx, row_str) in rows.iter().rev().enumerate() {
        let mut col: i8 = 0;

        for ch in row_str.chars() {
            if let Some(n) = ch.to_digit(10) {
                if n == 0 {
                    return Err(BoardError::InvalidFen(format!("zero empty count: {}", fen)));
                }
                col += n as i8;
                if col <= BOARD_COL_NUM {
                    layout.extend(std::iter::repeat(NULL_CHAR).take(n as usize));
                }
            } else if Piece::from_char(ch).is_some() {
                col += 1;
                if col <= BOARD_COL_NUM {
                    layout.push(ch);
                }
            } else {
                return Err(BoardError::InvalidPieceChar(ch));
            }

            if col > BOARD_COL_NUM {
                break;
            }
        }

        if col != BOARD_COL_NUM {
            return Err(BoardError::InvalidFen(format!(
                "row {} has {} columns, expected {}",
                row_idx, col, BOARD_COL_NUM
            )));
        }
    }

    Ok(layout)
}

/// 去掉 FEN plus 的附加字段
pub fn fen_plus_to_fen(fen_plus: &str) -> &str {
    fen_plus.split_whitespace().next().unwrap_or("")
}

/// 为 FEN 加上走子方等附加字段
pub fn fen_to_fen_plus(fen: &str, color: Color) -> String {
    format!("{} {} - - 0 1", fen, color.to_fen_char())
}

/// FEN plus 中的走子方，缺省为红方
pub fn fen_plus_turn(fen_plus: &str) -> BoardResult<Color> {
    match fen_plus.split_whitespace().nth(1) {
        None => Ok(Color::Red),
        Some(turn) => turn
            .chars()
            .next()
            .and_then(Color::from_fen_char)
            .ok_or_else(|| BoardError::InvalidFen(format!("invalid turn: {}", turn))),
    }
}
