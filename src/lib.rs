//! 中国象棋棋盘引擎
//!
//! 棋子集合、90 个位置的棋盘、各兵种走法、将军/将死检测、局面变换，
//! 以及中文纵线着法、ICCS 着法与 FEN 之间的转换。

pub mod board;
pub mod error;
pub mod fen;
pub mod notation;
pub mod piece;
pub mod seat;
pub mod test_positions;
pub mod types;

pub use board::Board;
pub use error::{BoardError, BoardResult};
pub use fen::{
    fen_plus_to_fen, fen_plus_turn, fen_to_fen_plus, fen_to_layout, layout_to_fen, FIRST_FEN,
};
pub use notation::{iccs_chars, zh_chars};
pub use piece::{Piece, PieceId, NULL_CHAR, PIECE_CHARS};
pub use seat::{put_seats, Seats};
pub use types::{ChangeType, Color, GameStatus, PieceKind, RecFormat, Seat, SeatPair};
