//! 棋盘位置表
//!
//! 90 个位置（行优先）的棋子占用表。负责全部几何规则：九宫、河界、
//! 各兵种的可走位置（未排除走后被将军的情况）以及整盘的变换。

use crate::error::BoardResult;
use crate::piece::{assign_pieces, Piece, PieceId, NULL_CHAR};
use crate::types::{ChangeType, Color, PieceKind, Seat, RIVER_ROW, SEAT_NUM};

/// 上下左右
const ORTHOGONAL: [(i8, i8); 4] = [(0, -1), (0, 1), (-1, 0), (1, 0)];

/// 斜向
const DIAGONAL: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

/// 象：(象眼偏移, 落点偏移)
const BISHOP_STEPS: [((i8, i8), (i8, i8)); 4] = [
    ((-1, -1), (-2, -2)),
    ((-1, 1), (-2, 2)),
    ((1, -1), (2, -2)),
    ((1, 1), (2, 2)),
];

/// 马：(马腿偏移, 落点偏移)
const KNIGHT_STEPS: [((i8, i8), (i8, i8)); 8] = [
    ((-1, 0), (-2, -1)),
    ((-1, 0), (-2, 1)),
    ((0, -1), (-1, -2)),
    ((0, 1), (-1, 2)),
    ((0, -1), (1, -2)),
    ((0, 1), (1, 2)),
    ((1, 0), (2, -1)),
    ((1, 0), (2, 1)),
];

/// 棋盘位置表
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Seats {
    slots: [Option<PieceId>; SEAT_NUM],
}

impl Default for Seats {
    fn default() -> Self {
        Seats {
            slots: [None; SEAT_NUM],
        }
    }
}

impl Seats {
    /// 空棋盘
    pub fn new() -> Self {
        Self::default()
    }

    /// 从布局串创建
    pub fn from_layout(layout: &str) -> BoardResult<Seats> {
        Ok(Seats {
            slots: assign_pieces(layout)?,
        })
    }

    /// 整盘放置棋子
    pub fn set_pieces(&mut self, slots: [Option<PieceId>; SEAT_NUM]) {
        self.slots = slots;
    }

    /// 获取某位置的棋子下标
    #[inline]
    pub fn piece_id(&self, seat: Seat) -> Option<PieceId> {
        if !seat.is_valid() {
            return None;
        }
        self.slots[seat.index()]
    }

    /// 获取某位置的棋子
    #[inline]
    pub fn piece(&self, seat: Seat) -> Option<Piece> {
        self.piece_id(seat).map(|id| id.piece())
    }

    /// 检查位置是否有棋子
    #[inline]
    pub fn has_piece(&self, seat: Seat) -> bool {
        self.piece_id(seat).is_some()
    }

    /// 两个位置都有棋子且颜色相同
    pub fn is_same_color(&self, a: Seat, b: Seat) -> bool {
        match (self.piece(a), self.piece(b)) {
            (Some(pa), Some(pb)) => pa.color() == pb.color(),
            _ => false,
        }
    }

    /// 将 from 的棋子移到 to，from 放入 eat，返回 to 原有的棋子
    ///
    /// 走子时 eat 为 None；撤销时把被吃的棋子作为 eat 放回。
    pub fn move_to(&mut self, from: Seat, to: Seat, eat: Option<PieceId>) -> Option<PieceId> {
        let captured = self.slots[to.index()].take();
        self.slots[to.index()] = self.slots[from.index()].take();
        self.slots[from.index()] = eat;
        captured
    }

    /// 找到将（帅）的位置
    pub fn king_seat(&self, color: Color) -> Option<Seat> {
        self.slots.iter().enumerate().find_map(|(index, slot)| {
            let piece = slot.as_ref()?.piece();
            (piece.kind() == PieceKind::King && piece.color() == color)
                .then(|| Seat::from_index(index))
        })
    }

    /// 底方九宫内将（帅）的颜色
    pub fn bottom_king_color(&self) -> Option<Color> {
        put_seats(true, PieceKind::King).into_iter().find_map(|seat| {
            self.piece(seat)
                .filter(|p| p.kind() == PieceKind::King)
                .map(|p| p.color())
        })
    }

    /// 取得棋盘上活的棋子位置（行优先顺序）
    pub fn live_seats(&self, color: Color, kind: Option<PieceKind>, col: Option<i8>) -> Vec<Seat> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| {
                let piece = slot.as_ref()?.piece();
                let seat = Seat::from_index(index);
                let matched = piece.color() == color
                    && kind.map_or(true, |k| piece.kind() == k)
                    && col.map_or(true, |c| seat.col == c);
                matched.then_some(seat)
            })
            .collect()
    }

    /// 多兵排序
    ///
    /// 只保留同列有两个以上兵的列；列按本方视角从右到左，列内从前到后。
    pub fn sorted_pawn_seats(&self, is_bottom: bool, color: Color) -> Vec<Seat> {
        let pawns = self.live_seats(color, Some(PieceKind::Pawn), None);
        let mut seats: Vec<Seat> = pawns
            .iter()
            .copied()
            .filter(|s| pawns.iter().filter(|o| o.col == s.col).count() > 1)
            .collect();
        sort_front_first(&mut seats, is_bottom);
        seats
    }

    /// 两个同列位置之间（不含两端）是否全部为空
    pub fn is_clear_between(&self, a: Seat, b: Seat) -> bool {
        if a.col != b.col {
            return false;
        }
        let (low, up) = (a.row.min(b.row), a.row.max(b.row));
        ((low + 1)..up).all(|row| !self.has_piece(Seat::new(row, a.col)))
    }

    /// 某位置棋子可移动的位置（未排除被将军的情况）
    pub fn move_seats(&self, is_bottom: bool, fseat: Seat) -> Vec<Seat> {
        let piece = match self.piece(fseat) {
            Some(p) => p,
            None => return Vec::new(),
        };

        let raw = match piece.kind() {
            PieceKind::King => self.king_moves(is_bottom, fseat),
            PieceKind::Advisor => self.advisor_moves(is_bottom, fseat),
            PieceKind::Bishop => self.non_obstructed_moves(fseat, &BISHOP_STEPS, |s| {
                s.is_on_own_side(is_bottom)
            }),
            PieceKind::Knight => self.non_obstructed_moves(fseat, &KNIGHT_STEPS, |_| true),
            PieceKind::Rook => self.ray_moves(fseat, false),
            PieceKind::Cannon => self.ray_moves(fseat, true),
            PieceKind::Pawn => self.pawn_moves(is_bottom, fseat),
        };

        // 排除同颜色棋子
        raw.into_iter()
            .filter(|&tseat| !self.is_same_color(fseat, tseat))
            .collect()
    }

    fn king_moves(&self, is_bottom: bool, fseat: Seat) -> Vec<Seat> {
        ORTHOGONAL
            .iter()
            .map(|&(dr, dc)| fseat.offset(dr, dc))
            .filter(|s| s.is_in_palace(is_bottom))
            .collect()
    }

    fn advisor_moves(&self, is_bottom: bool, fseat: Seat) -> Vec<Seat> {
        DIAGONAL
            .iter()
            .map(|&(dr, dc)| fseat.offset(dr, dc))
            .filter(|s| s.is_in_palace(is_bottom))
            .collect()
    }

    /// 象、马：先查一个阻挡位置（象眼/马腿），为空才可落到对应位置
    fn non_obstructed_moves(
        &self,
        fseat: Seat,
        steps: &[((i8, i8), (i8, i8))],
        accept: impl Fn(Seat) -> bool,
    ) -> Vec<Seat> {
        let mut moves = Vec::with_capacity(steps.len());
        for &((or, oc), (mr, mc)) in steps {
            let obs = fseat.offset(or, oc);
            let to = fseat.offset(mr, mc);
            if !to.is_valid() || !accept(to) || self.has_piece(obs) {
                continue;
            }
            moves.push(to);
        }
        moves
    }

    /// 车、炮：沿四个方向逐格前进
    ///
    /// 车止于第一个棋子（含）；炮在炮架前只能走空位，越过炮架后仅第一个棋子可吃。
    fn ray_moves(&self, fseat: Seat, is_cannon: bool) -> Vec<Seat> {
        let mut moves = Vec::with_capacity(17);
        for (dr, dc) in ORTHOGONAL {
            let mut to = fseat.offset(dr, dc);
            let mut found_screen = false;
            while to.is_valid() {
                let occupied = self.has_piece(to);
                if !is_cannon {
                    moves.push(to);
                    if occupied {
                        break;
                    }
                } else if !found_screen {
                    if occupied {
                        found_screen = true;
                    } else {
                        moves.push(to);
                    }
                } else if occupied {
                    moves.push(to);
                    break;
                }
                to = to.offset(dr, dc);
            }
        }
        moves
    }

    fn pawn_moves(&self, is_bottom: bool, fseat: Seat) -> Vec<Seat> {
        let mut moves = Vec::with_capacity(3);
        let forward = if is_bottom { 1 } else { -1 };
        let to = fseat.offset(forward, 0);
        if to.is_valid() {
            moves.push(to);
        }

        // 过河后可以左右走
        if !fseat.is_on_own_side(is_bottom) {
            for dc in [-1, 1] {
                let to = fseat.offset(0, dc);
                if to.is_valid() {
                    moves.push(to);
                }
            }
        }
        moves
    }

    /// 整盘变换：红黑互换、旋转、左右对称
    pub fn change_side(&mut self, ct: ChangeType) {
        let old = self.slots;
        for (index, slot) in self.slots.iter_mut().enumerate() {
            let seat = Seat::from_index(index);
            *slot = match ct {
                ChangeType::Exchange => old[index].map(|id| id.other()),
                ChangeType::Rotate => old[seat.rotate().index()],
                ChangeType::Mirror => old[seat.mirror().index()],
            };
        }
    }

    /// 布局串（行优先，底线在前）
    pub fn piece_chars(&self) -> String {
        self.slots
            .iter()
            .map(|slot| slot.map_or(NULL_CHAR, |id| id.piece().ch()))
            .collect()
    }
}

/// 按着法视角排序：列按本方从右到左，同列从前到后
///
/// 底方的右侧是高列号、前方是高行号；顶方相反。
pub(crate) fn sort_front_first(seats: &mut [Seat], is_bottom: bool) {
    if is_bottom {
        seats.sort_by(|a, b| b.col.cmp(&a.col).then(b.row.cmp(&a.row)));
    } else {
        seats.sort_by(|a, b| a.col.cmp(&b.col).then(a.row.cmp(&b.row)));
    }
}

/// 棋子可放置的位置（摆棋时使用）
pub fn put_seats(is_bottom: bool, kind: PieceKind) -> Vec<Seat> {
    let all = (0..SEAT_NUM).map(Seat::from_index);
    let side = |seats: Vec<Seat>| -> Vec<Seat> {
        if is_bottom {
            seats
        } else {
            let mut top: Vec<Seat> = seats.iter().map(|s| s.rotate()).collect();
            top.sort();
            top
        }
    };

    match kind {
        PieceKind::King => all.filter(|s| s.is_in_palace(is_bottom)).collect(),
        PieceKind::Advisor => {
            // 底方行列和为奇数，顶方为偶数
            let rmd = if is_bottom { 1 } else { 0 };
            all.filter(|s| s.is_in_palace(is_bottom) && (s.row + s.col) % 2 == rmd)
                .collect()
        }
        PieceKind::Bishop => side(
            all.filter(|s| {
                s.row < RIVER_ROW && s.row % 2 == 0 && s.col % 2 == 0 && (s.row - s.col).abs() % 4 == 2
            })
            .collect(),
        ),
        PieceKind::Pawn => side(
            all.filter(|s| {
                (s.row >= RIVER_ROW) || ((3..RIVER_ROW).contains(&s.row) && s.col % 2 == 0)
            })
            .collect(),
        ),
        PieceKind::Knight | PieceKind::Rook | PieceKind::Cannon => all.collect(),
    }
}
