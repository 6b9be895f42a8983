// ==========================================
// 一维下料优化 - 切割方案
// ==========================================
// 职责: 板实例 → 有序切割长度列表 的完整分配
// 红线: 每块板满足 Σ切割 + (切割数 - 1) × 锯缝 ≤ 板长
// ==========================================

use crate::domain::board::Board;
use crate::domain::length::Length;
use serde::{Deserialize, Serialize};

// ==========================================
// BoardCuts - 单块板实例及其切割清单
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardCuts {
    pub board: Board,
    pub cuts: Vec<Length>,
}

impl BoardCuts {
    pub fn new(board: Board, cuts: Vec<Length>) -> Self {
        Self { board, cuts }
    }

    /// 切割长度之和（不含锯缝）
    pub fn cut_total(&self) -> Length {
        self.cuts.iter().sum()
    }

    /// 本板余料 = 板长 - Σ切割（锯缝损耗计入余料）
    pub fn waste(&self) -> Length {
        self.board.length - self.cut_total()
    }

    /// 占用长度 = Σ切割 + (切割数 - 1) × 锯缝
    pub fn consumed(&self, kerf: Length) -> Length {
        self.cut_total() + kerf.times(self.cuts.len().saturating_sub(1))
    }

    pub fn fits(&self, kerf: Length) -> bool {
        self.consumed(kerf) <= self.board.length
    }
}

// ==========================================
// CutOrder - 切割方案
// ==========================================
// 插入顺序只影响报表中的板编号
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CutOrder {
    boards: Vec<BoardCuts>,
}

impl CutOrder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, board: Board, cuts: Vec<Length>) {
        self.boards.push(BoardCuts::new(board, cuts));
    }

    pub fn boards(&self) -> &[BoardCuts] {
        &self.boards
    }

    pub fn iter(&self) -> std::slice::Iter<'_, BoardCuts> {
        self.boards.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.boards.is_empty()
    }

    pub fn board_count(&self) -> usize {
        self.boards.len()
    }

    pub fn cut_count(&self) -> usize {
        self.boards.iter().map(|b| b.cuts.len()).sum()
    }

    /// 方案所属规格（取第一块板）；同一方案内不允许混合规格
    pub fn dimension(&self) -> Option<&str> {
        self.boards.first().map(|b| b.board.dimension.as_str())
    }

    /// 总余料
    pub fn waste(&self) -> Length {
        self.boards.iter().map(BoardCuts::waste).sum()
    }

    /// 所有板均满足锯缝约束
    pub fn fits(&self, kerf: Length) -> bool {
        self.boards.iter().all(|b| b.fits(kerf))
    }

    /// 合并另一个方案（追加在末尾）
    pub fn extend(&mut self, other: CutOrder) {
        self.boards.extend(other.boards);
    }

    /// 与插入顺序无关的规范布局: 每块板 (板长, 降序切割)，整体排序
    ///
    /// 用于在余料相同的方案之间做确定性比较。
    pub fn canonical_layout(&self) -> Vec<(Length, Vec<Length>)> {
        let mut layout: Vec<(Length, Vec<Length>)> = self
            .boards
            .iter()
            .map(|b| {
                let mut cuts = b.cuts.clone();
                cuts.sort_unstable_by(|x, y| y.cmp(x));
                (b.board.length, cuts)
            })
            .collect();
        layout.sort();
        layout
    }
}

impl<'a> IntoIterator for &'a CutOrder {
    type Item = &'a BoardCuts;
    type IntoIter = std::slice::Iter<'a, BoardCuts>;

    fn into_iter(self) -> Self::IntoIter {
        self.boards.iter()
    }
}

impl FromIterator<BoardCuts> for CutOrder {
    fn from_iter<I: IntoIterator<Item = BoardCuts>>(iter: I) -> Self {
        Self {
            boards: iter.into_iter().collect(),
        }
    }
}
