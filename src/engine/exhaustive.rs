// ==========================================
// 一维下料优化 - 穷举排列搜索策略
// ==========================================
// 流程: 板序全排列（不重复）→ 每个板序从左到右逐板调用单板填充生成器
//       → 每个候选切割清单开一个分支 → 零件用完即产出一个完整方案
// 失败: 板用完零件仍有剩余，或某块板放不下任何零件 → 该分支静默放弃
// 复杂度: 指数级，只适用于小规模输入
// ==========================================

use crate::domain::board::Board;
use crate::domain::cut_order::CutOrder;
use crate::domain::length::Length;
use crate::domain::part_multiset::PartMultiset;
use crate::engine::board_fill::BoardFiller;
use crate::engine::error::EngineResult;
use crate::engine::optimum::CandidateSink;
use crate::engine::permutations::DistinctPermutations;
use crate::engine::strategy::{CutStrategy, DimensionJob, Orderings, StrategyKind};
use std::sync::Arc;

// ==========================================
// CutNode - 分支路径节点
// ==========================================
// 已排好的板按父指针串成链，兄弟分支共享公共前缀，各自只拥有新追加的节点
#[derive(Debug)]
struct CutNode {
    board_length: Length,
    cuts: Vec<Length>,
    parent: Option<Arc<CutNode>>,
}

fn materialize(dimension: &str, tail: &Option<Arc<CutNode>>) -> CutOrder {
    let mut nodes = Vec::new();
    let mut cursor = tail.as_deref();
    while let Some(node) = cursor {
        nodes.push(node);
        cursor = node.parent.as_deref();
    }

    let mut order = CutOrder::new();
    for node in nodes.into_iter().rev() {
        order.push(Board::new(dimension, node.board_length), node.cuts.clone());
    }
    order
}

// ==========================================
// ExhaustiveStrategy - 穷举排列搜索
// ==========================================
#[derive(Debug, Clone)]
pub struct ExhaustiveStrategy {
    filler: BoardFiller,
    reuse_previous_board: bool,
}

impl ExhaustiveStrategy {
    pub fn new(kerf: Length) -> Self {
        Self {
            filler: BoardFiller::new(kerf),
            reuse_previous_board: true,
        }
    }

    /// 是否启用"同长度前一块板切法复用"捷径
    pub fn with_board_reuse(mut self, enabled: bool) -> Self {
        self.reuse_previous_board = enabled;
        self
    }

    fn next_board(
        &self,
        dimension: &str,
        boards: &[Length],
        index: usize,
        path: Option<Arc<CutNode>>,
        remaining: PartMultiset,
        sink: &dyn CandidateSink,
    ) {
        // 零件用完: 方案完成
        if remaining.is_empty() {
            if path.is_some() {
                sink.accept(materialize(dimension, &path));
            }
            return;
        }

        // 板用完: 该板序不可行
        let Some(&board_length) = boards.get(index) else {
            return;
        };

        // 前一块板同长度且其切法仍可满足时直接复用
        if self.reuse_previous_board {
            if let Some(previous) = path.as_deref() {
                if previous.board_length == board_length && remaining.contains_all(&previous.cuts) {
                    let cuts = previous.cuts.clone();
                    let mut child_remaining = remaining;
                    child_remaining.remove_all(&cuts);
                    let node = Arc::new(CutNode {
                        board_length,
                        cuts,
                        parent: path,
                    });
                    self.next_board(dimension, boards, index + 1, Some(node), child_remaining, sink);
                    return;
                }
            }
        }

        let candidates = self.filler.fill(board_length, &remaining);

        // 这块板放不下任何零件，放弃该板序
        for candidate in candidates {
            let mut child_remaining = remaining.clone();
            child_remaining.remove_all(candidate.as_slice());
            let node = Arc::new(CutNode {
                board_length,
                cuts: candidate.into_vec(),
                parent: path.clone(),
            });
            self.next_board(dimension, boards, index + 1, Some(node), child_remaining, sink);
        }
    }
}

impl CutStrategy for ExhaustiveStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Exhaustive
    }

    fn orderings(&self, job: &DimensionJob) -> EngineResult<Orderings> {
        if job.parts.is_empty() || job.boards.is_empty() {
            return Ok(Box::new(std::iter::empty()));
        }

        let dimension = job.dimension.clone();
        let parts = job.parts.clone();
        let orderings = DistinctPermutations::new(job.boards.clone()).map(move |boards| DimensionJob {
            dimension: dimension.clone(),
            boards,
            parts: parts.clone(),
        });
        Ok(Box::new(orderings))
    }

    fn explore(&self, ordering: &DimensionJob, sink: &dyn CandidateSink) -> EngineResult<()> {
        let remaining = PartMultiset::from(ordering.parts.clone());
        self.next_board(&ordering.dimension, &ordering.boards, 0, None, remaining, sink);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::optimum::{CollectingSink, OptimumTracker};

    fn lens(units: &[i64]) -> Vec<Length> {
        units.iter().map(|&u| Length::from_units(u)).collect()
    }

    fn layouts(orders: &[CutOrder]) -> Vec<Vec<(Length, Vec<Length>)>> {
        let mut all: Vec<_> = orders.iter().map(CutOrder::canonical_layout).collect();
        all.sort();
        all
    }

    #[test]
    fn test_three_halves_need_two_boards() {
        let strategy = ExhaustiveStrategy::new(Length::ZERO);
        let job = DimensionJob::new("2x4", lens(&[96, 96]), lens(&[48, 48, 48]));
        let tracker = OptimumTracker::new();
        strategy.search(&job, &tracker).unwrap();

        let best = tracker.best_for("2x4").unwrap();
        assert_eq!(best.waste, Length::from_units(48));
        assert_eq!(best.order.board_count(), 2);
        assert_eq!(best.order.boards()[0].cuts, lens(&[48, 48]));
        assert_eq!(best.order.boards()[1].cuts, lens(&[48]));
    }

    #[test]
    fn test_with_kerf_each_board_takes_one_half() {
        let strategy = ExhaustiveStrategy::new("0.125".parse().unwrap());
        let job = DimensionJob::new("2x4", lens(&[96, 96, 96]), lens(&[48, 48, 48]));
        let tracker = OptimumTracker::new();
        strategy.search(&job, &tracker).unwrap();

        let best = tracker.best_for("2x4").unwrap();
        assert_eq!(best.order.board_count(), 3);
        assert_eq!(best.waste, Length::from_units(144));
    }

    #[test]
    fn test_single_board_exact_fit() {
        let strategy = ExhaustiveStrategy::new(Length::ZERO);
        let job = DimensionJob::new("1x6", lens(&[50]), lens(&[30, 20]));
        let sink = CollectingSink::new();
        strategy.search(&job, &sink).unwrap();

        let found = sink.into_inner();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].waste(), Length::ZERO);
        assert_eq!(found[0].boards()[0].cuts, lens(&[30, 20]));
    }

    #[test]
    fn test_board_order_matters_and_is_enumerated() {
        // 先用 40 的板只能放 40；先用 100 的板可以放 60+40
        let strategy = ExhaustiveStrategy::new(Length::ZERO);
        let job = DimensionJob::new("2x4", lens(&[40, 100]), lens(&[60, 40]));
        let tracker = OptimumTracker::new();
        strategy.search(&job, &tracker).unwrap();

        let best = tracker.best_for("2x4").unwrap();
        assert_eq!(best.waste, Length::ZERO);
        assert_eq!(best.order.board_count(), 1);
        assert_eq!(strategy.orderings(&job).unwrap().count(), 2);
    }

    #[test]
    fn test_infeasible_yields_nothing() {
        let strategy = ExhaustiveStrategy::new(Length::ZERO);
        let too_long = DimensionJob::new("2x4", lens(&[50]), lens(&[60]));
        let not_enough = DimensionJob::new("2x4", lens(&[50]), lens(&[40, 40]));
        let sink = CollectingSink::new();
        strategy.search(&too_long, &sink).unwrap();
        strategy.search(&not_enough, &sink).unwrap();
        assert!(sink.is_empty());
    }

    #[test]
    fn test_every_candidate_is_complete_and_feasible() {
        let kerf: Length = "0.125".parse().unwrap();
        let strategy = ExhaustiveStrategy::new(kerf);
        let parts = lens(&[30, 30, 24, 18, 18, 12, 6]);
        let job = DimensionJob::new("2x4", lens(&[48, 60, 72]), parts.clone());
        let sink = CollectingSink::new();
        strategy.search(&job, &sink).unwrap();

        let found = sink.into_inner();
        assert!(!found.is_empty());
        let required: PartMultiset = parts.into();
        for order in &found {
            assert!(order.fits(kerf));
            let mut cut: Vec<Length> = order.iter().flat_map(|b| b.cuts.iter().copied()).collect();
            let mut expected = required.as_slice().to_vec();
            cut.sort();
            expected.sort();
            assert_eq!(cut, expected);
        }
    }

    #[test]
    fn test_board_reuse_shortcut_keeps_optimum() {
        let parts = lens(&[40, 40, 40, 40, 15, 15]);
        let job = DimensionJob::new("2x4", lens(&[96, 96, 96]), parts);

        let with_reuse = OptimumTracker::new();
        ExhaustiveStrategy::new(Length::ZERO).search(&job, &with_reuse).unwrap();
        let without_reuse = OptimumTracker::new();
        ExhaustiveStrategy::new(Length::ZERO)
            .with_board_reuse(false)
            .search(&job, &without_reuse)
            .unwrap();

        assert_eq!(
            with_reuse.best_for("2x4").unwrap().waste,
            without_reuse.best_for("2x4").unwrap().waste
        );
    }

    #[test]
    fn test_explore_is_deterministic() {
        let strategy = ExhaustiveStrategy::new(Length::ZERO);
        let job = DimensionJob::new("2x4", lens(&[20, 30]), lens(&[10, 10, 15, 5]));
        let first = CollectingSink::new();
        let second = CollectingSink::new();
        strategy.search(&job, &first).unwrap();
        strategy.search(&job, &second).unwrap();
        assert_eq!(layouts(&first.into_inner()), layouts(&second.into_inner()));
    }
}
