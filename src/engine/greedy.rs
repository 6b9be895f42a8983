// ==========================================
// 一维下料优化 - 贪心单遍策略
// ==========================================
// 前提: 同一规格的所有原料板长度相同
// 规则: 新板先放最长零件；之后优先用配对启发式收尾，
//       否则放仍能放下的最长零件；都放不下时换新板
// 输出: 只产出一个方案，不做最优搜索
// ==========================================

use crate::domain::board::Board;
use crate::domain::cut_order::CutOrder;
use crate::domain::length::Length;
use crate::engine::error::{EngineError, EngineResult};
use crate::engine::optimum::CandidateSink;
use crate::engine::pairing::longest_pair;
use crate::engine::strategy::{CutStrategy, DimensionJob, Orderings, StrategyKind};
use tracing::debug;

#[derive(Debug, Clone, Copy)]
pub struct GreedyStrategy {
    kerf: Length,
}

impl GreedyStrategy {
    pub fn new(kerf: Length) -> Self {
        Self { kerf }
    }

    /// 校验并返回统一板长
    fn board_length(&self, job: &DimensionJob) -> EngineResult<Length> {
        let Some(&board_length) = job.boards.first() else {
            return Err(EngineError::InsufficientStock {
                dimension: job.dimension.clone(),
                available: 0,
                remaining: job.parts.len(),
            });
        };

        if job.boards.iter().any(|&b| b != board_length) {
            let mut lengths = job.boards.clone();
            lengths.sort_unstable();
            lengths.dedup();
            return Err(EngineError::MixedBoardLengths {
                dimension: job.dimension.clone(),
                lengths,
            });
        }

        if let Some(&part) = job.parts.iter().max() {
            if part > board_length {
                return Err(EngineError::PartTooLong {
                    dimension: job.dimension.clone(),
                    part,
                    board: board_length,
                });
            }
        }

        Ok(board_length)
    }

    /// 单遍填充
    pub fn fill(&self, job: &DimensionJob) -> EngineResult<CutOrder> {
        let board_length = self.board_length(job)?;
        let stock = job.boards.len();
        let kerf = self.kerf;

        let mut remaining = job.parts.clone();
        remaining.sort_unstable_by(|a, b| b.cmp(a));

        let mut order = CutOrder::new();
        while !remaining.is_empty() {
            if order.board_count() == stock {
                return Err(EngineError::InsufficientStock {
                    dimension: job.dimension.clone(),
                    available: stock,
                    remaining: remaining.len(),
                });
            }

            let first = remaining.remove(0);
            let mut cuts = vec![first];
            let mut residual = board_length - first;

            loop {
                if let Some(pair) = longest_pair(&remaining, residual, kerf) {
                    take(&mut remaining, pair.larger());
                    take(&mut remaining, pair.smaller());
                    cuts.push(pair.larger());
                    cuts.push(pair.smaller());
                    residual -= pair.sum() + kerf.times(2);
                    continue;
                }

                match remaining.iter().position(|&part| part + kerf <= residual) {
                    Some(idx) => {
                        let part = remaining.remove(idx);
                        cuts.push(part);
                        residual -= part + kerf;
                    }
                    None => break,
                }
            }

            debug!(dimension = %job.dimension, board = order.board_count() + 1, residual = %residual, "贪心完成一块板");
            order.push(Board::new(job.dimension.as_str(), board_length), cuts);
        }

        Ok(order)
    }
}

/// 从降序列表中移除一个等值元素（保持有序）
fn take(parts: &mut Vec<Length>, length: Length) {
    if let Some(idx) = parts.iter().position(|&p| p == length) {
        parts.remove(idx);
    }
}

impl CutStrategy for GreedyStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Greedy
    }

    fn orderings(&self, job: &DimensionJob) -> EngineResult<Orderings> {
        if job.parts.is_empty() {
            return Ok(Box::new(std::iter::empty()));
        }
        self.board_length(job)?;
        Ok(Box::new(std::iter::once(job.clone())))
    }

    fn explore(&self, ordering: &DimensionJob, sink: &dyn CandidateSink) -> EngineResult<()> {
        if ordering.parts.is_empty() {
            return Ok(());
        }
        let order = self.fill(ordering)?;
        sink.accept(order);
        Ok(())
    }
}
