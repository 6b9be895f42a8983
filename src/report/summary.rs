// ==========================================
// 一维下料优化 - 运行汇总
// ==========================================

use crate::domain::cut_order::CutOrder;
use crate::domain::length::Length;
use crate::engine::optimum::DimensionBest;
use crate::engine::orchestrator::{ExecutionMode, OptimizationResult};
use crate::engine::strategy::StrategyKind;
use crate::report::error::ReportResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ==========================================
// DimensionSummary - 单规格汇总
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimensionSummary {
    pub dimension: String,
    pub boards_used: usize,
    pub cuts: usize,
    /// 所用原料板总长
    pub stock_length: Length,
    /// 切出零件总长
    pub cut_length: Length,
    /// 余料（含锯口损耗）
    pub waste: Length,
}

impl DimensionSummary {
    pub fn from_order(dimension: impl Into<String>, order: &CutOrder) -> Self {
        Self {
            dimension: dimension.into(),
            boards_used: order.board_count(),
            cuts: order.cut_count(),
            stock_length: order.iter().map(|b| b.board.length).sum(),
            cut_length: order.iter().map(|b| b.cut_total()).sum(),
            waste: order.waste(),
        }
    }

    pub fn from_best(dimension: &str, best: &DimensionBest) -> Self {
        Self::from_order(dimension, &best.order)
    }

    /// 原料利用率（0~1）
    pub fn utilization(&self) -> f64 {
        if self.stock_length.micros() == 0 {
            return 0.0;
        }
        self.cut_length.micros() as f64 / self.stock_length.micros() as f64
    }
}

// ==========================================
// RunSummary - 单次运行汇总
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub strategy: StrategyKind,
    pub execution: ExecutionMode,
    pub kerf: Length,
    pub dimensions: Vec<DimensionSummary>,
    /// 有零件需求但没有可行方案的规格
    pub unsolved: Vec<String>,
    pub total_waste: Length,
    pub candidates_considered: u64,
    pub improvements: u64,
    /// 写出的切割清单路径；没有结果时为 None
    pub output_path: Option<String>,
}

impl RunSummary {
    pub fn from_result(
        run_id: Uuid,
        started_at: DateTime<Utc>,
        strategy: StrategyKind,
        execution: ExecutionMode,
        kerf: Length,
        result: &OptimizationResult,
    ) -> Self {
        Self {
            run_id,
            started_at,
            finished_at: Utc::now(),
            strategy,
            execution,
            kerf,
            dimensions: result
                .best
                .iter()
                .map(|(dimension, best)| DimensionSummary::from_best(dimension, best))
                .collect(),
            unsolved: result.unsolved.clone(),
            total_waste: result.total_waste,
            candidates_considered: result.candidates_considered,
            improvements: result.improvements,
            output_path: None,
        }
    }

    pub fn has_result(&self) -> bool {
        !self.dimensions.is_empty()
    }

    pub fn elapsed_ms(&self) -> i64 {
        (self.finished_at - self.started_at).num_milliseconds()
    }

    pub fn to_json(&self) -> ReportResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
