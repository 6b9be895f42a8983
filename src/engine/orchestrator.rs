// ==========================================
// 一维下料优化 - 搜索编排器
// ==========================================
// 用途: 按规格生成搜索任务，调度各搜索单元并汇总最优方案
// 并发: 搜索单元之间没有共享可变状态，只共享最优跟踪器
//       调度方式只影响吞吐与内存，不影响候选方案集合
// ==========================================

use crate::config::OptimizerConfig;
use crate::domain::cut_order::CutOrder;
use crate::domain::length::Length;
use crate::domain::wood_list::WoodList;
use crate::engine::error::EngineResult;
use crate::engine::exhaustive::ExhaustiveStrategy;
use crate::engine::greedy::GreedyStrategy;
use crate::engine::optimum::{CandidateSink, DimensionBest, OptimumTracker};
use crate::engine::strategy::{CutStrategy, DimensionJob, StrategyKind};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, info, instrument, warn};

// ==========================================
// ExecutionMode - 调度方式
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionMode {
    /// 单个阻塞任务内顺序递归
    Sequential,
    /// 每个搜索单元一个阻塞任务，不限并发
    TaskPerOrdering,
    /// 每个搜索单元一个阻塞任务，由计数信号量限制同时在途数量
    #[default]
    Bounded,
}

impl ExecutionMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExecutionMode::Sequential => "sequential",
            ExecutionMode::TaskPerOrdering => "task_per_ordering",
            ExecutionMode::Bounded => "bounded",
        }
    }
}

impl std::fmt::Display for ExecutionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ExecutionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sequential" => Ok(ExecutionMode::Sequential),
            "task_per_ordering" | "task-per-ordering" | "unbounded" => {
                Ok(ExecutionMode::TaskPerOrdering)
            }
            "bounded" | "pool" => Ok(ExecutionMode::Bounded),
            other => Err(format!("未知调度方式: {}", other)),
        }
    }
}

// ==========================================
// OptimizationResult - 优化结果
// ==========================================
#[derive(Debug, Clone)]
pub struct OptimizationResult {
    /// 各规格最优方案（字典序）
    pub best: Vec<(String, DimensionBest)>,
    /// 合并后的总方案；没有任何规格得到结果时为 None
    pub cut_order: Option<CutOrder>,
    /// 有零件需求但没有找到可行方案的规格
    pub unsolved: Vec<String>,
    /// 各规格最优余料之和
    pub total_waste: Length,
    /// 参与比较的完整方案数
    pub candidates_considered: u64,
    /// 最优方案被刷新的次数
    pub improvements: u64,
}

// ==========================================
// CutListCalculator - 搜索编排器
// ==========================================
pub struct CutListCalculator {
    strategy: Arc<dyn CutStrategy>,
    mode: ExecutionMode,
    max_in_flight: usize,
}

impl CutListCalculator {
    /// 创建编排器
    ///
    /// # 参数
    /// - strategy: 搜索策略
    /// - mode: 调度方式
    /// - max_in_flight: 有界调度下同时在途的搜索单元上限（最小为 1）
    pub fn new(strategy: Arc<dyn CutStrategy>, mode: ExecutionMode, max_in_flight: usize) -> Self {
        Self {
            strategy,
            mode,
            max_in_flight: max_in_flight.max(1),
        }
    }

    /// 按配置组装策略与调度方式
    pub fn from_config(config: &OptimizerConfig) -> Self {
        let strategy: Arc<dyn CutStrategy> = match config.strategy {
            StrategyKind::Exhaustive => Arc::new(
                ExhaustiveStrategy::new(config.kerf).with_board_reuse(config.reuse_previous_board),
            ),
            StrategyKind::Greedy => Arc::new(GreedyStrategy::new(config.kerf)),
        };
        Self::new(strategy, config.execution, config.effective_max_in_flight())
    }

    pub fn strategy_kind(&self) -> StrategyKind {
        self.strategy.kind()
    }

    pub fn mode(&self) -> ExecutionMode {
        self.mode
    }

    /// 按零件清单的规格生成搜索任务；原料清单中没有的规格得到空板列表
    pub fn plan_jobs(materials: &WoodList, parts: &WoodList) -> Vec<DimensionJob> {
        parts
            .iter()
            .filter(|(_, lengths)| !lengths.is_empty())
            .map(|(dimension, lengths)| {
                let boards = materials.get(dimension).map(<[Length]>::to_vec).unwrap_or_default();
                DimensionJob::new(dimension, boards, lengths.to_vec())
            })
            .collect()
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 求各规格最优方案并合并
    #[instrument(skip_all, fields(strategy = %self.strategy.kind(), mode = %self.mode))]
    pub async fn find_optimal(
        &self,
        materials: &WoodList,
        parts: &WoodList,
    ) -> EngineResult<OptimizationResult> {
        let jobs = Self::plan_jobs(materials, parts);
        info!(dimensions = jobs.len(), "开始搜索最优切割方案");

        let tracker = Arc::new(OptimumTracker::new());
        self.run_jobs(jobs.clone(), tracker.clone()).await?;

        let best = tracker.snapshot();
        let unsolved: Vec<String> = jobs
            .iter()
            .map(|job| job.dimension.clone())
            .filter(|dimension| best.iter().all(|(d, _)| d != dimension))
            .collect();
        for dimension in &unsolved {
            warn!(dimension = %dimension, "该规格没有可行的切割方案");
        }

        let result = OptimizationResult {
            cut_order: tracker.merged(),
            total_waste: tracker.total_waste(),
            candidates_considered: tracker.considered(),
            improvements: tracker.improvements(),
            best,
            unsolved,
        };

        info!(
            solved = result.best.len(),
            unsolved = result.unsolved.len(),
            total_waste = %result.total_waste,
            candidates = result.candidates_considered,
            "最优切割方案搜索完成"
        );
        Ok(result)
    }

    /// 把所有完整方案交给 `sink`（不做比较）
    pub async fn find_all(
        &self,
        materials: &WoodList,
        parts: &WoodList,
        sink: Arc<dyn CandidateSink>,
    ) -> EngineResult<()> {
        self.run_jobs(Self::plan_jobs(materials, parts), sink).await
    }

    async fn run_jobs(&self, jobs: Vec<DimensionJob>, sink: Arc<dyn CandidateSink>) -> EngineResult<()> {
        match self.mode {
            ExecutionMode::Sequential => self.run_sequential(jobs, sink).await,
            ExecutionMode::TaskPerOrdering => self.run_unbounded(jobs, sink).await,
            ExecutionMode::Bounded => self.run_bounded(jobs, sink).await,
        }
    }

    async fn run_sequential(&self, jobs: Vec<DimensionJob>, sink: Arc<dyn CandidateSink>) -> EngineResult<()> {
        let strategy = self.strategy.clone();
        tokio::task::spawn_blocking(move || -> EngineResult<()> {
            for job in &jobs {
                debug!(dimension = %job.dimension, boards = job.boards.len(), parts = job.parts.len(), "顺序搜索规格");
                strategy.search(job, sink.as_ref())?;
            }
            Ok(())
        })
        .await?
    }

    async fn run_unbounded(&self, jobs: Vec<DimensionJob>, sink: Arc<dyn CandidateSink>) -> EngineResult<()> {
        let mut handles = Vec::new();
        for job in &jobs {
            for ordering in self.strategy.orderings(job)? {
                let strategy = self.strategy.clone();
                let sink = sink.clone();
                handles.push(tokio::task::spawn_blocking(move || {
                    strategy.explore(&ordering, sink.as_ref())
                }));
            }
            debug!(dimension = %job.dimension, tasks = handles.len(), "已派发搜索单元");
        }

        for joined in futures::future::join_all(handles).await {
            joined??;
        }
        Ok(())
    }

    async fn run_bounded(&self, jobs: Vec<DimensionJob>, sink: Arc<dyn CandidateSink>) -> EngineResult<()> {
        let gate = Arc::new(Semaphore::new(self.max_in_flight));
        let mut tasks = JoinSet::new();

        for job in &jobs {
            let mut dispatched = 0usize;
            for ordering in self.strategy.orderings(job)? {
                let permit = gate.clone().acquire_owned().await?;
                let strategy = self.strategy.clone();
                let sink = sink.clone();
                tasks.spawn_blocking(move || {
                    let _permit = permit;
                    strategy.explore(&ordering, sink.as_ref())
                });
                dispatched += 1;

                // 及时回收已完成任务，尽早暴露错误
                while let Some(joined) = tasks.try_join_next() {
                    joined??;
                }
            }
            debug!(dimension = %job.dimension, tasks = dispatched, "已派发搜索单元");
        }

        while let Some(joined) = tasks.join_next().await {
            joined??;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::optimum::CollectingSink;

    fn lens(units: &[i64]) -> Vec<Length> {
        units.iter().map(|&u| Length::from_units(u)).collect()
    }

    fn wood(entries: &[(&str, i64, usize)]) -> WoodList {
        let mut list = WoodList::new();
        for &(dimension, length, quantity) in entries {
            list.add(dimension, Length::from_units(length), quantity);
        }
        list.sort();
        list
    }

    #[test]
    fn test_plan_jobs_follows_parts() {
        let materials = wood(&[("2x4", 96, 2), ("1x6", 48, 1)]);
        let parts = wood(&[("2x4", 40, 3), ("4x4", 10, 1), ("1x8", 5, 0)]);
        let jobs = CutListCalculator::plan_jobs(&materials, &parts);

        assert_eq!(jobs.len(), 2);
        assert_eq!(jobs[0].dimension, "2x4");
        assert_eq!(jobs[0].boards, lens(&[96, 96]));
        assert_eq!(jobs[1].dimension, "4x4");
        assert!(jobs[1].boards.is_empty());
    }

    #[test]
    fn test_execution_mode_parse() {
        assert_eq!("bounded".parse::<ExecutionMode>(), Ok(ExecutionMode::Bounded));
        assert_eq!("task-per-ordering".parse::<ExecutionMode>(), Ok(ExecutionMode::TaskPerOrdering));
        assert!("fast".parse::<ExecutionMode>().is_err());
    }

    #[tokio::test]
    async fn test_all_modes_find_same_candidates() {
        let materials = wood(&[("2x4", 96, 1), ("2x4", 72, 1), ("2x4", 60, 1)]);
        let parts = wood(&[("2x4", 40, 2), ("2x4", 30, 2), ("2x4", 20, 2)]);
        let strategy: Arc<dyn CutStrategy> = Arc::new(ExhaustiveStrategy::new(Length::ZERO));

        let mut result_sets = Vec::new();
        for mode in [ExecutionMode::Sequential, ExecutionMode::TaskPerOrdering, ExecutionMode::Bounded] {
            let calculator = CutListCalculator::new(strategy.clone(), mode, 2);
            let sink = Arc::new(CollectingSink::new());
            calculator.find_all(&materials, &parts, sink.clone()).await.unwrap();
            let mut layouts: Vec<_> = sink.drain().iter().map(CutOrder::canonical_layout).collect();
            layouts.sort();
            result_sets.push(layouts);
        }

        assert!(!result_sets[0].is_empty());
        assert_eq!(result_sets[0], result_sets[1]);
        assert_eq!(result_sets[0], result_sets[2]);
    }

    #[tokio::test]
    async fn test_unsolved_dimension_is_reported() {
        let materials = wood(&[("2x4", 96, 1)]);
        let parts = wood(&[("2x4", 48, 2), ("4x4", 10, 1)]);
        let calculator = CutListCalculator::new(
            Arc::new(ExhaustiveStrategy::new(Length::ZERO)),
            ExecutionMode::Bounded,
            4,
        );
        let result = calculator.find_optimal(&materials, &parts).await.unwrap();

        assert_eq!(result.unsolved, vec!["4x4".to_string()]);
        assert_eq!(result.total_waste, Length::ZERO);
        assert_eq!(result.cut_order.unwrap().cut_count(), 2);
    }

    #[tokio::test]
    async fn test_no_result_at_all() {
        let materials = wood(&[("2x4", 10, 1)]);
        let parts = wood(&[("2x4", 48, 1)]);
        let calculator = CutListCalculator::new(
            Arc::new(ExhaustiveStrategy::new(Length::ZERO)),
            ExecutionMode::Sequential,
            1,
        );
        let result = calculator.find_optimal(&materials, &parts).await.unwrap();
        assert!(result.cut_order.is_none());
        assert_eq!(result.unsolved, vec!["2x4".to_string()]);
    }

    #[tokio::test]
    async fn test_greedy_errors_propagate() {
        let materials = wood(&[("2x4", 96, 1), ("2x4", 72, 1)]);
        let parts = wood(&[("2x4", 48, 1)]);
        let calculator = CutListCalculator::new(
            Arc::new(GreedyStrategy::new(Length::ZERO)),
            ExecutionMode::Bounded,
            2,
        );
        let result = calculator.find_optimal(&materials, &parts).await;
        assert!(matches!(
            result,
            Err(crate::engine::error::EngineError::MixedBoardLengths { .. })
        ));
    }
}
