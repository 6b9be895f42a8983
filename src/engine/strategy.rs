// ==========================================
// 一维下料优化 - 搜索策略定义
// ==========================================
// 用途:
// - 穷举策略与贪心策略共用同一接口，最优跟踪器与策略无关；
// - 策略把一个规格拆成若干相互独立的搜索单元，由编排器决定如何调度。

use crate::domain::length::Length;
use crate::engine::error::EngineResult;
use crate::engine::optimum::CandidateSink;
use serde::{Deserialize, Serialize};

// ==========================================
// DimensionJob - 单规格搜索任务
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DimensionJob {
    /// 规格
    pub dimension: String,
    /// 原料板长度（在搜索单元中即为使用顺序）
    pub boards: Vec<Length>,
    /// 需切割的零件长度
    pub parts: Vec<Length>,
}

impl DimensionJob {
    pub fn new(dimension: impl Into<String>, boards: Vec<Length>, parts: Vec<Length>) -> Self {
        Self {
            dimension: dimension.into(),
            boards,
            parts,
        }
    }
}

/// 搜索单元序列（惰性生成，避免一次性展开全部排列）
pub type Orderings = Box<dyn Iterator<Item = DimensionJob> + Send>;

// ==========================================
// CutStrategy - 搜索策略接口
// ==========================================
pub trait CutStrategy: Send + Sync {
    fn kind(&self) -> StrategyKind;

    /// 拆分为相互独立的搜索单元（板序/零件序已固定）
    fn orderings(&self, job: &DimensionJob) -> EngineResult<Orderings>;

    /// 顺序执行一个搜索单元，把每个完整方案交给 `sink`
    fn explore(&self, ordering: &DimensionJob, sink: &dyn CandidateSink) -> EngineResult<()>;

    /// 顺序执行整个规格
    fn search(&self, job: &DimensionJob, sink: &dyn CandidateSink) -> EngineResult<()> {
        for ordering in self.orderings(job)? {
            self.explore(&ordering, sink)?;
        }
        Ok(())
    }
}

// ==========================================
// StrategyKind - 策略类型
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    /// 板序全排列 + 单板最大利用递归（保证最优，指数复杂度）
    #[default]
    Exhaustive,
    /// 单一板长下的贪心单遍填充（一次产出，不保证最优）
    Greedy,
}

impl StrategyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StrategyKind::Exhaustive => "exhaustive",
            StrategyKind::Greedy => "greedy",
        }
    }

    pub fn title_cn(&self) -> &'static str {
        match self {
            StrategyKind::Exhaustive => "穷举最优",
            StrategyKind::Greedy => "贪心快排",
        }
    }
}

impl std::fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for StrategyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "exhaustive" | "optimal" => Ok(StrategyKind::Exhaustive),
            "greedy" | "greedy_single_pass" | "greedy-single-pass" => Ok(StrategyKind::Greedy),
            other => Err(format!("未知策略类型: {}", other)),
        }
    }
}
