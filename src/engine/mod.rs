// ==========================================
// 一维下料优化 - 引擎层
// ==========================================
// 职责: 单板填充、配对启发式、搜索策略、最优跟踪与并发编排
// 红线: 引擎不读写文件，输入输出都是领域类型
// ==========================================

pub mod board_fill;
pub mod error;
pub mod exhaustive;
pub mod greedy;
pub mod optimum;
pub mod orchestrator;
pub mod pairing;
pub mod permutations;
pub mod strategy;

// 重导出核心引擎
pub use board_fill::BoardFiller;
pub use error::{EngineError, EngineResult};
pub use exhaustive::ExhaustiveStrategy;
pub use greedy::GreedyStrategy;
pub use optimum::{CandidateSink, CollectingSink, DimensionBest, OptimumTracker};
pub use orchestrator::{CutListCalculator, ExecutionMode, OptimizationResult};
pub use pairing::longest_pair;
pub use permutations::DistinctPermutations;
pub use strategy::{CutStrategy, DimensionJob, Orderings, StrategyKind};
