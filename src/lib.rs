// ==========================================
// 一维下料优化 - 核心库
// ==========================================
// 用途: 按规格把零件分配到原料板上，使余料最少
// 约束: 每次切割损耗一个锯口宽度
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 长度、板、切割方案
pub mod domain;

// 引擎层 - 填充、搜索、并发编排
pub mod engine;

// 导入层 - 清单文件
pub mod importer;

// 配置层 - 优化器配置
pub mod config;

// 报表层 - 切割清单与运行汇总
pub mod report;

// 统一错误类型
pub mod error;

// 运行入口
pub mod runner;

// 日志系统
pub mod logging;

// 性能统计
pub mod perf;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::{Board, BoardCuts, CutOrder, Length, LengthParseError, PartMultiset, PartPair, WoodList};

// 引擎
pub use engine::{
    BoardFiller, CandidateSink, CutListCalculator, CutStrategy, DimensionJob, EngineError,
    ExecutionMode, ExhaustiveStrategy, GreedyStrategy, OptimizationResult, OptimumTracker,
    StrategyKind,
};

// 配置、导入、输出
pub use config::{ConfigManager, OptimizerConfig};
pub use error::{CutListError, CutListResult};
pub use importer::{load_inputs, WoodListLoader};
pub use report::{render_csv, write_csv, RunSummary};
pub use runner::run;

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "一维下料优化";

// 没有任何规格得到方案时的提示
pub const NO_RESULT_MESSAGE: &str = "no optimal cut order found";
