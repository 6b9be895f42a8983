// ==========================================
// 一维下料优化 - 引擎错误类型
// ==========================================
// 工具: thiserror 派生宏
// 说明: 穷举搜索中单个分支不可行属于正常控制流，不产生错误
// ==========================================

use crate::domain::length::Length;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    // ===== 可行性错误（贪心策略） =====
    #[error("零件过长 (规格 {dimension}): 零件 {part} 超过板长 {board}")]
    PartTooLong {
        dimension: String,
        part: Length,
        board: Length,
    },

    #[error("贪心策略要求单一板长 (规格 {dimension}): 实际板长 {lengths:?}")]
    MixedBoardLengths {
        dimension: String,
        lengths: Vec<Length>,
    },

    #[error("原料不足 (规格 {dimension}): 可用 {available} 块，仍有 {remaining} 个零件未排")]
    InsufficientStock {
        dimension: String,
        available: usize,
        remaining: usize,
    },

    // ===== 调度错误 =====
    #[error("搜索任务执行失败: {0}")]
    TaskFailed(String),

    #[error("并发闸门已关闭: {0}")]
    GateClosed(String),

    // ===== 通用错误 =====
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<tokio::task::JoinError> for EngineError {
    fn from(err: tokio::task::JoinError) -> Self {
        EngineError::TaskFailed(err.to_string())
    }
}

impl From<tokio::sync::AcquireError> for EngineError {
    fn from(err: tokio::sync::AcquireError) -> Self {
        EngineError::GateClosed(err.to_string())
    }
}

/// Result 类型别名
pub type EngineResult<T> = Result<T, EngineError>;
