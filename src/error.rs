// ==========================================
// 一维下料优化 - 统一错误类型
// ==========================================
// 汇总各层错误，供运行入口与调用方使用
// ==========================================

use crate::config::ConfigError;
use crate::engine::EngineError;
use crate::importer::ImportError;
use crate::report::ReportError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CutListError {
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),

    #[error("导入错误: {0}")]
    Import(#[from] ImportError),

    #[error("优化错误: {0}")]
    Engine(#[from] EngineError),

    #[error("输出错误: {0}")]
    Report(#[from] ReportError),
}

/// Result 类型别名
pub type CutListResult<T> = Result<T, CutListError>;
