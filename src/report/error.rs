// ==========================================
// 一维下料优化 - 报表层错误类型
// ==========================================

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("CSV 写出失败: {0}")]
    Csv(#[from] csv::Error),

    #[error("文件写入失败 ({path}): {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("输出缓冲刷新失败: {0}")]
    Flush(String),

    #[error("输出编码错误: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),

    #[error("汇总序列化失败: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Result 类型别名
pub type ReportResult<T> = Result<T, ReportError>;
