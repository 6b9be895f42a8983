// ==========================================
// 一维下料优化 - 配置层错误类型
// ==========================================

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件读取失败 ({path}): {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("配置文件写入失败 ({path}): {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("配置文件格式错误 ({path}): {source}")]
    Malformed {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("配置覆写无效 ({key}={value}): {reason}")]
    InvalidOverride {
        key: String,
        value: String,
        reason: String,
    },

    #[error("配置项无效 ({field}): {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("配置序列化失败: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Result 类型别名
pub type ConfigResult<T> = Result<T, ConfigError>;
