// ==========================================
// 一维下料优化 - 导入模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// 说明: 导入错误都是致命的，在搜索开始之前返回
// ==========================================

use thiserror::Error;

/// 导入模块错误类型
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 文件相关错误 =====
    #[error("文件不存在: {0}")]
    FileNotFound(String),

    #[error("文件格式不支持: {0}（仅支持 .xlsx/.xls/.csv）")]
    UnsupportedFormat(String),

    #[error("文件为空（缺少表头）: {0}")]
    EmptyFile(String),

    #[error("文件读取失败: {0}")]
    FileReadError(String),

    #[error("Excel 解析失败: {0}")]
    ExcelParseError(String),

    #[error("CSV 解析失败: {0}")]
    CsvParseError(String),

    // ===== 数据行错误 =====
    #[error("字段映射失败 ({path} 行 {row}): {message}")]
    FieldMappingError {
        path: String,
        row: usize,
        message: String,
    },

    #[error("类型转换失败 ({path} 行 {row}, 字段 {field}): {message}")]
    TypeConversionError {
        path: String,
        row: usize,
        field: String,
        message: String,
    },

    #[error("数值范围错误 ({path} 行 {row}, 字段 {field}): 值 {value} {message}")]
    ValueRangeError {
        path: String,
        row: usize,
        field: String,
        value: String,
        message: String,
    },

    // ===== 通用错误 =====
    #[error("内部错误: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// 实现 From<std::io::Error>
impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::FileReadError(err.to_string())
    }
}

// 实现 From<csv::Error>
impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::CsvParseError(err.to_string())
    }
}

// 实现 From<calamine::Error>
impl From<calamine::Error> for ImportError {
    fn from(err: calamine::Error) -> Self {
        ImportError::ExcelParseError(err.to_string())
    }
}

// 实现 From<tokio::task::JoinError>
impl From<tokio::task::JoinError> for ImportError {
    fn from(err: tokio::task::JoinError) -> Self {
        ImportError::InternalError(err.to_string())
    }
}

/// Result 类型别名
pub type ImportResult<T> = Result<T, ImportError>;
