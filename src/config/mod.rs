// ==========================================
// 一维下料优化 - 配置层
// ==========================================
// 职责: 优化器配置管理，支持文件与环境变量多级覆写
// 存储: cutlist.json（可选）
// ==========================================

pub mod config_manager;
pub mod error;
pub mod optimizer_config;

// 重导出核心配置管理器
pub use config_manager::{apply_overrides, config_keys, ConfigManager, DEFAULT_CONFIG_FILE};
pub use error::{ConfigError, ConfigResult};
pub use optimizer_config::OptimizerConfig;
