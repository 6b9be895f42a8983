// ==========================================
// 一维下料优化 - 配置管理器
// ==========================================
// 职责: 配置加载、覆写、快照
// 层级: 默认值 → cutlist.json（存在时）→ CUTLIST_* 环境变量
// ==========================================

use crate::config::error::{ConfigError, ConfigResult};
use crate::config::optimizer_config::OptimizerConfig;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const DEFAULT_CONFIG_FILE: &str = "cutlist.json";

/// 环境变量覆写键
pub mod config_keys {
    pub const KERF: &str = "CUTLIST_KERF";
    pub const STRATEGY: &str = "CUTLIST_STRATEGY";
    pub const EXECUTION: &str = "CUTLIST_EXECUTION";
    pub const MAX_IN_FLIGHT: &str = "CUTLIST_MAX_IN_FLIGHT";
    pub const MATERIALS_PATH: &str = "CUTLIST_MATERIALS";
    pub const PARTS_PATH: &str = "CUTLIST_PARTS";
    pub const OUTPUT_PATH: &str = "CUTLIST_OUTPUT";
}

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
#[derive(Debug, Clone)]
pub struct ConfigManager {
    path: PathBuf,
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new(DEFAULT_CONFIG_FILE)
    }
}

impl ConfigManager {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 读取配置文件；文件不存在时返回默认配置
    ///
    /// # 返回
    /// - Ok(OptimizerConfig): 已校验的配置
    /// - Err: 文件不可读、格式错误或取值无效
    pub fn load(&self) -> ConfigResult<OptimizerConfig> {
        let config = if self.path.exists() {
            let raw = std::fs::read_to_string(&self.path).map_err(|source| ConfigError::Read {
                path: self.path.display().to_string(),
                source,
            })?;
            let config: OptimizerConfig =
                serde_json::from_str(&raw).map_err(|source| ConfigError::Malformed {
                    path: self.path.display().to_string(),
                    source,
                })?;
            info!(path = %self.path.display(), "已加载配置文件");
            config
        } else {
            debug!(path = %self.path.display(), "配置文件不存在，使用默认配置");
            OptimizerConfig::default()
        };

        config.validate()?;
        Ok(config)
    }

    /// 读取配置文件并应用进程环境变量覆写
    pub fn load_with_env(&self) -> ConfigResult<OptimizerConfig> {
        let mut config = self.load()?;
        apply_overrides(&mut config, |key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// 写回配置文件（格式化 JSON）
    pub fn save(&self, config: &OptimizerConfig) -> ConfigResult<()> {
        config.validate()?;
        let json = Self::snapshot(config)?;
        std::fs::write(&self.path, json).map_err(|source| ConfigError::Write {
            path: self.path.display().to_string(),
            source,
        })
    }

    /// 配置快照（JSON），随运行结果一起记录
    pub fn snapshot(config: &OptimizerConfig) -> ConfigResult<String> {
        Ok(serde_json::to_string_pretty(config)?)
    }
}

/// 按键查询覆写值并写入配置
///
/// # 参数
/// - lookup: 键 → 值，通常为环境变量
pub fn apply_overrides<F>(config: &mut OptimizerConfig, lookup: F) -> ConfigResult<()>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(value) = lookup(config_keys::KERF) {
        config.kerf = value
            .parse()
            .map_err(|e: crate::domain::length::LengthParseError| {
                bad_override(config_keys::KERF, &value, e.to_string())
            })?;
    }
    if let Some(value) = lookup(config_keys::STRATEGY) {
        config.strategy = value
            .parse()
            .map_err(|e: String| bad_override(config_keys::STRATEGY, &value, e))?;
    }
    if let Some(value) = lookup(config_keys::EXECUTION) {
        config.execution = value
            .parse()
            .map_err(|e: String| bad_override(config_keys::EXECUTION, &value, e))?;
    }
    if let Some(value) = lookup(config_keys::MAX_IN_FLIGHT) {
        let parsed = value
            .trim()
            .parse::<usize>()
            .map_err(|e| bad_override(config_keys::MAX_IN_FLIGHT, &value, e.to_string()))?;
        config.max_in_flight = Some(parsed);
    }
    if let Some(value) = lookup(config_keys::MATERIALS_PATH) {
        config.materials_path = PathBuf::from(value);
    }
    if let Some(value) = lookup(config_keys::PARTS_PATH) {
        config.parts_path = PathBuf::from(value);
    }
    if let Some(value) = lookup(config_keys::OUTPUT_PATH) {
        config.output_path = PathBuf::from(value);
    }
    Ok(())
}

fn bad_override(key: &str, value: &str, reason: String) -> ConfigError {
    ConfigError::InvalidOverride {
        key: key.to_string(),
        value: value.to_string(),
        reason,
    }
}
