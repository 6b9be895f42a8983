// ==========================================
// 一维下料优化 - 优化器配置
// ==========================================
// 默认值: 锯口 0.125，穷举策略，有界并发，materials.csv / parts.csv → out.csv
// ==========================================

use crate::config::error::{ConfigError, ConfigResult};
use crate::domain::length::Length;
use crate::engine::orchestrator::ExecutionMode;
use crate::engine::strategy::StrategyKind;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_MATERIALS_PATH: &str = "materials.csv";
pub const DEFAULT_PARTS_PATH: &str = "parts.csv";
pub const DEFAULT_OUTPUT_PATH: &str = "out.csv";

/// 默认锯口宽度（英寸）
pub fn default_kerf() -> Length {
    Length::from_micros(125_000)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizerConfig {
    /// 锯口宽度
    pub kerf: Length,
    /// 搜索策略
    pub strategy: StrategyKind,
    /// 调度方式
    pub execution: ExecutionMode,
    /// 有界调度的在途上限；None 表示取硬件并行度
    pub max_in_flight: Option<usize>,
    /// 穷举策略: 同长度前一块板切法复用
    pub reuse_previous_board: bool,
    pub materials_path: PathBuf,
    pub parts_path: PathBuf,
    pub output_path: PathBuf,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            kerf: default_kerf(),
            strategy: StrategyKind::default(),
            execution: ExecutionMode::default(),
            max_in_flight: None,
            reuse_previous_board: true,
            materials_path: PathBuf::from(DEFAULT_MATERIALS_PATH),
            parts_path: PathBuf::from(DEFAULT_PARTS_PATH),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
        }
    }
}

impl OptimizerConfig {
    /// 实际生效的在途上限
    pub fn effective_max_in_flight(&self) -> usize {
        self.max_in_flight.unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        })
    }

    /// 校验配置项
    pub fn validate(&self) -> ConfigResult<()> {
        if self.kerf.is_negative() {
            return Err(invalid("kerf", format!("锯口宽度不能为负: {}", self.kerf)));
        }
        if self.max_in_flight == Some(0) {
            return Err(invalid("max_in_flight", "在途上限必须大于 0"));
        }

        for (field, path) in [
            ("materials_path", &self.materials_path),
            ("parts_path", &self.parts_path),
            ("output_path", &self.output_path),
        ] {
            if path.as_os_str().is_empty() {
                return Err(invalid(field, "路径不能为空"));
            }
        }
        Ok(())
    }
}

fn invalid(field: &str, reason: impl Into<String>) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        reason: reason.into(),
    }
}
