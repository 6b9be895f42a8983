// ==========================================
// 一维下料优化 - 原料板
// ==========================================

use crate::domain::length::Length;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 原料板（值类型）
///
/// 规格与长度相同的两块板可互换；同一块板在切割方案中的每次使用
/// 都是一个独立实例，由 `CutOrder` 中的位置区分。
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Board {
    /// 规格（截面），只在同规格内配对
    pub dimension: String,
    /// 板长
    pub length: Length,
}

impl Board {
    pub fn new(dimension: impl Into<String>, length: Length) -> Self {
        Self {
            dimension: dimension.into(),
            length,
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} @ {}", self.dimension, self.length)
    }
}
