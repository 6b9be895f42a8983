// ==========================================
// 一维下料优化 - 最优方案跟踪器
// ==========================================
// 职责: 接收所有并发分支产出的完整方案，按规格保留余料最少者
// 并发: 单把互斥锁保护整张 规格 → 最优 映射，读-比较-写在一个临界区内完成
// ==========================================

use crate::domain::cut_order::CutOrder;
use crate::domain::length::Length;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::debug;

// ==========================================
// CandidateSink - 候选方案接收端
// ==========================================
/// 搜索策略把每个完整方案交给接收端；接收端必须可被多个任务同时调用
pub trait CandidateSink: Send + Sync {
    fn accept(&self, candidate: CutOrder);
}

impl<S: CandidateSink + ?Sized> CandidateSink for Arc<S> {
    fn accept(&self, candidate: CutOrder) {
        (**self).accept(candidate)
    }
}

impl<S: CandidateSink + ?Sized> CandidateSink for &S {
    fn accept(&self, candidate: CutOrder) {
        (**self).accept(candidate)
    }
}

// ==========================================
// DimensionBest - 单规格当前最优
// ==========================================
#[derive(Debug, Clone)]
pub struct DimensionBest {
    pub order: CutOrder,
    pub waste: Length,
}

impl DimensionBest {
    /// 候选是否严格优于当前最优
    ///
    /// 比较键: (余料, 用板数, 规范布局)，保证结果与到达顺序无关
    fn is_beaten_by(&self, candidate: &CutOrder, candidate_waste: Length) -> bool {
        let current = (self.waste, self.order.board_count());
        let challenger = (candidate_waste, candidate.board_count());
        if challenger != current {
            return challenger < current;
        }
        candidate.canonical_layout() < self.order.canonical_layout()
    }
}

// ==========================================
// OptimumTracker - 最优方案跟踪器
// ==========================================
#[derive(Debug, Default)]
pub struct OptimumTracker {
    best: Mutex<BTreeMap<String, DimensionBest>>,
    considered: AtomicU64,
    improvements: AtomicU64,
}

impl OptimumTracker {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<String, DimensionBest>> {
        // 临界区内没有可能中途 panic 的写操作，中毒后数据仍一致
        self.best.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// 评估一个完整方案；成为新的最优时返回 true
    pub fn consider(&self, candidate: CutOrder) -> bool {
        let Some(dimension) = candidate.dimension().map(str::to_string) else {
            return false;
        };
        self.considered.fetch_add(1, Ordering::Relaxed);
        let waste = candidate.waste();

        let mut best = self.lock();
        let replace = match best.get(&dimension) {
            None => true,
            Some(current) => current.is_beaten_by(&candidate, waste),
        };
        if replace {
            debug!(dimension = %dimension, waste = %waste, boards = candidate.board_count(), "发现更优方案");
            best.insert(dimension, DimensionBest { order: candidate, waste });
            self.improvements.fetch_add(1, Ordering::Relaxed);
        }
        replace
    }

    pub fn best_for(&self, dimension: &str) -> Option<DimensionBest> {
        self.lock().get(dimension).cloned()
    }

    /// 已有结果的规格（字典序）
    pub fn dimensions(&self) -> Vec<String> {
        self.lock().keys().cloned().collect()
    }

    pub fn total_waste(&self) -> Length {
        self.lock().values().map(|b| b.waste).sum()
    }

    pub fn considered(&self) -> u64 {
        self.considered.load(Ordering::Relaxed)
    }

    pub fn improvements(&self) -> u64 {
        self.improvements.load(Ordering::Relaxed)
    }

    /// 各规格最优方案（字典序）
    pub fn snapshot(&self) -> Vec<(String, DimensionBest)> {
        self.lock()
            .iter()
            .map(|(d, b)| (d.clone(), b.clone()))
            .collect()
    }

    /// 按规格顺序合并为一个总方案；没有任何结果时返回 None
    pub fn merged(&self) -> Option<CutOrder> {
        let best = self.lock();
        if best.is_empty() {
            return None;
        }
        let mut merged = CutOrder::new();
        for entry in best.values() {
            merged.extend(entry.order.clone());
        }
        Some(merged)
    }
}

impl CandidateSink for OptimumTracker {
    fn accept(&self, candidate: CutOrder) {
        self.consider(candidate);
    }
}

// ==========================================
// CollectingSink - 收集全部候选（用于比较不同调度下的结果集）
// ==========================================
#[derive(Debug, Default)]
pub struct CollectingSink {
    items: Mutex<Vec<CutOrder>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.lock().map(|items| items.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn into_inner(self) -> Vec<CutOrder> {
        self.items
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// 取出并清空已收集的候选
    pub fn drain(&self) -> Vec<CutOrder> {
        let mut items = self.items.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        std::mem::take(&mut *items)
    }
}

impl CandidateSink for CollectingSink {
    fn accept(&self, candidate: CutOrder) {
        self.items
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(candidate);
    }
}
