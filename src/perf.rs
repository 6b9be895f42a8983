use std::cell::Cell;
use std::time::{Duration, Instant};

thread_local! {
    static PERF_DEPTH: Cell<u32> = const { Cell::new(0) };
}

fn is_true(v: &str) -> bool {
    matches!(
        v.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "y" | "on"
    )
}

/// 是否输出性能日志
///
/// 开关：
/// - 默认开启
/// - `CUTLIST_PERF=0` 关闭
pub fn perf_enabled() -> bool {
    match std::env::var("CUTLIST_PERF") {
        Ok(v) => is_true(&v),
        Err(_) => true,
    }
}

/// 性能统计 Guard：记录 elapsed_ms + 嵌套深度 + 自定义计数
///
/// 使用方式：
/// ```ignore
/// let mut perf = cut_list::perf::PerfGuard::new("find_optimal");
/// // do work...
/// perf.set_counter("candidates", 42);
/// ```
pub struct PerfGuard {
    op: &'static str,
    start: Instant,
    depth: u32,
    counters: Vec<(&'static str, u64)>,
}

impl PerfGuard {
    pub fn new(op: &'static str) -> Self {
        let depth = PERF_DEPTH.with(|d| {
            let next = d.get().saturating_add(1);
            d.set(next);
            next
        });
        Self {
            op,
            start: Instant::now(),
            depth,
            counters: Vec::new(),
        }
    }

    /// 设置计数（同名覆盖）
    pub fn set_counter(&mut self, name: &'static str, value: u64) {
        match self.counters.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.counters.push((name, value)),
        }
    }

    pub fn counter(&self, name: &str) -> Option<u64> {
        self.counters.iter().find(|(n, _)| *n == name).map(|(_, v)| *v)
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

impl Drop for PerfGuard {
    fn drop(&mut self) {
        if perf_enabled() {
            let elapsed_ms = self.start.elapsed().as_millis() as u64;
            let counters = self
                .counters
                .iter()
                .map(|(n, v)| format!("{}={}", n, v))
                .collect::<Vec<_>>()
                .join(" ");

            tracing::info!(
                target: "perf",
                op = self.op,
                elapsed_ms,
                depth = self.depth,
                counters = %counters,
                "done"
            );
        }

        PERF_DEPTH.with(|d| d.set(d.get().saturating_sub(1)));
    }
}
