// ==========================================
// 一维下料优化 - 报表层
// ==========================================
// 职责: 切割清单 CSV 输出与运行汇总
// ==========================================

pub mod csv_writer;
pub mod error;
pub mod summary;

pub use csv_writer::{render_csv, write_csv, write_cut_order};
pub use error::{ReportError, ReportResult};
pub use summary::{DimensionSummary, RunSummary};
