// ==========================================
// 一维下料优化 - 导入层
// ==========================================
// 职责: 读取原料/零件清单文件，生成按规格分组的长度清单
// 支持: CSV, Excel
// ==========================================

// 模块声明
pub mod error;
pub mod file_parser;
pub mod wood_list_loader;

// 重导出核心类型
pub use error::{ImportError, ImportResult};
pub use file_parser::{CsvParser, ExcelParser, FileParser, RawRow, UniversalFileParser};
pub use wood_list_loader::{load_inputs, WoodListLoader};
