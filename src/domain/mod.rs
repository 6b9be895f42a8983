// ==========================================
// 一维下料优化 - 领域模型层
// ==========================================
// 职责: 定义长度、原料板、零件多重集、切割方案等值类型
// 红线: 不含搜索逻辑，不含文件读写
// ==========================================

pub mod board;
pub mod cut_order;
pub mod length;
pub mod part_multiset;
pub mod part_pair;
pub mod wood_list;

// 重导出核心类型
pub use board::Board;
pub use cut_order::{BoardCuts, CutOrder};
pub use length::{Length, LengthParseError};
pub use part_multiset::PartMultiset;
pub use part_pair::PartPair;
pub use wood_list::WoodList;
