// ==========================================
// 一维下料优化 - 收尾配对启发式
// ==========================================
// 用途: 贪心策略在一块板上用最后两刀收尾，避免留下无法利用的短料
// 适用: 剩余零件至少 3 个
// ==========================================

use crate::domain::length::Length;
use crate::domain::part_pair::PartPair;

/// 求能放进剩余长度的最长零件对
///
/// # 参数
/// - `parts_descending`: 剩余零件，按长度降序
/// - `residual`: 当前板剩余长度（已扣除已有切割及其锯缝）
/// - `kerf`: 锯缝宽度
///
/// # 返回
/// - `None`: 零件少于 3 个；或最长的 3 个零件（各带一道锯缝）都放得下，普通贪心即可；
///   或任意两个零件都放不进 `residual - 2 × kerf`
/// - `Some(pair)`: 总长最大的零件对（并列时取降序扫描中最先出现的）
pub fn longest_pair(parts_descending: &[Length], residual: Length, kerf: Length) -> Option<PartPair> {
    if parts_descending.len() < 3 {
        return None;
    }

    let three_largest: Length = parts_descending[..3].iter().sum();
    if three_largest + kerf.times(3) <= residual {
        return None;
    }

    let limit = residual - kerf.times(2);
    let mut best: Option<PartPair> = None;

    for (i, &larger) in parts_descending.iter().enumerate() {
        let Some(&next) = parts_descending.get(i + 1) else {
            break;
        };
        // 以 i 开头的最大可能组合已经不超过当前最优
        if let Some(found) = best {
            if larger + next <= found.sum() {
                break;
            }
        }
        // 降序: 第一个满足条件的 j 即是以 i 开头的最大组合
        if let Some(&smaller) = parts_descending[i + 1..]
            .iter()
            .find(|&&smaller| larger + smaller <= limit)
        {
            let pair = PartPair::new(larger, smaller);
            if best.map_or(true, |b| pair.sum() > b.sum()) {
                best = Some(pair);
            }
        }
    }

    best
}
