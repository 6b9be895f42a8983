// ==========================================
// 一维下料优化 - 单板填充生成器
// ==========================================
// 职责: 给定板长与剩余零件，求所有"最大利用"的零件子集
// 规则: k 个零件占用 Σ零件 + (k - 1) × 锯缝
// ==========================================
// 去重: 不同长度按降序遍历，选择 L 的分支只继续使用 ≤ L 的长度，
//       每个多重集恰好对应一个非增序列，无需事后比较
// 剪枝: 子树只保留总长最大的候选；恰好填满的单件仅在锯缝为正时提前返回
// ==========================================

use crate::domain::length::Length;
use crate::domain::part_multiset::PartMultiset;

// ==========================================
// BoardFiller - 单板填充生成器
// ==========================================
#[derive(Debug, Clone, Copy)]
pub struct BoardFiller {
    kerf: Length,
}

impl BoardFiller {
    pub fn new(kerf: Length) -> Self {
        Self { kerf }
    }

    pub fn kerf(&self) -> Length {
        self.kerf
    }

    /// 求最大利用切割清单
    ///
    /// # 返回
    /// - 所有总长达到最大值的候选（并列全部保留），每个候选按长度降序
    /// - 空列表: 没有任何零件能放进这块板（调用方视为该板无贡献，不是错误）
    pub fn fill(&self, capacity: Length, parts: &PartMultiset) -> Vec<PartMultiset> {
        if !capacity.is_positive() {
            return Vec::new();
        }

        // 整板恰好等于某个零件: 只返回该单件
        if parts.contains(capacity) {
            return vec![PartMultiset::from(vec![capacity])];
        }

        let mut counts: Vec<(Length, usize)> = parts.counts().into_iter().rev().collect();
        self.fill_from(capacity, &mut counts, 0)
    }

    fn fill_from(
        &self,
        capacity: Length,
        counts: &mut [(Length, usize)],
        start: usize,
    ) -> Vec<PartMultiset> {
        if !capacity.is_positive() {
            return Vec::new();
        }

        // 锯缝为正时，子树内恰好填满的单件是唯一最大值（多件组合多占锯缝）；
        // 锯缝为 0 时多件组合可能与之并列，必须继续展开
        if self.kerf.is_positive() {
            if let Some(&(length, _)) = counts[start..]
                .iter()
                .find(|&&(length, n)| n > 0 && length == capacity)
            {
                return vec![PartMultiset::from(vec![length])];
            }
        }

        let mut candidates: Vec<PartMultiset> = Vec::new();
        for idx in start..counts.len() {
            let (length, available) = counts[idx];
            if available == 0 || length > capacity {
                continue;
            }

            counts[idx].1 -= 1;
            let children = self.fill_from(capacity - length - self.kerf, counts, idx);
            counts[idx].1 += 1;

            if children.is_empty() {
                candidates.push(PartMultiset::from(vec![length]));
                continue;
            }
            for mut child in children {
                child.push_front(length);
                candidates.push(child);
            }
        }

        if let Some(best) = candidates.iter().map(PartMultiset::sum).max() {
            candidates.retain(|c| c.sum() == best);
        }
        candidates
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn len(units: i64) -> Length {
        Length::from_units(units)
    }

    fn parts(units: &[i64]) -> PartMultiset {
        units.iter().map(|&u| len(u)).collect()
    }

    fn as_units(candidate: &PartMultiset) -> Vec<i64> {
        candidate.iter().map(|l| l.micros() / 1_000_000).collect()
    }

    #[test]
    fn test_two_parts_fill_board_exactly() {
        let filler = BoardFiller::new(Length::ZERO);
        let result = filler.fill(len(50), &parts(&[30, 20]));
        assert_eq!(result.len(), 1);
        assert_eq!(as_units(&result[0]), vec![30, 20]);
        assert_eq!(result[0].sum(), len(50));
    }

    #[test]
    fn test_three_halves_without_kerf() {
        let filler = BoardFiller::new(Length::ZERO);
        let result = filler.fill(len(96), &parts(&[48, 48, 48]));
        assert_eq!(result.len(), 1);
        assert_eq!(as_units(&result[0]), vec![48, 48]);
    }

    #[test]
    fn test_kerf_blocks_second_half() {
        let filler = BoardFiller::new("0.125".parse().unwrap());
        let result = filler.fill(len(96), &parts(&[48, 48, 48]));
        assert_eq!(result.len(), 1);
        assert_eq!(as_units(&result[0]), vec![48]);
    }

    #[test]
    fn test_exact_singleton_short_circuits() {
        let filler = BoardFiller::new(Length::ZERO);
        let result = filler.fill(len(10), &parts(&[6, 10, 4]));
        assert_eq!(result.len(), 1);
        assert_eq!(as_units(&result[0]), vec![10]);
    }

    #[test]
    fn test_exact_fit_inside_subtree_keeps_ties() {
        // 5 之后剩余 5: 单件 5 与 4 + 1 并列
        let filler = BoardFiller::new(Length::ZERO);
        let result = filler.fill(len(10), &parts(&[5, 5, 4, 1]));
        let layouts: BTreeSet<Vec<i64>> = result.iter().map(as_units).collect();
        assert_eq!(result.len(), layouts.len());
        assert_eq!(layouts, BTreeSet::from([vec![5, 5], vec![5, 4, 1]]));
    }

    #[test]
    fn test_exact_fit_inside_subtree_with_kerf() {
        // 5 + 锯缝 1 之后剩余 4: 单件 4 唯一最优，3 + 0.5 还需一道锯缝
        let filler = BoardFiller::new(len(1));
        let available: PartMultiset = vec![len(5), len(4), len(3), Length::from_micros(500_000)].into();
        let result = filler.fill(len(10), &available);
        assert_eq!(result.len(), 1);
        assert_eq!(as_units(&result[0]), vec![5, 4]);
    }

    #[test]
    fn test_ties_are_all_kept_once() {
        let filler = BoardFiller::new(Length::ZERO);
        let result = filler.fill(len(10), &parts(&[6, 4, 7, 3, 4]));
        let layouts: BTreeSet<Vec<i64>> = result.iter().map(as_units).collect();
        assert_eq!(result.len(), layouts.len(), "同一多重集不应重复出现");
        assert_eq!(layouts, BTreeSet::from([vec![7, 3], vec![6, 4]]));
    }

    #[test]
    fn test_nothing_fits() {
        let filler = BoardFiller::new(Length::ZERO);
        assert!(filler.fill(len(10), &parts(&[11, 12])).is_empty());
        assert!(filler.fill(Length::ZERO, &parts(&[1])).is_empty());
        assert!(filler.fill(len(10), &PartMultiset::new()).is_empty());
    }

    /// 暴力枚举所有可行子集，保留总长最大的多重集（降序表示）
    fn brute_force_candidates(capacity: Length, kerf: Length, items: &[Length]) -> BTreeSet<Vec<Length>> {
        // 整板恰好等于某个零件时只取该单件
        if items.contains(&capacity) {
            return BTreeSet::from([vec![capacity]]);
        }

        let n = items.len();
        let mut best: Option<Length> = None;
        let mut layouts = BTreeSet::new();
        for mask in 1u32..(1 << n) {
            let mut chosen: Vec<Length> = (0..n).filter(|i| mask & (1 << i) != 0).map(|i| items[i]).collect();
            let total: Length = chosen.iter().sum();
            if total + kerf.times(chosen.len() - 1) > capacity {
                continue;
            }
            if best.map_or(true, |b| total > b) {
                best = Some(total);
                layouts.clear();
            }
            if best == Some(total) {
                chosen.sort_by(|a, b| b.cmp(a));
                layouts.insert(chosen);
            }
        }
        layouts
    }

    fn check_against_brute_force(kerf: Length, mut seed: u64) {
        let filler = BoardFiller::new(kerf);
        let mut next = move || {
            seed ^= seed << 13;
            seed ^= seed >> 7;
            seed ^= seed << 17;
            seed
        };

        for _ in 0..60 {
            let n = (next() % 8 + 1) as usize;
            let items: Vec<Length> = (0..n)
                .map(|_| Length::from_micros(((next() % 40 + 5) as i64) * 500_000))
                .collect();
            let capacity = Length::from_units((next() % 60 + 10) as i64);
            let available = PartMultiset::from(items.clone());

            let result = filler.fill(capacity, &available);
            let layouts: BTreeSet<Vec<Length>> = result.iter().map(PartMultiset::sorted_descending).collect();

            assert_eq!(result.len(), layouts.len(), "同一多重集不应重复出现");
            assert_eq!(layouts, brute_force_candidates(capacity, kerf, &items), "capacity {} items {:?}", capacity, items);
            for candidate in &result {
                assert!(available.contains_all(candidate.as_slice()));
            }
        }
    }

    #[test]
    fn test_candidates_match_brute_force_with_kerf() {
        check_against_brute_force("0.125".parse().unwrap(), 0x2545_F491_4F6C_DD1D);
    }

    #[test]
    fn test_candidates_match_brute_force_without_kerf() {
        check_against_brute_force(Length::ZERO, 0x9E37_79B9_7F4A_7C15);
    }
}
