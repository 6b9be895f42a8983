// ==========================================
// 一维下料优化 - 零件多重集
// ==========================================
// 职责: 带总和缓存的有序长度集合，按值删除时尊重重复次数
// 用途: 既表示"尚需切割的零件"，也表示"正在构建的单板切割清单"
// ==========================================

use crate::domain::length::Length;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartMultiset {
    items: Vec<Length>,
    sum: Length,
}

impl PartMultiset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// 所有元素之和（O(1)）
    pub fn sum(&self) -> Length {
        self.sum
    }

    pub fn as_slice(&self) -> &[Length] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Length> {
        self.items.iter()
    }

    pub fn push(&mut self, length: Length) {
        self.sum += length;
        self.items.push(length);
    }

    /// 插入到最前面（递归回溯时把本层选择的长度放在子结果之前）
    pub fn push_front(&mut self, length: Length) {
        self.sum += length;
        self.items.insert(0, length);
    }

    /// 删除一个等于 `length` 的实例；不存在时返回 false
    pub fn remove_one(&mut self, length: Length) -> bool {
        match self.items.iter().position(|&x| x == length) {
            Some(idx) => {
                self.items.remove(idx);
                self.sum -= length;
                true
            }
            None => false,
        }
    }

    /// 依次删除 `lengths` 中的每个实例；全部删除成功才返回 true
    pub fn remove_all(&mut self, lengths: &[Length]) -> bool {
        let mut complete = true;
        for &length in lengths {
            complete &= self.remove_one(length);
        }
        complete
    }

    pub fn contains(&self, length: Length) -> bool {
        self.items.contains(&length)
    }

    pub fn count_of(&self, length: Length) -> usize {
        self.items.iter().filter(|&&x| x == length).count()
    }

    /// 按重复次数计的包含关系: `lengths` 中每个值出现的次数都不超过本集合
    pub fn contains_all(&self, lengths: &[Length]) -> bool {
        let have = self.counts();
        let mut need: BTreeMap<Length, usize> = BTreeMap::new();
        for &length in lengths {
            *need.entry(length).or_insert(0) += 1;
        }
        need.iter()
            .all(|(length, n)| have.get(length).copied().unwrap_or(0) >= *n)
    }

    /// 每个不同长度的出现次数（按长度升序）
    pub fn counts(&self) -> BTreeMap<Length, usize> {
        let mut counts = BTreeMap::new();
        for &length in &self.items {
            *counts.entry(length).or_insert(0) += 1;
        }
        counts
    }

    /// 不同长度，按降序
    pub fn distinct_descending(&self) -> Vec<Length> {
        self.counts().into_keys().rev().collect()
    }

    /// 降序排列的副本
    pub fn sorted_descending(&self) -> Vec<Length> {
        let mut sorted = self.items.clone();
        sorted.sort_unstable_by(|a, b| b.cmp(a));
        sorted
    }

    pub fn into_vec(self) -> Vec<Length> {
        self.items
    }
}

impl FromIterator<Length> for PartMultiset {
    fn from_iter<I: IntoIterator<Item = Length>>(iter: I) -> Self {
        let mut set = PartMultiset::new();
        for length in iter {
            set.push(length);
        }
        set
    }
}

impl From<Vec<Length>> for PartMultiset {
    fn from(items: Vec<Length>) -> Self {
        let sum = items.iter().sum();
        Self { items, sum }
    }
}

impl<'a> IntoIterator for &'a PartMultiset {
    type Item = &'a Length;
    type IntoIter = std::slice::Iter<'a, Length>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
