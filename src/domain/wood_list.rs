// ==========================================
// 一维下料优化 - 按规格分组的长度清单
// ==========================================
// 用途: 原料板清单 / 零件需求清单（数量已展开为重复元素）
// ==========================================

use crate::domain::length::Length;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WoodList {
    groups: BTreeMap<String, Vec<Length>>,
}

impl WoodList {
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加 `quantity` 个长度为 `length` 的条目
    pub fn add(&mut self, dimension: &str, length: Length, quantity: usize) {
        let group = self.groups.entry(dimension.to_string()).or_default();
        group.extend(std::iter::repeat(length).take(quantity));
    }

    /// 每个规格内部升序排列
    pub fn sort(&mut self) {
        for group in self.groups.values_mut() {
            group.sort_unstable();
        }
    }

    pub fn get(&self, dimension: &str) -> Option<&[Length]> {
        self.groups.get(dimension).map(Vec::as_slice)
    }

    /// 规格列表（字典序）
    pub fn dimensions(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Length])> {
        self.groups.iter().map(|(d, v)| (d.as_str(), v.as_slice()))
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn count(&self, dimension: &str) -> usize {
        self.groups.get(dimension).map_or(0, Vec::len)
    }
}
