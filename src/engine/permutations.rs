// ==========================================
// 一维下料优化 - 不重复全排列
// ==========================================
// 说明: 按字典序生成多重集的全排列，相同元素交换得到的排列只出现一次
// ==========================================

use std::iter::FusedIterator;

#[derive(Debug, Clone)]
pub struct DistinctPermutations<T> {
    current: Option<Vec<T>>,
}

impl<T: Ord + Clone> DistinctPermutations<T> {
    /// 从任意顺序的元素开始（内部先升序排列，保证覆盖全部排列）
    pub fn new(mut items: Vec<T>) -> Self {
        items.sort();
        Self {
            current: Some(items),
        }
    }
}

impl<T: Ord + Clone> Iterator for DistinctPermutations<T> {
    type Item = Vec<T>;

    fn next(&mut self) -> Option<Self::Item> {
        let items = self.current.as_mut()?;
        let output = items.clone();
        if !next_permutation(items) {
            self.current = None;
        }
        Some(output)
    }
}

impl<T: Ord + Clone> FusedIterator for DistinctPermutations<T> {}

/// 原地推进到字典序的下一个排列；已是最后一个排列时返回 false
fn next_permutation<T: Ord>(items: &mut [T]) -> bool {
    if items.len() < 2 {
        return false;
    }

    let mut i = items.len() - 1;
    while i > 0 && items[i - 1] >= items[i] {
        i -= 1;
    }
    if i == 0 {
        return false;
    }

    let mut j = items.len() - 1;
    while items[j] <= items[i - 1] {
        j -= 1;
    }
    items.swap(i - 1, j);
    items[i..].reverse();
    true
}
