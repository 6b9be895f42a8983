// ==========================================
// 一维下料优化 - 零件对（贪心配对启发式使用）
// ==========================================

use crate::domain::length::Length;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PartPair {
    larger: Length,
    smaller: Length,
}

impl PartPair {
    /// 无序构造，两个参数顺序不影响结果
    pub fn new(a: Length, b: Length) -> Self {
        if a >= b {
            Self { larger: a, smaller: b }
        } else {
            Self { larger: b, smaller: a }
        }
    }

    pub fn larger(&self) -> Length {
        self.larger
    }

    pub fn smaller(&self) -> Length {
        self.smaller
    }

    pub fn sum(&self) -> Length {
        self.larger + self.smaller
    }

    pub fn spread(&self) -> Length {
        self.larger - self.smaller
    }

    /// 文本键 "larger,smaller"
    pub fn key(&self) -> String {
        format!("{},{}", self.larger, self.smaller)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair_is_unordered() {
        let a = PartPair::new(Length::from_units(15), Length::from_units(20));
        let b = PartPair::new(Length::from_units(20), Length::from_units(15));
        assert_eq!(a, b);
        assert_eq!(a.larger(), Length::from_units(20));
        assert_eq!(a.smaller(), Length::from_units(15));
        assert_eq!(a.sum(), Length::from_units(35));
        assert_eq!(a.spread(), Length::from_units(5));
        assert_eq!(a.key(), "20,15");
    }
}
