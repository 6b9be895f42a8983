// ==========================================
// 一维下料优化 - 精确长度类型
// ==========================================
// 职责: 以定点整数表示十进制长度（单位: 英寸，精度 1e-6）
// 红线: 切割计算不使用浮点数，比较必须精确
// ==========================================

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub, SubAssign};
use std::str::FromStr;
use thiserror::Error;

/// 每个长度单位包含的最小刻度数
pub const SCALE: i64 = 1_000_000;

/// 小数部分最多保留的位数
const FRACTION_DIGITS: usize = 6;

/// 可接受的最大长度（整数单位）；在此范围内累加数千块板也不会溢出 i64
pub const MAX_UNITS: i64 = 1_000_000_000;

const MAX_MICROS: i64 = MAX_UNITS * SCALE;

// ==========================================
// 解析错误
// ==========================================
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LengthParseError {
    #[error("长度为空")]
    Empty,

    #[error("长度格式错误: {0}")]
    Invalid(String),

    #[error("长度精度超出 6 位小数: {0}")]
    TooPrecise(String),

    #[error("长度数值溢出: {0}")]
    Overflow(String),

    #[error("长度超出允许范围（绝对值不超过 1000000000）: {0}")]
    OutOfRange(String),
}

// ==========================================
// Length - 定点十进制长度
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Length(i64);

impl Length {
    pub const ZERO: Length = Length(0);

    /// 由最小刻度（百万分之一单位）构造
    pub const fn from_micros(micros: i64) -> Self {
        Length(micros)
    }

    /// 由整数单位构造
    pub const fn from_units(units: i64) -> Self {
        Length(units * SCALE)
    }

    /// 由浮点数构造（仅用于配置/表格单元格等外部输入，四舍五入到最小刻度）
    pub fn from_f64(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }
        let scaled = (value * SCALE as f64).round();
        if scaled.abs() > MAX_MICROS as f64 {
            return None;
        }
        Some(Length(scaled as i64))
    }

    pub const fn micros(self) -> i64 {
        self.0
    }

    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// n 倍长度（用于锯缝累计），溢出时饱和
    pub const fn times(self, n: usize) -> Self {
        let n = if n > i64::MAX as usize { i64::MAX } else { n as i64 };
        Length(self.0.saturating_mul(n))
    }
}

impl Add for Length {
    type Output = Length;

    fn add(self, rhs: Length) -> Length {
        Length(self.0 + rhs.0)
    }
}

impl AddAssign for Length {
    fn add_assign(&mut self, rhs: Length) {
        self.0 += rhs.0;
    }
}

impl Sub for Length {
    type Output = Length;

    fn sub(self, rhs: Length) -> Length {
        Length(self.0 - rhs.0)
    }
}

impl SubAssign for Length {
    fn sub_assign(&mut self, rhs: Length) {
        self.0 -= rhs.0;
    }
}

impl Sum for Length {
    fn sum<I: Iterator<Item = Length>>(iter: I) -> Length {
        iter.fold(Length::ZERO, |acc, x| acc + x)
    }
}

impl<'a> Sum<&'a Length> for Length {
    fn sum<I: Iterator<Item = &'a Length>>(iter: I) -> Length {
        iter.fold(Length::ZERO, |acc, x| acc + *x)
    }
}

// ==========================================
// 文本解析 / 格式化
// ==========================================

impl FromStr for Length {
    type Err = LengthParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        if text.is_empty() {
            return Err(LengthParseError::Empty);
        }

        let (negative, unsigned) = match text.as_bytes()[0] {
            b'-' => (true, &text[1..]),
            b'+' => (false, &text[1..]),
            _ => (false, text),
        };

        let (int_part, frac_part) = match unsigned.split_once('.') {
            Some((i, f)) => (i, f),
            None => (unsigned, ""),
        };

        let all_digits = |p: &str| p.bytes().all(|b| b.is_ascii_digit());
        if (int_part.is_empty() && frac_part.is_empty())
            || !all_digits(int_part)
            || !all_digits(frac_part)
        {
            return Err(LengthParseError::Invalid(text.to_string()));
        }

        // 超出精度的部分只允许是补零
        let (kept, dropped) = if frac_part.len() > FRACTION_DIGITS {
            frac_part.split_at(FRACTION_DIGITS)
        } else {
            (frac_part, "")
        };
        if dropped.bytes().any(|b| b != b'0') {
            return Err(LengthParseError::TooPrecise(text.to_string()));
        }

        let overflow = || LengthParseError::Overflow(text.to_string());

        let int_value: i64 = if int_part.is_empty() {
            0
        } else {
            int_part.parse().map_err(|_| overflow())?
        };
        let mut frac_value: i64 = if kept.is_empty() { 0 } else { kept.parse().map_err(|_| overflow())? };
        for _ in kept.len()..FRACTION_DIGITS {
            frac_value *= 10;
        }

        let magnitude = int_value
            .checked_mul(SCALE)
            .and_then(|v| v.checked_add(frac_value))
            .ok_or_else(overflow)?;
        if magnitude > MAX_MICROS {
            return Err(LengthParseError::OutOfRange(text.to_string()));
        }

        Ok(Length(if negative { -magnitude } else { magnitude }))
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let scale = SCALE as u64;
        let int_part = abs / scale;
        let frac_part = abs % scale;

        if frac_part == 0 {
            return write!(f, "{}{}", sign, int_part);
        }

        let frac = format!("{:0width$}", frac_part, width = FRACTION_DIGITS);
        write!(f, "{}{}.{}", sign, int_part, frac.trim_end_matches('0'))
    }
}

// ==========================================
// serde: 输出为字符串，输入接受字符串或数字
// ==========================================

impl Serialize for Length {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Length {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(f64),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Text(s) => s.parse().map_err(serde::de::Error::custom),
            Raw::Number(n) => Length::from_f64(n)
                .ok_or_else(|| serde::de::Error::custom(format!("无效长度: {}", n))),
        }
    }
}
