// ==========================================
// 测试辅助函数
// ==========================================
// 职责: 提供测试所需的临时清单文件、长度构造等功能
// ==========================================
#![allow(dead_code)]

use cut_list::Length;
use std::error::Error;
use std::io::Write;
use std::path::Path;
use tempfile::{Builder, NamedTempFile, TempDir};

pub const HEADER: &str = "Dimension,Length,Quantity";

/// 创建临时 CSV 清单文件
///
/// # 参数
/// - rows: (规格, 长度, 数量)
///
/// # 返回
/// - NamedTempFile: 临时文件（需要保持存活）
pub fn create_list_file(rows: &[(&str, &str, u32)]) -> Result<NamedTempFile, Box<dyn Error>> {
    let mut temp_file = Builder::new().suffix(".csv").tempfile()?;
    writeln!(temp_file, "{}", HEADER)?;
    for (dimension, length, quantity) in rows {
        writeln!(temp_file, "{},{},{}", dimension, length, quantity)?;
    }
    temp_file.flush()?;
    Ok(temp_file)
}

/// 在目录中写入清单文件
pub fn write_list(dir: &Path, name: &str, rows: &[(&str, &str, u32)]) -> Result<(), Box<dyn Error>> {
    let mut content = format!("{}\n", HEADER);
    for (dimension, length, quantity) in rows {
        content.push_str(&format!("{},{},{}\n", dimension, length, quantity));
    }
    std::fs::write(dir.join(name), content)?;
    Ok(())
}

pub fn temp_dir() -> Result<TempDir, Box<dyn Error>> {
    Ok(tempfile::tempdir()?)
}

pub fn len(value: &str) -> Length {
    value.parse().unwrap()
}

pub fn lens(units: &[i64]) -> Vec<Length> {
    units.iter().map(|&u| Length::from_units(u)).collect()
}
