// ==========================================
// 一维下料优化 - 文件解析器实现
// ==========================================
// 支持: Excel (.xlsx/.xls) / CSV (.csv)
// 输出: 去掉表头后的原始数据行（按位置取列，不按表头名映射）
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use calamine::{open_workbook_auto, Reader};
use csv::ReaderBuilder;
use std::fs::File;
use std::path::Path;

/// 一行原始数据
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    /// 在源文件中的行号（表头为第 1 行）
    pub row: usize,
    pub fields: Vec<String>,
}

impl RawRow {
    pub fn field(&self, idx: usize) -> Option<&str> {
        self.fields.get(idx).map(String::as_str)
    }

    fn is_blank(&self) -> bool {
        self.fields.iter().all(|v| v.is_empty())
    }
}

// ==========================================
// FileParser - 文件解析接口
// ==========================================
pub trait FileParser {
    /// 解析文件为原始数据行
    ///
    /// # 返回
    /// - Ok(Vec<RawRow>): 数据行（已跳过表头和完全空白的行）
    /// - Err: 文件不存在、没有表头或读取失败
    fn parse_rows(&self, file_path: &Path) -> ImportResult<Vec<RawRow>>;
}

fn ensure_exists(path: &Path) -> ImportResult<()> {
    if !path.exists() {
        return Err(ImportError::FileNotFound(path.display().to_string()));
    }
    Ok(())
}

fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}

// ==========================================
// CSV Parser 实现
// ==========================================
pub struct CsvParser;

impl FileParser for CsvParser {
    fn parse_rows(&self, file_path: &Path) -> ImportResult<Vec<RawRow>> {
        let path = file_path;
        ensure_exists(path)?;

        let ext = extension_of(path);
        if ext != "csv" {
            return Err(ImportError::UnsupportedFormat(ext));
        }

        // 表头自行处理: 需要区分"空文件"与"只有表头"
        let file = File::open(path)?;
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true) // 允许行长度不一致
            .from_reader(file);

        let mut records = reader.records();
        match records.next() {
            Some(header) => {
                header?;
            }
            None => return Err(ImportError::EmptyFile(path.display().to_string())),
        }

        let mut rows = Vec::new();
        for (idx, result) in records.enumerate() {
            let record = result?;
            let row = record
                .position()
                .map(|p| p.line() as usize)
                .unwrap_or(idx + 2);
            let raw = RawRow {
                row,
                fields: record.iter().map(|v| v.trim().to_string()).collect(),
            };

            // 跳过完全空白的行
            if raw.is_blank() {
                continue;
            }
            rows.push(raw);
        }

        Ok(rows)
    }
}

// ==========================================
// Excel Parser 实现
// ==========================================
pub struct ExcelParser;

impl FileParser for ExcelParser {
    fn parse_rows(&self, file_path: &Path) -> ImportResult<Vec<RawRow>> {
        let path = file_path;
        ensure_exists(path)?;

        let ext = extension_of(path);
        if ext != "xlsx" && ext != "xls" {
            return Err(ImportError::UnsupportedFormat(ext));
        }

        let mut workbook = open_workbook_auto(path)?;

        // 读取第一个 sheet
        let sheet_name = workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| ImportError::ExcelParseError("Excel 文件无工作表".to_string()))?;
        let range = workbook.worksheet_range(&sheet_name)?;
        let first_row = range.start().map(|(r, _)| r as usize).unwrap_or(0);

        let mut sheet_rows = range.rows();
        if sheet_rows.next().is_none() {
            return Err(ImportError::EmptyFile(path.display().to_string()));
        }

        let mut rows = Vec::new();
        for (idx, data_row) in sheet_rows.enumerate() {
            let raw = RawRow {
                // 工作表行号从 1 开始，表头占一行
                row: first_row + idx + 2,
                fields: data_row
                    .iter()
                    .map(|cell| cell.to_string().trim().to_string())
                    .collect(),
            };

            // 跳过完全空白的行
            if raw.is_blank() {
                continue;
            }
            rows.push(raw);
        }

        Ok(rows)
    }
}

// ==========================================
// 通用文件解析器（根据扩展名自动选择）
// ==========================================
pub struct UniversalFileParser;

impl FileParser for UniversalFileParser {
    fn parse_rows(&self, file_path: &Path) -> ImportResult<Vec<RawRow>> {
        match extension_of(file_path).as_str() {
            "csv" => CsvParser.parse_rows(file_path),
            "xlsx" | "xls" => ExcelParser.parse_rows(file_path),
            other => {
                ensure_exists(file_path)?;
                Err(ImportError::UnsupportedFormat(other.to_string()))
            }
        }
    }
}
