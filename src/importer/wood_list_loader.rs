// ==========================================
// 一维下料优化 - 长度清单加载器
// ==========================================
// 格式: 表头 + `规格,长度,数量`（长度为十进制，数量为非负整数）
// 规则: 不足 3 列的行跳过；数量展开为重复条目；每个规格升序排列
// ==========================================

use crate::domain::length::Length;
use crate::domain::wood_list::WoodList;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::file_parser::{FileParser, RawRow, UniversalFileParser};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

const FIELD_LENGTH: &str = "length";
const FIELD_QUANTITY: &str = "quantity";

pub struct WoodListLoader<P: FileParser = UniversalFileParser> {
    parser: P,
}

impl WoodListLoader {
    /// 按扩展名选择解析器
    pub fn new() -> Self {
        Self {
            parser: UniversalFileParser,
        }
    }
}

impl Default for WoodListLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: FileParser> WoodListLoader<P> {
    pub fn with_parser(parser: P) -> Self {
        Self { parser }
    }

    /// 加载一个清单文件
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn load(&self, path: impl AsRef<Path>) -> ImportResult<WoodList> {
        let path = path.as_ref();
        let rows = self.parser.parse_rows(path)?;
        let display = path.display().to_string();

        let mut list = WoodList::new();
        let mut skipped = 0usize;
        for raw in &rows {
            match parse_row(&display, raw)? {
                Some((dimension, length, quantity)) => list.add(dimension, length, quantity),
                None => skipped += 1,
            }
        }
        list.sort();

        if skipped > 0 {
            debug!(skipped, "跳过列数不足的行");
        }
        info!(
            rows = rows.len(),
            dimensions = list.dimensions().count(),
            "清单加载完成"
        );
        Ok(list)
    }
}

/// 解析一行；列数不足时返回 None
fn parse_row<'a>(path: &str, raw: &'a RawRow) -> ImportResult<Option<(&'a str, Length, usize)>> {
    let (Some(dimension), Some(length), Some(quantity)) = (raw.field(0), raw.field(1), raw.field(2))
    else {
        return Ok(None);
    };

    if dimension.is_empty() {
        return Err(ImportError::FieldMappingError {
            path: path.to_string(),
            row: raw.row,
            message: "规格为空".to_string(),
        });
    }

    let length: Length = length.parse().map_err(|e: crate::domain::length::LengthParseError| {
        ImportError::TypeConversionError {
            path: path.to_string(),
            row: raw.row,
            field: FIELD_LENGTH.to_string(),
            message: e.to_string(),
        }
    })?;
    if !length.is_positive() {
        return Err(ImportError::ValueRangeError {
            path: path.to_string(),
            row: raw.row,
            field: FIELD_LENGTH.to_string(),
            value: length.to_string(),
            message: "必须大于 0".to_string(),
        });
    }

    let quantity: usize = quantity.parse().map_err(|_| ImportError::TypeConversionError {
        path: path.to_string(),
        row: raw.row,
        field: FIELD_QUANTITY.to_string(),
        message: format!("数量必须为非负整数，实际 {:?}", quantity),
    })?;

    debug!(row = raw.row, dimension, %length, quantity, "解析清单行");
    Ok(Some((dimension, length, quantity)))
}

/// 并行加载原料清单与零件清单
///
/// # 返回
/// - Ok((materials, parts))
/// - Err: 任一文件加载失败
pub async fn load_inputs(
    materials_path: impl Into<PathBuf>,
    parts_path: impl Into<PathBuf>,
) -> ImportResult<(WoodList, WoodList)> {
    let materials_path = materials_path.into();
    let parts_path = parts_path.into();

    let materials = tokio::task::spawn_blocking(move || WoodListLoader::new().load(materials_path));
    let parts = tokio::task::spawn_blocking(move || WoodListLoader::new().load(parts_path));
    let (materials, parts) = tokio::try_join!(materials, parts)?;
    Ok((materials?, parts?))
}
