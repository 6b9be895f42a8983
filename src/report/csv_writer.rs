// ==========================================
// 一维下料优化 - 切割清单 CSV 输出
// ==========================================
// 格式: 表头 `Dimension,Board #,Board length (in),Cut length (in)`
//       每个切割一行，板号在规格变化时从 1 重新计数，CRLF 换行
// ==========================================

use crate::domain::cut_order::CutOrder;
use crate::report::error::{ReportError, ReportResult};
use csv::{Terminator, WriterBuilder};
use std::io::Write;
use std::path::Path;
use tracing::info;

pub const HEADER: [&str; 4] = ["Dimension", "Board #", "Board length (in)", "Cut length (in)"];

/// 写出到任意 writer
pub fn write_cut_order<W: Write>(order: &CutOrder, out: W) -> ReportResult<()> {
    let mut writer = WriterBuilder::new()
        .terminator(Terminator::CRLF)
        .from_writer(out);
    writer.write_record(HEADER)?;

    let mut current_dimension: Option<&str> = None;
    let mut board_number = 0usize;
    for board in order {
        let dimension = board.board.dimension.as_str();
        if current_dimension != Some(dimension) {
            current_dimension = Some(dimension);
            board_number = 0;
        }
        board_number += 1;

        let number = board_number.to_string();
        let board_length = board.board.length.to_string();
        for cut in &board.cuts {
            let cut_length = cut.to_string();
            writer.write_record([dimension, number.as_str(), board_length.as_str(), cut_length.as_str()])?;
        }
    }

    writer.flush().map_err(|e| ReportError::Flush(e.to_string()))?;
    Ok(())
}

/// 渲染为字符串
pub fn render_csv(order: &CutOrder) -> ReportResult<String> {
    let mut buffer = Vec::new();
    write_cut_order(order, &mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}

/// 写出到文件（覆盖）
pub fn write_csv(path: impl AsRef<Path>, order: &CutOrder) -> ReportResult<()> {
    let path = path.as_ref();
    let file = std::fs::File::create(path).map_err(|source| ReportError::Write {
        path: path.display().to_string(),
        source,
    })?;
    write_cut_order(order, std::io::BufWriter::new(file))?;
    info!(path = %path.display(), boards = order.board_count(), cuts = order.cut_count(), "切割清单已写出");
    Ok(())
}
