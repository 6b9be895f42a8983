// ==========================================
// 一维下料优化 - 运行入口
// ==========================================
// 流程:
// 步骤1: 并行加载原料清单与零件清单
// 步骤2: 按配置的策略与调度方式搜索各规格最优方案
// 步骤3: 有结果时写出切割清单，返回运行汇总
// ==========================================

use crate::config::OptimizerConfig;
use crate::engine::CutListCalculator;
use crate::error::CutListResult;
use crate::importer::load_inputs;
use crate::perf::PerfGuard;
use crate::report::{write_csv, RunSummary};
use chrono::Utc;
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

/// 执行一次完整的下料优化
///
/// # 返回
/// - Ok(RunSummary): 运行汇总；`output_path` 为 None 表示没有任何规格得到方案
/// - Err: 配置、导入、搜索或输出失败
pub async fn run(config: &OptimizerConfig) -> CutListResult<RunSummary> {
    config.validate()?;

    let run_id = Uuid::new_v4();
    let span = info_span!("cut_list_run", run_id = %run_id, strategy = %config.strategy);
    run_inner(config, run_id).instrument(span).await
}

async fn run_inner(config: &OptimizerConfig, run_id: Uuid) -> CutListResult<RunSummary> {
    let started_at = Utc::now();
    let mut perf = PerfGuard::new("cut_list_run");

    // 步骤1: 加载输入
    let (materials, parts) =
        load_inputs(config.materials_path.clone(), config.parts_path.clone()).await?;
    info!(
        materials = %config.materials_path.display(),
        parts = %config.parts_path.display(),
        "输入加载完成"
    );

    // 步骤2: 搜索
    let calculator = CutListCalculator::from_config(config);
    let result = calculator.find_optimal(&materials, &parts).await?;
    perf.set_counter("candidates", result.candidates_considered);
    perf.set_counter("improvements", result.improvements);

    let mut summary = RunSummary::from_result(
        run_id,
        started_at,
        config.strategy,
        config.execution,
        config.kerf,
        &result,
    );

    // 步骤3: 输出
    match &result.cut_order {
        Some(order) => {
            write_csv(&config.output_path, order)?;
            summary.output_path = Some(config.output_path.display().to_string());
        }
        None => info!("没有任何规格得到切割方案，不写出文件"),
    }

    info!(
        dimensions = summary.dimensions.len(),
        unsolved = summary.unsolved.len(),
        total_waste = %summary.total_waste,
        elapsed_ms = summary.elapsed_ms(),
        "下料优化完成"
    );
    Ok(summary)
}
