// ==========================================
// 优化器集成测试
// ==========================================
// 测试目标: 文件加载 → 各调度方式搜索 → 输出，验证结果一致与各规格独立
// ==========================================

mod test_helpers;

use cut_list::config::OptimizerConfig;
use cut_list::engine::{
    CollectingSink, CutListCalculator, ExecutionMode, ExhaustiveStrategy, StrategyKind,
};
use cut_list::{load_inputs, logging, runner, CutListError, CutOrder, EngineError, Length};
use std::sync::Arc;
use test_helpers::{create_list_file, len, lens, temp_dir, write_list};

fn calculator(kerf: Length, mode: ExecutionMode) -> CutListCalculator {
    CutListCalculator::new(Arc::new(ExhaustiveStrategy::new(kerf)), mode, 3)
}

#[tokio::test]
async fn test_modes_agree_on_optimum_and_candidates() {
    logging::init_test();

    let materials = create_list_file(&[("2x4", "96", 1), ("2x4", "72", 2), ("1x6", "48", 2)]).unwrap();
    let parts = create_list_file(&[
        ("2x4", "40", 2),
        ("2x4", "30", 2),
        ("2x4", "24.5", 2),
        ("1x6", "23.875", 3),
    ])
    .unwrap();
    let (materials, parts) = load_inputs(materials.path(), parts.path()).await.unwrap();
    let kerf = len("0.125");

    let mut wastes = Vec::new();
    let mut candidate_sets = Vec::new();
    for mode in [ExecutionMode::Sequential, ExecutionMode::TaskPerOrdering, ExecutionMode::Bounded] {
        let calculator = calculator(kerf, mode);

        let result = calculator.find_optimal(&materials, &parts).await.unwrap();
        let order = result.cut_order.unwrap();
        assert!(order.fits(kerf));
        wastes.push((result.total_waste, order.canonical_layout()));

        let sink = Arc::new(CollectingSink::new());
        calculator.find_all(&materials, &parts, sink.clone()).await.unwrap();
        let mut layouts: Vec<_> = sink.drain().iter().map(CutOrder::canonical_layout).collect();
        layouts.sort();
        candidate_sets.push(layouts);
    }

    assert_eq!(wastes[0], wastes[1]);
    assert_eq!(wastes[0], wastes[2]);
    assert_eq!(candidate_sets[0], candidate_sets[1]);
    assert_eq!(candidate_sets[0], candidate_sets[2]);
}

#[tokio::test]
async fn test_dimensions_are_optimized_independently() {
    let materials = create_list_file(&[("2x4", "96", 2), ("1x6", "50", 1)]).unwrap();
    let parts = create_list_file(&[("2x4", "48", 3), ("1x6", "30", 1), ("1x6", "20", 1)]).unwrap();
    let (materials, parts) = load_inputs(materials.path(), parts.path()).await.unwrap();

    let result = calculator(Length::ZERO, ExecutionMode::Bounded)
        .find_optimal(&materials, &parts)
        .await
        .unwrap();

    assert_eq!(result.best.len(), 2);
    let (dimension, one_by_six) = &result.best[0];
    assert_eq!(dimension, "1x6");
    assert_eq!(one_by_six.waste, Length::ZERO);
    assert_eq!(one_by_six.order.boards()[0].cuts, lens(&[30, 20]));

    let (dimension, two_by_four) = &result.best[1];
    assert_eq!(dimension, "2x4");
    assert_eq!(two_by_four.waste, Length::from_units(48));
    assert_eq!(result.total_waste, Length::from_units(48));

    // 合并方案按规格顺序排列
    let merged = result.cut_order.unwrap();
    assert_eq!(merged.boards()[0].board.dimension, "1x6");
    assert_eq!(merged.cut_count(), 5);
}

#[tokio::test]
async fn test_dimension_without_stock_is_absent() {
    let materials = create_list_file(&[("2x4", "96", 1)]).unwrap();
    let parts = create_list_file(&[("2x4", "40", 2), ("2x6", "40", 1)]).unwrap();
    let (materials, parts) = load_inputs(materials.path(), parts.path()).await.unwrap();

    let result = calculator(Length::ZERO, ExecutionMode::TaskPerOrdering)
        .find_optimal(&materials, &parts)
        .await
        .unwrap();

    assert_eq!(result.unsolved, vec!["2x6".to_string()]);
    assert!(result.best.iter().all(|(d, _)| d == "2x4"));
    let order = result.cut_order.unwrap();
    assert!(order.iter().all(|b| b.board.dimension == "2x4"));
}

#[tokio::test]
async fn test_run_with_greedy_config() {
    let dir = temp_dir().unwrap();
    write_list(dir.path(), "materials.csv", &[("2x4", "96", 4)]).unwrap();
    write_list(dir.path(), "parts.csv", &[("2x4", "47.5", 3), ("2x4", "20", 2)]).unwrap();

    let config = OptimizerConfig {
        strategy: StrategyKind::Greedy,
        materials_path: dir.path().join("materials.csv"),
        parts_path: dir.path().join("parts.csv"),
        output_path: dir.path().join("out.csv"),
        ..Default::default()
    };
    let summary = runner::run(&config).await.unwrap();

    assert_eq!(summary.strategy, StrategyKind::Greedy);
    assert_eq!(summary.dimensions.len(), 1);
    assert_eq!(summary.dimensions[0].cuts, 5);
    let written = std::fs::read_to_string(dir.path().join("out.csv")).unwrap();
    assert!(written.starts_with("Dimension,Board #,Board length (in),Cut length (in)\r\n"));
    assert_eq!(written.lines().count(), 6);
}

#[tokio::test]
async fn test_run_greedy_out_of_stock_is_error() {
    let dir = temp_dir().unwrap();
    write_list(dir.path(), "materials.csv", &[("2x4", "96", 1)]).unwrap();
    write_list(dir.path(), "parts.csv", &[("2x4", "60", 2)]).unwrap();

    let config = OptimizerConfig {
        strategy: StrategyKind::Greedy,
        materials_path: dir.path().join("materials.csv"),
        parts_path: dir.path().join("parts.csv"),
        output_path: dir.path().join("out.csv"),
        ..Default::default()
    };
    let result = runner::run(&config).await;
    assert!(matches!(
        result,
        Err(CutListError::Engine(EngineError::InsufficientStock { .. }))
    ));
}

#[tokio::test]
async fn test_empty_materials_file_is_load_error() {
    let dir = temp_dir().unwrap();
    std::fs::write(dir.path().join("materials.csv"), "").unwrap();
    write_list(dir.path(), "parts.csv", &[("2x4", "48", 1)]).unwrap();

    let config = OptimizerConfig {
        materials_path: dir.path().join("materials.csv"),
        parts_path: dir.path().join("parts.csv"),
        output_path: dir.path().join("out.csv"),
        ..Default::default()
    };
    let result = runner::run(&config).await;
    assert!(matches!(result, Err(CutListError::Import(_))));
}
