// ==========================================
// 一维下料优化 - 命令行入口
// ==========================================
// 输入: materials.csv / parts.csv（可由 cutlist.json 或 CUTLIST_* 环境变量覆写）
// 输出: out.csv；没有任何方案时只打印提示
// ==========================================

use anyhow::Context;
use cut_list::config::ConfigManager;
use cut_list::{logging, runner, APP_NAME, NO_RESULT_MESSAGE, VERSION};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 初始化日志系统
    logging::init();

    tracing::info!("{} v{}", APP_NAME, VERSION);

    let manager = ConfigManager::default();
    let config = manager
        .load_with_env()
        .with_context(|| format!("无法加载配置: {}", manager.path().display()))?;
    tracing::debug!(config = %ConfigManager::snapshot(&config)?, "生效配置");

    let summary = runner::run(&config).await?;

    match &summary.output_path {
        Some(path) => println!("cut list written to {}", path),
        None => println!("{}", NO_RESULT_MESSAGE),
    }
    for dimension in &summary.unsolved {
        println!("no cut order found for dimension {}", dimension);
    }
    tracing::debug!(summary = %summary.to_json()?, "运行汇总");

    Ok(())
}
