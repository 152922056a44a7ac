use anyhow::Result;
use question_paper::models::load_all_toml_files;
use question_paper::orchestrator::{App, ImportStats, NoticeLevel};
use question_paper::utils::logging;
use question_paper::{Config, PdfExporter, PrintExporter};
use tracing::warn;

#[tokio::main]
async fn main() -> Result<()> {
    // 加载配置：优先使用 PAPER_CONFIG 指定的文件
    let config = match std::env::var("PAPER_CONFIG") {
        Ok(path) => Config::from_file(&path)?,
        Err(_) => Config::from_env(),
    };

    // 初始化日志
    logging::init(config.verbose_logging);
    logging::log_startup(&config.question_folder, &config.output_dir);

    let mut app = App::new(&config);

    // 导入题目集
    let sets = load_all_toml_files(&config.question_folder).await?;
    let mut totals = ImportStats::default();
    for set in &sets {
        let stats = app.import_question_set(set);
        totals.imported += stats.imported;
        totals.skipped += stats.skipped;
        totals.selected += stats.selected;
    }

    if app.selection().is_empty() {
        warn!("⚠️ 没有设置分值的题目，不生成试卷");
        logging::print_final_stats(totals.imported, totals.skipped, 0, 0);
        return Ok(());
    }

    app.create_paper()?;

    // 导出
    app.export_paper(&PrintExporter::new(&config.output_dir)).await;
    if config.export_pdf {
        let exporter = PdfExporter::new(&config.output_dir, config.chrome_executable.clone());
        app.export_paper(&exporter).await;
    }

    let failed = app
        .drain_notices()
        .iter()
        .filter(|n| n.level == NoticeLevel::Error)
        .count();
    if failed > 0 {
        warn!("⚠️ {} 项导出失败，详见上方日志", failed);
    }

    logging::print_final_stats(
        totals.imported,
        totals.skipped,
        app.selection().len(),
        app.selection().total_marks(),
    );

    Ok(())
}
