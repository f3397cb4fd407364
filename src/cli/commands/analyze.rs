use crate::analysis::{render_report, ReportOptions, SalesAnalysis, SalesReport};
use anyhow::{Context, Result};
use std::path::PathBuf;

/// Configuration struct for analyze command
#[derive(Debug, Clone)]
pub struct AnalyzeConfig {
    pub csv_file: PathBuf,
    pub options: ReportOptions,
    pub json: bool,
}

/// 売上CSVを分析し、レポートを標準出力に表示する
pub async fn execute_analyze(config: AnalyzeConfig) -> Result<SalesReport> {
    if !config.csv_file.exists() {
        anyhow::bail!("CSV file does not exist: {}", config.csv_file.display());
    }

    let analysis = SalesAnalysis::from_path(&config.csv_file)?;
    let report = SalesReport::build(&analysis, &config.options);

    if config.json {
        let json =
            serde_json::to_string_pretty(&report).context("failed to serialize sales report")?;
        println!("{json}");
    } else {
        print!("{}", render_report(&analysis, &config.options));
    }

    Ok(report)
}
