use crate::core::{PipelineConfig, PipelineSummary};
use crate::engine::ProducerConsumerPipeline;
use crate::services::{ConsoleProgressReporter, DefaultPipelineConfig, NoOpProgressReporter};
use anyhow::{Context, Result};
use std::path::PathBuf;
use std::time::Duration;

/// Configuration struct for run command to reduce argument count
#[derive(Debug, Clone, Default)]
pub struct RunConfig {
    pub items: usize,
    pub capacity: Option<usize>,
    pub producer_delay_ms: Option<u64>,
    pub consumer_delay_ms: Option<u64>,
    pub config_file: Option<PathBuf>,
    pub quiet: bool,
    pub json: bool,
}

impl RunConfig {
    /// 設定ファイルを読み込み、コマンドライン引数で上書きする
    pub fn resolve_pipeline_config(&self) -> Result<DefaultPipelineConfig> {
        let mut config = match &self.config_file {
            Some(path) => DefaultPipelineConfig::from_json_file(path)?,
            None => DefaultPipelineConfig::default(),
        };

        if let Some(capacity) = self.capacity {
            config = config.with_capacity(capacity);
        }
        if let Some(delay) = self.producer_delay_ms {
            config = config.with_producer_delay(Duration::from_millis(delay));
        }
        if let Some(delay) = self.consumer_delay_ms {
            config = config.with_consumer_delay(Duration::from_millis(delay));
        }
        if self.quiet {
            config = config.with_progress_reporting(false);
        }

        config.validate()?;
        Ok(config)
    }
}

/// Run the demonstration pipeline over `0..items`
pub async fn execute_run(config: RunConfig) -> Result<PipelineSummary> {
    let pipeline_config = config.resolve_pipeline_config()?;
    let source: Vec<usize> = (0..config.items).collect();
    let expected = source.clone();

    let pipeline = ProducerConsumerPipeline::from_config(source, &pipeline_config)?;
    let mut pipeline = if pipeline_config.enable_progress_reporting() && !config.json {
        pipeline.with_reporter(ConsoleProgressReporter::new())
    } else {
        pipeline.with_reporter(NoOpProgressReporter::new())
    };

    if !config.json {
        println!("=== Producer-Consumer Pattern Demonstration ===");
        println!("   - Source data size: {}", config.items);
        println!("   - Queue max size: {}", pipeline.capacity());
        println!();
    }

    pipeline.start_with_config(&pipeline_config).await?;
    pipeline.wait_completion().await?;

    let summary = PipelineSummary {
        stats: pipeline.get_stats(),
        elapsed: pipeline.elapsed().unwrap_or_default(),
    };
    let destination = pipeline.into_destination();
    if destination != expected {
        anyhow::bail!(
            "destination does not match source order ({} of {} items)",
            destination.len(),
            expected.len()
        );
    }

    if config.json {
        let json = serde_json::to_string_pretty(&summary.stats)
            .context("failed to serialize pipeline stats")?;
        println!("{json}");
    } else {
        println!();
        println!("=== Summary ===");
        println!("Total items produced: {}", summary.stats.items_produced);
        println!("Total items consumed: {}", summary.stats.items_consumed);
        println!("Source container size: {}", summary.stats.source_remaining);
        println!("Destination container size: {}", summary.stats.destination_size);
        println!("Elapsed: {:.2}ms", summary.elapsed.as_secs_f64() * 1000.0);
        println!();
        println!("✓ All items successfully transferred!");
    }

    Ok(summary)
}
