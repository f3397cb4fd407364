// 進捗監視の具象実装

use crate::core::{PipelineStats, ProgressReporter};
use async_trait::async_trait;

/// コンソール出力による進捗報告実装
#[derive(Debug, Clone)]
pub struct ConsoleProgressReporter {
    quiet: bool,
    interval: usize,
}

impl Default for ConsoleProgressReporter {
    fn default() -> Self {
        Self {
            quiet: false,
            interval: 10,
        }
    }
}

impl ConsoleProgressReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn quiet() -> Self {
        Self {
            quiet: true,
            ..Self::default()
        }
    }

    /// 何件ごとに進捗を表示するか（0は1として扱う）
    pub fn with_interval(mut self, interval: usize) -> Self {
        self.interval = interval.max(1);
        self
    }

    fn should_print(&self, count: usize, total: usize) -> bool {
        !self.quiet && (count % self.interval == 0 || count == total)
    }
}

#[async_trait]
impl ProgressReporter for ConsoleProgressReporter {
    async fn report_started(&self, total_items: usize) {
        if !self.quiet {
            println!("🚀 Producer/Consumer starting: {total_items} items");
        }
    }

    async fn report_produced(&self, produced: usize, total: usize) {
        if self.should_print(produced, total) {
            println!("📦 Producer: {produced}/{total} produced");
        }
    }

    async fn report_consumed(&self, consumed: usize, total: usize) {
        if self.should_print(consumed, total) {
            let percentage = (consumed as f64 / total as f64) * 100.0;
            println!("📥 Consumer: {consumed}/{total} consumed ({percentage:.1}%)");
        }
    }

    async fn report_completed(&self, stats: &PipelineStats) {
        if !self.quiet {
            println!(
                "✅ Completed! Produced: {}, Consumed: {}",
                stats.items_produced, stats.items_consumed
            );
        }
    }
}

/// tracingイベントとして進捗を出力する実装
#[derive(Debug, Default, Clone)]
pub struct TracingProgressReporter;

impl TracingProgressReporter {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ProgressReporter for TracingProgressReporter {
    async fn report_started(&self, total_items: usize) {
        tracing::info!(total_items, "producer: starting production");
    }

    async fn report_produced(&self, produced: usize, total: usize) {
        tracing::debug!(produced, total, "producer: produced item");
    }

    async fn report_consumed(&self, consumed: usize, total: usize) {
        tracing::debug!(consumed, total, "consumer: consumed item");
    }

    async fn report_completed(&self, stats: &PipelineStats) {
        tracing::info!(
            items_produced = stats.items_produced,
            items_consumed = stats.items_consumed,
            source_remaining = stats.source_remaining,
            destination_size = stats.destination_size,
            "pipeline finished"
        );
    }
}

/// 何もしない進捗報告実装（テスト・ベンチマーク用）
#[derive(Debug, Default, Clone)]
pub struct NoOpProgressReporter;

impl NoOpProgressReporter {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ProgressReporter for NoOpProgressReporter {
    async fn report_started(&self, _total_items: usize) {
        // 何もしない
    }

    async fn report_produced(&self, _produced: usize, _total: usize) {
        // 何もしない
    }

    async fn report_consumed(&self, _consumed: usize, _total: usize) {
        // 何もしない
    }

    async fn report_completed(&self, _stats: &PipelineStats) {
        // 何もしない
    }
}
