// パイプラインのトレイト定義
// 設定と進捗報告の抽象化インターフェース

use super::types::PipelineStats;
use async_trait::async_trait;
use mockall::automock;
use std::time::Duration;

/// パイプライン設定を抽象化するトレイト
#[automock]
pub trait PipelineConfig: Send + Sync {
    /// チャンネルの最大保持数
    fn channel_capacity(&self) -> usize;

    /// Producerのアイテム間待機時間
    fn producer_delay(&self) -> Duration;

    /// Consumerのアイテム間待機時間
    fn consumer_delay(&self) -> Duration;

    /// 進捗報告を有効にするかどうか
    fn enable_progress_reporting(&self) -> bool;
}

// PipelineConfig for Box<dyn PipelineConfig>
impl PipelineConfig for Box<dyn PipelineConfig> {
    fn channel_capacity(&self) -> usize {
        self.as_ref().channel_capacity()
    }

    fn producer_delay(&self) -> Duration {
        self.as_ref().producer_delay()
    }

    fn consumer_delay(&self) -> Duration {
        self.as_ref().consumer_delay()
    }

    fn enable_progress_reporting(&self) -> bool {
        self.as_ref().enable_progress_reporting()
    }
}

/// 進捗報告の抽象化トレイト
#[automock]
#[async_trait]
pub trait ProgressReporter: Send + Sync {
    /// 処理開始時の報告
    async fn report_started(&self, total_items: usize);

    /// Producerがアイテムを投入した時の報告
    async fn report_produced(&self, produced: usize, total: usize);

    /// Consumerがアイテムを受け取った時の報告
    async fn report_consumed(&self, consumed: usize, total: usize);

    /// 処理完了時の報告
    async fn report_completed(&self, stats: &PipelineStats);
}

// ProgressReporter for Box<dyn ProgressReporter>
#[async_trait]
impl ProgressReporter for Box<dyn ProgressReporter> {
    async fn report_started(&self, total_items: usize) {
        self.as_ref().report_started(total_items).await
    }

    async fn report_produced(&self, produced: usize, total: usize) {
        self.as_ref().report_produced(produced, total).await
    }

    async fn report_consumed(&self, consumed: usize, total: usize) {
        self.as_ref().report_consumed(consumed, total).await
    }

    async fn report_completed(&self, stats: &PipelineStats) {
        self.as_ref().report_completed(stats).await
    }
}
