// Pipeline - Producer-Consumer パイプライン
// ライフサイクル管理とオーケストレーション

use super::{
    channel::BoundedChannel, consumer::spawn_consumer, producer::spawn_producer,
    state::SharedState,
};
use crate::core::{
    ChannelMessage, PipelineConfig, PipelineError, PipelineResult, PipelineStats,
    PipelineStatus, PipelineSummary, ProgressReporter,
};
use crate::services::NoOpProgressReporter;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;

/// チャンネル容量のデフォルト値
pub const DEFAULT_CAPACITY: NonZeroUsize = match NonZeroUsize::new(10) {
    Some(capacity) => capacity,
    None => unreachable!(),
};

struct RunningTasks {
    producer: JoinHandle<PipelineResult<()>>,
    consumer: JoinHandle<PipelineResult<()>>,
    started_at: Instant,
}

/// ライフサイクル状態
///
/// `Joining` は `wait_completion` がタスクを待機している間の状態で、外部からは Running に見える。
/// 待機中のFutureが破棄された場合もここに留まり、再開や再待機はできない。
enum Lifecycle {
    Idle,
    Running(RunningTasks),
    Joining,
    Completed { elapsed: Duration },
}

impl Lifecycle {
    fn status(&self) -> PipelineStatus {
        match self {
            Self::Idle => PipelineStatus::Idle,
            Self::Running(_) | Self::Joining => PipelineStatus::Running,
            Self::Completed { .. } => PipelineStatus::Completed,
        }
    }
}

/// 単一Producer・単一Consumerのパイプライン
///
/// 1回の実行ごとにチャンネルを1つ所有する。`start` → `wait_completion` の順で
/// 一度だけ実行でき、`Completed` 後の再実行はできない。
pub struct ProducerConsumerPipeline<T> {
    state: Arc<SharedState<T>>,
    channel: Arc<BoundedChannel<ChannelMessage<T>>>,
    reporter: Arc<dyn ProgressReporter>,
    lifecycle: Lifecycle,
}

impl<T> ProducerConsumerPipeline<T>
where
    T: Send + 'static,
{
    /// 新しいパイプラインを作成（容量0は設定エラー）
    pub fn new(source: Vec<T>, capacity: usize) -> PipelineResult<Self> {
        let channel = BoundedChannel::new(capacity)?;
        Ok(Self {
            state: Arc::new(SharedState::new(source)),
            channel: Arc::new(channel),
            reporter: Arc::new(NoOpProgressReporter::new()),
            lifecycle: Lifecycle::Idle,
        })
    }

    /// デフォルト容量（10）でパイプラインを作成
    pub fn with_default_capacity(source: Vec<T>) -> Self {
        Self {
            state: Arc::new(SharedState::new(source)),
            channel: Arc::new(BoundedChannel::with_capacity(DEFAULT_CAPACITY)),
            reporter: Arc::new(NoOpProgressReporter::new()),
            lifecycle: Lifecycle::Idle,
        }
    }

    /// 設定から容量を読み取ってパイプラインを作成
    pub fn from_config<C>(source: Vec<T>, config: &C) -> PipelineResult<Self>
    where
        C: PipelineConfig + ?Sized,
    {
        Self::new(source, config.channel_capacity())
    }

    /// 進捗報告先を差し替える
    pub fn with_reporter<R>(mut self, reporter: R) -> Self
    where
        R: ProgressReporter + 'static,
    {
        self.reporter = Arc::new(reporter);
        self
    }

    pub fn status(&self) -> PipelineStatus {
        self.lifecycle.status()
    }

    pub fn capacity(&self) -> usize {
        self.channel.capacity()
    }

    /// チャンネル保持数のスナップショット
    pub fn channel_size(&self) -> usize {
        self.channel.size()
    }

    /// 完了までの所要時間（Completed 以外では None）
    pub fn elapsed(&self) -> Option<Duration> {
        match self.lifecycle {
            Lifecycle::Completed { elapsed } => Some(elapsed),
            _ => None,
        }
    }

    /// 実行中でも使える監視用ハンドル
    pub fn monitor(&self) -> PipelineMonitor<T> {
        PipelineMonitor {
            state: Arc::clone(&self.state),
            channel: Arc::clone(&self.channel),
        }
    }

    /// ProducerとConsumerを起動（Idle → Running）
    pub async fn start(
        &mut self,
        producer_delay: Duration,
        consumer_delay: Duration,
    ) -> PipelineResult<()> {
        if !matches!(self.lifecycle, Lifecycle::Idle) {
            return Err(PipelineError::invalid_state(self.status(), "start"));
        }

        let total_items = self.state.total_items();
        tracing::info!(
            total_items,
            capacity = self.channel.capacity(),
            "starting producer-consumer pipeline"
        );
        self.reporter.report_started(total_items).await;

        let producer = spawn_producer(
            Arc::clone(&self.state),
            Arc::clone(&self.channel),
            Arc::clone(&self.reporter),
            producer_delay,
        );
        let consumer = spawn_consumer(
            Arc::clone(&self.state),
            Arc::clone(&self.channel),
            Arc::clone(&self.reporter),
            consumer_delay,
        );

        self.lifecycle = Lifecycle::Running(RunningTasks {
            producer,
            consumer,
            started_at: Instant::now(),
        });
        Ok(())
    }

    /// 設定の待機時間で起動
    pub async fn start_with_config<C>(&mut self, config: &C) -> PipelineResult<()>
    where
        C: PipelineConfig + ?Sized,
    {
        self.start(config.producer_delay(), config.consumer_delay())
            .await
    }

    /// ProducerとConsumerの両方の終了を待機（Running → Completed）
    pub async fn wait_completion(&mut self) -> PipelineResult<()> {
        let tasks = match std::mem::replace(&mut self.lifecycle, Lifecycle::Joining) {
            Lifecycle::Running(tasks) => tasks,
            other => {
                let status = other.status();
                self.lifecycle = other;
                return Err(PipelineError::invalid_state(status, "wait_completion"));
            }
        };

        let RunningTasks {
            mut producer,
            mut consumer,
            started_at,
        } = tasks;

        // 片方が失敗すると相手はチャンネルで待ち続けるため、もう片方を中断する
        let outcome = tokio::select! {
            result = &mut producer => {
                let first = join_outcome(result);
                if first.is_err() {
                    consumer.abort();
                }
                first.and(join_outcome(consumer.await))
            }
            result = &mut consumer => {
                let first = join_outcome(result);
                if first.is_err() {
                    producer.abort();
                }
                first.and(join_outcome(producer.await))
            }
        };
        let elapsed = started_at.elapsed();
        self.lifecycle = Lifecycle::Completed { elapsed };

        if let Err(error) = outcome {
            tracing::error!(%error, "pipeline task failed");
            return Err(error);
        }

        let stats = self.get_stats();
        tracing::info!(
            items_produced = stats.items_produced,
            items_consumed = stats.items_consumed,
            elapsed_us = u64::try_from(elapsed.as_micros()).unwrap_or(u64::MAX),
            "pipeline completed"
        );
        self.reporter.report_completed(&stats).await;
        Ok(())
    }

    /// 起動から完了までを一括実行
    pub async fn run_to_completion(
        &mut self,
        producer_delay: Duration,
        consumer_delay: Duration,
    ) -> PipelineResult<PipelineSummary> {
        self.start(producer_delay, consumer_delay).await?;
        self.wait_completion().await?;

        Ok(PipelineSummary {
            stats: self.get_stats(),
            elapsed: self.elapsed().unwrap_or_default(),
        })
    }

    /// 進捗スナップショット（Running 中は参考値、Completed 後は確定値）
    pub fn get_stats(&self) -> PipelineStats {
        self.state.stats()
    }

    /// 受信済みアイテムのコピー
    pub fn destination(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.state.destination_snapshot()
    }

    /// 受信済みアイテムを取り出してパイプラインを破棄
    pub fn into_destination(self) -> Vec<T> {
        self.state.take_destination()
    }
}

fn join_outcome(
    result: Result<PipelineResult<()>, tokio::task::JoinError>,
) -> PipelineResult<()> {
    result.map_err(PipelineError::from).and_then(|outcome| outcome)
}

/// 実行中のパイプラインを別タスクから観測するためのハンドル
pub struct PipelineMonitor<T> {
    state: Arc<SharedState<T>>,
    channel: Arc<BoundedChannel<ChannelMessage<T>>>,
}

impl<T> Clone for PipelineMonitor<T> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            channel: Arc::clone(&self.channel),
        }
    }
}

impl<T: Send> PipelineMonitor<T> {
    pub fn stats(&self) -> PipelineStats {
        self.state.stats()
    }

    pub fn channel_size(&self) -> usize {
        self.channel.size()
    }

    pub fn channel_capacity(&self) -> usize {
        self.channel.capacity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::traits::MockProgressReporter;
    use crate::services::DefaultPipelineConfig;
    use mockall::predicate::*;

    #[test]
    fn test_pipeline_creation() {
        let pipeline = ProducerConsumerPipeline::new(vec![1, 2, 3], 2).unwrap();

        assert_eq!(pipeline.status(), PipelineStatus::Idle);
        assert_eq!(pipeline.capacity(), 2);
        assert_eq!(pipeline.channel_size(), 0);
        assert_eq!(pipeline.elapsed(), None);
        assert_eq!(
            pipeline.get_stats(),
            PipelineStats {
                items_produced: 0,
                items_consumed: 0,
                source_remaining: 3,
                destination_size: 0,
            }
        );
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let result = ProducerConsumerPipeline::new(vec![1], 0);
        assert!(matches!(
            result,
            Err(PipelineError::ConfigurationError { .. })
        ));
    }

    #[test]
    fn test_default_capacity() {
        let pipeline = ProducerConsumerPipeline::with_default_capacity(vec!['a']);
        assert_eq!(pipeline.capacity(), DEFAULT_CAPACITY.get());
        assert_eq!(pipeline.capacity(), 10);
    }

    #[tokio::test]
    async fn test_pipeline_transfers_in_order() {
        let source: Vec<u32> = (0..20).collect();
        let mut pipeline = ProducerConsumerPipeline::new(source.clone(), 10).unwrap();

        pipeline.start(Duration::ZERO, Duration::ZERO).await.unwrap();
        assert_eq!(pipeline.status(), PipelineStatus::Running);
        pipeline.wait_completion().await.unwrap();

        assert_eq!(pipeline.status(), PipelineStatus::Completed);
        assert!(pipeline.elapsed().is_some());
        let stats = pipeline.get_stats();
        assert_eq!(stats.items_produced, 20);
        assert_eq!(stats.items_consumed, 20);
        assert_eq!(stats.source_remaining, 0);
        assert_eq!(stats.destination_size, 20);
        assert_eq!(pipeline.into_destination(), source);
    }

    #[tokio::test]
    async fn test_pipeline_empty_source() {
        let mut pipeline = ProducerConsumerPipeline::new(Vec::<String>::new(), 3).unwrap();

        let summary = pipeline
            .run_to_completion(Duration::ZERO, Duration::ZERO)
            .await
            .unwrap();

        assert_eq!(summary.stats, PipelineStats::default());
        assert!(pipeline.destination().is_empty());
        assert_eq!(pipeline.channel_size(), 0);
    }

    #[tokio::test]
    async fn test_wait_before_start_is_rejected() {
        let mut pipeline = ProducerConsumerPipeline::new(vec![1], 1).unwrap();

        let error = pipeline.wait_completion().await.unwrap_err();
        assert!(matches!(
            error,
            PipelineError::InvalidStateError {
                from: PipelineStatus::Idle,
                operation: "wait_completion"
            }
        ));
        // 状態は変わらない
        assert_eq!(pipeline.status(), PipelineStatus::Idle);
    }

    #[tokio::test]
    async fn test_restart_is_rejected() {
        let mut pipeline = ProducerConsumerPipeline::new(vec![1, 2], 1).unwrap();
        pipeline.start(Duration::ZERO, Duration::ZERO).await.unwrap();

        let error = pipeline
            .start(Duration::ZERO, Duration::ZERO)
            .await
            .unwrap_err();
        assert!(matches!(
            error,
            PipelineError::InvalidStateError {
                from: PipelineStatus::Running,
                ..
            }
        ));

        pipeline.wait_completion().await.unwrap();
        let error = pipeline
            .start(Duration::ZERO, Duration::ZERO)
            .await
            .unwrap_err();
        assert!(matches!(
            error,
            PipelineError::InvalidStateError {
                from: PipelineStatus::Completed,
                ..
            }
        ));
        assert_eq!(pipeline.destination(), vec![1, 2]);
    }

    #[tokio::test]
    async fn test_start_with_config() {
        let config = DefaultPipelineConfig::default()
            .with_capacity(2)
            .with_producer_delay(Duration::from_millis(1));
        let mut pipeline = ProducerConsumerPipeline::from_config(vec![5, 6, 7], &config).unwrap();
        assert_eq!(pipeline.capacity(), 2);

        pipeline.start_with_config(&config).await.unwrap();
        pipeline.wait_completion().await.unwrap();

        assert_eq!(pipeline.destination(), vec![5, 6, 7]);
    }

    #[tokio::test]
    async fn test_reporter_lifecycle_calls() {
        let mut reporter = MockProgressReporter::new();
        reporter
            .expect_report_started()
            .with(eq(4))
            .times(1)
            .returning(|_| ());
        reporter
            .expect_report_produced()
            .times(4)
            .returning(|_, _| ());
        reporter
            .expect_report_consumed()
            .times(4)
            .returning(|_, _| ());
        reporter
            .expect_report_completed()
            .withf(|stats| stats.items_produced == 4 && stats.items_consumed == 4)
            .times(1)
            .returning(|_| ());

        let mut pipeline = ProducerConsumerPipeline::new(vec!["w", "x", "y", "z"], 2)
            .unwrap()
            .with_reporter(reporter);

        pipeline
            .run_to_completion(Duration::ZERO, Duration::ZERO)
            .await
            .unwrap();
    }

    /// 指定した側の報告で panic するレポーター
    struct PanickingReporter {
        on_produced: bool,
    }

    #[async_trait::async_trait]
    impl ProgressReporter for PanickingReporter {
        async fn report_started(&self, _total_items: usize) {}

        async fn report_produced(&self, _produced: usize, _total: usize) {
            if self.on_produced {
                panic!("producer side failure");
            }
        }

        async fn report_consumed(&self, _consumed: usize, _total: usize) {
            if !self.on_produced {
                panic!("consumer side failure");
            }
        }

        async fn report_completed(&self, _stats: &PipelineStats) {}
    }

    async fn run_with_failing_side(on_produced: bool) -> (PipelineResult<()>, PipelineStatus) {
        let mut pipeline = ProducerConsumerPipeline::new((0..10).collect::<Vec<u32>>(), 2)
            .unwrap()
            .with_reporter(PanickingReporter { on_produced });
        pipeline.start(Duration::ZERO, Duration::ZERO).await.unwrap();

        let result = tokio::time::timeout(Duration::from_secs(3), pipeline.wait_completion())
            .await
            .expect("wait_completion must not hang after a task failure");
        (result, pipeline.status())
    }

    #[tokio::test]
    async fn test_producer_failure_completes_with_task_error() {
        let (result, status) = run_with_failing_side(true).await;

        assert!(matches!(result, Err(PipelineError::TaskError { .. })));
        assert_eq!(status, PipelineStatus::Completed);
    }

    #[tokio::test]
    async fn test_consumer_failure_completes_with_task_error() {
        let (result, status) = run_with_failing_side(false).await;

        let error = result.unwrap_err();
        assert!(matches!(error, PipelineError::TaskError { ref source } if source.is_panic()));
        assert_eq!(status, PipelineStatus::Completed);
    }

    #[tokio::test]
    async fn test_wait_after_failure_is_rejected() {
        let mut pipeline = ProducerConsumerPipeline::new(vec![1, 2, 3], 1)
            .unwrap()
            .with_reporter(PanickingReporter { on_produced: true });
        pipeline.start(Duration::ZERO, Duration::ZERO).await.unwrap();
        assert!(pipeline.wait_completion().await.is_err());

        let error = pipeline.wait_completion().await.unwrap_err();
        assert!(matches!(
            error,
            PipelineError::InvalidStateError {
                from: PipelineStatus::Completed,
                ..
            }
        ));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_monitor_observes_running_pipeline() {
        let mut pipeline = ProducerConsumerPipeline::new((0..10).collect::<Vec<u32>>(), 2).unwrap();
        let monitor = pipeline.monitor();
        assert_eq!(monitor.channel_capacity(), 2);

        pipeline
            .start(Duration::ZERO, Duration::from_millis(5))
            .await
            .unwrap();

        let sampler = {
            let monitor = monitor.clone();
            tokio::spawn(async move {
                let mut max_seen = 0;
                for _ in 0..20 {
                    max_seen = max_seen.max(monitor.channel_size());
                    tokio::time::sleep(Duration::from_millis(2)).await;
                }
                max_seen
            })
        };

        pipeline.wait_completion().await.unwrap();
        let max_seen = sampler.await.unwrap();

        assert!(max_seen <= 2);
        assert_eq!(monitor.stats().items_consumed, 10);
    }
}
