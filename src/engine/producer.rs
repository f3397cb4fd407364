// Producer - sourceからチャンネルへのアイテム配信

use super::{channel::BoundedChannel, state::SharedState};
use crate::core::{ChannelMessage, PipelineResult, ProgressReporter};
use std::sync::Arc;
use std::time::Duration;

/// Producer: sourceを先頭から順に配信し、最後に終端マーカーを1つ送る
pub fn spawn_producer<T>(
    state: Arc<SharedState<T>>,
    channel: Arc<BoundedChannel<ChannelMessage<T>>>,
    reporter: Arc<dyn ProgressReporter>,
    delay: Duration,
) -> tokio::task::JoinHandle<PipelineResult<()>>
where
    T: Send + 'static,
{
    tokio::spawn(async move {
        let total = state.total_items();
        tracing::debug!(total, capacity = channel.capacity(), "producer started");

        while let Some(item) = state.pop_source() {
            channel.put(ChannelMessage::Item(item)).await?;
            let produced = state.record_produced();
            tracing::trace!(produced, queued = channel.size(), "item produced");
            reporter.report_produced(produced, total).await;

            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
        }

        // 満杯ならここでも待機する
        channel.put(ChannelMessage::EndOfStream).await?;
        tracing::debug!(produced = state.counters().items_produced, "producer finished");
        Ok(())
    })
}
