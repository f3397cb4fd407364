// Consumer - チャンネルからdestinationへのアイテム受信

use super::{channel::BoundedChannel, state::SharedState};
use crate::core::{ChannelMessage, PipelineResult, ProgressReporter};
use std::sync::Arc;
use std::time::Duration;

/// Consumer: 終端マーカーを受け取るまでアイテムを受信順にdestinationへ追加
pub fn spawn_consumer<T>(
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
        tracing::debug!(total, "consumer started");

        loop {
            let item = match channel.get().await? {
                ChannelMessage::Item(item) => item,
                // 終端マーカーはdestinationにもカウンターにも反映しない
                ChannelMessage::EndOfStream => break,
            };

            state.push_destination(item);
            let consumed = state.record_consumed();
            tracing::trace!(consumed, queued = channel.size(), "item consumed");
            reporter.report_consumed(consumed, total).await;

            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
        }

        tracing::debug!(consumed = state.counters().items_consumed, "consumer finished");
        Ok(())
    })
}
