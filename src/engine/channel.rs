// BoundedChannel - 固定容量のFIFOチャンネル

use crate::core::{PipelineError, PipelineResult};
use std::num::NonZeroUsize;
use tokio::sync::{mpsc, Mutex};

/// 固定容量のスレッドセーフなFIFOキュー
///
/// `put` は空きスロットができるまで、`get` はアイテムが届くまで待機する。
/// 送信側と受信側の両方をチャンネル自身が保持するため、どちらかが閉じて
/// 待機が打ち切られることはない。終了の通知は `ChannelMessage::EndOfStream` で行う。
#[derive(Debug)]
pub struct BoundedChannel<T> {
    capacity: usize,
    tx: mpsc::Sender<T>,
    rx: Mutex<mpsc::Receiver<T>>,
}

impl<T: Send> BoundedChannel<T> {
    /// 新しいチャンネルを作成（容量0は設定エラー）
    pub fn new(capacity: usize) -> PipelineResult<Self> {
        let capacity = NonZeroUsize::new(capacity).ok_or_else(|| {
            PipelineError::configuration("チャンネル容量は1以上である必要があります")
        })?;
        Ok(Self::with_capacity(capacity))
    }

    pub fn with_capacity(capacity: NonZeroUsize) -> Self {
        let (tx, rx) = mpsc::channel(capacity.get());
        Self {
            capacity: capacity.get(),
            tx,
            rx: Mutex::new(rx),
        }
    }

    /// 末尾にアイテムを追加（満杯なら空きができるまで待機）
    pub async fn put(&self, item: T) -> PipelineResult<()> {
        self.tx
            .send(item)
            .await
            .map_err(|_| PipelineError::channel("受信側が閉じられています"))
    }

    /// 先頭のアイテムを取り出す（空ならアイテムが届くまで待機）
    pub async fn get(&self) -> PipelineResult<T> {
        let mut rx = self.rx.lock().await;
        rx.recv()
            .await
            .ok_or_else(|| PipelineError::channel("送信側が閉じられています"))
    }

    /// 現在の保持数のスナップショット
    ///
    /// 呼び出し直後に他のタスクが値を変える可能性があるため、参考値としてのみ使う。
    pub fn size(&self) -> usize {
        self.tx.max_capacity() - self.tx.capacity()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    pub fn is_full(&self) -> bool {
        self.size() >= self.capacity
    }
}
