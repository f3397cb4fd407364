// 共有状態 - ProducerとConsumerが共有するコンテナとカウンター

use crate::core::{PipelineCounters, PipelineStats};
use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// パイプライン1回分の共有状態
///
/// `source` はProducerのみが先頭から取り出し、`destination` はConsumerのみが追記する。
/// 2つのカウンターは1つのロックでまとめて保護する。
#[derive(Debug)]
pub struct SharedState<T> {
    total_items: usize,
    source: Mutex<VecDeque<T>>,
    destination: Mutex<Vec<T>>,
    counters: Mutex<PipelineCounters>,
}

fn lock<U>(mutex: &Mutex<U>) -> MutexGuard<'_, U> {
    // 保護対象は単純なコンテナとカウンターのみで、途中状態が残ることはない
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl<T> SharedState<T> {
    pub fn new(source: Vec<T>) -> Self {
        let total_items = source.len();
        Self {
            total_items,
            source: Mutex::new(source.into()),
            destination: Mutex::new(Vec::with_capacity(total_items)),
            counters: Mutex::new(PipelineCounters::default()),
        }
    }

    /// 構築時のアイテム総数
    pub fn total_items(&self) -> usize {
        self.total_items
    }

    /// `source` の先頭を取り出す
    pub fn pop_source(&self) -> Option<T> {
        lock(&self.source).pop_front()
    }

    /// `destination` の末尾に追加
    pub fn push_destination(&self, item: T) {
        lock(&self.destination).push(item);
    }

    /// 投入数をインクリメントし、更新後の値を返す
    pub fn record_produced(&self) -> usize {
        let mut counters = lock(&self.counters);
        counters.items_produced += 1;
        counters.items_produced
    }

    /// 消費数をインクリメントし、更新後の値を返す
    pub fn record_consumed(&self) -> usize {
        let mut counters = lock(&self.counters);
        counters.items_consumed += 1;
        counters.items_consumed
    }

    pub fn counters(&self) -> PipelineCounters {
        *lock(&self.counters)
    }

    pub fn stats(&self) -> PipelineStats {
        let counters = self.counters();
        PipelineStats {
            items_produced: counters.items_produced,
            items_consumed: counters.items_consumed,
            source_remaining: lock(&self.source).len(),
            destination_size: lock(&self.destination).len(),
        }
    }

    pub fn destination_snapshot(&self) -> Vec<T>
    where
        T: Clone,
    {
        lock(&self.destination).clone()
    }

    pub fn take_destination(&self) -> Vec<T> {
        std::mem::take(&mut *lock(&self.destination))
    }
}
