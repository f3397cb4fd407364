// パイプラインに関連するデータ型定義

use serde::Serialize;
use std::fmt;
use std::time::Duration;

/// チャンネルを流れるメッセージ
///
/// 終端マーカーはペイロードとは別のバリアントなので、
/// `None` や null 相当の値を流しても終端と誤認されることはない。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelMessage<T> {
    Item(T),
    EndOfStream,
}

impl<T> ChannelMessage<T> {
    pub fn is_end_of_stream(&self) -> bool {
        matches!(self, Self::EndOfStream)
    }
}

/// パイプラインのライフサイクル状態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PipelineStatus {
    Idle,
    Running,
    Completed,
}

impl fmt::Display for PipelineStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "Idle",
            Self::Running => "Running",
            Self::Completed => "Completed",
        };
        f.write_str(name)
    }
}

/// 進捗カウンター（パイプライン単位のロックで保護される）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineCounters {
    pub items_produced: usize,
    pub items_consumed: usize,
}

/// `get_stats` が返すスナップショット
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PipelineStats {
    pub items_produced: usize,
    pub items_consumed: usize,
    pub source_remaining: usize,
    pub destination_size: usize,
}

impl PipelineStats {
    /// 全アイテムが欠落・重複なく転送されたか
    pub fn is_fully_transferred(&self) -> bool {
        self.source_remaining == 0
            && self.items_produced == self.items_consumed
            && self.destination_size == self.items_consumed
    }
}

/// 実行全体のサマリー
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineSummary {
    pub stats: PipelineStats,
    pub elapsed: Duration,
}
