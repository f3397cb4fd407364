// エンジン層 - Producer-Consumer の並行処理とオーケストレーション
// チャンネル、共有状態、2つのタスクを組み合わせてパイプラインを提供

pub mod channel;
pub mod consumer;
pub mod pipeline;
pub mod producer;
pub mod state;

// 公開API - 主要なパイプライン型
pub use channel::BoundedChannel;
pub use pipeline::{PipelineMonitor, ProducerConsumerPipeline, DEFAULT_CAPACITY};
pub use state::SharedState;
