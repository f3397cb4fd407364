// 進捗監視機能
// 処理開始、アイテムの投入・消費、完了の報告

pub mod implementations;

// 公開API
pub use implementations::{ConsoleProgressReporter, NoOpProgressReporter, TracingProgressReporter};
