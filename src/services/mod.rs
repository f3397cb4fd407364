// サービス層 - 設定、進捗報告、ログ
// 各サービスは特定の責任を持ち、パイプライン本体とは疎結合

pub mod config;
pub mod logging;
pub mod monitoring;

// 公開API - 各サービスの主要機能を明示的にエクスポート
pub use config::DefaultPipelineConfig;
pub use logging::init_tracing;
pub use monitoring::{ConsoleProgressReporter, NoOpProgressReporter, TracingProgressReporter};
