pub mod analysis;
pub mod cli;
pub mod core;
pub mod engine;
pub mod services;

// 公開API
pub use analysis::{render_report, ReportOptions, SalesAnalysis, SalesReport, TabularData};
pub use core::{
    ChannelMessage, PipelineConfig, PipelineError, PipelineResult, PipelineStats,
    PipelineStatus, PipelineSummary, ProgressReporter,
};
pub use engine::{BoundedChannel, PipelineMonitor, ProducerConsumerPipeline, DEFAULT_CAPACITY};
pub use services::{
    init_tracing, ConsoleProgressReporter, DefaultPipelineConfig, NoOpProgressReporter,
    TracingProgressReporter,
};
