pub mod analyze;
pub mod run;

pub use analyze::{execute_analyze, AnalyzeConfig};
pub use run::{execute_run, RunConfig};
