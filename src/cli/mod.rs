// CLI層 - サブコマンド定義と実行関数

pub mod args;
pub mod commands;

pub use args::*;
pub use commands::*;

use crate::core::PipelineError;

/// エラーに応じた終了コード（パイプラインのエラーは重要度から決める）
pub fn exit_code(error: &anyhow::Error) -> i32 {
    error
        .downcast_ref::<PipelineError>()
        .map(|pipeline_error| pipeline_error.severity().exit_code())
        .unwrap_or(1)
}
