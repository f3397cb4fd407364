use anyhow::Result;
use clap::Parser;

use bounded_pipeline::{
    analysis::ReportOptions,
    cli::{execute_analyze, execute_run, exit_code, AnalyzeConfig, Cli, Commands, RunConfig},
    core::PipelineError,
    services::init_tracing,
};

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            items,
            capacity,
            producer_delay_ms,
            consumer_delay_ms,
            config,
            quiet,
            json,
        } => execute_run(RunConfig {
            items,
            capacity,
            producer_delay_ms,
            consumer_delay_ms,
            config_file: config,
            quiet,
            json,
        })
        .await
        .map(|_| ()),
        Commands::Analyze {
            csv_file,
            top,
            threshold,
            months,
            json,
        } => execute_analyze(AnalyzeConfig {
            csv_file,
            options: ReportOptions {
                top_n: top,
                high_value_threshold: threshold,
                months_shown: months,
            },
            json,
        })
        .await
        .map(|_| ()),
    };

    if let Err(error) = result {
        match error.downcast_ref::<PipelineError>() {
            Some(pipeline_error) => {
                eprintln!("❌ [{}] {pipeline_error}", pipeline_error.severity().as_str())
            }
            None => eprintln!("❌ エラー: {error:#}"),
        }
        std::process::exit(exit_code(&error));
    }

    Ok(())
}
