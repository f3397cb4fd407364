use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "bounded_pipeline")]
#[command(about = "Bounded producer/consumer pipeline and sales CSV analysis")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the producer/consumer pipeline over the integers 0..items
    Run {
        /// Number of items in the source container
        #[arg(short = 'n', long, default_value = "20")]
        items: usize,

        /// Maximum number of items buffered in the channel
        #[arg(short, long)]
        capacity: Option<usize>,

        /// Delay after each produced item, in milliseconds
        #[arg(long)]
        producer_delay_ms: Option<u64>,

        /// Delay after each consumed item, in milliseconds
        #[arg(long)]
        consumer_delay_ms: Option<u64>,

        /// Pipeline configuration file (JSON)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Suppress progress output
        #[arg(short, long)]
        quiet: bool,

        /// Print final statistics as JSON
        #[arg(long)]
        json: bool,
    },

    /// Analyze a sales CSV file and print a report
    Analyze {
        /// Sales CSV file with a header row
        #[arg(default_value = "sample_sales.csv")]
        csv_file: PathBuf,

        /// Number of top products to list
        #[arg(short, long, default_value = "5")]
        top: usize,

        /// Minimum total_sales for a high value transaction
        #[arg(long, default_value = "5000")]
        threshold: f64,

        /// Number of months shown in the monthly trend
        #[arg(long, default_value = "6")]
        months: usize,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}
