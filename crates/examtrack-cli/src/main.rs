//! examtrack CLI: the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "examtrack",
    version,
    about = "Certification exam progress analytics"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute analytics over the recorded exams
    Analyze {
        /// JSON data file (overrides the configured store)
        #[arg(long)]
        data: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output format: text, json, markdown
        #[arg(long)]
        format: Option<String>,

        /// Also save the report as JSON into this directory
        #[arg(long)]
        output: Option<PathBuf>,

        /// Save the report into the configured output directory
        #[arg(long)]
        save: bool,
    },

    /// Show the score trend of one field
    Trend {
        /// Field ID
        #[arg(long)]
        field: i64,

        /// JSON data file (overrides the configured store)
        #[arg(long)]
        data: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Print study recommendations
    Recommend {
        /// JSON data file (overrides the configured store)
        #[arg(long)]
        data: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// List recorded exams
    List {
        /// JSON data file (overrides the configured store)
        #[arg(long)]
        data: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,

        /// Only exams whose name contains this text
        #[arg(long)]
        search: Option<String>,
    },

    /// Show one exam with its per-field scores
    Show {
        /// Exam ID
        #[arg(long)]
        exam: i64,

        /// JSON data file (overrides the configured store)
        #[arg(long)]
        data: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Validate a JSON data file
    Validate {
        /// Path to the data file
        #[arg(long)]
        data: PathBuf,
    },

    /// Compare two saved analytics reports
    Compare {
        /// Baseline report JSON
        #[arg(long)]
        baseline: PathBuf,

        /// Current report JSON
        #[arg(long)]
        current: PathBuf,

        /// Percentage points a field must move to count as changed
        #[arg(long, default_value = "5")]
        threshold: u32,

        /// Exit code 1 if any field regressed
        #[arg(long)]
        fail_on_regression: bool,

        /// Output format: text, json, markdown
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Create a starter config and sample data file
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("examtrack=info".parse().unwrap()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Analyze {
            data,
            config,
            format,
            output,
            save,
        } => commands::analyze::execute(data, config, format, output, save).await,
        Commands::Trend {
            field,
            data,
            config,
        } => commands::trend::execute(field, data, config).await,
        Commands::Recommend { data, config } => commands::recommend::execute(data, config).await,
        Commands::List {
            data,
            config,
            search,
        } => commands::list::execute(data, config, search).await,
        Commands::Show { exam, data, config } => commands::show::execute(exam, data, config).await,
        Commands::Validate { data } => commands::validate::execute(data),
        Commands::Compare {
            baseline,
            current,
            threshold,
            fail_on_regression,
            format,
        } => commands::compare::execute(baseline, current, threshold, fail_on_regression, format),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
