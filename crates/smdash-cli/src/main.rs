mod report;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "smdash-cli")]
#[command(about = "Social-media reporting from the command line")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Period selection shared by every subcommand. Networks default to all
/// configured networks when omitted.
#[derive(Debug, Args)]
struct PeriodArgs {
    /// First day of the reporting period (YYYY-MM-DD).
    #[arg(long)]
    start: NaiveDate,

    /// Last day of the reporting period (YYYY-MM-DD), inclusive.
    #[arg(long)]
    end: NaiveDate,

    /// Comma-separated network names to include.
    #[arg(long, value_delimiter = ',')]
    networks: Option<Vec<String>>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print the KPI overview with period-over-period deltas and the
    /// month-by-network rollup.
    Report(PeriodArgs),
    /// Ask the keyword answerer one question about the selected period.
    Ask {
        #[command(flatten)]
        period: PeriodArgs,
        /// The question, as remaining words.
        #[arg(trailing_var_arg = true, required = true)]
        question: Vec<String>,
    },
    /// Write the selected period as semicolon-delimited text to stdout.
    Export(PeriodArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = smdash_core::load_app_config()?;
    let networks = smdash_core::load_networks(&config.networks_path)?;

    match cli.command {
        Commands::Report(period) => {
            report::run_report(&config, &networks, &period.into()).await
        }
        Commands::Ask { period, question } => {
            report::run_ask(&config, &networks, &period.into(), &question.join(" ")).await
        }
        Commands::Export(period) => {
            report::run_export(&config, &networks, &period.into()).await
        }
    }
}

impl From<PeriodArgs> for report::Period {
    fn from(args: PeriodArgs) -> Self {
        report::Period {
            start: args.start,
            end: args.end,
            networks: args.networks,
        }
    }
}
