use clap::{Parser, Subcommand};
use sellersol::cli;
use sellersol::history::DEFAULT_HISTORY_FILE;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sellersol")]
#[command(about = "Marketplace sales analysis: Excel import, AI narrative, report export")]
#[command(long_about = "SellerSol - marketplace sales analysis pipeline

COMMANDS:
  sample   - Write a demo sales workbook to try the expected format
  preview  - Import a sales export and print its rows
  analyze  - Import, analyze via AI, export the report, save to history
  export   - Offline report export from a saved narrative file
  history  - List or remove saved analysis reports
  chat     - Ask the dashboard assistant about the app's features

EXAMPLES:
  sellersol sample
  sellersol preview penjualan.xlsx
  sellersol analyze penjualan.xlsx --platform Shopee
  sellersol export penjualan.xlsx --platform Shopee --narrative analisa.html
  sellersol history --remove 0

The analyze and chat commands read the API key from OPENROUTER_API_KEY.")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the demo sales workbook
    Sample {
        /// Output path (default: Dummy_Data_Penjualan.xlsx)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Import a sales export and print its rows
    Preview {
        /// Sales export file (.xlsx or .xls)
        file: PathBuf,

        /// Maximum rows to print
        #[arg(short, long, default_value_t = 10)]
        limit: usize,
    },

    /// Import, analyze via the hosted model, export the report
    Analyze {
        /// Sales export file (.xlsx or .xls)
        file: PathBuf,

        /// Marketplace the export came from (Shopee, Tokopedia, Tiktok Shop)
        #[arg(short, long)]
        platform: String,

        /// Report output path (default: derived from the platform name)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// OpenRouter API key
        #[arg(long, env = "OPENROUTER_API_KEY", hide_env_values = true)]
        api_key: String,

        /// Override the analysis model
        #[arg(long)]
        model: Option<String>,

        /// History file location
        #[arg(long, default_value = DEFAULT_HISTORY_FILE)]
        history_file: PathBuf,
    },

    /// Export a report from an already-saved narrative, no AI call
    Export {
        /// Sales export file (.xlsx or .xls)
        file: PathBuf,

        /// Marketplace the export came from
        #[arg(short, long)]
        platform: String,

        /// File holding the HTML-flavored narrative
        #[arg(short, long)]
        narrative: PathBuf,

        /// Report output path (default: derived from the platform name)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List or remove saved analysis reports
    History {
        /// Remove the report at this index instead of listing
        #[arg(long)]
        remove: Option<usize>,

        /// History file location
        #[arg(long, default_value = DEFAULT_HISTORY_FILE)]
        history_file: PathBuf,
    },

    /// Ask the dashboard assistant one question
    Chat {
        /// The question
        message: String,

        /// OpenRouter API key
        #[arg(long, env = "OPENROUTER_API_KEY", hide_env_values = true)]
        api_key: String,

        /// Override the assistant model
        #[arg(long)]
        model: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sellersol=info".into()),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Sample { output } => cli::sample(output)?,
        Commands::Preview { file, limit } => cli::preview(file, limit)?,
        Commands::Analyze {
            file,
            platform,
            output,
            api_key,
            model,
            history_file,
        } => cli::analyze(file, platform, output, api_key, model, history_file).await?,
        Commands::Export {
            file,
            platform,
            narrative,
            output,
        } => cli::export(file, platform, narrative, output)?,
        Commands::History {
            remove,
            history_file,
        } => cli::history(history_file, remove)?,
        Commands::Chat {
            message,
            api_key,
            model,
        } => cli::chat(message, api_key, model).await?,
    }
    Ok(())
}
