use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use outgo::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Directory for the data store (defaults to the platform data dir)
    #[arg(long, global = true)]
    data_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Record a new cost
    Add {
        /// Amount in the cost's own currency
        amount: f64,

        /// Currency the cost was paid in (USD, ILS, GBP, EURO)
        #[arg(short, long)]
        currency: String,

        /// Category, e.g. Food
        #[arg(long)]
        category: String,

        /// Free-form description
        #[arg(long, default_value = "")]
        description: String,
    },
    /// Display the monthly report
    Report {
        /// Year to report on (defaults to the current year)
        #[arg(short, long)]
        year: Option<i32>,

        /// Month to report on, 1-12 (defaults to the current month)
        #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..=12))]
        month: Option<u32>,

        /// Display currency (defaults to the configured base currency)
        #[arg(short, long)]
        currency: Option<String>,
    },
    /// Display category and monthly charts
    Charts {
        /// Year to chart (defaults to the current year)
        #[arg(short, long)]
        year: Option<i32>,

        /// Month for the category breakdown, 1-12 (defaults to the current month)
        #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..=12))]
        month: Option<u32>,

        /// Display currency (defaults to the configured base currency)
        #[arg(short, long)]
        currency: Option<String>,
    },
    /// Show or change settings
    Settings {
        #[command(subcommand)]
        action: SettingsCommands,
    },
}

#[derive(Subcommand)]
enum SettingsCommands {
    /// Show current settings
    Show,
    /// Change settings
    Set {
        /// Base display currency (USD, ILS, GBP, EURO)
        #[arg(short, long)]
        base_currency: Option<String>,

        /// Exchange-rate source URL; an empty value restores the built-in default
        #[arg(short, long)]
        rates_url: Option<String>,
    },
    /// Reset settings to defaults
    Reset,
}

impl From<Commands> for outgo::AppCommand {
    fn from(cmd: Commands) -> outgo::AppCommand {
        match cmd {
            Commands::Add {
                amount,
                currency,
                category,
                description,
            } => outgo::AppCommand::Add {
                amount,
                currency,
                category,
                description,
            },
            Commands::Report {
                year,
                month,
                currency,
            } => outgo::AppCommand::Report {
                year,
                month,
                currency,
            },
            Commands::Charts {
                year,
                month,
                currency,
            } => outgo::AppCommand::Charts {
                year,
                month,
                currency,
            },
            Commands::Settings { action } => outgo::AppCommand::Settings(match action {
                SettingsCommands::Show => outgo::SettingsCommand::Show,
                SettingsCommands::Set {
                    base_currency,
                    rates_url,
                } => outgo::SettingsCommand::Set {
                    base_currency,
                    rates_url,
                },
                SettingsCommands::Reset => outgo::SettingsCommand::Reset,
            }),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(cmd) => outgo::run_command(cmd.into(), cli.data_path.as_deref()).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
