use anyhow::Result;
use clap::{Args, CommandFactory, Parser, Subcommand};
use raisekit::cli::valuation::ValuationOptions;
use raisekit::core::log::init_logging;
use std::path::PathBuf;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args)]
struct ValuationArgs {
    /// Funding stage, e.g. "Seed" or "Series A"
    #[arg(long)]
    stage: Option<String>,
    /// Industry, e.g. "Fintech"
    #[arg(long)]
    industry: Option<String>,
    /// City the company is based in
    #[arg(long)]
    location: Option<String>,
    /// Founding date as YYYY-MM-DD
    #[arg(long)]
    founded: Option<String>,
    /// Compute the company's age as of this date (YYYY-MM-DD) instead of today
    #[arg(long)]
    as_of: Option<String>,
    /// Print the result as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Estimate a valuation range from stage, industry, location and age
    Valuation(ValuationArgs),
    /// List the stages, industries and locations used by the estimate
    Factors,
    /// Generate a pitch from the profile and save it
    Generate,
    /// Display the saved pitch
    Show,
    /// Rewrite one section of the saved pitch
    Improve {
        /// Section to improve, e.g. "business model"
        #[arg(short, long)]
        section: String,
        /// What should change
        #[arg(short, long)]
        feedback: String,
    },
    /// Find investors that fit the profile
    Investors,
    /// Draft outreach emails
    Email {
        /// Investor to write to; repeat for several
        #[arg(short, long = "investor", required = true)]
        investors: Vec<String>,
        /// The investor's firm
        #[arg(long)]
        firm: Option<String>,
        /// Tone of the email, e.g. "warm" or "formal"
        #[arg(long)]
        tone: Option<String>,
    },
    /// Export the saved pitch as Markdown
    Export {
        /// File to write
        #[arg(short, long, default_value = "pitch.md")]
        output: PathBuf,
    },
}

impl From<ValuationArgs> for ValuationOptions {
    fn from(args: ValuationArgs) -> Self {
        ValuationOptions {
            stage: args.stage,
            industry: args.industry,
            location: args.location,
            founded: args.founded,
            as_of: args.as_of,
            json: args.json,
        }
    }
}

impl From<Commands> for raisekit::AppCommand {
    fn from(cmd: Commands) -> raisekit::AppCommand {
        match cmd {
            Commands::Valuation(args) => raisekit::AppCommand::Valuation(args.into()),
            Commands::Factors => raisekit::AppCommand::Factors,
            Commands::Generate => raisekit::AppCommand::Generate,
            Commands::Show => raisekit::AppCommand::Show,
            Commands::Improve { section, feedback } => {
                raisekit::AppCommand::Improve { section, feedback }
            }
            Commands::Investors => raisekit::AppCommand::Investors,
            Commands::Email {
                investors,
                firm,
                tone,
            } => raisekit::AppCommand::Email {
                investors,
                firm,
                tone,
            },
            Commands::Export { output } => raisekit::AppCommand::Export { output },
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => raisekit::cli::setup::setup(),
        Some(cmd) => raisekit::run_command(cmd.into(), cli.config_path.as_deref()).await,
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
