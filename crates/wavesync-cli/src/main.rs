use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "wavesync")]
#[command(about = "Wavesync CLI - wave portal session and ledger sync", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a scripted session against an in-memory ledger
    Demo(commands::demo::DemoArgs),
    /// Inspect or initialize the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the resolved configuration
    Show,
    /// Print the configuration file path
    Path,
    /// Write the default configuration if none exists
    Init,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = commands::config::load()?;
    let json = matches!(&cli.command, Commands::Demo(args) if args.json);
    commands::logging::init(&config.log_level, json)?;

    match cli.command {
        Commands::Demo(args) => commands::demo::run(args, &config).await?,
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::show(&config)?,
            ConfigAction::Path => commands::config::path()?,
            ConfigAction::Init => commands::config::init()?,
        },
    }

    Ok(())
}
