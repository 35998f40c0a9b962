use arbscan::adapter::inbound::cli::command::{CheckCommand, Cli, Commands};
use arbscan::adapter::inbound::cli::output::{self, OutputConfig};
use arbscan::adapter::inbound::cli::{check, mappings, run};
use arbscan::error::Result;
use clap::Parser;
use tokio::signal;
use tracing::info;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    output::configure(OutputConfig::new(cli.json, cli.quiet), &cli.color);

    if let Err(e) = dispatch(cli).await {
        output::error(&e.to_string());
        std::process::exit(1);
    }
}

async fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Run(args) => {
            tokio::select! {
                result = run::execute(&args) => result,
                _ = signal::ctrl_c() => {
                    info!("Shutdown signal received");
                    Ok(())
                }
            }
        }
        Commands::Check(CheckCommand::Config(arg)) => check::config::execute_config(&arg.config),
        Commands::Mappings(args) => mappings::execute(&args),
    }
}
