use clap::Parser;
use sentinel::cli::commands::{Cli, Commands};
use sentinel::config::SentinelConfig;
use sentinel::domain::values::strategy_profile::{ProfileName, StrategyProfile};
use sentinel::Sentinel;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&cli.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = run_command(cli).await {
        error!("{e}");
        std::process::exit(1);
    }
}

async fn run_command(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command.unwrap_or(Commands::Check) {
        Commands::Profiles => {
            let profiles: Vec<StrategyProfile> =
                ProfileName::ALL.iter().map(|name| name.profile()).collect();
            println!("{}", serde_json::to_string_pretty(&profiles)?);
        }
        Commands::Check => {
            let name: ProfileName = cli.profile.parse()?;
            let config = SentinelConfig::from_env();

            info!(profile = %name, dry_run = cli.dry_run, "Sentinel starting");
            let sentinel = Sentinel::new(name.profile(), &config)?;
            let report = sentinel.run(!cli.dry_run).await?;

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("{}", report.message);
            }
            info!(delivery = ?report.delivery, "Run complete");
        }
    }
    Ok(())
}
