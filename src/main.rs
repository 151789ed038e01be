use clap::Parser;
use triple_barrier::cli::{Cli, Commands};
use triple_barrier::config::Config;
use triple_barrier::pipeline::Step;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = match Config::load_if_exists(&cli.config)? {
        Some(config) => config,
        None => {
            eprintln!("Warning: {} not found, using default configuration", cli.config);
            toml::from_str(include_str!("../config.toml.example"))?
        }
    };

    // Initialize telemetry
    triple_barrier::telemetry::init_telemetry(&config.telemetry)?;

    match cli.command {
        Commands::Filter(args) => {
            tracing::info!("Running CUSUM filter");
            args.execute(&config).await?;
        }
        Commands::Label(args) => {
            tracing::info!("Labeling filtered events");
            args.execute(&config, Step::Label).await?;
        }
        Commands::Run(args) => {
            tracing::info!("Running filter and labeling");
            args.execute(&config, Step::Run).await?;
        }
        Commands::Config => {
            println!("Current configuration:");
            print!("{}", toml::to_string_pretty(&config)?);
        }
    }

    Ok(())
}
