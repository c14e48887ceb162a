use anyhow::Context;
use clap::Parser;
use geocoder::config::cli::{Cli, Command, LogFormat};
use geocoder::utils::{logger, validation::Validate};
use geocoder::{Geocoder, GeocoderConfig, GeocoderError, Provider};
use serde::Serialize;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    match cli.log_format {
        LogFormat::Text => logger::init_cli_logger(cli.verbose),
        LogFormat::Json => logger::init_json_logger(cli.verbose),
    }

    if let Err(e) = run(&cli).await {
        let exit_code = match e.downcast_ref::<GeocoderError>() {
            Some(err) => {
                tracing::error!(
                    "Command failed: {} (category: {:?})",
                    err,
                    err.category()
                );
                eprintln!("❌ {:#}", e);
                eprintln!("💡 Suggestion: {}", err.recovery_suggestion());
                err.exit_code()
            }
            None => {
                eprintln!("❌ {:#}", e);
                1
            }
        };
        std::process::exit(exit_code);
    }
}

async fn run(cli: &Cli) -> anyhow::Result<()> {
    tracing::info!("Loading configuration from: {}", cli.config.display());

    let mut config = GeocoderConfig::from_file(&cli.config)
        .with_context(|| format!("Failed to load config file '{}'", cli.config.display()))?;

    if let Some(provider) = cli.provider {
        tracing::info!("Provider overridden to: {}", provider);
        config.select(provider);
    }
    config.validate()?;

    let client = config.http_client()?;
    let geocoder = Geocoder::new(config.build_provider(client)?);
    tracing::debug!("Using provider {}", geocoder.provider().name());

    match &cli.command {
        Command::Geocode(args) => print_json(&geocoder.geocode(&args.to_query()).await?),
        Command::Reverse(args) => print_json(&geocoder.reverse(&args.to_query()).await?),
        Command::Suggest(args) => print_json(&geocoder.suggest(&args.to_query()).await?),
        Command::PlaceDetails(args) => {
            print_json(&geocoder.place_details(&args.to_query()).await?)
        }
        Command::Distance(args) => print_json(&geocoder.distance(&args.to_query()).await?),
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let output = serde_json::to_string_pretty(value).context("Failed to serialize results")?;
    println!("{}", output);
    Ok(())
}
