use anyhow::Result;
use clap::Parser;
use tracing::Level;
use tracing_subscriber::filter::Targets;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use bitecast_toolbox::arguments::{Cli, Commands, FishCommands};
use bitecast_toolbox::commands;
use bitecast_toolbox::forecast::ForecastClient;

fn setup_logging(verbose: u8) {
    let log_level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_writer(std::io::stderr),
        )
        .with(
            Targets::default()
                .with_target("bitecast_toolbox", log_level)
                .with_target("bitecast", log_level),
        )
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();
    setup_logging(args.verbose);

    let config = args.config()?;
    let client = ForecastClient::new(config.api_url.clone());
    let token = config.token.clone();

    match &args.command {
        Commands::Regions => commands::regions::list(&client).await?,
        Commands::Nearest {
            latitude,
            longitude,
        } => commands::regions::nearest(&client, *latitude, *longitude).await?,
        Commands::Forecast(options) => {
            commands::forecast::show(client, token, options.selector.choice(), options.date)
                .await?
        }
        Commands::Dates(selector) => commands::dates::list(&client, selector.choice()).await?,
        Commands::Fish { command } => match command {
            FishCommands::List(selector) => {
                commands::fish::list(&client, token.as_deref(), selector.choice()).await?
            }
            FishCommands::Add {
                selector,
                fish_type,
            } => {
                commands::fish::add(&client, token.as_deref(), selector.choice(), fish_type)
                    .await?
            }
            FishCommands::Remove {
                selector,
                fish_type,
            } => {
                commands::fish::remove(&client, token.as_deref(), selector.choice(), fish_type)
                    .await?
            }
        },
    }

    Ok(())
}
