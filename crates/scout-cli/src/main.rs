mod analyze;
mod device;
mod flow;
mod render;
mod wizard;

use clap::{ArgGroup, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "scout")]
#[command(about = "Market Scout: location viability for vending equipment")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List the equipment catalog
    Machines,
    /// Analyse one site for one machine
    #[command(group(
        ArgGroup::new("site")
            .required(true)
            .args(["address", "lat", "here"])
    ))]
    Analyze {
        /// Machine id from `scout machines`
        #[arg(long)]
        machine: String,
        /// Free-text address to geocode
        #[arg(long)]
        address: Option<String>,
        /// Latitude in decimal degrees
        #[arg(long, requires = "lon", allow_negative_numbers = true)]
        lat: Option<f64>,
        /// Longitude in decimal degrees
        #[arg(long, requires = "lat", allow_negative_numbers = true)]
        lon: Option<f64>,
        /// Use the device position from `SCOUT_DEVICE_COORDS`
        #[arg(long)]
        here: bool,
        /// Search radius in metres (overrides `SCOUT_SEARCH_RADIUS_M`)
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        radius: Option<u32>,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Step through machine, location and verdict interactively
    Wizard,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    dotenvy::dotenv().ok();
    let config = scout_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let catalog = scout_core::load_catalog(config.catalog_path.as_deref())?;

    match cli.command {
        Some(Commands::Machines) | None => render::print_machines(&catalog),
        Some(Commands::Analyze {
            machine,
            address,
            lat,
            lon,
            here,
            radius,
            json,
        }) => {
            let site = analyze::Site::from_args(address, lat.zip(lon), here)?;
            let request = analyze::AnalyzeRequest {
                machine_id: machine,
                site,
                radius_m: radius,
                json,
            };
            analyze::run_analyze(&config, &catalog, request).await?;
        }
        Some(Commands::Wizard) => wizard::run_wizard(&config, &catalog).await?,
    }

    Ok(())
}

#[cfg(test)]
mod tests;
