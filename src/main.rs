use clap::Parser;
use fare_engine::application::calculator::FareCalculator;
use fare_engine::application::engine::FareEngine;
use fare_engine::application::multipliers::MultiplierResolver;
use fare_engine::application::resolver::PricingResolver;
use fare_engine::application::zone_fees::ZoneFeeResolver;
use fare_engine::infrastructure::currency::BankersRounding;
use fare_engine::infrastructure::geography::StaticGeography;
use fare_engine::infrastructure::in_memory::{
    InMemoryConfigStore, InMemoryMultiplierStore, InMemoryVersionStore, InMemoryZoneFeeStore,
};
use fare_engine::interfaces::csv::fare_writer::FareWriter;
use fare_engine::interfaces::csv::request_reader::RequestReader;
use fare_engine::interfaces::json::catalog::PricingCatalog;
use fare_engine::telemetry;
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input estimate requests CSV file
    requests: PathBuf,

    /// Pricing catalog JSON fixture (versions, configs, multipliers, fees)
    #[arg(long)]
    catalog: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    telemetry::init();
    let cli = Cli::parse();

    let catalog_file = File::open(&cli.catalog).into_diagnostic()?;
    let catalog = PricingCatalog::from_reader(catalog_file).into_diagnostic()?;

    let versions = InMemoryVersionStore::new();
    let configs = InMemoryConfigStore::new();
    let multipliers = InMemoryMultiplierStore::new();
    let zone_fees = InMemoryZoneFeeStore::new();
    catalog
        .load_into(&versions, &configs, &multipliers, &zone_fees)
        .await
        .into_diagnostic()?;

    let engine = FareEngine::new(
        Box::new(StaticGeography::new(catalog.geofences.clone())),
        PricingResolver::new(Box::new(versions), Box::new(configs)),
        MultiplierResolver::new(Box::new(multipliers)),
        ZoneFeeResolver::new(Box::new(zone_fees)),
        FareCalculator::new(Box::new(BankersRounding::default())),
    );

    let requests_file = File::open(&cli.requests).into_diagnostic()?;
    let reader = RequestReader::new(requests_file);

    let stdout = io::stdout();
    let mut writer = FareWriter::new(stdout.lock());
    for request in reader.requests() {
        match request {
            Ok(request) => match engine.estimate(&request).await {
                Ok(fare) => writer.write_fare(&fare).into_diagnostic()?,
                Err(e) => eprintln!("Error estimating fare: {e}"),
            },
            Err(e) => eprintln!("Error reading request: {e}"),
        }
    }
    writer.flush().into_diagnostic()?;

    Ok(())
}
