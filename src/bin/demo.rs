//! Demonstration driver: walks a small fleet through loading, emptying,
//! replacing, and transferring containers.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use u_stowage::manifest::FleetManifest;
use u_stowage::models::{
    Container, ContainerShip, ContainerSpec, LiquidCargo, ProductType, TransferError,
};
use u_stowage::serial::SerialGenerator;

#[derive(Parser)]
#[command(
    name = "stowage-demo",
    about = "Container stowage demonstration: per-kind loading rules and ship capacity limits"
)]
struct Cli {
    /// Fleet manifest (JSON) to build instead of the built-in demonstration fleet
    #[arg(long)]
    manifest: Option<PathBuf>,

    /// Seed for serial number generation, for reproducible output
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let mut serials = match cli.seed {
        Some(seed) => SerialGenerator::with_seed(seed),
        None => SerialGenerator::new(),
    };

    match cli.manifest {
        Some(path) => {
            let json = fs::read_to_string(&path)
                .with_context(|| format!("reading manifest {}", path.display()))?;
            let ships = FleetManifest::from_json(&json)?.build(&mut serials)?;
            for ship in &ships {
                println!("{ship}");
            }
        }
        None => run_demo(&mut serials)?,
    }
    Ok(())
}

fn run_demo(serials: &mut SerialGenerator) -> Result<()> {
    let mut horizon = ContainerShip::new("Horizon", 25.0, 20, 30.0);
    let mut meridian = ContainerShip::new("Meridian", 22.0, 2, 0.2);

    // A hazardous liquid container: its ceiling is half the 200 kg payload.
    let mut liquid = Container::liquid(
        ContainerSpec::new(100.0, 200.0, 250.0, 600.0),
        LiquidCargo::Hazardous,
        serials,
    );
    liquid.load(20.0)?;
    // 150 kg exceeds the 100 kg ceiling: rejected with a hazard notification.
    let _ = liquid.load(150.0);

    // A gas container keeps 5% of its mass when emptied.
    let mut gas = Container::gas(ContainerSpec::new(10.0, 30.0, 100.0, 100.0), 2.0, serials);
    gas.load(10.0)?;
    gas.empty();

    // A refrigerated container pre-cooled for its product.
    let bananas = Arc::new(ProductType::new("Bananas", 13.3));
    let mut reefer = Container::refrigerated(
        ContainerSpec::new(120.0, 300.0, 250.0, 600.0),
        Arc::clone(&bananas),
        serials,
    );
    reefer.load(80.0)?;
    // Warmer than the product tolerates: rejected.
    let _ = reefer.set_temperature(15.0);
    reefer
        .set_temperature(12.0)
        .context("cooling the banana container")?;

    let liquid_serial = liquid.serial().clone();
    let gas_serial = gas.serial().clone();
    let reefer_serial = reefer.serial().clone();

    let rejections = horizon.load_containers(vec![liquid, gas, reefer]);
    anyhow::ensure!(
        rejections.is_empty(),
        "the demonstration containers should all fit aboard Horizon"
    );

    // Swapping a slot does not re-check the limits; slot 9 does not exist.
    let spare = Container::gas(ContainerSpec::new(10.0, 30.0, 100.0, 100.0), 2.0, serials);
    let spare = match horizon.replace_container(9, spare) {
        Err(invalid) => invalid.container,
        Ok(displaced) => displaced,
    };
    let displaced = match horizon.replace_container(0, spare) {
        Ok(displaced) => displaced,
        Err(invalid) => invalid.container,
    };
    horizon.load_container(displaced)?;

    // Meridian has two slots and a 200 kg limit.
    horizon.transfer_container(&gas_serial, &mut meridian)?;
    horizon.transfer_container(&liquid_serial, &mut meridian)?;

    // Both slots are taken now; the transfer is refused, and the container
    // has still left the source. Take it back aboard explicitly.
    if let Err(TransferError::Rejected(rejection)) =
        horizon.transfer_container(&reefer_serial, &mut meridian)
    {
        println!(
            "{} is aboard neither ship after the refused transfer; returning it to {}",
            rejection.container.serial(),
            horizon.name(),
        );
        horizon.load_container(rejection.container)?;
    }

    println!("{horizon}");
    println!("{meridian}");
    Ok(())
}
