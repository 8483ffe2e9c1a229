//! # Brewery Catalog Demo
//!
//! Starts the catalog on the configured backend, seeds it, and walks through the service API:
//! a filtered listing, a create, a patch, a listing with inventory hidden, and a delete.
//!
//! ```bash
//! RUST_LOG=info cargo run
//! BREWERY_BACKEND=sqlite RUST_LOG=debug cargo run -- --database /tmp/brewery.db
//! RUST_LOG=info cargo run -- --beer-csv tests/fixtures/beers.csv
//! ```

use brewery::config::Cli;
use brewery::lifecycle::{setup_tracing, CatalogError, CatalogSystem};
use brewery::model::{BeerCreate, BeerPatch, BeerStyle};
use brewery::seed;
use clap::Parser;
use rust_decimal::Decimal;
use tracing::{info, warn, Instrument};

#[tokio::main]
async fn main() -> Result<(), CatalogError> {
    // Setup tracing once for the entire application
    setup_tracing();

    let config = Cli::parse().into_config()?;
    info!(backend = ?config.backend, seed = config.seed, "Starting brewery catalog");

    let system = CatalogSystem::start(&config)?;
    if config.seed {
        system.seed().await?;
    }
    if let Some(path) = &config.beer_csv {
        seed::import_beer_csv(&system.beer_service, path).await?;
    }

    let beers = &system.beer_service;

    let span = tracing::info_span!("catalog_tour");
    async {
        let pale_ales = beers
            .list_beers(None, Some(BeerStyle::PaleAle), None, None, None)
            .await?;
        info!(
            total = pale_ales.total_elements,
            pages = pale_ales.total_pages(),
            "Pale ales on tap"
        );

        let created = beers
            .save_new_beer(BeerCreate {
                beer_name: "Sunset Gose".to_string(),
                beer_style: BeerStyle::Gose,
                upc: "0631234200036".to_string(),
                price: Decimal::new(899, 2),
                quantity_on_hand: Some(48),
            })
            .await?;
        info!(location = %created.location(), "Beer created");

        let patch = BeerPatch {
            price: Some(Decimal::new(949, 2)),
            ..Default::default()
        };
        match beers.patch_beer_by_id(created.id, patch).await? {
            Some(patched) => info!(version = patched.version, price = %patched.price, "Beer patched"),
            None => warn!(id = %created.id, "Beer vanished before patch"),
        }

        let hidden = beers
            .list_beers(Some("cat".to_string()), None, Some(false), Some(1), Some(10))
            .await?;
        for beer in hidden.iter() {
            info!(name = %beer.beer_name, quantity = ?beer.quantity_on_hand, "Listed without inventory");
        }

        let deleted = beers.delete_beer_by_id(created.id).await?;
        info!(deleted, "Beer removed");

        let customers = system
            .customer_service
            .list_customers(None, None, None)
            .await?;
        info!(total = customers.total_elements, "Customers on file");

        Ok::<(), CatalogError>(())
    }
    .instrument(span)
    .await?;

    // Shutdown system gracefully
    system.shutdown().await?;

    info!("Application completed successfully");
    Ok(())
}
