//! Sample catalog loaded at startup.
//!
//! Seeding goes through the services, so seeded records get ids, versions and timestamps like
//! any other. A store that already holds records is left alone.

use crate::csv_import::convert_csv;
use crate::lifecycle::CatalogError;
use crate::model::{BeerCreate, BeerStyle, CustomerCreate};
use crate::service::{BeerService, CustomerService, ServiceError};
use rust_decimal::Decimal;
use std::path::Path;
use tracing::{debug, info};

pub fn sample_beers() -> Vec<BeerCreate> {
    vec![
        BeerCreate {
            beer_name: "Galaxy Cat".to_string(),
            beer_style: BeerStyle::PaleAle,
            upc: "123123123123".to_string(),
            price: Decimal::new(1295, 2),
            quantity_on_hand: Some(200),
        },
        BeerCreate {
            beer_name: "Crank".to_string(),
            beer_style: BeerStyle::PaleAle,
            upc: "123123123".to_string(),
            price: Decimal::new(1195, 2),
            quantity_on_hand: Some(200),
        },
        BeerCreate {
            beer_name: "No Hammers On The Bar".to_string(),
            beer_style: BeerStyle::PaleAle,
            upc: "123123123".to_string(),
            price: Decimal::new(1195, 2),
            quantity_on_hand: Some(200),
        },
    ]
}

pub fn sample_customers() -> Vec<CustomerCreate> {
    ["Customer 1", "Customer 2", "Customer 3"]
        .into_iter()
        .map(|name| CustomerCreate {
            customer_name: name.to_string(),
        })
        .collect()
}

/// Returns how many beers were added.
pub async fn seed_beers(service: &BeerService) -> Result<usize, ServiceError> {
    if service.count().await? > 0 {
        debug!("Beer store not empty, skipping seed");
        return Ok(0);
    }
    let beers = sample_beers();
    let added = beers.len();
    for beer in beers {
        service.save_new_beer(beer).await?;
    }
    Ok(added)
}

/// Adds every beer in a CSV file, whether or not the store already holds records.
///
/// Returns how many beers were added. The file is parsed completely before anything is saved,
/// so a malformed file adds nothing.
pub async fn import_beer_csv(
    service: &BeerService,
    path: &Path,
) -> Result<usize, CatalogError> {
    let records = convert_csv(path)?;
    for record in &records {
        service.save_new_beer(record.to_beer_create()).await?;
    }
    info!(path = %path.display(), added = records.len(), "Imported beers");
    Ok(records.len())
}

/// Returns how many customers were added.
pub async fn seed_customers(service: &CustomerService) -> Result<usize, ServiceError> {
    if service.count().await? > 0 {
        debug!("Customer store not empty, skipping seed");
        return Ok(0);
    }
    let customers = sample_customers();
    let added = customers.len();
    for customer in customers {
        service.save_new_customer(customer).await?;
    }
    Ok(added)
}
