use crate::config::{Backend, CatalogConfig};
use crate::lifecycle::CatalogError;
use crate::model::{Beer, Customer};
use crate::seed;
use crate::service::{BeerService, CustomerService, ResourceService};
use record_store::sqlite::{open_connection, open_in_memory_connection};
use record_store::{EntityStore, SharedConnection, SqliteStore, StoreActor};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{error, info};

/// Channel capacity of each in-memory store actor.
const STORE_BUFFER: usize = 32;

/// The composition root of the brewery catalog.
///
/// `CatalogSystem` is responsible for:
/// - **Backend Selection**: building either store actors or SQLite stores from [`CatalogConfig`]
/// - **Service Wiring**: handing each service its `Arc<dyn EntityStore<_>>`
/// - **Lifecycle Management**: stopping the store actors and waiting for them on shutdown
///
/// # Example
///
/// ```ignore
/// let system = CatalogSystem::start(&CatalogConfig::default())?;
/// system.seed().await?;
///
/// let page = system.beer_service.list_beers(None, None, None, None, None).await?;
///
/// system.shutdown().await?;
/// ```
pub struct CatalogSystem {
    pub beer_service: BeerService,
    pub customer_service: CustomerService,

    /// Store actor tasks (empty for the SQLite backend).
    handles: Vec<JoinHandle<()>>,
}

impl CatalogSystem {
    /// Builds the stores for the configured backend and wires the services on top.
    ///
    /// Must be called inside a Tokio runtime: the memory backend spawns its actors here.
    pub fn start(config: &CatalogConfig) -> Result<Self, CatalogError> {
        let (beers, customers, handles) = match &config.backend {
            Backend::Memory => {
                let (beer_actor, beer_store) = StoreActor::<Beer>::new(STORE_BUFFER);
                let (customer_actor, customer_store) = StoreActor::<Customer>::new(STORE_BUFFER);
                let handles = vec![
                    tokio::spawn(beer_actor.run()),
                    tokio::spawn(customer_actor.run()),
                ];
                let beers: Arc<dyn EntityStore<Beer>> = Arc::new(beer_store);
                let customers: Arc<dyn EntityStore<Customer>> = Arc::new(customer_store);
                (beers, customers, handles)
            }
            Backend::Sqlite { path } => {
                let (beers, customers) = sqlite_stores(open_connection(path)?)?;
                (beers, customers, Vec::new())
            }
            Backend::SqliteInMemory => {
                let (beers, customers) = sqlite_stores(open_in_memory_connection()?)?;
                (beers, customers, Vec::new())
            }
        };
        info!(backend = ?config.backend, "Catalog started");

        Ok(Self {
            beer_service: BeerService::new(ResourceService::new(beers)),
            customer_service: CustomerService::new(ResourceService::new(customers)),
            handles,
        })
    }

    /// Loads the sample catalog into whichever stores are still empty.
    pub async fn seed(&self) -> Result<(), CatalogError> {
        let beers = seed::seed_beers(&self.beer_service).await?;
        let customers = seed::seed_customers(&self.customer_service).await?;
        info!(beers, customers, "Seeded catalog");
        Ok(())
    }

    /// Gracefully shuts down the catalog.
    ///
    /// Dropping the services closes the store actors' channels; each actor logs its final size
    /// and exits. Clones of the services held elsewhere keep their actors alive, so drop those
    /// first.
    pub async fn shutdown(self) -> Result<(), CatalogError> {
        info!("Shutting down catalog...");

        drop(self.beer_service);
        drop(self.customer_service);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Store task failed: {:?}", e);
                return Err(CatalogError::TaskFailed(e.to_string()));
            }
        }

        info!("Catalog shutdown complete.");
        Ok(())
    }
}

/// Both resource tables on one shared connection.
fn sqlite_stores(
    conn: SharedConnection,
) -> Result<(Arc<dyn EntityStore<Beer>>, Arc<dyn EntityStore<Customer>>), CatalogError> {
    let beers: Arc<dyn EntityStore<Beer>> =
        Arc::new(SqliteStore::<Beer>::from_shared(Arc::clone(&conn))?);
    let customers: Arc<dyn EntityStore<Customer>> =
        Arc::new(SqliteStore::<Customer>::from_shared(conn)?);
    Ok((beers, customers))
}
