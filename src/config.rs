//! # Configuration
//!
//! Command-line flags (with environment fallbacks) and the [`CatalogConfig`] the composition
//! root is started from. The backend is chosen here, once, before anything is spawned.

use crate::lifecycle::CatalogError;
use clap::Parser;
use std::path::PathBuf;

/// Brewery catalog demo.
#[derive(Parser, Debug)]
#[command(name = "brewery", about = "Brewery catalog over a swappable record store")]
pub struct Cli {
    /// Storage backend: `memory` or `sqlite`.
    #[arg(long, env = "BREWERY_BACKEND", default_value = "memory")]
    pub backend: String,

    /// SQLite database file (only used by the `sqlite` backend).
    #[arg(long, env = "BREWERY_DATABASE", default_value = "brewery.db")]
    pub database: PathBuf,

    /// Start with empty stores instead of the sample catalog.
    #[arg(long)]
    pub no_seed: bool,

    /// Import beers from a CSV file after seeding.
    #[arg(long, env = "BREWERY_BEER_CSV")]
    pub beer_csv: Option<PathBuf>,
}

impl Cli {
    pub fn into_config(self) -> Result<CatalogConfig, CatalogError> {
        let backend = match self.backend.trim().to_ascii_lowercase().as_str() {
            "memory" => Backend::Memory,
            "sqlite" => Backend::Sqlite {
                path: self.database,
            },
            other => return Err(CatalogError::UnknownBackend(other.to_string())),
        };
        Ok(CatalogConfig {
            backend,
            seed: !self.no_seed,
            beer_csv: self.beer_csv,
        })
    }
}

/// Which [`EntityStore`](record_store::EntityStore) implementation backs the services.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Backend {
    /// One `StoreActor` task per resource.
    Memory,
    /// One SQLite file shared by every resource table.
    Sqlite { path: PathBuf },
    /// A private in-memory SQLite database. Used by tests.
    SqliteInMemory,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    pub backend: Backend,
    /// Load the sample catalog into empty stores at startup.
    pub seed: bool,
    pub beer_csv: Option<PathBuf>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            backend: Backend::Memory,
            seed: true,
            beer_csv: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_select_seeded_memory_backend() {
        let config = Cli::try_parse_from(["brewery"]).unwrap().into_config().unwrap();
        assert_eq!(config, CatalogConfig::default());
    }

    #[test]
    fn test_sqlite_backend_uses_database_path() {
        let config = Cli::try_parse_from([
            "brewery",
            "--backend",
            "SQLite",
            "--database",
            "/tmp/cellar.db",
            "--no-seed",
            "--beer-csv",
            "beers.csv",
        ])
        .unwrap()
        .into_config()
        .unwrap();
        assert_eq!(
            config.backend,
            Backend::Sqlite {
                path: PathBuf::from("/tmp/cellar.db")
            }
        );
        assert!(!config.seed);
        assert_eq!(config.beer_csv, Some(PathBuf::from("beers.csv")));
    }

    #[test]
    fn test_unknown_backend_is_rejected() {
        let result = Cli::try_parse_from(["brewery", "--backend", "postgres"])
            .unwrap()
            .into_config();
        assert!(matches!(result, Err(CatalogError::UnknownBackend(name)) if name == "postgres"));
    }
}
