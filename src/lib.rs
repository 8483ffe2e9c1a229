//! # Brewery Catalog
//!
//! CRUD access to a catalog of beers and customers over a swappable storage backend.
//!
//! The interesting part is the service layer: it normalizes paging input, picks one of four
//! lookup shapes from whichever filters are populated, hides inventory on request, and merges
//! partial updates under "only overwrite what was sent" rules. The same service code runs on an
//! in-memory store actor or on SQLite, and both return identical pages for identical data.
//!
//! ## Module Tour
//!
//! ### 1. Records ([`model`], [`resource`])
//! [`Beer`](model::Beer) and [`Customer`](model::Customer), their create/update/patch payloads,
//! and the [`Resource`](resource::Resource) trait that lets one service implementation handle
//! both.
//!
//! ### 2. The Engine ([`merge`], [`service`])
//! - [`merge`]: pure patch and replace
//! - [`service::query`]: page normalization
//! - [`service::dispatch`]: lookup selection and inventory redaction
//! - [`service::ResourceService`]: the generic CRUD + query flow, with
//!   [`BeerService`](service::BeerService) and [`CustomerService`](service::CustomerService) on top
//!
//! ### 3. The Orchestrator ([`lifecycle`], [`config`], [`seed`], [`csv_import`])
//! Picks the backend from configuration, wires the services, seeds (optionally from a beer CSV
//! file), and shuts down cleanly.
//!
//! Storage itself lives in the `record-store` crate.
//!
//! ## Quick Start
//!
//! ```bash
//! RUST_LOG=info cargo run
//! RUST_LOG=info cargo run -- --backend sqlite --database /tmp/brewery.db
//! ```
//!
//! ### Running Tests
//!
//! ```bash
//! cargo test --workspace
//! ```

pub mod config;
pub mod csv_import;
pub mod lifecycle;
pub mod merge;
pub mod model;
pub mod resource;
pub mod seed;
pub mod service;
