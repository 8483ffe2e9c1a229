//! # Observability & Tracing
//!
//! [`setup_tracing`] initializes structured logging for the whole catalog.
//!
//! ## Configuration
//!
//! The compact format hides the module prefix (`with_target(false)`); stores log an
//! `entity_type` or `table` field instead, and services log `kind`.
//!
//! ```bash
//! # Lifecycle and mutations
//! RUST_LOG=info cargo run
//!
//! # Every request with its arguments, plus store-level lookups
//! RUST_LOG=debug cargo run
//!
//! # Only the store crate
//! RUST_LOG=record_store=debug cargo run
//! ```
//!
//! ## What Gets Traced
//!
//! - **Store Lifecycle**: `Store started` and `Shutdown` with the final record count
//! - **Mutations**: `Created`, `Replaced`, `Patched`, `Deleted` at `info`
//! - **Not Found**: replace, patch, delete or get on an unknown id at `warn`
//! - **Queries**: lookup shape, page and total at `debug`
//!
//! With `RUST_LOG=debug` a patch looks like:
//!
//! ```text
//! DEBUG patch_beer_by_id{id=5c1f… beer=BeerPatch { beer_name: Some("New"), .. }}: Sending request
//! DEBUG patch_beer_by_id{…}: Find entity_type="Beer" id=5c1f… found=true
//!  INFO patch_beer_by_id{…}: Saved entity_type="Beer" id=5c1f… replaced=true size=3
//!  INFO patch_beer_by_id{…}: Patched kind="beer" id=5c1f…
//! ```

pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false) // Don't show module paths - we log entity_type / kind instead
        .compact() // Compact format shows spans inline (e.g., "list_beers{...}: List")
        .init();
}
