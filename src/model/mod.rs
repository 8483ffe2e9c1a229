//! Catalog records and their payloads.

pub mod beer;
mod columns;
pub mod customer;

pub use beer::*;
pub use customer::*;
