//! Sales Facade
//!
//! High-level API for the sales forecasting service. Re-exports all public
//! types from the sales stack for convenient usage.

// Re-export everything from API (which includes SPI and core)
pub use sales_api::*;

// Explicit re-exports for documentation
pub use sales_api::prelude;

// Re-export the loader at root
pub use sales_core::load_model;

// Re-export SPI contract
pub use sales_spi::contract;
