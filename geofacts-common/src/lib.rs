//! # geofacts common library
//!
//! Shared code for the geofacts API service and extraction tools:
//! - Error type used across crates
//! - Layered configuration (CLI → ENV → TOML → defaults)
//! - PostgreSQL pool, schema creation and migrations
//! - Row models served by the API
//! - Reference data: country assignment CSV and glossary CSV

pub mod config;
pub mod countries;
pub mod csv;
pub mod db;
pub mod error;
pub mod glossary;

pub use error::{Error, Result};
