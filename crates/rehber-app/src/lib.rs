//! HTTP surface of the contact importer.

pub mod app;
pub mod config;
pub mod error;
pub mod middleware;
pub mod store_handler;
