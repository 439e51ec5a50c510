//! Shared configuration, constants and error types for the rehber workspace.

pub mod config;
pub mod constants;
pub mod error;
pub mod types;
