mod app_specific;
mod contacts;

use salvo::Router;
use serde::Serialize;

// Re-export route constants from core
pub use rehber_core::constants::{
    API_ROUTE_COMPONENT, API_ROUTE_PREFIX, CONTACTS_ROUTE_COMPONENT, CONTACTS_ROUTE_PREFIX,
    IMPORT_ROUTE_COMPONENT, IMPORT_ROUTE_PREFIX,
};

/// ## Summary
/// Error response payload
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// ## Summary
/// Constructs the main API router.
///
/// ## Errors
/// Returns an error if any child route handler fails to initialize.
pub fn routes() -> anyhow::Result<Router> {
    Ok(Router::with_path(API_ROUTE_COMPONENT)
        .push(app_specific::routes())
        .push(contacts::routes()))
}
