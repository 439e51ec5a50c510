//! Contact import and listing endpoints.

use salvo::Router;

use rehber_core::constants::{CONTACTS_ROUTE_COMPONENT, IMPORT_ROUTE_COMPONENT};

use crate::middleware::owner::OwnerMiddleware;

mod import;
mod list;
mod upload;

#[must_use]
pub fn routes() -> Router {
    Router::with_path(CONTACTS_ROUTE_COMPONENT)
        .hoop(OwnerMiddleware)
        .get(list::list)
        .push(Router::with_path(IMPORT_ROUTE_COMPONENT).post(import::import))
}
