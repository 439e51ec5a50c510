//! `GET /api/contacts`

use salvo::http::StatusCode;
use salvo::writing::Json;
use salvo::{Depot, Response, handler};

use crate::middleware::owner::get_owner_from_depot;
use crate::store_handler::get_store_from_depot;

/// ## Summary
/// Returns every stored contact of the request owner as JSON.
///
/// ## Errors
/// Returns 500 if the store is missing or fails.
#[handler]
pub async fn list(res: &mut Response, depot: &Depot) {
    let contacts = get_store_from_depot(depot).and_then(|store| {
        let owner = get_owner_from_depot(depot)?;
        Ok(store.list(&owner)?)
    });

    match contacts {
        Ok(contacts) => res.render(Json(contacts)),
        Err(e) => {
            tracing::error!(error = %e, "Failed to list contacts");
            res.status_code(StatusCode::INTERNAL_SERVER_ERROR);
        }
    }
}
