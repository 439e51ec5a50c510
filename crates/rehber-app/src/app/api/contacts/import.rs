//! `POST /api/contacts/import`

use salvo::http::StatusCode;
use salvo::writing::Json;
use salvo::{Depot, Request, Response, handler};
use serde::Serialize;

use rehber_service::contact::{ContactImporter, ImportReport};

use super::upload::read_upload;
use crate::app::api::ErrorResponse;
use crate::config::get_config_from_depot;
use crate::middleware::owner::get_owner_from_depot;
use crate::store_handler::get_store_from_depot;

/// Import response payload
#[derive(Debug, Serialize)]
pub struct ImportResponse {
    pub message: String,
    #[serde(flatten)]
    pub report: ImportReport,
}

fn reject(res: &mut Response, status: StatusCode, error: String) {
    res.status_code(status);
    res.render(Json(ErrorResponse { error }));
}

/// ## Summary
/// Imports an uploaded vCard file for the request owner.
///
/// The file comes from the multipart `file` field, or from the raw body
/// with a `filename` query parameter or a vCard media type.
///
/// ## Side Effects
/// - Persists imported contacts in the contact store
/// - Returns 201 Created with the import report
///
/// ## Errors
/// Returns 400 for a missing, oversized, empty or non-vCard file and 500 when
/// the request context is incomplete or the import task fails.
#[handler]
#[tracing::instrument(skip_all, fields(path = %req.uri().path()))]
pub async fn import(req: &mut Request, res: &mut Response, depot: &Depot) {
    let (config, store, owner) = match (
        get_config_from_depot(depot),
        get_store_from_depot(depot),
        get_owner_from_depot(depot),
    ) {
        (Ok(config), Ok(store), Ok(owner)) => (config, store, owner),
        (config, store, owner) => {
            tracing::error!(
                config = config.is_ok(),
                store = store.is_ok(),
                owner = owner.is_ok(),
                "Request context incomplete"
            );
            res.status_code(StatusCode::INTERNAL_SERVER_ERROR);
            return;
        }
    };

    let max_bytes = config.import.max_upload_bytes;
    let upload = match read_upload(req, max_bytes).await {
        Ok(upload) => upload,
        Err(rejection) => {
            tracing::debug!(%rejection, "Upload rejected");
            reject(res, StatusCode::BAD_REQUEST, rejection.to_string());
            return;
        }
    };

    if let Err(rejection) = upload.validate(max_bytes) {
        tracing::debug!(%rejection, filename = ?upload.filename, "Upload rejected");
        reject(res, StatusCode::BAD_REQUEST, rejection.to_string());
        return;
    }

    tracing::info!(owner = %owner, bytes = upload.bytes.len(), "Importing vCard upload");

    let import_config = config.import.clone();
    let result = tokio::task::spawn_blocking(move || {
        ContactImporter::from_config(store, &import_config).import_bytes(&upload.bytes, &owner)
    })
    .await;

    match result {
        Ok(report) => {
            res.status_code(StatusCode::CREATED);
            res.render(Json(ImportResponse {
                message: report.summary(),
                report,
            }));
        }
        Err(e) => {
            tracing::error!(error = %e, "Import task failed");
            reject(res, StatusCode::INTERNAL_SERVER_ERROR, "Import failed".to_string());
        }
    }
}
