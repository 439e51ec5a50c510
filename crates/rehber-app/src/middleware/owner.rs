use salvo::Depot;
use salvo::http::StatusCode;
use salvo::writing::Json;
use tracing::error;

use rehber_core::config::{AuthMethod, Settings};
use rehber_core::error::CoreError;
use rehber_core::types::OwnerRef;

use crate::app::api::ErrorResponse;
use crate::config::get_config_from_depot;
use crate::error::AppResult;

/// Header read in proxy mode when none is configured.
pub const DEFAULT_PROXY_HEADER: &str = "X-Remote-User";

/// ## Summary
/// Determines the owner of the request according to `auth.method`.
///
/// Single-user mode always yields the configured owner. Proxy mode reads the
/// configured header, which an upstream proxy is trusted to set.
///
/// ## Errors
/// Returns `CoreError::NotAuthenticated` when no owner can be determined.
pub fn resolve_owner(req: &salvo::Request, settings: &Settings) -> AppResult<OwnerRef> {
    let owner = match settings.auth.method {
        AuthMethod::SingleUser => settings
            .auth
            .single_user
            .as_ref()
            .map(|single_user| single_user.owner.clone()),
        AuthMethod::Proxy => {
            let header = settings
                .auth
                .proxy
                .as_ref()
                .map_or(DEFAULT_PROXY_HEADER, |proxy| proxy.header.as_str());
            req.header::<String>(header)
        }
    };

    owner
        .and_then(|owner| OwnerRef::new(owner).ok())
        .ok_or_else(|| CoreError::NotAuthenticated.into())
}

/// ## Summary
/// Retrieves the request owner stored by [`OwnerMiddleware`].
///
/// ## Errors
/// Returns an error if the middleware did not run for this route.
pub fn get_owner_from_depot(depot: &Depot) -> AppResult<OwnerRef> {
    depot
        .obtain::<OwnerRef>()
        .cloned()
        .map_err(|_err| CoreError::InvariantViolation("Owner not found in depot").into())
}

/// ## Summary
/// Middleware that resolves the request owner and stores it in the depot.
///
/// ## Errors
/// Responds 401 when no owner can be determined and 500 when the
/// configuration is missing.
pub struct OwnerMiddleware;

#[salvo::async_trait]
impl salvo::Handler for OwnerMiddleware {
    #[tracing::instrument(skip(self, req, depot, res, ctrl), fields(
        method = %req.method(),
        path = %req.uri().path()
    ))]
    async fn handle(
        &self,
        req: &mut salvo::Request,
        depot: &mut Depot,
        res: &mut salvo::Response,
        ctrl: &mut salvo::FlowCtrl,
    ) {
        let config = match get_config_from_depot(depot) {
            Ok(cfg) => cfg,
            Err(e) => {
                error!(error = ?e, "Failed to get config from depot");
                res.status_code(StatusCode::INTERNAL_SERVER_ERROR);
                ctrl.skip_rest();
                return;
            }
        };

        match resolve_owner(req, &config) {
            Ok(owner) => {
                tracing::trace!(owner = %owner, "Owner resolved");
                depot.inject(owner);
            }
            Err(e) => {
                tracing::debug!(error = %e, "Request has no owner");
                res.status_code(StatusCode::UNAUTHORIZED);
                res.render(Json(ErrorResponse {
                    error: "Not authenticated".to_string(),
                }));
                ctrl.skip_rest();
            }
        }
    }
}
