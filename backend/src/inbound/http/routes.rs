//! Route table for the REST API.
//!
//! Both the server binary and integration tests mount handlers through
//! [`configure_api`], so the table under test is the table in production.

use actix_web::error::{PathError, QueryPayloadError};
use actix_web::{HttpRequest, HttpResponse, web};

use crate::domain::Error;

use super::ApiResult;
use super::{bikes, default_intervals, diagnostics, locations, profile, services};

/// Prefix shared by every data route.
pub const API_SCOPE: &str = "/api";

/// Register the API scope, the extractor error handlers, and optionally the
/// diagnostic routes.
///
/// Diagnostics are decided once here; a disabled build never registers them.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use bikecare::inbound::http::routes::configure_api;
///
/// let _app = App::new().configure(|cfg| configure_api(cfg, false));
/// ```
pub fn configure_api(cfg: &mut web::ServiceConfig, diagnostics_enabled: bool) {
    cfg.app_data(web::QueryConfig::default().error_handler(query_error))
        .app_data(web::PathConfig::default().error_handler(path_error));

    let mut api = web::scope(API_SCOPE)
        .service(bikes::list_bikes)
        .service(services::list_services)
        .service(services::create_service)
        .service(services::service_status)
        .service(default_intervals::list_default_intervals)
        .service(profile::get_profile)
        .service(locations::list_locations);
    if diagnostics_enabled {
        api = api.service(diagnostics::scope());
    }
    cfg.service(api);
}

/// Fallback for requests no route matches.
pub async fn unmatched_route() -> ApiResult<HttpResponse> {
    Err(Error::not_found("No route matches this request"))
}

fn query_error(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    Error::invalid_request(format!("invalid query string: {err}")).into()
}

fn path_error(err: PathError, _req: &HttpRequest) -> actix_web::Error {
    Error::invalid_request(format!("invalid path parameter: {err}")).into()
}
