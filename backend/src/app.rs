//! Application assembly shared by the server binary and integration tests.

use std::sync::Arc;

use actix_web::body::MessageBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::domain::ports::IdentityProvider;
use crate::inbound::http::health::{HealthState, live, ready};
use crate::inbound::http::routes::{configure_api, unmatched_route};
use crate::inbound::http::state::HttpState;
use crate::middleware::{Authenticate, CatchPanic, Trace};

/// Everything a worker needs to build its application instance.
#[derive(Clone)]
pub struct AppDependencies {
    pub health_state: web::Data<HealthState>,
    pub http_state: web::Data<HttpState>,
    pub identity: Arc<dyn IdentityProvider>,
    pub diagnostics_enabled: bool,
}

/// Build the Actix application: health checks, API routes, and middleware.
///
/// Middleware runs outermost first: [`Trace`], then [`CatchPanic`], then
/// [`Authenticate`].
pub fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        identity,
        diagnostics_enabled,
    } = deps;

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .service(ready)
        .service(live)
        .configure(|cfg| configure_api(cfg, diagnostics_enabled));

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app.default_service(web::to(unmatched_route))
        .wrap(Authenticate::new(identity))
        .wrap(CatchPanic)
        .wrap(Trace)
}
