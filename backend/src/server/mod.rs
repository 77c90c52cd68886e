//! Server construction and middleware wiring.

mod config;
#[cfg(feature = "metrics")]
mod metrics;

pub use config::{ServerConfig, ServerSettings, StoreSettings};

use std::sync::Arc;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

use person_api::Trace;
#[cfg(debug_assertions)]
use person_api::doc::ApiDoc;
use person_api::domain::PersonService;
use person_api::domain::ports::PersonRepository;
use person_api::inbound::http::routes::api_scope;
use person_api::inbound::http::state::HttpState;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

fn build_app(
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let app = App::new().app_data(http_state).wrap(Trace);

    // Swagger UI must precede the API scope, whose empty prefix matches every path.
    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app.service(api_scope())
}

/// Construct an Actix HTTP server serving the person API.
///
/// # Parameters
/// - `config`: listen address and per-request store deadline.
/// - `repository`: person store shared by every worker.
///
/// # Returns
/// A spawned [`Server`] that must be awaited to drive the listener. Awaiting
/// it returns once a shutdown signal has been received and in-flight requests
/// have drained.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket or registering
/// metrics fails.
pub fn create_server(
    config: ServerConfig,
    repository: Arc<dyn PersonRepository>,
) -> std::io::Result<Server> {
    let ServerConfig {
        bind_addr,
        request_timeout,
    } = config;
    let http_state = web::Data::new(HttpState::new(PersonService::new(
        repository,
        request_timeout,
    )));

    #[cfg(feature = "metrics")]
    let prometheus = metrics::build_metrics()?;

    let server = HttpServer::new(move || {
        let app = build_app(http_state.clone());

        #[cfg(feature = "metrics")]
        let app = app.wrap(prometheus.clone());

        app
    })
    .bind(bind_addr)?
    .run();

    Ok(server)
}
