//! Route table for the person API.
//!
//! ```text
//! POST        /person       create_person
//! GET         /person       list_persons (with or without ?page=N)
//! GET         /person/{id}  get_person
//! PATCH, PUT  /person/{id}  update_person
//! ```
//!
//! Other methods on these paths answer 405 and unknown paths answer 404,
//! both with an envelope body.

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{HttpResponse, Scope, web};

use crate::domain::Error;
use crate::inbound::http::ApiResult;
use crate::inbound::http::persons::{create_person, get_person, list_persons, update_person};
use crate::inbound::http::validation::json_config;
use crate::middleware::JsonContentType;

/// Register the person resources on an app or scope.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use person_api::inbound::http::routes;
///
/// let app = App::new()
///     .configure(routes::configure)
///     .default_service(web::to(routes::route_not_found));
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/person")
            .app_data(json_config())
            .route(web::get().to(list_persons))
            .route(web::post().to(create_person))
            .default_service(web::to(method_not_allowed)),
    )
    .service(
        web::resource("/person/{id}")
            .app_data(json_config())
            .route(web::get().to(get_person))
            .route(web::patch().to(update_person))
            .route(web::put().to(update_person))
            .default_service(web::to(method_not_allowed)),
    );
}

/// Root scope serving the person API with its JSON content type and
/// envelope fallbacks.
///
/// Register it after any non-JSON services (such as Swagger UI) because the
/// empty prefix matches every path.
pub fn api_scope() -> Scope<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    web::scope("")
        .wrap(JsonContentType)
        .configure(configure)
        .default_service(web::to(route_not_found))
}

/// Fallback for a known path requested with an unsupported method.
pub async fn method_not_allowed() -> ApiResult<HttpResponse> {
    Err(Error::method_not_allowed("method not allowed"))
}

/// Fallback for paths outside the route table.
pub async fn route_not_found() -> ApiResult<HttpResponse> {
    Err(Error::not_found("route not found"))
}
