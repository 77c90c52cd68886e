//! Shared HTTP harness: the production middleware stack and route table over
//! the in-memory store.

use std::sync::Arc;
use std::time::Duration;

use actix_http::Request;
use actix_web::body::BoxBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::test::{self, TestRequest};
use actix_web::{App, web};
use person_api::Trace;
use person_api::domain::PersonService;
use person_api::domain::ports::{IndexManager, UniqueIndex};
use person_api::inbound::http::routes::api_scope;
use person_api::inbound::http::state::HttpState;
use person_api::outbound::memory::InMemoryPersonRepository;
use serde_json::Value;

/// Store with the `(username, email)` unique index in place.
pub async fn indexed_store() -> InMemoryPersonRepository {
    let store = InMemoryPersonRepository::new();
    store
        .ensure_unique_index(&UniqueIndex::person())
        .await
        .expect("index on empty store");
    store
}

/// Initialise the full application over `store`.
pub async fn init_app(
    store: &InMemoryPersonRepository,
) -> impl Service<Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error> {
    let service = PersonService::new(Arc::new(store.clone()), Duration::from_secs(5));
    test::init_service(
        App::new()
            .app_data(web::Data::new(HttpState::new(service)))
            .wrap(Trace)
            .service(api_scope()),
    )
    .await
}

/// Response as seen by a client.
pub struct Reply {
    pub status: StatusCode,
    pub headers: actix_web::http::header::HeaderMap,
    pub body: Value,
}

/// Dispatch `request` and decode the envelope body.
pub async fn send<S>(app: &S, request: TestRequest) -> Reply
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error>,
{
    let response = test::call_service(app, request.to_request()).await;
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = test::read_body(response).await;
    let body: Value = serde_json::from_slice(&bytes).expect("envelope body is JSON");
    assert_eq!(
        body["status"].as_u64(),
        Some(u64::from(status.as_u16())),
        "envelope status mirrors HTTP status: {body}"
    );
    Reply {
        status,
        headers,
        body,
    }
}
