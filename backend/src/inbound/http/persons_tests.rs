//! Handler tests for the person endpoints over the in-memory store.

use std::sync::Arc;
use std::time::Duration;

use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use rstest::{fixture, rstest};
use serde_json::{Value, json};

use crate::domain::PersonService;
use crate::domain::ports::{IndexManager, PersonRepositoryError, UniqueIndex};
use crate::inbound::http::routes;
use crate::inbound::http::state::HttpState;
use crate::outbound::memory::InMemoryPersonRepository;

const ABSENT_ID: &str = "5f1b0c2e9d3a4b5c6d7e8f90";

#[fixture]
fn repo() -> InMemoryPersonRepository {
    InMemoryPersonRepository::new()
}

fn test_app(
    repo: &InMemoryPersonRepository,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    > + use<>,
> {
    let service = PersonService::new(Arc::new(repo.clone()), Duration::from_secs(5));
    App::new()
        .app_data(web::Data::new(HttpState::new(service)))
        .configure(routes::configure)
        .default_service(web::to(routes::route_not_found))
}

async fn send(
    repo: &InMemoryPersonRepository,
    request: actix_test::TestRequest,
) -> (StatusCode, Value) {
    let app = actix_test::init_service(test_app(repo)).await;
    let response = actix_test::call_service(&app, request.to_request()).await;
    let status = response.status();
    let body = actix_test::read_body(response).await;
    let value: Value = serde_json::from_slice(&body).expect("envelope body");
    assert_eq!(
        value.get("status").and_then(Value::as_u64),
        Some(u64::from(status.as_u16())),
        "envelope status mirrors HTTP status"
    );
    (status, value)
}

async fn create(repo: &InMemoryPersonRepository, body: Value) -> String {
    let (status, value) = send(
        repo,
        actix_test::TestRequest::post().uri("/person").set_json(body),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{value}");
    value["content"]["_id"]
        .as_str()
        .expect("identity in content")
        .to_owned()
}

#[rstest]
#[actix_web::test]
async fn create_returns_document_with_identity(repo: InMemoryPersonRepository) {
    let (status, value) = send(
        &repo,
        actix_test::TestRequest::post().uri("/person").set_json(json!({
            "first_name": "john",
            "username": "john_doe",
            "data": { "age": 42 }
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(value["message"], "");
    let content = &value["content"];
    assert_eq!(content["first_name"], "john");
    assert_eq!(content["data"], json!({ "age": 42 }));
    assert!(content.get("last_name").is_none(), "absent fields omitted");
    assert_eq!(content["_id"].as_str().map(str::len), Some(24));
}

#[rstest]
#[actix_web::test]
async fn create_ignores_client_identity(repo: InMemoryPersonRepository) {
    let id = create(&repo, json!({ "_id": ABSENT_ID, "username": "x" })).await;
    assert_ne!(id, ABSENT_ID);
}

#[rstest]
#[case("{\"username\": ")]
#[case("[1, 2]")]
#[case("\"text\"")]
#[actix_web::test]
async fn create_rejects_malformed_bodies(repo: InMemoryPersonRepository, #[case] body: &str) {
    let (status, value) = send(
        &repo,
        actix_test::TestRequest::post()
            .uri("/person")
            .insert_header(("content-type", "application/json"))
            .set_payload(body.to_owned()),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(value["content"], Value::Null);
    assert!(repo.is_empty());
}

#[rstest]
#[actix_web::test]
async fn create_accepts_body_without_content_type(repo: InMemoryPersonRepository) {
    let (status, _) = send(
        &repo,
        actix_test::TestRequest::post()
            .uri("/person")
            .set_payload(r#"{"username":"plain"}"#),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
}

#[rstest]
#[actix_web::test]
async fn duplicate_create_is_not_acceptable(repo: InMemoryPersonRepository) {
    repo.ensure_unique_index(&UniqueIndex::person())
        .await
        .expect("index");
    let body = json!({ "username": "john_doe", "email": "john@example.com" });
    create(&repo, body.clone()).await;

    let (status, value) = send(
        &repo,
        actix_test::TestRequest::post().uri("/person").set_json(body),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_ACCEPTABLE);
    assert_eq!(value["message"], "username or email already exists");
    assert_eq!(repo.len(), 1);
}

#[rstest]
#[actix_web::test]
async fn get_with_malformed_id_never_reaches_store(repo: InMemoryPersonRepository) {
    let (status, value) =
        send(&repo, actix_test::TestRequest::get().uri("/person/not-an-id")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(value["content"], Value::Null);
    assert_eq!(repo.call_count(), 0);
}

#[rstest]
#[actix_web::test]
async fn get_absent_person_is_not_found(repo: InMemoryPersonRepository) {
    let (status, value) = send(
        &repo,
        actix_test::TestRequest::get().uri(&format!("/person/{ABSENT_ID}")),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(value["message"], "person not found");
}

#[rstest]
#[actix_web::test]
async fn get_returns_created_fields(repo: InMemoryPersonRepository) {
    let id = create(&repo, json!({ "last_name": "doe", "email": "d@x" })).await;

    let (status, value) = send(
        &repo,
        actix_test::TestRequest::get().uri(&format!("/person/{id}")),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        value["content"],
        json!({ "_id": id, "last_name": "doe", "email": "d@x" })
    );
}

#[rstest]
#[actix_web::test]
async fn empty_collection_lists_as_empty_array(repo: InMemoryPersonRepository) {
    let (status, value) = send(&repo, actix_test::TestRequest::get().uri("/person")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(value["content"], json!([]));
}

#[rstest]
#[actix_web::test]
async fn update_echoes_submitted_fields(repo: InMemoryPersonRepository) {
    let id = create(&repo, json!({ "username": "u", "email": "old@x" })).await;

    let (status, value) = send(
        &repo,
        actix_test::TestRequest::patch()
            .uri(&format!("/person/{id}"))
            .set_json(json!({ "email": "x@y.com" })),
    )
    .await;

    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(value["content"], json!({ "email": "x@y.com" }));
}

#[rstest]
#[case(json!({}))]
#[case(json!([{ "email": "x@y.com" }]))]
#[actix_web::test]
async fn update_rejects_unusable_bodies(repo: InMemoryPersonRepository, #[case] body: Value) {
    let id = create(&repo, json!({ "username": "u" })).await;

    let (status, _) = send(
        &repo,
        actix_test::TestRequest::put()
            .uri(&format!("/person/{id}"))
            .set_json(body),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[rstest]
#[actix_web::test]
async fn update_of_absent_person_is_not_found(repo: InMemoryPersonRepository) {
    let (status, value) = send(
        &repo,
        actix_test::TestRequest::put()
            .uri(&format!("/person/{ABSENT_ID}"))
            .set_json(json!({ "email": "x@y.com" })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(value["message"], "person not found");
    assert!(repo.is_empty());
}

#[rstest]
#[actix_web::test]
async fn store_failures_hide_their_cause(repo: InMemoryPersonRepository) {
    repo.fail_with(PersonRepositoryError::connection("10.0.0.3:27017 refused"));

    let (status, value) = send(&repo, actix_test::TestRequest::get().uri("/person?page=2")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(value["message"], "there is an error on server");
    assert_eq!(value["content"], Value::Null);
}

#[rstest]
#[actix_web::test]
async fn store_rejections_are_server_errors_without_driver_text(repo: InMemoryPersonRepository) {
    repo.fail_with(PersonRepositoryError::invalid_document(
        "Kind: Command failed: Error code 2 (BadValue): detail from mongod",
    ));

    let (status, value) = send(&repo, actix_test::TestRequest::get().uri("/person?page=1")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(value["message"], "there is an error on server");
    assert!(!value.to_string().contains("mongod"), "{value}");
}

#[rstest]
#[case(json!({ "_id": "x" }))]
#[case(json!({ "$inc": 1 }))]
#[actix_web::test]
async fn update_refused_by_store_is_server_error(
    repo: InMemoryPersonRepository,
    #[case] body: Value,
) {
    let id = create(&repo, json!({ "username": "u" })).await;

    let (status, value) = send(
        &repo,
        actix_test::TestRequest::patch()
            .uri(&format!("/person/{id}"))
            .set_json(body),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(value["message"], "there is an error on server");
    assert!(!value.to_string().contains("immutable"), "{value}");
}

#[rstest]
#[case(
    actix_test::TestRequest::delete().uri("/person/5f1b0c2e9d3a4b5c6d7e8f90"),
    StatusCode::METHOD_NOT_ALLOWED
)]
#[case(actix_test::TestRequest::put().uri("/person"), StatusCode::METHOD_NOT_ALLOWED)]
#[case(actix_test::TestRequest::get().uri("/people"), StatusCode::NOT_FOUND)]
#[case(
    actix_test::TestRequest::post().uri("/person/5f1b0c2e9d3a4b5c6d7e8f90"),
    StatusCode::METHOD_NOT_ALLOWED
)]
#[actix_web::test]
async fn unrouted_requests_get_envelopes(
    repo: InMemoryPersonRepository,
    #[case] request: actix_test::TestRequest,
    #[case] expected: StatusCode,
) {
    let (status, value) = send(&repo, request).await;

    assert_eq!(status, expected);
    assert_eq!(value["content"], Value::Null);
    assert_eq!(repo.call_count(), 0);
}
