//! Person API handlers.
//!
//! ```text
//! POST  /person              {"first_name":"john","username":"john_doe"}
//! GET   /person?page=0
//! GET   /person/{id}
//! PATCH /person/{id}         {"email":"x@y.com"}
//! PUT   /person/{id}         {"data.age":42}
//! ```
//!
//! Each handler parses and validates its input, calls [`PersonService`] and
//! wraps the outcome in an [`Envelope`].
//!
//! [`PersonService`]: crate::domain::PersonService

use actix_web::http::StatusCode;
use actix_web::{HttpRequest, web};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{Person, PersonPatch};
use crate::inbound::http::ApiResult;
use crate::inbound::http::envelope::Envelope;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{page_from_query, parse_person_id};

/// Create request body for `POST /person`.
///
/// Every field is optional. Unknown fields, including any client supplied
/// `_id`, are ignored.
///
/// Example JSON:
/// `{"first_name":"john","last_name":"doe","username":"john_doe","email":"john@example.com","data":{"age":42}}`
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct CreatePersonRequest {
    #[schema(example = "john")]
    pub first_name: Option<String>,
    #[schema(example = "doe")]
    pub last_name: Option<String>,
    #[schema(example = "john_doe")]
    pub username: Option<String>,
    #[schema(example = "john@example.com")]
    pub email: Option<String>,
    /// Free-form payload.
    #[schema(value_type = Option<Object>)]
    pub data: Option<Map<String, Value>>,
}

impl From<CreatePersonRequest> for Person {
    fn from(value: CreatePersonRequest) -> Self {
        Self {
            id: None,
            first_name: value.first_name,
            last_name: value.last_name,
            username: value.username,
            email: value.email,
            data: value.data,
        }
    }
}

/// Query parameters for `GET /person`.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListPersonsQuery {
    /// Zero-based page index. Missing or unparsable values mean page 0.
    #[param(value_type = Option<u64>, example = 0)]
    pub page: Option<String>,
}

/// Create a person.
#[utoipa::path(
    post,
    path = "/person",
    request_body = CreatePersonRequest,
    responses(
        (status = 201, description = "Person created", body = crate::inbound::http::schemas::PersonEnvelopeSchema),
        (status = 400, description = "Malformed body", body = crate::inbound::http::schemas::ErrorEnvelopeSchema),
        (status = 406, description = "Username and email already taken", body = crate::inbound::http::schemas::ErrorEnvelopeSchema),
        (status = 500, description = "Internal server error", body = crate::inbound::http::schemas::ErrorEnvelopeSchema)
    ),
    tags = ["persons"],
    operation_id = "createPerson"
)]
pub async fn create_person(
    state: web::Data<HttpState>,
    payload: web::Json<CreatePersonRequest>,
) -> ApiResult<Envelope<Person>> {
    let created = state.persons.create(payload.into_inner().into()).await?;
    Ok(Envelope::success(StatusCode::CREATED, created))
}

/// Fetch one person by identity.
#[utoipa::path(
    get,
    path = "/person/{id}",
    params(("id" = String, Path, description = "24 character hex identity")),
    responses(
        (status = 200, description = "Person", body = crate::inbound::http::schemas::PersonEnvelopeSchema),
        (status = 400, description = "Malformed identity", body = crate::inbound::http::schemas::ErrorEnvelopeSchema),
        (status = 404, description = "Person not found", body = crate::inbound::http::schemas::ErrorEnvelopeSchema),
        (status = 500, description = "Internal server error", body = crate::inbound::http::schemas::ErrorEnvelopeSchema)
    ),
    tags = ["persons"],
    operation_id = "getPerson"
)]
pub async fn get_person(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<Envelope<Person>> {
    let id = parse_person_id(&path.into_inner())?;
    let person = state.persons.get(&id).await?;
    Ok(Envelope::success(StatusCode::OK, person))
}

/// List persons, newest first, ten per page.
#[utoipa::path(
    get,
    path = "/person",
    params(ListPersonsQuery),
    responses(
        (status = 200, description = "One page of persons", body = crate::inbound::http::schemas::PersonListEnvelopeSchema),
        (status = 500, description = "Internal server error", body = crate::inbound::http::schemas::ErrorEnvelopeSchema)
    ),
    tags = ["persons"],
    operation_id = "listPersons"
)]
pub async fn list_persons(
    state: web::Data<HttpState>,
    req: HttpRequest,
) -> ApiResult<Envelope<Vec<Person>>> {
    let page = page_from_query(req.query_string(), state.page_size);
    let persons = state.persons.list(page).await?;
    Ok(Envelope::success(StatusCode::OK, persons))
}

/// Set the supplied fields on one person and echo them back.
///
/// `PATCH` and `PUT` share this handler; neither replaces the document.
#[utoipa::path(
    patch,
    path = "/person/{id}",
    params(("id" = String, Path, description = "24 character hex identity")),
    request_body = crate::inbound::http::schemas::PersonPatchSchema,
    responses(
        (status = 202, description = "Fields set", body = crate::inbound::http::schemas::PatchEnvelopeSchema),
        (status = 400, description = "Malformed identity or body", body = crate::inbound::http::schemas::ErrorEnvelopeSchema),
        (status = 404, description = "Person not found", body = crate::inbound::http::schemas::ErrorEnvelopeSchema),
        (status = 406, description = "Username and email already taken", body = crate::inbound::http::schemas::ErrorEnvelopeSchema),
        (status = 500, description = "Internal server error", body = crate::inbound::http::schemas::ErrorEnvelopeSchema)
    ),
    tags = ["persons"],
    operation_id = "updatePerson"
)]
pub async fn update_person(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<PersonPatch>,
) -> ApiResult<Envelope<PersonPatch>> {
    let id = parse_person_id(&path.into_inner())?;
    let applied = state.persons.update(&id, payload.into_inner()).await?;
    Ok(Envelope::success(StatusCode::ACCEPTED, applied))
}

#[cfg(test)]
#[path = "persons_tests.rs"]
mod tests;
