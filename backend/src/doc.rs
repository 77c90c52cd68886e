//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! specification for the REST API. It registers:
//!
//! - **Paths**: the four person handlers from the inbound layer
//! - **Schemas**: wrappers for the person document, the update patch and the
//!   response envelopes, which keep domain types free of utoipa derives
//!
//! The generated specification is used by Swagger UI (debug builds) and
//! exported via `cargo run --bin openapi-dump` for external tooling.

use utoipa::OpenApi;

use crate::inbound::http::persons::CreatePersonRequest;
use crate::inbound::http::schemas::{
    ErrorEnvelopeSchema, PatchEnvelopeSchema, PersonEnvelopeSchema, PersonListEnvelopeSchema,
    PersonPatchSchema, PersonSchema,
};

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Person API",
        description = "CRUD facade over the person document collection. Every response is a \
                       `{status, message, content}` envelope.",
        license(name = "MIT")
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::persons::create_person,
        crate::inbound::http::persons::get_person,
        crate::inbound::http::persons::list_persons,
        crate::inbound::http::persons::update_person,
    ),
    components(schemas(
        PersonSchema,
        PersonPatchSchema,
        CreatePersonRequest,
        PersonEnvelopeSchema,
        PersonListEnvelopeSchema,
        PatchEnvelopeSchema,
        ErrorEnvelopeSchema
    )),
    tags(
        (name = "persons", description = "Create, read and update person documents")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying OpenAPI schema field structure and path registration.

    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    // Note: utoipa replaces :: with . in schema names
    const PERSON_SCHEMA_NAME: &str = "crate.domain.Person";
    const PATCH_SCHEMA_NAME: &str = "crate.domain.PersonPatch";

    /// Assert that an Object schema contains a field with the given name.
    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[rstest]
    #[case("_id")]
    #[case("first_name")]
    #[case("last_name")]
    #[case("username")]
    #[case("email")]
    #[case("data")]
    fn openapi_person_schema_has_field(#[case] field: &str) {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let person = schemas.get(PERSON_SCHEMA_NAME).expect("Person schema");

        assert_object_schema_has_field(person, field);
    }

    #[rstest]
    fn openapi_registers_patch_schema() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        assert!(schemas.contains_key(PATCH_SCHEMA_NAME));
    }

    #[rstest]
    #[case("/person")]
    #[case("/person/{id}")]
    fn openapi_registers_person_paths(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing path {path}");
    }
}
