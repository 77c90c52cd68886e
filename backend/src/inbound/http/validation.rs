//! Shared request parsing helpers for the person endpoints.

use actix_web::web;
use pagination::{PageRequest, PageSize};

use crate::domain::{Error, PersonId};

/// Message returned for a path identifier that is not a store identity.
pub(crate) const MALFORMED_ID_MESSAGE: &str = "id that you sent is wrong";
/// Prefix of the message returned for undecodable JSON bodies.
pub(crate) const MALFORMED_BODY_MESSAGE: &str = "json body is incorrect";

/// Parse a path segment into a [`PersonId`].
pub(crate) fn parse_person_id(raw: &str) -> Result<PersonId, Error> {
    PersonId::parse(raw).map_err(|err| {
        Error::invalid_request(format!("{MALFORMED_ID_MESSAGE}: {err}"))
    })
}

/// Derive the page request from a raw query string.
///
/// Never fails: a missing, negative or non-numeric `page` falls back to the
/// first page. When `page` repeats, the first occurrence wins.
pub(crate) fn page_from_query(query: &str, page_size: PageSize) -> PageRequest {
    let pairs = web::Query::<Vec<(String, String)>>::from_query(query)
        .map(web::Query::into_inner)
        .unwrap_or_default();
    let page = pairs
        .into_iter()
        .find_map(|(key, value)| (key == "page").then_some(value));
    PageRequest::from_query_value(page.as_deref(), page_size)
}

/// JSON extractor configuration turning decode failures into envelope 400s.
///
/// The content type is not enforced, so bodies sent without a
/// `content-type` header are still decoded.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .content_type_required(false)
        .error_handler(|err, _req| {
            Error::invalid_request(format!("{MALFORMED_BODY_MESSAGE}: {err}")).into()
        })
}
