//! Uniform JSON response envelope.
//!
//! Every response body has the shape `{status, message, content}`: `status`
//! mirrors the HTTP status code, `message` is empty on success and `content`
//! is `null` on failure.
//!
//! ```text
//! {"status":201,"message":"","content":{"_id":"...","username":"john_doe"}}
//! {"status":404,"message":"person not found","content":null}
//! ```

use actix_web::body::BoxBody;
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, Responder};
use serde::{Deserialize, Serialize};

/// Response envelope carrying an optional payload.
///
/// # Examples
/// ```
/// use actix_web::http::StatusCode;
/// use person_api::inbound::http::envelope::Envelope;
///
/// let ok = Envelope::success(StatusCode::OK, vec![1, 2]);
/// assert_eq!(ok.status, 200);
/// assert!(ok.message.is_empty());
///
/// let failed = Envelope::<()>::failure(StatusCode::NOT_FOUND, "person not found");
/// assert!(failed.content.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope<T> {
    /// HTTP status code of the response.
    pub status: u16,
    /// Empty on success, a short description otherwise.
    pub message: String,
    /// Payload on success; `null` on failure.
    pub content: Option<T>,
}

impl<T> Envelope<T> {
    /// Successful outcome with `content`.
    pub fn success(status: StatusCode, content: T) -> Self {
        Self {
            status: status.as_u16(),
            message: String::new(),
            content: Some(content),
        }
    }

    /// Failed outcome with no content.
    pub fn failure(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status: status.as_u16(),
            message: message.into(),
            content: None,
        }
    }

    /// Status as an actix status code.
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl<T: Serialize> Responder for Envelope<T> {
    type Body = BoxBody;

    fn respond_to(self, _req: &HttpRequest) -> HttpResponse<Self::Body> {
        HttpResponse::build(self.status_code()).json(self)
    }
}
