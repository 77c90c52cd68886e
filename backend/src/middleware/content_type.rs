//! Middleware stamping `content-type: application/json` on responses.
//!
//! Every response of the person API is a JSON envelope, including those
//! produced outside the handlers (unknown routes, rejected methods, extractor
//! failures). The header is applied here once instead of per handler.

use std::task::{Context, Poll};

use actix_web::Error;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::{CONTENT_TYPE, HeaderValue};
use futures_util::future::{LocalBoxFuture, Ready, ready};

/// Sets `content-type: application/json` on every response.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use person_api::middleware::JsonContentType;
///
/// let app = App::new().wrap(JsonContentType);
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct JsonContentType;

impl<S, B> Transform<S, ServiceRequest> for JsonContentType
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = JsonContentTypeMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JsonContentTypeMiddleware { service }))
    }
}

/// Service wrapper produced by [`JsonContentType`].
pub struct JsonContentTypeMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for JsonContentTypeMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let fut = self.service.call(req);
        Box::pin(async move {
            let mut res = fut.await?;
            res.headers_mut()
                .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
            Ok(res)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, HttpResponse, test, web};
    use rstest::rstest;

    fn respond(kind: &str) -> HttpResponse {
        match kind {
            "html" => HttpResponse::Ok().content_type("text/html").body("<p/>"),
            "empty" => HttpResponse::NoContent().finish(),
            _ => HttpResponse::Ok().body("plain"),
        }
    }

    #[rstest]
    #[case("plain")]
    #[case("empty")]
    #[case("html")]
    #[actix_web::test]
    async fn overrides_content_type(#[case] kind: &'static str) {
        let app = test::init_service(
            App::new()
                .wrap(JsonContentType)
                .route("/", web::get().to(move || async move { respond(kind) })),
        )
        .await;

        let res = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;

        assert_eq!(
            res.headers().get(CONTENT_TYPE).and_then(|v| v.to_str().ok()),
            Some("application/json")
        );
    }
}
