//! Handler-boundary safety net for panics.
//!
//! A panicking handler would otherwise drop the connection. [`CatchPanic`]
//! logs the payload and fails the request with the internal domain error,
//! which actix renders as the redacted JSON envelope.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::task::{Context, Poll};

use actix_web::Error;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use futures_util::FutureExt;
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::error;

use crate::domain::Error as ApiError;

/// Middleware converting unwinding panics into `500` responses.
#[derive(Clone, Copy, Default)]
pub struct CatchPanic;

impl<S, B> Transform<S, ServiceRequest> for CatchPanic
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = CatchPanicMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(CatchPanicMiddleware { service }))
    }
}

/// Service wrapper produced by [`CatchPanic`].
pub struct CatchPanicMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for CatchPanicMiddleware<S>
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

    // The request moves into the inner service untouched: routing needs the
    // only reference to it.
    fn call(&self, req: ServiceRequest) -> Self::Future {
        let fut = match std::panic::catch_unwind(AssertUnwindSafe(|| self.service.call(req))) {
            Ok(fut) => fut,
            Err(payload) => return Box::pin(ready(Err(panic_error(payload.as_ref())))),
        };
        Box::pin(async move {
            AssertUnwindSafe(fut)
                .catch_unwind()
                .await
                .unwrap_or_else(|payload| Err(panic_error(payload.as_ref())))
        })
    }
}

fn panic_error(payload: &(dyn Any + Send)) -> Error {
    error!(panic = %panic_message(payload), "request handler panicked");
    ApiError::internal("request handler panicked").into()
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&'static str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("non-string panic payload")
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use actix_web::{App, HttpResponse, web};
    use serde_json::Value;

    #[actix_web::test]
    async fn panics_become_redacted_internal_errors() {
        let app = actix_test::init_service(App::new().wrap(CatchPanic).route(
            "/",
            web::get().to(|| async {
                if std::hint::black_box(true) {
                    panic!("secret stack detail");
                }
                HttpResponse::Ok().finish()
            }),
        ))
        .await;

        let req = actix_test::TestRequest::get().uri("/").to_request();
        let Err(err) = actix_test::try_call_service(&app, req).await else {
            panic!("panicking handler should fail the request");
        };
        let res = err.error_response();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let bytes = to_bytes(res.into_body()).await.expect("error body");
        let body: Value = serde_json::from_slice(&bytes).expect("JSON envelope");
        assert_eq!(body["error"], "Internal Server Error");
        assert_eq!(body["message"], "Internal server error");
        assert!(!body.to_string().contains("secret stack detail"));
    }

    #[actix_web::test]
    async fn successful_responses_pass_through() {
        let app = actix_test::init_service(
            App::new()
                .wrap(CatchPanic)
                .route("/bikes/{id}", web::get().to(|path: web::Path<String>| async move {
                    HttpResponse::Created().body(path.into_inner())
                })),
        )
        .await;

        let req = actix_test::TestRequest::get().uri("/bikes/b-1").to_request();
        let res = actix_test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::CREATED);
        assert_eq!(actix_test::read_body(res).await, "b-1");
    }

    #[test]
    fn panic_message_reads_common_payloads() {
        let boxed: Box<dyn Any + Send> = Box::new("static");
        assert_eq!(panic_message(boxed.as_ref()), "static");
        let boxed: Box<dyn Any + Send> = Box::new(String::from("owned"));
        assert_eq!(panic_message(boxed.as_ref()), "owned");
        let boxed: Box<dyn Any + Send> = Box::new(7_u8);
        assert_eq!(panic_message(boxed.as_ref()), "non-string panic payload");
    }
}
