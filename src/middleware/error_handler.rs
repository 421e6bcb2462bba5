//! Rewrites framework errors (malformed JSON, bad form bodies, unknown
//! routes) into the crate's JSON `ErrorResponse` body.

use crate::error::AppError;
use actix_web::{
    body::{BoxBody, MessageBody},
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    http::StatusCode,
    Error as ActixError, ResponseError,
};
use futures::future::{ok, Ready};
use std::{future::Future, pin::Pin};

impl AppError {
    /// Maps an error raised by actix itself onto an `AppError`.
    pub fn from_actix(err: &ActixError) -> Self {
        let status = err.as_response_error().status_code();
        let message = err.to_string();
        match status {
            StatusCode::NOT_FOUND => AppError::NotFound,
            s if s.is_client_error() => AppError::validation("request", message),
            _ => {
                log::debug!("Unmatched error occurred. Status: {}, Error: {}", status, message);
                AppError::Generic(message)
            }
        }
    }
}

pub struct ErrorHandlerMiddleware;

impl<S, B> Transform<S, ServiceRequest> for ErrorHandlerMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError> + 'static,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = ActixError;
    type Transform = ErrorHandlerService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(ErrorHandlerService { service })
    }
}

pub struct ErrorHandlerService<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for ErrorHandlerService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = ActixError;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    fn poll_ready(
        &self,
        ctx: &mut core::task::Context<'_>,
    ) -> core::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        log::debug!("Handling request: method={}, uri={}", req.method(), req.uri());

        let fut = self.service.call(req);

        Box::pin(async move {
            let res = match fut.await {
                Ok(res) => res,
                Err(err) => {
                    log::debug!("Error details: {:?}", err);
                    return Err(err);
                }
            };

            let foreign = res
                .response()
                .error()
                .filter(|err| err.as_error::<AppError>().is_none())
                .map(AppError::from_actix);

            match foreign {
                Some(app_error) => {
                    log::warn!(
                        "Request failed: {} {}: {}",
                        res.request().method(),
                        res.request().uri(),
                        app_error
                    );
                    let (req, _) = res.into_parts();
                    Ok(ServiceResponse::new(req, app_error.error_response()))
                }
                None => Ok(res.map_into_boxed_body()),
            }
        })
    }
}

pub fn error_handler() -> ErrorHandlerMiddleware {
    ErrorHandlerMiddleware
}
