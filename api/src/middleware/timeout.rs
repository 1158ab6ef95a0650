//! Per-request deadline
//!
//! Every request gets a [`RequestContext`] whose deadline is the configured
//! handler timeout. When the handler overruns, the context is canceled so
//! in-flight store and database calls stop, and the request fails with
//! `ServiceUnavailable`, which renders as the 503 error envelope.

use std::{
    future::{ready, Ready},
    ops::Deref,
    rc::Rc,
    task::{Context, Poll},
    time::Duration,
};

use actix_web::{
    dev::{Payload, Service, ServiceRequest, ServiceResponse, Transform},
    Error, FromRequest, HttpMessage, HttpRequest,
};
use futures_util::future::LocalBoxFuture;

use acct_core::context::RequestContext;
use acct_core::errors::DomainError;

use crate::handlers::ApiError;

/// Timeout middleware factory
#[derive(Debug, Clone, Copy)]
pub struct RequestTimeout {
    timeout: Duration,
}

impl RequestTimeout {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequestTimeout
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = RequestTimeoutMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequestTimeoutMiddleware {
            service: Rc::new(service),
            timeout: self.timeout,
        }))
    }
}

pub struct RequestTimeoutMiddleware<S> {
    service: Rc<S>,
    timeout: Duration,
}

impl<S, B> Service<ServiceRequest> for RequestTimeoutMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let timeout = self.timeout;

        Box::pin(async move {
            let ctx = RequestContext::with_timeout(timeout);
            req.extensions_mut().insert(ctx.clone());
            // the router needs sole ownership of the request, so keep only the path
            let path = req.path().to_string();

            match tokio::time::timeout(timeout, service.call(req)).await {
                Ok(result) => result,
                Err(_) => {
                    ctx.cancel();
                    tracing::warn!(
                        path = %path,
                        timeout_ms = timeout.as_millis() as u64,
                        "Handler timed out"
                    );
                    Err(ApiError(DomainError::ServiceUnavailable).into())
                }
            }
        })
    }
}

/// Request context extractor
///
/// Falls back to a context without deadline when the timeout middleware
/// is not installed.
#[derive(Debug, Clone)]
pub struct Ctx(pub RequestContext);

impl Deref for Ctx {
    type Target = RequestContext;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequest for Ctx {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let ctx = req
            .extensions()
            .get::<RequestContext>()
            .cloned()
            .unwrap_or_default();
        ready(Ok(Ctx(ctx)))
    }
}
