//! Identity token authentication for protected routes
//!
//! Reads `Authorization: Bearer <idToken>`, validates it and stores the
//! embedded [`User`] in the request extensions, where handlers pick it up
//! through the [`AuthUser`] extractor.

use std::{
    future::{ready, Ready},
    rc::Rc,
    sync::Arc,
    task::{Context, Poll},
};

use actix_web::{
    body::EitherBody,
    dev::{Payload, Service, ServiceRequest, ServiceResponse, Transform},
    http::header::AUTHORIZATION,
    Error, FromRequest, HttpMessage, HttpRequest,
};
use futures_util::future::LocalBoxFuture;

use acct_core::domain::User;
use acct_core::errors::DomainError;
use acct_core::services::IdTokenValidator;

use crate::handlers::{handle_domain_error, ApiError};

const MISSING_HEADER: &str = "must provide Authorization header with format `Bearer {token}`";

/// Authentication middleware factory
#[derive(Clone)]
pub struct JwtAuth {
    validator: Arc<dyn IdTokenValidator>,
}

impl JwtAuth {
    pub fn new(validator: Arc<dyn IdTokenValidator>) -> Self {
        Self { validator }
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddleware {
            service: Rc::new(service),
            validator: Arc::clone(&self.validator),
        }))
    }
}

pub struct JwtAuthMiddleware<S> {
    service: Rc<S>,
    validator: Arc<dyn IdTokenValidator>,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let validator = Arc::clone(&self.validator);

        Box::pin(async move {
            let user = match authenticate(&req, validator.as_ref()) {
                Ok(user) => user,
                Err(error) => {
                    let response = handle_domain_error(&error);
                    return Ok(req.into_response(response).map_into_right_body());
                }
            };
            tracing::debug!(user_id = %user.uid, "Authenticated request");

            req.extensions_mut().insert(user);
            service.call(req).await.map(ServiceResponse::map_into_left_body)
        })
    }
}

fn authenticate(req: &ServiceRequest, validator: &dyn IdTokenValidator) -> Result<User, DomainError> {
    let token = extract_bearer_token(req).ok_or_else(|| DomainError::unauthorized(MISSING_HEADER))?;
    validator.validate_id_token(&token)
}

/// Extracts the Bearer token from the Authorization header
fn extract_bearer_token(req: &ServiceRequest) -> Option<String> {
    req.headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// The user an identity token was issued to
#[derive(Debug, Clone)]
pub struct AuthUser(pub User);

impl FromRequest for AuthUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let result = req
            .extensions()
            .get::<User>()
            .cloned()
            .map(AuthUser)
            .ok_or_else(|| ApiError(DomainError::unauthorized("authentication required")).into());

        ready(result)
    }
}
