//! Application factory
//!
//! Builds the actix-web `App` from the shared state and server settings.
//! Kept separate from `main` so tests can mount the same routes against
//! in-memory backends.

use std::sync::Arc;

use actix_web::{
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    web, App, Error, HttpResponse,
};
use tracing_actix_web::TracingLogger;

use acct_core::repositories::{ImageRepository, TokenRepository, UserRepository};
use acct_core::services::IdTokenValidator;
use acct_shared::config::ServerConfig;
use acct_shared::ErrorResponse;

use crate::handlers::error::json_error_handler;
use crate::middleware::{create_cors, JwtAuth, RequestTimeout};
use crate::routes::account::{
    details::details, image::delete_image, image::upload_image, me::me, signin::sign_in,
    signout::sign_out, signup::sign_up, tokens::tokens,
};
use crate::routes::health::health_check;
use crate::routes::AppState;

/// Largest accepted JSON body; every JSON request is a handful of short strings
const JSON_LIMIT_BYTES: usize = 16 * 1024;

/// Create and configure the application with all dependencies
pub fn create_app<U, T, I>(
    app_state: web::Data<AppState<U, T, I>>,
    server: &ServerConfig,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl actix_web::body::MessageBody>,
        Error = Error,
        InitError = (),
    >,
>
where
    U: UserRepository + 'static,
    T: TokenRepository + 'static,
    I: ImageRepository + 'static,
{
    let validator: Arc<dyn IdTokenValidator> = app_state.token_service.clone();
    let auth = JwtAuth::new(validator);

    App::new()
        .app_data(app_state)
        .app_data(
            web::JsonConfig::default()
                .limit(JSON_LIMIT_BYTES)
                .error_handler(json_error_handler),
        )
        // last registered runs first: logging, then CORS, then the deadline
        .wrap(RequestTimeout::new(server.handler_timeout()))
        .wrap(create_cors(&server.allowed_origins))
        .wrap(TracingLogger::default())
        .route("/health", web::get().to(health_check))
        .service(
            web::scope(&server.base_url)
                .route("/health", web::get().to(health_check))
                .route("/signup", web::post().to(sign_up::<U, T, I>))
                .route("/signin", web::post().to(sign_in::<U, T, I>))
                .route("/tokens", web::post().to(tokens::<U, T, I>))
                .route(
                    "/signout",
                    web::post().to(sign_out::<U, T, I>).wrap(auth.clone()),
                )
                .route("/me", web::get().to(me::<U, T, I>).wrap(auth.clone()))
                .route(
                    "/details",
                    web::put().to(details::<U, T, I>).wrap(auth.clone()),
                )
                .service(
                    web::resource("/image")
                        .route(web::post().to(upload_image::<U, T, I>).wrap(auth.clone()))
                        .route(web::delete().to(delete_image::<U, T, I>).wrap(auth)),
                ),
        )
        .default_service(web::route().to(not_found))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        "NOT_FOUND",
        "the requested resource was not found",
    ))
}
