//! Shared setup for HTTP tests: services over in-memory backends

#![allow(dead_code)]

use std::sync::Arc;

use actix_web::{http::header, test::TestRequest, web};
use serde_json::json;

use acct_api::routes::AppState;
use acct_core::services::{
    AccountService, PasswordHasher, SigningKeys, TokenService, TokenServiceConfig,
};
use acct_infra::{InMemoryImageRepository, InMemoryTokenRepository, InMemoryUserRepository};
use acct_shared::config::ServerConfig;

pub const TEST_PRIVATE_KEY: &str = include_str!("../../../core/keys/test_private_key.pem");
pub const TEST_PUBLIC_KEY: &str = include_str!("../../../core/keys/test_public_key.pem");
pub const TEST_REFRESH_SECRET: &str = "api-test-refresh-secret";
pub const IMAGE_BASE_URL: &str = "https://images.test/profile";

pub const EMAIL: &str = "alice@example.com";
pub const PASSWORD: &str = "correct-horse";

pub type TestState = AppState<InMemoryUserRepository, InMemoryTokenRepository, InMemoryImageRepository>;

/// App state plus handles on the backends behind it
pub struct TestContext {
    pub state: web::Data<TestState>,
    pub users: Arc<InMemoryUserRepository>,
    pub tokens: Arc<InMemoryTokenRepository>,
    pub images: Arc<InMemoryImageRepository>,
    pub server: ServerConfig,
}

impl TestContext {
    pub fn new() -> Self {
        Self::with_max_body_bytes(ServerConfig::default().max_body_bytes)
    }

    pub fn with_max_body_bytes(max_body_bytes: usize) -> Self {
        let users = Arc::new(InMemoryUserRepository::new());
        let tokens = Arc::new(InMemoryTokenRepository::new());
        let images = Arc::new(InMemoryImageRepository::new(IMAGE_BASE_URL));

        let keys = SigningKeys::from_pem_strings(TEST_PRIVATE_KEY, TEST_PUBLIC_KEY, TEST_REFRESH_SECRET)
            .expect("test keys are valid");

        let state = web::Data::new(AppState::new(
            AccountService::with_hasher(users.clone(), images.clone(), PasswordHasher::with_cost(4)),
            TokenService::new(tokens.clone(), keys, TokenServiceConfig::default()),
            max_body_bytes,
        ));

        Self {
            state,
            users,
            tokens,
            images,
            server: ServerConfig {
                max_body_bytes,
                ..ServerConfig::default()
            },
        }
    }
}

pub fn path(route: &str) -> String {
    format!("{}{}", ServerConfig::default().base_url, route)
}

pub fn signup_request(email: &str, password: &str) -> TestRequest {
    TestRequest::post()
        .uri(&path("/signup"))
        .set_json(json!({ "email": email, "password": password }))
}

pub fn signin_request(email: &str, password: &str) -> TestRequest {
    TestRequest::post()
        .uri(&path("/signin"))
        .set_json(json!({ "email": email, "password": password }))
}

pub fn tokens_request(refresh_token: &str) -> TestRequest {
    TestRequest::post()
        .uri(&path("/tokens"))
        .set_json(json!({ "refresh_token": refresh_token }))
}

pub fn bearer(id_token: &str) -> (header::HeaderName, String) {
    (header::AUTHORIZATION, format!("Bearer {}", id_token))
}

/// `(idToken, refreshToken)` from a `{"tokens": ...}` body
pub fn token_strings(body: &serde_json::Value) -> (String, String) {
    (
        body["tokens"]["idToken"].as_str().expect("idToken").to_string(),
        body["tokens"]["refreshToken"].as_str().expect("refreshToken").to_string(),
    )
}

/// multipart/form-data body with a single file part
pub fn multipart_body(field: &str, content_type: &str, bytes: &[u8]) -> (String, Vec<u8>) {
    let boundary = "----acct-test-boundary";
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", boundary).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{}\"; filename=\"avatar\"\r\n",
            field
        )
        .as_bytes(),
    );
    body.extend_from_slice(format!("Content-Type: {}\r\n\r\n", content_type).as_bytes());
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{}--\r\n", boundary).as_bytes());

    (format!("multipart/form-data; boundary={}", boundary), body)
}
