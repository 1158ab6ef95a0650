//! Integration tests for sign-up and sign-in

mod common;

use actix_web::test;
use serde_json::Value;

use acct_api::app::create_app;
use common::*;

#[actix_web::test]
async fn test_signup_returns_token_pair() {
    let ctx = TestContext::new();
    let app = test::init_service(create_app(ctx.state.clone(), &ctx.server)).await;

    let resp = test::call_service(&app, signup_request(EMAIL, PASSWORD).to_request()).await;
    assert_eq!(resp.status(), 201);

    let body: Value = test::read_body_json(resp).await;
    let (id_token, refresh_token) = token_strings(&body);

    let user = ctx.state.token_service.validate_id_token(&id_token).unwrap();
    assert_eq!(user.email, EMAIL);
    assert!(user.password.is_empty());

    let refresh = ctx.state.token_service.validate_refresh_token(&refresh_token).unwrap();
    assert_eq!(refresh.uid, user.uid);
    assert!(ctx.tokens.contains(user.uid, refresh.id).await);
}

#[actix_web::test]
async fn test_signup_duplicate_email_conflicts() {
    let ctx = TestContext::new();
    let app = test::init_service(create_app(ctx.state.clone(), &ctx.server)).await;

    let first = test::call_service(&app, signup_request(EMAIL, PASSWORD).to_request()).await;
    assert_eq!(first.status(), 201);

    let second = test::call_service(&app, signup_request(EMAIL, "another-password").to_request()).await;
    assert_eq!(second.status(), 409);

    let body: Value = test::read_body_json(second).await;
    assert_eq!(body["error"]["type"], "CONFLICT");
    assert_eq!(ctx.users.len().await, 1);
}

#[actix_web::test]
async fn test_signup_rejects_invalid_input() {
    let ctx = TestContext::new();
    let app = test::init_service(create_app(ctx.state.clone(), &ctx.server)).await;

    for (email, password) in [
        ("not-an-email", PASSWORD),
        (EMAIL, "short"),
        (EMAIL, "this-password-is-far-too-long-to-accept"),
    ] {
        let resp = test::call_service(&app, signup_request(email, password).to_request()).await;
        assert_eq!(resp.status(), 400, "email={} password={}", email, password);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["type"], "BAD_REQUEST");
    }
    assert!(ctx.users.is_empty().await);
}

#[actix_web::test]
async fn test_signup_rejects_malformed_json() {
    let ctx = TestContext::new();
    let app = test::init_service(create_app(ctx.state.clone(), &ctx.server)).await;

    let req = test::TestRequest::post()
        .uri(&path("/signup"))
        .insert_header(("content-type", "application/json"))
        .set_payload("{\"email\": ")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["type"], "BAD_REQUEST");
}

#[actix_web::test]
async fn test_signin_issues_fresh_pair() {
    let ctx = TestContext::new();
    let app = test::init_service(create_app(ctx.state.clone(), &ctx.server)).await;
    test::call_service(&app, signup_request(EMAIL, PASSWORD).to_request()).await;

    let resp = test::call_service(&app, signin_request(EMAIL, PASSWORD).to_request()).await;
    assert_eq!(resp.status(), 200);

    let body: Value = test::read_body_json(resp).await;
    let (id_token, _) = token_strings(&body);
    let user = ctx.state.token_service.validate_id_token(&id_token).unwrap();

    // one refresh token from sign-up, one from sign-in
    assert_eq!(ctx.tokens.live_count(user.uid).await, 2);
}

#[actix_web::test]
async fn test_signin_with_bad_credentials_is_unauthorized() {
    let ctx = TestContext::new();
    let app = test::init_service(create_app(ctx.state.clone(), &ctx.server)).await;
    test::call_service(&app, signup_request(EMAIL, PASSWORD).to_request()).await;

    let wrong_password = test::call_service(&app, signin_request(EMAIL, "wrong-password").to_request()).await;
    assert_eq!(wrong_password.status(), 401);
    let wrong_body: Value = test::read_body_json(wrong_password).await;

    let unknown = test::call_service(&app, signin_request("bob@example.com", PASSWORD).to_request()).await;
    assert_eq!(unknown.status(), 401);
    let unknown_body: Value = test::read_body_json(unknown).await;

    // no hint whether the email exists
    assert_eq!(wrong_body, unknown_body);
    assert_eq!(wrong_body["error"]["type"], "UNAUTHORIZED");
}
