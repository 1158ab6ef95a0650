//! Integration tests for refresh token rotation and sign-out

mod common;

use actix_web::test;
use serde_json::Value;

use acct_api::app::create_app;
use common::*;

#[actix_web::test]
async fn test_tokens_rotates_refresh_token() {
    let ctx = TestContext::new();
    let app = test::init_service(create_app(ctx.state.clone(), &ctx.server)).await;

    let resp = test::call_service(&app, signup_request(EMAIL, PASSWORD).to_request()).await;
    let (_, first_refresh) = token_strings(&test::read_body_json(resp).await);
    let first = ctx.state.token_service.validate_refresh_token(&first_refresh).unwrap();

    let resp = test::call_service(&app, tokens_request(&first_refresh).to_request()).await;
    assert_eq!(resp.status(), 200);
    let (id_token, second_refresh) = token_strings(&test::read_body_json(resp).await);
    let second = ctx.state.token_service.validate_refresh_token(&second_refresh).unwrap();

    assert_ne!(first.id, second.id);
    assert!(!ctx.tokens.contains(first.uid, first.id).await);
    assert!(ctx.tokens.contains(second.uid, second.id).await);
    assert_eq!(
        ctx.state.token_service.validate_id_token(&id_token).unwrap().uid,
        first.uid
    );
}

#[actix_web::test]
async fn test_tokens_rejects_replayed_refresh_token() {
    let ctx = TestContext::new();
    let app = test::init_service(create_app(ctx.state.clone(), &ctx.server)).await;

    let resp = test::call_service(&app, signup_request(EMAIL, PASSWORD).to_request()).await;
    let (_, refresh) = token_strings(&test::read_body_json(resp).await);

    let first = test::call_service(&app, tokens_request(&refresh).to_request()).await;
    assert_eq!(first.status(), 200);

    let replay = test::call_service(&app, tokens_request(&refresh).to_request()).await;
    assert_eq!(replay.status(), 401);
    let body: Value = test::read_body_json(replay).await;
    assert_eq!(body["error"]["type"], "UNAUTHORIZED");
}

#[actix_web::test]
async fn test_tokens_rejects_garbage_and_identity_tokens() {
    let ctx = TestContext::new();
    let app = test::init_service(create_app(ctx.state.clone(), &ctx.server)).await;

    let resp = test::call_service(&app, tokens_request("not.a.token").to_request()).await;
    assert_eq!(resp.status(), 401);

    let resp = test::call_service(&app, signup_request(EMAIL, PASSWORD).to_request()).await;
    let (id_token, _) = token_strings(&test::read_body_json(resp).await);
    let resp = test::call_service(&app, tokens_request(&id_token).to_request()).await;
    assert_eq!(resp.status(), 401);

    let resp = test::call_service(&app, tokens_request("").to_request()).await;
    assert_eq!(resp.status(), 400);
}

#[actix_web::test]
async fn test_signout_revokes_all_refresh_tokens() {
    let ctx = TestContext::new();
    let app = test::init_service(create_app(ctx.state.clone(), &ctx.server)).await;

    let resp = test::call_service(&app, signup_request(EMAIL, PASSWORD).to_request()).await;
    let (id_token, signup_refresh) = token_strings(&test::read_body_json(resp).await);
    let resp = test::call_service(&app, signin_request(EMAIL, PASSWORD).to_request()).await;
    let (_, signin_refresh) = token_strings(&test::read_body_json(resp).await);

    let req = test::TestRequest::post()
        .uri(&path("/signout"))
        .insert_header(bearer(&id_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "user signed out successfully");

    for refresh in [signup_refresh, signin_refresh] {
        let resp = test::call_service(&app, tokens_request(&refresh).to_request()).await;
        assert_eq!(resp.status(), 401);
    }

    let user = ctx.state.token_service.validate_id_token(&id_token).unwrap();
    assert_eq!(ctx.tokens.live_count(user.uid).await, 0);
}

#[actix_web::test]
async fn test_signout_requires_identity_token() {
    let ctx = TestContext::new();
    let app = test::init_service(create_app(ctx.state.clone(), &ctx.server)).await;

    let req = test::TestRequest::post().uri(&path("/signout")).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);

    let resp = test::call_service(&app, signup_request(EMAIL, PASSWORD).to_request()).await;
    let (_, refresh) = token_strings(&test::read_body_json(resp).await);

    // a refresh token is not an identity token
    let req = test::TestRequest::post()
        .uri(&path("/signout"))
        .insert_header(bearer(&refresh))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["type"], "UNAUTHORIZED");
}
