//! Registration, login and access guard behaviour over HTTP

mod common;

use actix_web::{http::StatusCode, test};
use serde_json::json;

use common::{json_body, registration, TestContext};
use rent_api::create_app;
use rent_core::domain::entities::Role;

#[actix_web::test]
async fn test_register_then_login() {
    let ctx = TestContext::new();
    let app = test::init_service(create_app(ctx.state.clone(), &ctx.config)).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/register")
        .set_json(registration("Maria@Example.com", "52998224725"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body = json_body(resp).await;
    assert_eq!(body["data"]["token_type"], "Bearer");
    assert_eq!(body["data"]["role"], "CLIENT");
    assert_eq!(body["data"]["expires_in"], 3600);

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(json!({"email": "maria@example.com", "password": "senha-forte-1"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(json_body(resp).await["data"]["access_token"].as_str().is_some());
}

#[actix_web::test]
async fn test_duplicate_email_conflicts() {
    let ctx = TestContext::new();
    let app = test::init_service(create_app(ctx.state.clone(), &ctx.config)).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/register")
        .set_json(registration("maria@example.com", "52998224725"))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/register")
        .set_json(registration("maria@example.com", "11144477735"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    assert_eq!(json_body(resp).await["error"], "EMAIL_TAKEN");
}

#[actix_web::test]
async fn test_bad_credentials_are_indistinguishable() {
    let ctx = TestContext::new();
    let app = test::init_service(create_app(ctx.state.clone(), &ctx.config)).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/register")
        .set_json(registration("maria@example.com", "52998224725"))
        .to_request();
    test::call_service(&app, req).await;

    let mut messages = Vec::new();
    for email in ["maria@example.com", "nobody@example.com"] {
        let req = test::TestRequest::post()
            .uri("/api/v1/auth/login")
            .set_json(json!({"email": email, "password": "wrong-password"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        let body = json_body(resp).await;
        assert_eq!(body["error"], "INVALID_CREDENTIALS");
        messages.push(body["message"].clone());
    }
    assert_eq!(messages[0], messages[1]);
}

#[actix_web::test]
async fn test_staff_registration_requires_staff() {
    let ctx = TestContext::new();
    let staff = ctx.staff().await;
    let client = ctx.client("ana@example.com", "22222222222").await;
    let app = test::init_service(create_app(ctx.state.clone(), &ctx.config)).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/register/staff")
        .insert_header(ctx.bearer(&client))
        .set_json(registration("novo@locadora.com", "52998224725"))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/register/staff")
        .insert_header(ctx.bearer(&staff))
        .set_json(registration("novo@locadora.com", "52998224725"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body = json_body(resp).await;
    assert_eq!(body["data"]["role"], "STAFF");
    assert!(body["data"].get("access_token").is_none());
    assert!(body["data"].get("password").is_none());
}

#[actix_web::test]
async fn test_invalid_token_is_treated_as_anonymous() {
    let ctx = TestContext::new();
    let app = test::init_service(create_app(ctx.state.clone(), &ctx.config)).await;
    let garbage = ("Authorization", "Bearer not.a.token");

    let req = test::TestRequest::get()
        .uri("/api/v1/vehicles")
        .insert_header(garbage)
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri("/api/v1/users/me")
        .insert_header(garbage)
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_errors_follow_accept_language() {
    let ctx = TestContext::new();
    let app = test::init_service(create_app(ctx.state.clone(), &ctx.config)).await;

    let req = test::TestRequest::get()
        .uri("/api/v1/rentals")
        .insert_header(("Accept-Language", "pt-BR,pt;q=0.9"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(json_body(resp).await["message"], "Autenticação necessária");
}

#[actix_web::test]
async fn test_malformed_json_is_bad_request() {
    let ctx = TestContext::new();
    let app = test::init_service(create_app(ctx.state.clone(), &ctx.config)).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .insert_header(("Content-Type", "application/json"))
        .set_payload("{\"email\": ")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(resp).await["error"], "BAD_REQUEST");
}

#[actix_web::test]
async fn test_health_and_index_are_public() {
    let ctx = TestContext::new();
    let staff = ctx.seed_user("chefe@locadora.com", "44444444444", Role::Staff).await;
    let app = test::init_service(create_app(ctx.state.clone(), &ctx.config)).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(json_body(resp).await["status"], "healthy");

    let req = test::TestRequest::get().uri("/api/v1").to_request();
    let body = json_body(test::call_service(&app, req).await).await;
    assert!(body["caller_role"].is_null());

    let req = test::TestRequest::get()
        .uri("/api/v1")
        .insert_header(ctx.bearer(&staff))
        .to_request();
    let body = json_body(test::call_service(&app, req).await).await;
    assert_eq!(body["caller_role"], "STAFF");
}

#[actix_web::test]
async fn test_unknown_route_requires_auth_then_404() {
    let ctx = TestContext::new();
    let client = ctx.client("ana@example.com", "22222222222").await;
    let app = test::init_service(create_app(ctx.state.clone(), &ctx.config)).await;

    let req = test::TestRequest::get().uri("/nowhere").to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::get()
        .uri("/nowhere")
        .insert_header(ctx.bearer(&client))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(json_body(resp).await["error"], "NOT_FOUND");
}
