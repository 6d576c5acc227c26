//! Rental lifecycle over HTTP

mod common;

use actix_web::{http::StatusCode, test};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::json;
use std::str::FromStr;

use common::{json_body, registration, TestContext};
use rent_api::create_app;

fn rental_payload(vehicle_id: uuid::Uuid, pickup: &str, ret: &str) -> serde_json::Value {
    json!({
        "vehicle_id": vehicle_id,
        "pickup_date": pickup,
        "return_date": ret,
        "notes": "Airport pickup",
    })
}

#[actix_web::test]
async fn test_register_rent_and_return() {
    let ctx = TestContext::new();
    let vehicle = ctx.seed_vehicle("ABC1D23", dec!(100.00)).await;
    let app = test::init_service(create_app(ctx.state.clone(), &ctx.config)).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/register")
        .set_json(registration("maria@example.com", "52998224725"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let token = json_body(resp).await["data"]["access_token"]
        .as_str()
        .unwrap()
        .to_string();
    let auth = ("Authorization", format!("Bearer {}", token));

    let req = test::TestRequest::post()
        .uri("/api/v1/rentals")
        .insert_header(auth.clone())
        .set_json(rental_payload(vehicle.id, "2024-01-01", "2024-01-04"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let rental = json_body(resp).await["data"].clone();
    assert_eq!(rental["status"], "ACTIVE");
    let total = Decimal::from_str(rental["total_price"].as_str().unwrap()).unwrap();
    assert_eq!(total, dec!(300.00));

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/rentals/availability/{}", vehicle.id))
        .insert_header(auth.clone())
        .to_request();
    let body = json_body(test::call_service(&app, req).await).await;
    assert_eq!(body["data"]["available"], false);

    let rental_id = rental["id"].as_str().unwrap();
    let req = test::TestRequest::patch()
        .uri(&format!("/api/v1/rentals/{}/complete", rental_id))
        .insert_header(auth.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(json_body(resp).await["data"]["status"], "COMPLETED");

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/vehicles/{}", vehicle.id))
        .to_request();
    let body = json_body(test::call_service(&app, req).await).await;
    assert_eq!(body["data"]["is_available"], true);

    // terminal states do not move
    let req = test::TestRequest::patch()
        .uri(&format!("/api/v1/rentals/{}/cancel", rental_id))
        .insert_header(auth.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    assert_eq!(json_body(resp).await["error"], "ILLEGAL_TRANSITION");

    let req = test::TestRequest::get()
        .uri("/api/v1/rentals/summary")
        .insert_header(auth)
        .to_request();
    let body = json_body(test::call_service(&app, req).await).await;
    assert_eq!(body["data"]["completed"], 1);
    let value = Decimal::from_str(body["data"]["completed_value"].as_str().unwrap()).unwrap();
    assert_eq!(value, dec!(300));
}

#[actix_web::test]
async fn test_second_rental_of_same_vehicle_conflicts() {
    let ctx = TestContext::new();
    let first = ctx.client("ana@example.com", "22222222222").await;
    let second = ctx.client("bia@example.com", "33333333333").await;
    let vehicle = ctx.seed_vehicle("ABC1D23", dec!(100.00)).await;
    let app = test::init_service(create_app(ctx.state.clone(), &ctx.config)).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/rentals")
        .insert_header(ctx.bearer(&first))
        .set_json(rental_payload(vehicle.id, "2024-02-01", "2024-02-02"))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);

    let req = test::TestRequest::post()
        .uri("/api/v1/rentals")
        .insert_header(ctx.bearer(&second))
        .set_json(rental_payload(vehicle.id, "2024-02-01", "2024-02-02"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    assert_eq!(json_body(resp).await["error"], "VEHICLE_UNAVAILABLE");
}

#[actix_web::test]
async fn test_inverted_dates_are_rejected() {
    let ctx = TestContext::new();
    let client = ctx.client("ana@example.com", "22222222222").await;
    let vehicle = ctx.seed_vehicle("ABC1D23", dec!(100.00)).await;
    let app = test::init_service(create_app(ctx.state.clone(), &ctx.config)).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/rentals")
        .insert_header(ctx.bearer(&client))
        .set_json(rental_payload(vehicle.id, "2024-03-10", "2024-03-05"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(resp).await["error"], "INVALID_DATE_RANGE");
}

#[actix_web::test]
async fn test_clients_only_reach_their_own_rentals() {
    let ctx = TestContext::new();
    let staff = ctx.staff().await;
    let owner = ctx.client("ana@example.com", "22222222222").await;
    let intruder = ctx.client("bia@example.com", "33333333333").await;
    let vehicle = ctx.seed_vehicle("ABC1D23", dec!(100.00)).await;
    let app = test::init_service(create_app(ctx.state.clone(), &ctx.config)).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/rentals")
        .insert_header(ctx.bearer(&owner))
        .set_json(rental_payload(vehicle.id, "2024-04-01", "2024-04-03"))
        .to_request();
    let rental = json_body(test::call_service(&app, req).await).await["data"].clone();
    let uri = format!("/api/v1/rentals/{}", rental["id"].as_str().unwrap());

    let req = test::TestRequest::get().uri(&uri).insert_header(ctx.bearer(&intruder)).to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::patch()
        .uri(&format!("{}/cancel", uri))
        .insert_header(ctx.bearer(&intruder))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::get().uri(&uri).insert_header(ctx.bearer(&staff)).to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    // listings are scoped the same way
    let req = test::TestRequest::get()
        .uri("/api/v1/rentals")
        .insert_header(ctx.bearer(&intruder))
        .to_request();
    let body = json_body(test::call_service(&app, req).await).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 0);

    let req = test::TestRequest::get()
        .uri("/api/v1/rentals")
        .insert_header(ctx.bearer(&staff))
        .to_request();
    let body = json_body(test::call_service(&app, req).await).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/rentals/user/{}", owner.id))
        .insert_header(ctx.bearer(&intruder))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/rentals/user/{}", owner.id))
        .insert_header(ctx.bearer(&staff))
        .to_request();
    let body = json_body(test::call_service(&app, req).await).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}

#[actix_web::test]
async fn test_mine_filters_by_status() {
    let ctx = TestContext::new();
    let client = ctx.client("ana@example.com", "22222222222").await;
    let first = ctx.seed_vehicle("ABC1D23", dec!(100.00)).await;
    let second = ctx.seed_vehicle("XYZ9A87", dec!(90.00)).await;
    let app = test::init_service(create_app(ctx.state.clone(), &ctx.config)).await;

    let mut ids = Vec::new();
    for vehicle_id in [first.id, second.id] {
        let req = test::TestRequest::post()
            .uri("/api/v1/rentals")
            .insert_header(ctx.bearer(&client))
            .set_json(rental_payload(vehicle_id, "2024-05-01", "2024-05-02"))
            .to_request();
        let body = json_body(test::call_service(&app, req).await).await;
        ids.push(body["data"]["id"].as_str().unwrap().to_string());
    }

    let req = test::TestRequest::patch()
        .uri(&format!("/api/v1/rentals/{}/complete", ids[0]))
        .insert_header(ctx.bearer(&client))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    for (uri, expected) in [
        ("/api/v1/rentals/mine", 2),
        ("/api/v1/rentals/mine/active", 1),
        ("/api/v1/rentals/mine/completed", 1),
        ("/api/v1/users/me/rentals/active", 1),
    ] {
        let req = test::TestRequest::get().uri(uri).insert_header(ctx.bearer(&client)).to_request();
        let body = json_body(test::call_service(&app, req).await).await;
        assert_eq!(body["data"].as_array().unwrap().len(), expected, "GET {}", uri);
    }

    let req = test::TestRequest::get()
        .uri("/api/v1/users/me/statistics")
        .insert_header(ctx.bearer(&client))
        .to_request();
    let body = json_body(test::call_service(&app, req).await).await;
    assert_eq!(body["data"]["total_rentals"], 2);
    let spent = Decimal::from_str(body["data"]["total_spent"].as_str().unwrap()).unwrap();
    assert_eq!(spent, dec!(190));
}

#[actix_web::test]
async fn test_encoded_path_cannot_list_other_users_rentals() {
    let ctx = TestContext::new();
    let owner = ctx.client("ana@example.com", "22222222222").await;
    let intruder = ctx.client("bia@example.com", "33333333333").await;
    let app = test::init_service(create_app(ctx.state.clone(), &ctx.config)).await;

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/rentals/%75ser/{}", owner.id))
        .insert_header(ctx.bearer(&intruder))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);
}
