mod common;

use actix_web::{http::StatusCode, test};
use serde_json::{json, Value};

use common::{bearer, TestApp};

#[actix_rt::test]
async fn test_share_link_is_public_and_rotates() {
    let test_app = TestApp::with_base_url("https://triptales.app");
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/trips")
        .insert_header(("Authorization", bearer("ana")))
        .set_json(json!({ "name": "Kyoto", "startDate": "2025-04-01", "endDate": "2025-04-07" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let trip_id = body["data"]["_id"].as_str().unwrap().to_string();

    let req = test::TestRequest::post()
        .uri(&format!("/api/trips/{}/share", trip_id))
        .insert_header(("Authorization", bearer("ben")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::post()
        .uri(&format!("/api/trips/{}/share", trip_id))
        .insert_header(("Authorization", bearer("ana")))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let first = body["shareToken"].as_str().unwrap().to_string();
    assert_eq!(first.len(), 64);
    assert_eq!(
        body["shareUrl"],
        format!("https://triptales.app/trip/{}", first)
    );

    // No Authorization header needed to read a shared trip.
    let req = test::TestRequest::get()
        .uri(&format!("/api/trips/share/{}", first))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["name"], "Kyoto");
    assert_eq!(body["data"]["isPublic"], true);

    let req = test::TestRequest::post()
        .uri(&format!("/api/trips/{}/share", trip_id))
        .insert_header(("Authorization", bearer("ana")))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let second = body["shareToken"].as_str().unwrap().to_string();
    assert_ne!(first, second);

    let req = test::TestRequest::get()
        .uri(&format!("/api/trips/share/{}", first))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn test_private_trip_is_hidden_from_share_link() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/trips")
        .insert_header(("Authorization", bearer("ana")))
        .set_json(json!({ "name": "Lisbon", "startDate": "2025-05-01", "endDate": "2025-05-04" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let trip_id = body["data"]["_id"].as_str().unwrap().to_string();

    let req = test::TestRequest::post()
        .uri(&format!("/api/trips/{}/share", trip_id))
        .insert_header(("Authorization", bearer("ana")))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let token = body["shareToken"].as_str().unwrap().to_string();
    assert!(body["shareUrl"].as_str().unwrap().ends_with(&format!("/trip/{}", token)));

    let req = test::TestRequest::put()
        .uri(&format!("/api/trips/{}", trip_id))
        .insert_header(("Authorization", bearer("ana")))
        .set_json(json!({ "isPublic": false }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri(&format!("/api/trips/share/{}", token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn test_unknown_share_token() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::get()
        .uri("/api/trips/share/deadbeef")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Trip not found");
}

#[actix_rt::test]
async fn test_failed_share_leaves_trip_private() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/trips")
        .insert_header(("Authorization", bearer("ana")))
        .set_json(json!({ "name": "Lima", "startDate": "2025-09-01", "endDate": "2025-09-05" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let trip_id = body["data"]["_id"].as_str().unwrap().to_string();

    // Without a configured base the link is built from the Host header.
    let req = test::TestRequest::post()
        .uri(&format!("/api/trips/{}/share", trip_id))
        .insert_header(("Host", "bad host"))
        .insert_header(("Authorization", bearer("ana")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Internal server error");

    let req = test::TestRequest::get()
        .uri(&format!("/api/trips/{}", trip_id))
        .insert_header(("Authorization", bearer("ben")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::get()
        .uri(&format!("/api/trips/{}", trip_id))
        .insert_header(("Authorization", bearer("ana")))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["isPublic"], false);
    assert!(body["data"]["shareToken"].is_null());
}
