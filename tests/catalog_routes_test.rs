mod common;

use actix_web::{http::StatusCode, test};
use serde_json::{json, Value};

use common::{bearer, TestApp};

fn names(body: &Value) -> Vec<String> {
    body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["name"].as_str().unwrap().to_string())
        .collect()
}

#[actix_rt::test]
async fn test_health_check() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "ok");
}

#[actix_rt::test]
async fn test_city_search_filters_and_sorts() {
    let test_app = TestApp::new();
    test_app.seed_city("Paris", "France", 80.0, 95.0).await;
    test_app.seed_city("Lyon", "France", 55.0, 60.0).await;
    test_app.seed_city("Porto", "Portugal", 40.0, 70.0).await;
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::get().uri("/api/cities").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["count"], 3);
    assert_eq!(names(&body), vec!["Paris", "Porto", "Lyon"]);

    let req = test::TestRequest::get()
        .uri("/api/cities?country=fra&sortBy=cost")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(names(&body), vec!["Lyon", "Paris"]);

    let req = test::TestRequest::get()
        .uri("/api/cities?search=po&maxCost=50")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(names(&body), vec!["Porto"]);

    let req = test::TestRequest::get()
        .uri("/api/cities?sortBy=name")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(names(&body), vec!["Lyon", "Paris", "Porto"]);
}

#[actix_rt::test]
async fn test_city_search_rejects_bad_query() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::get()
        .uri("/api/cities?minCost=cheap")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_rt::test]
async fn test_popular_cities_are_capped() {
    let test_app = TestApp::new();
    for i in 0..12 {
        test_app
            .seed_city(&format!("City {}", i), "Nowhere", 50.0, i as f64)
            .await;
    }
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::get().uri("/api/cities/popular").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["count"], 10);
    assert_eq!(body["data"][0]["name"], "City 11");
}

#[actix_rt::test]
async fn test_get_city_by_id() {
    let test_app = TestApp::new();
    let paris = test_app.seed_city("Paris", "France", 80.0, 95.0).await;
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::get()
        .uri(&format!("/api/cities/{}", paris.id))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["name"], "Paris");
    assert_eq!(body["data"]["costIndex"], 80.0);

    let req = test::TestRequest::get().uri("/api/cities/unknown").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "City not found");
}

#[actix_rt::test]
async fn test_create_city_requires_auth() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/cities")
        .set_json(json!({ "name": "Oslo", "country": "Norway" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::post()
        .uri("/api/cities")
        .insert_header(("Authorization", bearer("ana")))
        .set_json(json!({ "name": "Oslo", "country": "Norway", "costIndex": 90 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let req = test::TestRequest::post()
        .uri("/api/cities")
        .insert_header(("Authorization", bearer("ana")))
        .set_json(json!({ "name": "Oslo", "country": "Norway", "costIndex": 140 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_rt::test]
async fn test_activity_search() {
    let test_app = TestApp::new();
    let paris = test_app.seed_city("Paris", "France", 80.0, 95.0).await;
    let rome = test_app.seed_city("Rome", "Italy", 70.0, 90.0).await;
    test_app.seed_activity("Louvre", &paris, "culture", 17.0, 4.8).await;
    test_app.seed_activity("Seine Cruise", &paris, "sightseeing", 15.0, 4.2).await;
    test_app.seed_activity("Vatican Museums", &rome, "culture", 20.0, 4.9).await;
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::get().uri("/api/activities").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(names(&body), vec!["Vatican Museums", "Louvre", "Seine Cruise"]);

    let req = test::TestRequest::get()
        .uri(&format!("/api/activities?city={}&sortBy=cost", paris.id))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(names(&body), vec!["Seine Cruise", "Louvre"]);
    assert_eq!(body["data"][0]["city"]["name"], "Paris");

    let req = test::TestRequest::get()
        .uri("/api/activities?type=culture&maxCost=18")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(names(&body), vec!["Louvre"]);

    let req = test::TestRequest::get()
        .uri("/api/activities?type=skydiving")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_rt::test]
async fn test_create_activity_checks_city() {
    let test_app = TestApp::new();
    let paris = test_app.seed_city("Paris", "France", 80.0, 95.0).await;
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/activities")
        .insert_header(("Authorization", bearer("ana")))
        .set_json(json!({ "name": "Ghost Tour", "city": "nowhere", "type": "sightseeing" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::post()
        .uri("/api/activities")
        .insert_header(("Authorization", bearer("ana")))
        .set_json(json!({
            "name": "Ghost Tour",
            "city": paris.id,
            "type": "sightseeing",
            "cost": 12
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    let id = body["data"]["_id"].as_str().unwrap().to_string();
    assert_eq!(body["data"]["duration"], 60);

    let req = test::TestRequest::get()
        .uri(&format!("/api/activities/{}", id))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["name"], "Ghost Tour");
    assert_eq!(body["data"]["city"]["country"], "France");
}
