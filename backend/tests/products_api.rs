// Product CRUD, catalog invariants, and referential protection.
// Requires a provisioned Postgres at TEST_DATABASE_URL; run with
// `cargo test -- --ignored`.

mod common;

use actix_web::{http::StatusCode, test};
use serde_json::{json, Value};

#[actix_web::test]
#[ignore]
async fn create_and_fetch_product() {
    let pool = common::setup_test_database().await;
    let app = test::init_service(common::test_app(&pool)).await;

    let name = common::unique("widget");
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/products")
            .set_json(json!({
                "name": name,
                "description": "A standard widget",
                "price": 9.99,
                "category": "gadgets",
                "stock_quantity": 5,
            }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["stock_quantity"], json!(5));

    let id = body["id"].as_str().unwrap();
    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/api/products/{}", id))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
#[ignore]
async fn non_positive_price_is_rejected() {
    let pool = common::setup_test_database().await;
    let app = test::init_service(common::test_app(&pool)).await;

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/products")
            .set_json(json!({
                "name": common::unique("freebie"),
                "price": 0.0,
                "category": "gadgets",
                "stock_quantity": 5,
            }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
#[ignore]
async fn negative_stock_is_rejected() {
    let pool = common::setup_test_database().await;
    let app = test::init_service(common::test_app(&pool)).await;

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/products")
            .set_json(json!({
                "name": common::unique("antimatter"),
                "price": 9.99,
                "category": "gadgets",
                "stock_quantity": -1,
            }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
#[ignore]
async fn update_changes_catalog_price_but_not_placed_orders() {
    let pool = common::setup_test_database().await;
    let app = test::init_service(common::test_app(&pool)).await;

    let user = common::create_test_user(&pool).await;
    let product = common::create_test_product(&pool, "9.99", 10).await;
    let order = common::place_test_order(&pool, user.id, product.id, 1).await;

    let resp = test::call_service(
        &app,
        test::TestRequest::put()
            .uri(&format!("/api/products/{}", product.id))
            .set_json(json!({ "price": 19.99 }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    // The order line keeps its snapshot price.
    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/api/orders/{}", order.id))
            .to_request(),
    )
    .await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["items"][0]["unit_price"], json!(9.99));
    assert_eq!(body["total_price"], json!(9.99));
}

#[actix_web::test]
#[ignore]
async fn referenced_product_cannot_be_deleted() {
    let pool = common::setup_test_database().await;
    let app = test::init_service(common::test_app(&pool)).await;

    let user = common::create_test_user(&pool).await;
    let product = common::create_test_product(&pool, "9.99", 10).await;
    common::place_test_order(&pool, user.id, product.id, 1).await;

    let resp = test::call_service(
        &app,
        test::TestRequest::delete()
            .uri(&format!("/api/products/{}", product.id))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    // Still present.
    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/api/products/{}", product.id))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
#[ignore]
async fn unreferenced_product_deletes_cleanly() {
    let pool = common::setup_test_database().await;
    let app = test::init_service(common::test_app(&pool)).await;

    let product = common::create_test_product(&pool, "9.99", 10).await;

    let resp = test::call_service(
        &app,
        test::TestRequest::delete()
            .uri(&format!("/api/products/{}", product.id))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/api/products/{}", product.id))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
#[ignore]
async fn category_filter_narrows_listing() {
    let pool = common::setup_test_database().await;
    let app = test::init_service(common::test_app(&pool)).await;

    let category = common::unique("cat");
    for _ in 0..2 {
        test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/products")
                .set_json(json!({
                    "name": common::unique("filtered"),
                    "price": 1.50,
                    "category": category.clone(),
                    "stock_quantity": 1,
                }))
                .to_request(),
        )
        .await;
    }

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/api/products?category={}", category))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["total"], json!(2));
}
