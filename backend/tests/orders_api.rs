// Order placement atomicity, stock accounting, and status lifecycle.
// Requires a provisioned Postgres at TEST_DATABASE_URL; run with
// `cargo test -- --ignored`.

mod common;

use actix_web::{http::StatusCode, test};
use serde_json::{json, Value};
use storefront_backend::services::OrderService;
use storefront_shared::{CreateOrderRequest, OrderLineRequest};

#[actix_web::test]
#[ignore]
async fn placement_totals_and_decrements_stock() {
    let pool = common::setup_test_database().await;
    let app = test::init_service(common::test_app(&pool)).await;

    let user = common::create_test_user(&pool).await;
    let product = common::create_test_product(&pool, "9.99", 5).await;

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/orders")
            .set_json(json!({
                "user_id": user.id,
                "shipping_address": "1 Test Street",
                "items": [{ "product_id": product.id, "quantity": 3 }],
            }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["total_price"], json!(29.97));
    assert_eq!(body["status"], json!("pending"));
    assert_eq!(body["items"][0]["quantity"], json!(3));

    assert_eq!(common::product_stock(&pool, product.id).await, 2);
}

#[actix_web::test]
#[ignore]
async fn oversell_is_rejected_and_nothing_persists() {
    let pool = common::setup_test_database().await;
    let app = test::init_service(common::test_app(&pool)).await;

    let user = common::create_test_user(&pool).await;
    let product = common::create_test_product(&pool, "9.99", 2).await;

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/orders")
            .set_json(json!({
                "user_id": user.id,
                "shipping_address": "1 Test Street",
                "items": [{ "product_id": product.id, "quantity": 3 }],
            }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    // Full rollback: no order, no items, stock unchanged.
    assert_eq!(common::product_stock(&pool, product.id).await, 2);

    let orders = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM orders WHERE user_id = $1")
        .bind(user.id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(orders, 0);
}

#[actix_web::test]
#[ignore]
async fn multi_line_rollback_restores_earlier_decrements() {
    let pool = common::setup_test_database().await;
    let app = test::init_service(common::test_app(&pool)).await;

    let user = common::create_test_user(&pool).await;
    let plentiful = common::create_test_product(&pool, "4.25", 50).await;
    let scarce = common::create_test_product(&pool, "149.00", 1).await;

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/orders")
            .set_json(json!({
                "user_id": user.id,
                "shipping_address": "1 Test Street",
                "items": [
                    { "product_id": plentiful.id, "quantity": 10 },
                    { "product_id": scarce.id, "quantity": 2 },
                ],
            }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    // The first line's decrement must roll back with the rest.
    assert_eq!(common::product_stock(&pool, plentiful.id).await, 50);
    assert_eq!(common::product_stock(&pool, scarce.id).await, 1);
}

#[actix_web::test]
#[ignore]
async fn zero_quantity_line_is_rejected() {
    let pool = common::setup_test_database().await;
    let app = test::init_service(common::test_app(&pool)).await;

    let user = common::create_test_user(&pool).await;
    let product = common::create_test_product(&pool, "9.99", 5).await;

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/orders")
            .set_json(json!({
                "user_id": user.id,
                "shipping_address": "1 Test Street",
                "items": [{ "product_id": product.id, "quantity": 0 }],
            }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
#[ignore]
async fn concurrent_last_unit_placements_resolve_one_winner() {
    let pool = common::setup_test_database().await;

    let user = common::create_test_user(&pool).await;
    let product = common::create_test_product(&pool, "9.99", 1).await;

    let service = OrderService::new(pool.clone());
    let request = |_: u32| CreateOrderRequest {
        user_id: user.id,
        shipping_address: "1 Test Street".to_string(),
        items: vec![OrderLineRequest {
            product_id: product.id,
            quantity: 1,
        }],
    };

    let (first, second) = tokio::join!(
        service.place_order(request(1)),
        service.place_order(request(2))
    );

    assert!(
        first.is_ok() != second.is_ok(),
        "exactly one placement must win the last unit: {:?} / {:?}",
        first.as_ref().err(),
        second.as_ref().err()
    );
    assert_eq!(common::product_stock(&pool, product.id).await, 0);
}

#[actix_web::test]
#[ignore]
async fn status_walks_forward_and_rejects_illegal_jumps() {
    let pool = common::setup_test_database().await;
    let app = test::init_service(common::test_app(&pool)).await;

    let user = common::create_test_user(&pool).await;
    let product = common::create_test_product(&pool, "9.99", 5).await;
    let order = common::place_test_order(&pool, user.id, product.id, 1).await;

    // pending -> delivered skips states and must fail.
    let resp = test::call_service(
        &app,
        test::TestRequest::put()
            .uri(&format!("/api/orders/{}", order.id))
            .set_json(json!({ "status": "delivered" }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    for next in ["confirmed", "shipped", "delivered"] {
        let resp = test::call_service(
            &app,
            test::TestRequest::put()
                .uri(&format!("/api/orders/{}", order.id))
                .set_json(json!({ "status": next }))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK, "transition to {}", next);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["status"], json!(next));
    }

    // Delivered is terminal.
    let resp = test::call_service(
        &app,
        test::TestRequest::put()
            .uri(&format!("/api/orders/{}", order.id))
            .set_json(json!({ "status": "cancelled" }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
#[ignore]
async fn cancelling_pending_order_restores_stock() {
    let pool = common::setup_test_database().await;
    let app = test::init_service(common::test_app(&pool)).await;

    let user = common::create_test_user(&pool).await;
    let product = common::create_test_product(&pool, "9.99", 5).await;
    let order = common::place_test_order(&pool, user.id, product.id, 3).await;
    assert_eq!(common::product_stock(&pool, product.id).await, 2);

    let resp = test::call_service(
        &app,
        test::TestRequest::put()
            .uri(&format!("/api/orders/{}", order.id))
            .set_json(json!({ "status": "cancelled" }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    assert_eq!(common::product_stock(&pool, product.id).await, 5);
}

#[actix_web::test]
#[ignore]
async fn deleting_order_cascades_to_items_without_restock() {
    let pool = common::setup_test_database().await;
    let app = test::init_service(common::test_app(&pool)).await;

    let user = common::create_test_user(&pool).await;
    let product = common::create_test_product(&pool, "9.99", 5).await;
    let order = common::place_test_order(&pool, user.id, product.id, 2).await;

    let resp = test::call_service(
        &app,
        test::TestRequest::delete()
            .uri(&format!("/api/orders/{}", order.id))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let items = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM order_items WHERE order_id = $1")
        .bind(order.id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(items, 0);

    // Administrative erase, not a cancellation: stock stays decremented.
    assert_eq!(common::product_stock(&pool, product.id).await, 3);
}

#[actix_web::test]
#[ignore]
async fn order_for_unknown_user_is_rejected() {
    let pool = common::setup_test_database().await;
    let app = test::init_service(common::test_app(&pool)).await;

    let product = common::create_test_product(&pool, "9.99", 5).await;

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/orders")
            .set_json(json!({
                "user_id": uuid::Uuid::new_v4(),
                "shipping_address": "1 Test Street",
                "items": [{ "product_id": product.id, "quantity": 1 }],
            }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
