// Analytical query catalog: rankings, trend buckets, and alerts.
// Requires a provisioned Postgres at TEST_DATABASE_URL; run with
// `cargo test -- --ignored`.

mod common;

use actix_web::{http::StatusCode, test};
use serde_json::{json, Value};
use storefront_backend::services::ReportService;

#[actix_web::test]
#[ignore]
async fn top_spenders_ranks_by_lifetime_spend() {
    let pool = common::setup_test_database().await;

    let big = common::create_test_user(&pool).await;
    let small = common::create_test_user(&pool).await;
    let product = common::create_test_product(&pool, "10.00", 100).await;

    common::place_test_order(&pool, big.id, product.id, 5).await; // 50.00
    common::place_test_order(&pool, small.id, product.id, 1).await; // 10.00

    let rows = ReportService::new(pool.clone())
        .top_spenders(100_000)
        .await
        .unwrap();

    let pos = |id| rows.iter().position(|r| r.user_id == id);
    let (big_pos, small_pos) = (pos(big.id).unwrap(), pos(small.id).unwrap());
    assert!(
        big_pos < small_pos,
        "larger spender must rank before smaller one"
    );

    let big_row = &rows[big_pos];
    assert_eq!(big_row.order_count, 1);
    assert_eq!(
        big_row.total_spent,
        "50.00".parse::<rust_decimal::Decimal>().unwrap()
    );
}

#[actix_web::test]
#[ignore]
async fn cancelled_orders_do_not_count_as_revenue() {
    let pool = common::setup_test_database().await;
    let app = test::init_service(common::test_app(&pool)).await;

    let user = common::create_test_user(&pool).await;
    let product = common::create_test_product(&pool, "10.00", 100).await;
    let order = common::place_test_order(&pool, user.id, product.id, 2).await;

    let resp = test::call_service(
        &app,
        test::TestRequest::put()
            .uri(&format!("/api/orders/{}", order.id))
            .set_json(json!({ "status": "cancelled" }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let rows = ReportService::new(pool.clone())
        .top_spenders(100_000)
        .await
        .unwrap();
    assert!(
        rows.iter().all(|r| r.user_id != user.id),
        "cancelled-only users must not appear in the spend ranking"
    );
}

#[actix_web::test]
#[ignore]
async fn product_revenue_breaks_ties_deterministically() {
    let pool = common::setup_test_database().await;

    let user = common::create_test_user(&pool).await;
    let first = common::create_test_product(&pool, "10.00", 100).await;
    let second = common::create_test_product(&pool, "10.00", 100).await;

    // Identical revenue for both products.
    common::place_test_order(&pool, user.id, first.id, 2).await;
    common::place_test_order(&pool, user.id, second.id, 2).await;

    let service = ReportService::new(pool.clone());
    let run_a = service.product_revenue(100_000).await.unwrap();
    let run_b = service.product_revenue(100_000).await.unwrap();

    let order_a: Vec<_> = run_a.iter().map(|r| r.product_id).collect();
    let order_b: Vec<_> = run_b.iter().map(|r| r.product_id).collect();
    assert_eq!(order_a, order_b, "tied rows must keep a stable order");

    let rank_of = |id| run_a.iter().find(|r| r.product_id == id).unwrap().revenue_rank;
    assert_eq!(
        rank_of(first.id),
        rank_of(second.id),
        "equal revenue shares a rank"
    );
}

#[actix_web::test]
#[ignore]
async fn monthly_revenue_returns_buckets() {
    let pool = common::setup_test_database().await;

    let user = common::create_test_user(&pool).await;
    let product = common::create_test_product(&pool, "10.00", 100).await;
    common::place_test_order(&pool, user.id, product.id, 1).await;

    let rows = ReportService::new(pool.clone()).monthly_revenue().await.unwrap();
    assert!(!rows.is_empty());

    // Buckets arrive oldest first.
    for pair in rows.windows(2) {
        assert!(pair[0].month <= pair[1].month);
    }
}

#[actix_web::test]
#[ignore]
async fn low_stock_respects_threshold_over_http() {
    let pool = common::setup_test_database().await;
    let app = test::init_service(common::test_app(&pool)).await;

    let depleted = common::create_test_product(&pool, "10.00", 1).await;
    let healthy = common::create_test_product(&pool, "10.00", 500).await;

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/reports/low-stock?threshold=3")
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    let rows = body.as_array().unwrap();
    let listed = |id: uuid::Uuid| {
        rows.iter()
            .any(|r| r["product_id"] == json!(id.to_string()))
    };

    assert!(listed(depleted.id));
    assert!(!listed(healthy.id));
}
