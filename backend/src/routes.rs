use crate::handlers;
use actix_web::web;

/// Register the REST surface. App data (services, database) is attached
/// by the caller, which lets the test harness reuse the same routing.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .service(handlers::health::health_check)
            .service(
                web::scope("/users")
                    .route("", web::get().to(handlers::users::list_users))
                    .route("", web::post().to(handlers::users::create_user))
                    .route("/{user_id}", web::get().to(handlers::users::get_user))
                    .route("/{user_id}", web::put().to(handlers::users::update_user))
                    .route("/{user_id}", web::delete().to(handlers::users::delete_user)),
            )
            .service(
                web::scope("/products")
                    .route("", web::get().to(handlers::products::list_products))
                    .route("", web::post().to(handlers::products::create_product))
                    .route("/{product_id}", web::get().to(handlers::products::get_product))
                    .route("/{product_id}", web::put().to(handlers::products::update_product))
                    .route(
                        "/{product_id}",
                        web::delete().to(handlers::products::delete_product),
                    ),
            )
            .service(
                web::scope("/orders")
                    .route("", web::get().to(handlers::orders::list_orders))
                    .route("", web::post().to(handlers::orders::create_order))
                    .route("/{order_id}", web::get().to(handlers::orders::get_order))
                    .route("/{order_id}", web::put().to(handlers::orders::update_order))
                    .route("/{order_id}", web::delete().to(handlers::orders::delete_order))
                    .route(
                        "/{order_id}/items",
                        web::get().to(handlers::orders::get_order_items),
                    ),
            )
            .service(
                web::scope("/reports")
                    .route("/top-spenders", web::get().to(handlers::reports::top_spenders))
                    .route(
                        "/product-revenue",
                        web::get().to(handlers::reports::product_revenue),
                    )
                    .route(
                        "/monthly-revenue",
                        web::get().to(handlers::reports::monthly_revenue),
                    )
                    .route("/low-stock", web::get().to(handlers::reports::low_stock)),
            ),
    );
}
