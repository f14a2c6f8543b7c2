//! HTTP surface tests driven through the full router with
//! `tower::ServiceExt::oneshot`: routing, auth gating, status codes and
//! the exact response envelopes the storefront client relies on.

use std::sync::Arc;

use kirana_api::axum::{
    Router,
    body::{self, Body},
    http::{Request, StatusCode, header},
};
use kirana_api::entity::{sea_orm_active_enums::UserRole, user};
use kirana_api::sea_orm::{ActiveModelTrait, ConnectOptions, Database, Set};
use kirana_api::state::{State, StoreConfig};
use kirana_api::{construct_router, db};
use serde_json::{Value, json};
use tower::ServiceExt;

async fn test_app(seed: bool) -> (Router, Arc<State>) {
    let mut options = ConnectOptions::new("sqlite::memory:".to_owned());
    options.max_connections(1).sqlx_logging(false);
    let db = Database::connect(options).await.unwrap();
    db::setup(&db).await.unwrap();
    if seed {
        db::seed(&db).await.unwrap();
    }
    let state = Arc::new(State::new(db, "test-secret", StoreConfig::default()));
    (construct_router(state.clone()), state)
}

fn request(method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// Runs one request and decodes the body, as JSON when possible.
async fn call(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
    (status, value)
}

async fn register(app: &Router, name: &str, email: &str) -> String {
    let (status, body) = call(
        app,
        request(
            "POST",
            "/api/auth/register",
            None,
            Some(json!({ "name": name, "email": email, "password": "secret123" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "register failed: {body}");
    body["token"].as_str().unwrap().to_string()
}

/// The seed ships a back-office account with the password `password`.
async fn admin_token(app: &Router) -> String {
    let (status, body) = call(
        app,
        request(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({ "email": "admin@foodstore.com", "password": "password" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "admin login failed: {body}");
    body["token"].as_str().unwrap().to_string()
}

/// Looks a product up by search term and returns `(id, price)`.
async fn find_product(app: &Router, search: &str) -> (String, f64) {
    let (status, body) = call(
        app,
        request("GET", &format!("/api/products?search={search}"), None, None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let product = &body["products"][0];
    (
        product["id"].as_str().unwrap().to_string(),
        product["price"].as_f64().unwrap(),
    )
}

#[tokio::test]
async fn health_version_and_store_info_respond() {
    let (app, _) = test_app(false).await;

    let (status, body) = call(&app, request("GET", "/api/health", None, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let (status, body) = call(&app, request("GET", "/api/health/db", None, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["rtt"].is_number());

    let (status, body) = call(&app, request("GET", "/api/version", None, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, env!("CARGO_PKG_VERSION"));

    let (status, body) = call(&app, request("GET", "/api", None, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "FoodStore");
    assert_eq!(body["currency"], "INR");
}

#[tokio::test]
async fn missing_and_invalid_tokens_are_told_apart() {
    let (app, _) = test_app(false).await;

    let (status, body) = call(&app, request("GET", "/api/orders/my-orders", None, None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "UNAUTHORIZED");
    assert_eq!(body["error"]["message"], "Access token required");

    let (status, body) = call(
        &app,
        request("GET", "/api/orders/my-orders", Some("not-a-jwt"), None),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"]["message"], "Invalid or expired token");
}

#[tokio::test]
async fn register_login_me_roundtrip() {
    let (app, _) = test_app(false).await;

    let (status, body) = call(
        &app,
        request(
            "POST",
            "/api/auth/register",
            None,
            Some(json!({
                "name": "Asha",
                "email": "asha@example.com",
                "password": "secret123",
                "phone": "9876543210"
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "User created successfully");
    assert_eq!(body["user"]["email"], "asha@example.com");
    assert_eq!(body["user"]["role"], "customer");
    assert!(
        body["user"].get("password_hash").is_none(),
        "the hash must never leave the server"
    );
    let token = body["token"].as_str().unwrap().to_string();

    let (status, body) = call(
        &app,
        request(
            "POST",
            "/api/auth/register",
            None,
            Some(json!({ "name": "Asha", "email": "asha@example.com", "password": "secret123" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"]["message"],
        "An account with this email already exists. Please use a different email or try logging in."
    );

    let (status, body) = call(
        &app,
        request(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({ "email": "asha@example.com", "password": "wrong-pass" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["message"], "Invalid credentials");

    let (status, body) = call(
        &app,
        request(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({ "email": "asha@example.com", "password": "secret123" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Login successful");

    let (status, body) = call(&app, request("GET", "/api/auth/me", Some(&token), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["email"], "asha@example.com");
}

#[tokio::test]
async fn registration_validation_messages_match_the_client_contract() {
    let (app, _) = test_app(false).await;

    let cases = [
        (
            json!({ "name": "A", "email": "a@b.co", "password": "secret123" }),
            "Name must be at least 2 characters",
        ),
        (
            json!({ "name": "Asha", "email": "not-an-email", "password": "secret123" }),
            "Valid email required",
        ),
        (
            json!({ "name": "Asha", "email": "a@b.co", "password": "short" }),
            "Password must be at least 6 characters",
        ),
        (
            json!({ "name": "Asha", "email": "a@b.co", "password": "secret123", "phone": "12345" }),
            "Phone number must be 10-15 digits",
        ),
    ];

    for (payload, message) in cases {
        let (status, body) = call(
            &app,
            request("POST", "/api/auth/register", None, Some(payload)),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["message"], message);
    }
}

#[tokio::test]
async fn admin_gate_reads_the_database_not_the_token() {
    let (app, state) = test_app(false).await;
    let token = register(&app, "Asha", "asha@example.com").await;

    let (status, body) = call(&app, request("GET", "/api/admin/dashboard", Some(&token), None)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"]["message"], "Admin access required");

    let me = call(&app, request("GET", "/api/auth/me", Some(&token), None)).await;
    let user_id = me.1["user"]["id"].as_str().unwrap().to_string();
    user::ActiveModel {
        id: Set(user_id),
        role: Set(UserRole::Admin),
        ..Default::default()
    }
    .update(&state.db)
    .await
    .unwrap();

    // Same token, the promotion takes effect without a re-login.
    let (status, body) = call(&app, request("GET", "/api/admin/dashboard", Some(&token), None)).await;
    assert_eq!(status, StatusCode::OK, "promoted user was rejected: {body}");
    assert!(body["totalOrders"].is_number());
    assert!(body["totalRevenue"].is_number());
    assert!(body["recentOrders"].is_array());
    assert!(body["lowStockProducts"].is_array());
}

#[tokio::test]
async fn catalog_paginates_and_hides_deactivated_products() {
    let (app, _) = test_app(true).await;

    let (status, body) = call(&app, request("GET", "/api/products?limit=4", None, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["products"].as_array().unwrap().len(), 4);
    assert_eq!(body["pagination"]["currentPage"], 1);
    assert_eq!(body["pagination"]["totalPages"], 3);
    assert_eq!(body["pagination"]["totalItems"], 10);
    assert_eq!(body["pagination"]["itemsPerPage"], 4);
    assert!(body["products"][0].get("category_name").is_some());

    let (basmati_id, _) = find_product(&app, "Basmati").await;

    let admin = admin_token(&app).await;
    let (status, body) = call(
        &app,
        request(
            "DELETE",
            &format!("/api/admin/products/{basmati_id}"),
            Some(&admin),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Product deactivated successfully");

    let (status, body) = call(&app, request("GET", "/api/products?limit=100", None, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["pagination"]["totalItems"], 9);

    let (status, body) = call(
        &app,
        request("GET", &format!("/api/products/{basmati_id}"), None, None),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
    assert_eq!(body["error"]["message"], "Product not found");

    // The admin listing still shows it.
    let (status, body) = call(
        &app,
        request("GET", "/api/admin/products?limit=100", Some(&admin), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["pagination"]["totalItems"], 10);
}

#[tokio::test]
async fn cart_checkout_and_cancel_flow() {
    let (app, _) = test_app(true).await;
    let token = register(&app, "Asha", "asha@example.com").await;
    let (chips_id, chips_price) = find_product(&app, "Potato").await;

    let (status, body) = call(
        &app,
        request(
            "POST",
            "/api/products/cart/add",
            Some(&token),
            Some(json!({ "productId": chips_id, "quantity": 2 })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Item added to cart successfully");

    let (status, body) = call(
        &app,
        request(
            "POST",
            "/api/products/cart/add",
            Some(&token),
            Some(json!({ "productId": chips_id })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Cart updated successfully");

    let (status, body) = call(
        &app,
        request("GET", "/api/products/cart/items", Some(&token), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let items = body["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["quantity"], 3);
    let expected_total = chips_price * 3.0;
    assert!((body["totalAmount"].as_f64().unwrap() - expected_total).abs() < 1e-6);

    let (status, body) = call(
        &app,
        request(
            "POST",
            "/api/orders/create",
            Some(&token),
            Some(json!({ "deliveryAddress": "12 Market Road", "phone": "9876543210" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "checkout failed: {body}");
    assert_eq!(body["message"], "Order created successfully");
    let order = &body["order"];
    let order_id = order["id"].as_str().unwrap().to_string();
    assert!((order["totalAmount"].as_f64().unwrap() - expected_total).abs() < 1e-6);
    assert!(order["orderReference"].as_str().unwrap().starts_with("ORD-"));
    assert!(order["upiString"].as_str().unwrap().starts_with("upi://pay?pa=merchant@paytm"));
    assert!(
        order["qrCode"]
            .as_str()
            .unwrap()
            .starts_with("data:image/png;base64,")
    );

    let (status, body) = call(
        &app,
        request("GET", "/api/products/cart/items", Some(&token), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["items"].as_array().unwrap().is_empty());

    let (status, body) = call(
        &app,
        request("GET", "/api/orders/my-orders", Some(&token), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let orders = body["orders"].as_array().unwrap();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0]["status"], "pending");
    assert_eq!(
        orders[0]["items"],
        "Potato Chips - Classic Salted x3",
        "history recap line"
    );

    let (status, body) = call(
        &app,
        request(
            "PUT",
            &format!("/api/orders/{order_id}/cancel"),
            Some(&token),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Order cancelled successfully");

    let (status, body) = call(
        &app,
        request("GET", &format!("/api/products/{chips_id}"), None, None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["product"]["stock_quantity"], 100, "stock came back");
}

#[tokio::test]
async fn order_status_lifecycle_over_http() {
    let (app, _) = test_app(true).await;
    let token = register(&app, "Asha", "asha@example.com").await;
    let admin = admin_token(&app).await;
    let (chips_id, _) = find_product(&app, "Potato").await;

    call(
        &app,
        request(
            "POST",
            "/api/products/cart/add",
            Some(&token),
            Some(json!({ "productId": chips_id, "quantity": 4 })),
        ),
    )
    .await;
    let (_, body) = call(
        &app,
        request(
            "POST",
            "/api/orders/create",
            Some(&token),
            Some(json!({ "deliveryAddress": "12 Market Road", "phone": "9876543210" })),
        ),
    )
    .await;
    let order_id = body["order"]["id"].as_str().unwrap().to_string();

    let (status, body) = call(
        &app,
        request(
            "PUT",
            &format!("/api/admin/orders/{order_id}/status"),
            Some(&admin),
            Some(json!({ "status": "flying" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["message"], "Invalid status");

    let (status, body) = call(
        &app,
        request(
            "PUT",
            &format!("/api/admin/orders/{order_id}/status"),
            Some(&admin),
            Some(json!({ "status": "shipped" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Order status updated successfully");

    // Shipped orders are out of the customer's cancellation window.
    let (status, body) = call(
        &app,
        request(
            "PUT",
            &format!("/api/orders/{order_id}/cancel"),
            Some(&token),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["message"], "Order not found or cannot be cancelled");

    let (status, _) = call(
        &app,
        request(
            "PUT",
            &format!("/api/admin/orders/{order_id}/status"),
            Some(&admin),
            Some(json!({ "status": "cancelled" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = call(
        &app,
        request("GET", &format!("/api/products/{chips_id}"), None, None),
    )
    .await;
    assert_eq!(body["product"]["stock_quantity"], 100, "admin cancel restores stock");

    let (status, body) = call(
        &app,
        request("GET", "/api/admin/orders?status=cancelled", Some(&admin), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["orders"][0]["customer_name"], "Asha");
    assert_eq!(body["pagination"]["totalItems"], 1);
}

#[tokio::test]
async fn category_guards_over_http() {
    let (app, _) = test_app(true).await;
    let token = register(&app, "Asha", "asha@example.com").await;
    let admin = admin_token(&app).await;

    let (status, body) = call(
        &app,
        request(
            "POST",
            "/api/categories",
            Some(&token),
            Some(json!({ "name": "Pickles" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"]["message"], "Admin access required");

    let (status, body) = call(
        &app,
        request(
            "POST",
            "/api/categories",
            Some(&admin),
            Some(json!({ "name": "Pickles" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Category added successfully");
    let pickles_id = body["categoryId"].as_str().unwrap().to_string();

    let (status, body) = call(
        &app,
        request(
            "POST",
            "/api/categories",
            Some(&admin),
            Some(json!({ "name": "pickles" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["message"], "Category name already exists");

    let (status, body) = call(&app, request("GET", "/api/categories", None, None)).await;
    assert_eq!(status, StatusCode::OK);
    let categories = body["categories"].as_array().unwrap();
    let snacks = categories.iter().find(|c| c["name"] == "Snacks").unwrap();
    assert_eq!(snacks["product_count"], 2);
    let snacks_id = snacks["id"].as_str().unwrap().to_string();

    let (status, body) = call(
        &app,
        request(
            "DELETE",
            &format!("/api/categories/{snacks_id}"),
            Some(&admin),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(
        body["error"]["message"],
        "Cannot delete category. 2 products are still using this category. Please reassign or remove those products first."
    );

    let (status, body) = call(
        &app,
        request(
            "DELETE",
            &format!("/api/categories/{pickles_id}"),
            Some(&admin),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Category deleted successfully");
}

#[tokio::test]
async fn customer_listing_aggregates_their_orders() {
    let (app, _) = test_app(true).await;
    let token = register(&app, "Asha", "asha@example.com").await;
    let admin = admin_token(&app).await;
    let (chips_id, price) = find_product(&app, "Potato").await;

    let (status, _) = call(&app, request("GET", "/api/admin/customers", Some(&token), None)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    call(
        &app,
        request(
            "POST",
            "/api/products/cart/add",
            Some(&token),
            Some(json!({ "productId": chips_id, "quantity": 2 })),
        ),
    )
    .await;
    let (status, body) = call(
        &app,
        request(
            "POST",
            "/api/orders/create",
            Some(&token),
            Some(json!({ "deliveryAddress": "12 Market Road", "phone": "9876543210" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "checkout failed: {body}");

    let (status, body) = call(&app, request("GET", "/api/admin/customers", Some(&admin), None)).await;
    assert_eq!(status, StatusCode::OK);
    let customers = body["customers"].as_array().unwrap();
    // The seeded back-office account is not a customer.
    assert_eq!(customers.len(), 1);
    assert_eq!(customers[0]["name"], "Asha");
    assert_eq!(customers[0]["total_orders"], 1);
    assert!((customers[0]["total_spent"].as_f64().unwrap() - 2.0 * price).abs() < 1e-6);
    assert_eq!(body["pagination"]["totalItems"], 1);
}
