//! End-to-end tests of the HTTP client against an in-process axum server.

use axum::body::Bytes;
use axum::extract::{Multipart, Path, State};
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::{any, get, patch, post};
use axum::{Json, Router};
use jsonwebtoken::{EncodingKey, Header};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

use vendora_api::{ApiClient, ApiClientError, ApiConfig, ProductCatalogProvider, SalesApi};
use vendora_core::composer::SaleComposer;
use vendora_core::dto::{
    CreateCategoryDto, CreateClientDto, CreateProductDto, CreateUserDto, ImageUpload,
    UpdateCategoryDto, UpdateClientDto, UpdateProductDto, UpdateUserDto,
};
use vendora_core::{Money, SaleSubmission, ValidationError};

// =============================================================================
// Fake API
// =============================================================================

#[derive(Clone, Default)]
struct Recorded {
    sales: Arc<Mutex<Vec<Value>>>,
    canceled: Arc<Mutex<Vec<String>>>,
    /// Every other request as `(method, path, body)`; multipart bodies are
    /// flattened to a field map.
    calls: Arc<Mutex<Vec<(String, String, Value)>>>,
}

impl Recorded {
    fn record(&self, method: &Method, path: &str, body: Value) {
        self.calls
            .lock()
            .unwrap()
            .push((method.to_string(), path.to_string(), body));
    }

    fn calls(&self) -> Vec<(String, String, Value)> {
        self.calls.lock().unwrap().clone()
    }
}

fn token() -> String {
    jsonwebtoken::encode(
        &Header::default(),
        &json!({ "sub": "u1", "name": "Ana", "email": "ana@shop.test" }),
        &EncodingKey::from_secret(b"server-secret"),
    )
    .unwrap()
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(|v| v == format!("Bearer {}", token()))
        .unwrap_or(false)
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "statusCode": 401, "message": "Unauthorized" })),
    )
        .into_response()
}

fn product(id: &str, price: f64, active: bool) -> Value {
    json!({
        "id": id,
        "name": format!("Product {}", id),
        "price": price,
        "categoryId": "C1",
        "category": { "name": "Drinks" },
        "isActive": active
    })
}

async fn login(Json(body): Json<Value>) -> Response {
    if body["password"] == "secret123" {
        Json(json!({ "access_token": token() })).into_response()
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "statusCode": 401, "message": "Invalid credentials" })),
        )
            .into_response()
    }
}

async fn list_products(headers: HeaderMap) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    Json(json!([
        product("P1", 10.0, true),
        product("P2", 5.0, true),
        product("P3", 99.99, false)
    ]))
    .into_response()
}

async fn get_product(Path(id): Path<String>) -> Response {
    match id.as_str() {
        "P1" => Json(product("P1", 10.0, true)).into_response(),
        _ => (
            StatusCode::NOT_FOUND,
            Json(json!({ "statusCode": 404, "message": format!("Product {} not found", id) })),
        )
            .into_response(),
    }
}

async fn restore_product(Path(_id): Path<String>) -> StatusCode {
    StatusCode::OK
}

/// Multipart form as `{ field: text }`, files as `{ fileName, contentType, size }`.
async fn read_form(mut multipart: Multipart) -> Value {
    let mut fields = serde_json::Map::new();
    while let Some(field) = multipart.next_field().await.unwrap() {
        let name = field.name().unwrap().to_string();
        let value = match field.file_name().map(str::to_string) {
            Some(file_name) => {
                let content_type = field.content_type().map(str::to_string);
                let bytes = field.bytes().await.unwrap();
                json!({ "fileName": file_name, "contentType": content_type, "size": bytes.len() })
            }
            None => Value::String(field.text().await.unwrap()),
        };
        fields.insert(name, value);
    }
    Value::Object(fields)
}

async fn create_product(State(recorded): State<Recorded>, multipart: Multipart) -> Response {
    let form = read_form(multipart).await;
    recorded.record(&Method::POST, "/products", form.clone());
    (
        StatusCode::CREATED,
        Json(json!({
            "id": "P9",
            "name": form["name"],
            "price": 12.5,
            "categoryId": form["categoryId"],
            "isActive": true
        })),
    )
        .into_response()
}

async fn update_product(
    State(recorded): State<Recorded>,
    Path(id): Path<String>,
    multipart: Multipart,
) -> Response {
    let form = read_form(multipart).await;
    recorded.record(&Method::PATCH, &format!("/products/{}", id), form);
    Json(product(&id, 12.0, true)).into_response()
}

async fn remove_product(State(recorded): State<Recorded>, Path(id): Path<String>) -> StatusCode {
    recorded.record(&Method::DELETE, &format!("/products/{}", id), Value::Null);
    StatusCode::OK
}

fn category() -> Value {
    json!({ "id": "CAT1", "name": "Drinks", "isActive": true })
}

fn customer() -> Value {
    json!({
        "id": "CL1",
        "name": "Bob Stone",
        "email": "bob@shop.test",
        "phone": "555-0101",
        "address": "1 Main St",
        "zipCode": "12345",
        "isActive": true,
        "createdAt": "2026-10-01T09:00:00Z",
        "updatedAt": "2026-10-01T09:00:00Z"
    })
}

fn operator() -> Value {
    json!({
        "id": "U2",
        "name": "Carla",
        "email": "carla@shop.test",
        "isActive": true,
        "createdAt": "2026-10-01T09:00:00Z",
        "updatedAt": "2026-10-01T09:00:00Z"
    })
}

/// JSON resources: records the call and answers with a canned entity
/// (an array for collection GETs).
async fn resource(
    State(recorded): State<Recorded>,
    method: Method,
    uri: Uri,
    body: Bytes,
) -> Response {
    let path = uri.path().to_string();
    let body = serde_json::from_slice(&body).unwrap_or(Value::Null);
    recorded.record(&method, &path, body);

    if path.ends_with("/missing") {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({ "statusCode": 404, "message": "Not Found" })),
        )
            .into_response();
    }

    let entity = if path.starts_with("/categories") {
        category()
    } else if path.starts_with("/clients") {
        customer()
    } else {
        operator()
    };

    let is_collection = path.matches('/').count() == 1 && !path.starts_with("/auth");
    if method == Method::GET && is_collection {
        Json(json!([entity])).into_response()
    } else {
        Json(entity).into_response()
    }
}

async fn create_sale(
    State(recorded): State<Recorded>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }

    let items = body["items"].as_array().cloned().unwrap_or_default();
    if items.iter().any(|i| i["productId"] == "P3") {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "statusCode": 400,
                "message": ["Product P3 is inactive", "Sale rejected"],
                "error": "Bad Request"
            })),
        )
            .into_response();
    }

    recorded.sales.lock().unwrap().push(body.clone());

    let priced: Vec<Value> = items
        .iter()
        .enumerate()
        .map(|(n, i)| {
            let unit = if i["productId"] == "P1" { 10.0 } else { 5.0 };
            json!({
                "id": format!("SI{}", n),
                "productId": i["productId"],
                "quantity": i["quantity"],
                "unitPrice": unit
            })
        })
        .collect();
    let total: f64 = priced
        .iter()
        .map(|i| i["unitPrice"].as_f64().unwrap() * i["quantity"].as_f64().unwrap())
        .sum();

    (
        StatusCode::CREATED,
        Json(json!({
            "id": "S1",
            "userId": "u1",
            "clientId": body.get("clientId"),
            "total": total,
            "canceled": false,
            "createdAt": "2026-10-16T12:00:00Z",
            "items": priced
        })),
    )
        .into_response()
}

async fn cancel_sale(State(recorded): State<Recorded>, Path(id): Path<String>) -> StatusCode {
    recorded.canceled.lock().unwrap().push(id);
    StatusCode::OK
}

async fn spawn_server() -> (String, Recorded) {
    let recorded = Recorded::default();
    let app = Router::new()
        .route("/auth/login", post(login))
        .route("/auth/register", post(resource))
        .route("/products", get(list_products).post(create_product))
        .route(
            "/products/{id}",
            get(get_product).patch(update_product).delete(remove_product),
        )
        .route("/categories", any(resource))
        .route("/categories/{id}", any(resource))
        .route("/categories/restore/{id}", any(resource))
        .route("/clients", any(resource))
        .route("/clients/{id}", any(resource))
        .route("/clients/restore/{id}", any(resource))
        .route("/users", any(resource))
        .route("/users/{id}", any(resource))
        .route("/products/restore/{id}", patch(restore_product))
        .route("/sales", post(create_sale))
        .route("/sales/{id}", axum::routing::delete(cancel_sale))
        .with_state(recorded.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}", addr), recorded)
}

async fn signed_in_client() -> (ApiClient, Recorded) {
    let (url, recorded) = spawn_server().await;
    let client = ApiClient::new(&ApiConfig::for_url(url)).unwrap();
    client.auth().login("ana@shop.test", "secret123").await.unwrap();
    (client, recorded)
}

// =============================================================================
// Tests
// =============================================================================

#[tokio::test]
async fn test_login_stores_token_and_decodes_user() {
    let (url, _) = spawn_server().await;
    let client = ApiClient::new(&ApiConfig::for_url(url)).unwrap();

    let user = client
        .auth()
        .login("ana@shop.test", "secret123")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(user.name, "Ana");
    assert_eq!(user.email.as_deref(), Some("ana@shop.test"));
    assert!(client.tokens().is_authenticated());

    client.auth().logout().unwrap();
    assert!(client.auth().current_user().is_none());
}

#[tokio::test]
async fn test_bad_credentials_are_unauthorized() {
    let (url, _) = spawn_server().await;
    let client = ApiClient::new(&ApiConfig::for_url(url)).unwrap();

    let err = client.auth().login("ana@shop.test", "nope").await.unwrap_err();
    assert!(matches!(err, ApiClientError::Unauthorized(ref m) if m == "Invalid credentials"));
    assert!(client.tokens().get().is_none());
}

#[tokio::test]
async fn test_requests_without_token_are_unauthorized() {
    let (url, _) = spawn_server().await;
    let client = ApiClient::new(&ApiConfig::for_url(url)).unwrap();

    let err = client.products().list().await.unwrap_err();
    assert!(err.is_unauthorized());
}

#[tokio::test]
async fn test_product_listing_and_lookup() {
    let (client, _) = signed_in_client().await;

    let products = client.products().list_products().await.unwrap();
    assert_eq!(products.len(), 3);
    assert_eq!(products[0].category_label(), Some("Drinks"));
    assert_eq!(products[2].price, Money::from_cents(9999));

    let err = client.products().get("P9").await.unwrap_err();
    assert!(matches!(err, ApiClientError::NotFound { ref entity, ref id } if entity == "Product" && id == "P9"));

    client.products().restore("P3").await.unwrap();
}

#[tokio::test]
async fn test_composed_sale_round_trip() {
    let (client, recorded) = signed_in_client().await;

    let mut composer = SaleComposer::open(client.products().list_products().await.unwrap());
    composer.add_item("P1", 2);
    composer.add_item("P2", 1);
    composer.add_item("P1", 3);
    assert!(!composer.add_item("P3", 1).changed());
    assert_eq!(composer.total(), Money::from_cents(5500));

    let ticket = composer.begin_submission(Some("C1".to_string())).unwrap();
    let sale = client.sales().create_sale(ticket.submission()).await.unwrap();
    composer.complete_submission(&ticket);

    assert_eq!(sale.total, Money::from_cents(5500));
    assert_eq!(sale.items_total(), sale.total);
    assert!(!sale.canceled);
    assert!(composer.pending().is_empty());

    let sent = recorded.sales.lock().unwrap().clone();
    assert_eq!(
        sent,
        vec![json!({
            "clientId": "C1",
            "items": [
                { "productId": "P1", "quantity": 5 },
                { "productId": "P2", "quantity": 1 }
            ]
        })]
    );
}

#[tokio::test]
async fn test_rejected_sale_message_is_joined() {
    let (client, _) = signed_in_client().await;

    let submission = SaleSubmission {
        client_id: None,
        items: vec![vendora_core::LineItem::new("P3", 1)],
    };
    let err = client.sales().create(&submission).await.unwrap_err();
    assert!(matches!(err, ApiClientError::Rejected(ref m) if m == "Product P3 is inactive, Sale rejected"));
}

#[tokio::test]
async fn test_empty_sale_never_reaches_the_network() {
    let (client, recorded) = signed_in_client().await;

    let submission = SaleSubmission {
        client_id: None,
        items: vec![],
    };
    let err = client.sales().create(&submission).await.unwrap_err();
    assert!(matches!(err, ApiClientError::Validation(ValidationError::EmptySale)));
    assert!(recorded.sales.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_cancel_sale() {
    let (client, recorded) = signed_in_client().await;

    client.sales().cancel("S1").await.unwrap();
    assert_eq!(recorded.canceled.lock().unwrap().as_slice(), &["S1".to_string()]);
}

#[tokio::test]
async fn test_unreachable_server_is_a_network_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = ApiClient::new(&ApiConfig::for_url(format!("http://{}", addr))).unwrap();
    let err = client.products().list().await.unwrap_err();
    assert!(err.is_network());
}

#[tokio::test]
async fn test_register_posts_user_without_signing_in() {
    let (url, recorded) = spawn_server().await;
    let client = ApiClient::new(&ApiConfig::for_url(url)).unwrap();

    let dto = CreateUserDto {
        name: "Carla".to_string(),
        email: "carla@shop.test".to_string(),
        password: "longenough".to_string(),
        is_active: None,
    };
    let user = client.auth().register(&dto).await.unwrap();
    assert_eq!(user.id, "U2");
    assert!(!client.tokens().is_authenticated());

    assert_eq!(
        recorded.calls(),
        vec![(
            "POST".to_string(),
            "/auth/register".to_string(),
            json!({ "name": "Carla", "email": "carla@shop.test", "password": "longenough" })
        )]
    );

    let short = CreateUserDto {
        password: "short".to_string(),
        ..dto
    };
    let err = client.auth().register(&short).await.unwrap_err();
    assert!(matches!(err, ApiClientError::Validation(_)));
    assert_eq!(recorded.calls().len(), 1);
}

#[tokio::test]
async fn test_product_create_sends_multipart_fields() {
    let (client, recorded) = signed_in_client().await;

    let created = client
        .products()
        .create(CreateProductDto {
            name: "Espresso".to_string(),
            description: Some("Double shot".to_string()),
            price: Money::from_cents(1250),
            category_id: "CAT1".to_string(),
            image: Some(ImageUpload {
                file_name: "espresso.png".to_string(),
                content_type: "image/png".to_string(),
                bytes: vec![0u8; 16],
            }),
        })
        .await
        .unwrap();
    assert_eq!(created.id, "P9");
    assert_eq!(created.price, Money::from_cents(1250));

    let calls = recorded.calls();
    assert_eq!(calls.len(), 1);
    let (method, path, form) = &calls[0];
    assert_eq!((method.as_str(), path.as_str()), ("POST", "/products"));
    assert_eq!(
        form,
        &json!({
            "name": "Espresso",
            "price": "12.50",
            "categoryId": "CAT1",
            "description": "Double shot",
            "file": { "fileName": "espresso.png", "contentType": "image/png", "size": 16 }
        })
    );
}

#[tokio::test]
async fn test_product_update_sends_only_set_fields() {
    let (client, recorded) = signed_in_client().await;

    let updated = client
        .products()
        .update(
            "P1",
            UpdateProductDto {
                price: Some(Money::from_cents(1200)),
                ..UpdateProductDto::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.price, Money::from_cents(1200));

    client.products().remove("P1").await.unwrap();

    assert_eq!(
        recorded.calls(),
        vec![
            ("PATCH".to_string(), "/products/P1".to_string(), json!({ "price": "12.00" })),
            ("DELETE".to_string(), "/products/P1".to_string(), Value::Null),
        ]
    );
}

#[tokio::test]
async fn test_product_create_is_validated_locally() {
    let (client, recorded) = signed_in_client().await;

    let err = client
        .products()
        .create(CreateProductDto {
            name: "Espresso".to_string(),
            description: None,
            price: Money::from_cents(-1),
            category_id: "CAT1".to_string(),
            image: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ApiClientError::Validation(_)));
    assert!(recorded.calls().is_empty());
}

#[tokio::test]
async fn test_category_crud_and_restore() {
    let (client, recorded) = signed_in_client().await;
    let categories = client.categories();

    assert_eq!(categories.list().await.unwrap()[0].name, "Drinks");
    assert_eq!(categories.get("CAT1").await.unwrap().id, "CAT1");
    categories
        .create(&CreateCategoryDto {
            name: "Drinks".to_string(),
        })
        .await
        .unwrap();
    categories
        .update("CAT1", &UpdateCategoryDto::default())
        .await
        .unwrap();
    categories.remove("CAT1").await.unwrap();
    categories.restore("CAT1").await.unwrap();

    let err = categories.get("missing").await.unwrap_err();
    assert!(matches!(err, ApiClientError::NotFound { ref entity, .. } if entity == "Category"));

    let calls: Vec<(String, String, Value)> = recorded.calls();
    assert_eq!(
        calls[..6],
        [
            ("GET".to_string(), "/categories".to_string(), Value::Null),
            ("GET".to_string(), "/categories/CAT1".to_string(), Value::Null),
            ("POST".to_string(), "/categories".to_string(), json!({ "name": "Drinks" })),
            ("PATCH".to_string(), "/categories/CAT1".to_string(), json!({})),
            ("DELETE".to_string(), "/categories/CAT1".to_string(), Value::Null),
            ("PATCH".to_string(), "/categories/restore/CAT1".to_string(), Value::Null),
        ]
    );
}

#[tokio::test]
async fn test_client_crud_and_partial_update() {
    let (client, recorded) = signed_in_client().await;
    let clients = client.clients();

    let listed = clients.list().await.unwrap();
    assert_eq!(listed[0].zip_code, "12345");
    assert_eq!(clients.get("CL1").await.unwrap().name, "Bob Stone");

    clients
        .create(&CreateClientDto {
            name: "Bob Stone".to_string(),
            email: "bob@shop.test".to_string(),
            phone: "555-0101".to_string(),
            address: "1 Main St".to_string(),
            zip_code: "12345".to_string(),
        })
        .await
        .unwrap();
    clients
        .update(
            "CL1",
            &UpdateClientDto {
                zip_code: Some("54321".to_string()),
                ..UpdateClientDto::default()
            },
        )
        .await
        .unwrap();
    clients.remove("CL1").await.unwrap();
    clients.restore("CL1").await.unwrap();

    // Rejected locally: zip codes are 3 to 8 characters
    let err = clients
        .update(
            "CL1",
            &UpdateClientDto {
                zip_code: Some("123456789".to_string()),
                ..UpdateClientDto::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ApiClientError::Validation(_)));

    let calls = recorded.calls();
    assert_eq!(calls.len(), 6);
    assert_eq!(
        calls[2],
        (
            "POST".to_string(),
            "/clients".to_string(),
            json!({
                "name": "Bob Stone",
                "email": "bob@shop.test",
                "phone": "555-0101",
                "address": "1 Main St",
                "zipCode": "12345"
            })
        )
    );
    assert_eq!(
        calls[3],
        ("PATCH".to_string(), "/clients/CL1".to_string(), json!({ "zipCode": "54321" }))
    );
    assert_eq!(calls[4].0, "DELETE");
    assert_eq!(
        (calls[5].0.as_str(), calls[5].1.as_str()),
        ("PATCH", "/clients/restore/CL1")
    );
}

#[tokio::test]
async fn test_user_listing_and_update() {
    let (client, recorded) = signed_in_client().await;
    let users = client.users();

    assert_eq!(users.list().await.unwrap()[0].email, "carla@shop.test");
    assert_eq!(users.get("U2").await.unwrap().name, "Carla");
    users
        .update(
            "U2",
            &UpdateUserDto {
                name: Some("Carla Ruiz".to_string()),
                password: None,
            },
        )
        .await
        .unwrap();

    let err = users
        .update(
            "U2",
            &UpdateUserDto {
                name: None,
                password: Some("short".to_string()),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ApiClientError::Validation(_)));

    assert_eq!(
        recorded.calls(),
        vec![
            ("GET".to_string(), "/users".to_string(), Value::Null),
            ("GET".to_string(), "/users/U2".to_string(), Value::Null),
            ("PATCH".to_string(), "/users/U2".to_string(), json!({ "name": "Carla Ruiz" })),
        ]
    );
}
