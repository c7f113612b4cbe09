use menu_client::{ClientConfig, ClientError, MenuApi, MenuClient};
use serde_json::{Value, json};
use std::time::Duration;
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Fixtures ────────────────────────────────────────────────────

fn restaurant() -> Value {
    json!({ "id": 1, "slug": "bistro", "name": "Bistro" })
}

fn category(id: i64) -> Value {
    json!({ "id": id, "restaurantId": 1, "name": format!("Category {id}"), "sortOrder": 0 })
}

fn product(id: i64, category_id: i64) -> Value {
    json!({
        "id": id,
        "categoryId": category_id,
        "name": format!("Product {id}"),
        "price": 450,
        "isAvailable": true,
        "sortOrder": 0
    })
}

fn lite_body() -> Value {
    let mut cat = category(10);
    cat["products"] = json!([product(1, 10), product(2, 10)]);
    cat["totalProducts"] = json!(7);
    cat["hasMore"] = json!(true);
    json!({
        "success": true,
        "data": {
            "restaurant": restaurant(),
            "categories": [cat],
            "_meta": {
                "isLiteMode": true,
                "supportsLazyLoad": true,
                "totalProductsShown": 2,
                "lazyLoadEndpoint": "/api/public/menu/bistro?lazy=true&categoryId={categoryId}",
                "productsPerCategory": 4
            }
        }
    })
}

fn lazy_body() -> Value {
    json!({
        "success": true,
        "data": {
            "category": category(10),
            "products": [product(3, 10)],
            "_meta": {
                "isLiteMode": false,
                "supportsLazyLoad": true,
                "totalProductsShown": 1,
                "lazyLoadEndpoint": "/api/public/menu/bistro?lazy=true&categoryId={categoryId}",
                "totalProducts": 7,
                "hasMore": true
            }
        }
    })
}

async fn client_for(server: &MockServer) -> MenuClient {
    MenuClient::new(ClientConfig::new(server.uri())).unwrap()
}

// ── Request building ────────────────────────────────────────────

#[tokio::test]
async fn lite_sends_lite_flag() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/public/menu/bistro"))
        .and(query_param("lite", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(lite_body()))
        .expect(1)
        .mount(&server)
        .await;

    let menu = client_for(&server).await.get_menu_lite("bistro").await.unwrap();
    assert!(menu.is_lite());
    assert_eq!(menu.product_count(), 2);
    assert_eq!(menu.partial_categories().count(), 1);
    assert_eq!(menu.meta.unwrap().total_products_shown, 2);
}

#[tokio::test]
async fn full_sends_no_flags() {
    let server = MockServer::start().await;
    let mut cat = category(10);
    cat["products"] = json!([product(1, 10)]);
    Mock::given(method("GET"))
        .and(path("/api/public/menu/bistro"))
        .and(query_param_is_missing("lite"))
        .and(query_param_is_missing("lazy"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": { "restaurant": restaurant(), "categories": [cat] }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let menu = client_for(&server).await.get_menu_full("bistro").await.unwrap();
    assert!(menu.meta.is_none());
    assert_eq!(menu.categories[0].products.len(), 1);
}

#[tokio::test]
async fn lazy_sends_category_and_limit() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/public/menu/bistro"))
        .and(query_param("lazy", "true"))
        .and(query_param("categoryId", "10"))
        .and(query_param("limit", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(lazy_body()))
        .expect(1)
        .mount(&server)
        .await;

    let page = client_for(&server)
        .await
        .get_category_products("bistro", "10", Some(3))
        .await
        .unwrap();
    assert_eq!(page.category.id, 10);
    assert_eq!(page.products.len(), 1);
    assert_eq!(page.meta.has_more, Some(true));
}

#[tokio::test]
async fn lazy_zero_limit_not_sent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/public/menu/bistro"))
        .and(query_param("categoryId", "10"))
        .and(query_param_is_missing("limit"))
        .respond_with(ResponseTemplate::new(200).set_body_json(lazy_body()))
        .expect(2)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    client.get_category_products("bistro", "10", Some(0)).await.unwrap();
    client.get_category_products("bistro", "10", None).await.unwrap();
}

// ── Error mapping ───────────────────────────────────────────────

#[tokio::test]
async fn unknown_slug_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/public/menu/nowhere"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "success": false,
            "error": "Restaurant 'nowhere' not found",
            "code": 3001
        })))
        .mount(&server)
        .await;

    let err = client_for(&server).await.get_menu_lite("nowhere").await.unwrap_err();
    match err {
        ClientError::NotFound(message) => assert!(message.contains("nowhere")),
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[tokio::test]
async fn success_false_with_ok_status_is_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "error": "limit must be a positive integer",
            "code": 5
        })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .await
        .get_category_products("bistro", "10", Some(1))
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::InvalidRequest(_)));
}

#[tokio::test]
async fn server_error_is_typed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "success": false,
            "error": "Database error",
            "code": 9002
        })))
        .mount(&server)
        .await;

    let err = client_for(&server).await.get_menu_full("bistro").await.unwrap_err();
    match err {
        ClientError::Server { status, code, .. } => {
            assert_eq!(status, 500);
            assert_eq!(code, Some(9002));
        }
        other => panic!("expected Server, got {other:?}"),
    }
}

#[tokio::test]
async fn malformed_body_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "success": true, "data": { "restaurant": 5 } })),
        )
        .mount(&server)
        .await;

    let err = client_for(&server).await.get_menu_full("bistro").await.unwrap_err();
    assert!(matches!(err, ClientError::Decode(_)));
}

#[tokio::test]
async fn slow_server_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(lite_body())
                .set_delay(Duration::from_millis(1500)),
        )
        .mount(&server)
        .await;

    let client = MenuClient::new(
        ClientConfig::new(server.uri()).with_timeout(Duration::from_millis(200)),
    )
    .unwrap();
    let err = client.get_menu_lite("bistro").await.unwrap_err();
    assert!(err.is_timeout(), "expected timeout, got {err:?}");
}

#[tokio::test]
async fn connection_refused_is_transport_error() {
    // Bind then drop to get a port with nothing listening
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let client = MenuClient::new(ClientConfig::new(format!("http://127.0.0.1:{port}"))).unwrap();
    let err = client.get_menu_full("bistro").await.unwrap_err();
    assert!(matches!(err, ClientError::Transport(_)), "got {err:?}");
    assert_eq!(err.code(), Some(shared::ErrorCode::NetworkError));
}

#[tokio::test]
async fn empty_arguments_rejected_without_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(lite_body()))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    assert!(matches!(
        client.get_menu_lite("").await,
        Err(ClientError::InvalidArgument(_))
    ));
    assert!(matches!(
        client.get_category_products("bistro", "", None).await,
        Err(ClientError::InvalidArgument(_))
    ));
}
