use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use bookshop_app::modules::books::models::Book;
use bookshop_app::modules::orders::models::Order;
use bookshop_kernel::settings::Settings;
use serde::de::DeserializeOwned;
use tower::ServiceExt as _;

fn settings(seed_demo_data: bool) -> Settings {
    let mut settings = Settings::default();
    settings.catalog.seed_demo_data = seed_demo_data;
    settings
}

fn app(seed_demo_data: bool) -> Router {
    let settings = settings(seed_demo_data);
    let registry = bookshop_app::build_registry(&settings).expect("registry builds");
    bookshop_http::build_router(&registry, &settings)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("request builds")
}

fn form(method: Method, uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .expect("request builds")
}

fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .expect("request builds")
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.clone().oneshot(request).await.expect("request runs");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body reads");
    let body = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, body)
}

async fn send_ok<T: DeserializeOwned>(app: &Router, request: Request<Body>) -> T {
    let (status, body) = send(app, request).await;
    assert_eq!(status, StatusCode::OK, "unexpected body: {body}");
    serde_json::from_value(body).expect("body deserializes")
}

fn ids<T>(items: &[T], id: impl Fn(&T) -> i64) -> Vec<i64> {
    items.iter().map(id).collect()
}

#[tokio::test]
async fn created_book_can_be_fetched() {
    let app = app(false);

    let created: Book = send_ok(
        &app,
        form(
            Method::POST,
            "/api/books",
            "title=A&author=Someone&price=10&pageCount=120&categoryId=1",
        ),
    )
    .await;
    assert_eq!(created.title, "A");
    assert_eq!(created.price, 10.0);

    let fetched: Book = send_ok(&app, get(&format!("/api/books/{}", created.id))).await;
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn get_book_returns_requested_id_or_not_found() {
    let app = app(true);

    for id in 1..=8 {
        let book: Book = send_ok(&app, get(&format!("/api/books/{id}"))).await;
        assert_eq!(book.id, id);
    }

    let (status, body) = send(&app, get("/api/books/999")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "not_found");
}

#[tokio::test]
async fn non_numeric_book_id_is_bad_request() {
    let (status, body) = send(&app(true), get("/api/books/dune")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "bad_request");
}

#[tokio::test]
async fn create_with_missing_fields_is_validation_error() {
    let (status, body) = send(&app(false), form(Method::POST, "/api/books", "title=A&price=10")).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["code"], "validation_error");
    let fields: Vec<&str> = body["error"]["details"]
        .as_array()
        .expect("details array")
        .iter()
        .filter_map(|detail| detail["field"].as_str())
        .collect();
    assert_eq!(fields, vec!["author", "pageCount", "categoryId"]);
}

#[tokio::test]
async fn update_changes_fields_and_rejects_unknown_ids() {
    let app = app(true);

    let updated: Book = send_ok(&app, form(Method::PUT, "/api/books", "id=4&price=7.5")).await;
    assert_eq!(updated.id, 4);
    assert_eq!(updated.title, "Dune");
    assert_eq!(updated.price, 7.5);

    let (status, _) = send(&app, form(Method::PUT, "/api/books", "id=404&price=1")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(&app, form(Method::PUT, "/api/books", "price=1")).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["details"][0]["field"], "id");
}

#[tokio::test]
async fn delete_returns_true_exactly_once() {
    let app = app(false);
    let created: Book = send_ok(
        &app,
        form(
            Method::POST,
            "/api/books",
            "title=Gone&author=Someone&price=3&pageCount=10&categoryId=1",
        ),
    )
    .await;
    let uri = format!("/api/books/{}", created.id);

    let first: bool = send_ok(&app, delete(&uri)).await;
    let second: bool = send_ok(&app, delete(&uri)).await;
    let third: bool = send_ok(&app, delete(&uri)).await;
    assert!(first);
    assert!(!second);
    assert!(!third);

    let (status, _) = send(&app, get(&uri)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn list_books_paginates_and_searches() {
    let app = app(true);

    let first_page: Vec<Book> = send_ok(&app, get("/api/books")).await;
    assert_eq!(ids(&first_page, |book| book.id), vec![1, 2, 3, 4, 5, 6, 7, 8]);

    let past_end: Vec<Book> = send_ok(&app, get("/api/books?page=2")).await;
    assert!(past_end.is_empty());

    let rust: Vec<Book> = send_ok(&app, get("/api/books?search=RUST")).await;
    assert_eq!(ids(&rust, |book| book.id), vec![1, 2, 3]);

    let (status, _) = send(&app, get("/api/books?page=0")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn page_counts_match_listing_length() {
    let app = app(true);

    for search in ["", "rust", "an", "nothing-matches"] {
        let counts: Vec<u32> =
            send_ok(&app, get(&format!("/api/books/pages-number?search={search}"))).await;
        let books: Vec<Book> = send_ok(&app, get(&format!("/api/books?search={search}"))).await;
        assert_eq!(counts.len(), books.len(), "search {search:?}");
        assert_eq!(
            counts,
            books.iter().map(|book| book.page_count).collect::<Vec<_>>()
        );
    }

    let sci_fi: Vec<u32> = send_ok(&app, get("/api/books/pages-number?categoryId=2")).await;
    assert_eq!(sci_fi, vec![412, 255, 482]);
}

#[tokio::test]
async fn books_by_category_apply_search() {
    let app = app(true);

    let databases: Vec<Book> = send_ok(&app, get("/api/books/category/3")).await;
    assert_eq!(ids(&databases, |book| book.id), vec![7, 8]);

    let internals: Vec<Book> =
        send_ok(&app, get("/api/books/category/3?search=internals")).await;
    assert_eq!(ids(&internals, |book| book.id), vec![8]);
}

#[tokio::test]
async fn top_good_price_lists_five_cheapest() {
    let books: Vec<Book> = send_ok(&app(true), get("/api/books/top-good-price")).await;

    assert_eq!(books.len(), 5);
    assert!(books.windows(2).all(|pair| pair[0].price <= pair[1].price));
    assert_eq!(ids(&books, |book| book.id), vec![5, 4, 6, 1, 3]);
}

#[tokio::test]
async fn bare_order_route_dispatches_to_confirmed_listing() {
    let app = app(true);

    let orders: Vec<Order> = send_ok(&app, get("/api/orders")).await;
    assert!(orders.iter().all(|order| order.confirmed));
    assert_eq!(ids(&orders, |order| order.id), vec![1, 3]);

    let explicit: Vec<Order> = send_ok(&app, get("/api/orders/confirmed")).await;
    assert_eq!(explicit, orders);
}

#[tokio::test]
async fn unconfirmed_orders_are_reachable() {
    let app = app(true);

    let by_query: Vec<Order> = send_ok(&app, get("/api/orders?confirmed=false")).await;
    let by_path: Vec<Order> = send_ok(&app, get("/api/orders/unconfirmed")).await;

    assert_eq!(ids(&by_path, |order| order.id), vec![2, 4]);
    assert_eq!(by_query, by_path);
}

#[tokio::test]
async fn user_orders_filter_by_confirmation() {
    let app = app(true);

    let confirmed: Vec<Order> = send_ok(&app, get("/api/orders/users/1")).await;
    assert_eq!(ids(&confirmed, |order| order.id), vec![1]);

    let unconfirmed: Vec<Order> = send_ok(&app, get("/api/orders/users/1/unconfirmed")).await;
    assert_eq!(ids(&unconfirmed, |order| order.id), vec![2]);

    let via_query: Vec<Order> =
        send_ok(&app, get("/api/orders/users/2?confirmed=false")).await;
    assert_eq!(ids(&via_query, |order| order.id), vec![4]);

    let explicit: Vec<Order> = send_ok(&app, get("/api/orders/users/2/confirmed")).await;
    assert_eq!(ids(&explicit, |order| order.id), vec![3]);

    let nobody: Vec<Order> = send_ok(&app, get("/api/orders/users/77")).await;
    assert!(nobody.is_empty());
}

#[tokio::test]
async fn openapi_document_covers_both_modules() {
    let spec: serde_json::Value = send_ok(&app(false), get("/docs/openapi.json")).await;

    assert!(spec["paths"]["/api/books"]["post"].is_object());
    assert!(spec["paths"]["/api/books/{bookId}"]["delete"].is_object());
    assert!(spec["paths"]["/api/orders/users/{userId}/unconfirmed"]["get"].is_object());
    assert!(spec["components"]["schemas"]["Order"].is_object());

    let parameter = |path: &str| spec["paths"][path]["get"]["parameters"][0]["name"].clone();
    assert_eq!(parameter("/api/books/{bookId}"), "bookId");
    assert_eq!(parameter("/api/books/category/{idCategory}"), "idCategory");
    assert_eq!(parameter("/api/orders/users/{userId}"), "userId");
}

#[tokio::test]
async fn responses_carry_request_id_and_cors_headers() {
    let response = app(false)
        .oneshot(
            Request::builder()
                .uri("/api/books/health")
                .header(header::ORIGIN, "http://example.com")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("request runs");

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "*"
    );
}
