//! HTTP handlers for `/api/books`.

use std::sync::Arc;

use axum::{
    extract::State,
    routing::get,
    Json, Router,
};
use bookshop_http::{
    extract::{ApiForm, ApiPath, ApiQuery},
    AppError, AppResult,
};
use serde::Deserialize;

use super::models::{Book, BookForm};
use super::service::BookService;

/// Number of books returned by the top good price listing.
pub const TOP_GOOD_PRICE_LIMIT: usize = 5;

type Service = Arc<dyn BookService>;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageCountParams {
    #[serde(default)]
    pub search: String,
    /// 0 disables the category filter
    #[serde(default)]
    pub category_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct ListParams {
    #[serde(default)]
    pub search: String,
    #[serde(default = "ListParams::first_page")]
    pub page: i64,
}

impl ListParams {
    fn first_page() -> i64 {
        1
    }
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub search: String,
}

/// Build the books router with its service collaborator as state.
pub fn router(service: Service) -> Router {
    Router::new()
        .route("/", get(list_books).post(create_book).put(update_book))
        .route("/pages-number", get(list_page_counts))
        .route("/top-good-price", get(top_priced_books))
        .route("/category/{idCategory}", get(list_books_by_category))
        .route("/{bookId}", get(get_book).delete(delete_book))
        .route("/health", get(health_check))
        .with_state(service)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "books module is healthy"
}

async fn list_page_counts(
    State(service): State<Service>,
    ApiQuery(params): ApiQuery<PageCountParams>,
) -> AppResult<Json<Vec<u32>>> {
    tracing::info!(search = %params.search, category_id = params.category_id, "get pages number");
    let counts = service
        .page_counts(&params.search, params.category_id)
        .await?;
    Ok(Json(counts))
}

async fn list_books(
    State(service): State<Service>,
    ApiQuery(params): ApiQuery<ListParams>,
) -> AppResult<Json<Vec<Book>>> {
    tracing::info!(search = %params.search, page = params.page, "get all books");
    let page = usize::try_from(params.page)
        .ok()
        .filter(|page| *page >= 1)
        .ok_or_else(|| AppError::bad_request("page must be at least 1"))?;

    Ok(Json(service.find_all(&params.search, page).await?))
}

async fn list_books_by_category(
    State(service): State<Service>,
    ApiPath(category_id): ApiPath<i64>,
    ApiQuery(params): ApiQuery<SearchParams>,
) -> AppResult<Json<Vec<Book>>> {
    tracing::info!(category_id, search = %params.search, "get all books by category id");
    Ok(Json(
        service
            .find_all_by_category(category_id, &params.search)
            .await?,
    ))
}

async fn get_book(
    State(service): State<Service>,
    ApiPath(book_id): ApiPath<i64>,
) -> AppResult<Json<Book>> {
    tracing::info!(book_id, "get book by id");
    Ok(Json(service.find_by_id(book_id).await?))
}

async fn create_book(
    State(service): State<Service>,
    ApiForm(form): ApiForm<BookForm>,
) -> AppResult<Json<Book>> {
    tracing::info!(title = ?form.title, "add new book");
    let book = service.add_book(form.into_new_book()?).await?;
    Ok(Json(book))
}

async fn update_book(
    State(service): State<Service>,
    ApiForm(form): ApiForm<BookForm>,
) -> AppResult<Json<Book>> {
    tracing::info!(book_id = ?form.id, "update book");
    let book = service.update_book(form.into_update()?).await?;
    Ok(Json(book))
}

async fn delete_book(
    State(service): State<Service>,
    ApiPath(book_id): ApiPath<i64>,
) -> AppResult<Json<bool>> {
    tracing::info!(book_id, "delete book");
    Ok(Json(service.delete_book(book_id).await?))
}

async fn top_priced_books(State(service): State<Service>) -> AppResult<Json<Vec<Book>>> {
    tracing::info!(limit = TOP_GOOD_PRICE_LIMIT, "top good price books");
    Ok(Json(service.top_good_price(TOP_GOOD_PRICE_LIMIT).await?))
}
