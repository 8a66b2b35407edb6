use std::collections::BTreeMap;

use async_trait::async_trait;
use bookshop_http::{AppError, AppResult};
use tokio::sync::RwLock;

use super::models::{Book, BookUpdate, NewBook};
use crate::utils::matches_search;

/// Business operations behind the book endpoints.
#[async_trait]
pub trait BookService: Send + Sync {
    /// Page count of every book matching `search`, restricted to
    /// `category_id` unless it is 0.
    async fn page_counts(&self, search: &str, category_id: i64) -> AppResult<Vec<u32>>;

    /// One page (1-based) of books matching `search`.
    async fn find_all(&self, search: &str, page: usize) -> AppResult<Vec<Book>>;

    async fn find_all_by_category(&self, category_id: i64, search: &str) -> AppResult<Vec<Book>>;

    /// Fails with `NotFound` when no book has `id`.
    async fn find_by_id(&self, id: i64) -> AppResult<Book>;

    async fn add_book(&self, book: NewBook) -> AppResult<Book>;

    /// Fails with `NotFound` when the target book does not exist.
    async fn update_book(&self, update: BookUpdate) -> AppResult<Book>;

    /// Returns whether a book was removed.
    async fn delete_book(&self, id: i64) -> AppResult<bool>;

    /// Cheapest `limit` books, ties broken by id.
    async fn top_good_price(&self, limit: usize) -> AppResult<Vec<Book>>;
}

struct BookStore {
    books: BTreeMap<i64, Book>,
    next_id: i64,
}

/// In-memory book service. Books are kept ordered by id.
pub struct MemoryBookService {
    store: RwLock<BookStore>,
    page_size: usize,
}

impl MemoryBookService {
    /// Creates an empty service serving `page_size` books per page.
    pub fn new(page_size: usize) -> Self {
        Self::with_data(page_size, Vec::new())
    }

    /// Creates a service holding `books`. New ids continue after the largest
    /// existing one.
    pub fn with_data(page_size: usize, books: Vec<Book>) -> Self {
        let books: BTreeMap<i64, Book> = books.into_iter().map(|book| (book.id, book)).collect();
        let next_id = books.keys().next_back().map_or(1, |id| id + 1);

        Self {
            store: RwLock::new(BookStore { books, next_id }),
            page_size: page_size.max(1),
        }
    }

    async fn matching(&self, search: &str, category_id: Option<i64>) -> Vec<Book> {
        let store = self.store.read().await;
        store
            .books
            .values()
            .filter(|book| category_id.map_or(true, |category| book.category_id == category))
            .filter(|book| matches_search(search, &[book.title.as_str(), book.author.as_str()]))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl BookService for MemoryBookService {
    async fn page_counts(&self, search: &str, category_id: i64) -> AppResult<Vec<u32>> {
        let category = (category_id != 0).then_some(category_id);
        Ok(self
            .matching(search, category)
            .await
            .into_iter()
            .map(|book| book.page_count)
            .collect())
    }

    async fn find_all(&self, search: &str, page: usize) -> AppResult<Vec<Book>> {
        if page == 0 {
            return Err(AppError::bad_request("page must be at least 1"));
        }

        Ok(self
            .matching(search, None)
            .await
            .into_iter()
            .skip((page - 1).saturating_mul(self.page_size))
            .take(self.page_size)
            .collect())
    }

    async fn find_all_by_category(&self, category_id: i64, search: &str) -> AppResult<Vec<Book>> {
        Ok(self.matching(search, Some(category_id)).await)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Book> {
        self.store
            .read()
            .await
            .books
            .get(&id)
            .cloned()
            .ok_or_else(|| AppError::not_found(format!("book {} not found", id)))
    }

    async fn add_book(&self, book: NewBook) -> AppResult<Book> {
        let mut store = self.store.write().await;
        let id = store.next_id;
        store.next_id += 1;

        let book = Book {
            id,
            title: book.title,
            author: book.author,
            description: book.description,
            price: book.price,
            page_count: book.page_count,
            category_id: book.category_id,
        };
        store.books.insert(id, book.clone());

        tracing::debug!(book_id = id, "book stored");
        Ok(book)
    }

    async fn update_book(&self, update: BookUpdate) -> AppResult<Book> {
        let mut store = self.store.write().await;
        let id = update.id;
        let book = store
            .books
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found(format!("book {} not found", id)))?;

        update.apply(book);
        Ok(book.clone())
    }

    async fn delete_book(&self, id: i64) -> AppResult<bool> {
        Ok(self.store.write().await.books.remove(&id).is_some())
    }

    async fn top_good_price(&self, limit: usize) -> AppResult<Vec<Book>> {
        let mut books: Vec<Book> = self.store.read().await.books.values().cloned().collect();
        books.sort_by(|a, b| a.price.total_cmp(&b.price).then_with(|| a.id.cmp(&b.id)));
        books.truncate(limit);
        Ok(books)
    }
}
