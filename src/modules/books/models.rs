use bookshop_http::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use serde_json::json;

/// A book in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    /// Identifier assigned by the book service
    pub id: i64,
    pub title: String,
    pub author: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    pub page_count: u32,
    /// Category the book is filed under
    pub category_id: i64,
}

/// Create/update payload submitted as url-encoded form fields.
///
/// Every field is optional on the wire so that a missing field is reported
/// as a validation error rather than a parse failure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookForm {
    pub id: Option<i64>,
    pub title: Option<String>,
    pub author: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub page_count: Option<u32>,
    pub category_id: Option<i64>,
}

/// Validated fields of a book about to be created.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub description: String,
    pub price: f64,
    pub page_count: u32,
    pub category_id: i64,
}

/// Validated changes to an existing book. `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookUpdate {
    pub id: i64,
    pub title: Option<String>,
    pub author: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub page_count: Option<u32>,
    pub category_id: Option<i64>,
}

impl BookUpdate {
    /// Apply the changes to `book` in place.
    pub fn apply(self, book: &mut Book) {
        if let Some(title) = self.title {
            book.title = title;
        }
        if let Some(author) = self.author {
            book.author = author;
        }
        if let Some(description) = self.description {
            book.description = description;
        }
        if let Some(price) = self.price {
            book.price = price;
        }
        if let Some(page_count) = self.page_count {
            book.page_count = page_count;
        }
        if let Some(category_id) = self.category_id {
            book.category_id = category_id;
        }
    }
}

impl BookForm {
    /// Validate a create request. `title`, `author`, `price`, `pageCount` and
    /// `categoryId` are required; any `id` is ignored.
    pub fn into_new_book(self) -> AppResult<NewBook> {
        let mut errors = FieldErrors::default();
        let fields = errors.check_fields(self, false);

        match fields {
            ValidFields {
                title: Some(title),
                author: Some(author),
                description,
                price: Some(price),
                page_count: Some(page_count),
                category_id: Some(category_id),
                ..
            } if errors.is_empty() => Ok(NewBook {
                title,
                author,
                description: description.unwrap_or_default(),
                price,
                page_count,
                category_id,
            }),
            _ => Err(errors.into_error("invalid book form")),
        }
    }

    /// Validate an update request. Only `id` is required; every other field
    /// present must satisfy the same rules as on create.
    pub fn into_update(self) -> AppResult<BookUpdate> {
        let mut errors = FieldErrors::default();
        let fields = errors.check_fields(self, true);

        match fields.id {
            Some(id) if errors.is_empty() => Ok(BookUpdate {
                id,
                title: fields.title,
                author: fields.author,
                description: fields.description,
                price: fields.price,
                page_count: fields.page_count,
                category_id: fields.category_id,
            }),
            _ => Err(errors.into_error("invalid book form")),
        }
    }
}

/// Form fields that passed their individual checks.
struct ValidFields {
    id: Option<i64>,
    title: Option<String>,
    author: Option<String>,
    description: Option<String>,
    price: Option<f64>,
    page_count: Option<u32>,
    category_id: Option<i64>,
}

/// Collects one `{"field", "error"}` entry per failed check.
#[derive(Default)]
struct FieldErrors {
    details: Vec<serde_json::Value>,
}

impl FieldErrors {
    fn push(&mut self, field: &str, error: &str) {
        self.details.push(json!({ "field": field, "error": error }));
    }

    fn is_empty(&self) -> bool {
        self.details.is_empty()
    }

    fn into_error(self, message: &str) -> AppError {
        AppError::validation(self.details, message)
    }

    fn check<T>(
        &mut self,
        field: &str,
        value: Option<T>,
        required: bool,
        valid: impl Fn(&T) -> bool,
        error: &str,
    ) -> Option<T> {
        match value {
            None => {
                if required {
                    self.push(field, "required");
                }
                None
            }
            Some(value) if valid(&value) => Some(value),
            Some(_) => {
                self.push(field, error);
                None
            }
        }
    }

    /// Run the per-field checks. Creates ignore `id` and require the book
    /// fields; updates require `id` and accept any subset of the rest.
    fn check_fields(&mut self, form: BookForm, is_update: bool) -> ValidFields {
        let trim = |value: Option<String>| value.map(|text| text.trim().to_string());
        let required = !is_update;

        ValidFields {
            id: if is_update {
                self.check("id", form.id, true, |id| *id > 0, "must be positive")
            } else {
                None
            },
            title: self.check(
                "title",
                trim(form.title),
                required,
                |title| !title.is_empty(),
                "must not be blank",
            ),
            author: self.check(
                "author",
                trim(form.author),
                required,
                |author| !author.is_empty(),
                "must not be blank",
            ),
            description: trim(form.description),
            price: self.check(
                "price",
                form.price,
                required,
                |price| price.is_finite() && *price >= 0.0,
                "must be a non-negative number",
            ),
            page_count: self.check(
                "pageCount",
                form.page_count,
                required,
                |pages| *pages > 0,
                "must be positive",
            ),
            category_id: self.check(
                "categoryId",
                form.category_id,
                required,
                |category| *category > 0,
                "must be positive",
            ),
        }
    }
}
