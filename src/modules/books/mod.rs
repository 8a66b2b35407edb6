pub mod models;
pub mod routes;
pub mod service;

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use bookshop_kernel::{InitCtx, Module};
use serde_json::json;

use service::BookService;

/// Books module: catalog search, CRUD, and price listings
pub struct BooksModule {
    service: Arc<dyn BookService>,
}

impl BooksModule {
    pub fn new(service: Arc<dyn BookService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl Module for BooksModule {
    fn name(&self) -> &'static str {
        "books"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            page_size = ctx.settings.catalog.page_size,
            "books module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        routes::router(self.service.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        let book_list = json!({
            "description": "List of books",
            "content": {
                "application/json": {
                    "schema": {
                        "type": "array",
                        "items": { "$ref": "#/components/schemas/Book" }
                    }
                }
            }
        });
        let single_book = json!({
            "description": "The book",
            "content": {
                "application/json": {
                    "schema": { "$ref": "#/components/schemas/Book" }
                }
            }
        });
        let error = |description: &str| {
            json!({
                "description": description,
                "content": {
                    "application/json": {
                        "schema": { "$ref": "#/components/schemas/ErrorResponse" }
                    }
                }
            })
        };
        let search = json!({
            "name": "search",
            "in": "query",
            "required": false,
            "description": "Case-insensitive match on title or author",
            "schema": { "type": "string" }
        });
        let book_id = json!({
            "name": "bookId",
            "in": "path",
            "required": true,
            "schema": { "type": "integer", "format": "int64" }
        });
        let form_body = json!({
            "required": true,
            "content": {
                "application/x-www-form-urlencoded": {
                    "schema": { "$ref": "#/components/schemas/BookForm" }
                }
            }
        });

        Some(json!({
            "paths": {
                "/": {
                    "get": {
                        "summary": "List books",
                        "tags": ["Books"],
                        "parameters": [
                            search,
                            {
                                "name": "page",
                                "in": "query",
                                "required": false,
                                "description": "1-based page number",
                                "schema": { "type": "integer", "format": "int64", "minimum": 1 }
                            }
                        ],
                        "responses": {
                            "200": book_list,
                            "400": error("Invalid page")
                        }
                    },
                    "post": {
                        "summary": "Add a new book",
                        "tags": ["Books"],
                        "requestBody": form_body,
                        "responses": {
                            "200": single_book,
                            "422": error("Validation error")
                        }
                    },
                    "put": {
                        "summary": "Update a book",
                        "tags": ["Books"],
                        "requestBody": form_body,
                        "responses": {
                            "200": single_book,
                            "404": error("Book not found"),
                            "422": error("Validation error")
                        }
                    }
                },
                "/pages-number": {
                    "get": {
                        "summary": "Page counts of matching books",
                        "tags": ["Books"],
                        "parameters": [
                            search,
                            {
                                "name": "categoryId",
                                "in": "query",
                                "required": false,
                                "description": "Category filter; 0 disables it",
                                "schema": { "type": "integer", "format": "int64" }
                            }
                        ],
                        "responses": {
                            "200": {
                                "description": "Page count per matching book",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "type": "array",
                                            "items": { "type": "integer", "format": "int32" }
                                        }
                                    }
                                }
                            }
                        }
                    }
                },
                "/top-good-price": {
                    "get": {
                        "summary": "Five cheapest books",
                        "tags": ["Books"],
                        "responses": { "200": book_list }
                    }
                },
                "/category/{idCategory}": {
                    "get": {
                        "summary": "List books in a category",
                        "tags": ["Books"],
                        "parameters": [
                            {
                                "name": "idCategory",
                                "in": "path",
                                "required": true,
                                "schema": { "type": "integer", "format": "int64" }
                            },
                            search
                        ],
                        "responses": { "200": book_list }
                    }
                },
                "/{bookId}": {
                    "get": {
                        "summary": "Get a book by id",
                        "tags": ["Books"],
                        "parameters": [book_id],
                        "responses": {
                            "200": single_book,
                            "404": error("Book not found")
                        }
                    },
                    "delete": {
                        "summary": "Delete a book",
                        "tags": ["Books"],
                        "parameters": [book_id],
                        "responses": {
                            "200": {
                                "description": "Whether a book was deleted",
                                "content": {
                                    "application/json": { "schema": { "type": "boolean" } }
                                }
                            }
                        }
                    }
                },
                "/health": {
                    "get": {
                        "summary": "Books health check",
                        "tags": ["Books"],
                        "responses": {
                            "200": {
                                "description": "OK",
                                "content": { "text/plain": { "schema": { "type": "string" } } }
                            }
                        }
                    }
                }
            },
            "components": {
                "schemas": {
                    "Book": {
                        "type": "object",
                        "properties": {
                            "id": { "type": "integer", "format": "int64" },
                            "title": { "type": "string" },
                            "author": { "type": "string" },
                            "description": { "type": "string" },
                            "price": { "type": "number", "format": "double" },
                            "pageCount": { "type": "integer", "format": "int32" },
                            "categoryId": { "type": "integer", "format": "int64" }
                        },
                        "required": ["id", "title", "author", "price", "pageCount", "categoryId"]
                    },
                    "BookForm": {
                        "type": "object",
                        "description": "`id` is required on update and ignored on create",
                        "properties": {
                            "id": { "type": "integer", "format": "int64" },
                            "title": { "type": "string" },
                            "author": { "type": "string" },
                            "description": { "type": "string" },
                            "price": { "type": "number", "format": "double", "minimum": 0 },
                            "pageCount": { "type": "integer", "format": "int32", "minimum": 1 },
                            "categoryId": { "type": "integer", "format": "int64", "minimum": 1 }
                        }
                    }
                }
            }
        }))
    }

    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module started");
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module stopped");
        Ok(())
    }
}

/// Create a new instance of the books module
pub fn create_module(service: Arc<dyn BookService>) -> Arc<dyn Module> {
    Arc::new(BooksModule::new(service))
}
