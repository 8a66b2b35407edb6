//! Extractors whose rejections render as [`AppError`] bodies.
//!
//! The stock axum extractors answer malformed input with plain-text bodies.
//! These wrappers keep the status semantics but reuse the JSON error format.

use axum::extract::{FromRequest, FromRequestParts};

use crate::error::AppError;

/// Path parameters; a parse failure becomes `400 bad_request`.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct ApiPath<T>(pub T);

/// Query string parameters; a parse failure becomes `400 bad_request`.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct ApiQuery<T>(pub T);

/// `application/x-www-form-urlencoded` body.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Form), rejection(AppError))]
pub struct ApiForm<T>(pub T);
