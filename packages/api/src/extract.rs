// ABOUTME: Request extractors whose rejections use the AppError response format
// ABOUTME: Wrappers around axum's Json and Path extractors

use axum::extract::{FromRequest, FromRequestParts};

use crate::error::AppError;

/// JSON body extractor that answers malformed bodies with [`AppError`]
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

/// Path extractor that answers unparsable segments with [`AppError`]
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct ApiPath<T>(pub T);
