//! Quote HTTP Routes
//!
//! - `POST   /quotes`         add a quote
//! - `GET    /quotes`         list quotes, `?author=` filters
//! - `GET    /quotes/random`  one random quote
//! - `DELETE /quotes/:id`     delete by id

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::quote::{Quote, StoredQuote};
use crate::service::QuoteService;
use crate::store::StoreError;

// ==================
// Shared State
// ==================

/// Quote state shared across handlers
pub struct QuotesState {
    pub service: QuoteService,
}

impl QuotesState {
    pub fn new(service: QuoteService) -> Self {
        Self { service }
    }
}

// ==================
// Request/Response Types
// ==================

#[derive(Debug, Deserialize)]
pub struct ListQuotesQuery {
    #[serde(default)]
    pub author: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

// ==================
// Quote Routes
// ==================

/// Create quote routes
pub fn quote_routes(state: Arc<QuotesState>) -> Router {
    Router::new()
        .route("/quotes", post(create_quote_handler).get(list_quotes_handler))
        .route("/quotes/random", get(random_quote_handler))
        .route("/quotes/:id", delete(delete_quote_handler))
        .with_state(state)
}

/// Map a store error to a status code.
pub fn status_for(err: &StoreError) -> StatusCode {
    match err {
        StoreError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        StoreError::NotFound(_) | StoreError::Empty => StatusCode::NOT_FOUND,
        StoreError::Io { .. }
        | StoreError::Decode(_)
        | StoreError::InvalidData(_)
        | StoreError::Encode(_)
        | StoreError::IdsExhausted
        | StoreError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn error_response(err: StoreError) -> ApiError {
    let status = status_for(&err);
    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
            code: status.as_u16(),
        }),
    )
}

// ==================
// Quote Handlers
// ==================

async fn create_quote_handler(
    State(state): State<Arc<QuotesState>>,
    payload: Result<Json<Quote>, JsonRejection>,
) -> Result<(StatusCode, Json<StoredQuote>), ApiError> {
    let Json(quote) = payload.map_err(|rejection| {
        let err = StoreError::InvalidInput(rejection.body_text());
        state.service.report("add", &err);
        error_response(err)
    })?;

    let stored = state.service.add(quote).map_err(error_response)?;

    Ok((StatusCode::CREATED, Json(stored)))
}

async fn list_quotes_handler(
    State(state): State<Arc<QuotesState>>,
    Query(query): Query<ListQuotesQuery>,
) -> Result<Response, ApiError> {
    match state.service.list(query.author.as_deref()) {
        Ok(quotes) => Ok(Json(quotes).into_response()),
        // Nothing stored yet
        Err(StoreError::Empty) => Ok(StatusCode::NO_CONTENT.into_response()),
        Err(e) => Err(error_response(e)),
    }
}

async fn random_quote_handler(
    State(state): State<Arc<QuotesState>>,
) -> Result<Json<Quote>, ApiError> {
    let quote = state.service.random().map_err(error_response)?;
    Ok(Json(quote))
}

async fn delete_quote_handler(
    State(state): State<Arc<QuotesState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.service.delete(&id).map_err(error_response)?;
    Ok(StatusCode::NO_CONTENT)
}
