//! Book inventory endpoints

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequestParts, Path, Query, State},
    http::{request::Parts, StatusCode},
    Json,
};

use crate::{
    error::{AppError, AppResult},
    models::Book,
    AppState,
};

/// Message returned when the `id` query parameter is absent
pub const MISSING_ID_MESSAGE: &str = "Id not valid.";

/// First `id` value of the query string, if any
pub struct QueryId(pub Option<String>);

#[async_trait]
impl<S> FromRequestParts<S> for QueryId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(pairs) = Query::<Vec<(String, String)>>::from_request_parts(parts, state).await?;
        let id = pairs
            .into_iter()
            .find(|(key, _)| key == "id")
            .map(|(_, value)| value);
        Ok(QueryId(id))
    }
}

impl QueryId {
    fn require(self) -> AppResult<String> {
        self.0.ok_or_else(|| {
            tracing::debug!("Rejected request without id query parameter");
            AppError::BadRequest(MISSING_ID_MESSAGE.to_string())
        })
    }
}

/// List every book
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    responses(
        (status = 200, description = "All books in inventory order", body = Vec<Book>)
    )
)]
pub async fn list_books(State(state): State<AppState>) -> Json<Vec<Book>> {
    Json(state.services.inventory.list_books().await)
}

/// Get a book by id
#[utoipa::path(
    get,
    path = "/books/{id}",
    tag = "books",
    params(
        ("id" = String, Path, description = "Book id")
    ),
    responses(
        (status = 200, description = "Book found", body = Book),
        (status = 404, description = "Invalid id or book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Book>> {
    let book = state
        .services
        .inventory
        .get_book(&id)
        .await
        .map_err(AppError::not_found)?;
    Ok(Json(book))
}

/// Add a book to the inventory
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    request_body = Book,
    responses(
        (status = 201, description = "Book created", body = Book),
        (status = 400, description = "Malformed body", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_book(
    State(state): State<AppState>,
    body: Bytes,
) -> AppResult<(StatusCode, Json<Book>)> {
    // Decoded regardless of the Content-Type header
    let book: Book = serde_json::from_slice(&body)?;
    let book = state.services.inventory.create_book(book).await;
    Ok((StatusCode::CREATED, Json(book)))
}

/// Remove a book from the inventory
#[utoipa::path(
    delete,
    path = "/sellAll/{id}",
    tag = "books",
    params(
        ("id" = String, Path, description = "Book id")
    ),
    responses(
        (status = 200, description = "Remaining books", body = Vec<Book>),
        (status = 404, description = "Invalid id or book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn sell_all(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Vec<Book>>> {
    let remaining = state
        .services
        .inventory
        .sell_all(&id)
        .await
        .map_err(AppError::not_found)?;
    Ok(Json(remaining))
}

/// Check out one copy of a book
#[utoipa::path(
    patch,
    path = "/checkout",
    tag = "books",
    params(
        ("id" = Option<String>, Query, description = "Book id")
    ),
    responses(
        (status = 200, description = "Book with decremented quantity", body = Book),
        (status = 400, description = "Missing or invalid id, unknown book, or out of stock", body = crate::error::ErrorResponse)
    )
)]
pub async fn checkout_book(
    State(state): State<AppState>,
    query: QueryId,
) -> AppResult<Json<Book>> {
    let id = query.require()?;
    let book = state
        .services
        .inventory
        .checkout(&id)
        .await
        .map_err(AppError::bad_request)?;
    Ok(Json(book))
}

/// Return one copy of a book
#[utoipa::path(
    patch,
    path = "/return",
    tag = "books",
    params(
        ("id" = Option<String>, Query, description = "Book id")
    ),
    responses(
        (status = 200, description = "Book with incremented quantity", body = Book),
        (status = 400, description = "Missing or invalid id, or unknown book", body = crate::error::ErrorResponse)
    )
)]
pub async fn return_book(
    State(state): State<AppState>,
    query: QueryId,
) -> AppResult<Json<Book>> {
    let id = query.require()?;
    let book = state
        .services
        .inventory
        .return_book(&id)
        .await
        .map_err(AppError::bad_request)?;
    Ok(Json(book))
}
