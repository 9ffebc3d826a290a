//! Request handlers for the books module.
//!
//! Every handler returns the uniform envelope; failures of any kind
//! surface as the fixed 500 response via [`AppError`].

use axum::extract::{Path, State};
use serde_json::json;

use biblio_db::Db;
use biblio_http::error::AppError;
use biblio_http::extract::Params;
use biblio_http::response::Envelope;

use super::models::{Book, CreateBookParams, DeleteBookParams, ListParams, UpdateBookParams};

pub async fn create_book(
    State(db): State<Db>,
    Params(params): Params<CreateBookParams>,
) -> Result<Envelope, AppError> {
    tracing::debug!(title = %params.title, "creating a new book");

    let created_at = time::OffsetDateTime::now_utc().date();
    sqlx::query("INSERT INTO book (title, pages, created_at) VALUES (?, ?, ?)")
        .bind(&params.title)
        .bind(params.pages)
        .bind(created_at)
        .execute(db.pool())
        .await?;

    Ok(Envelope::success())
}

/// Lookup by id. A missing record is not an error: the envelope carries
/// `"book": null`.
pub async fn find_book(State(db): State<Db>, Path(id): Path<i64>) -> Result<Envelope, AppError> {
    let book: Option<Book> =
        sqlx::query_as("SELECT id, title, pages, created_at FROM book WHERE id = ?")
            .bind(id)
            .fetch_optional(db.pool())
            .await?;

    Ok(Envelope::result(json!({ "book": book })))
}

pub async fn list_books(
    State(db): State<Db>,
    Params(params): Params<ListParams>,
) -> Result<Envelope, AppError> {
    tracing::debug!(page = params.page, "listing books");

    let books: Vec<Book> =
        sqlx::query_as("SELECT id, title, pages, created_at FROM book ORDER BY id LIMIT ? OFFSET ?")
            .bind(params.clamped_page_size())
            .bind(params.offset())
            .fetch_all(db.pool())
            .await?;

    Ok(Envelope::result(json!({ "books": books })))
}

/// Partial update: only supplied fields change. An absent id is a typed
/// not-found error rather than a silent no-op.
pub async fn update_book(
    State(db): State<Db>,
    Params(params): Params<UpdateBookParams>,
) -> Result<Envelope, AppError> {
    let updated = sqlx::query(
        "UPDATE book SET title = COALESCE(?, title), pages = COALESCE(?, pages) WHERE id = ?",
    )
    .bind(params.title.as_deref())
    .bind(params.pages)
    .bind(params.id)
    .execute(db.pool())
    .await?;

    if updated.rows_affected() == 0 {
        return Err(AppError::not_found("book", params.id));
    }

    Ok(Envelope::success())
}

pub async fn delete_book(
    State(db): State<Db>,
    Params(params): Params<DeleteBookParams>,
) -> Result<Envelope, AppError> {
    let deleted = sqlx::query("DELETE FROM book WHERE id = ?")
        .bind(params.id)
        .execute(db.pool())
        .await?;

    if deleted.rows_affected() == 0 {
        return Err(AppError::not_found("book", params.id));
    }

    Ok(Envelope::success())
}
