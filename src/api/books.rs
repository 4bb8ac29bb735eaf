//! Book endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::Multipart;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{
        book::{BookSearchQuery, StoreSpotQuery},
        Book, CreateBook, StoreSpot,
    },
};

use super::AuthenticatedUser;

/// Plain acknowledgement
#[derive(Serialize, Deserialize, ToSchema)]
pub struct DetailResponse {
    pub detail: String,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct AddedBook {
    pub inserted_id: Uuid,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct AddBookResponse {
    pub detail: String,
    pub added_book: AddedBook,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct BooksResponse {
    pub detail: String,
    pub books: Vec<Book>,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct UploadBooksResponse {
    pub detail: String,
    /// Data rows carrying a title
    pub total_books_in_file: usize,
    /// Rows that produced a new record
    pub added_books_count: usize,
    /// Records removed before importing
    pub deleted_books_count: u64,
}

/// Multipart body of a spreadsheet upload
#[derive(ToSchema)]
#[allow(dead_code)]
pub struct UploadForm {
    /// .xlsx or .xls file
    #[schema(value_type = String, format = Binary)]
    file: Vec<u8>,
}

/// Add a book
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    security(("bearer_auth" = [])),
    request_body = CreateBook,
    responses(
        (status = 201, description = "Book created", body = AddBookResponse),
        (status = 400, description = "Invalid input"),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn add_book(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Json(book): Json<CreateBook>,
) -> AppResult<(StatusCode, Json<AddBookResponse>)> {
    let inserted_id = state.services.books.add_book(book).await?;
    Ok((
        StatusCode::CREATED,
        Json(AddBookResponse {
            detail: "Book added".to_string(),
            added_book: AddedBook { inserted_id },
        }),
    ))
}

/// Get a book by ID
#[utoipa::path(
    get,
    path = "/books/{id}",
    tag = "books",
    params(("id" = Uuid, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book details", body = Book),
        (status = 404, description = "Book not found")
    )
)]
pub async fn get_book(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Book>> {
    let book = state.services.books.get_book(id).await?;
    Ok(Json(book))
}

/// Soft-delete a book
#[utoipa::path(
    delete,
    path = "/books/{id}",
    tag = "books",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book deleted", body = DetailResponse),
        (status = 404, description = "Book not found or already deleted")
    )
)]
pub async fn delete_book(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<DetailResponse>> {
    state.services.books.delete_book(id).await?;
    Ok(Json(DetailResponse {
        detail: "Book deleted".to_string(),
    }))
}

/// Search books by title (case-insensitive, partial match)
#[utoipa::path(
    get,
    path = "/books/search/{title}",
    tag = "books",
    params(
        ("title" = String, Path, description = "Title fragment"),
        BookSearchQuery
    ),
    responses(
        (status = 200, description = "Matching books", body = BooksResponse),
        (status = 404, description = "No matching book")
    )
)]
pub async fn search_books(
    State(state): State<crate::AppState>,
    Path(title): Path<String>,
    Query(query): Query<BookSearchQuery>,
) -> AppResult<Json<BooksResponse>> {
    let books = state
        .services
        .books
        .search_by_title(&title, query.store_spot)
        .await?;
    Ok(Json(BooksResponse {
        detail: format!("{} book(s) found", books.len()),
        books,
    }))
}

/// List the books of a store location, most requested first
#[utoipa::path(
    get,
    path = "/books/store/{store_spot}",
    tag = "books",
    params(("store_spot" = StoreSpot, Path, description = "Store location")),
    responses(
        (status = 200, description = "Books of the location", body = BooksResponse)
    )
)]
pub async fn list_store_books(
    State(state): State<crate::AppState>,
    Path(store_spot): Path<StoreSpot>,
) -> AppResult<Json<BooksResponse>> {
    let books = state.services.books.list_by_store(store_spot).await?;
    Ok(Json(BooksResponse {
        detail: format!("{} book(s) found", books.len()),
        books,
    }))
}

/// Replace a location's books with the rows of an Excel file
#[utoipa::path(
    post,
    path = "/books/upload/excel",
    tag = "books",
    security(("bearer_auth" = [])),
    params(StoreSpotQuery),
    request_body(content = UploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Spreadsheet imported", body = UploadBooksResponse),
        (status = 400, description = "Not a spreadsheet, unreadable file or missing title column"),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn upload_excel(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Query(query): Query<StoreSpotQuery>,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<UploadBooksResponse>)> {
    let mut upload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Malformed multipart body: {}", e)))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let content_type = field.content_type().map(str::to_string);
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(format!("Could not read uploaded file: {}", e)))?;
        upload = Some((content_type, data));
        break;
    }

    let (content_type, data) =
        upload.ok_or_else(|| AppError::BadRequest("Missing 'file' field".to_string()))?;

    tracing::info!(
        uploader = %claims.sub,
        store_spot = %query.store_spot,
        bytes = data.len(),
        "Spreadsheet upload received"
    );

    let summary = state
        .services
        .import
        .import_workbook(query.store_spot, content_type.as_deref(), data.to_vec())
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(UploadBooksResponse {
            detail: "Spreadsheet imported".to_string(),
            total_books_in_file: summary.total_books_in_file,
            added_books_count: summary.added_books_count,
            deleted_books_count: summary.deleted_books_count,
        }),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_book_response_shape() {
        let id = Uuid::new_v4();
        let json = serde_json::to_value(AddBookResponse {
            detail: "Book added".to_string(),
            added_book: AddedBook { inserted_id: id },
        })
        .unwrap();
        assert_eq!(json["detail"], "Book added");
        assert_eq!(json["added_book"]["inserted_id"], id.to_string());
    }
}
