//! Book record model and related types

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use super::enums::StoreSpot;

/// Book record as stored
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: Uuid,
    pub store_spot: StoreSpot,
    /// Course the book is ordered for
    pub subject_name: Option<String>,
    pub book_title: String,
    pub author: Option<String>,
    pub publisher: Option<String>,
    /// Copies requested
    pub request_count: i32,
    /// Copies received
    pub received_count: i32,
    pub price: i32,
    /// received / requested, not range-checked
    pub fulfillment_rate: f64,
    pub major: Option<String>,
    pub professor_name: Option<String>,
    /// Shelf location in the store
    pub location: Option<String>,
    pub order_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Insert shape shared by single creation and spreadsheet import
#[derive(Debug, Clone, PartialEq)]
pub struct NewBook {
    pub store_spot: StoreSpot,
    pub subject_name: Option<String>,
    pub book_title: String,
    pub author: Option<String>,
    pub publisher: Option<String>,
    pub request_count: i32,
    pub received_count: i32,
    pub price: i32,
    pub fulfillment_rate: f64,
    pub major: Option<String>,
    pub professor_name: Option<String>,
    pub location: Option<String>,
    pub order_date: Option<NaiveDate>,
}

#[cfg(test)]
impl NewBook {
    /// Empty record for a title, every other field at its default
    pub fn titled(store_spot: StoreSpot, book_title: impl Into<String>) -> Self {
        Self {
            store_spot,
            subject_name: None,
            book_title: book_title.into(),
            author: None,
            publisher: None,
            request_count: 0,
            received_count: 0,
            price: 0,
            fulfillment_rate: 0.0,
            major: None,
            professor_name: None,
            location: None,
            order_date: None,
        }
    }
}

/// Whether an upsert hit an existing row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Inserted,
    Updated,
}

/// Create book request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBook {
    pub store_spot: StoreSpot,
    pub subject_name: Option<String>,
    #[validate(custom(function = "validate_not_blank"))]
    pub book_title: String,
    pub author: Option<String>,
    pub publisher: Option<String>,
    #[validate(range(min = 0, message = "Request count cannot be negative"))]
    pub request_count: Option<i32>,
    #[validate(range(min = 0, message = "Received count cannot be negative"))]
    pub received_count: Option<i32>,
    #[validate(range(min = 0, message = "Price cannot be negative"))]
    pub price: Option<i32>,
    /// Computed from the counts when omitted
    pub fulfillment_rate: Option<f64>,
    pub major: Option<String>,
    pub professor_name: Option<String>,
    pub location: Option<String>,
    pub order_date: Option<NaiveDate>,
}

fn validate_not_blank(value: &str) -> Result<(), validator::ValidationError> {
    if value.trim().is_empty() {
        let mut err = validator::ValidationError::new("blank");
        err.message = Some("Book title must not be blank".into());
        return Err(err);
    }
    Ok(())
}

/// received / requested, 0.0 when nothing was requested
pub fn compute_fulfillment_rate(requested: i32, received: i32) -> f64 {
    if requested <= 0 {
        0.0
    } else {
        received as f64 / requested as f64
    }
}

impl From<CreateBook> for NewBook {
    fn from(data: CreateBook) -> Self {
        let request_count = data.request_count.unwrap_or(0);
        let received_count = data.received_count.unwrap_or(0);
        NewBook {
            store_spot: data.store_spot,
            subject_name: data.subject_name,
            book_title: data.book_title.trim().to_string(),
            author: data.author,
            publisher: data.publisher,
            request_count,
            received_count,
            price: data.price.unwrap_or(0),
            fulfillment_rate: data
                .fulfillment_rate
                .unwrap_or_else(|| compute_fulfillment_rate(request_count, received_count)),
            major: data.major,
            professor_name: data.professor_name,
            location: data.location,
            order_date: data.order_date,
        }
    }
}

/// Query parameter selecting a store location
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct StoreSpotQuery {
    pub store_spot: StoreSpot,
}

/// Title search parameters
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct BookSearchQuery {
    /// Restrict results to one store location
    pub store_spot: Option<StoreSpot>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_request() -> CreateBook {
        CreateBook {
            store_spot: StoreSpot::Sch,
            subject_name: Some("Algorithms".to_string()),
            book_title: "  Introduction to Algorithms ".to_string(),
            author: Some("Cormen".to_string()),
            publisher: Some("MIT Press".to_string()),
            request_count: Some(40),
            received_count: Some(30),
            price: Some(52000),
            fulfillment_rate: None,
            major: None,
            professor_name: None,
            location: Some("A-3".to_string()),
            order_date: None,
        }
    }

    #[test]
    fn test_fulfillment_rate_computed_when_missing() {
        let book = NewBook::from(create_request());
        assert_eq!(book.book_title, "Introduction to Algorithms");
        assert!((book.fulfillment_rate - 0.75).abs() < f64::EPSILON);
    }

    #[test]
    fn test_fulfillment_rate_kept_when_supplied() {
        let mut request = create_request();
        request.fulfillment_rate = Some(3.5);
        assert_eq!(NewBook::from(request).fulfillment_rate, 3.5);
    }

    #[test]
    fn test_fulfillment_rate_with_no_requests() {
        assert_eq!(compute_fulfillment_rate(0, 5), 0.0);
    }

    #[test]
    fn test_blank_title_rejected() {
        let mut request = create_request();
        request.book_title = "   ".to_string();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_negative_count_rejected() {
        let mut request = create_request();
        request.request_count = Some(-1);
        assert!(request.validate().is_err());
        assert!(create_request().validate().is_ok());
    }
}
