//! Data models for the bookstore

pub mod book;
pub mod enums;
pub mod import_report;
pub mod user;

pub use book::{Book, CreateBook, NewBook, UpsertOutcome};
pub use enums::StoreSpot;
pub use import_report::ImportSummary;
pub use user::{NewUserCredential, TokenClaims, UserCredential};
