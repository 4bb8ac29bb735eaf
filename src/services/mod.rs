//! Business logic services

pub mod auth;
pub mod books;
pub mod import;

use crate::{config::AuthConfig, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub auth: auth::AuthService,
    pub books: books::BooksService,
    pub import: import::ImportService,
    pub repository: Repository,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, auth_config: AuthConfig) -> Self {
        Self {
            auth: auth::AuthService::new(repository.users.clone(), auth_config),
            books: books::BooksService::new(repository.books.clone()),
            import: import::ImportService::new(repository.books.clone()),
            repository,
        }
    }
}
