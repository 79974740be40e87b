use thiserror::Error;

/// Errors that can occur while preparing a test context.
#[derive(Error, Debug)]
pub enum TestError {
    /// Failed to connect to the in-memory database, create tables or set up the session store.
    #[error(transparent)]
    Database(#[from] sea_orm::DbErr),
}
