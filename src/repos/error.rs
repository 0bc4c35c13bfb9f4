/*
 * Responsibility
 * - store が上位に伝える意味の定義
 */
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("record not found")]
    NotFound,
    #[error("store did not answer in time")]
    Unavailable,
    #[error("db error")]
    Backend(#[from] sqlx::Error),
}
