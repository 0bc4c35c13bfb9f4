/*
 * Responsibility
 * - Task の永続化 (scan / put / update / delete)
 * - backend (in-memory / Postgres) は TaskStore trait の裏に隠す
 */
pub mod error;
pub mod pg_task_repo;
pub mod task_repo;

pub use error::StoreError;
pub use pg_task_repo::PgTaskStore;
pub use task_repo::{MemoryTaskStore, TaskStore};
