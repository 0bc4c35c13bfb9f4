/*
 * Responsibility
 * - TaskStore: 単一レコード単位で atomic な store の契約
 * - MemoryTaskStore: DATABASE_URL 未設定時 (development / test) の実装
 */
use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::{Task, UpdateInstruction};
use crate::repos::error::StoreError;

/// Key-value style task store.
///
/// - `update` applies the whole instruction or nothing, and reports `NotFound`
///   instead of creating the record.
/// - `delete` is idempotent: removing a missing id is not an error.
/// - No version checks; concurrent writers to one id are last-writer-wins.
#[async_trait]
pub trait TaskStore: Send + Sync {
    fn backend_name(&self) -> &'static str;

    async fn scan(&self) -> Result<Vec<Task>, StoreError>;

    async fn put(&self, task: &Task) -> Result<(), StoreError>;

    async fn update(&self, id: Uuid, instruction: &UpdateInstruction) -> Result<(), StoreError>;

    async fn delete(&self, id: Uuid) -> Result<(), StoreError>;
}

#[derive(Clone, Debug, Default)]
pub struct MemoryTaskStore {
    tasks: Arc<RwLock<HashMap<Uuid, Task>>>,
}

impl MemoryTaskStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TaskStore for MemoryTaskStore {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn scan(&self) -> Result<Vec<Task>, StoreError> {
        Ok(self.tasks.read().await.values().cloned().collect())
    }

    async fn put(&self, task: &Task) -> Result<(), StoreError> {
        self.tasks.write().await.insert(task.id, task.clone());
        Ok(())
    }

    async fn update(&self, id: Uuid, instruction: &UpdateInstruction) -> Result<(), StoreError> {
        // write lock held for the whole instruction
        let mut tasks = self.tasks.write().await;
        let task = tasks.get_mut(&id).ok_or(StoreError::NotFound)?;
        task.apply(instruction);
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        self.tasks.write().await.remove(&id);
        Ok(())
    }
}
