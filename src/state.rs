/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 *   - tasks: store + sink を持つ TaskService
 *   - auth: 鍵キャッシュを持つ TokenVerifier (プロセスで 1 つ)
 * - Clone 前提で持つ (内部は Arc/Clone cheap)
 */
use std::sync::Arc;

use crate::services::{auth::TokenVerifier, tasks::TaskService};

#[derive(Clone, Debug)]
pub struct AppState {
    pub tasks: TaskService,
    pub auth: Arc<TokenVerifier>,
}

impl AppState {
    pub fn new(tasks: TaskService, auth: Arc<TokenVerifier>) -> Self {
        Self { tasks, auth }
    }
}
