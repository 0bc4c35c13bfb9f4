/*
 * Responsibility
 * - Handler から見える「認証済みコンテキスト」の型
 * - middleware が検証して request extensions に格納し、handler はこの型だけを受け取る
 * - request が終われば破棄される (claims は永続化しない)
 */
use crate::services::auth::ClaimSet;

#[derive(Debug, Clone)]
pub struct AuthCtx {
    pub claims: ClaimSet,
}

impl AuthCtx {
    pub fn new(claims: ClaimSet) -> Self {
        Self { claims }
    }

    /// Caller identity for logs; `-` when the provider omitted `sub`.
    pub fn subject(&self) -> &str {
        self.claims.subject().unwrap_or("-")
    }
}
