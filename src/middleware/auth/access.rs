//! Bearer token 検証 → AuthCtx を extensions に入れる
//!
//! - `Authorization: Bearer <jwt>` を TokenVerifier で検証する
//! - header が無い/形式違いの場合は空 token として扱い、同じ検証経路で拒否する
//! - 拒否理由は verifier 側のログにだけ残し、response は一律 401

use axum::{
    Router,
    body::Body,
    extract::State,
    http::{HeaderMap, Request, header},
    middleware::{self, Next},
    response::Response,
};

use crate::api::v1::extractors::AuthCtx;
use crate::error::AppError;
use crate::state::AppState;

/// 書き込み系 route に認証を掛ける。
///
/// `route_layer` なので、未定義 path は 401 ではなく 404 のまま。
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    // axum 0.8 の from_fn は State extractor を受け取れないため、`from_fn_with_state` で明示的に state を渡す
    router.route_layer(middleware::from_fn_with_state(state, access_middleware))
}

/// Token part of the `Authorization` header, or `""` when absent or not a bearer header.
pub fn bearer_token(headers: &HeaderMap) -> &str {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .unwrap_or("")
}

async fn access_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let token = bearer_token(req.headers()).to_string();

    let claims = state
        .auth
        .verify(&token)
        .await
        .map_err(|_| AppError::Unauthorized)?;

    // middleware → extractor への受け渡し
    req.extensions_mut().insert(AuthCtx::new(claims));

    Ok(next.run(req).await)
}
