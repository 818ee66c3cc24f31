use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::{IntoResponse, Response},
};
use service::auth::AuthService;
use service::polls::PollService;

use crate::errors::ApiError;

#[derive(Clone)]
pub struct ServerState {
    pub polls: Arc<PollService>,
    pub auth: Arc<AuthService>,
}

/// 读取 Authorization: Bearer <token>；缺失时回退从 Cookie 中解析 auth_token
pub fn extract_token(req: &Request) -> Option<String> {
    let authz = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());
    if let Some(h) = authz {
        let (scheme, token) = h.split_once(' ')?;
        if !scheme.eq_ignore_ascii_case("bearer") {
            return None;
        }
        return Some(token.trim().to_string());
    }

    let cookie_header = req
        .headers()
        .get(header::COOKIE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    cookie_header
        .split(';')
        .find_map(|part| part.trim().strip_prefix("auth_token="))
        .map(str::to_string)
}

/// 路由中间件：校验 token 并将当前用户注入 request 扩展供 handler 使用
/// 缺失或非法 token 返回 403；用户不存在 404；用户未激活 400
pub async fn require_current_user(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Response {
    let path = req.uri().path().to_string();
    let token = extract_token(&req);
    match state.auth.current_user(token.as_deref()).await {
        Ok(user) => {
            req.extensions_mut().insert(user);
            next.run(req).await
        }
        Err(e) => {
            tracing::warn!(path = %path, err = %e, code = e.code(), "request rejected by auth");
            ApiError::from(e).into_response()
        }
    }
}
