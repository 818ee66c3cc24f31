use axum::{
    extract::{rejection::{JsonRejection, PathRejection, QueryRejection}, Path, Query, State},
    Extension, Json,
};
use common::types::Message;
use serde::Deserialize;
use service::auth::domain::CurrentUser;
use service::pagination::{Paged, Pagination, DEFAULT_LIMIT};
use service::polls::domain::{Caller, Poll, PollCreate, PollUpdate};
use tracing::info;

use crate::{errors::ApiError, routes::auth::ServerState};

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    /// rows to skip
    #[serde(default)]
    pub skip: u64,
    /// page size
    #[serde(default = "default_limit")]
    pub limit: u64,
}

fn default_limit() -> u64 { DEFAULT_LIMIT }

// 路径、查询与请求体解析失败统一按 422 返回，400 只留给权限不足
fn path_id(id: Result<Path<i32>, PathRejection>) -> Result<i32, ApiError> {
    id.map(|Path(id)| id).map_err(|e| ApiError::unprocessable(e.body_text()))
}

fn body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    payload.map(|Json(v)| v).map_err(|e| ApiError::unprocessable(e.body_text()))
}

#[utoipa::path(
    get, path = "/polls/", tag = "polls",
    params(ListQuery),
    responses(
        (status = 200, description = "Polls visible to the caller", body = crate::openapi::PollsPublicDoc),
        (status = 403, description = "Could not validate credentials", body = crate::openapi::ErrorDetailDoc)
    ),
    security(("bearer" = []))
)]
pub async fn list(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<Paged<Poll>>, ApiError> {
    let Query(q) = query.map_err(|e| ApiError::unprocessable(e.body_text()))?;
    let caller = Caller::from(&user);
    let page = state.polls.list(&caller, Pagination::new(q.skip, q.limit)).await?;
    info!(user_id = %user.id, count = page.count, returned = page.data.len(), "list polls");
    Ok(Json(page))
}

#[utoipa::path(
    get, path = "/polls/{id}", tag = "polls",
    params(("id" = i32, Path, description = "Poll ID")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::PollPublicDoc),
        (status = 400, description = "Not enough permissions", body = crate::openapi::ErrorDetailDoc),
        (status = 404, description = "Poll not found", body = crate::openapi::ErrorDetailDoc)
    ),
    security(("bearer" = []))
)]
pub async fn read(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Json<Poll>, ApiError> {
    let id = path_id(id)?;
    let poll = state.polls.get(&Caller::from(&user), id).await?;
    Ok(Json(poll))
}

#[utoipa::path(
    post, path = "/polls/", tag = "polls",
    request_body = crate::openapi::PollCreateDoc,
    responses(
        (status = 200, description = "Created", body = crate::openapi::PollPublicDoc),
        (status = 422, description = "Validation Error", body = crate::openapi::ErrorDetailDoc)
    ),
    security(("bearer" = []))
)]
pub async fn create(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    payload: Result<Json<PollCreate>, JsonRejection>,
) -> Result<Json<Poll>, ApiError> {
    let input = body(payload)?;
    let poll = state.polls.create(&Caller::from(&user), input).await?;
    info!(poll_id = poll.id, owner_id = %poll.owner_id, "created poll");
    Ok(Json(poll))
}

#[utoipa::path(
    put, path = "/polls/{id}", tag = "polls",
    params(("id" = i32, Path, description = "Poll ID")),
    request_body = crate::openapi::PollUpdateDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::PollPublicDoc),
        (status = 400, description = "Not enough permissions", body = crate::openapi::ErrorDetailDoc),
        (status = 404, description = "Poll not found", body = crate::openapi::ErrorDetailDoc),
        (status = 422, description = "Validation Error", body = crate::openapi::ErrorDetailDoc)
    ),
    security(("bearer" = []))
)]
pub async fn update(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    id: Result<Path<i32>, PathRejection>,
    payload: Result<Json<PollUpdate>, JsonRejection>,
) -> Result<Json<Poll>, ApiError> {
    let id = path_id(id)?;
    let patch = body(payload)?;
    let poll = state.polls.update(&Caller::from(&user), id, patch).await?;
    info!(poll_id = poll.id, "updated poll");
    Ok(Json(poll))
}

#[utoipa::path(
    delete, path = "/polls/{id}", tag = "polls",
    params(("id" = i32, Path, description = "Poll ID")),
    responses(
        (status = 200, description = "Deleted", body = crate::openapi::MessageDoc),
        (status = 400, description = "Not enough permissions", body = crate::openapi::ErrorDetailDoc),
        (status = 404, description = "Poll not found", body = crate::openapi::ErrorDetailDoc)
    ),
    security(("bearer" = []))
)]
pub async fn delete(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Json<Message>, ApiError> {
    let id = path_id(id)?;
    state.polls.delete(&Caller::from(&user), id).await?;
    info!(poll_id = id, user_id = %user.id, "deleted poll");
    Ok(Json(Message::new("Poll deleted successfully")))
}
