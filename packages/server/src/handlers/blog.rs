use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::rejection::{AppJson, AppQuery};
use crate::models::blog::{
    BlogDetailResponse, BlogResponse, CreateBlogRequest, UpdateBlogRequest, validate_create_blog,
    validate_update_blog,
};
use crate::models::shared::ListQuery;
use crate::repository;
use crate::state::AppState;

async fn find_blog(
    db: &sea_orm::DatabaseConnection,
    id: i32,
) -> Result<crate::entity::blog::Model, AppError> {
    repository::blog::get_blog(db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Blog not found".into()))
}

#[utoipa::path(
    post,
    path = "/",
    tag = "Blogs",
    operation_id = "createBlog",
    summary = "Create a blog",
    description = "Creates a blog authored by the caller. Titles are unique across all blogs.",
    request_body = CreateBlogRequest,
    responses(
        (status = 201, description = "Blog created", body = BlogResponse),
        (status = 400, description = "Validation error or title already used (VALIDATION_ERROR, CONFLICT)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(user_id = auth_user.user_id, title = %payload.title))]
pub async fn create_blog(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateBlogRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_create_blog(&payload)?;

    let blog = repository::blog::create_blog(
        &state.db,
        payload.title.trim(),
        &payload.content,
        auth_user.user_id,
    )
    .await?;

    tracing::info!(blog_id = blog.id, "Blog created");
    Ok((StatusCode::CREATED, Json(BlogResponse::from(blog))))
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Blogs",
    operation_id = "listBlogs",
    summary = "List blogs, newest first",
    description = "Returns at most `limit` blogs (default 10) after skipping the first `skip` (default 0) of the newest-first list.",
    params(ListQuery),
    responses(
        (status = 200, description = "Blogs", body = Vec<BlogResponse>),
        (status = 400, description = "Malformed query (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, query), fields(skip = ?query.skip, limit = ?query.limit))]
pub async fn list_blogs(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<ListQuery>,
) -> Result<Json<Vec<BlogResponse>>, AppError> {
    let blogs = repository::blog::list_blogs(&state.db).await?;
    let page = query
        .apply(blogs)
        .into_iter()
        .map(BlogResponse::from)
        .collect();
    Ok(Json(page))
}

#[utoipa::path(
    get,
    path = "/{blog_id}",
    tag = "Blogs",
    operation_id = "getBlog",
    summary = "Get a blog with its images",
    params(("blog_id" = i32, Path, description = "Blog ID")),
    responses(
        (status = 200, description = "Blog details", body = BlogDetailResponse),
        (status = 404, description = "Blog not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(blog_id))]
pub async fn get_blog(
    State(state): State<AppState>,
    Path(blog_id): Path<i32>,
) -> Result<Json<BlogDetailResponse>, AppError> {
    let detail = repository::blog::get_blog_with_images(&state.db, blog_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Blog not found".into()))?;
    Ok(Json(detail.into()))
}

#[utoipa::path(
    put,
    path = "/{blog_id}",
    tag = "Blogs",
    operation_id = "updateBlog",
    summary = "Update a blog",
    description = "Partially updates a blog. Only the author may update it. Omitted or empty fields are left unchanged.",
    params(("blog_id" = i32, Path, description = "Blog ID")),
    request_body = UpdateBlogRequest,
    responses(
        (status = 200, description = "Blog updated", body = BlogResponse),
        (status = 400, description = "Validation error or title already used (VALIDATION_ERROR, CONFLICT)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Caller is not the author (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Blog not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(user_id = auth_user.user_id, blog_id))]
pub async fn update_blog(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(blog_id): Path<i32>,
    AppJson(payload): AppJson<UpdateBlogRequest>,
) -> Result<Json<BlogResponse>, AppError> {
    validate_update_blog(&payload)?;

    let blog = find_blog(&state.db, blog_id).await?;
    auth_user.require_author(blog.author_id, "update this blog")?;

    let updated = repository::blog::update_blog(
        &state.db,
        blog_id,
        payload.title.as_deref().map(str::trim),
        payload.content.as_deref(),
    )
    .await?
    .ok_or_else(|| AppError::NotFound("Blog not found".into()))?;

    Ok(Json(updated.into()))
}

#[utoipa::path(
    delete,
    path = "/{blog_id}",
    tag = "Blogs",
    operation_id = "deleteBlog",
    summary = "Delete a blog",
    description = "Deletes a blog together with all of its images. Only the author may delete it.",
    params(("blog_id" = i32, Path, description = "Blog ID")),
    responses(
        (status = 204, description = "Blog deleted"),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Caller is not the author (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Blog not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(user_id = auth_user.user_id, blog_id))]
pub async fn delete_blog(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(blog_id): Path<i32>,
) -> Result<StatusCode, AppError> {
    let blog = find_blog(&state.db, blog_id).await?;
    auth_user.require_author(blog.author_id, "delete this blog")?;

    repository::blog::delete_blog(&state.db, blog_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Blog not found".into()))?;

    Ok(StatusCode::NO_CONTENT)
}
