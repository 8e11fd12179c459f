use axum::{
    Json,
    extract::{DefaultBodyLimit, Multipart, Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use tracing::instrument;

use crate::entity::blog;
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::rejection::AppQuery;
use crate::models::image::{BlogIdQuery, ImageResponse, UploadImageQuery};
use crate::repository;
use crate::state::AppState;

pub fn upload_body_limit(max_upload_size: usize) -> DefaultBodyLimit {
    DefaultBodyLimit::max(max_upload_size)
}

async fn find_blog(db: &sea_orm::DatabaseConnection, id: i32) -> Result<blog::Model, AppError> {
    repository::blog::get_blog(db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Blog not found".into()))
}

#[utoipa::path(
    post,
    path = "/",
    tag = "Images",
    operation_id = "uploadImage",
    summary = "Upload an image to a blog",
    description = "Stores the `file` multipart field under its original filename and attaches it to the blog. \
        An optional `description` field (or query parameter) is saved with the image. \
        Uploading a file with a name already in storage replaces the stored file. Only the blog's author may upload.",
    params(UploadImageQuery),
    request_body(content_type = "multipart/form-data", description = "Image file with optional description"),
    responses(
        (status = 201, description = "Image attached", body = ImageResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR, CONFLICT)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Caller is not the author (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Blog not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, query, multipart), fields(user_id = auth_user.user_id, blog_id = query.blog_id))]
pub async fn upload_image(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppQuery(query): AppQuery<UploadImageQuery>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let blog = find_blog(&state.db, query.blog_id).await?;
    auth_user.require_author(blog.author_id, "add images to this blog")?;

    let mut file: Option<(Option<String>, Vec<u8>)> = None;
    let mut description = query.description;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Multipart error: {e}")))?
    {
        match field.name() {
            Some("file") => {
                let file_name = field.file_name().map(|s| s.to_string());
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read file: {e}")))?;
                file = Some((file_name, data.to_vec()));
            }
            Some("description") => {
                let text = field.text().await.map_err(|e| {
                    AppError::Validation(format!("Failed to read description: {e}"))
                })?;
                description = Some(text);
            }
            _ => {}
        }
    }

    let (file_name, data) =
        file.ok_or_else(|| AppError::Validation("Missing 'file' field".into()))?;
    let file_name =
        file_name.ok_or_else(|| AppError::Validation("File field must have a filename".into()))?;

    let description = description.filter(|d| !d.trim().is_empty());
    let image = repository::image::attach_uploaded_image(
        &state.db,
        &*state.image_store,
        blog.id,
        &file_name,
        &data,
        description.as_deref(),
    )
    .await?;

    tracing::info!(image_id = image.id, image_url = %image.image_url, "Image uploaded");
    Ok((StatusCode::CREATED, Json(ImageResponse::from(image))))
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Images",
    operation_id = "listImages",
    summary = "List the images of a blog",
    params(BlogIdQuery),
    responses(
        (status = 200, description = "Images in upload order", body = Vec<ImageResponse>),
        (status = 400, description = "Missing or malformed blog_id (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Blog not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, query), fields(blog_id = query.blog_id))]
pub async fn list_images(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<BlogIdQuery>,
) -> Result<Json<Vec<ImageResponse>>, AppError> {
    let blog = find_blog(&state.db, query.blog_id).await?;
    let images = repository::image::list_images_by_blog(&state.db, blog.id).await?;
    Ok(Json(images.into_iter().map(ImageResponse::from).collect()))
}

#[utoipa::path(
    delete,
    path = "/{image_id}",
    tag = "Images",
    operation_id = "deleteImage",
    summary = "Delete an image from a blog",
    description = "Removes the image record. The stored file is kept. Only the blog's author may delete images.",
    params(
        ("image_id" = i32, Path, description = "Image ID"),
        BlogIdQuery,
    ),
    responses(
        (status = 204, description = "Image deleted"),
        (status = 400, description = "Missing or malformed blog_id (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Caller is not the author (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Blog or image not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, query), fields(user_id = auth_user.user_id, blog_id = query.blog_id, image_id))]
pub async fn delete_image(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(image_id): Path<i32>,
    AppQuery(query): AppQuery<BlogIdQuery>,
) -> Result<StatusCode, AppError> {
    let blog = find_blog(&state.db, query.blog_id).await?;
    auth_user.require_author(blog.author_id, "delete images from this blog")?;

    let image = repository::image::get_image(&state.db, image_id)
        .await?
        .filter(|image| image.blog_id == blog.id)
        .ok_or_else(|| AppError::NotFound("Image not found in this blog".into()))?;

    repository::image::delete_image(&state.db, image.id).await?;

    Ok(StatusCode::NO_CONTENT)
}
