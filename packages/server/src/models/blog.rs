use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::image::ImageResponse;
use super::shared::validate_title;
use crate::entity::{blog, image};
use crate::error::AppError;

/// Request body for creating a blog.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateBlogRequest {
    /// Title, unique across all blogs (1-256 characters).
    #[schema(example = "Notes on ownership")]
    pub title: String,
    /// Body text.
    #[schema(example = "Every value has a single owner.")]
    pub content: String,
}

pub fn validate_create_blog(payload: &CreateBlogRequest) -> Result<(), AppError> {
    validate_title(&payload.title)?;
    if payload.content.is_empty() {
        return Err(AppError::Validation("Content must not be empty".into()));
    }
    Ok(())
}

/// Request body for updating a blog. Omitted fields are left unchanged.
#[derive(Deserialize, Default, PartialEq, utoipa::ToSchema)]
pub struct UpdateBlogRequest {
    #[schema(example = "Notes on borrowing")]
    pub title: Option<String>,
    pub content: Option<String>,
}

pub fn validate_update_blog(payload: &UpdateBlogRequest) -> Result<(), AppError> {
    if let Some(ref title) = payload.title
        && !title.is_empty()
    {
        validate_title(title)?;
    }
    Ok(())
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct BlogResponse {
    #[schema(example = 1)]
    pub id: i32,
    pub title: String,
    pub content: String,
    /// ID of the user who wrote the blog.
    #[schema(example = 42)]
    pub author_id: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<blog::Model> for BlogResponse {
    fn from(m: blog::Model) -> Self {
        Self {
            id: m.id,
            title: m.title,
            content: m.content,
            author_id: m.author_id,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

/// A single blog with its attached images.
#[derive(Serialize, utoipa::ToSchema)]
pub struct BlogDetailResponse {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub author_id: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub images: Vec<ImageResponse>,
}

impl From<(blog::Model, Vec<image::Model>)> for BlogDetailResponse {
    fn from((m, images): (blog::Model, Vec<image::Model>)) -> Self {
        Self {
            id: m.id,
            title: m.title,
            content: m.content,
            author_id: m.author_id,
            created_at: m.created_at,
            updated_at: m.updated_at,
            images: images.into_iter().map(ImageResponse::from).collect(),
        }
    }
}
