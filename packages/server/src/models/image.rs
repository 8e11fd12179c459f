use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::image;

/// Selects the blog an image request applies to.
#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct BlogIdQuery {
    /// Blog the images belong to.
    #[param(example = 1)]
    pub blog_id: i32,
}

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct UploadImageQuery {
    /// Blog to attach the image to.
    #[param(example = 1)]
    pub blog_id: i32,
    /// Image description. A multipart `description` field takes precedence.
    pub description: Option<String>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct ImageResponse {
    #[schema(example = 7)]
    pub id: i32,
    #[schema(example = 1)]
    pub blog_id: i32,
    /// Where the uploaded file was stored.
    #[schema(example = "static/images/diagram.png")]
    pub image_url: String,
    pub description: Option<String>,
    pub uploaded_at: DateTime<Utc>,
}

impl From<image::Model> for ImageResponse {
    fn from(m: image::Model) -> Self {
        Self {
            id: m.id,
            blog_id: m.blog_id,
            image_url: m.image_url,
            description: m.description,
            uploaded_at: m.uploaded_at,
        }
    }
}
