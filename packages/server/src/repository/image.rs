use chrono::Utc;
use common::storage::{ImageStore, StorageError};
use sea_orm::*;

use super::{CONSTRAINT_ERROR, RepositoryError, constraint_error};
use crate::entity::image;

/// Attach an image record to a blog.
///
/// A constraint violation (e.g. a `blog_id` with no blog) rolls back and
/// fails with `Conflict`.
pub async fn create_image<C>(
    db: &C,
    blog_id: i32,
    image_url: &str,
    description: Option<&str>,
) -> Result<image::Model, RepositoryError>
where
    C: ConnectionTrait + TransactionTrait,
{
    let txn = db.begin().await?;

    let new_image = image::ActiveModel {
        blog_id: Set(blog_id),
        image_url: Set(image_url.to_string()),
        description: Set(description.map(str::to_string)),
        uploaded_at: Set(Utc::now()),
        ..Default::default()
    };

    let model = match new_image.insert(&txn).await {
        Ok(model) => model,
        Err(e) => {
            let err = constraint_error(e, CONSTRAINT_ERROR);
            txn.rollback().await?;
            return Err(err);
        }
    };

    txn.commit().await?;
    Ok(model)
}

pub async fn get_image<C: ConnectionTrait>(
    db: &C,
    id: i32,
) -> Result<Option<image::Model>, RepositoryError> {
    Ok(image::Entity::find_by_id(id).one(db).await?)
}

pub async fn list_images_by_blog<C: ConnectionTrait>(
    db: &C,
    blog_id: i32,
) -> Result<Vec<image::Model>, RepositoryError> {
    Ok(image::Entity::find()
        .filter(image::Column::BlogId.eq(blog_id))
        .order_by_asc(image::Column::Id)
        .all(db)
        .await?)
}

/// Apply a partial update to an image. Empty strings count as absent.
pub async fn update_image<C: ConnectionTrait>(
    db: &C,
    id: i32,
    image_url: Option<&str>,
    description: Option<&str>,
) -> Result<Option<image::Model>, RepositoryError> {
    let Some(existing) = get_image(db, id).await? else {
        return Ok(None);
    };

    let image_url = image_url.filter(|u| !u.is_empty());
    let description = description.filter(|d| !d.is_empty());
    if image_url.is_none() && description.is_none() {
        return Ok(Some(existing));
    }

    let mut active: image::ActiveModel = existing.into();
    if let Some(url) = image_url {
        active.image_url = Set(url.to_string());
    }
    if let Some(desc) = description {
        active.description = Set(Some(desc.to_string()));
    }

    let model = active
        .update(db)
        .await
        .map_err(|e| constraint_error(e, CONSTRAINT_ERROR))?;
    Ok(Some(model))
}

/// Delete an image record. Returns the image as it was before deletion.
///
/// The stored file is left in place; other records may share its name.
pub async fn delete_image<C: ConnectionTrait>(
    db: &C,
    id: i32,
) -> Result<Option<image::Model>, RepositoryError> {
    let Some(existing) = get_image(db, id).await? else {
        return Ok(None);
    };

    image::Entity::delete_by_id(id).exec(db).await?;
    Ok(Some(existing))
}

/// Write an uploaded file through the image store under its original name.
///
/// Returns the locator to persist as `image_url`. Uploads sharing a name
/// overwrite each other.
pub async fn save_uploaded_file(
    store: &dyn ImageStore,
    filename: &str,
    data: &[u8],
) -> Result<String, StorageError> {
    store.save(filename, data).await
}

/// Failure while attaching an upload to a blog.
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Store an uploaded file, then record it as an image of `blog_id`.
///
/// If the record cannot be created the stored file stays behind with nothing
/// pointing at it; that case is logged at `warn`.
pub async fn attach_uploaded_image<C>(
    db: &C,
    store: &dyn ImageStore,
    blog_id: i32,
    filename: &str,
    data: &[u8],
    description: Option<&str>,
) -> Result<image::Model, UploadError>
where
    C: ConnectionTrait + TransactionTrait,
{
    let image_url = save_uploaded_file(store, filename, data).await?;

    match create_image(db, blog_id, &image_url, description).await {
        Ok(image) => Ok(image),
        Err(e) => {
            tracing::warn!(
                blog_id,
                image_url = %image_url,
                error = %e,
                "Stored upload has no image record"
            );
            Err(e.into())
        }
    }
}
