use chrono::Utc;
use sea_orm::*;

use super::{RepositoryError, constraint_error};
use crate::entity::{blog, image};

pub const TITLE_TAKEN: &str = "A blog with this title already exists";

async fn title_taken<C: ConnectionTrait>(db: &C, title: &str) -> Result<bool, DbErr> {
    let count = blog::Entity::find()
        .filter(blog::Column::Title.eq(title))
        .count(db)
        .await?;
    Ok(count > 0)
}

/// Create a blog owned by `author_id`.
///
/// Fails with `Conflict` when the title is already used by another blog,
/// either at the pre-check or at the unique constraint on insert.
pub async fn create_blog<C>(
    db: &C,
    title: &str,
    content: &str,
    author_id: i32,
) -> Result<blog::Model, RepositoryError>
where
    C: ConnectionTrait + TransactionTrait,
{
    let txn = db.begin().await?;

    if title_taken(&txn, title).await? {
        return Err(RepositoryError::Conflict(TITLE_TAKEN.into()));
    }

    let now = Utc::now();
    let new_blog = blog::ActiveModel {
        title: Set(title.to_string()),
        content: Set(content.to_string()),
        author_id: Set(author_id),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    let model = match new_blog.insert(&txn).await {
        Ok(model) => model,
        Err(e) => {
            let err = constraint_error(e, TITLE_TAKEN);
            txn.rollback().await?;
            return Err(err);
        }
    };

    txn.commit().await?;
    Ok(model)
}

pub async fn get_blog<C: ConnectionTrait>(
    db: &C,
    id: i32,
) -> Result<Option<blog::Model>, RepositoryError> {
    Ok(blog::Entity::find_by_id(id).one(db).await?)
}

/// A blog together with its images, in upload order.
pub async fn get_blog_with_images<C: ConnectionTrait>(
    db: &C,
    id: i32,
) -> Result<Option<(blog::Model, Vec<image::Model>)>, RepositoryError> {
    let Some(blog) = get_blog(db, id).await? else {
        return Ok(None);
    };
    let images = super::image::list_images_by_blog(db, id).await?;
    Ok(Some((blog, images)))
}

/// All blogs, newest first.
pub async fn list_blogs<C: ConnectionTrait>(db: &C) -> Result<Vec<blog::Model>, RepositoryError> {
    Ok(blog::Entity::find()
        .order_by_desc(blog::Column::CreatedAt)
        .order_by_desc(blog::Column::Id)
        .all(db)
        .await?)
}

/// Apply a partial update to a blog.
///
/// Empty strings count as absent. A title equal to the current one is left
/// alone; any other title already in use fails with `Conflict` and the blog is
/// not modified. `updated_at` is refreshed only when a field actually changes.
pub async fn update_blog<C>(
    db: &C,
    id: i32,
    title: Option<&str>,
    content: Option<&str>,
) -> Result<Option<blog::Model>, RepositoryError>
where
    C: ConnectionTrait + TransactionTrait,
{
    let txn = db.begin().await?;

    let Some(existing) = blog::Entity::find_by_id(id).one(&txn).await? else {
        return Ok(None);
    };

    let title = title.filter(|t| !t.is_empty() && *t != existing.title);
    let content = content.filter(|c| !c.is_empty() && *c != existing.content);

    if title.is_none() && content.is_none() {
        return Ok(Some(existing));
    }

    if let Some(title) = title
        && title_taken(&txn, title).await?
    {
        return Err(RepositoryError::Conflict(TITLE_TAKEN.into()));
    }

    let mut active: blog::ActiveModel = existing.into();
    if let Some(title) = title {
        active.title = Set(title.to_string());
    }
    if let Some(content) = content {
        active.content = Set(content.to_string());
    }
    active.updated_at = Set(Utc::now());

    let model = match active.update(&txn).await {
        Ok(model) => model,
        Err(e) => {
            let err = constraint_error(e, TITLE_TAKEN);
            txn.rollback().await?;
            return Err(err);
        }
    };

    txn.commit().await?;
    Ok(Some(model))
}

/// Delete a blog and all of its images in one transaction.
///
/// Returns the blog as it was before deletion.
pub async fn delete_blog<C>(db: &C, id: i32) -> Result<Option<blog::Model>, RepositoryError>
where
    C: ConnectionTrait + TransactionTrait,
{
    let txn = db.begin().await?;

    let Some(existing) = blog::Entity::find_by_id(id).one(&txn).await? else {
        return Ok(None);
    };

    let removed = image::Entity::delete_many()
        .filter(image::Column::BlogId.eq(id))
        .exec(&txn)
        .await?;
    blog::Entity::delete_by_id(id).exec(&txn).await?;

    txn.commit().await?;

    tracing::debug!(
        blog_id = id,
        images = removed.rows_affected,
        "Deleted blog with its images"
    );
    Ok(Some(existing))
}
