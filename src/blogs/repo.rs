use serde::{Deserialize, Serialize};
use sqlx::{FromRow, MySqlPool};

use super::dto::NewBlog;

/// Blog record in the database. `image` is the stored file name under the
/// public images directory, when one was uploaded.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Blog {
    pub id: i32,
    pub title: String,
    pub author: String,
    #[serde(rename = "blogContent")]
    pub blog_content: String,
    pub image: Option<String>,
}

impl Blog {
    pub async fn find_all(db: &MySqlPool) -> sqlx::Result<Vec<Blog>> {
        sqlx::query_as::<_, Blog>(
            r#"
            SELECT id, title, author, blog_content, image
            FROM personal_blogs
            "#,
        )
        .fetch_all(db)
        .await
    }

    pub async fn find_by_id(db: &MySqlPool, id: i32) -> sqlx::Result<Option<Blog>> {
        sqlx::query_as::<_, Blog>(
            r#"
            SELECT id, title, author, blog_content, image
            FROM personal_blogs
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await
    }

    /// Insert a new blog and return the assigned identifier.
    pub async fn create(db: &MySqlPool, new: &NewBlog, image: Option<&str>) -> sqlx::Result<i32> {
        let result = sqlx::query(
            r#"
            INSERT INTO personal_blogs (title, author, blog_content, image)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(&new.title)
        .bind(&new.author)
        .bind(&new.blog_content)
        .bind(image)
        .execute(db)
        .await?;
        Ok(result.last_insert_id() as i32)
    }

    /// Full replace of title/author/content/image. Returns affected rows.
    pub async fn update(
        db: &MySqlPool,
        id: i32,
        new: &NewBlog,
        image: Option<&str>,
    ) -> sqlx::Result<u64> {
        let result = sqlx::query(
            r#"
            UPDATE personal_blogs
            SET title = ?, author = ?, blog_content = ?, image = ?
            WHERE id = ?
            "#,
        )
        .bind(&new.title)
        .bind(&new.author)
        .bind(&new.blog_content)
        .bind(image)
        .bind(id)
        .execute(db)
        .await?;
        Ok(result.rows_affected())
    }

    /// Delete by identifier. Returns deleted rows (0 when absent).
    pub async fn delete(db: &MySqlPool, id: i32) -> sqlx::Result<u64> {
        let result = sqlx::query(
            r#"
            DELETE FROM personal_blogs
            WHERE id = ?
            "#,
        )
        .bind(id)
        .execute(db)
        .await?;
        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blog_serializes_with_camel_case_content() {
        let blog = Blog {
            id: 7,
            title: "T".into(),
            author: "A".into(),
            blog_content: "C".into(),
            image: Some("image_1726154695904.png".into()),
        };
        let json = serde_json::to_value(&blog).unwrap();
        assert_eq!(json["blogContent"], "C");
        assert_eq!(json["image"], "image_1726154695904.png");
        assert!(json.get("blog_content").is_none());
    }
}
