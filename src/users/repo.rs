use serde::{Deserialize, Serialize};
use sqlx::{FromRow, MySqlPool};

/// User record in the database.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String, // argon2 digest, never exposed in JSON
}

impl User {
    /// Find a user by email. Login key; the table enforces uniqueness.
    pub async fn find_by_email(db: &MySqlPool, email: &str) -> sqlx::Result<Option<User>> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password_hash
            FROM users
            WHERE email = ?
            "#,
        )
        .bind(email)
        .fetch_optional(db)
        .await
    }

    pub async fn find_by_id(db: &MySqlPool, id: i32) -> sqlx::Result<Option<User>> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password_hash
            FROM users
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await
    }

    /// Insert a new user and return the assigned identifier.
    pub async fn create(
        db: &MySqlPool,
        name: &str,
        email: &str,
        password_hash: &str,
    ) -> sqlx::Result<i32> {
        let result = sqlx::query(
            r#"
            INSERT INTO users (name, email, password_hash)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(name)
        .bind(email)
        .bind(password_hash)
        .execute(db)
        .await?;
        Ok(result.last_insert_id() as i32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_hash_never_serializes() {
        let user = User {
            id: 1,
            name: "Dipak pawar".into(),
            email: "dipak@123gmail.com".into(),
            password_hash: "$argon2id$very-secret".into(),
        };
        let json = serde_json::to_string(&user).unwrap();
        assert!(json.contains("dipak@123gmail.com"));
        assert!(!json.contains("argon2id"));
        assert!(!json.contains("password_hash"));
    }
}
