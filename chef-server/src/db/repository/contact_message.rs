//! Contact Message Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{ContactMessage, ContactMessageCreate};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

#[derive(Clone)]
pub struct ContactMessageRepository {
    base: BaseRepository,
}

impl ContactMessageRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Append a contact message
    pub async fn create(&self, data: ContactMessageCreate) -> RepoResult<ContactMessage> {
        let mut result = self
            .base
            .db()
            .query(
                r#"CREATE contact_messages SET
                    name = $name,
                    email = $email,
                    message = $message,
                    created_at = $created_at
                RETURN AFTER"#,
            )
            .bind(("name", data.name))
            .bind(("email", data.email))
            .bind(("message", data.message))
            .bind(("created_at", shared::util::now_millis()))
            .await?;

        let created: Option<ContactMessage> = result.take(0)?;
        created.ok_or_else(|| RepoError::Database("Failed to create contact message".to_string()))
    }

    /// List every contact message, newest first
    pub async fn find_all(&self) -> RepoResult<Vec<ContactMessage>> {
        let messages: Vec<ContactMessage> = self
            .base
            .db()
            .query("SELECT * FROM contact_messages ORDER BY created_at DESC")
            .await?
            .take(0)?;
        Ok(messages)
    }
}
