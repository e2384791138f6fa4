use crate::database::entities::{BlogRecord, blogs};
use crate::database::{DatabaseError, DatabaseResult};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, DatabaseConnection, EntityTrait, ModelTrait, QueryOrder, Set,
};

/// Blogs DAO for database operations
#[derive(Clone)]
pub struct BlogsDao {
    db: DatabaseConnection,
}

impl BlogsDao {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// All blogs in insertion order. This is the snapshot the statistics
    /// aggregations run over, so the ordering matters for their tie-breaks.
    pub async fn find_all(&self) -> DatabaseResult<Vec<BlogRecord>> {
        blogs::Entity::find()
            .order_by_asc(blogs::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| DatabaseError::Database(e.to_string()))
    }

    pub async fn find_by_id(&self, id: i32) -> DatabaseResult<Option<BlogRecord>> {
        blogs::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| DatabaseError::Database(e.to_string()))
    }

    pub async fn insert(&self, blog: &BlogRecord) -> DatabaseResult<BlogRecord> {
        let active_model = blogs::ActiveModel {
            id: ActiveValue::NotSet, // let the database assign the ID
            title: Set(blog.title.clone()),
            author: Set(blog.author.clone()),
            url: Set(blog.url.clone()),
            likes: Set(blog.likes),
            user_id: Set(blog.user_id),
            created_at: Set(blog.created_at),
            updated_at: Set(blog.updated_at),
        };

        active_model
            .insert(&self.db)
            .await
            .map_err(|e| DatabaseError::Database(e.to_string()))
    }

    /// Replace the client-writable fields of a blog wholesale. The owner and
    /// creation timestamp survive; `author` and `likes` take whatever the
    /// caller sends, including `None`.
    pub async fn replace(
        &self,
        id: i32,
        title: String,
        author: Option<String>,
        url: String,
        likes: Option<i64>,
    ) -> DatabaseResult<BlogRecord> {
        let existing = blogs::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| DatabaseError::Database(e.to_string()))?
            .ok_or(DatabaseError::NotFound)?;

        let active_model = blogs::ActiveModel {
            id: Set(id),
            title: Set(title),
            author: Set(author),
            url: Set(url),
            likes: Set(likes),
            user_id: Set(existing.user_id),
            created_at: Set(existing.created_at),
            updated_at: Set(Utc::now()),
        };

        active_model
            .update(&self.db)
            .await
            .map_err(|e| DatabaseError::Database(e.to_string()))
    }

    pub async fn delete_by_id(&self, id: i32) -> DatabaseResult<()> {
        let blog = blogs::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| DatabaseError::Database(e.to_string()))?
            .ok_or(DatabaseError::NotFound)?;

        blog.delete(&self.db)
            .await
            .map_err(|e| DatabaseError::Database(e.to_string()))?;

        Ok(())
    }
}
