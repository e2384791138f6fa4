use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A stored blog post. `author` and `likes` are genuinely optional in
/// storage: a full-replacement update drops any field the client did not
/// send, so readers must not assume either is present. Aggregations treat a
/// missing like count as 0.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "blogs")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    pub author: Option<String>,
    pub url: String,
    pub likes: Option<i64>,
    pub user_id: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    Users,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Default for Model {
    fn default() -> Self {
        let now = chrono::Utc::now();
        Self {
            id: 0, // assigned by the database on insert
            title: String::new(),
            author: None,
            url: String::new(),
            likes: Some(0),
            user_id: None,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Model {
    /// Create a new blog record with the fields the creation path requires.
    /// Likes start at 0, matching the creation-time normalization.
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            ..Default::default()
        }
    }

    /// Builder method to set the author
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// Builder method to set the like count
    pub fn with_likes(mut self, likes: i64) -> Self {
        self.likes = Some(likes);
        self
    }

    /// Builder method to set the owning user
    pub fn with_owner(mut self, user_id: i32) -> Self {
        self.user_id = Some(user_id);
        self
    }

    /// Builder method to set ID (for tests)
    pub fn with_id(mut self, id: i32) -> Self {
        self.id = id;
        self
    }
}
