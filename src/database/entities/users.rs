use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// An identity record. `password_hash` holds the argon2 hash of the raw
/// password and must never reach an API response; route modules project this
/// model into dedicated response types instead of serializing it directly.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub username: String,
    pub name: Option<String>,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::blogs::Entity")]
    Blogs,
}

impl Related<super::blogs::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Blogs.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Default for Model {
    fn default() -> Self {
        let now = chrono::Utc::now();
        Self {
            id: 0, // assigned by the database on insert
            username: String::new(),
            name: None,
            password_hash: String::new(),
            created_at: now,
            updated_at: now,
        }
    }
}

impl Model {
    /// Create a new user record with required fields
    pub fn new(username: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password_hash: password_hash.into(),
            ..Default::default()
        }
    }

    /// Builder method to set the display name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Builder method to set ID (for tests)
    pub fn with_id(mut self, id: i32) -> Self {
        self.id = id;
        self
    }
}
