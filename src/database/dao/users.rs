use crate::database::entities::{BlogRecord, UserRecord, blogs, users};
use crate::database::{DatabaseError, DatabaseResult};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set, SqlErr,
};

/// Users DAO for database operations
#[derive(Clone)]
pub struct UsersDao {
    db: DatabaseConnection,
}

impl UsersDao {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Insert a new user. A duplicate username surfaces as a constraint
    /// violation even when two registrations race past the pre-check.
    pub async fn insert(&self, user: &UserRecord) -> DatabaseResult<UserRecord> {
        let active_model = users::ActiveModel {
            id: ActiveValue::NotSet, // let the database assign the ID
            username: Set(user.username.clone()),
            name: Set(user.name.clone()),
            password_hash: Set(user.password_hash.clone()),
            created_at: Set(user.created_at),
            updated_at: Set(user.updated_at),
        };

        active_model.insert(&self.db).await.map_err(|e| match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => {
                DatabaseError::Constraint("username must be unique".to_string())
            }
            _ => DatabaseError::Database(e.to_string()),
        })
    }

    pub async fn find_by_id(&self, user_id: i32) -> DatabaseResult<Option<UserRecord>> {
        users::Entity::find_by_id(user_id)
            .one(&self.db)
            .await
            .map_err(|e| DatabaseError::Database(e.to_string()))
    }

    pub async fn find_by_username(&self, username: &str) -> DatabaseResult<Option<UserRecord>> {
        users::Entity::find()
            .filter(users::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(|e| DatabaseError::Database(e.to_string()))
    }

    /// All users together with the blogs they own. The owned-blog list is
    /// derived from the blogs table's owner column, never stored separately.
    pub async fn find_all_with_blogs(&self) -> DatabaseResult<Vec<(UserRecord, Vec<BlogRecord>)>> {
        users::Entity::find()
            .order_by_asc(users::Column::Id)
            .find_with_related(blogs::Entity)
            .all(&self.db)
            .await
            .map_err(|e| DatabaseError::Database(e.to_string()))
    }
}
