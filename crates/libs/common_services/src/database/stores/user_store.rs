use crate::database::DbError;
use crate::database::app_user::{User, UserRole, UserWithPassword};
use common_types::ActorRole;
use sqlx::{Executor, Postgres};

pub struct UserStore;

impl UserStore {
    /// Creates a new user.
    pub async fn create(
        executor: impl Executor<'_, Database = Postgres>,
        email: &str,
        name: &str,
        hashed_password: &str,
        role: UserRole,
        marketplace_role: ActorRole,
    ) -> Result<User, DbError> {
        Ok(sqlx::query_as::<_, User>(
            r"
            INSERT INTO app_user (email, name, password, role, marketplace_role)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, created_at, updated_at, email, name, role, marketplace_role
            ",
        )
        .bind(email)
        .bind(name)
        .bind(hashed_password)
        .bind(role)
        .bind(marketplace_role)
        .fetch_one(executor)
        .await?)
    }

    pub async fn find_by_id(
        executor: impl Executor<'_, Database = Postgres>,
        user_id: i32,
    ) -> Result<Option<User>, DbError> {
        Ok(sqlx::query_as::<_, User>(
            r"
            SELECT id, created_at, updated_at, email, name, role, marketplace_role
            FROM app_user
            WHERE id = $1
            ",
        )
        .bind(user_id)
        .fetch_optional(executor)
        .await?)
    }

    pub async fn find_by_email_with_password(
        executor: impl Executor<'_, Database = Postgres>,
        email: &str,
    ) -> Result<Option<UserWithPassword>, DbError> {
        Ok(sqlx::query_as::<_, UserWithPassword>(
            r"
            SELECT id, created_at, updated_at, email, name, role, marketplace_role, password
            FROM app_user
            WHERE email = $1
            ",
        )
        .bind(email)
        .fetch_optional(executor)
        .await?)
    }

    pub async fn any_exists(
        executor: impl Executor<'_, Database = Postgres>,
    ) -> Result<bool, DbError> {
        Ok(
            sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM app_user)")
                .fetch_one(executor)
                .await?,
        )
    }

    pub async fn list_users(
        executor: impl Executor<'_, Database = Postgres>,
    ) -> Result<Vec<User>, DbError> {
        Ok(sqlx::query_as::<_, User>(
            r"
            SELECT id, created_at, updated_at, email, name, role, marketplace_role
            FROM app_user
            ORDER BY id
            ",
        )
        .fetch_all(executor)
        .await?)
    }
}
