//! Staff profiles repository

use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{policy::Role, profile::Profile},
};

#[derive(Clone)]
pub struct ProfilesRepository {
    pool: Pool<Postgres>,
}

impl ProfilesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Profile> {
        sqlx::query_as::<_, Profile>("SELECT * FROM profiles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Profile {} not found", id)))
    }

    /// Profile for an authenticated user, created as a visitor on first sign-in
    pub async fn get_or_create(&self, id: Uuid, email: Option<&str>) -> AppResult<Profile> {
        let row = sqlx::query_as::<_, Profile>(
            r#"
            INSERT INTO profiles (id, email, role)
            VALUES ($1, $2, $3)
            ON CONFLICT (id) DO UPDATE SET email = COALESCE(profiles.email, EXCLUDED.email)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(email)
        .bind(Role::Visitante.to_string())
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn list(&self) -> AppResult<Vec<Profile>> {
        let rows = sqlx::query_as::<_, Profile>(
            "SELECT * FROM profiles ORDER BY full_name NULLS LAST, email",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn update_role(&self, id: Uuid, role: Role) -> AppResult<Profile> {
        sqlx::query_as::<_, Profile>("UPDATE profiles SET role = $1 WHERE id = $2 RETURNING *")
            .bind(role.to_string())
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Profile {} not found", id)))
    }
}
