use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;
use uuid::Uuid;

use crate::auth_domain::models::PrincipalView;
use crate::auth_domain::ports::AuthorityResolver;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::Role;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;

const USER_COLUMNS: &str =
    "id, email, password_hash, role, first_name, last_name, company_name, phone_number, created_at";

pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_user(row: &PgRow) -> Result<User, UserError> {
        let email: String = row.try_get("email").map_err(db_err)?;
        let role: String = row.try_get("role").map_err(db_err)?;
        let role = Role::parse(&role)
            .ok_or_else(|| UserError::DatabaseError(format!("Unknown role in store: {}", role)))?;

        Ok(User {
            id: UserId(row.try_get::<Uuid, _>("id").map_err(db_err)?),
            email: EmailAddress::new(email)?,
            password_hash: row.try_get("password_hash").map_err(db_err)?,
            role,
            first_name: row.try_get("first_name").map_err(db_err)?,
            last_name: row.try_get("last_name").map_err(db_err)?,
            company_name: row.try_get("company_name").map_err(db_err)?,
            phone_number: row.try_get("phone_number").map_err(db_err)?,
            created_at: row.try_get("created_at").map_err(db_err)?,
        })
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn exists_by_email(&self, email: &str) -> Result<bool, UserError> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
            .bind(email)
            .fetch_one(&self.pool)
            .await
            .map_err(db_err)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM users WHERE email = $1",
            USER_COLUMNS
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;

        row.as_ref().map(Self::row_to_user).transpose()
    }

    async fn save(&self, user: User) -> Result<User, UserError> {
        sqlx::query(
            r#"
            INSERT INTO users (id, email, password_hash, role, first_name, last_name, company_name, phone_number, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT (id) DO UPDATE SET
                email = EXCLUDED.email,
                password_hash = EXCLUDED.password_hash,
                role = EXCLUDED.role,
                first_name = EXCLUDED.first_name,
                last_name = EXCLUDED.last_name,
                company_name = EXCLUDED.company_name,
                phone_number = EXCLUDED.phone_number
            "#,
        )
        .bind(user.id.0)
        .bind(user.email.as_str())
        .bind(&user.password_hash)
        .bind(user.role.as_str())
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.company_name)
        .bind(&user.phone_number)
        .bind(user.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() && db_err.constraint() == Some("users_email_key") {
                    return UserError::EmailAlreadyExists(user.email.as_str().to_string());
                }
            }
            UserError::DatabaseError(e.to_string())
        })?;

        Ok(user)
    }

    async fn find_all(&self) -> Result<Vec<User>, UserError> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM users ORDER BY created_at DESC",
            USER_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        rows.iter().map(Self::row_to_user).collect()
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        let row = sqlx::query(&format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS))
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err)?;

        row.as_ref().map(Self::row_to_user).transpose()
    }

    async fn delete_by_id(&self, id: &UserId) -> Result<(), UserError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;

        if result.rows_affected() == 0 {
            return Err(UserError::NotFound(id.to_string()));
        }

        Ok(())
    }
}

/// Adapter giving the request gate its minimal per-request lookup: the
/// stored hash and the granted authority, nothing else.
#[async_trait]
impl AuthorityResolver for PostgresUserRepository {
    async fn load_authorities(&self, subject: &str) -> Result<Option<PrincipalView>, UserError> {
        let row = sqlx::query("SELECT email, password_hash, role FROM users WHERE email = $1")
            .bind(subject)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err)?;

        let Some(row) = row else {
            return Ok(None);
        };

        let role: String = row.try_get("role").map_err(db_err)?;
        let role = Role::parse(&role)
            .ok_or_else(|| UserError::DatabaseError(format!("Unknown role in store: {}", role)))?;

        Ok(Some(PrincipalView {
            email: row.try_get("email").map_err(db_err)?,
            password_hash: row.try_get("password_hash").map_err(db_err)?,
            role,
        }))
    }
}

fn db_err(e: impl std::fmt::Display) -> UserError {
    UserError::DatabaseError(e.to_string())
}
