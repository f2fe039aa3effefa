use sqlx::PgPool;
use tracing::instrument;
use yamdb_core::search::contains_pattern;
use yamdb_core::{AppError, PaginationMeta, Role};
use yamdb_models::{
    CreateUserDto, CurrentUser, PaginatedUsersResponse, UpdateProfileDto, UpdateUserDto, User,
    UserFilterParams, UserId,
};

const USER_COLUMNS: &str = "id, username, email, first_name, last_name, bio, role";

/// Maps a violated users constraint to a field error.
pub(crate) fn user_conflict(err: sqlx::Error) -> AppError {
    match yamdb_db::unique_violation(&err) {
        Some("users_username_key") => {
            AppError::field("username", "A user with that username already exists")
        }
        Some("users_email_key") => {
            AppError::field("email", "A user with that email already exists")
        }
        Some(_) => AppError::bad_request(anyhow::anyhow!("User already exists")),
        None => AppError::from(err),
    }
}

pub struct UserService;

impl UserService {
    /// Loads the identity behind an access token; `None` once the account is gone.
    #[instrument(skip(db))]
    pub async fn find_current_user(
        db: &PgPool,
        id: UserId,
    ) -> Result<Option<CurrentUser>, AppError> {
        let user = sqlx::query_as::<_, CurrentUser>(
            "SELECT id, username, role FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(db)
        .await?;

        Ok(user)
    }

    #[instrument(skip(db))]
    pub async fn get_users(
        db: &PgPool,
        filters: UserFilterParams,
    ) -> Result<PaginatedUsersResponse, AppError> {
        let limit = filters.pagination.limit();
        let offset = filters.pagination.offset();
        let pattern = filters.search.as_deref().map(contains_pattern);

        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM users WHERE ($1::text IS NULL OR username ILIKE $1 ESCAPE '\\')",
        )
        .bind(&pattern)
        .fetch_one(db)
        .await?;

        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users
             WHERE ($1::text IS NULL OR username ILIKE $1 ESCAPE '\\')
             ORDER BY username
             LIMIT $2 OFFSET $3"
        ))
        .bind(&pattern)
        .bind(limit)
        .bind(offset)
        .fetch_all(db)
        .await?;

        Ok(PaginatedUsersResponse {
            data: users,
            meta: PaginationMeta::new(total, &filters.pagination),
        })
    }

    #[instrument(skip(db))]
    pub async fn create_user(db: &PgPool, dto: CreateUserDto) -> Result<User, AppError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (username, email, first_name, last_name, bio, role)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {USER_COLUMNS}"
        ))
        .bind(&dto.username)
        .bind(&dto.email)
        .bind(&dto.first_name)
        .bind(&dto.last_name)
        .bind(&dto.bio)
        .bind(dto.role.unwrap_or(Role::User))
        .fetch_one(db)
        .await
        .map_err(user_conflict)?;

        Ok(user)
    }

    #[instrument(skip(db))]
    pub async fn get_user_by_username(db: &PgPool, username: &str) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE username = $1"
        ))
        .bind(username)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("User not found")))
    }

    #[instrument(skip(db))]
    pub async fn get_user_by_id(db: &PgPool, id: UserId) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
            .bind(id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("User not found")))
    }

    /// Applies the present fields of `dto` to the account named `username`.
    #[instrument(skip(db))]
    pub async fn update_user_by_username(
        db: &PgPool,
        username: &str,
        dto: UpdateUserDto,
    ) -> Result<User, AppError> {
        let existing = Self::get_user_by_username(db, username).await?;
        Self::update_user(db, existing, dto).await
    }

    /// Profile edit for the caller; the role is never touched.
    #[instrument(skip(db))]
    pub async fn update_me(
        db: &PgPool,
        id: UserId,
        dto: UpdateProfileDto,
    ) -> Result<User, AppError> {
        let existing = Self::get_user_by_id(db, id).await?;
        Self::update_user(db, existing, dto.into()).await
    }

    async fn update_user(db: &PgPool, existing: User, dto: UpdateUserDto) -> Result<User, AppError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "UPDATE users
             SET username = $1, email = $2, first_name = $3, last_name = $4, bio = $5,
                 role = $6, updated_at = NOW()
             WHERE id = $7
             RETURNING {USER_COLUMNS}"
        ))
        .bind(dto.username.unwrap_or(existing.username))
        .bind(dto.email.unwrap_or(existing.email))
        .bind(dto.first_name.unwrap_or(existing.first_name))
        .bind(dto.last_name.unwrap_or(existing.last_name))
        .bind(dto.bio.unwrap_or(existing.bio))
        .bind(dto.role.unwrap_or(existing.role))
        .bind(existing.id)
        .fetch_optional(db)
        .await
        .map_err(user_conflict)?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("User not found")))?;

        Ok(user)
    }

    #[instrument(skip(db))]
    pub async fn delete_user_by_username(db: &PgPool, username: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM users WHERE username = $1")
            .bind(username)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("User not found")));
        }

        Ok(())
    }
}
