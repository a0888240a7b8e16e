use anyhow::{Context, Result};
use sea_orm::{ConnectionTrait, DatabaseBackend, Statement};

/// Auth system tables, embedded so a fresh database works out of the box
const AUTH_MIGRATION_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS sys_users (
    id TEXT PRIMARY KEY NOT NULL,
    username TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL,
    display_name TEXT,
    is_active INTEGER NOT NULL DEFAULT 1,
    is_admin INTEGER NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL,
    last_login_at TEXT
);

CREATE TABLE IF NOT EXISTS sys_refresh_tokens (
    id TEXT PRIMARY KEY NOT NULL,
    user_id TEXT NOT NULL,
    token_hash TEXT NOT NULL,
    expires_at TEXT NOT NULL,
    created_at TEXT NOT NULL,
    revoked_at TEXT
);

CREATE INDEX IF NOT EXISTS idx_sys_refresh_tokens_hash ON sys_refresh_tokens (token_hash);

CREATE TABLE IF NOT EXISTS sys_settings (
    key TEXT PRIMARY KEY NOT NULL,
    value TEXT NOT NULL,
    description TEXT,
    created_at TEXT,
    updated_at TEXT
);
"#;

/// Apply authentication system migration
pub async fn apply_auth_migration() -> Result<()> {
    use crate::shared::data::db::get_connection;

    let conn = get_connection();

    // Execute each statement separately (SQLite doesn't support execute_batch in sea-orm)
    for (idx, statement) in AUTH_MIGRATION_SQL.split(';').enumerate() {
        let trimmed = statement.trim();
        if !trimmed.is_empty() {
            conn.execute(Statement::from_string(
                DatabaseBackend::Sqlite,
                format!("{};", trimmed),
            ))
            .await
            .with_context(|| {
                format!(
                    "Failed to execute auth migration statement #{}: {}",
                    idx,
                    trimmed.lines().take(1).collect::<String>()
                )
            })?;
        }
    }

    tracing::info!("Auth system migration applied successfully");

    Ok(())
}

/// Ensure admin user exists (create if table is empty)
pub async fn ensure_admin_user_exists() -> Result<()> {
    use crate::system::users::{repository, service};
    use contracts::system::users::CreateUserRequest;

    let count = repository::count_users().await?;

    if count == 0 {
        tracing::info!("No users found. Creating default admin user...");

        let admin_request = CreateUserRequest {
            username: "admin".to_string(),
            password: "admin".to_string(),
            display_name: Some("Administrador".to_string()),
            is_admin: true,
        };

        let admin_id = service::create(admin_request).await?;

        tracing::warn!("Default admin user created (admin/admin), id {}", admin_id);
        tracing::warn!("Change the password immediately");
    }

    Ok(())
}
