use anyhow::Result;
use chrono::Utc;
use contracts::system::users::{ChangePasswordRequest, CreateUserRequest, UpdateUserRequest, User};

use super::repository;
use crate::system::auth::password;

/// Create a new user
pub async fn create(request: CreateUserRequest) -> Result<String> {
    if request.username.trim().is_empty() {
        return Err(anyhow::anyhow!("Username cannot be empty"));
    }

    if repository::get_by_username(&request.username).await?.is_some() {
        return Err(anyhow::anyhow!("Username already exists"));
    }

    password::validate_password_strength(&request.password)?;
    let password_hash = password::hash_password(&request.password)?;

    let user_id = uuid::Uuid::new_v4().to_string();
    let now = Utc::now().to_rfc3339();

    let user = User {
        id: user_id.clone(),
        username: request.username,
        display_name: request.display_name,
        is_active: true,
        is_admin: request.is_admin,
        created_at: now.clone(),
        updated_at: now,
        last_login_at: None,
    };

    repository::create_with_password(&user, &password_hash).await?;

    Ok(user_id)
}

/// Update user profile fields
pub async fn update(id: &str, request: UpdateUserRequest) -> Result<()> {
    let mut user = repository::get_by_id(id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("User not found"))?;

    if request.display_name.is_some() {
        user.display_name = request.display_name;
    }
    if let Some(is_active) = request.is_active {
        user.is_active = is_active;
    }
    if let Some(is_admin) = request.is_admin {
        user.is_admin = is_admin;
    }
    user.updated_at = Utc::now().to_rfc3339();

    repository::update(&user).await?;

    Ok(())
}

pub async fn delete(id: &str) -> Result<bool> {
    repository::delete(id).await
}

pub async fn get_by_id(id: &str) -> Result<Option<User>> {
    repository::get_by_id(id).await
}

pub async fn list_all() -> Result<Vec<User>> {
    repository::list_all().await
}

/// Change a user's password.
/// Users changing their own password must provide the current one;
/// admins can reset anyone's without it.
pub async fn change_password(
    user_id: &str,
    request: ChangePasswordRequest,
    requester_id: &str,
) -> Result<()> {
    repository::get_by_id(user_id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("User not found"))?;

    let requester = repository::get_by_id(requester_id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Requester not found"))?;

    if user_id != requester_id {
        if !requester.is_admin {
            return Err(anyhow::anyhow!("Permission denied"));
        }
    } else {
        let current_password = request
            .current_password
            .as_deref()
            .ok_or_else(|| anyhow::anyhow!("Current password is required"))?;

        let current_hash = repository::get_password_hash(user_id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Password hash not found"))?;

        if !password::verify_password(current_password, &current_hash)? {
            return Err(anyhow::anyhow!("Invalid current password"));
        }
    }

    password::validate_password_strength(&request.new_password)?;
    let new_hash = password::hash_password(&request.new_password)?;
    repository::update_password(user_id, &new_hash).await?;

    Ok(())
}

/// Verify user credentials (for login)
pub async fn verify_credentials(username: &str, password_input: &str) -> Result<Option<User>> {
    let user = match repository::get_by_username(username).await? {
        Some(u) => u,
        None => return Ok(None),
    };

    if !user.is_active {
        return Err(anyhow::anyhow!("User account is inactive"));
    }

    let password_hash = repository::get_password_hash(&user.id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Password hash not found"))?;

    if !password::verify_password(password_input, &password_hash)? {
        return Ok(None);
    }

    let _ = repository::update_last_login(&user.id).await;

    Ok(Some(user))
}
