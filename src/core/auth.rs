//! Account registration, login, and session management.
//!
//! Credentials are verified against argon2 PHC hashes; plaintext passwords
//! are never stored or compared. A successful login mints a session row with
//! an opaque random token and a server-side expiry, so logout and user
//! deactivation take effect on the very next authentication.

use crate::{
    entities::{Session, User, session, user},
    errors::{Error, Result},
};
use argon2::{
    Argon2,
    password_hash::{
        Error as PasswordHashError, PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
        rand_core::OsRng,
    },
};
use rand::{Rng, distributions::Alphanumeric};
use sea_orm::{Set, prelude::*};
use tracing::{info, warn};

const SESSION_TOKEN_LEN: usize = 48;
const MIN_PASSWORD_LEN: usize = 8;

/// Hashes a password with argon2 and a fresh random salt.
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| Error::PasswordHash {
            message: err.to_string(),
        })
}

fn verify_password(candidate: &str, stored_hash: &str) -> Result<()> {
    let parsed = PasswordHash::new(stored_hash).map_err(|err| Error::PasswordHash {
        message: format!("Stored hash is malformed: {err}"),
    })?;
    Argon2::default()
        .verify_password(candidate.as_bytes(), &parsed)
        .map_err(|err| match err {
            PasswordHashError::Password => Error::InvalidCredentials,
            other => Error::PasswordHash {
                message: other.to_string(),
            },
        })
}

fn generate_session_token() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(SESSION_TOKEN_LEN)
        .map(char::from)
        .collect()
}

/// Registers a new admin account with a hashed password.
///
/// # Errors
/// Returns a validation error for a malformed email, a password shorter
/// than eight characters, or an email already in use.
pub async fn register_user(
    db: &DatabaseConnection,
    email: String,
    password: &str,
    display_name: String,
) -> Result<user::Model> {
    let email = email.trim().to_lowercase();
    if email.is_empty() || !email.contains('@') {
        return Err(Error::Validation {
            message: format!("Invalid email address: \"{email}\""),
        });
    }
    if password.len() < MIN_PASSWORD_LEN {
        return Err(Error::Validation {
            message: format!("Password must be at least {MIN_PASSWORD_LEN} characters"),
        });
    }

    let duplicate = User::find()
        .filter(user::Column::Email.eq(email.clone()))
        .one(db)
        .await?;
    if duplicate.is_some() {
        return Err(Error::Validation {
            message: format!("Email \"{email}\" is already registered"),
        });
    }

    let password_hash = hash_password(password)?;

    let created = user::ActiveModel {
        email: Set(email),
        password_hash: Set(password_hash),
        display_name: Set(display_name),
        is_active: Set(true),
        created_at: Set(chrono::Utc::now().naive_utc()),
        ..Default::default()
    }
    .insert(db)
    .await?;

    info!(user_id = created.id, "registered user {}", created.email);
    Ok(created)
}

/// Verifies credentials and mints a session valid for `ttl`.
///
/// # Errors
/// Returns [`Error::InvalidCredentials`] for an unknown email, a
/// deactivated account, or a wrong password - without distinguishing which.
pub async fn login(
    db: &DatabaseConnection,
    email: &str,
    password: &str,
    ttl: chrono::Duration,
) -> Result<session::Model> {
    let email = email.trim().to_lowercase();
    let account = User::find()
        .filter(user::Column::Email.eq(email.clone()))
        .filter(user::Column::IsActive.eq(true))
        .one(db)
        .await?
        .ok_or(Error::InvalidCredentials)?;

    verify_password(password, &account.password_hash).inspect_err(|_| {
        warn!("failed login attempt for {email}");
    })?;

    let now = chrono::Utc::now().naive_utc();
    let minted = session::ActiveModel {
        token: Set(generate_session_token()),
        user_id: Set(account.id),
        created_at: Set(now),
        expires_at: Set(now + ttl),
        ..Default::default()
    }
    .insert(db)
    .await?;

    info!(user_id = account.id, "login succeeded");
    Ok(minted)
}

/// Resolves a session token to its user.
///
/// An expired session is deleted on sight; a token tied to a deactivated
/// user is rejected without revealing why.
pub async fn authenticate(db: &DatabaseConnection, token: &str) -> Result<user::Model> {
    let found = Session::find()
        .filter(session::Column::Token.eq(token))
        .one(db)
        .await?
        .ok_or(Error::InvalidSession)?;

    if found.expires_at <= chrono::Utc::now().naive_utc() {
        Session::delete_by_id(found.id).exec(db).await?;
        return Err(Error::InvalidSession);
    }

    let account = User::find_by_id(found.user_id)
        .one(db)
        .await?
        .ok_or(Error::InvalidSession)?;
    if !account.is_active {
        return Err(Error::InvalidSession);
    }
    Ok(account)
}

/// Ends a session. Unknown tokens are a no-op.
pub async fn logout(db: &DatabaseConnection, token: &str) -> Result<()> {
    Session::delete_many()
        .filter(session::Column::Token.eq(token))
        .exec(db)
        .await?;
    Ok(())
}

/// Deletes every expired session and returns how many were removed.
pub async fn purge_expired_sessions(db: &DatabaseConnection) -> Result<u64> {
    let result = Session::delete_many()
        .filter(session::Column::ExpiresAt.lte(chrono::Utc::now().naive_utc()))
        .exec(db)
        .await?;
    Ok(result.rows_affected)
}
